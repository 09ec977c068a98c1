//! Resolves loosely-typed input rows into rooms and enrollment records.
//!
//! Exports from different systems name the same column differently, so each
//! canonical field carries a list of accepted headers. The first header that
//! appears anywhere in the input wins.

use crate::data::{EnrollmentRecord, Room};
use crate::error::SchemaError;
use log::{debug, trace};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// One input row: column header to cell value.
pub type Row = HashMap<String, Value>;

const ROLL: &[&str] = &[
    "Student Roll Number",
    "Roll Number",
    "Enrollment Number",
    "student_roll_number",
];
const NAME: &[&str] = &["Student Name", "Name", "student_name"];
const SUBJECT_CODE: &[&str] = &["Subject Code", "Course Code", "subject_code"];
const SUBJECT_NAME: &[&str] = &["Subject Name", "Course Name", "subject_name"];
const SEMESTER: &[&str] = &["Student Session", "Semester", "student_session"];
const PROGRAM: &[&str] = &["Program", "Programme"];
const BATCH: &[&str] = &["Batch"];
const SITE_CODE: &[&str] = &["Site Code", "Campus"];

const ROOM_ID: &[&str] = &["room_id", "Room Number"];
const ROOM_NAME: &[&str] = &["room_name", "Room Name", "room_id"];
const CAPACITY: &[&str] = &["capacity", "Capacity", "capacitiy"];
const BUILDING: &[&str] = &["building", "Building", "Site Code"];

/// Header resolution for enrollment rows.
#[derive(Debug, Clone)]
pub struct StudentColumns {
    roll: &'static str,
    name: &'static str,
    subject_code: &'static str,
    subject_name: &'static str,
    semester: &'static str,
    program: Option<&'static str>,
    batch: Option<&'static str>,
    site_code: Option<&'static str>,
}

impl StudentColumns {
    pub fn resolve(headers: &BTreeSet<&str>) -> Result<Self, SchemaError> {
        let required = [
            ("roll", find_column(headers, ROLL)),
            ("name", find_column(headers, NAME)),
            ("subject_code", find_column(headers, SUBJECT_CODE)),
            ("subject_name", find_column(headers, SUBJECT_NAME)),
            ("semester", find_column(headers, SEMESTER)),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, column)| column.is_none())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns {
                kind: "students",
                columns: missing,
            });
        }

        let [roll, name, subject_code, subject_name, semester] =
            required.map(|(_, column)| column.unwrap_or_default());
        Ok(Self {
            roll,
            name,
            subject_code,
            subject_name,
            semester,
            program: find_column(headers, PROGRAM),
            batch: find_column(headers, BATCH),
            site_code: find_column(headers, SITE_CODE),
        })
    }

    /// Builds a record, or `None` when the row lacks a roll number or code.
    pub fn record(&self, row: &Row) -> Option<EnrollmentRecord> {
        let roll_number = cell(row, self.roll)?;
        let subject_code = cell(row, self.subject_code)?;
        let name = cell(row, self.name).unwrap_or_else(|| "UNKNOWN".to_string());
        let subject_name = cell(row, self.subject_name).unwrap_or_else(|| subject_code.clone());

        Some(EnrollmentRecord {
            roll_number,
            name,
            subject_code,
            subject_name,
            semester: normalize_semester(cell(row, self.semester).as_deref()),
            program: self.program.and_then(|c| cell(row, c)),
            batch: self.batch.and_then(|c| cell(row, c)),
            site_code: self.site_code.and_then(|c| cell(row, c)),
        })
    }
}

pub fn normalize_semester(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_uppercase(),
        _ => "UNKNOWN".to_string(),
    }
}

/// Resolves enrollment records from `rows`, keeping input order.
pub fn load_students(rows: &[Row]) -> Result<Vec<EnrollmentRecord>, SchemaError> {
    let headers = header_set(rows);
    let columns = StudentColumns::resolve(&headers)?;
    debug!("Resolved student columns: {:?}", columns);

    let students: Vec<EnrollmentRecord> = rows
        .iter()
        .filter_map(|row| {
            let record = columns.record(row);
            if record.is_none() {
                trace!("Skipping enrollment row without roll number or subject code");
            }
            record
        })
        .collect();

    if students.is_empty() {
        return Err(SchemaError::Empty("student records"));
    }
    Ok(students)
}

/// Resolves rooms from `rows`, largest capacity first.
pub fn load_rooms(rows: &[Row]) -> Result<Vec<Room>, SchemaError> {
    let headers = header_set(rows);
    let mut missing = Vec::new();
    if find_column(&headers, ROOM_ID).is_none() {
        missing.push("room_id");
    }
    if find_column(&headers, CAPACITY).is_none() {
        missing.push("capacity");
    }
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns {
            kind: "rooms",
            columns: missing,
        });
    }

    let mut rooms: Vec<Room> = rows.iter().filter_map(room_from_row).collect();
    if rooms.is_empty() {
        return Err(SchemaError::Empty("rooms"));
    }
    rooms.sort_by(|a, b| b.capacity.cmp(&a.capacity));
    Ok(rooms)
}

// Aliases are tried per row here; room exports mix header spellings.
fn room_from_row(row: &Row) -> Option<Room> {
    let capacity = CAPACITY
        .iter()
        .find_map(|column| cell(row, column))
        .and_then(|raw| parse_capacity(&raw))?;
    let room_id = ROOM_ID.iter().find_map(|column| cell(row, column))?;
    let room_name = ROOM_NAME
        .iter()
        .find_map(|column| cell(row, column))
        .unwrap_or_else(|| room_id.clone());
    let building = BUILDING.iter().find_map(|column| cell(row, column));

    Some(Room {
        room_id,
        room_name,
        capacity,
        building,
    })
}

fn parse_capacity(raw: &str) -> Option<u32> {
    let value: f64 = raw.parse().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u32)
}

fn header_set(rows: &[Row]) -> BTreeSet<&str> {
    rows.iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect()
}

fn find_column(headers: &BTreeSet<&str>, options: &[&'static str]) -> Option<&'static str> {
    options.iter().copied().find(|option| headers.contains(option))
}

/// Trimmed, non-empty text of a cell. Numbers are rendered as written.
fn cell(row: &Row, column: &str) -> Option<String> {
    let text = match row.get(column)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
