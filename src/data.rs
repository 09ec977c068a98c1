use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a physical exam room with a given seating capacity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Room {
    pub room_id: String,
    pub room_name: String,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
}

impl Room {
    pub fn new(room_id: impl Into<String>, capacity: u32) -> Self {
        let room_id = room_id.into();
        Self {
            room_name: room_id.clone(),
            room_id,
            capacity,
            building: None,
        }
    }
}

/// A single student-course enrollment. A student sitting two exams shows up
/// as two independent records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnrollmentRecord {
    pub roll_number: String,
    pub name: String,
    pub subject_code: String,
    pub subject_name: String,
    pub semester: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_code: Option<String>,
}

impl EnrollmentRecord {
    pub fn course_key(&self) -> CourseKey {
        CourseKey {
            subject_code: self.subject_code.clone(),
            subject_name: self.subject_name.clone(),
        }
    }
}

/// Course identity. Two records share a course iff code and name match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct CourseKey {
    pub subject_code: String,
    pub subject_name: String,
}

impl CourseKey {
    pub fn new(subject_code: impl Into<String>, subject_name: impl Into<String>) -> Self {
        Self {
            subject_code: subject_code.into(),
            subject_name: subject_name.into(),
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.subject_name, self.subject_code)
    }
}

/// An ordered group of records sharing one course key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseGroup {
    pub course: CourseKey,
    pub students: Vec<EnrollmentRecord>,
}

/// A room plus the records seated in it, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomAssignment {
    pub room: Room,
    pub students: Vec<EnrollmentRecord>,
}

impl RoomAssignment {
    pub fn utilization(&self) -> f64 {
        if self.room.capacity == 0 {
            return 0.0;
        }
        self.students.len() as f64 / self.room.capacity as f64
    }

    pub fn is_full(&self) -> bool {
        self.students.len() >= self.room.capacity as usize
    }
}

/// Descriptive labels for one exam slot. Carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSpec {
    pub date: String,
    pub slot_name: String,
    pub slot_time: String,
}

impl SlotSpec {
    pub fn new(
        date: impl Into<String>,
        slot_name: impl Into<String>,
        slot_time: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            slot_name: slot_name.into(),
            slot_time: slot_time.into(),
        }
    }
}

/// Allocation outcome for a single slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOutcome {
    pub slot_index: usize,
    pub courses: Vec<CourseKey>,
    pub assignments: Vec<RoomAssignment>,
    pub residual: Vec<CourseGroup>,
}

impl SlotOutcome {
    pub fn seated(&self) -> usize {
        self.assignments.iter().map(|a| a.students.len()).sum()
    }

    pub fn unseated(&self) -> usize {
        self.residual.iter().map(|g| g.students.len()).sum()
    }
}

/// Per-slot room assignments plus residuals, indexed by slot position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub slots: Vec<SlotOutcome>,
}

impl ScheduleResult {
    pub fn slot(&self, index: usize) -> Option<&SlotOutcome> {
        self.slots.get(index)
    }

    pub fn total_seated(&self) -> usize {
        self.slots.iter().map(SlotOutcome::seated).sum()
    }
}

/// Records that could not be seated anywhere, aggregated over all slots.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpilloverSummary {
    pub total_unplaced: usize,
    pub residual: Vec<CourseGroup>,
}

impl SpilloverSummary {
    pub fn is_empty(&self) -> bool {
        self.total_unplaced == 0
    }
}
