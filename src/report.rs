use crate::data::{RoomAssignment, ScheduleResult, SlotSpec};
use itertools::Itertools;
use serde::Serialize;

/// One room's line in the schedule summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: String,
    pub room_name: String,
    pub building: String,
    pub capacity: u32,
    pub students_assigned: usize,
    pub courses: Vec<String>,
    pub semesters: Vec<String>,
    pub fully_utilized: bool,
    pub utilization_percent: f64,
}

impl RoomSummary {
    pub fn from_assignment(assignment: &RoomAssignment) -> Self {
        let courses = assignment
            .students
            .iter()
            .map(|s| s.course_key().to_string())
            .sorted()
            .dedup()
            .collect();
        let semesters = assignment
            .students
            .iter()
            .map(|s| s.semester.clone())
            .sorted()
            .dedup()
            .collect();

        Self {
            room_id: assignment.room.room_id.clone(),
            room_name: assignment.room.room_name.clone(),
            building: assignment.room.building.clone().unwrap_or_default(),
            capacity: assignment.room.capacity,
            students_assigned: assignment.students.len(),
            courses,
            semesters,
            fully_utilized: assignment.is_full(),
            utilization_percent: (assignment.utilization() * 10_000.0).round() / 100.0,
        }
    }
}

/// Rooms used in one exam slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSummary {
    pub exam_date: String,
    pub slot_name: String,
    pub slot_time: String,
    pub rooms: Vec<RoomSummary>,
}

/// Pairs slot labels with their room assignments. Slots without a matching
/// outcome get an empty room list.
pub fn summarize(slots: &[SlotSpec], schedule: &ScheduleResult) -> Vec<SlotSummary> {
    slots
        .iter()
        .enumerate()
        .map(|(index, slot)| SlotSummary {
            exam_date: slot.date.clone(),
            slot_name: slot.slot_name.clone(),
            slot_time: slot.slot_time.clone(),
            rooms: schedule
                .slot(index)
                .map(|outcome| outcome.assignments.iter().map(RoomSummary::from_assignment).collect())
                .unwrap_or_default(),
        })
        .collect()
}
