use crate::data::EnrollmentRecord;
use std::collections::HashSet;

/// Keeps records matching the requested semesters and courses.
///
/// Matching is case-insensitive. A course entry matches either the subject
/// code or the subject name. Empty lists do not filter.
pub fn filter_students(
    students: Vec<EnrollmentRecord>,
    semesters: &[String],
    courses: &[String],
) -> Vec<EnrollmentRecord> {
    let semesters: HashSet<String> = semesters.iter().map(|s| s.trim().to_uppercase()).collect();
    let courses: HashSet<String> = courses.iter().map(|c| c.trim().to_uppercase()).collect();

    students
        .into_iter()
        .filter(|student| {
            semesters.is_empty() || semesters.contains(&student.semester.to_uppercase())
        })
        .filter(|student| {
            courses.is_empty()
                || courses.contains(&student.subject_code.to_uppercase())
                || courses.contains(&student.subject_name.to_uppercase())
        })
        .collect()
}
