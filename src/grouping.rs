use crate::data::{CourseGroup, CourseKey, EnrollmentRecord};
use std::collections::HashMap;

/// Partitions records into course groups.
///
/// Groups appear in first-seen order and each group keeps the input order of
/// its records. Empty input yields no groups.
pub fn group_by_course<I>(students: I) -> Vec<CourseGroup>
where
    I: IntoIterator<Item = EnrollmentRecord>,
{
    let mut index: HashMap<CourseKey, usize> = HashMap::new();
    let mut groups: Vec<CourseGroup> = Vec::new();

    for student in students {
        let key = student.course_key();
        match index.get(&key) {
            Some(&pos) => groups[pos].students.push(student),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(CourseGroup {
                    course: key,
                    students: vec![student],
                });
            }
        }
    }

    groups
}
