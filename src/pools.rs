use crate::data::{CourseGroup, CourseKey, EnrollmentRecord};
use std::collections::{HashMap, VecDeque};

/// FIFO queues of pending records for one slot, one queue per course.
///
/// Iteration follows the order the groups were handed in, which is what
/// course-wise tie-breaking and residual reporting rely on.
#[derive(Debug, Default)]
pub struct CoursePools {
    order: Vec<CourseKey>,
    queues: HashMap<CourseKey, VecDeque<EnrollmentRecord>>,
}

impl CoursePools {
    pub fn from_groups(groups: Vec<CourseGroup>) -> Self {
        let mut pools = CoursePools::default();
        for group in groups {
            match pools.queues.get_mut(&group.course) {
                Some(queue) => queue.extend(group.students),
                None => {
                    pools.order.push(group.course.clone());
                    pools.queues.insert(group.course, group.students.into());
                }
            }
        }
        pools
    }

    /// Courses with at least one record still pending, in pool order.
    pub fn available(&self) -> Vec<CourseKey> {
        self.order
            .iter()
            .filter(|key| self.pending(key) > 0)
            .cloned()
            .collect()
    }

    pub fn pending(&self, key: &CourseKey) -> usize {
        self.queues.get(key).map_or(0, VecDeque::len)
    }

    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queues.values().all(VecDeque::is_empty)
    }

    pub fn pop_front(&mut self, key: &CourseKey) -> Option<EnrollmentRecord> {
        self.queues.get_mut(key).and_then(VecDeque::pop_front)
    }

    /// Whatever is still queued, in pool order, omitting drained courses.
    pub fn into_residual(self) -> Vec<CourseGroup> {
        let CoursePools { order, mut queues } = self;
        order
            .into_iter()
            .filter_map(|course| {
                let students: Vec<EnrollmentRecord> = queues.remove(&course)?.into();
                (!students.is_empty()).then_some(CourseGroup { course, students })
            })
            .collect()
    }
}
