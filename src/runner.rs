use crate::allocator::allocate_slot;
use crate::data::{
    CourseGroup, CourseKey, EnrollmentRecord, Room, ScheduleResult, SlotOutcome, SlotSpec,
    SpilloverSummary,
};
use crate::distribute::distribute_courses;
use crate::error::{AllocationError, AllocationResult};
use crate::grouping::group_by_course;
use crate::strategy::Strategy;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Seed for a reproducible run. Text seeds are hashed to an integer first.
///
/// Integers above `i64::MAX` land in `Unsigned`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Seed {
    Int(i64),
    Unsigned(u64),
    Text(String),
}

impl Seed {
    pub fn to_u64(&self) -> u64 {
        match self {
            Seed::Int(value) => *value as u64,
            Seed::Unsigned(value) => *value,
            Seed::Text(text) => fnv1a(text.as_bytes()),
        }
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed::Int(value)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed::Unsigned(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_string())
    }
}

// 64-bit FNV-1a; stable across platforms, unlike the std hasher.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}

/// Builds the run's random source. No seed means OS entropy.
pub fn rng_from_seed(seed: Option<&Seed>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.to_u64()),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Static parameters of a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub strategy: Strategy,
    pub max_courses_per_room: usize,
    #[serde(default)]
    pub seed: Option<Seed>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Smart,
            max_courses_per_room: 3,
            seed: None,
        }
    }
}

fn check_params(strategy: Strategy, max_courses: usize, num_slots: usize) -> AllocationResult<()> {
    if num_slots == 0 {
        return Err(AllocationError::InvalidSlotCount);
    }
    if strategy.is_multi_course() && max_courses == 0 {
        return Err(AllocationError::InvalidMaxCourses(strategy.as_str()));
    }
    Ok(())
}

/// Result of a full run, handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRun {
    pub schedule: ScheduleResult,
    pub spillover: SpilloverSummary,
}

/// Drives distribution and per-slot allocation with one shared random source.
///
/// Slots are resolved strictly in order, so the whole run is reproducible from
/// the generator's starting state.
pub struct ScheduleRunner<R> {
    strategy: Strategy,
    max_courses_per_room: usize,
    rng: R,
}

impl ScheduleRunner<ChaCha8Rng> {
    pub fn from_config(config: &RunConfig) -> Self {
        Self::with_rng(
            config.strategy,
            config.max_courses_per_room,
            rng_from_seed(config.seed.as_ref()),
        )
    }
}

impl<R: Rng> ScheduleRunner<R> {
    pub fn with_rng(strategy: Strategy, max_courses_per_room: usize, rng: R) -> Self {
        Self {
            strategy,
            max_courses_per_room,
            rng,
        }
    }

    pub fn run(
        &mut self,
        rooms: &[Room],
        students: Vec<EnrollmentRecord>,
        slots: &[SlotSpec],
    ) -> AllocationResult<ScheduleRun> {
        let start_time = Instant::now();
        check_params(self.strategy, self.max_courses_per_room, slots.len())?;

        let groups = group_by_course(students);
        let course_keys: Vec<CourseKey> = groups.iter().map(|g| g.course.clone()).collect();
        info!(
            "Allocating {} course(s) across {} slot(s) and {} room(s) using {}",
            course_keys.len(),
            slots.len(),
            rooms.len(),
            self.strategy
        );

        let slot_courses = distribute_courses(&course_keys, slots.len(), &mut self.rng)?;
        let mut by_course: HashMap<CourseKey, Vec<EnrollmentRecord>> =
            groups.into_iter().map(|g| (g.course, g.students)).collect();

        let mut outcomes = Vec::with_capacity(slots.len());
        let mut spillover = SpilloverSummary::default();

        for (slot_index, (slot, courses)) in slots.iter().zip(slot_courses).enumerate() {
            let students_for_slot: Vec<CourseGroup> = courses
                .iter()
                .filter_map(|course| {
                    by_course.remove(course).map(|students| CourseGroup {
                        course: course.clone(),
                        students,
                    })
                })
                .collect();
            debug!(
                "Slot {}/{} ({} - {}): {} course(s)",
                slot_index + 1,
                slots.len(),
                slot.date,
                slot.slot_name,
                courses.len()
            );

            let allocation = allocate_slot(
                rooms,
                students_for_slot,
                self.strategy,
                self.max_courses_per_room,
                &mut self.rng,
            )?;

            spillover.total_unplaced += allocation
                .residual
                .iter()
                .map(|g| g.students.len())
                .sum::<usize>();
            spillover.residual.extend(allocation.residual.iter().cloned());

            outcomes.push(SlotOutcome {
                slot_index,
                courses,
                assignments: allocation.assignments,
                residual: allocation.residual,
            });
        }

        let schedule = ScheduleResult { slots: outcomes };
        info!(
            "Allocation finished in {:.2?}: {} seated, {} unplaced",
            start_time.elapsed(),
            schedule.total_seated(),
            spillover.total_unplaced
        );
        Ok(ScheduleRun {
            schedule,
            spillover,
        })
    }
}

/// Runs a full allocation with a generator built from `config.seed`.
pub fn run_schedule(
    rooms: &[Room],
    students: Vec<EnrollmentRecord>,
    slots: &[SlotSpec],
    config: &RunConfig,
) -> AllocationResult<ScheduleRun> {
    ScheduleRunner::from_config(config).run(rooms, students, slots)
}
