use crate::data::CourseKey;
use crate::error::{AllocationError, AllocationResult};
use log::trace;
use rand::Rng;
use rand::seq::SliceRandom;

/// Spreads courses across `num_slots` exam slots.
///
/// The keys are shuffled with `rng` and then dealt round-robin, so shuffled
/// position `i` lands in slot `i % num_slots`. The returned vector always has
/// `num_slots` entries; surplus slots stay empty.
pub fn distribute_courses<R>(
    course_keys: &[CourseKey],
    num_slots: usize,
    rng: &mut R,
) -> AllocationResult<Vec<Vec<CourseKey>>>
where
    R: Rng + ?Sized,
{
    if num_slots == 0 {
        return Err(AllocationError::InvalidSlotCount);
    }

    let mut shuffled = course_keys.to_vec();
    shuffled.shuffle(rng);

    let mut slots: Vec<Vec<CourseKey>> = vec![Vec::new(); num_slots];
    for (offset, key) in shuffled.into_iter().enumerate() {
        slots[offset % num_slots].push(key);
    }

    trace!(
        "Distributed {} course(s) over {} slot(s): {:?}",
        course_keys.len(),
        num_slots,
        slots.iter().map(Vec::len).collect::<Vec<_>>()
    );
    Ok(slots)
}
