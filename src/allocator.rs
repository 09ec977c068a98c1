use crate::data::{CourseGroup, Room, RoomAssignment};
use crate::error::AllocationResult;
use crate::filler::fill_room;
use crate::pools::CoursePools;
use crate::selector::select_courses;
use crate::strategy::Strategy;
use log::{debug, trace};
use rand::Rng;

/// Room assignments for one slot and whatever could not be seated.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotAllocation {
    pub assignments: Vec<RoomAssignment>,
    pub residual: Vec<CourseGroup>,
}

/// Allocates the records of one slot to `rooms`, visited in the given order.
///
/// Rooms are not re-sorted here; callers pass them largest first. Rooms that
/// end up empty are left out of the assignments. Running out of rooms is not
/// an error: the leftovers come back as the residual.
pub fn allocate_slot<R>(
    rooms: &[Room],
    students_for_slot: Vec<CourseGroup>,
    strategy: Strategy,
    max_courses: usize,
    rng: &mut R,
) -> AllocationResult<SlotAllocation>
where
    R: Rng + ?Sized,
{
    let mut pools = CoursePools::from_groups(students_for_slot);
    let total = pools.remaining();
    let mut assignments = Vec::new();

    for room in rooms {
        if pools.is_exhausted() {
            break;
        }
        let available = pools.available();
        let selected = select_courses(&available, &pools, strategy, max_courses, rng)?;
        if selected.is_empty() {
            continue;
        }

        let assignment = fill_room(room, &selected, &mut pools, strategy);
        if assignment.students.is_empty() {
            trace!("Room {} left empty", room.room_id);
            continue;
        }
        assignments.push(assignment);
    }

    let residual = pools.into_residual();
    debug!(
        "Slot allocation ({}): {} room(s) used, {} of {} record(s) seated",
        strategy,
        assignments.len(),
        total - residual.iter().map(|g| g.students.len()).sum::<usize>(),
        total
    );

    Ok(SlotAllocation {
        assignments,
        residual,
    })
}
