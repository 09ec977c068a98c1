use crate::data::{CourseKey, Room, RoomAssignment};
use crate::pools::CoursePools;
use crate::strategy::Strategy;
use log::trace;

/// Seats records in `room` by rotating over `selected` courses.
///
/// Each turn pops one record from the course under the cursor and advances
/// the cursor. A drained course leaves the rotation without using a seat and
/// the cursor stays put, wrapping to the start when it falls off the end.
/// Filling stops once the room is full or the rotation is empty.
///
/// Course-wise rooms only ever draw from the first selected course, so a room
/// whose course runs dry stays underfilled rather than taking a second course.
pub fn fill_room(
    room: &Room,
    selected: &[CourseKey],
    pools: &mut CoursePools,
    strategy: Strategy,
) -> RoomAssignment {
    let mut rotation: Vec<&CourseKey> = match strategy {
        Strategy::CourseWise => selected.iter().take(1).collect(),
        Strategy::Balanced | Strategy::Smart => selected.iter().collect(),
    };

    let capacity = room.capacity as usize;
    let mut students = Vec::with_capacity(capacity.min(pools.remaining()));
    let mut cursor = 0;

    while students.len() < capacity && !rotation.is_empty() {
        match pools.pop_front(rotation[cursor]) {
            Some(student) => {
                students.push(student);
                cursor = (cursor + 1) % rotation.len();
            }
            None => {
                rotation.remove(cursor);
                if cursor >= rotation.len() {
                    cursor = 0;
                }
            }
        }
    }

    trace!(
        "Room {} seated {}/{} from {} course(s)",
        room.room_id,
        students.len(),
        room.capacity,
        selected.len()
    );

    RoomAssignment {
        room: room.clone(),
        students,
    }
}
