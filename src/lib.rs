//! Exam room allocation.
//!
//! Courses are spread over exam slots, then each slot's enrollment records
//! are packed into rooms under one of three strategies. The allocation
//! modules do no I/O; `schema`, `filter`, `report` and `server` adapt them to
//! raw input rows and HTTP.

pub mod allocator;
pub mod config;
pub mod data;
pub mod distribute;
pub mod error;
pub mod filler;
pub mod filter;
pub mod grouping;
pub mod pools;
pub mod report;
pub mod runner;
pub mod schema;
pub mod selector;
pub mod server;
pub mod strategy;

pub use allocator::{SlotAllocation, allocate_slot};
pub use data::{
    CourseGroup, CourseKey, EnrollmentRecord, Room, RoomAssignment, ScheduleResult, SlotOutcome,
    SlotSpec, SpilloverSummary,
};
pub use distribute::distribute_courses;
pub use error::{AllocationError, AllocationResult, SchemaError};
pub use filler::fill_room;
pub use grouping::group_by_course;
pub use runner::{RunConfig, ScheduleRun, ScheduleRunner, Seed, run_schedule};
pub use selector::select_courses;
pub use strategy::Strategy;
