use thiserror::Error;

/// Invalid static parameters. Always fatal to a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("number of slots must be positive")]
    InvalidSlotCount,

    #[error("unknown allocation strategy: {0} (expected smart, course-wise or balanced)")]
    UnknownStrategy(String),

    #[error("max courses per room must be positive for the {0} strategy")]
    InvalidMaxCourses(&'static str),
}

pub type AllocationResult<T> = Result<T, AllocationError>;

/// Failures while resolving raw input rows into rooms and enrollment records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{kind} input missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        kind: &'static str,
        columns: Vec<&'static str>,
    },

    #[error("no {0} could be loaded from the input")]
    Empty(&'static str),
}
