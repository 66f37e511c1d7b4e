//! Domain types for assignment submissions.

pub mod assignment;

pub use assignment::{
    AssignmentFilter, AssignmentRecord, AssignmentType, Grade, Grading, NewSubmission, StoreError,
};
