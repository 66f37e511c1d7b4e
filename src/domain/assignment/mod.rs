//! Assignment submissions and their grading state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

pub mod error;

pub use error::StoreError;

/// Lowest grade a submission can receive.
pub const MIN_GRADE: f64 = 0.0;
/// Highest grade a submission can receive.
pub const MAX_GRADE: f64 = 100.0;

/// Kind of work being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    Test,
    Lab,
}

impl AssignmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentType::Test => "test",
            AssignmentType::Lab => "lab",
        }
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentType {
    type Err = String;

    /// Exact, case-sensitive match on `test` / `lab`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(AssignmentType::Test),
            "lab" => Ok(AssignmentType::Lab),
            other => Err(format!("unknown assignment type '{}'", other)),
        }
    }
}

/// Validated fields of a new submission, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub student_name: String,
    pub student_id: String,
    pub assignment_type: AssignmentType,
    pub assignment_name: String,
    pub submission_url: String,
}

/// A grade within `[MIN_GRADE, MAX_GRADE]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Grade(f64);

impl Grade {
    pub fn new(value: f64) -> Result<Self, StoreError> {
        if value.is_finite() && (MIN_GRADE..=MAX_GRADE).contains(&value) {
            Ok(Grade(value))
        } else {
            Err(StoreError::InvalidGrade { grade: value })
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Grade together with the moment it was given. Both exist or neither does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grading {
    pub grade: Grade,
    pub graded_at: DateTime<Utc>,
}

/// One stored submission.
///
/// `id` and `submitted_at` are fixed when the store creates the record; the only
/// mutation afterwards is grading.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRecord {
    pub id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub assignment_type: AssignmentType,
    pub assignment_name: String,
    pub submission_url: String,
    pub submitted_at: DateTime<Utc>,
    pub grading: Option<Grading>,
}

impl AssignmentRecord {
    pub(crate) fn new(id: Uuid, submission: NewSubmission, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            student_name: submission.student_name,
            student_id: submission.student_id,
            assignment_type: submission.assignment_type,
            assignment_name: submission.assignment_name,
            submission_url: submission.submission_url,
            submitted_at,
            grading: None,
        }
    }

    pub fn grade(&self) -> Option<f64> {
        self.grading.map(|g| g.grade.value())
    }

    pub fn graded_at(&self) -> Option<DateTime<Utc>> {
        self.grading.map(|g| g.graded_at)
    }

    /// Records a grade. The timestamp never precedes `submitted_at`, even if the
    /// wall clock stepped backwards in between.
    pub(crate) fn apply_grade(&mut self, grade: Grade, now: DateTime<Utc>) {
        self.grading = Some(Grading {
            grade,
            graded_at: now.max(self.submitted_at),
        });
    }
}

/// Equality filters for listing; `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentFilter {
    pub assignment_type: Option<AssignmentType>,
    pub student_id: Option<String>,
}

impl AssignmentFilter {
    pub fn matches(&self, record: &AssignmentRecord) -> bool {
        if let Some(t) = self.assignment_type {
            if record.assignment_type != t {
                return false;
            }
        }
        if let Some(student_id) = &self.student_id {
            if &record.student_id != student_id {
                return false;
            }
        }
        true
    }
}
