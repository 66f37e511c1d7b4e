//! In-memory store of assignment records.
//!
//! The store itself is not synchronised; the server keeps exactly one instance
//! behind a lock in `AppState`, which makes each call below atomic.

use crate::domain::{AssignmentFilter, AssignmentRecord, Grade, NewSubmission, StoreError};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// Authoritative collection of submissions, keyed by id.
#[derive(Debug, Default)]
pub struct AssignmentStore {
    records: HashMap<Uuid, AssignmentRecord>,
    // Insertion order, so listings are stable within a run.
    order: Vec<Uuid>,
}

impl AssignmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stores a new submission under a fresh random id and returns the full record.
    pub fn create(&mut self, submission: NewSubmission) -> AssignmentRecord {
        let mut id = Uuid::new_v4();
        while self.records.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let record = AssignmentRecord::new(id, submission, Utc::now());
        self.records.insert(id, record.clone());
        self.order.push(id);
        record
    }

    pub fn get(&self, id: &Uuid) -> Result<&AssignmentRecord, StoreError> {
        self.records.get(id).ok_or(StoreError::NotFound { id: *id })
    }

    /// Returns every record matching all filters, in insertion order.
    pub fn list(&self, filter: &AssignmentFilter) -> Vec<AssignmentRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .filter(|record| filter.matches(record))
            .cloned()
            .collect()
    }

    /// Sets (or replaces) the grade of an existing record.
    ///
    /// Existence is checked before the range, so an unknown id is always `NotFound`.
    /// On error the record is left untouched.
    pub fn set_grade(&mut self, id: &Uuid, grade: f64) -> Result<AssignmentRecord, StoreError> {
        let record = self
            .records
            .get_mut(id)
            .ok_or(StoreError::NotFound { id: *id })?;
        let grade = Grade::new(grade)?;

        record.apply_grade(grade, Utc::now());
        Ok(record.clone())
    }

    /// Removes a record permanently and returns it.
    pub fn delete(&mut self, id: &Uuid) -> Result<AssignmentRecord, StoreError> {
        let record = self
            .records
            .remove(id)
            .ok_or(StoreError::NotFound { id: *id })?;
        self.order.retain(|existing| existing != id);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AssignmentType;
    use std::collections::HashSet;

    fn submission(student_id: &str, assignment_type: AssignmentType) -> NewSubmission {
        NewSubmission {
            student_name: "John Doe".to_string(),
            student_id: student_id.to_string(),
            assignment_type,
            assignment_name: "Lab 1".to_string(),
            submission_url: "https://x/1".to_string(),
        }
    }

    #[test]
    fn create_assigns_unique_ids_and_no_grade() {
        let mut store = AssignmentStore::new();
        let mut ids = HashSet::new();

        for i in 0..200 {
            let record = store.create(submission(&format!("S{}", i % 7), AssignmentType::Lab));
            assert!(record.grading.is_none());
            assert!(record.grade().is_none());
            assert!(record.graded_at().is_none());
            assert!(ids.insert(record.id), "duplicate id {}", record.id);
        }
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn get_returns_created_record() {
        let mut store = AssignmentStore::new();
        let created = store.create(submission("S12345", AssignmentType::Lab));

        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched, &created);
        assert_eq!(fetched.student_name, "John Doe");
    }

    #[test]
    fn set_grade_within_range_updates_record() {
        let mut store = AssignmentStore::new();
        let created = store.create(submission("S1", AssignmentType::Test));

        for grade in [0.0, 42.5, 95.0, 100.0] {
            let updated = store.set_grade(&created.id, grade).unwrap();
            assert_eq!(updated.grade(), Some(grade));

            let fetched = store.get(&created.id).unwrap();
            assert_eq!(fetched.grade(), Some(grade));
            let graded_at = fetched.graded_at().unwrap();
            assert!(graded_at >= fetched.submitted_at);
        }
    }

    #[test]
    fn set_grade_out_of_range_leaves_record_unchanged() {
        let mut store = AssignmentStore::new();
        let created = store.create(submission("S1", AssignmentType::Test));
        store.set_grade(&created.id, 80.0).unwrap();
        let before = store.get(&created.id).unwrap().clone();

        for grade in [-1.0, 100.01, 1000.0, f64::NAN] {
            let err = store.set_grade(&created.id, grade).unwrap_err();
            assert!(matches!(err, StoreError::InvalidGrade { .. }));
            assert_eq!(store.get(&created.id).unwrap(), &before);
        }
    }

    #[test]
    fn unknown_id_is_not_found_without_mutation() {
        let mut store = AssignmentStore::new();
        store.create(submission("S1", AssignmentType::Lab));
        let missing = Uuid::new_v4();

        assert_eq!(store.get(&missing), Err(StoreError::NotFound { id: missing }));
        assert_eq!(
            store.set_grade(&missing, 50.0),
            Err(StoreError::NotFound { id: missing })
        );
        // Not found takes precedence over a bad grade.
        assert_eq!(
            store.set_grade(&missing, 500.0),
            Err(StoreError::NotFound { id: missing })
        );
        assert_eq!(store.delete(&missing), Err(StoreError::NotFound { id: missing }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_removes_from_get_and_list() {
        let mut store = AssignmentStore::new();
        let keep = store.create(submission("S1", AssignmentType::Lab));
        let gone = store.create(submission("S1", AssignmentType::Lab));

        let removed = store.delete(&gone.id).unwrap();
        assert_eq!(removed.id, gone.id);
        assert!(store.get(&gone.id).is_err());

        let ids: Vec<Uuid> = store
            .list(&AssignmentFilter::default())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![keep.id]);
        assert!(store.delete(&gone.id).is_err());
    }

    #[test]
    fn list_filters_and_preserves_insertion_order() {
        let mut store = AssignmentStore::new();
        let a = store.create(submission("S1", AssignmentType::Lab));
        let b = store.create(submission("S2", AssignmentType::Lab));
        let c = store.create(submission("S1", AssignmentType::Test));
        let d = store.create(submission("S1", AssignmentType::Lab));

        let all: Vec<Uuid> = store
            .list(&AssignmentFilter::default())
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(all, vec![a.id, b.id, c.id, d.id]);

        let labs = store.list(&AssignmentFilter {
            assignment_type: Some(AssignmentType::Lab),
            student_id: None,
        });
        assert_eq!(labs.len(), 3);
        assert!(labs.iter().all(|r| r.assignment_type == AssignmentType::Lab));

        let s1_labs: Vec<Uuid> = store
            .list(&AssignmentFilter {
                assignment_type: Some(AssignmentType::Lab),
                student_id: Some("S1".to_string()),
            })
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(s1_labs, vec![a.id, d.id]);

        let nobody = store.list(&AssignmentFilter {
            assignment_type: None,
            student_id: Some("S404".to_string()),
        });
        assert!(nobody.is_empty());
    }
}
