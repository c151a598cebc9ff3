//! In-memory payment record storage
//!
//! Uses DashMap for concurrent access; records are indexed by student.

use academia_common::{AcademiaError, NotFoundError, Result};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use super::{PaymentRecord, PaymentRecordStore};

/// DashMap-backed record store
#[derive(Debug, Default)]
pub struct InMemoryPaymentRecordStore {
    /// All records by ID
    records: DashMap<Uuid, PaymentRecord>,

    /// Record IDs by student, in insertion order
    by_student: DashMap<String, Vec<Uuid>>,
}

impl InMemoryPaymentRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRecordStore for InMemoryPaymentRecordStore {
    async fn save(&self, record: PaymentRecord) -> Result<Uuid> {
        let id = record.id;
        let student_id = record.student_id.clone();

        // Claim the id under the shard lock so only one writer can index it
        match self.records.entry(id) {
            Entry::Occupied(_) => {
                return Err(AcademiaError::Storage(format!(
                    "payment record {} already exists",
                    id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
        self.by_student.entry(student_id.clone()).or_default().push(id);

        debug!(%id, %student_id, "Stored payment record");
        Ok(id)
    }

    async fn get(&self, id: &Uuid) -> Result<PaymentRecord> {
        self.records
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| NotFoundError::payment_record(id.to_string()).into())
    }

    async fn list_for_student(&self, student_id: &str) -> Result<Vec<PaymentRecord>> {
        let mut records: Vec<PaymentRecord> = self
            .by_student
            .get(student_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.records.get(id).map(|r| r.clone()))
                    .collect()
            })
            .unwrap_or_default();

        // v7 ids break ties between records stamped in the same instant
        records.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn count(&self) -> usize {
        self.records.len()
    }
}
