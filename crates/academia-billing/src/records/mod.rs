//! Payment records
//!
//! A [`PaymentRecord`] is a priced [`PaymentResult`] attached to a student
//! and a point in time. Storage backends implement [`PaymentRecordStore`].

pub mod memory;

pub use memory::InMemoryPaymentRecordStore;

use academia_common::{PaymentResult, PaymentTiming, Result, ServiceSelection};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub student_id: String,
    /// Human-readable concept, e.g. "2 disciplines"
    pub concept: String,
    pub selection: ServiceSelection,
    pub timing: PaymentTiming,
    pub result: PaymentResult,
    pub recorded_at: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn new(
        student_id: impl Into<String>,
        selection: ServiceSelection,
        result: PaymentResult,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            student_id: student_id.into(),
            concept: result.description.clone(),
            selection,
            timing: result.timing,
            result,
            recorded_at: Utc::now(),
        }
    }

    /// Gross amount charged
    pub fn amount(&self) -> rust_decimal::Decimal {
        self.result.final_amount
    }
}

/// Trait for payment record storage backends
#[async_trait]
pub trait PaymentRecordStore: Send + Sync {
    /// Store a record, returning its id
    async fn save(&self, record: PaymentRecord) -> Result<Uuid>;

    /// Get a record by id
    async fn get(&self, id: &Uuid) -> Result<PaymentRecord>;

    /// All records for a student, newest first
    async fn list_for_student(&self, student_id: &str) -> Result<Vec<PaymentRecord>>;

    /// Total record count
    async fn count(&self) -> usize;
}
