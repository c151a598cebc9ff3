//! # Academia Billing
//!
//! Tuition and membership pricing, catalog access, and payment records for
//! Academia franchises.
//!
//! ## Pricing Rules
//!
//! ```text
//! disciplines:  base = price × n       discount = price × {0, .50, .75, 1.00}[n-1]
//! siblings:     base = price × s       discount = base × {.10, .15}[s-2]   (0 for s ≥ 4)
//! membership:   base = price × paid    discount = price × saved
//! mixed:        Σ per-sibling discipline prices, discount reported as 0
//!
//! final = (base - discount) × timing + enrollment      (no timing for memberships)
//! ```

pub mod config;
pub mod pricing;
pub mod provider;
pub mod records;

use academia_common::{
    PaymentResult, PaymentTiming, PricingError, PricingSnapshot, Result, ServiceSelection,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

pub use crate::config::{BasePrice, CatalogConfig};
pub use pricing::{MembershipOffer, PricingEngine};
pub use provider::{load_snapshot, InMemoryPricingProvider, PricingDataProvider};
pub use records::{InMemoryPaymentRecordStore, PaymentRecord, PaymentRecordStore};

/// Which catalog entries a billing service prices against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSettings {
    pub base_price_id: String,
    pub enrollment_fee_id: String,
}

impl BillingSettings {
    pub fn new(base_price_id: impl Into<String>, enrollment_fee_id: impl Into<String>) -> Self {
        Self {
            base_price_id: base_price_id.into(),
            enrollment_fee_id: enrollment_fee_id.into(),
        }
    }
}

impl From<&CatalogConfig> for BillingSettings {
    fn from(config: &CatalogConfig) -> Self {
        Self::new(
            config.default_base_price_id.clone(),
            config.default_enrollment_fee_id.clone(),
        )
    }
}

/// Billing service: quotes against fresh snapshots and records payments
pub struct Billing<P, S> {
    provider: P,
    store: S,
    settings: BillingSettings,
    engine: PricingEngine,
}

impl Billing<InMemoryPricingProvider, InMemoryPaymentRecordStore> {
    /// In-memory service over a loaded catalog
    pub fn in_memory(config: &CatalogConfig) -> Result<Self> {
        let provider = InMemoryPricingProvider::from_config(config)?;
        Ok(Self::new(
            provider,
            InMemoryPaymentRecordStore::new(),
            BillingSettings::from(config),
        ))
    }
}

impl<P, S> Billing<P, S>
where
    P: PricingDataProvider,
    S: PaymentRecordStore,
{
    pub fn new(provider: P, store: S, settings: BillingSettings) -> Self {
        Self {
            provider,
            store,
            settings,
            engine: PricingEngine::new(),
        }
    }

    pub fn settings(&self) -> &BillingSettings {
        &self.settings
    }

    /// Fresh snapshot of the configured base price, plans and fee
    pub async fn snapshot(&self) -> Result<PricingSnapshot> {
        load_snapshot(
            &self.provider,
            &self.settings.base_price_id,
            &self.settings.enrollment_fee_id,
        )
        .await
    }

    /// Price a selection against current catalog data
    #[instrument(skip(self))]
    pub async fn quote(
        &self,
        selection: &ServiceSelection,
        timing: PaymentTiming,
        include_enrollment: bool,
    ) -> Result<PaymentResult> {
        let snapshot = self.snapshot().await?;
        self.engine
            .calculate(selection, &snapshot, timing, include_enrollment)
    }

    /// Membership catalog priced at the current base price
    pub async fn available_memberships(&self) -> Result<Vec<MembershipOffer>> {
        let snapshot = self.snapshot().await?;
        self.engine.list_available_memberships(&snapshot)
    }

    pub async fn current_base_price(&self) -> Result<Decimal> {
        let snapshot = self.snapshot().await?;
        Ok(self.engine.current_base_price(&snapshot))
    }

    pub async fn current_enrollment_fee(&self) -> Result<Decimal> {
        let snapshot = self.snapshot().await?;
        Ok(self.engine.current_enrollment_fee(&snapshot))
    }

    /// Quote and persist a payment.
    ///
    /// The engine returns a zeroed result for selections without a rule;
    /// those are refused here rather than stored as zero-amount payments.
    #[instrument(skip(self))]
    pub async fn record_payment(
        &self,
        student_id: &str,
        selection: ServiceSelection,
        timing: PaymentTiming,
        include_enrollment: bool,
    ) -> Result<PaymentRecord> {
        let result = self.quote(&selection, timing, include_enrollment).await?;
        if let Some(reason) = &result.invalid_reason {
            warn!(student_id, %reason, "Refusing to record unpriceable selection");
            return Err(PricingError::InvalidSelection(reason.clone()).into());
        }

        let record = PaymentRecord::new(student_id, selection, result);
        self.store.save(record.clone()).await?;

        info!(
            id = %record.id,
            student_id,
            amount = %record.amount(),
            "Recorded payment"
        );
        Ok(record)
    }

    /// Payment history for a student, newest first
    pub async fn payment_history(&self, student_id: &str) -> Result<Vec<PaymentRecord>> {
        self.store.list_for_student(student_id).await
    }
}
