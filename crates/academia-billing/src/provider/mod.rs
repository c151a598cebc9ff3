//! Pricing data provider
//!
//! The engine never reads storage itself. Callers fetch a fresh
//! [`PricingSnapshot`] from a [`PricingDataProvider`] before each calculation.

pub mod memory;

pub use memory::InMemoryPricingProvider;

use academia_common::{EnrollmentFee, MembershipPlan, PricingSnapshot, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::instrument;

/// Source of base prices, membership plans and enrollment fees
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricingDataProvider: Send + Sync {
    /// Monthly price of one discipline
    async fn base_price(&self, id: &str) -> Result<Decimal>;

    /// Membership plan by id
    async fn membership_plan(&self, id: &str) -> Result<MembershipPlan>;

    /// Every membership plan, in catalog order
    async fn membership_plans(&self) -> Result<Vec<MembershipPlan>>;

    /// Enrollment fee by id
    async fn enrollment_fee(&self, id: &str) -> Result<EnrollmentFee>;

    /// Every enrollment fee, in catalog order
    async fn enrollment_fees(&self) -> Result<Vec<EnrollmentFee>>;
}

/// Assemble a snapshot from the provider's current data
#[instrument(skip(provider))]
pub async fn load_snapshot<P>(
    provider: &P,
    base_price_id: &str,
    enrollment_fee_id: &str,
) -> Result<PricingSnapshot>
where
    P: PricingDataProvider + ?Sized,
{
    let base_price = provider.base_price(base_price_id).await?;
    let plans = provider.membership_plans().await?;
    let fee = provider.enrollment_fee(enrollment_fee_id).await?;

    Ok(PricingSnapshot::new(base_price, plans, fee.amount)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use academia_common::{AcademiaError, NotFoundError, NotFoundKind, PricingError};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_load_snapshot_from_mock() {
        let mut provider = MockPricingDataProvider::new();
        provider
            .expect_base_price()
            .withf(|id| id == "monthly")
            .returning(|_| Ok(dec!(1000)));
        provider
            .expect_membership_plans()
            .returning(|| Ok(vec![MembershipPlan::new("year", "Yearly", 12, dec!(2))]));
        provider
            .expect_enrollment_fee()
            .withf(|id| id == "fee")
            .returning(|id| Ok(EnrollmentFee::new(id, "Fee", dec!(300))));

        let snapshot = load_snapshot(&provider, "monthly", "fee").await.unwrap();
        assert_eq!(snapshot.base_price, dec!(1000));
        assert_eq!(snapshot.enrollment_fee, dec!(300));
        assert_eq!(snapshot.membership_catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_base_price_propagates() {
        let mut provider = MockPricingDataProvider::new();
        provider
            .expect_base_price()
            .returning(|id| Err(NotFoundError::base_price(id).into()));

        let err = load_snapshot(&provider, "ghost", "fee").await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(NotFoundKind::UnknownBasePrice));
    }

    #[tokio::test]
    async fn test_zero_base_price_is_rejected() {
        let mut provider = MockPricingDataProvider::new();
        provider.expect_base_price().returning(|_| Ok(dec!(0)));
        provider.expect_membership_plans().returning(|| Ok(Vec::new()));
        provider
            .expect_enrollment_fee()
            .returning(|id| Ok(EnrollmentFee::new(id, "Fee", dec!(0))));

        let err = load_snapshot(&provider, "monthly", "fee").await.unwrap_err();
        assert!(matches!(
            err,
            AcademiaError::Pricing(PricingError::InvalidBasePrice(_))
        ));
    }
}
