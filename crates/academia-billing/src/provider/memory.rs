//! In-memory pricing provider
//!
//! Serves an immutable catalog loaded from [`CatalogConfig`]. Nothing is
//! mutated after construction, so concurrent reads need no locking.

use std::collections::HashMap;

use academia_common::{EnrollmentFee, MembershipPlan, NotFoundError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;

use super::PricingDataProvider;
use crate::config::CatalogConfig;

/// Catalog-backed provider
#[derive(Debug, Clone)]
pub struct InMemoryPricingProvider {
    base_prices: HashMap<String, Decimal>,
    /// Plans in catalog order
    memberships: Vec<MembershipPlan>,
    /// Fees in catalog order
    enrollment_fees: Vec<EnrollmentFee>,
}

impl InMemoryPricingProvider {
    /// Build from a catalog; the catalog is validated first
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            base_prices: config
                .base_prices
                .iter()
                .map(|price| (price.id.clone(), price.amount))
                .collect(),
            memberships: config.memberships.clone(),
            enrollment_fees: config.enrollment_fees.clone(),
        })
    }
}

#[async_trait]
impl PricingDataProvider for InMemoryPricingProvider {
    async fn base_price(&self, id: &str) -> Result<Decimal> {
        self.base_prices
            .get(id)
            .copied()
            .ok_or_else(|| NotFoundError::base_price(id).into())
    }

    async fn membership_plan(&self, id: &str) -> Result<MembershipPlan> {
        self.memberships
            .iter()
            .find(|plan| plan.id == id)
            .cloned()
            .ok_or_else(|| NotFoundError::membership(id).into())
    }

    async fn membership_plans(&self) -> Result<Vec<MembershipPlan>> {
        Ok(self.memberships.clone())
    }

    async fn enrollment_fee(&self, id: &str) -> Result<EnrollmentFee> {
        self.enrollment_fees
            .iter()
            .find(|fee| fee.id == id)
            .cloned()
            .ok_or_else(|| NotFoundError::enrollment_fee(id).into())
    }

    async fn enrollment_fees(&self) -> Result<Vec<EnrollmentFee>> {
        Ok(self.enrollment_fees.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academia_common::NotFoundKind;
    use rust_decimal_macros::dec;

    fn provider() -> InMemoryPricingProvider {
        InMemoryPricingProvider::from_config(&CatalogConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_lookups() {
        let provider = provider();
        assert_eq!(provider.base_price("monthly").await.unwrap(), dec!(1000));
        assert_eq!(provider.membership_plan("platino").await.unwrap().months_paid, 12);
        assert_eq!(provider.enrollment_fee("enrollment").await.unwrap().amount, dec!(500));
    }

    #[tokio::test]
    async fn test_listings_keep_catalog_order() {
        let provider = provider();
        let ids: Vec<String> = provider
            .membership_plans()
            .await
            .unwrap()
            .into_iter()
            .map(|plan| plan.id)
            .collect();
        assert_eq!(ids, vec!["bronce", "plata", "oro", "platino"]);
        assert_eq!(provider.enrollment_fees().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let provider = provider();
        let err = provider.base_price("nope").await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(NotFoundKind::UnknownBasePrice));

        let err = provider.membership_plan("nope").await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(NotFoundKind::UnknownMembership));

        let err = provider.enrollment_fee("nope").await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(NotFoundKind::UnknownEnrollmentFee));
    }

    #[test]
    fn test_invalid_catalog_is_rejected() {
        let config = CatalogConfig {
            base_prices: Vec::new(),
            ..CatalogConfig::default()
        };
        assert!(InMemoryPricingProvider::from_config(&config).is_err());
    }
}
