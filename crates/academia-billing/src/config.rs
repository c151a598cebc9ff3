//! Catalog configuration
//!
//! The pricing catalog (base prices, membership plans, enrollment fees) is
//! loaded once at startup and handed to an [`InMemoryPricingProvider`].
//! Layering, lowest priority first:
//! 1. built-in defaults
//! 2. `academia.toml` (or the file named by `ACADEMIA_CATALOG_PATH`)
//! 3. `ACADEMIA__*` environment variables
//!
//! [`InMemoryPricingProvider`]: crate::provider::InMemoryPricingProvider

use std::collections::HashSet;

use academia_common::{AcademiaError, EnrollmentFee, MembershipPlan, Result};
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default catalog file name
pub const DEFAULT_CATALOG_FILE: &str = "academia.toml";

/// Monthly price of a single discipline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePrice {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
}

impl BasePrice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
        }
    }
}

/// Pricing catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base price used when a quote does not name one
    pub default_base_price_id: String,
    /// Enrollment fee used when a quote does not name one
    pub default_enrollment_fee_id: String,
    pub base_prices: Vec<BasePrice>,
    pub memberships: Vec<MembershipPlan>,
    pub enrollment_fees: Vec<EnrollmentFee>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_base_price_id: "monthly".to_string(),
            default_enrollment_fee_id: "enrollment".to_string(),
            base_prices: vec![BasePrice::new("monthly", "Monthly tuition", dec!(1000))],
            memberships: vec![
                MembershipPlan::new("bronce", "Bronce", 4, dec!(0.5)),
                MembershipPlan::new("plata", "Plata", 6, dec!(1)),
                MembershipPlan::new("oro", "Oro", 10, dec!(2)),
                MembershipPlan::new("platino", "Platino", 12, dec!(2)),
            ],
            enrollment_fees: vec![EnrollmentFee::new("enrollment", "Enrollment", dec!(500))],
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let path = std::env::var("ACADEMIA_CATALOG_PATH")
            .unwrap_or_else(|_| DEFAULT_CATALOG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load from a specific file, still honoring environment overrides.
    /// A missing file falls back to the built-in defaults.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("ACADEMIA").separator("__"))
            .build()?;

        let cfg: CatalogConfig = settings.try_deserialize()?;
        cfg.validate()?;

        info!(
            path,
            base_prices = cfg.base_prices.len(),
            memberships = cfg.memberships.len(),
            enrollment_fees = cfg.enrollment_fees.len(),
            "Loaded pricing catalog"
        );
        Ok(cfg)
    }

    /// Check ids are unique, defaults resolve and amounts are priceable
    pub fn validate(&self) -> Result<()> {
        ensure_unique("base price", self.base_prices.iter().map(|p| p.id.as_str()))?;
        ensure_unique("membership", self.memberships.iter().map(|p| p.id.as_str()))?;
        ensure_unique(
            "enrollment fee",
            self.enrollment_fees.iter().map(|f| f.id.as_str()),
        )?;

        for price in &self.base_prices {
            if price.amount <= Decimal::ZERO {
                return Err(AcademiaError::Config(format!(
                    "base price '{}' must be positive, got {}",
                    price.id, price.amount
                )));
            }
        }
        for fee in &self.enrollment_fees {
            if fee.amount < Decimal::ZERO {
                return Err(AcademiaError::Config(format!(
                    "enrollment fee '{}' must not be negative, got {}",
                    fee.id, fee.amount
                )));
            }
        }
        for plan in &self.memberships {
            plan.validate()
                .map_err(|e| AcademiaError::Config(e.to_string()))?;
        }

        if !self
            .base_prices
            .iter()
            .any(|p| p.id == self.default_base_price_id)
        {
            return Err(AcademiaError::Config(format!(
                "default base price '{}' is not in the catalog",
                self.default_base_price_id
            )));
        }
        if !self
            .enrollment_fees
            .iter()
            .any(|f| f.id == self.default_enrollment_fee_id)
        {
            return Err(AcademiaError::Config(format!(
                "default enrollment fee '{}' is not in the catalog",
                self.default_enrollment_fee_id
            )));
        }

        debug!("Catalog configuration validated");
        Ok(())
    }
}

fn ensure_unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AcademiaError::Config(format!("duplicate {} id '{}'", what, id)));
        }
    }
    Ok(())
}
