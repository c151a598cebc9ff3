//! Pricing catalog types
//!
//! A [`PricingSnapshot`] is the read-only data one calculation works from:
//! - the monthly price of a single discipline
//! - the membership catalog
//! - the one-time enrollment fee
//!
//! Snapshots are built fresh per calculation and never mutated afterwards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{NotFoundError, PricingError};

/// Membership tier, derived from the number of months paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipTier {
    /// 4 months
    Bronce,
    /// 6 months
    Plata,
    /// 10 months
    Oro,
    /// 12 months
    Platino,
    /// Any other duration
    Personalizada,
}

impl MembershipTier {
    pub fn from_months_paid(months_paid: u32) -> Self {
        match months_paid {
            4 => MembershipTier::Bronce,
            6 => MembershipTier::Plata,
            10 => MembershipTier::Oro,
            12 => MembershipTier::Platino,
            _ => MembershipTier::Personalizada,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Bronce => "BRONCE",
            MembershipTier::Plata => "PLATA",
            MembershipTier::Oro => "ORO",
            MembershipTier::Platino => "PLATINO",
            MembershipTier::Personalizada => "PERSONALIZADA",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prepaid multi-month plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: String,
    pub name: String,
    /// Months charged up front
    pub months_paid: u32,
    /// Months of tuition given away (may be fractional)
    pub months_saved: Decimal,
}

impl MembershipPlan {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        months_paid: u32,
        months_saved: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            months_paid,
            months_saved,
        }
    }

    /// Tier label; not stored, always derived from `months_paid`
    pub fn tier(&self) -> MembershipTier {
        MembershipTier::from_months_paid(self.months_paid)
    }

    /// Check the plan can be priced without producing a negative amount
    pub fn validate(&self) -> Result<(), PricingError> {
        let reason = if self.months_paid == 0 {
            Some("months paid must be greater than zero".to_string())
        } else if self.months_saved < Decimal::ZERO {
            Some(format!("months saved {} is negative", self.months_saved))
        } else if self.months_saved > Decimal::from(self.months_paid) {
            Some(format!(
                "months saved {} exceeds months paid {}",
                self.months_saved, self.months_paid
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(PricingError::InvalidMembershipPlan {
                id: self.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// One-time registration charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentFee {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
}

impl EnrollmentFee {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
        }
    }
}

/// Read-only pricing data for a single calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    /// Monthly price of one discipline
    pub base_price: Decimal,
    pub membership_catalog: Vec<MembershipPlan>,
    pub enrollment_fee: Decimal,
}

impl PricingSnapshot {
    /// Create a snapshot, rejecting a non-positive base price or negative fee
    pub fn new(
        base_price: Decimal,
        membership_catalog: Vec<MembershipPlan>,
        enrollment_fee: Decimal,
    ) -> Result<Self, PricingError> {
        let snapshot = Self {
            base_price,
            membership_catalog,
            enrollment_fee,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.base_price <= Decimal::ZERO {
            return Err(PricingError::InvalidBasePrice(self.base_price.to_string()));
        }
        if self.enrollment_fee < Decimal::ZERO {
            return Err(PricingError::NegativeEnrollmentFee(
                self.enrollment_fee.to_string(),
            ));
        }
        Ok(())
    }

    /// Look up a membership plan by id
    pub fn membership(&self, id: &str) -> Result<&MembershipPlan, NotFoundError> {
        self.membership_catalog
            .iter()
            .find(|plan| plan.id == id)
            .ok_or_else(|| NotFoundError::membership(id))
    }
}
