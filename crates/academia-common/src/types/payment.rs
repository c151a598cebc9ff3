//! Payment timing and the priced breakdown returned by the engine

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::catalog::MembershipTier;
use crate::LATE_PAYMENT_MULTIPLIER;

/// When in the billing cycle a payment is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTiming {
    /// Paid on time (×1.00)
    #[default]
    Normal,
    /// Active student paying after the due date (×1.10)
    LateActive,
    /// New student joining mid-month (label only, ×1.00)
    ProportionalNew,
    /// Paid at month end (label only, ×1.00)
    MonthEnd,
}

impl PaymentTiming {
    /// Multiplier applied to discipline tuition.
    ///
    /// Only `LateActive` changes the amount. `ProportionalNew` and `MonthEnd`
    /// are recorded for reporting but carry no proration.
    pub fn multiplier(&self) -> Decimal {
        match self {
            PaymentTiming::Normal => dec!(1.0),
            PaymentTiming::LateActive => LATE_PAYMENT_MULTIPLIER,
            PaymentTiming::ProportionalNew => dec!(1.0),
            PaymentTiming::MonthEnd => dec!(1.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentTiming::Normal => "NORMAL",
            PaymentTiming::LateActive => "LATE_ACTIVE",
            PaymentTiming::ProportionalNew => "PROPORTIONAL_NEW",
            PaymentTiming::MonthEnd => "MONTH_END",
        }
    }
}

/// Which discount rule produced `discount`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// 2nd discipline 50%, 3rd and 4th 25% each
    MultiDiscipline,
    /// 10% for two siblings, 15% for three
    Siblings,
    /// Months saved on a prepaid plan
    Membership,
}

/// Priced breakdown of a service selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Undiscounted amount
    pub base_amount: Decimal,
    pub discount: Decimal,
    /// Tuition after discount and timing, before the enrollment fee
    pub subtotal_before_tax: Decimal,
    /// Amount added (or zero) by the timing multiplier
    pub timing_adjustment: Decimal,
    pub enrollment_fee: Decimal,
    pub includes_enrollment: bool,
    /// Gross total charged, VAT included
    pub final_amount: Decimal,
    /// `final_amount / 1.16`, rounded to cents
    pub tax_base: Decimal,
    /// `final_amount - tax_base`
    pub tax_amount: Decimal,
    pub timing: PaymentTiming,
    pub discount_type: Option<DiscountType>,
    pub membership_type: Option<MembershipTier>,
    pub disciplines_count: u32,
    pub siblings_count: u32,
    pub frequency: String,
    pub is_membership: bool,
    pub months_paid: u32,
    pub months_saved: Decimal,
    pub description: String,
    pub breakdown: String,
    /// Set when the selection had no pricing rule; all amounts are zero
    pub invalid_reason: Option<String>,
}

impl PaymentResult {
    /// Zero-amount result for a discipline/sibling combination without a rule
    pub fn invalid(reason: impl Into<String>, timing: PaymentTiming) -> Self {
        let reason = reason.into();
        Self {
            base_amount: Decimal::ZERO,
            discount: Decimal::ZERO,
            subtotal_before_tax: Decimal::ZERO,
            timing_adjustment: Decimal::ZERO,
            enrollment_fee: Decimal::ZERO,
            includes_enrollment: false,
            final_amount: Decimal::ZERO,
            tax_base: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            timing,
            discount_type: None,
            membership_type: None,
            disciplines_count: 0,
            siblings_count: 0,
            frequency: String::new(),
            is_membership: false,
            months_paid: 0,
            months_saved: Decimal::ZERO,
            description: "Invalid configuration".to_string(),
            breakdown: reason.clone(),
            invalid_reason: Some(reason),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid_reason.is_some()
    }

    /// Discount as a percentage of the base amount
    pub fn savings_percentage(&self) -> Decimal {
        if self.base_amount > Decimal::ZERO {
            (self.discount / self.base_amount * dec!(100)).round_dp(2)
        } else {
            Decimal::ZERO
        }
    }
}
