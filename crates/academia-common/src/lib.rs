//! # Academia Common
//!
//! Shared types and errors for the Academia franchise billing core.
//!
//! ## Core Types
//!
//! - [`ServiceSelection`]: what is being priced (disciplines, siblings, memberships)
//! - [`PricingSnapshot`]: base price, membership catalog and enrollment fee for one calculation
//! - [`MembershipPlan`]/[`MembershipTier`]: prepaid multi-month plans
//! - [`PaymentTiming`]: when in the billing cycle a payment happens
//! - [`PaymentResult`]: the priced breakdown handed back to callers
//!
//! ## Pricing Pipeline
//!
//! ```text
//! final = ((base - discount) × timing) + enrollment
//! tax_base = final / 1.16
//! ```
//!
//! The timing multiplier never applies to memberships.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{AcademiaError, NotFoundError, NotFoundKind, PricingError, Result};
pub use types::{
    catalog::{EnrollmentFee, MembershipPlan, MembershipTier, PricingSnapshot},
    payment::{DiscountType, PaymentResult, PaymentTiming},
    selection::ServiceSelection,
};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Academia version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VAT rate included in every gross amount (16%)
pub const VAT_RATE: Decimal = dec!(0.16);

/// Divisor used to extract the tax base from a gross amount (`1 + VAT_RATE`)
pub const VAT_DIVISOR: Decimal = dec!(1.16);

/// Decimal places kept for currency amounts
pub const CURRENCY_DP: u32 = 2;

/// Maximum disciplines a single student can be priced for
pub const MAX_DISCIPLINES: u32 = 4;

/// Surcharge multiplier for active students paying late (+10%)
pub const LATE_PAYMENT_MULTIPLIER: Decimal = dec!(1.10);
