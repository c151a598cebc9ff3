//! Pricing module
//!
//! Provides the tuition and membership calculator with:
//! - Multi-discipline and sibling discount schedules
//! - Prepaid membership plans
//! - Late-payment timing surcharge
//! - VAT extraction from gross totals

pub mod discounts;
pub mod engine;

pub use engine::{extract_tax, MembershipOffer, PricingEngine};
