//! Error types for Academia billing
//!
//! Provides a unified error type and domain-specific error variants

use std::fmt;
use thiserror::Error;

/// Result type alias using AcademiaError
pub type Result<T> = std::result::Result<T, AcademiaError>;

/// Unified error type for Academia operations
#[derive(Debug, Error)]
pub enum AcademiaError {
    // Lookup errors
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    // Pricing errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AcademiaError {
    /// Kind of the missing entity, if this is a lookup failure
    pub fn not_found_kind(&self) -> Option<NotFoundKind> {
        match self {
            AcademiaError::NotFound(err) => Some(err.kind),
            _ => None,
        }
    }
}

/// What kind of entity a lookup failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    UnknownMembership,
    UnknownBasePrice,
    UnknownEnrollmentFee,
    UnknownPaymentRecord,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotFoundKind::UnknownMembership => "membership plan",
            NotFoundKind::UnknownBasePrice => "base price",
            NotFoundKind::UnknownEnrollmentFee => "enrollment fee",
            NotFoundKind::UnknownPaymentRecord => "payment record",
        };
        f.write_str(label)
    }
}

/// A referenced id did not resolve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} '{id}' does not exist")]
pub struct NotFoundError {
    pub kind: NotFoundKind,
    pub id: String,
}

impl NotFoundError {
    pub fn new(kind: NotFoundKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn membership(id: impl Into<String>) -> Self {
        Self::new(NotFoundKind::UnknownMembership, id)
    }

    pub fn base_price(id: impl Into<String>) -> Self {
        Self::new(NotFoundKind::UnknownBasePrice, id)
    }

    pub fn enrollment_fee(id: impl Into<String>) -> Self {
        Self::new(NotFoundKind::UnknownEnrollmentFee, id)
    }

    pub fn payment_record(id: impl Into<String>) -> Self {
        Self::new(NotFoundKind::UnknownPaymentRecord, id)
    }
}

/// Pricing data and calculation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid base price {0}: must be positive")]
    InvalidBasePrice(String),

    #[error("Invalid enrollment fee {0}: must not be negative")]
    NegativeEnrollmentFee(String),

    #[error("Invalid membership plan '{id}': {reason}")]
    InvalidMembershipPlan { id: String, reason: String },

    #[error("Selection cannot be billed: {0}")]
    InvalidSelection(String),

    #[error("Amount overflow computing {0}")]
    AmountOverflow(String),
}

// Implement From for common external error types
impl From<serde_json::Error> for AcademiaError {
    fn from(err: serde_json::Error) -> Self {
        AcademiaError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AcademiaError {
    fn from(err: std::io::Error) -> Self {
        AcademiaError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for AcademiaError {
    fn from(err: config::ConfigError) -> Self {
        AcademiaError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AcademiaError {
    fn from(err: anyhow::Error) -> Self {
        AcademiaError::Internal(err.to_string())
    }
}
