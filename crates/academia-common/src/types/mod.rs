//! Core data types for Academia billing

pub mod catalog;
pub mod payment;
pub mod selection;
