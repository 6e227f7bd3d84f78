//! Core payment-batch types, builders, and validation.
//!
//! This module holds the settings a caller hands to the encoder: the
//! ordering party (issuer), the beneficiaries (recipients), and the
//! batch-wide execution date, reference and concept.

mod builder;
mod error;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use types::*;
pub use validation::*;
