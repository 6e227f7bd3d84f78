//! # remesa
//!
//! Payment-order files for Spanish banks. The crate encodes a batch of SEPA
//! credit transfers into the fixed-width AEB34 layout (version `34145`) that
//! banks accept for bulk transfer instructions.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every record is written with exact field widths; there are no line breaks
//! or other framing between records.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use remesa::aeb34::{Aeb34Config, to_aeb34};
//! use remesa::core::*;
//! use rust_decimal_macros::dec;
//!
//! let issuer = IssuerBuilder::new("A12345678", "ACME SL", "ES9121000418450200051332")
//!     .address1("Calle Mayor 1")
//!     .country("ES")
//!     .build();
//!
//! let settings = ExportSettingsBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(), issuer)
//!     .reference("NOMINA-2024-06")
//!     .concept("Nomina junio")
//!     .add_recipient(
//!         RecipientBuilder::new(
//!             "Lucia Perez",
//!             dec!(1250.00),
//!             "CAIXESBBXXX",
//!             "ES7921000813610123456789",
//!         )
//!         .country("ES")
//!         .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let file = to_aeb34(&settings, &Aeb34Config::default()).unwrap();
//! assert_eq!(&file[..2], b"01");
//! assert_eq!(&file[file.len() - 600..][..2], b"99");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Settings model, builders, validation |
//! | `aeb34` (default) | AEB34 record encoder and batch export |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "aeb34")]
pub mod aeb34;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
