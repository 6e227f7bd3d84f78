//! AEB34 payment-order file export (SEPA credit transfers).
//!
//! Generates the fixed-width file Spanish banks accept for bulk transfer
//! orders, layout version `34145`. A file is:
//!
//! ```text
//! 01 ORD  issuer record
//! 02 SCT    SEPA header
//! 03 SCT    one record per recipient, in batch order
//! 04 SCT    SEPA totals
//! 99 ORD  global totals
//! ```
//!
//! Records follow each other with no separator. Issuer, header and totals
//! records are 600 bytes; a recipient record is 458 bytes plus its country
//! code and the batch concept, which are written unpadded.
//!
//! # Example
//!
//! ```ignore
//! use remesa::aeb34::*;
//!
//! let config = Aeb34ConfigBuilder::new()
//!     .overflow(OverflowPolicy::Reject)
//!     .build();
//!
//! let mut file = std::fs::File::create("orders.aeb34")?;
//! let summary = export_with_config(&settings, &config, &mut file)?;
//! println!("{} transfers, {} EUR", summary.totals.recipients, summary.totals.amount);
//! ```

mod config;
mod export;
mod field;
mod records;
mod section;
mod totals;

pub use config::{Aeb34Config, Aeb34ConfigBuilder, OverflowPolicy};
pub use export::{Aeb34Summary, Exporter, export, export_with_config, to_aeb34};
pub use field::FieldWriter;
pub use records::{
    ISSUER_RECORD_LEN, ORDER_OPERATION, RECIPIENT_FIXED_LEN, SECTION_HEADER_LEN, TOTALS_RECORD_LEN,
    VERSION, code,
};
pub use section::{Section, SepaTransfers};
pub use totals::{RunningTotals, Totals};
