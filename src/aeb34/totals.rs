//! Running totals accumulated while a batch is written.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::round_to_cents;

/// Counters for one section, or for the whole file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Recipient records written.
    pub recipients: u64,
    /// Records written, headers and totals records included.
    pub records: u64,
    /// Sum of recipient amounts as written (rounded to cents).
    pub amount: Decimal,
}

impl Totals {
    /// Record count as it must appear in a totals record that is itself
    /// about to be written.
    pub fn records_including_trailer(&self) -> u64 {
        self.records + 1
    }
}

/// Accumulator threaded through the record writers of one export.
///
/// A fresh value starts every batch; nothing carries over between exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningTotals {
    section: Totals,
    global: Totals,
}

impl RunningTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals of the section currently being written.
    pub fn section(&self) -> &Totals {
        &self.section
    }

    /// Totals of the whole file so far.
    pub fn global(&self) -> &Totals {
        &self.global
    }

    /// Start counting a new section from zero.
    pub fn begin_section(&mut self) {
        self.section = Totals::default();
    }

    /// A record outside any section was written (issuer, global totals).
    pub fn file_record_written(&mut self) {
        self.global.records += 1;
    }

    /// A section header or section totals record was written.
    pub fn section_record_written(&mut self) {
        self.section.records += 1;
        self.global.records += 1;
    }

    /// A recipient record carrying `amount` was written.
    pub fn recipient_written(&mut self, amount: Decimal) {
        let amount = round_to_cents(amount);

        self.section.records += 1;
        self.section.amount += amount;
        self.section.recipients += 1;

        self.global.records += 1;
        self.global.amount += amount;
        self.global.recipients += 1;
    }
}
