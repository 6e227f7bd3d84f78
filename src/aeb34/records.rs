//! File-level records: the issuer record that opens the file and the
//! global totals record that closes it, plus helpers shared with sections.

use chrono::NaiveDate;

use super::field::FieldWriter;
use super::totals::Totals;
use crate::core::{Aeb34Error, ExportSettings, Issuer, LEGAL_ID_LEN, check_issuer};

/// Layout version written in issuer, header and recipient records.
pub const VERSION: &str = "34145";

/// Length of the issuer record.
pub const ISSUER_RECORD_LEN: usize = 600;
/// Length of a section header record.
pub const SECTION_HEADER_LEN: usize = 600;
/// Length of a section totals record and of the global totals record.
pub const TOTALS_RECORD_LEN: usize = 600;
/// Length of a SEPA recipient record without its two unpadded fields
/// (country and concept).
pub const RECIPIENT_FIXED_LEN: usize = 458;

/// Record codes (first two bytes of every record).
pub mod code {
    pub const ISSUER: &str = "01";
    pub const SEPA_HEADER: &str = "02";
    pub const SEPA_RECIPIENT: &str = "03";
    pub const SEPA_TOTALS: &str = "04";
    // 05-07: other transfers header/recipient/totals, 08-10: cheques.
    pub const GLOBAL_TOTALS: &str = "99";
}

/// Operation type of file-level records.
pub const ORDER_OPERATION: &str = "ORD";

/// Issuer record (`01`): who orders the transfers and when.
pub(crate) fn write_issuer(
    w: &mut FieldWriter<'_>,
    settings: &ExportSettings,
    creation_date: NaiveDate,
) -> Result<(), Aeb34Error> {
    let issuer = &settings.issuer;
    check_issuer(issuer)?;

    w.constant(code::ISSUER);
    w.constant(ORDER_OPERATION);
    w.constant(VERSION);
    // record number within the issuer block
    w.constant("001");

    write_legal_id(w, issuer)?;

    w.date("creation_date", creation_date)?;
    w.date("execution_date", settings.execution_date)?;

    // A = IBAN
    w.constant("A");
    w.text("issuer.bank_account", Some(&issuer.bank_account), 34)?;

    // 0 = one charge for the whole batch, 1 = one charge per transfer
    w.constant("0");

    w.text("issuer.name", Some(&issuer.name), 70)?;
    w.text("issuer.address1", issuer.address1.as_deref(), 50)?;
    w.text("issuer.address2", issuer.address2.as_deref(), 50)?;
    w.text("issuer.address3", issuer.address3.as_deref(), 40)?;
    w.text("issuer.country", issuer.country.as_deref(), 2)?;

    w.blanks(311)
}

/// Global totals record (`99`). `totals` are the file totals before this
/// record is counted.
pub(crate) fn write_global_totals(
    w: &mut FieldWriter<'_>,
    totals: &Totals,
) -> Result<(), Aeb34Error> {
    w.constant(code::GLOBAL_TOTALS);
    w.constant(ORDER_OPERATION);
    write_totals_fields(w, totals)
}

/// Legal ID followed by its 3-character suffix (left blank).
pub(crate) fn write_legal_id(w: &mut FieldWriter<'_>, issuer: &Issuer) -> Result<(), Aeb34Error> {
    let len = issuer.legal_id.chars().count();
    if len != LEGAL_ID_LEN {
        return Err(Aeb34Error::Format(format!(
            "issuer.legal_id: legal ID must be {LEGAL_ID_LEN} characters, got {len}"
        )));
    }
    w.text("issuer.legal_id", Some(&issuer.legal_id), LEGAL_ID_LEN)?;
    w.blanks(3)
}

/// Amount, recipient count and record count shared by every totals record.
/// The record count includes the totals record being written.
pub(crate) fn write_totals_fields(
    w: &mut FieldWriter<'_>,
    totals: &Totals,
) -> Result<(), Aeb34Error> {
    w.currency("total_amount", totals.amount, 17)?;
    w.count("total_recipients", totals.recipients, 8)?;
    w.count("total_records", totals.records_including_trailer(), 10)?;
    w.blanks(560)
}
