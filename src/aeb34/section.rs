//! Transfer sections: a header record, one record per transfer and a
//! totals record, all tagged with the section's operation type.

use super::field::FieldWriter;
use super::records::{VERSION, code, write_legal_id, write_totals_fields};
use super::totals::Totals;
use crate::core::{Aeb34Error, ExportSettings, Recipient, check_recipient};

/// One kind of transfer block in the file.
///
/// The exporter drives every section the same way: header, then
/// [`Section::write_recipient`] for each recipient, then totals.
pub trait Section {
    /// Operation type written in each record of the section (e.g. `SCT`).
    fn operation(&self) -> &'static str;

    /// Section header record.
    fn write_header(
        &self,
        w: &mut FieldWriter<'_>,
        settings: &ExportSettings,
    ) -> Result<(), Aeb34Error>;

    /// Record for the recipient at zero-based `index` of the batch.
    fn write_recipient(
        &self,
        w: &mut FieldWriter<'_>,
        settings: &ExportSettings,
        index: usize,
        recipient: &Recipient,
    ) -> Result<(), Aeb34Error>;

    /// Section totals record. `totals` are the section totals before this
    /// record is counted.
    fn write_totals(&self, w: &mut FieldWriter<'_>, totals: &Totals) -> Result<(), Aeb34Error>;
}

/// SEPA credit transfers (`SCT`), record codes 02-04.
#[derive(Debug, Clone, Copy, Default)]
pub struct SepaTransfers;

impl Section for SepaTransfers {
    fn operation(&self) -> &'static str {
        "SCT"
    }

    fn write_header(
        &self,
        w: &mut FieldWriter<'_>,
        settings: &ExportSettings,
    ) -> Result<(), Aeb34Error> {
        w.constant(code::SEPA_HEADER);
        w.constant(self.operation());
        w.constant(VERSION);
        write_legal_id(w, &settings.issuer)?;
        w.blanks(578)
    }

    fn write_recipient(
        &self,
        w: &mut FieldWriter<'_>,
        settings: &ExportSettings,
        index: usize,
        recipient: &Recipient,
    ) -> Result<(), Aeb34Error> {
        check_recipient(index, recipient)?;

        w.constant(code::SEPA_RECIPIENT);
        w.constant(self.operation());
        w.constant(VERSION);
        w.constant("002");

        w.text("reference", settings.reference.as_deref(), 35)?;

        // A = IBAN
        w.constant("A");
        w.text(
            &format!("recipients[{index}].bank_account"),
            Some(&recipient.bank_account),
            34,
        )?;
        w.currency(&format!("recipients[{index}].amount"), recipient.amount, 11)?;

        // 3 = shared expenses (SHA)
        w.constant("3");
        w.text(&format!("recipients[{index}].bic"), Some(&recipient.bic), 11)?;

        w.text(&format!("recipients[{index}].name"), Some(&recipient.name), 70)?;
        w.text(&format!("recipients[{index}].address1"), recipient.address1.as_deref(), 50)?;
        w.text(&format!("recipients[{index}].address2"), recipient.address2.as_deref(), 50)?;
        w.text(&format!("recipients[{index}].address3"), recipient.address3.as_deref(), 40)?;
        w.text(&format!("recipients[{index}].country"), recipient.country.as_deref(), 0)?;

        w.text("concept", settings.concept.as_deref(), 0)?;

        // reserved
        w.blanks(35)?;
        // transfer type, AT-45 of the SEPA rulebook
        w.blanks(4)?;
        // transfer purpose, AT-44 of the SEPA rulebook
        w.blanks(4)?;
        w.blanks(99)
    }

    fn write_totals(&self, w: &mut FieldWriter<'_>, totals: &Totals) -> Result<(), Aeb34Error> {
        w.constant(code::SEPA_TOTALS);
        w.constant(self.operation());
        write_totals_fields(w, totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aeb34::{Aeb34Config, RECIPIENT_FIXED_LEN, SECTION_HEADER_LEN, TOTALS_RECORD_LEN};
    use crate::core::{IssuerBuilder, RecipientBuilder};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn settings() -> ExportSettings {
        ExportSettings {
            execution_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            issuer: IssuerBuilder::new("A12345678", "ACME SL", "ES9121000418450200051332").build(),
            reference: Some("REF-1".into()),
            concept: Some("Pago".into()),
            recipients: vec![
                RecipientBuilder::new(
                    "BOB",
                    dec!(100.00),
                    "CAIXESBBXXX",
                    "ES7921000813610123456789",
                )
                .country("ES")
                .build(),
            ],
        }
    }

    #[test]
    fn header_layout() {
        let config = Aeb34Config::default();
        let mut w = FieldWriter::new(&config);
        SepaTransfers.write_header(&mut w, &settings()).unwrap();
        let rec = w.into_bytes();
        assert_eq!(rec.len(), SECTION_HEADER_LEN);
        assert_eq!(&rec[..22], b"02SCT34145A12345678   ");
        assert!(rec[22..].iter().all(|&b| b == b' '));
    }

    #[test]
    fn recipient_layout() {
        let config = Aeb34Config::default();
        let s = settings();
        let mut w = FieldWriter::new(&config);
        SepaTransfers.write_recipient(&mut w, &s, 0, &s.recipients[0]).unwrap();
        let rec = w.into_bytes();

        assert_eq!(rec.len(), RECIPIENT_FIXED_LEN + "ES".len() + "Pago".len());
        assert_eq!(&rec[..13], b"03SCT34145002");
        assert!(rec[13..48].starts_with(b"REF-1 "));
        assert_eq!(rec[48], b'A');
        assert!(rec[49..83].starts_with(b"ES7921000813610123456789 "));
        assert_eq!(&rec[83..94], b"00000010000");
        assert_eq!(rec[94], b'3');
        assert_eq!(&rec[95..106], b"CAIXESBBXXX");
        assert!(rec[106..176].starts_with(b"BOB "));
        assert_eq!(&rec[316..322], b"ESPago");
        assert!(rec[322..].iter().all(|&b| b == b' '));
    }

    #[test]
    fn recipient_without_bic_is_rejected() {
        let config = Aeb34Config::default();
        let mut s = settings();
        s.recipients[0].bic.clear();
        let mut w = FieldWriter::new(&config);
        let err = SepaTransfers
            .write_recipient(&mut w, &s, 0, &s.recipients[0])
            .unwrap_err();
        assert!(matches!(err, Aeb34Error::Validation(m) if m.contains("'BOB'")));
        assert!(w.is_empty());
    }

    #[test]
    fn totals_layout() {
        let config = Aeb34Config::default();
        let mut w = FieldWriter::new(&config);
        let totals = Totals {
            recipients: 1,
            records: 2,
            amount: dec!(100.00),
        };
        SepaTransfers.write_totals(&mut w, &totals).unwrap();
        let rec = w.into_bytes();
        assert_eq!(rec.len(), TOTALS_RECORD_LEN);
        assert_eq!(&rec[..5], b"04SCT");
        assert_eq!(&rec[5..22], b"00000000000010000");
        assert_eq!(&rec[22..30], b"1       ");
        assert_eq!(&rec[30..40], b"3         ");
    }
}
