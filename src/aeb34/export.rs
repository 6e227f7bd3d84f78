//! Batch export: sequences the records of a whole file.

use std::io::Write;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::config::Aeb34Config;
use super::field::FieldWriter;
use super::records;
use super::section::{Section, SepaTransfers};
use super::totals::{RunningTotals, Totals};
use crate::core::{
    Aeb34Error, ExportSettings, check_issuer, check_recipient, check_recipient_count,
};

/// Sections in file order.
const SECTIONS: &[&dyn Section] = &[&SepaTransfers];

/// Outcome of a successful export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aeb34Summary {
    /// File totals, as written in the global totals record.
    pub totals: Totals,
    /// Bytes written to the output.
    pub bytes_written: u64,
}

/// Writes AEB34 files.
///
/// An exporter only holds its configuration. Running totals live inside
/// each [`Exporter::export`] call, so one exporter can serve any number of
/// batches, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: Aeb34Config,
}

impl Exporter {
    pub fn new(config: Aeb34Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Aeb34Config {
        &self.config
    }

    /// Write the complete file for `settings` to `out`.
    ///
    /// Settings are validated before the first byte is written. A failure
    /// after that (I/O, a field that does not fit) leaves `out` holding a
    /// partial file that must be discarded. `out` is neither flushed nor
    /// closed.
    pub fn export<W: Write + ?Sized>(
        &self,
        settings: &ExportSettings,
        out: &mut W,
    ) -> Result<Aeb34Summary, Aeb34Error> {
        check_recipient_count(settings.recipients.len())?;
        check_issuer(&settings.issuer)?;
        for (index, recipient) in settings.recipients.iter().enumerate() {
            check_recipient(index, recipient)?;
        }

        let creation_date = self.config.creation_date();
        debug!(
            "exporting AEB34 batch for {}: {} recipients, execution date {}",
            settings.issuer.legal_id,
            settings.recipients.len(),
            settings.execution_date
        );

        let mut totals = RunningTotals::new();
        let mut bytes_written = 0u64;

        let mut w = FieldWriter::new(&self.config);
        records::write_issuer(&mut w, settings, creation_date)?;
        bytes_written += emit(out, w, "issuer")?;
        totals.file_record_written();

        for section in SECTIONS {
            bytes_written += self.write_section(*section, settings, &mut totals, out)?;
        }

        let mut w = FieldWriter::new(&self.config);
        records::write_global_totals(&mut w, totals.global())?;
        bytes_written += emit(out, w, "global totals")?;
        totals.file_record_written();

        let summary = Aeb34Summary {
            totals: *totals.global(),
            bytes_written,
        };
        debug!(
            "AEB34 batch written: {} records, {} recipients, amount {}, {} bytes",
            summary.totals.records, summary.totals.recipients, summary.totals.amount, bytes_written
        );
        Ok(summary)
    }

    fn write_section<W: Write + ?Sized>(
        &self,
        section: &dyn Section,
        settings: &ExportSettings,
        totals: &mut RunningTotals,
        out: &mut W,
    ) -> Result<u64, Aeb34Error> {
        let mut bytes_written = 0u64;
        totals.begin_section();

        let mut w = FieldWriter::new(&self.config);
        section.write_header(&mut w, settings)?;
        bytes_written += emit(out, w, section.operation())?;
        totals.section_record_written();

        for (index, recipient) in settings.recipients.iter().enumerate() {
            let mut w = FieldWriter::new(&self.config);
            section.write_recipient(&mut w, settings, index, recipient)?;
            bytes_written += emit(out, w, section.operation())?;
            totals.recipient_written(recipient.amount);
        }

        let mut w = FieldWriter::new(&self.config);
        section.write_totals(&mut w, totals.section())?;
        bytes_written += emit(out, w, section.operation())?;
        totals.section_record_written();

        debug!(
            "{} section: {} recipients, {} records, amount {}",
            section.operation(),
            totals.section().recipients,
            totals.section().records,
            totals.section().amount
        );
        Ok(bytes_written)
    }
}

/// Export `settings` to `out` with the default configuration.
pub fn export<W: Write + ?Sized>(
    settings: &ExportSettings,
    out: &mut W,
) -> Result<Aeb34Summary, Aeb34Error> {
    Exporter::default().export(settings, out)
}

/// Export `settings` to `out` with an explicit configuration.
pub fn export_with_config<W: Write + ?Sized>(
    settings: &ExportSettings,
    config: &Aeb34Config,
    out: &mut W,
) -> Result<Aeb34Summary, Aeb34Error> {
    Exporter::new(config.clone()).export(settings, out)
}

/// Render the whole file in memory.
///
/// The bytes are ISO-8859-1; write them out unchanged.
pub fn to_aeb34(settings: &ExportSettings, config: &Aeb34Config) -> Result<Vec<u8>, Aeb34Error> {
    let mut out = Vec::new();
    export_with_config(settings, config, &mut out)?;
    Ok(out)
}

fn emit<W: Write + ?Sized>(out: &mut W, w: FieldWriter<'_>, kind: &str) -> Result<u64, Aeb34Error> {
    let bytes = w.into_bytes();
    out.write_all(&bytes)?;
    trace!("wrote {kind} record, {} bytes", bytes.len());
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IssuerBuilder, RecipientBuilder};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::io;

    fn settings(n: usize) -> ExportSettings {
        ExportSettings {
            execution_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            issuer: IssuerBuilder::new("A12345678", "ACME SL", "ES9121000418450200051332").build(),
            reference: None,
            concept: None,
            recipients: (0..n)
                .map(|i| {
                    RecipientBuilder::new(
                        format!("R{i}"),
                        dec!(1.50),
                        "CAIXESBBXXX",
                        "ES7921000813610123456789",
                    )
                    .build()
                })
                .collect(),
        }
    }

    /// Accepts `limit` bytes, then fails.
    struct FailingWriter {
        limit: usize,
        written: Vec<u8>,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(io::Error::other("disk full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn summary_counts_every_record() {
        let mut out = Vec::new();
        let summary = export(&settings(3), &mut out).unwrap();
        assert_eq!(summary.totals.recipients, 3);
        // issuer + header + 3 + section totals + global totals
        assert_eq!(summary.totals.records, 7);
        assert_eq!(summary.totals.amount, dec!(4.50));
        assert_eq!(summary.bytes_written, out.len() as u64);
    }

    #[test]
    fn exporter_is_reusable() {
        let exporter = Exporter::default();
        let mut first = Vec::new();
        let mut second = Vec::new();
        let a = exporter.export(&settings(2), &mut first).unwrap();
        let b = exporter.export(&settings(2), &mut second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn validation_happens_before_writing() {
        let mut s = settings(2);
        s.recipients[1].amount = dec!(0);
        let mut out = Vec::new();
        let err = export(&s, &mut out).unwrap_err();
        assert!(matches!(err, Aeb34Error::Validation(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn io_error_propagates_at_record_boundary() {
        let mut out = FailingWriter {
            limit: 1000,
            written: Vec::new(),
        };
        let err = export(&settings(1), &mut out).unwrap_err();
        assert!(matches!(err, Aeb34Error::Io(_)));
        assert_eq!(out.written.len(), 600);
    }

    #[test]
    fn works_with_dyn_write() {
        let mut buf = Vec::new();
        let out: &mut dyn Write = &mut buf;
        export(&settings(0), out).unwrap();
        assert_eq!(buf.len(), 2400);
    }
}
