//! Write an AEB34 SEPA transfer file.
//!
//! ```bash
//! # built-in sample batch, file to stdout
//! cargo run --example sepa_transfer_batch > orders.aeb34
//!
//! # batch from JSON, file to a path, with encoder logging
//! RUST_LOG=debug cargo run --example sepa_transfer_batch -- batch.json orders.aeb34
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use chrono::NaiveDate;
use remesa::aeb34::{Aeb34Config, Exporter};
use remesa::core::*;
use rust_decimal_macros::dec;

fn sample_batch() -> Result<ExportSettings, Aeb34Error> {
    let issuer = IssuerBuilder::new(
        "A12345678",
        "Construcciones Levante SL",
        "ES9121000418450200051332",
    )
    .address1("Avenida del Puerto 12")
    .address2("46023 Valencia")
    .address3("Valencia")
    .country("ES")
    .build();

    ExportSettingsBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(), issuer)
        .reference("NOMINA-2024-06")
        .concept("Nomina junio 2024")
        .add_recipient(
            RecipientBuilder::new(
                "Lucia Perez Sanz",
                dec!(1250.00),
                "CAIXESBBXXX",
                "ES7921000813610123456789",
            )
            .address1("Calle Colon 3")
            .address2("46004 Valencia")
            .country("ES")
            .build(),
        )
        .add_recipient(
            RecipientBuilder::new(
                "Andres Gil Mora",
                dec!(980.35),
                "BSCHESMMXXX",
                "ES1000492352082414205416",
            )
            .country("ES")
            .build(),
        )
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            let settings: ExportSettings = serde_json::from_str(&fs::read_to_string(&path)?)?;
            let errors = validate_settings(&settings);
            if !errors.is_empty() {
                for err in &errors {
                    eprintln!("{path}: {err}");
                }
                return Err(format!("{} problem(s) in {path}", errors.len()).into());
            }
            settings
        }
        None => sample_batch()?,
    };

    let exporter = Exporter::new(Aeb34Config::default());
    let summary = match args.next() {
        Some(path) => {
            let mut out = BufWriter::new(File::create(&path)?);
            let summary = exporter.export(&settings, &mut out)?;
            out.flush()?;
            summary
        }
        None => {
            let mut out = io::stdout().lock();
            let summary = exporter.export(&settings, &mut out)?;
            out.flush()?;
            summary
        }
    };

    eprintln!(
        "{} transfers, {} EUR, {} records, {} bytes",
        summary.totals.recipients,
        summary.totals.amount,
        summary.totals.records,
        summary.bytes_written
    );
    Ok(())
}
