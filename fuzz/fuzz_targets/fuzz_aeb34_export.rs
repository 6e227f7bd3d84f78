#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use remesa::aeb34::{Aeb34ConfigBuilder, OverflowPolicy, RECIPIENT_FIXED_LEN, to_aeb34};
use remesa::core::*;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let cents = i64::from_le_bytes(data[..8].try_into().unwrap());
    let Ok(text) = std::str::from_utf8(&data[8..]) else {
        return;
    };

    let settings = ExportSettings {
        execution_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        issuer: IssuerBuilder::new("A12345678", text, "ES9121000418450200051332").build(),
        reference: Some(text.to_string()),
        concept: None,
        recipients: vec![
            RecipientBuilder::new(
                text,
                Decimal::new(cents, 2),
                "CAIXESBBXXX",
                "ES7921000813610123456789",
            )
            .build(),
        ],
    };

    // Arbitrary text must never panic, and truncation must keep records fixed-width.
    let config = Aeb34ConfigBuilder::new()
        .overflow(OverflowPolicy::Truncate)
        .replace_unmappable(true)
        .build();
    if let Ok(file) = to_aeb34(&settings, &config) {
        assert_eq!(file.len(), 4 * 600 + RECIPIENT_FIXED_LEN);
    }
    let _ = to_aeb34(&settings, &Default::default());
});
