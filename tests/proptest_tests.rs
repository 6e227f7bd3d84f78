//! Property-based tests for the AEB34 encoder.
//!
//! Run with: `cargo test --test proptest_tests`

#![cfg(feature = "aeb34")]

use chrono::NaiveDate;
use proptest::prelude::*;
use remesa::aeb34::*;
use remesa::core::*;
use rust_decimal::Decimal;

fn config() -> Aeb34Config {
    Aeb34ConfigBuilder::new()
        .creation_date(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap())
        .build()
}

fn issuer() -> Issuer {
    IssuerBuilder::new("A12345678", "ACME SL", "ES9121000418450200051332")
        .country("ES")
        .build()
}

// --- Strategies ---

/// Amounts from 0.01 to 9,999,999.99 with two decimals.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Free text that fits a field of `max` characters.
fn arb_text(max: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[A-Za-z0-9 .,-]{{1,{max}}}")).unwrap()
}

fn arb_country() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some("ES".to_string())), Just(Some("PT".to_string()))]
}

fn arb_recipient() -> impl Strategy<Value = Recipient> {
    (arb_text(70), arb_amount(), arb_country(), proptest::option::of(arb_text(50))).prop_map(
        |(name, amount, country, address1)| Recipient {
            legal_id: None,
            name,
            address1,
            address2: None,
            address3: None,
            country,
            amount,
            bic: "BSCHESMMXXX".into(),
            bank_account: "ES1000492352082414205416".into(),
        },
    )
}

fn arb_settings() -> impl Strategy<Value = ExportSettings> {
    (
        prop::collection::vec(arb_recipient(), 0..=20),
        proptest::option::of(arb_text(35)),
        proptest::option::of(arb_text(140)),
    )
        .prop_map(|(recipients, reference, concept)| ExportSettings {
            execution_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            issuer: issuer(),
            reference,
            concept,
            recipients,
        })
}

fn recipient_len(settings: &ExportSettings, recipient: &Recipient) -> usize {
    RECIPIENT_FIXED_LEN
        + recipient.country.as_deref().map_or(0, str::len)
        + settings.concept.as_deref().map_or(0, str::len)
}

fn trailer(file: &[u8], from_end: usize) -> &[u8] {
    let start = file.len() - from_end * TOTALS_RECORD_LEN;
    &file[start..start + TOTALS_RECORD_LEN]
}

fn field(record: &[u8], range: std::ops::Range<usize>) -> &str {
    std::str::from_utf8(&record[range]).unwrap()
}

proptest! {
    #[test]
    fn output_length_is_sum_of_records(settings in arb_settings()) {
        let file = to_aeb34(&settings, &config()).unwrap();
        let recipients: usize = settings
            .recipients
            .iter()
            .map(|r| recipient_len(&settings, r))
            .sum();
        prop_assert_eq!(
            file.len(),
            ISSUER_RECORD_LEN + SECTION_HEADER_LEN + recipients + 2 * TOTALS_RECORD_LEN
        );
    }

    #[test]
    fn section_counts(settings in arb_settings()) {
        let file = to_aeb34(&settings, &config()).unwrap();
        let section = trailer(&file, 2);
        let n = settings.recipients.len();

        prop_assert_eq!(&section[..5], b"04SCT");
        prop_assert_eq!(field(section, 22..30).trim_end(), n.to_string());
        prop_assert_eq!(field(section, 30..40).trim_end(), (n + 2).to_string());

        let global = trailer(&file, 1);
        prop_assert_eq!(&global[..5], b"99ORD");
        prop_assert_eq!(field(global, 22..30).trim_end(), n.to_string());
        prop_assert_eq!(field(global, 30..40).trim_end(), (n + 4).to_string());
    }

    #[test]
    fn global_amount_is_exact_sum(settings in arb_settings()) {
        let file = to_aeb34(&settings, &config()).unwrap();
        let expected: i64 = settings
            .recipients
            .iter()
            .map(|r| r.amount.mantissa() as i64)
            .sum();

        let section_amount: i64 = field(trailer(&file, 2), 5..22).parse().unwrap();
        let global_amount: i64 = field(trailer(&file, 1), 5..22).parse().unwrap();
        prop_assert_eq!(section_amount, expected);
        prop_assert_eq!(global_amount, expected);
    }

    #[test]
    fn summary_matches_trailer(settings in arb_settings()) {
        let mut out = Vec::new();
        let summary = export_with_config(&settings, &config(), &mut out).unwrap();
        prop_assert_eq!(summary.totals.amount, settings.total_amount());
        prop_assert_eq!(summary.totals.recipients as usize, settings.recipients.len());
        prop_assert_eq!(summary.totals.records as usize, settings.recipients.len() + 4);
        prop_assert_eq!(summary.bytes_written as usize, out.len());
    }

    #[test]
    fn recipient_amount_field_roundtrips(amount in arb_amount()) {
        let settings = ExportSettings {
            execution_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            issuer: issuer(),
            reference: None,
            concept: None,
            recipients: vec![
                RecipientBuilder::new("BOB", amount, "BSCHESMMXXX", "ES1000492352082414205416")
                    .build(),
            ],
        };
        let file = to_aeb34(&settings, &config()).unwrap();
        let record = &file[ISSUER_RECORD_LEN + SECTION_HEADER_LEN..];
        let cents: i64 = field(record, 83..94).parse().unwrap();
        prop_assert_eq!(Decimal::new(cents, 2), amount);
    }

    #[test]
    fn text_fields_are_padded_not_altered(settings in arb_settings()) {
        prop_assume!(!settings.recipients.is_empty());
        let file = to_aeb34(&settings, &config()).unwrap();
        let first = &settings.recipients[0];
        let record = &file[ISSUER_RECORD_LEN + SECTION_HEADER_LEN..];

        let reference = settings.reference.clone().unwrap_or_default();
        prop_assert_eq!(field(record, 13..48), format!("{reference:<35}"));
        prop_assert_eq!(field(record, 106..176), format!("{:<70}", first.name));
    }
}
