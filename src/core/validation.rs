use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{Aeb34Error, ValidationError};
use super::types::*;

/// Exact length of a Spanish tax identifier (NIF/CIF).
pub const LEGAL_ID_LEN: usize = 9;

/// Maximum length of the issuer reference.
pub const REFERENCE_MAX_LEN: usize = 35;

/// Upper bound imposed by the 8-digit recipient count of the totals records.
pub const MAX_RECIPIENTS: usize = 99_999_999;

/// Validate a whole batch before it is handed to the encoder.
/// Returns all validation errors found (not just the first).
///
/// This is a superset of what the exporter enforces under the default
/// overflow policy: it also rejects a missing recipient name, text longer
/// than its field and characters with no ISO-8859-1 encoding. Batches meant
/// for a lenient overflow policy should skip this and rely on the export.
pub fn validate_settings(settings: &ExportSettings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    issuer_errors(&settings.issuer, &mut errors);
    issuer_text_errors(&settings.issuer, &mut errors);

    text_errors(
        "reference",
        settings.reference.as_deref(),
        REFERENCE_MAX_LEN,
        &mut errors,
    );
    text_errors("concept", settings.concept.as_deref(), 0, &mut errors);

    for (index, recipient) in settings.recipients.iter().enumerate() {
        recipient_errors(index, recipient, &mut errors);
        if recipient.name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("recipients[{index}].name"),
                format!("recipient #{} name is required", index + 1),
            ));
        }
        recipient_text_errors(index, recipient, &mut errors);
    }

    errors
}

/// Check the issuer fields the encoder depends on.
/// Fails with the first problem found, legal ID first.
pub fn check_issuer(issuer: &Issuer) -> Result<(), Aeb34Error> {
    let mut errors = Vec::new();
    issuer_errors(issuer, &mut errors);
    first_error(errors)
}

/// Check one recipient (zero-based `index` in the batch).
pub fn check_recipient(index: usize, recipient: &Recipient) -> Result<(), Aeb34Error> {
    let mut errors = Vec::new();
    recipient_errors(index, recipient, &mut errors);
    first_error(errors)
}

/// Reject batches whose recipient count cannot be written in the totals
/// records.
pub fn check_recipient_count(count: usize) -> Result<(), Aeb34Error> {
    if count > MAX_RECIPIENTS {
        return Err(Aeb34Error::InvalidArgument(format!(
            "a batch cannot have more than {MAX_RECIPIENTS} recipients, got {count}"
        )));
    }
    Ok(())
}

/// Round an amount to cents the way it is written to the file.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn first_error(errors: Vec<ValidationError>) -> Result<(), Aeb34Error> {
    match errors.into_iter().next() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn issuer_errors(issuer: &Issuer, errors: &mut Vec<ValidationError>) {
    let len = issuer.legal_id.chars().count();
    if len != LEGAL_ID_LEN {
        errors.push(ValidationError::format(
            "issuer.legal_id",
            format!("legal ID must be {LEGAL_ID_LEN} characters, got {len}"),
        ));
    }

    if issuer.bank_account.is_empty() {
        errors.push(ValidationError::new(
            "issuer.bank_account",
            "issuer bank account is required",
        ));
    }

    if issuer.name.is_empty() {
        errors.push(ValidationError::new("issuer.name", "issuer name is required"));
    }
}

fn recipient_errors(index: usize, recipient: &Recipient, errors: &mut Vec<ValidationError>) {
    let who = describe(index, recipient);

    if recipient.bank_account.is_empty() {
        errors.push(ValidationError::new(
            format!("recipients[{index}].bank_account"),
            format!("bank account is required for {who}"),
        ));
    }

    if recipient.amount.is_zero() {
        errors.push(ValidationError::new(
            format!("recipients[{index}].amount"),
            format!("amount cannot be zero for {who}"),
        ));
    } else if recipient.amount.is_sign_negative() {
        errors.push(ValidationError::new(
            format!("recipients[{index}].amount"),
            format!("amount must be positive for {who}, got {}", recipient.amount),
        ));
    } else if round_to_cents(recipient.amount).is_zero() {
        errors.push(ValidationError::new(
            format!("recipients[{index}].amount"),
            format!("amount {} rounds to zero cents for {who}", recipient.amount),
        ));
    }

    if recipient.bic.is_empty() {
        errors.push(ValidationError::new(
            format!("recipients[{index}].bic"),
            format!("BIC code is required for {who}"),
        ));
    }
}

fn issuer_text_errors(issuer: &Issuer, errors: &mut Vec<ValidationError>) {
    let fields = [
        // length is checked with the business rules
        ("issuer.legal_id", Some(issuer.legal_id.as_str()), 0),
        ("issuer.bank_account", Some(issuer.bank_account.as_str()), 34),
        ("issuer.name", Some(issuer.name.as_str()), 70),
        ("issuer.address1", issuer.address1.as_deref(), 50),
        ("issuer.address2", issuer.address2.as_deref(), 50),
        ("issuer.address3", issuer.address3.as_deref(), 40),
        ("issuer.country", issuer.country.as_deref(), 2),
    ];
    for (field, value, width) in fields {
        text_errors(field, value, width, errors);
    }
}

fn recipient_text_errors(index: usize, recipient: &Recipient, errors: &mut Vec<ValidationError>) {
    let fields = [
        ("bank_account", Some(recipient.bank_account.as_str()), 34),
        ("bic", Some(recipient.bic.as_str()), 11),
        ("name", Some(recipient.name.as_str()), 70),
        ("address1", recipient.address1.as_deref(), 50),
        ("address2", recipient.address2.as_deref(), 50),
        ("address3", recipient.address3.as_deref(), 40),
        // written unpadded
        ("country", recipient.country.as_deref(), 0),
    ];
    for (name, value, width) in fields {
        text_errors(&format!("recipients[{index}].{name}"), value, width, errors);
    }
}

/// Width and charset of one text field. A `width` of 0 means unbounded.
fn text_errors(field: &str, value: Option<&str>, width: usize, errors: &mut Vec<ValidationError>) {
    let Some(value) = value else {
        return;
    };

    let len = value.chars().count();
    if width > 0 && len > width {
        errors.push(ValidationError::format(
            field,
            format!("{len} characters do not fit in a field of {width}"),
        ));
    }

    if let Some(ch) = value.chars().find(|&ch| u32::from(ch) > 0xFF) {
        errors.push(ValidationError::format(
            field,
            format!("character '{ch}' has no ISO-8859-1 encoding"),
        ));
    }
}

fn describe(index: usize, recipient: &Recipient) -> String {
    if recipient.name.is_empty() {
        format!("recipient #{}", index + 1)
    } else {
        format!("recipient #{} '{}'", index + 1, recipient.name)
    }
}
