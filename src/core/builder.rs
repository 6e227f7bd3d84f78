use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::{Aeb34Error, ErrorKind};
use super::types::*;
use super::validation;

/// Builder for constructing valid export settings.
///
/// ```
/// use remesa::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let settings = ExportSettingsBuilder::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     IssuerBuilder::new("B87654321", "Talleres Norte SL", "ES6000491500051234567892").build(),
/// )
/// .concept("Factura 2024-017")
/// .add_recipient(
///     RecipientBuilder::new(
///         "Suministros Sur SA",
///         dec!(830.45),
///         "BSCHESMMXXX",
///         "ES1000492352082414205416",
///     )
///     .build(),
/// )
/// .build()
/// .unwrap();
///
/// assert_eq!(settings.recipients.len(), 1);
/// ```
pub struct ExportSettingsBuilder {
    execution_date: NaiveDate,
    issuer: Issuer,
    reference: Option<String>,
    concept: Option<String>,
    recipients: Vec<Recipient>,
}

impl ExportSettingsBuilder {
    pub fn new(execution_date: NaiveDate, issuer: Issuer) -> Self {
        Self {
            execution_date,
            issuer,
            reference: None,
            concept: None,
            recipients: Vec::new(),
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }

    pub fn add_recipient(mut self, recipient: Recipient) -> Self {
        self.recipients.push(recipient);
        self
    }

    pub fn recipients(mut self, recipients: impl IntoIterator<Item = Recipient>) -> Self {
        self.recipients.extend(recipients);
        self
    }

    /// Build the settings and run validation.
    /// The error lists every problem found (not just the first). It is
    /// [`Aeb34Error::Format`] when any problem is a format problem, and
    /// [`Aeb34Error::Validation`] otherwise.
    pub fn build(self) -> Result<ExportSettings, Aeb34Error> {
        let settings = self.build_unchecked()?;

        let errors = validation::validate_settings(&settings);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            // a value the encoder cannot write outranks a business-rule problem
            if errors.iter().any(|e| e.kind == ErrorKind::Format) {
                return Err(Aeb34Error::Format(msg));
            }
            return Err(Aeb34Error::Validation(msg));
        }

        Ok(settings)
    }

    /// Build without business validation, for testing or importing external data.
    /// The export still validates before writing anything.
    pub fn build_unchecked(self) -> Result<ExportSettings, Aeb34Error> {
        validation::check_recipient_count(self.recipients.len())?;

        Ok(ExportSettings {
            execution_date: self.execution_date,
            issuer: self.issuer,
            reference: self.reference,
            concept: self.concept,
            recipients: self.recipients,
        })
    }
}

/// Builder for [`Issuer`].
pub struct IssuerBuilder {
    legal_id: String,
    name: String,
    address1: Option<String>,
    address2: Option<String>,
    address3: Option<String>,
    country: Option<String>,
    bank_account: String,
}

impl IssuerBuilder {
    pub fn new(
        legal_id: impl Into<String>,
        name: impl Into<String>,
        bank_account: impl Into<String>,
    ) -> Self {
        Self {
            legal_id: legal_id.into(),
            name: name.into(),
            address1: None,
            address2: None,
            address3: None,
            country: None,
            bank_account: bank_account.into(),
        }
    }

    /// Street address.
    pub fn address1(mut self, line: impl Into<String>) -> Self {
        self.address1 = Some(line.into());
        self
    }

    /// Postal code + city.
    pub fn address2(mut self, line: impl Into<String>) -> Self {
        self.address2 = Some(line.into());
        self
    }

    /// Province or state.
    pub fn address3(mut self, line: impl Into<String>) -> Self {
        self.address3 = Some(line.into());
        self
    }

    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country = Some(code.into());
        self
    }

    pub fn build(self) -> Issuer {
        Issuer {
            legal_id: self.legal_id,
            name: self.name,
            address1: self.address1,
            address2: self.address2,
            address3: self.address3,
            country: self.country,
            bank_account: self.bank_account,
        }
    }
}

/// Builder for [`Recipient`].
pub struct RecipientBuilder {
    legal_id: Option<String>,
    name: String,
    address1: Option<String>,
    address2: Option<String>,
    address3: Option<String>,
    country: Option<String>,
    amount: Decimal,
    bic: String,
    bank_account: String,
}

impl RecipientBuilder {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        bic: impl Into<String>,
        bank_account: impl Into<String>,
    ) -> Self {
        Self {
            legal_id: None,
            name: name.into(),
            address1: None,
            address2: None,
            address3: None,
            country: None,
            amount,
            bic: bic.into(),
            bank_account: bank_account.into(),
        }
    }

    pub fn legal_id(mut self, id: impl Into<String>) -> Self {
        self.legal_id = Some(id.into());
        self
    }

    pub fn address1(mut self, line: impl Into<String>) -> Self {
        self.address1 = Some(line.into());
        self
    }

    pub fn address2(mut self, line: impl Into<String>) -> Self {
        self.address2 = Some(line.into());
        self
    }

    pub fn address3(mut self, line: impl Into<String>) -> Self {
        self.address3 = Some(line.into());
        self
    }

    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country = Some(code.into());
        self
    }

    pub fn build(self) -> Recipient {
        Recipient {
            legal_id: self.legal_id,
            name: self.name,
            address1: self.address1,
            address2: self.address2,
            address3: self.address3,
            country: self.country,
            amount: self.amount,
            bic: self.bic,
            bank_account: self.bank_account,
        }
    }
}
