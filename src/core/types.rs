use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordering party: the company whose account is debited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    /// Tax identifier (NIF/CIF), exactly 9 characters.
    pub legal_id: String,
    /// Issuer name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address1: Option<String>,
    /// Postal code + city.
    #[serde(default)]
    pub address2: Option<String>,
    /// Province or state.
    #[serde(default)]
    pub address3: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    #[serde(default)]
    pub country: Option<String>,
    /// IBAN of the account to debit.
    pub bank_account: String,
}

/// Beneficiary of one credit transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Beneficiary tax identifier. Not part of the SEPA record.
    #[serde(default)]
    pub legal_id: Option<String>,
    /// Beneficiary name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address1: Option<String>,
    /// Postal code + city.
    #[serde(default)]
    pub address2: Option<String>,
    /// Province or state.
    #[serde(default)]
    pub address3: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    #[serde(default)]
    pub country: Option<String>,
    /// Amount to transfer, in euros with two decimal places.
    pub amount: Decimal,
    /// BIC of the beneficiary bank.
    pub bic: String,
    /// IBAN of the beneficiary account.
    pub bank_account: String,
}

/// A complete batch of transfer orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Date on which the bank should execute the transfers.
    pub execution_date: NaiveDate,
    /// Ordering party.
    pub issuer: Issuer,
    /// Issuer reference repeated on every transfer, max 35 chars.
    #[serde(default)]
    pub reference: Option<String>,
    /// Transfer concept (remittance information).
    #[serde(default)]
    pub concept: Option<String>,
    /// Transfers, written to the file in this order.
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

impl ExportSettings {
    /// Sum of all recipient amounts, as given (not rounded).
    pub fn total_amount(&self) -> Decimal {
        self.recipients.iter().map(|r| r.amount).sum()
    }
}
