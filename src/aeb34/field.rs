//! Primitive fixed-width field encoding.
//!
//! Every AEB34 field has a width in bytes. Text is ISO-8859-1 (one byte per
//! character) so widths in characters and in bytes are the same thing.

use chrono::{Datelike, NaiveDate};
use log::warn;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use super::config::{Aeb34Config, OverflowPolicy};
use crate::core::{Aeb34Error, round_to_cents};

const CENTS_PER_UNIT: Decimal = dec!(100);

/// Accumulates the encoded fields of one record.
///
/// Nothing reaches the output stream until the whole record has been
/// encoded, see [`FieldWriter::into_bytes`].
pub struct FieldWriter<'a> {
    buf: Vec<u8>,
    config: &'a Aeb34Config,
}

impl<'a> FieldWriter<'a> {
    pub fn new(config: &'a Aeb34Config) -> Self {
        Self {
            buf: Vec::with_capacity(600),
            config,
        }
    }

    /// Write a layout constant (record code, version, fixed flags).
    pub fn constant(&mut self, value: &'static str) {
        debug_assert!(value.is_ascii());
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Write free text right-padded with spaces to `width`.
    ///
    /// `None` is written as an empty value. A `width` of 0 writes the value
    /// as-is. Values longer than `width` follow the configured
    /// [`OverflowPolicy`].
    pub fn text(
        &mut self,
        field: &str,
        value: Option<&str>,
        width: usize,
    ) -> Result<(), Aeb34Error> {
        let value = value.unwrap_or("");
        let len = value.chars().count();

        if width == 0 || len == width {
            return self.encode(field, value.chars());
        }
        if len < width {
            self.encode(field, value.chars())?;
            self.pad(b' ', width - len);
            return Ok(());
        }

        match self.config.overflow {
            OverflowPolicy::Reject => Err(Aeb34Error::Format(format!(
                "{field} is {len} characters, field width is {width}"
            ))),
            OverflowPolicy::Truncate => {
                warn!("{field}: truncating {len} characters to {width}");
                self.encode(field, value.chars().take(width))
            }
            OverflowPolicy::Passthrough => {
                warn!("{field}: writing {len} characters into a {width}-wide field");
                self.encode(field, value.chars())
            }
        }
    }

    /// Write exactly `n` spaces.
    pub fn blanks(&mut self, n: usize) -> Result<(), Aeb34Error> {
        if n == 0 {
            return Err(Aeb34Error::InvalidArgument(
                "blanks to write must be greater than zero".into(),
            ));
        }
        self.pad(b' ', n);
        Ok(())
    }

    /// Write a date as `YYYYMMDD`.
    pub fn date(&mut self, field: &str, date: NaiveDate) -> Result<(), Aeb34Error> {
        let year = date.year();
        if !(0..=9999).contains(&year) {
            return Err(Aeb34Error::Format(format!(
                "{field}: year {year} does not fit in 4 digits"
            )));
        }
        let s = format!("{year:04}{:02}{:02}", date.month(), date.day());
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Write an amount in cents, left-padded with zeros to `width`.
    ///
    /// The amount is rounded to two decimals first. Amounts that need more
    /// than `width` digits, and negative amounts, are format errors whatever
    /// the overflow policy says.
    pub fn currency(
        &mut self,
        field: &str,
        amount: Decimal,
        width: usize,
    ) -> Result<(), Aeb34Error> {
        let digits = cents_digits(field, amount)?;
        if digits.len() > width {
            return Err(Aeb34Error::Format(format!(
                "{field}: amount {amount} needs {} digits, field width is {width}",
                digits.len()
            )));
        }
        self.pad(b'0', width - digits.len());
        self.buf.extend_from_slice(digits.as_bytes());
        Ok(())
    }

    /// Write a count as text, left-aligned and space-padded to `width`.
    pub fn count(&mut self, field: &str, value: u64, width: usize) -> Result<(), Aeb34Error> {
        let s = value.to_string();
        if s.len() > width {
            return Err(Aeb34Error::Format(format!(
                "{field}: {value} does not fit in {width} digits"
            )));
        }
        self.buf.extend_from_slice(s.as_bytes());
        self.pad(b' ', width - s.len());
        Ok(())
    }

    /// Bytes encoded so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn pad(&mut self, byte: u8, n: usize) {
        self.buf.resize(self.buf.len() + n, byte);
    }

    fn encode(&mut self, field: &str, chars: impl Iterator<Item = char>) -> Result<(), Aeb34Error> {
        for ch in chars {
            match u8::try_from(u32::from(ch)) {
                Ok(byte) => self.buf.push(byte),
                Err(_) if self.config.replace_unmappable => self.buf.push(b'?'),
                Err(_) => {
                    return Err(Aeb34Error::Format(format!(
                        "{field}: character '{ch}' has no ISO-8859-1 encoding"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Decimal digits of `amount` in cents, no sign, no separator.
fn cents_digits(field: &str, amount: Decimal) -> Result<String, Aeb34Error> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Aeb34Error::Format(format!(
            "{field}: negative amount {amount} cannot be encoded"
        )));
    }
    round_to_cents(amount)
        .checked_mul(CENTS_PER_UNIT)
        .and_then(|cents| cents.trunc().to_u128())
        .map(|cents| cents.to_string())
        .ok_or_else(|| Aeb34Error::Format(format!("{field}: amount {amount} is out of range")))
}
