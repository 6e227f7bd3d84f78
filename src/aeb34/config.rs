//! Encoder configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What to do with free text longer than its fixed-width field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail with a format error naming the field.
    #[default]
    Reject,
    /// Cut the value to the field width.
    Truncate,
    /// Write the value unpadded and oversized. The resulting file no
    /// longer has fixed record lengths; banks will reject it.
    Passthrough,
}

/// Configuration for AEB34 export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Aeb34Config {
    /// Creation date written in the issuer record. `None` means today (local time).
    pub creation_date: Option<NaiveDate>,
    /// Handling of free text longer than its field.
    pub overflow: OverflowPolicy,
    /// Replace characters outside ISO-8859-1 with `?` instead of failing.
    pub replace_unmappable: bool,
}

impl Aeb34Config {
    /// Creation date for this export.
    pub fn creation_date(&self) -> NaiveDate {
        self.creation_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Builder for [`Aeb34Config`].
///
/// # Example
///
/// ```
/// use remesa::aeb34::{Aeb34ConfigBuilder, OverflowPolicy};
/// use chrono::NaiveDate;
///
/// let config = Aeb34ConfigBuilder::new()
///     .creation_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
///     .overflow(OverflowPolicy::Truncate)
///     .build();
/// assert!(!config.replace_unmappable);
/// ```
#[derive(Debug, Default)]
pub struct Aeb34ConfigBuilder {
    config: Aeb34Config,
}

impl Aeb34ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the creation date instead of using today.
    pub fn creation_date(mut self, date: NaiveDate) -> Self {
        self.config.creation_date = Some(date);
        self
    }

    /// Set the free-text overflow policy.
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow = policy;
        self
    }

    /// Replace characters outside ISO-8859-1 with `?`.
    pub fn replace_unmappable(mut self, replace: bool) -> Self {
        self.config.replace_unmappable = replace;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Aeb34Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        let config = Aeb34Config::default();
        assert_eq!(config.overflow, OverflowPolicy::Reject);
        assert!(config.creation_date.is_none());
        assert!(!config.replace_unmappable);
    }

    #[test]
    fn pinned_creation_date_wins() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let config = Aeb34ConfigBuilder::new().creation_date(date).build();
        assert_eq!(config.creation_date(), date);
    }
}
