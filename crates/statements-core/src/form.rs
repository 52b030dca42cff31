//! Filing form designators.
//!
//! EDGAR labels every submission with a form type. The pipeline only cares about
//! annual reports, but foreign private issuers file their annual report under a
//! different designator, so the target form is configurable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Annual report form types understood by the filing locator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Domestic annual report.
    #[default]
    #[serde(rename = "10-K")]
    TenK,
    /// Annual report of a foreign private issuer.
    #[serde(rename = "20-F")]
    TwentyF,
    /// Annual report of a Canadian issuer under MJDS.
    #[serde(rename = "40-F")]
    FortyF,
}

impl FormType {
    /// Returns the designator exactly as it appears in the submissions registry.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TenK => "10-K",
            Self::TwentyF => "20-F",
            Self::FortyF => "40-F",
        }
    }

    /// Returns true if `form` is exactly this designator.
    ///
    /// Amendments (`10-K/A`) are distinct forms and never match.
    #[must_use]
    pub fn matches(&self, form: &str) -> bool {
        form == self.as_str()
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "10-K" => Ok(Self::TenK),
            "20-F" => Ok(Self::TwentyF),
            "40-F" => Ok(Self::FortyF),
            other => Err(format!("unsupported annual form type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact_designator() {
        assert!(FormType::TenK.matches("10-K"));
        assert!(!FormType::TenK.matches("10-K/A"));
        assert!(!FormType::TenK.matches("10-Q"));
        assert!(FormType::TwentyF.matches("20-F"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("10-k".parse::<FormType>().unwrap(), FormType::TenK);
        assert_eq!(" 40-F ".parse::<FormType>().unwrap(), FormType::FortyF);
        assert!("8-K".parse::<FormType>().is_err());
    }
}
