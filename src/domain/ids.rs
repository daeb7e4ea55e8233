//! Identifier newtypes with validation
//!
//! Newtype wrappers for the identifiers exchanged with the registry. Each
//! validates its format on construction so the clients can assume
//! well-formed values.

use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn doi_pattern() -> &'static Regex {
    static DOI_RE: OnceLock<Regex> = OnceLock::new();
    DOI_RE.get_or_init(|| {
        Regex::new(r"^10\.\d{4,9}/[-._;()/:a-zA-Z0-9]+$").expect("DOI pattern is valid")
    })
}

/// Digital Object Identifier
///
/// Validated against the `10.<registrant>/<suffix>` syntax. Search-by-DOI
/// fails fast on malformed input instead of issuing a query that can never
/// match.
///
/// # Examples
///
/// ```
/// use doajsync::domain::Doi;
/// use std::str::FromStr;
///
/// let doi = Doi::from_str("10.1234/example.01").unwrap();
/// assert_eq!(doi.as_str(), "10.1234/example.01");
/// assert!(Doi::from_str("not-a-doi").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Doi(String);

// Deserialization goes through `new` so article files cannot smuggle
// malformed DOIs past validation.
impl<'de> Deserialize<'de> for Doi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(D::Error::custom)
    }
}

impl Doi {
    pub fn new(doi: impl Into<String>) -> Result<Self, String> {
        let doi = doi.into();
        if !doi_pattern().is_match(&doi) {
            return Err(format!("{doi} is not a valid DOI"));
        }
        Ok(Self(doi))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Doi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Doi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Doi {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Journal ISSN (electronic or print)
///
/// Format: four digits, hyphen, three digits plus a check digit that may
/// be `X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Issn(String);

impl<'de> Deserialize<'de> for Issn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(D::Error::custom)
    }
}

impl Issn {
    pub fn new(issn: impl Into<String>) -> Result<Self, String> {
        let issn = issn.into();
        // Byte-wise so non-ASCII input is rejected rather than sliced
        // mid-character.
        let b = issn.as_bytes();
        let valid = b.len() == 9
            && b[4] == b'-'
            && b[..4].iter().all(u8::is_ascii_digit)
            && b[5..8].iter().all(u8::is_ascii_digit)
            && matches!(b[8], b'0'..=b'9' | b'X' | b'x');
        if !valid {
            return Err(format!("{issn} is not a valid ISSN"));
        }
        Ok(Self(issn))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Issn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Issn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier DOAJ assigns to an article record on creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoajId(String);

impl DoajId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("DOAJ id cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DoajId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DoajId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DoajId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
