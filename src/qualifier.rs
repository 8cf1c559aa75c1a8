//! Short keys identifying categories of resources.

use std::borrow::Borrow;
use std::convert::TryFrom;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Maximum number of characters allowed in a qualifier.
pub const MAX_LENGTH: usize = 10;

/// Qualifier of the project category.
pub const PROJECT: &str = "TRK";
/// Qualifier of the module category.
pub const MODULE: &str = "BRC";
/// Qualifier of the directory category.
pub const DIRECTORY: &str = "DIR";
/// Qualifier of the source file category.
pub const FILE: &str = "FIL";
/// Qualifier of the unit test file category.
pub const UNIT_TEST_FILE: &str = "UTS";
/// Qualifier of the view category.
pub const VIEW: &str = "VW";
/// Qualifier of the sub-view category.
pub const SUBVIEW: &str = "SVW";
/// Qualifier of the library category.
pub const LIBRARY: &str = "LIB";

#[derive(Debug, Error)]
pub enum Error {
    #[error("qualifier is limited to {} characters: {0}", MAX_LENGTH)]
    TooLong(String),
}

/// Short string key uniquely identifying a category of resources.
///
/// A qualifier is at most [`MAX_LENGTH`] characters long. It is the sole
/// identity of a resource type: descriptors compare and hash by their
/// qualifier alone.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Deserialize, Serialize)]
#[serde(try_from = "String")]
pub struct Qualifier(String);

impl Qualifier {
    /// Validates and wraps a qualifier string.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();

        if s.chars().count() > MAX_LENGTH {
            return Err(Error::TooLong(s));
        }

        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Qualifier {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Qualifier {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Qualifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Deref for Qualifier {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// NOTE: The derived `Hash` delegates to the inner string, so borrowed `str`
// lookups in hashed maps stay consistent.
impl Borrow<str> for Qualifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Qualifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
