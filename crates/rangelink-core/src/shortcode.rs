use crate::base62;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The public identifier of a shortened URL.
///
/// A short code is the canonical base-62 form of the numeric id it was
/// allocated from, so it is 1 to 11 characters of `[0-9a-zA-Z]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Encodes an allocated id into its short code.
    pub fn from_id(id: u64) -> Self {
        Self(base62::encode(id))
    }

    /// Creates a `ShortCode` after validating the input.
    ///
    /// Only the shape is checked; the code may or may not exist in storage.
    pub fn parse(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Decodes the code back into the id it was allocated from.
    pub fn decode(&self) -> Result<u64> {
        base62::decode(&self.0)
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<()> {
        if code.is_empty() || code.len() > base62::MAX_ENCODED_LEN {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between 1 and {}, got {}",
                base62::MAX_ENCODED_LEN,
                code.len()
            )));
        }

        if !code.bytes().all(base62::is_symbol) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only base-62 characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}
