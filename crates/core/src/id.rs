//! Invoice identifiers.
//!
//! An invoice id is a short, human-readable token printed on the document
//! (`Invoice ID#: 4K7Q2ZLM`). It only needs to be unlikely to repeat within a
//! session; it is neither globally unique nor suitable as a secret.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Number of characters in a generated token.
pub const TOKEN_LEN: usize = 8;

const MAX_PARSED_LEN: usize = 32;
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Opaque identifier of a generated invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Generate a fresh token.
    ///
    /// The randomness comes from a UUIDv4; only its low bits are used.
    /// Prefer [`InvoiceId::from_seed`] in tests for determinism.
    pub fn generate() -> Self {
        Self::from_seed(Uuid::new_v4().as_u128())
    }

    /// Derive a token from a seed: base-36 digits of `seed`, least significant
    /// first, always [`TOKEN_LEN`] characters long.
    pub fn from_seed(mut seed: u128) -> Self {
        let mut token = String::with_capacity(TOKEN_LEN);
        for _ in 0..TOKEN_LEN {
            token.push(ALPHABET[(seed % 36) as usize] as char);
            seed /= 36;
        }
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InvoiceId {
    type Err = DomainError;

    /// Parse a token. Input is trimmed and upper-cased.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        if token.is_empty() {
            return Err(DomainError::invalid_id("InvoiceId: empty token"));
        }
        if token.len() > MAX_PARSED_LEN {
            return Err(DomainError::invalid_id(format!(
                "InvoiceId: token longer than {MAX_PARSED_LEN} characters"
            )));
        }
        if let Some(c) = token.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(DomainError::invalid_id(format!(
                "InvoiceId: unexpected character {c:?}"
            )));
        }
        Ok(Self(token))
    }
}

impl TryFrom<String> for InvoiceId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InvoiceId> for String {
    fn from(value: InvoiceId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_tokens_are_short_uppercase_alphanumerics() {
        let id = InvoiceId::generate();
        assert_eq!(id.as_str().len(), TOKEN_LEN);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn consecutive_tokens_differ() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| InvoiceId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn seed_zero_is_all_zeros() {
        assert_eq!(InvoiceId::from_seed(0).as_str(), "00000000");
        assert_eq!(InvoiceId::from_seed(35).as_str(), "Z0000000");
    }

    #[test]
    fn parse_normalises_case_and_whitespace() {
        let id: InvoiceId = "  ab12cd34 ".parse().unwrap();
        assert_eq!(id.as_str(), "AB12CD34");
    }

    #[test]
    fn parse_rejects_empty_and_punctuation() {
        match "   ".parse::<InvoiceId>().unwrap_err() {
            DomainError::InvalidId(msg) if msg.contains("empty") => {}
            other => panic!("Expected InvalidId for empty token, got {other:?}"),
        }
        assert!(matches!(
            "AB-12".parse::<InvoiceId>(),
            Err(DomainError::InvalidId(_))
        ));
    }

    #[test]
    fn serde_uses_plain_string() {
        let id = InvoiceId::from_seed(123_456_789);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: InvoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<InvoiceId>("\"no way\"").is_err());
    }

    proptest! {
        /// Property: any seed yields a token that parses back to itself.
        #[test]
        fn seeded_tokens_parse_back(seed in any::<u128>()) {
            let id = InvoiceId::from_seed(seed);
            prop_assert_eq!(id.as_str().len(), TOKEN_LEN);
            let parsed: InvoiceId = id.as_str().parse().unwrap();
            prop_assert_eq!(parsed, id);
        }
    }
}
