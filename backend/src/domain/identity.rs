//! Identity primitives shared by the routing layer.
//!
//! The two stores key ownership differently: the privileged store uses a
//! numeric surrogate ([`NumericUserId`]) while the tenant store uses the
//! identity provider's subject string ([`SubjectId`]). [`OwnerKey`] is the
//! canonical union exposed to callers once a record has been normalised.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

const SUBJECT_MAX_LEN: usize = 128;
const FINGERPRINT_BYTES: usize = 6;

/// Validation failures raised by identity constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityValidationError {
    /// Numeric identifiers are strictly positive.
    #[error("numeric user id must be positive, got {0}")]
    NonPositiveId(i64),
    /// Numeric identifier text could not be parsed.
    #[error("numeric user id must be an integer: {0}")]
    MalformedId(String),
    /// Subject identifiers must contain visible characters.
    #[error("subject id must not be empty")]
    EmptySubject,
    /// Subject identifiers are bounded in length.
    #[error("subject id must be at most {max} characters")]
    SubjectTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Subject identifiers never contain whitespace.
    #[error("subject id must not contain whitespace")]
    SubjectWhitespace,
    /// Bearer credentials must not be blank.
    #[error("access token must not be empty")]
    EmptyToken,
    /// Role text did not match a known role.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Numeric surrogate key used by the privileged store.
///
/// # Examples
/// ```
/// use assistant_backend::domain::NumericUserId;
///
/// let id = NumericUserId::new(42).expect("positive id");
/// assert_eq!(id.get(), 42);
/// assert!(NumericUserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct NumericUserId(i64);

impl NumericUserId {
    /// Validate and wrap a numeric identifier.
    pub const fn new(value: i64) -> Result<Self, IdentityValidationError> {
        if value <= 0 {
            return Err(IdentityValidationError::NonPositiveId(value));
        }
        Ok(Self(value))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for NumericUserId {
    type Error = IdentityValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NumericUserId> for i64 {
    fn from(value: NumericUserId) -> Self {
        value.0
    }
}

impl FromStr for NumericUserId {
    type Err = IdentityValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = value
            .trim()
            .parse::<i64>()
            .map_err(|_| IdentityValidationError::MalformedId(value.to_owned()))?;
        Self::new(parsed)
    }
}

impl fmt::Display for NumericUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity-provider subject, the owner key of tenant-store rows.
///
/// # Examples
/// ```
/// use assistant_backend::domain::SubjectId;
///
/// let subject = SubjectId::new("user-42").expect("valid subject");
/// assert_eq!(subject.as_str(), "user-42");
/// assert!(SubjectId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
    /// Validate and wrap a subject identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdentityValidationError::EmptySubject);
        }
        if trimmed.chars().count() > SUBJECT_MAX_LEN {
            return Err(IdentityValidationError::SubjectTooLong {
                max: SUBJECT_MAX_LEN,
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IdentityValidationError::SubjectWhitespace);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the subject text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for SubjectId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubjectId> for String {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner key of a normalised record.
///
/// Always serialises as a JSON string: privileged rows render their numeric
/// key in decimal and tenant rows carry the subject, so `userId` has one type
/// whichever store produced the record.
///
/// # Examples
/// ```
/// use assistant_backend::domain::{NumericUserId, OwnerKey};
///
/// let key = OwnerKey::from(NumericUserId::new(10).expect("positive id"));
/// assert_eq!(serde_json::to_value(&key).expect("json"), serde_json::json!("10"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum OwnerKey {
    /// Privileged-store surrogate key.
    Numeric(NumericUserId),
    /// Tenant-store subject.
    Subject(SubjectId),
}

impl From<NumericUserId> for OwnerKey {
    fn from(value: NumericUserId) -> Self {
        Self::Numeric(value)
    }
}

impl From<SubjectId> for OwnerKey {
    fn from(value: SubjectId) -> Self {
        Self::Subject(value)
    }
}

impl From<OwnerKey> for String {
    fn from(value: OwnerKey) -> Self {
        value.to_string()
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => id.fmt(f),
            Self::Subject(subject) => subject.fmt(f),
        }
    }
}

/// Role recorded for an identity in the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrative identity served by the privileged store.
    Admin,
    /// Regular end user served by the tenant store.
    User,
}

impl Role {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = IdentityValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(IdentityValidationError::UnknownRole(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bearer credential forwarded to the tenant store.
///
/// The secret is wiped from memory on drop and never appears in `Debug`
/// output; logs use [`AccessToken::fingerprint`] instead.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a bearer credential, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdentityValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Expose the secret for forwarding in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Short SHA-256 prefix suitable for correlating log lines.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(digest.as_slice().get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken")
            .field(&self.fingerprint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-7)]
    fn numeric_ids_must_be_positive(#[case] value: i64) {
        assert_eq!(
            NumericUserId::new(value),
            Err(IdentityValidationError::NonPositiveId(value))
        );
    }

    #[rstest]
    fn numeric_ids_parse_from_text() {
        let id: NumericUserId = " 999 ".parse().expect("parse id");
        assert_eq!(id.get(), 999);
        assert!("nine".parse::<NumericUserId>().is_err());
    }

    #[rstest]
    #[case("", IdentityValidationError::EmptySubject)]
    #[case("user 42", IdentityValidationError::SubjectWhitespace)]
    fn invalid_subjects_are_rejected(#[case] raw: &str, #[case] expected: IdentityValidationError) {
        assert_eq!(SubjectId::new(raw), Err(expected));
    }

    #[rstest]
    fn subjects_are_trimmed() {
        let subject = SubjectId::new("  user-42 ").expect("valid subject");
        assert_eq!(subject.as_str(), "user-42");
    }

    #[rstest]
    fn owner_keys_serialise_as_strings_on_both_paths() {
        let numeric = OwnerKey::from(NumericUserId::new(7).expect("id"));
        let subject = OwnerKey::from(SubjectId::new("user-42").expect("subject"));

        assert_eq!(serde_json::to_value(&numeric).expect("json"), serde_json::json!("7"));
        assert_eq!(
            serde_json::to_value(&subject).expect("json"),
            serde_json::json!("user-42")
        );
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("USER", Role::User)]
    fn roles_parse_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("role"), expected);
    }

    #[rstest]
    fn blank_tokens_are_rejected() {
        assert_eq!(
            AccessToken::new("  ").map(|_| ()),
            Err(IdentityValidationError::EmptyToken)
        );
    }

    #[rstest]
    fn token_debug_output_hides_the_secret() {
        let token = AccessToken::new("super-secret-jwt").expect("token");
        let rendered = format!("{token:?}");

        assert!(!rendered.contains("super-secret-jwt"));
        assert!(rendered.contains(&token.fingerprint()));
        assert_eq!(token.fingerprint().len(), FINGERPRINT_BYTES * 2);
    }
}
