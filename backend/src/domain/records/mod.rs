//! Logical records served by the routing layer.
//!
//! Every owned record travels as a [`Stored`] envelope: the store-assigned
//! id, the owner key, the creation timestamp and the domain fields. Stores
//! return `Stored<T, NumericUserId>` or `Stored<T, SubjectId>`; the routing
//! facade normalises both into [`Record<T>`] so callers see one shape.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::{NumericUserId, OwnerKey};

/// Declare a closed string-backed enum with `as_str`, `FromStr` and serde
/// support.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($label:literal) {
            $( $(#[$variant_meta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[doc = concat!("Stored as `", $text, "`.")]
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Stable wire label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::records::UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $text => Ok(Self::$variant), )+
                    other => Err($crate::domain::records::UnknownVariant::new($label, other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod budget;
pub mod conversations;
pub mod debt;
pub mod goals;
pub mod iot;
pub mod learning;
pub mod notifications;
pub mod profiles;
pub mod translation;

/// A stored label did not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    /// Record the enum kind and the offending label.
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Store-assigned row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An owned row as returned by a store.
///
/// Serialises flat: `id`, `userId`, `createdAt` followed by the domain
/// fields in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T, O = OwnerKey> {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Owner key in the store's own representation.
    #[serde(rename = "userId")]
    pub owner: O,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Domain fields.
    #[serde(flatten)]
    pub fields: T,
}

/// A record in canonical shape.
pub type Record<T> = Stored<T, OwnerKey>;

impl<T, O> Stored<T, O> {
    /// Replace the owner representation, keeping every other field.
    pub fn map_owner<P>(self, map: impl FnOnce(O) -> P) -> Stored<T, P> {
        Stored {
            id: self.id,
            owner: map(self.owner),
            created_at: self.created_at,
            fields: self.fields,
        }
    }
}

impl<T, O: Into<OwnerKey>> Stored<T, O> {
    /// Convert the owner key into its canonical form.
    pub fn into_record(self) -> Record<T> {
        self.map_owner(Into::into)
    }
}

/// A creation payload naming the numeric owner it is meant for.
///
/// The owner is honoured only on the privileged path; tenant writes are
/// always stamped with the caller's own subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedDraft<D> {
    /// Supplied owner.
    pub user_id: NumericUserId,
    /// Domain fields of the new record.
    #[serde(flatten)]
    pub draft: D,
}

impl<D> OwnedDraft<D> {
    /// Pair a draft with its supplied owner.
    pub const fn new(user_id: NumericUserId, draft: D) -> Self {
        Self { user_id, draft }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubjectId;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        display_name: String,
    }

    fn stored<O>(owner: O) -> Stored<Sample, O> {
        Stored {
            id: RecordId::new(5),
            owner,
            created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default(),
            fields: Sample {
                display_name: "Rent".to_owned(),
            },
        }
    }

    #[rstest]
    fn records_serialise_flat_with_owner_under_user_id() {
        let record = stored(NumericUserId::new(1).expect("id")).into_record();
        let value = serde_json::to_value(&record).expect("serialise");

        assert_eq!(
            value,
            json!({
                "id": 5,
                "userId": "1",
                "createdAt": "1970-01-01T00:00:00Z",
                "displayName": "Rent",
            })
        );
    }

    #[rstest]
    fn both_owner_representations_share_field_names_and_types() {
        let numeric = serde_json::to_value(stored(NumericUserId::new(1).expect("id")).into_record())
            .expect("serialise");
        let subject =
            serde_json::to_value(stored(SubjectId::new("user-1").expect("subject")).into_record())
                .expect("serialise");

        let keys = |value: &serde_json::Value| {
            value
                .as_object()
                .map(|map| map.keys().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        };
        assert_eq!(keys(&numeric), keys(&subject));
        assert!(numeric["userId"].is_string());
        assert!(subject["userId"].is_string());
    }

    #[rstest]
    fn drafts_accept_flattened_payloads() {
        let draft: OwnedDraft<serde_json::Value> =
            serde_json::from_value(json!({ "userId": 7, "name": "Rent" })).expect("deserialise");
        assert_eq!(draft.user_id.get(), 7);
    }
}
