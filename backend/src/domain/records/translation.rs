//! Phrasebook entries and their user-defined categories.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A translation the user chose to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTranslation {
    /// Text as entered.
    pub original_text: String,
    /// Text as translated.
    pub translated_text: String,
    /// Language code of the original.
    pub source_language: String,
    /// Language code of the translation.
    pub target_language: String,
    /// Phrasebook folder, if filed.
    #[serde(default)]
    pub category_id: Option<RecordId>,
    /// Starred by the user.
    #[serde(default)]
    pub is_favorite: bool,
    /// Times the entry was reused.
    #[serde(default)]
    pub usage_count: i32,
}

/// Phrasebook folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationCategory {
    /// Display name.
    pub name: String,
    /// Optional icon identifier.
    #[serde(default)]
    pub icon: Option<String>,
}
