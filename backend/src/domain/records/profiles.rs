//! Per-user personality profile for the assistant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sarcasm level given to new profiles.
pub const DEFAULT_SARCASM_LEVEL: i16 = 5;

const fn default_sarcasm_level() -> i16 {
    DEFAULT_SARCASM_LEVEL
}

/// How the assistant should talk to one user, learnt from their feedback.
///
/// Each user has at most one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Tone dial from 1 to 10.
    #[serde(default = "default_sarcasm_level")]
    pub sarcasm_level: i16,
    /// Conversation turns so far.
    #[serde(default)]
    pub total_interactions: i32,
    /// Replies the user liked.
    #[serde(default)]
    pub positive_responses: i32,
    /// Replies the user disliked.
    #[serde(default)]
    pub negative_responses: i32,
    /// Mean reply length in characters.
    #[serde(default)]
    pub average_response_length: i32,
    /// Opaque JSON list of topics.
    #[serde(default)]
    pub preferred_topics: Option<String>,
    /// Opaque JSON usage statistics.
    #[serde(default)]
    pub interaction_patterns: Option<String>,
    /// Time of the latest turn.
    #[serde(default)]
    pub last_interaction: Option<DateTime<Utc>>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            sarcasm_level: DEFAULT_SARCASM_LEVEL,
            total_interactions: 0,
            positive_responses: 0,
            negative_responses: 0,
            average_response_length: 0,
            preferred_topics: None,
            interaction_patterns: None,
            last_interaction: None,
        }
    }
}

/// Partial update of a [`UserProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    /// New tone dial.
    pub sarcasm_level: Option<i16>,
    /// New turn count.
    pub total_interactions: Option<i32>,
    /// New liked-reply count.
    pub positive_responses: Option<i32>,
    /// New disliked-reply count.
    pub negative_responses: Option<i32>,
    /// New mean reply length.
    pub average_response_length: Option<i32>,
    /// Replacement topic list.
    pub preferred_topics: Option<String>,
    /// Replacement usage statistics.
    pub interaction_patterns: Option<String>,
    /// Time of the latest turn.
    pub last_interaction: Option<DateTime<Utc>>,
}

impl ProfilePatch {
    /// Apply the patch to an in-memory profile.
    pub fn apply(&self, profile: &mut UserProfile) {
        if let Some(level) = self.sarcasm_level {
            profile.sarcasm_level = level;
        }
        if let Some(total) = self.total_interactions {
            profile.total_interactions = total;
        }
        if let Some(positive) = self.positive_responses {
            profile.positive_responses = positive;
        }
        if let Some(negative) = self.negative_responses {
            profile.negative_responses = negative;
        }
        if let Some(length) = self.average_response_length {
            profile.average_response_length = length;
        }
        if let Some(topics) = &self.preferred_topics {
            profile.preferred_topics = Some(topics.clone());
        }
        if let Some(patterns) = &self.interaction_patterns {
            profile.interaction_patterns = Some(patterns.clone());
        }
        if let Some(at) = self.last_interaction {
            profile.last_interaction = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn empty_payloads_yield_the_default_profile() {
        let profile: UserProfile = serde_json::from_value(json!({})).expect("deserialise");
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.sarcasm_level, DEFAULT_SARCASM_LEVEL);
    }

    #[rstest]
    fn patch_touches_only_named_fields() {
        let mut profile = UserProfile::default();
        ProfilePatch {
            sarcasm_level: Some(9),
            total_interactions: Some(3),
            ..ProfilePatch::default()
        }
        .apply(&mut profile);

        assert_eq!(profile.sarcasm_level, 9);
        assert_eq!(profile.total_interactions, 3);
        assert_eq!(profile.positive_responses, 0);
        assert_eq!(profile.preferred_topics, None);
    }
}
