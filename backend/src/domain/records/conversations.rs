//! Assistant conversation turns and the feedback users leave on them.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// One user message and the assistant's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// What the user said.
    pub user_message: String,
    /// What the assistant replied.
    pub assistant_response: String,
    /// Synthesised speech for the reply, if any.
    #[serde(default)]
    pub audio_url: Option<String>,
}

string_enum! {
    /// Reaction to one assistant reply.
    pub enum FeedbackType ("feedback type") {
        Like => "like",
        Dislike => "dislike",
        TooSarcastic => "too_sarcastic",
        NotSarcasticEnough => "not_sarcastic_enough",
        Helpful => "helpful",
        Unhelpful => "unhelpful",
    }
}

/// Feedback on a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationFeedback {
    /// Turn the feedback is about.
    pub conversation_id: RecordId,
    /// The reaction.
    pub feedback_type: FeedbackType,
    /// Free-text remark.
    #[serde(default)]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("too_sarcastic", FeedbackType::TooSarcastic)]
    #[case("not_sarcastic_enough", FeedbackType::NotSarcasticEnough)]
    fn feedback_types_use_snake_case_labels(#[case] label: &str, #[case] expected: FeedbackType) {
        let feedback: ConversationFeedback = serde_json::from_value(json!({
            "conversationId": 3,
            "feedbackType": label,
        }))
        .expect("deserialise");

        assert_eq!(feedback.feedback_type, expected);
        assert_eq!(feedback.comment, None);
        assert_eq!(label.parse::<FeedbackType>(), Ok(expected));
    }
}
