//! Vocabulary catalogue and per-user review progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

string_enum! {
    /// Catalogue difficulty band.
    pub enum Difficulty ("difficulty") {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

/// Shared catalogue entry. Not owned by any user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    /// Catalogue identifier.
    pub id: RecordId,
    /// Language code of `word`.
    pub language: String,
    /// The word being learnt.
    pub word: String,
    /// Its meaning in the learner's language.
    pub translation: String,
    /// Phonetic hint.
    pub pronunciation: Option<String>,
    /// Grammatical class, e.g. `noun`.
    pub part_of_speech: Option<String>,
    /// Difficulty band.
    pub difficulty: Difficulty,
    /// Topic grouping.
    pub category: Option<String>,
    /// Sample usage.
    pub example_sentence: Option<String>,
}

/// Request to start tracking a catalogue word for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEnrolment {
    /// Catalogue entry to track.
    pub vocabulary_item_id: RecordId,
    /// Language being studied.
    pub language: String,
}

/// A user's progress on one catalogue word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVocabulary {
    /// Catalogue entry being tracked.
    pub vocabulary_item_id: RecordId,
    /// Language being studied.
    pub language: String,
    /// Reviews so far.
    pub times_reviewed: i32,
    /// Reviews answered correctly.
    pub correct_count: i32,
    /// Time of the latest review.
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl UserVocabulary {
    /// Fresh progress for a newly enrolled word.
    #[must_use]
    pub fn enrol(enrolment: &VocabularyEnrolment, at: DateTime<Utc>) -> Self {
        Self {
            vocabulary_item_id: enrolment.vocabulary_item_id,
            language: enrolment.language.clone(),
            times_reviewed: 0,
            correct_count: 0,
            last_reviewed: Some(at),
        }
    }

    /// Count one review, crediting it when answered correctly.
    pub fn apply_review(&mut self, correct: bool, at: DateTime<Utc>) {
        self.times_reviewed = self.times_reviewed.saturating_add(1);
        if correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
        self.last_reviewed = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, 1)]
    #[case(false, 0)]
    fn reviews_count_attempts_and_credit_correct_answers(
        #[case] correct: bool,
        #[case] expected_correct: i32,
    ) {
        let enrolment = VocabularyEnrolment {
            vocabulary_item_id: RecordId::new(9),
            language: "es".to_owned(),
        };
        let now = Utc::now();
        let mut progress = UserVocabulary::enrol(&enrolment, now);

        progress.apply_review(correct, now);

        assert_eq!(progress.times_reviewed, 1);
        assert_eq!(progress.correct_count, expected_correct);
        assert_eq!(progress.last_reviewed, Some(now));
    }
}
