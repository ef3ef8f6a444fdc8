//! Conversation adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::conversations::{Conversation, ConversationFeedback};
use crate::domain::records::{OwnedDraft, Record, RecordId};

define_adapter! {
    /// Conversation history and feedback operations for one request.
    ConversationAdapter
}

impl ConversationAdapter {
    delegate_to_facade! {
        fn save_conversation(&self, payload: &OwnedDraft<Conversation>) -> Record<Conversation>;
        /// Oldest first; fifty unless `limit` says otherwise.
        fn get_user_conversations(&self, user_id: NumericUserId, limit: Option<u32>) -> Vec<Record<Conversation>>;
        fn delete_all_user_conversations(&self, user_id: NumericUserId) -> ();
        fn save_conversation_feedback(&self, payload: &OwnedDraft<ConversationFeedback>) -> Record<ConversationFeedback>;
        fn get_conversation_feedback(&self, conversation_id: RecordId) -> Option<Record<ConversationFeedback>>;
    }
}
