//! Port for assistant conversation history and feedback.

use async_trait::async_trait;

use crate::domain::records::RecordId;
use crate::domain::records::conversations::{Conversation, ConversationFeedback};

use super::{AccessScope, Owned, StoreResult};

/// Conversation persistence for one access scope.
#[async_trait]
pub trait ConversationStore<S: AccessScope>: Send + Sync {
    /// Append a conversation turn for `owner`.
    async fn insert_conversation(
        &self,
        access: &S,
        owner: &S::Owner,
        conversation: &Conversation,
    ) -> StoreResult<Owned<Conversation, S>>;

    /// Up to `limit` turns owned by `owner`, oldest first.
    async fn list_conversations(
        &self,
        access: &S,
        owner: &S::Owner,
        limit: u32,
    ) -> StoreResult<Vec<Owned<Conversation, S>>>;

    /// Remove every turn owned by `owner`.
    async fn delete_all_conversations(&self, access: &S, owner: &S::Owner) -> StoreResult<()>;

    /// Record feedback left by `owner`.
    async fn insert_feedback(
        &self,
        access: &S,
        owner: &S::Owner,
        feedback: &ConversationFeedback,
    ) -> StoreResult<Owned<ConversationFeedback, S>>;

    /// Latest visible feedback on `conversation_id`.
    async fn find_feedback(
        &self,
        access: &S,
        conversation_id: RecordId,
    ) -> StoreResult<Option<Owned<ConversationFeedback, S>>>;
}
