//! Conversation history and feedback operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::ConversationStore;
use crate::domain::records::conversations::{Conversation, ConversationFeedback};
use crate::domain::records::{OwnedDraft, Record, RecordId};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// Append a conversation turn.
    pub async fn save_conversation(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<Conversation>,
    ) -> RoutingResult<Record<Conversation>> {
        route_owned!(self, ctx, "save_conversation", payload.user_id,
            |store, access, owner| store.insert_conversation(access, owner, &payload.draft))
    }

    /// Conversation turns, oldest first.
    pub async fn get_user_conversations(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        limit: Option<u32>,
    ) -> RoutingResult<Vec<Record<Conversation>>> {
        let limit = limit.unwrap_or(super::DEFAULT_HISTORY_LIMIT);
        route_owned!(self, ctx, "get_user_conversations", user_id,
            |store, access, owner| store.list_conversations(access, owner, limit))
    }

    /// Forget every conversation turn.
    pub async fn delete_all_user_conversations(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
    ) -> RoutingResult<()> {
        route_owned!(self, ctx, "delete_all_user_conversations", user_id,
            |store, access, owner| store.delete_all_conversations(access, owner))
    }

    /// Record feedback on a conversation turn.
    pub async fn save_conversation_feedback(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<ConversationFeedback>,
    ) -> RoutingResult<Record<ConversationFeedback>> {
        route_owned!(self, ctx, "save_conversation_feedback", payload.user_id,
            |store, access, owner| store.insert_feedback(access, owner, &payload.draft))
    }

    /// Latest feedback on a turn, `None` when there is none.
    pub async fn get_conversation_feedback(
        &self,
        ctx: &RequestContext,
        conversation_id: RecordId,
    ) -> RoutingResult<Option<Record<ConversationFeedback>>> {
        route_scoped!(self, ctx, "get_conversation_feedback",
            |store, access| store.find_feedback(access, conversation_id))
    }
}
