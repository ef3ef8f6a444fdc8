//! Conversation turns and feedback on the tenant store.

use async_trait::async_trait;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{ConversationStore, Owned, StoreResult, TenantSession};
use crate::domain::records::RecordId;
use crate::domain::records::conversations::{Conversation, ConversationFeedback};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{ConversationColumns, ConversationFeedbackColumns, InsertDto, RowDto};
use super::tables::{CONVERSATION_FEEDBACK, CONVERSATIONS};

type ConversationRow = RowDto<ConversationColumns>;
type FeedbackRow = RowDto<ConversationFeedbackColumns>;

#[async_trait]
impl ConversationStore<TenantSession> for PostgrestTenantStore {
    async fn insert_conversation(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        conversation: &Conversation,
    ) -> StoreResult<Owned<Conversation, TenantSession>> {
        let body = InsertDto::<ConversationColumns>::new(owner, conversation.clone());
        self.insert::<_, ConversationRow>(session, CONVERSATIONS, &body)
            .await?
            .into_record()
    }

    async fn list_conversations(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        limit: u32,
    ) -> StoreResult<Vec<Owned<Conversation, TenantSession>>> {
        let query = Query::new()
            .owned_by(owner)
            .order("created_at.asc,id.asc")
            .limit(limit);
        self.select::<ConversationRow>(session, CONVERSATIONS, &query)
            .await?
            .into_iter()
            .map(ConversationRow::into_record)
            .collect()
    }

    async fn delete_all_conversations(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
    ) -> StoreResult<()> {
        self.delete(session, CONVERSATIONS, &Query::new().owned_by(owner))
            .await
    }

    async fn insert_feedback(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        feedback: &ConversationFeedback,
    ) -> StoreResult<Owned<ConversationFeedback, TenantSession>> {
        let body = InsertDto::<ConversationFeedbackColumns>::new(owner, feedback.clone());
        self.insert::<_, FeedbackRow>(session, CONVERSATION_FEEDBACK, &body)
            .await?
            .into_record()
    }

    async fn find_feedback(
        &self,
        session: &TenantSession,
        conversation_id: RecordId,
    ) -> StoreResult<Option<Owned<ConversationFeedback, TenantSession>>> {
        let query = Query::new()
            .eq("conversation_id", conversation_id)
            .owned_by(session.subject())
            .order("created_at.desc,id.desc");
        self.select_one::<FeedbackRow>(session, CONVERSATION_FEEDBACK, query)
            .await?
            .map(FeedbackRow::into_record)
            .transpose()
    }
}
