//! Conversation turns and feedback on the privileged store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{ConversationStore, Owned, PrivilegedAccess, StoreResult};
use crate::domain::records::RecordId;
use crate::domain::records::conversations::{Conversation, ConversationFeedback};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{
    ConversationFeedbackRow, ConversationRow, NewConversationFeedbackRow, NewConversationRow,
};
use super::super::schema::{conversation_feedback, conversations};
use super::{DieselPrivilegedStore, limit_param};

#[async_trait]
impl ConversationStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn insert_conversation(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        conversation: &Conversation,
    ) -> StoreResult<Owned<Conversation, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(conversations::table)
            .values(&NewConversationRow {
                user_id: owner.get(),
                user_message: &conversation.user_message,
                assistant_response: &conversation.assistant_response,
                audio_url: conversation.audio_url.as_deref(),
            })
            .returning(ConversationRow::as_returning())
            .get_result::<ConversationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_conversations(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        limit: u32,
    ) -> StoreResult<Vec<Owned<Conversation, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conversations::table
            .filter(conversations::user_id.eq(owner.get()))
            .order((conversations::created_at.asc(), conversations::id.asc()))
            .limit(limit_param(limit))
            .select(ConversationRow::as_select())
            .load::<ConversationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(ConversationRow::into_record)
            .collect()
    }

    async fn delete_all_conversations(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
    ) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(conversations::table.filter(conversations::user_id.eq(owner.get())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_feedback(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        feedback: &ConversationFeedback,
    ) -> StoreResult<Owned<ConversationFeedback, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(conversation_feedback::table)
            .values(&NewConversationFeedbackRow::new(*owner, feedback))
            .returning(ConversationFeedbackRow::as_returning())
            .get_result::<ConversationFeedbackRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn find_feedback(
        &self,
        _access: &PrivilegedAccess,
        conversation_id: RecordId,
    ) -> StoreResult<Option<Owned<ConversationFeedback, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conversation_feedback::table
            .filter(conversation_feedback::conversation_id.eq(conversation_id.get()))
            .order((
                conversation_feedback::created_at.desc(),
                conversation_feedback::id.desc(),
            ))
            .select(ConversationFeedbackRow::as_select())
            .first::<ConversationFeedbackRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(ConversationFeedbackRow::into_record)
            .transpose()
    }
}
