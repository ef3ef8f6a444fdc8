//! Request shapes shared by the data endpoints.

use serde::Deserialize;

use crate::domain::NumericUserId;
use crate::domain::records::OwnedDraft;

use super::context::Authenticated;

/// Query string naming the owner to act on.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetQuery {
    /// Supplied owner; the caller's own id when absent.
    pub user_id: Option<NumericUserId>,
}

/// Creation body: the record's fields plus an optional supplied owner.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBody<D> {
    #[serde(default)]
    user_id: Option<NumericUserId>,
    #[serde(flatten)]
    draft: D,
}

impl<D> DraftBody<D> {
    /// Pair the draft with the owner it names, or with the caller.
    pub fn into_owned(self, auth: &Authenticated) -> OwnedDraft<D> {
        OwnedDraft::new(auth.target(self.user_id), self.draft)
    }
}
