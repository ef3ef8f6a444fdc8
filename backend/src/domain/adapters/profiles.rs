//! Profile adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::profiles::{ProfilePatch, UserProfile};
use crate::domain::records::{OwnedDraft, Record};

define_adapter! {
    /// Personality profile operations for one request.
    ProfileAdapter
}

impl ProfileAdapter {
    delegate_to_facade! {
        fn get_user_profile(&self, user_id: NumericUserId) -> Option<Record<UserProfile>>;
        fn create_user_profile(&self, payload: &OwnedDraft<UserProfile>) -> Record<UserProfile>;
        fn update_user_profile(&self, user_id: NumericUserId, patch: &ProfilePatch) -> Option<Record<UserProfile>>;
    }
}
