//! Per-request, per-domain data adapters.
//!
//! An [`Adapters`] bundle is built once per request from the routing facade
//! and the resolved [`RequestContext`]. Each adapter exposes the facade's
//! operations for one domain with the context already bound, so business
//! logic never sees roles or backends. Construction performs no I/O.

use std::sync::Arc;

use super::context::RequestContext;
use super::routing::RoutingFacade;

/// Generate context-bound pass-through methods onto the routing facade.
macro_rules! delegate_to_facade {
    (
        $(
            $(#[$meta:meta])*
            fn $name:ident(&self $(, $arg:ident : $ty:ty)* $(,)?) -> $ret:ty;
        )+
    ) => {
        $(
            #[doc = concat!(
                "Calls [`RoutingFacade::", stringify!($name),
                "`](crate::domain::routing::RoutingFacade::", stringify!($name),
                ") with the bound context."
            )]
            #[doc = ""]
            $(#[$meta])*
            pub async fn $name(&self $(, $arg: $ty)*) -> $crate::domain::routing::RoutingResult<$ret> {
                self.facade.$name(&self.ctx $(, $arg)*).await
            }
        )+
    };
}

/// Declare an adapter struct bound to one facade and context.
macro_rules! define_adapter {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            facade: $crate::domain::routing::RoutingFacade,
            ctx: ::std::sync::Arc<$crate::domain::context::RequestContext>,
        }

        impl $name {
            /// Bind the facade to a request context.
            #[must_use]
            pub fn new(
                facade: $crate::domain::routing::RoutingFacade,
                ctx: ::std::sync::Arc<$crate::domain::context::RequestContext>,
            ) -> Self {
                Self { facade, ctx }
            }

            /// Context this adapter is bound to.
            #[must_use]
            pub fn context(&self) -> &$crate::domain::context::RequestContext {
                &self.ctx
            }
        }
    };
}

mod budget;
mod conversations;
mod debt;
mod goals;
mod iot;
mod learning;
mod notifications;
mod profiles;
mod translation;

pub use budget::BudgetAdapter;
pub use conversations::ConversationAdapter;
pub use debt::DebtAdapter;
pub use goals::GoalsAdapter;
pub use iot::IoTAdapter;
pub use learning::LearningAdapter;
pub use notifications::NotificationAdapter;
pub use profiles::ProfileAdapter;
pub use translation::TranslationAdapter;

/// Every domain adapter for one request.
#[derive(Debug, Clone)]
pub struct Adapters {
    /// Categories, transactions and monthly snapshots.
    pub budget: BudgetAdapter,
    /// Debts and their payments.
    pub debt: DebtAdapter,
    /// Financial goals and progress history.
    pub goals: GoalsAdapter,
    /// Vocabulary catalogue and per-user progress.
    pub learning: LearningAdapter,
    /// Saved translations and their categories.
    pub translation: TranslationAdapter,
    /// In-app notifications.
    pub notifications: NotificationAdapter,
    /// Conversation history and feedback.
    pub conversations: ConversationAdapter,
    /// Smart-home devices and their command log.
    pub iot: IoTAdapter,
    /// Assistant personality profile.
    pub profiles: ProfileAdapter,
}

impl Adapters {
    /// Bind every adapter to `ctx`.
    ///
    /// # Examples
    /// ```ignore
    /// let adapters = Adapters::for_context(&facade, ctx);
    /// let goals = adapters.goals.get_user_goals(user_id).await?;
    /// ```
    #[must_use]
    pub fn for_context(facade: &RoutingFacade, ctx: RequestContext) -> Self {
        let ctx = Arc::new(ctx);
        Self {
            budget: BudgetAdapter::new(facade.clone(), Arc::clone(&ctx)),
            debt: DebtAdapter::new(facade.clone(), Arc::clone(&ctx)),
            goals: GoalsAdapter::new(facade.clone(), Arc::clone(&ctx)),
            learning: LearningAdapter::new(facade.clone(), Arc::clone(&ctx)),
            translation: TranslationAdapter::new(facade.clone(), Arc::clone(&ctx)),
            notifications: NotificationAdapter::new(facade.clone(), Arc::clone(&ctx)),
            conversations: ConversationAdapter::new(facade.clone(), Arc::clone(&ctx)),
            iot: IoTAdapter::new(facade.clone(), Arc::clone(&ctx)),
            profiles: ProfileAdapter::new(facade.clone(), ctx),
        }
    }

    /// The request context every adapter shares.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        self.budget.context()
    }
}
