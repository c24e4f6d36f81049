use dioxus::prelude::*;
use shared_types::{Session, SessionEvent};

use crate::session::{SessionChannel, Subscription};

/// UI-side identity client. Wraps the session server functions and
/// announces every sign-in and sign-out on the session channel.
#[derive(Clone, Default)]
pub struct IdentityClient {
    channel: SessionChannel,
}

impl IdentityClient {
    pub fn new(channel: SessionChannel) -> Self {
        Self { channel }
    }

    /// Session carried by the current cookies, if the backend accepts it.
    pub async fn current_session(&self) -> Result<Option<Session>, ServerFnError> {
        server::api::get_session().await
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + 'static) -> Subscription {
        self.channel.subscribe(listener)
    }

    /// A failed sign-in publishes nothing and leaves the session unchanged.
    pub async fn sign_in(&self, email: String, password: String) -> Result<Session, ServerFnError> {
        let session = server::api::sign_in(email, password).await?;
        self.channel.publish(SessionEvent::signed_in(session.clone()));
        Ok(session)
    }

    /// The local session ends even if the server call fails.
    pub async fn sign_out(&self) -> Result<(), ServerFnError> {
        let result = server::api::sign_out().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "sign-out request failed, clearing local session");
        }
        self.channel.publish(SessionEvent::signed_out());
        result
    }
}

pub fn use_identity() -> IdentityClient {
    use_context::<IdentityClient>()
}
