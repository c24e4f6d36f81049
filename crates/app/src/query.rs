//! Profile query: fetches the caller's profile once per session generation.

use dioxus::prelude::*;
use dioxus_primitives::toast::use_toast;
use shared_types::{Profile, ProfileCache, Role, PROFILE_CACHE_KEY};
use std::future::Future;

use crate::notify;
use crate::session::SessionState;

/// Run `op`, retrying up to `retries` more times on failure.
pub async fn with_retries<T, E, F, Fut>(retries: u32, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < retries => {
                attempt += 1;
                tracing::warn!(attempt, error = %e, "query failed, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Profile of the current session, as seen by the shell and the screens.
#[derive(Clone, Copy, PartialEq)]
pub struct ProfileState {
    session: SessionState,
    cache: Signal<ProfileCache>,
}

impl ProfileState {
    pub fn profile(&self) -> Option<Profile> {
        let key = self.session.profile_key();
        self.cache.read().current(key).cloned()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile().and_then(|p| p.role)
    }

    /// True once the lookup for the current session has finished, whether
    /// it found a profile or not.
    pub fn is_settled(&self) -> bool {
        match self.session.profile_key() {
            Some(key) => self.cache.read().get(&key).is_some(),
            None => false,
        }
    }
}

/// Keep the profile cache in step with the session and provide it as context.
///
/// Each fetch is tagged with the session key it was issued for; a result that
/// arrives after the session changed is dropped. A failed lookup is shown as
/// a toast and cached as "no profile", so navigation stays empty.
pub fn use_profile_provider(session: SessionState, retries: u32) -> ProfileState {
    let mut cache = use_signal(ProfileCache::new);
    let toast = use_toast();

    use_effect(move || {
        let Some(key) = session.profile_key() else {
            cache.write().invalidate();
            return;
        };
        if cache.peek().get(&key).is_some() {
            return;
        }

        spawn(async move {
            let result = with_retries(retries, server::api::get_user_profile).await;
            let current = session.snapshot.peek().profile_key();
            let value = match result {
                Ok(profile) => profile,
                Err(e) => {
                    if current == Some(key) {
                        notify::failure(toast, &e, notify::PROFILE_FAILED);
                    }
                    None
                }
            };
            if !cache.write().store(current, key, value) {
                tracing::debug!(cache = PROFILE_CACHE_KEY, ?key, "discarding profile for a previous session");
            }
        });
    });

    use_context_provider(|| ProfileState { session, cache })
}

pub fn use_profile() -> ProfileState {
    use_context::<ProfileState>()
}
