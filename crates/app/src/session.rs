//! Session State Holder and the channel that feeds it.
//!
//! [`SessionChannel`] is a single-threaded publish/subscribe channel for
//! [`SessionEvent`]s. The holder subscribes once when the app mounts and
//! releases the subscription on teardown; every event replaces the held
//! session in delivery order.

use dioxus::prelude::*;
use shared_types::{ProfileKey, SessionEvent, SessionSnapshot};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::identity::IdentityClient;

type Listener = Rc<dyn Fn(&SessionEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Publish/subscribe channel for session changes.
#[derive(Clone, Default)]
pub struct SessionChannel {
    inner: Rc<RefCell<Listeners>>,
}

impl SessionChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, Rc::new(listener)));
        Subscription {
            channel: Rc::downgrade(&self.inner),
            id,
            active: Cell::new(true),
        }
    }

    /// Deliver `event` to every current subscriber, in subscription order.
    pub fn publish(&self, event: SessionEvent) {
        // Listeners may subscribe or unsubscribe while being called.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        tracing::debug!(kind = ?event.kind, listeners = listeners.len(), "session event");
        for listener in listeners {
            listener(&event);
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// Handle returned by [`SessionChannel::subscribe`]. Dropping it unsubscribes.
pub struct Subscription {
    channel: Weak<RefCell<Listeners>>,
    id: u64,
    active: Cell<bool>,
}

impl Subscription {
    /// Stop receiving events. Returns `true` only on the call that actually
    /// removed the listener.
    pub fn unsubscribe(&self) -> bool {
        if !self.active.replace(false) {
            return false;
        }
        match self.channel.upgrade() {
            Some(inner) => {
                inner.borrow_mut().entries.retain(|(id, _)| *id != self.id);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Reactive session state provided to the router and the shell.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionState {
    pub snapshot: Signal<SessionSnapshot>,
}

impl SessionState {
    pub fn profile_key(&self) -> Option<ProfileKey> {
        self.snapshot.read().profile_key()
    }
}

/// Create the session holder and provide it as context.
///
/// Resolves any existing session once; a failed lookup counts as "no
/// session". There is no timeout: while the lookup is pending the guard
/// keeps showing its loading state.
pub fn use_session_provider(identity: IdentityClient) -> SessionState {
    let mut snapshot = use_signal(SessionSnapshot::initial);

    let subscription = use_hook({
        let identity = identity.clone();
        move || {
            Rc::new(identity.subscribe(move |event| {
                let mut snapshot = snapshot;
                snapshot.write().apply(event);
            }))
        }
    });

    use_drop({
        let subscription = subscription.clone();
        move || {
            subscription.unsubscribe();
        }
    });

    use_future(move || {
        let identity = identity.clone();
        async move {
            let restored = match identity.current_session().await {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(error = %e, "initial session lookup failed");
                    None
                }
            };
            if !snapshot.write().resolve_initial(restored) {
                tracing::debug!("initial session already resolved");
            }
        }
    });

    use_context_provider(|| SessionState { snapshot })
}

pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}
