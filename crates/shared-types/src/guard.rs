use crate::{Access, AppPath, SessionSnapshot};

/// What the router should do for a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Initial session lookup still running; show the neutral loading state.
    Loading,
    Render,
    Redirect(AppPath),
}

/// Stateless route decision, recomputed on every session change or
/// navigation.
///
/// Unauthenticated access to a protected route always goes to `/login`;
/// authenticated access to `/login` always goes to `/`. The originally
/// requested path is not preserved across the login redirect.
pub fn evaluate(snapshot: &SessionSnapshot, target: AppPath) -> GuardDecision {
    if snapshot.loading {
        return GuardDecision::Loading;
    }
    match (target.descriptor().access, snapshot.is_authenticated()) {
        (Access::Authenticated, false) => GuardDecision::Redirect(AppPath::Login),
        (Access::Anonymous, true) => GuardDecision::Redirect(AppPath::Dashboard),
        _ => GuardDecision::Render,
    }
}
