use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use super::cookies::{self, CookieSlot, PendingCookieAction, SessionTokens};
use super::RequestSession;
use crate::supabase;

/// Permissive session middleware.
///
/// On each request:
/// 1. Reads the access token from cookies (or Bearer header fallback)
/// 2. If the access cookie has expired, refreshes using the refresh cookie
/// 3. Inserts a `CookieSlot` so server functions can schedule cookie changes
/// 4. After the handler runs, applies any pending cookie actions to the response
///
/// Does NOT reject anonymous requests; the route guard and server functions
/// decide what an anonymous caller gets.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    let headers = req.headers().clone();
    let mut refresh_outcome: Option<PendingCookieAction> = None;

    if let Some(token) = cookies::extract_access_token(&headers) {
        req.extensions_mut().insert(RequestSession {
            access_token: token,
            expires_at: cookies::extract_expires_at(&headers),
        });
    } else if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
        refresh_outcome = try_transparent_refresh(&refresh_token).await;
        if let Some(PendingCookieAction::Set(tokens)) = &refresh_outcome {
            req.extensions_mut().insert(RequestSession {
                access_token: tokens.access_token.clone(),
                expires_at: Some(tokens.expires_at),
            });
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    // A server function's own action (sign-in / sign-out) overrides the refresh.
    if let Some(action) = cookie_slot.take().or(refresh_outcome) {
        match action {
            PendingCookieAction::Set(tokens) => {
                cookies::set_session_cookies(response.headers_mut(), &tokens);
            }
            PendingCookieAction::Clear => {
                cookies::clear_session_cookies(response.headers_mut());
            }
        }
    }

    response
}

/// Exchange the refresh token for a new session. A refresh token the backend
/// rejects clears the cookies; a transport failure leaves them alone so the
/// next request can retry.
async fn try_transparent_refresh(refresh_token: &str) -> Option<PendingCookieAction> {
    let client = match supabase::client() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "cannot refresh session without backend client");
            return None;
        }
    };

    match client.refresh_session(refresh_token).await {
        Ok(grant) => {
            tracing::debug!(user_id = %grant.user.id, "session refreshed");
            Some(PendingCookieAction::Set(SessionTokens::from_grant(
                &grant,
                Utc::now(),
            )))
        }
        Err(e) if e.is_auth_rejection() => {
            tracing::info!(error = %e, "refresh token rejected, clearing session");
            Some(PendingCookieAction::Clear)
        }
        Err(e) => {
            tracing::warn!(error = %e, "session refresh failed");
            None
        }
    }
}
