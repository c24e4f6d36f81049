use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use shared_types::Session;
use uuid::Uuid;

use super::{read_json, SupabaseClient, SupabaseError};

/// Identity as reported by the auth service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthIdentity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Successful answer of the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    /// Absolute expiry as a unix timestamp, when the service provides it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthIdentity,
}

impl TokenGrant {
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.expires_at
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in))
    }

    /// The client-visible part of this grant.
    pub fn session(&self, now: DateTime<Utc>) -> Session {
        Session {
            user_id: self.user.id,
            email: self.user.email.clone().unwrap_or_default(),
            expires_at: self.expires_at(now),
        }
    }
}

impl SupabaseClient {
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenGrant, SupabaseError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.token_grant("password", &body).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<TokenGrant, SupabaseError> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        self.token_grant("refresh_token", &body).await
    }

    async fn token_grant(
        &self,
        grant_type: &str,
        body: &serde_json::Value,
    ) -> Result<TokenGrant, SupabaseError> {
        let resp = self
            .http()
            .post(self.url("/auth/v1/token"))
            .query(&[("grant_type", grant_type)])
            .json(body)
            .send()
            .await?;
        read_json(resp).await
    }

    /// Identity behind `access_token`. A rejected or expired token yields
    /// `Ok(None)`; transport and server failures are errors.
    #[tracing::instrument(skip_all)]
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthIdentity>, SupabaseError> {
        let resp = self
            .http()
            .get(self.url("/auth/v1/user"))
            .bearer_auth(access_token)
            .send()
            .await?;
        if matches!(resp.status().as_u16(), 401 | 403) {
            return Ok(None);
        }
        read_json(resp).await.map(Some)
    }

    /// Revoke the session upstream. A token the service no longer accepts
    /// counts as already signed out.
    #[tracing::instrument(skip_all)]
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let resp = self
            .http()
            .post(self.url("/auth/v1/logout"))
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() || matches!(status.as_u16(), 401 | 403 | 404) {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(super::error::api_error(status.as_u16(), &body))
    }
}
