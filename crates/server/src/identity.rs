//! Identity lookup and profile resolution.
//!
//! [`ProfileResolver`] only depends on the two traits below, so it runs the
//! same against the hosted backend and against in-memory fakes.

use shared_types::Profile;
use std::future::Future;
use uuid::Uuid;

use crate::supabase::{AuthIdentity, Query, SupabaseClient, SupabaseError};

/// Answers "who does this access token belong to".
pub trait IdentityProvider {
    /// `Ok(None)` when the token is not (or no longer) accepted.
    fn current_identity(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Option<AuthIdentity>, SupabaseError>> + Send;
}

/// Relational lookup of the profile row for an identity.
pub trait ProfileStore {
    /// `Ok(None)` when no row matches `identity_id`.
    fn fetch_profile(
        &self,
        access_token: &str,
        identity_id: Uuid,
    ) -> impl Future<Output = Result<Option<Profile>, SupabaseError>> + Send;
}

impl IdentityProvider for SupabaseClient {
    async fn current_identity(&self, access_token: &str) -> Result<Option<AuthIdentity>, SupabaseError> {
        self.get_user(access_token).await
    }
}

/// Profile store backed by the `users` table joined with `cuarteles`.
#[derive(Clone, Debug)]
pub struct PostgrestProfileStore {
    client: SupabaseClient,
}

impl PostgrestProfileStore {
    pub const TABLE: &'static str = "users";
    pub const COLUMNS: &'static str = "*,cuarteles(*)";

    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    pub fn query_for(identity_id: Uuid) -> Query {
        Query::table(Self::TABLE)
            .select(Self::COLUMNS)
            .eq("id", identity_id)
    }
}

impl ProfileStore for PostgrestProfileStore {
    async fn fetch_profile(
        &self,
        access_token: &str,
        identity_id: Uuid,
    ) -> Result<Option<Profile>, SupabaseError> {
        self.client
            .fetch_single(&Self::query_for(identity_id), Some(access_token))
            .await
    }
}

/// Resolves the profile of the caller.
pub struct ProfileResolver<'a, I, S> {
    identity: &'a I,
    store: &'a S,
}

impl<'a, I, S> ProfileResolver<'a, I, S>
where
    I: IdentityProvider + Sync,
    S: ProfileStore + Sync,
{
    pub fn new(identity: &'a I, store: &'a S) -> Self {
        Self { identity, store }
    }

    /// Without a token, or when the token maps to no identity, returns
    /// `Ok(None)` without touching the profile store. A missing profile row
    /// is also `Ok(None)`; any other failure propagates.
    pub async fn resolve(&self, access_token: Option<&str>) -> Result<Option<Profile>, SupabaseError> {
        let Some(token) = access_token else {
            return Ok(None);
        };
        let Some(identity) = self.identity.current_identity(token).await? else {
            tracing::debug!("access token maps to no identity");
            return Ok(None);
        };
        let profile = self.store.fetch_profile(token, identity.id).await?;
        if profile.is_none() {
            tracing::warn!(identity_id = %identity.id, "authenticated identity has no profile row");
        }
        Ok(profile)
    }
}
