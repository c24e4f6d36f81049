use crate::Role;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Cache key under which the resolved profile is stored on the client.
pub const PROFILE_CACHE_KEY: &str = "user-profile";

/// Organizational unit (cuartel) an operator belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrgUnit {
    pub id: Uuid,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub codigo: Option<String>,
}

/// Application-level record for an authenticated identity.
///
/// Deserializes straight from a `users` row joined with `cuarteles(*)`;
/// columns not listed here are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: String,
    /// `None` when the stored value is not one of the known roles; such a
    /// profile is treated as unauthorized for all role-gated content.
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    #[serde(default)]
    pub cuartel_id: Option<Uuid>,
    #[serde(default, rename = "cuarteles")]
    pub cuartel: Option<OrgUnit>,
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Role::parse))
}

/// Identifies which session a profile fetch was issued for.
///
/// `generation` is bumped by the session holder on every sign-in, sign-out
/// and initial resolution, so a sign-out/sign-in of the same user still
/// produces a fresh key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileKey {
    pub user_id: Uuid,
    pub generation: u64,
}

/// Single-slot profile cache scoped to one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileCache {
    entry: Option<(ProfileKey, Option<Profile>)>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`. The outer `Option` is a cache miss, the inner
    /// one is "no profile row for this identity".
    pub fn get(&self, key: &ProfileKey) -> Option<&Option<Profile>> {
        match &self.entry {
            Some((k, value)) if k == key => Some(value),
            _ => None,
        }
    }

    /// Store a fetch result issued for `fetched_for`, provided the session
    /// has not moved on since. Returns `false` when the result was stale and
    /// dropped.
    pub fn store(
        &mut self,
        current: Option<ProfileKey>,
        fetched_for: ProfileKey,
        value: Option<Profile>,
    ) -> bool {
        if current != Some(fetched_for) {
            return false;
        }
        self.entry = Some((fetched_for, value));
        true
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// The profile for the current key, if one has been resolved.
    pub fn current(&self, current: Option<ProfileKey>) -> Option<&Profile> {
        let key = current?;
        self.get(&key).and_then(|p| p.as_ref())
    }
}
