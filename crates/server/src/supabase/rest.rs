use serde::de::DeserializeOwned;
use std::fmt::Display;

use super::{error::api_error, read_json, SupabaseClient, SupabaseError};

/// A read against one table of the REST surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            params: Vec::new(),
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params.push(("order".into(), format!("{column}.{dir}")));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".into(), n.to_string()));
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Full request URL below `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        let mut url = format!("{}/rest/v1/{}", base_url, self.table);
        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

/// Total row count from a `Content-Range` header (`0-24/3573`, `*/0`).
/// Returns `None` when the total is unknown (`0-24/*`) or malformed.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}

impl SupabaseClient {
    /// All rows matching `query`.
    #[tracing::instrument(skip(self, access_token), fields(table = query.table_name()))]
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        query: &Query,
        access_token: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let resp = self
            .http()
            .get(query.to_url(self.base_url()))
            .bearer_auth(self.bearer(access_token))
            .send()
            .await?;
        read_json(resp).await
    }

    /// Exactly one row, or `None` when the query matched nothing.
    #[tracing::instrument(skip(self, access_token), fields(table = query.table_name()))]
    pub async fn fetch_single<T: DeserializeOwned>(
        &self,
        query: &Query,
        access_token: Option<&str>,
    ) -> Result<Option<T>, SupabaseError> {
        let resp = self
            .http()
            .get(query.to_url(self.base_url()))
            .bearer_auth(self.bearer(access_token))
            .header("accept", "application/vnd.pgrst.object+json")
            .send()
            .await?;
        // 406 is the REST service's answer to "object requested, no rows".
        if resp.status().as_u16() == 406 {
            return Ok(None);
        }
        read_json(resp).await.map(Some)
    }

    /// Exact number of rows matching `query`, without transferring them.
    #[tracing::instrument(skip(self, access_token), fields(table = query.table_name()))]
    pub async fn count_exact(
        &self,
        query: &Query,
        access_token: Option<&str>,
    ) -> Result<u64, SupabaseError> {
        let resp = self
            .http()
            .head(query.to_url(self.base_url()))
            .bearer_auth(self.bearer(access_token))
            .header("prefer", "count=exact")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), ""));
        }
        let header = resp
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SupabaseError::Decode("missing Content-Range header".into()))?;
        parse_content_range_total(header)
            .ok_or_else(|| SupabaseError::Decode(format!("unusable Content-Range: {header}")))
    }
}
