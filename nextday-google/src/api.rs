//! Minimal authenticated JSON client for Google's REST list endpoints.

use nextday_core::raw::ListPage;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ProviderError, ProviderResult};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Build `{base_url}/{segments...}?{query}`, percent-encoding each segment.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> ProviderResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// GET one JSON document.
    pub async fn get(&self, url: Url) -> ProviderResult<Value> {
        let label = url.to_string();
        tracing::debug!(url = %label, "GET");

        let transport = |source| ProviderError::Transport {
            url: label.clone(),
            source,
        };

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                url: label,
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ProviderError::Decode { url: label, source })
    }

    /// GET every page of a list endpoint and return the raw `items`, in order.
    pub async fn list_items(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ProviderResult<Vec<Value>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut page_query = query.to_vec();
            if let Some(token) = page_token.take() {
                page_query.push(("pageToken", token));
            }

            let url = self.url(segments, &page_query)?;
            let label = url.to_string();
            let page: ListPage<Value> = decode(&label, self.get(url).await?)?;

            items.extend(page.items);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }
}

/// Decode a raw JSON value into a typed record.
pub fn decode<T: DeserializeOwned>(url: &str, value: Value) -> ProviderResult<T> {
    serde_json::from_value(value).map_err(|source| ProviderError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Decode every item, failing on the first record with a missing required field.
pub fn decode_items<T: DeserializeOwned>(url: &str, items: Vec<Value>) -> ProviderResult<Vec<T>> {
    items.into_iter().map(|item| decode(url, item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encodes_calendar_ids() {
        let api = ApiClient::new("https://www.googleapis.com/calendar/v3", "t");
        let url = api
            .url(
                &["calendars", "en.usa#holiday@group.v.calendar.google.com", "events"],
                &[("singleEvents", "true".to_string())],
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/en.usa%23holiday@group.v.calendar.google.com/events?singleEvents=true"
        );
    }

    #[test]
    fn test_url_handles_trailing_slash_base() {
        let api = ApiClient::new("http://127.0.0.1:1234/", "t");
        let url = api.url(&["users", "@me", "lists"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1234/users/@me/lists");
    }

    #[test]
    fn test_invalid_base_url() {
        let api = ApiClient::new("not a url", "t");
        assert!(matches!(
            api.url(&["x"], &[]),
            Err(ProviderError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_decode_items_reports_missing_field() {
        let items = vec![serde_json::json!({ "id": "l1" })];
        let result: ProviderResult<Vec<nextday_core::raw::RawTaskList>> =
            decode_items("https://tasks.example/lists", items);

        let err = result.unwrap_err();
        assert!(!err.is_transport());
        assert!(err.to_string().contains("selfLink"));
    }
}
