//! PokeAPI client implementation.
//!
//! Every lookup goes through the response cache first. Raw bodies are cached
//! only after a success status and a successful decode, so a cache hit can
//! always be decoded as if freshly fetched.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// HTTP client for the catalog API, backed by a shared response cache.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<TtlCache>,
}

impl PokeApiClient {
    /// Creates a client for `config.api_url` that memoizes into `cache`.
    pub fn new(config: &Config, cache: Arc<TtlCache>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    /// URL of the first location-area page.
    pub fn first_page_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    /// Fetches one page of location areas.
    ///
    /// `page_url` is a `next`/`previous` link from an earlier page, or `None`
    /// for the first page. The URL itself is the cache key.
    #[instrument(skip(self))]
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        let url = page_url
            .map(str::to_string)
            .unwrap_or_else(|| self.first_page_url());
        self.fetch_json(&url, &url, "location page").await
    }

    /// Fetches a single location area with its encounters.
    #[instrument(skip(self))]
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        let key = format!("explore:{}", name);
        self.fetch_json(&key, &url, &format!("location area '{}'", name))
            .await
    }

    /// Fetches a single creature.
    #[instrument(skip(self))]
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        let key = format!("pokemon:{}", name);
        self.fetch_json(&key, &url, &format!("pokemon '{}'", name))
            .await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, key: &str, url: &str, what: &str) -> Result<T> {
        if let Some(body) = self.cache.get(key) {
            debug!(key, "Cache hit");
            return Ok(serde_json::from_slice(&body)?);
        }

        debug!(key, url, "Cache miss, fetching");
        let body = self.fetch_raw(url, what).await?;
        let decoded = serde_json::from_slice(&body)?;
        self.cache.put(key, body);
        Ok(decoded)
    }

    async fn fetch_raw(&self, url: &str, what: &str) -> Result<Bytes> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(PokedexError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PokeApiClient {
        let config = Config::default().with_api_url(&server.uri());
        let cache = Arc::new(TtlCache::new(Duration::from_secs(300)));
        PokeApiClient::new(&config, cache).unwrap()
    }

    fn pikachu() -> serde_json::Value {
        json!({
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "base_experience": 112,
            "stats": [{"base_stat": 35, "stat": {"name": "hp", "url": ""}}],
            "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}]
        })
    }

    #[tokio::test]
    async fn test_pokemon_is_cached_after_first_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pikachu()))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let first = assert_ok!(client.pokemon("pikachu").await);
        let second = assert_ok!(client.pokemon("pikachu").await);

        assert_eq!(first, second);
        assert_eq!(first.base_experience, Some(112));
        assert!(client.cache().get("pokemon:pikachu").is_some());
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/missingno"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .expect(2)
            .mount(&server)
            .await;
        let client = client_for(&server);

        for _ in 0..2 {
            let err = assert_err!(client.pokemon("missingno").await);
            assert!(matches!(err, PokedexError::NotFound(ref what) if what == "pokemon 'missingno'"));
        }
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/location-area/canalave-city-area"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let err = assert_err!(client.location_area("canalave-city-area").await);

        assert!(matches!(
            err,
            PokedexError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
        assert!(client.cache().get("explore:canalave-city-area").is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": "))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let err = assert_err!(client.pokemon("pikachu").await);

        assert!(matches!(err, PokedexError::Decode(_)));
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_location_pages_are_keyed_by_url() {
        let server = MockServer::start().await;
        let next = format!("{}/location-area/?offset=20&limit=20", server.uri());
        Mock::given(method("GET"))
            .and(path("/location-area/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 40,
                "next": next,
                "previous": null,
                "results": [{"name": "canalave-city-area", "url": ""}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let page = assert_ok!(client.location_areas(None).await);
        assert_eq!(page.next.as_deref(), Some(next.as_str()));

        let first_url = client.first_page_url();
        assert!(client.cache().get(&first_url).is_some());

        // Explicitly asking for the same URL is served from the cache.
        assert_ok!(client.location_areas(Some(&first_url)).await);
    }

    #[tokio::test]
    async fn test_location_area_uses_explore_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/location-area/pastoria-city-area"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "pastoria-city-area",
                "pokemon_encounters": [{"pokemon": {"name": "tentacool", "url": ""}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let area = assert_ok!(client.location_area("pastoria-city-area").await);

        assert_eq!(area.pokemon_names().collect::<Vec<_>>(), vec!["tentacool"]);
        assert!(client.cache().get("explore:pastoria-city-area").is_some());
    }
}
