use std::future::Future;

use reqwest::{header, StatusCode, Url};
use serde::Deserialize;

/* API contains the logic for calling the remote quote API.
 * Links the bot's logic with the only thing it needs from the internet.
 * Called and used by the magic handler only, through the QuoteSource trait.
 */

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Quote API returned no quotes")]
    EmptyResponse,
}

// A single quote as served by the API. Unknown fields are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Quote {
    pub quote: String,
    pub character: String,
    pub image: String,
}

pub trait QuoteSource {
    /* Fetches one quote.
     * Ok(None) means the API answered with a non-200 status, which is the one
     * failure the bot recovers from.
     */
    fn fetch_quote(&self) -> impl Future<Output = Result<Option<Quote>, ApiError>> + Send;
}

#[derive(Clone, Debug)]
pub struct QuoteClient {
    client: reqwest::Client,
    url: Url,
}

impl QuoteClient {
    pub fn new(url: Url) -> Result<Self, ApiError> {
        let mut h = header::HeaderMap::new();
        h.insert(
            "Accept",
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder().default_headers(h).build()?;
        Ok(QuoteClient { client, url })
    }
}

impl QuoteSource for QuoteClient {
    async fn fetch_quote(&self) -> Result<Option<Quote>, ApiError> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("Quote fetch failed with status {}", status.as_u16());
            return Ok(None);
        }

        let body = response.bytes().await?;
        let quotes: Vec<Quote> = serde_json::from_slice(&body)?;
        match quotes.into_iter().next() {
            Some(quote) => Ok(Some(quote)),
            None => Err(ApiError::EmptyResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, Quote, QuoteClient, QuoteSource};
    use reqwest::Url;

    const HOMER_BODY: &str = r#"[{"quote":"D'oh!","character":"Homer Simpson","image":"http://example.com/homer.png","characterDirection":"Right"},{"quote":"Ay caramba!","character":"Bart Simpson","image":"http://example.com/bart.png"}]"#;

    fn client_for(server: &mockito::Server) -> QuoteClient {
        let url = Url::parse(&format!("{}/quotes", server.url())).unwrap();
        QuoteClient::new(url).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_quote_returns_first_element() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/quotes")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(HOMER_BODY)
            .create_async()
            .await;

        let quote = client_for(&server).fetch_quote().await.unwrap();
        assert_eq!(
            quote,
            Some(Quote {
                quote: "D'oh!".to_string(),
                character: "Homer Simpson".to_string(),
                image: "http://example.com/homer.png".to_string(),
            })
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_quote_too_many_requests() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/quotes")
            .with_status(429)
            .with_body("Too Many Requests")
            .create_async()
            .await;

        let quote = client_for(&server).fetch_quote().await.unwrap();
        assert!(quote.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_quote_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/quotes")
            .with_status(200)
            .with_body(r#"{"quote":"not an array"}"#)
            .create_async()
            .await;

        let fetch = client_for(&server).fetch_quote().await;
        assert!(matches!(fetch, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_quote_empty_array() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/quotes")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let fetch = client_for(&server).fetch_quote().await;
        assert!(matches!(fetch, Err(ApiError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_fetch_quote_repeated_calls_are_independent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/quotes")
            .with_status(200)
            .with_body(HOMER_BODY)
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server);
        let first = client.fetch_quote().await.unwrap();
        let second = client.fetch_quote().await.unwrap();
        assert_eq!(first, second);
        mock.assert_async().await;
    }
}
