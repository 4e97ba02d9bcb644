use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::core::pair::PairKey;
use crate::core::quotes::{QuoteSource, RateQuote};

/// Client for the RateFinder quote API:
/// `GET /api/currency-pairs` lists `BASE_QUOTE` pair keys and
/// `GET /api/rates/{pair}` lists per-provider quotes for one pair.
pub struct RestQuoteApi {
    base_url: String,
}

impl RestQuoteApi {
    pub fn new(base_url: &str) -> Self {
        RestQuoteApi {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, endpoint: &str, subject: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Requesting {}", url);

        let client = reqwest::Client::builder()
            .user_agent("ratefinder/1.0")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for {} URL: {}", e, subject, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for {}", response.status(), subject));
        }

        Ok(response.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteItem {
    provider: String,
    rate: f64,
    register_link: String,
    #[serde(default)]
    last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

#[async_trait]
impl QuoteSource for RestQuoteApi {
    async fn fetch_pairs(&self) -> Result<Vec<PairKey>> {
        let text = self.get("/api/currency-pairs", "currency pairs").await?;

        let keys: Vec<String> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse currency pair listing: {}", e))?;
        keys.iter().map(|key| key.parse()).collect()
    }

    async fn fetch_quotes(&self, pair: &PairKey) -> Result<Vec<RateQuote>> {
        let endpoint = format!("/api/rates/{pair}");
        let text = self.get(&endpoint, &format!("currency pair: {pair}")).await?;

        let items: Vec<QuoteItem> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse quotes for {}: {}", pair, e))?;

        Ok(items
            .into_iter()
            .map(|item| RateQuote {
                provider: item.provider,
                rate: item.rate,
                register_link: item.register_link,
                last_updated: item.last_updated,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(endpoint: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_pair_listing_fetch() {
        let mock_response = r#"["USD_EUR", "USD_GBP", "EUR_GBP"]"#;
        let mock_server = create_mock_server("/api/currency-pairs", mock_response).await;

        let api = RestQuoteApi::new(&mock_server.uri());
        let pairs = api.fetch_pairs().await.unwrap();
        assert_eq!(
            pairs,
            vec![
                PairKey::new("USD", "EUR"),
                PairKey::new("USD", "GBP"),
                PairKey::new("EUR", "GBP"),
            ]
        );
    }

    #[tokio::test]
    async fn test_pair_listing_with_malformed_key() {
        let mock_response = r#"["USD_EUR", "USDEUR"]"#;
        let mock_server = create_mock_server("/api/currency-pairs", mock_response).await;

        let api = RestQuoteApi::new(&mock_server.uri());
        let result = api.fetch_pairs().await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid currency pair key: USDEUR"
        );
    }

    #[tokio::test]
    async fn test_successful_quote_fetch() {
        let mock_response = r#"[
            {"provider": "Wise", "rate": 0.9230, "register_link": "https://wise.com/", "last_updated": "2024-05-01T10:00:00Z"},
            {"provider": "Revolut", "rate": 0.9255, "register_link": "https://www.revolut.com/"}
        ]"#;
        let mock_server = create_mock_server("/api/rates/USD_EUR", mock_response).await;

        let api = RestQuoteApi::new(&mock_server.uri());
        let quotes = api.fetch_quotes(&PairKey::new("USD", "EUR")).await.unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].provider, "Wise");
        assert_eq!(quotes[0].rate, 0.9230);
        assert_eq!(quotes[0].register_link, "https://wise.com/");
        assert!(quotes[0].last_updated.is_some());
        assert_eq!(quotes[1].provider, "Revolut");
        assert!(quotes[1].last_updated.is_none());
    }

    #[tokio::test]
    async fn test_empty_quote_list() {
        let mock_server = create_mock_server("/api/rates/USD_EUR", "[]").await;

        let api = RestQuoteApi::new(&mock_server.uri());
        let quotes = api.fetch_quotes(&PairKey::new("USD", "EUR")).await.unwrap();
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn test_quote_api_error_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/rates/USD_EUR"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let api = RestQuoteApi::new(&mock_server.uri());
        let result = api.fetch_quotes(&PairKey::new("USD", "EUR")).await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for currency pair: USD_EUR"
        );
    }

    #[tokio::test]
    async fn test_quote_api_malformed_response() {
        let mock_response = r#"{"rates": []}"#; // object instead of array
        let mock_server = create_mock_server("/api/rates/USD_EUR", mock_response).await;

        let api = RestQuoteApi::new(&mock_server.uri());
        let result = api.fetch_quotes(&PairKey::new("USD", "EUR")).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse quotes for USD_EUR")
        );
    }
}
