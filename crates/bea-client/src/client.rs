//! BEA API client implementation.

use crate::{
    Result,
    config::{API_KEY_ENV, BeaConfig},
    error::BeaError,
    response::{Results, check_for_error, into_results, optional_table, required_table},
    types::{BeaData, BeaMethod, BeaQuery},
};
use polars::prelude::DataFrame;
use reqwest::{Client, Url};
use serde_json::Value;
use std::{env, fmt};
use tracing::{debug, warn};

/// Query keys the client always sets itself.
const RESERVED_KEYS: [&str; 4] = ["UserID", "method", "ResultFormat", "datasetname"];

/// Bureau of Economic Analysis data API client.
///
/// Holds the user ID and an HTTP connection pool; cloning is cheap. Each
/// query issues exactly one GET request and is never retried.
#[derive(Clone)]
pub struct BeaClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl BeaClient {
    /// Create a client for the public BEA endpoint with the given user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the user ID is empty or the HTTP client cannot
    /// be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, BeaConfig::default())
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the user ID is empty, the base URL does not parse
    /// or the HTTP client cannot be built.
    pub fn with_config(api_key: impl Into<String>, config: BeaConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BeaError::MissingApiKey);
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| BeaError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        if config.accept_invalid_certs {
            warn!(
                base_url = %base_url,
                "TLS certificate verification disabled for BEA requests"
            );
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Create a new BEA client from the `BEA_API_TOKEN` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_config(BeaConfig::default())
    }

    /// Like [`from_env`](Self::from_env), with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or empty, or
    /// if the configuration is rejected by [`with_config`](Self::with_config).
    pub fn from_env_with_config(config: BeaConfig) -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var(API_KEY_ENV).map_err(|_| BeaError::MissingApiKey)?;

        Self::with_config(api_key, config)
    }

    /// Build the request URL for a query.
    ///
    /// The query string is `UserID`, `method`, `datasetname` (when set) and
    /// `ResultFormat=JSON`, followed by the query parameters in order.
    /// Values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`BeaError::ReservedParameter`] if a query parameter would
    /// override one of the keys above.
    pub fn url(&self, query: &BeaQuery) -> Result<Url> {
        if let Some((key, _)) = query
            .parameters()
            .iter()
            .find(|(key, _)| RESERVED_KEYS.iter().any(|r| r.eq_ignore_ascii_case(key)))
        {
            return Err(BeaError::ReservedParameter(key.clone()));
        }

        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("UserID", &self.api_key);
            pairs.append_pair("method", query.method().as_str());
            if let Some(dataset) = query.dataset_name() {
                pairs.append_pair("datasetname", dataset);
            }
            pairs.append_pair("ResultFormat", "JSON");
            pairs.extend_pairs(query.parameters());
        }
        Ok(url)
    }

    /// Run a query and return the raw `Results` object.
    ///
    /// The response is checked for an API error before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not JSON, the
    /// response carries an error node or has no `Results` object.
    pub async fn query(&self, query: &BeaQuery) -> Result<Results> {
        let url = self.url(query)?;
        let envelope = self.fetch(url).await?;
        check_for_error(&envelope)?;
        into_results(envelope)
    }

    /// Make a GET request and decode the JSON body.
    async fn fetch(&self, url: Url) -> Result<Value> {
        debug!(url = %redacted(&url), "sending BEA request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "received BEA response");

        if !status.is_success() {
            // Some rejected queries still come back as a BEA error envelope.
            if let Ok(envelope) = serde_json::from_str::<Value>(&text) {
                check_for_error(&envelope)?;
            }
            return Err(BeaError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn list(&self, query: BeaQuery) -> Result<DataFrame> {
        let results = self.query(&query).await?;
        required_table(&results, query.method().result_node())
    }

    /// List the datasets currently offered.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn dataset_list(&self) -> Result<DataFrame> {
        self.list(BeaQuery::new(BeaMethod::DataSetList)).await
    }

    /// List the required and optional parameters of a dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Dataset name (e.g., "Regional")
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn parameter_list(&self, dataset: &str) -> Result<DataFrame> {
        self.list(BeaQuery::new(BeaMethod::ParameterList).dataset(dataset))
            .await
    }

    /// List the valid values of a parameter.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Dataset name (e.g., "IntlServTrade")
    /// * `parameter` - Parameter name (e.g., "TradeDirection")
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn parameter_values(&self, dataset: &str, parameter: &str) -> Result<DataFrame> {
        self.list(
            BeaQuery::new(BeaMethod::ParameterValues)
                .dataset(dataset)
                .param("ParameterName", parameter),
        )
        .await
    }

    /// List the valid values of a parameter given a table name.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Dataset name (e.g., "Regional")
    /// * `target_parameter` - Parameter whose values are listed (e.g., "LineCode")
    /// * `table_name` - Table restricting the values (e.g., "SAINC1")
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn parameter_values_filtered(
        &self,
        dataset: &str,
        target_parameter: &str,
        table_name: &str,
    ) -> Result<DataFrame> {
        self.list(
            BeaQuery::new(BeaMethod::ParameterValuesFiltered)
                .dataset(dataset)
                .param("TargetParameter", target_parameter)
                .param("TableName", table_name),
        )
        .await
    }

    /// Fetch data from a dataset.
    ///
    /// Required and optional parameters depend on the dataset; they are
    /// appended to the query in iteration order.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Dataset name (e.g., "Regional")
    /// * `params` - Dataset parameters (e.g., `[("TableName", "CAINC1"), ("Year", "2014")]`)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, a parameter collides with
    /// a reserved key, or the response has no `Data` node. Missing `Notes`
    /// or `Dimensions` nodes yield empty tables.
    pub async fn get_data<I, K, V>(&self, dataset: &str, params: I) -> Result<BeaData>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let query = BeaQuery::new(BeaMethod::Data)
            .dataset(dataset)
            .params(params);
        let results = self.query(&query).await?;

        Ok(BeaData {
            data: required_table(&results, "Data")?,
            notes: optional_table(&results, "Notes")?,
            dimensions: optional_table(&results, "Dimensions")?,
        })
    }
}

impl fmt::Debug for BeaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeaClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Render a URL with the user ID masked, for logging.
fn redacted(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "UserID" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BeaClient {
        BeaClient::new("test_key").unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = client();
        let url = client
            .url(&BeaQuery::new(BeaMethod::DataSetList))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://apps.bea.gov/api/data?UserID=test_key&method=GetDataSetList&ResultFormat=JSON"
        );

        let url = client
            .url(
                &BeaQuery::new(BeaMethod::ParameterValues)
                    .dataset("IntlServTrade")
                    .param("ParameterName", "TradeDirection"),
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://apps.bea.gov/api/data?UserID=test_key&method=GetParameterValues\
             &datasetname=IntlServTrade&ResultFormat=JSON&ParameterName=TradeDirection"
        );
    }

    #[test]
    fn test_data_url_contains_every_parameter() {
        let query = BeaQuery::new(BeaMethod::Data).dataset("Regional").params([
            ("tablename", "CAINC1"),
            ("linecode", "3"),
            ("geoFIPS", "DE"),
            ("year", "2014"),
        ]);
        let url = client().url(&query).unwrap();
        let url = url.as_str();

        for expected in [
            "datasetname=Regional",
            "tablename=CAINC1",
            "linecode=3",
            "geoFIPS=DE",
            "year=2014",
        ] {
            assert!(url.contains(expected), "{url} lacks {expected}");
        }
        assert!(url.find("tablename").unwrap() < url.find("year").unwrap());
    }

    #[test]
    fn test_different_datasets_give_different_urls() {
        let client = client();
        let a = client
            .url(&BeaQuery::new(BeaMethod::ParameterList).dataset("Regional"))
            .unwrap();
        let b = client
            .url(&BeaQuery::new(BeaMethod::ParameterList).dataset("NIPA"))
            .unwrap();
        assert_ne!(a, b);
        assert!(a.as_str().contains("Regional"));
        assert!(b.as_str().contains("NIPA"));
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let query = BeaQuery::new(BeaMethod::Data)
            .dataset("Regional")
            .param("GeoFips", "DE&Year=ALL");
        let url = client().url(&query).unwrap();
        assert!(url.as_str().contains("GeoFips=DE%26Year%3DALL"));
        let year_keys = url.query_pairs().filter(|(k, _)| k == "Year").count();
        assert_eq!(year_keys, 0);
    }

    #[test]
    fn test_reserved_parameters_are_rejected() {
        let query = BeaQuery::new(BeaMethod::Data)
            .dataset("Regional")
            .param("userid", "someone-else");
        let err = client().url(&query).unwrap_err();
        assert!(matches!(err, BeaError::ReservedParameter(k) if k == "userid"));
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        assert!(matches!(BeaClient::new("  "), Err(BeaError::MissingApiKey)));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = BeaConfig::default().with_base_url("not a url");
        assert!(matches!(
            BeaClient::with_config("key", config),
            Err(BeaError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_debug_omits_api_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("test_key"));
        assert!(rendered.contains("apps.bea.gov"));
    }

    #[test]
    fn test_redacted_hides_user_id() {
        let url = client()
            .url(&BeaQuery::new(BeaMethod::DataSetList))
            .unwrap();
        let masked = redacted(&url);
        assert!(!masked.contains("test_key"));
        assert!(masked.contains("UserID=***") || masked.contains("UserID=%2A%2A%2A"));
        assert!(masked.contains("method=GetDataSetList"));
    }
}
