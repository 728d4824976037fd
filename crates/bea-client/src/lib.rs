//! Bureau of Economic Analysis (BEA) data API client.
//!
//! This crate provides a client for the [BEA data API](https://apps.bea.gov/api/).
//! Every query is a single GET request; the JSON response is checked for an
//! embedded error payload and its record nodes are returned as polars
//! `DataFrame`s with one text column per record attribute.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bea_client::BeaClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BeaClient::from_env()?;
//!
//!     // Datasets offered by the API
//!     let datasets = client.dataset_list().await?;
//!
//!     // Valid line codes for a Regional table
//!     let lines = client
//!         .parameter_values_filtered("Regional", "LineCode", "SAINC1")
//!         .await?;
//!
//!     // Per capita personal income for Delaware counties, 2014
//!     let result = client
//!         .get_data(
//!             "Regional",
//!             [("TableName", "CAINC1"), ("LineCode", "3"), ("GeoFIPS", "DE"), ("Year", "2014")],
//!         )
//!         .await?;
//!     println!("{}", result.data);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `BEA_API_TOKEN` in your environment or `.env` file:
//!
//! ```bash
//! BEA_API_TOKEN=your-36-character-user-id
//! ```

mod client;
mod config;
mod error;
mod response;
mod table;
mod types;

pub use client::BeaClient;
pub use config::{API_KEY_ENV, BeaConfig, DEFAULT_BASE_URL};
pub use error::BeaError;
pub use response::Results;
pub use types::*;

/// Result type for BEA operations.
pub type Result<T> = std::result::Result<T, BeaError>;
