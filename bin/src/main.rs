//! BEA CLI binary.
//!
//! Provides a command-line interface to the BEA data API.

mod cmd;
mod params;

use anyhow::{Context, Result};
use bea_client::{BeaClient, BeaConfig, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};
use cmd::{data::show_data, list::show_list};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bea")]
#[command(about = "Query the Bureau of Economic Analysis data API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API endpoint
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List available datasets
    Datasets,

    /// List the parameters of a dataset
    Parameters {
        /// Dataset name (e.g. Regional)
        dataset: String,
    },

    /// List the valid values of a parameter
    Values {
        /// Dataset name (e.g. IntlServTrade)
        dataset: String,

        /// Parameter name (e.g. TradeDirection)
        parameter: String,
    },

    /// List the valid values of a parameter for one table
    Filtered {
        /// Dataset name (e.g. Regional)
        dataset: String,

        /// Parameter whose values are listed (e.g. LineCode)
        target: String,

        /// Table name (e.g. SAINC1)
        table: String,
    },

    /// Fetch data
    Data {
        /// Dataset name (e.g. Regional)
        dataset: String,

        /// Dataset parameters as KEY=VALUE (e.g. TableName=CAINC1 Year=2014)
        #[arg(value_parser = params::parse_key_value)]
        params: Vec<(String, String)>,

        /// Also print notes and dimensions
        #[arg(short, long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = BeaConfig::default()
        .with_base_url(cli.base_url)
        .with_timeout_secs(cli.timeout)
        .with_accept_invalid_certs(cli.insecure);
    let client = BeaClient::from_env_with_config(config).context("failed to create BEA client")?;

    match cli.command {
        Commands::Datasets => {
            let table = client.dataset_list().await?;
            show_list("Datasets", &table);
        }
        Commands::Parameters { dataset } => {
            let table = client.parameter_list(&dataset).await?;
            show_list(&format!("Parameters of {dataset}"), &table);
        }
        Commands::Values { dataset, parameter } => {
            let table = client.parameter_values(&dataset, &parameter).await?;
            show_list(&format!("Values of {dataset}/{parameter}"), &table);
        }
        Commands::Filtered {
            dataset,
            target,
            table,
        } => {
            let values = client
                .parameter_values_filtered(&dataset, &target, &table)
                .await?;
            show_list(&format!("Values of {dataset}/{target} for {table}"), &values);
        }
        Commands::Data {
            dataset,
            params,
            all,
        } => {
            let result = client.get_data(&dataset, params).await?;
            show_data(&dataset, &result, all);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bea_client=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
