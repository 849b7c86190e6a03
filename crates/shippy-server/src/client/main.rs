//! Command-line client that submits a consignment manifest from a JSON file.
//!
//! ```bash
//! cargo run --bin shippy-cli -- --file demos/consignment.json
//! ```

use anyhow::Context;
use clap::Parser;
use shippy_core::proto::{Consignment, shipping_service_client::ShippingServiceClient};
use std::path::{Path, PathBuf};
use tonic::codec::CompressionEncoding;

#[derive(Parser, Debug)]
#[command(
    name = "shippy-cli",
    version,
    about = "Submit a consignment to a shippy server"
)]
struct CliArgs {
    /// Path to a JSON-encoded consignment.
    #[arg(short, long, default_value = "consignment.json")]
    file: PathBuf,

    /// Server endpoint to connect to.
    ///
    /// Environment variable: `SHIPPY_SERVER`
    #[arg(long, env = "SHIPPY_SERVER", default_value_t = String::from("http://127.0.0.1:50051"))]
    server_addr: String,

    /// Compress the request with zstd.
    #[arg(long, default_value_t = false)]
    compress: bool,
}

async fn parse_file(path: &Path) -> anyhow::Result<Consignment> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid consignment in {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    let consignment = parse_file(&args.file).await?;

    let mut client = ShippingServiceClient::connect(args.server_addr.clone())
        .await
        .with_context(|| format!("could not connect to {}", args.server_addr))?
        .accept_compressed(CompressionEncoding::Zstd);
    if args.compress {
        client = client.send_compressed(CompressionEncoding::Zstd);
    }

    let response = client
        .create_consignment(consignment)
        .await
        .context("CreateConsignment failed")?
        .into_inner();

    println!("Created: {}", response.created);
    if let Some(stored) = response.consignment {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    }
    Ok(())
}
