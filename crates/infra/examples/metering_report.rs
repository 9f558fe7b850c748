//! Example: log in and list metering records
//!
//! Reads the client configuration the same way applications do (`.env`,
//! `BAASIC_*` variables, or a `baasic.{json,toml}` file) and logs in with
//! the credentials from `BAASIC_USERNAME` and `BAASIC_PASSWORD`.
//!
//! ```bash
//! export BAASIC_BASE_ADDRESS=https://api.baasic.com/v1
//! export BAASIC_SECURE_BASE_ADDRESS=https://api.baasic.com/v1
//! export BAASIC_APPLICATION_IDENTIFIER=my-app
//! export BAASIC_USERNAME=jdoe BAASIC_PASSWORD=...
//! cargo run -p baasic-infra --example metering_report
//! ```

use std::sync::Arc;

use baasic_common::observability::{init_tracing, LogFormat};
use baasic_infra::{
    config, BaasicClient, CancellationToken, FindParams, MeteringDataClient, TokenClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("baasic_infra=info", LogFormat::Pretty);

    let config = config::load()?;
    let client = Arc::new(BaasicClient::builder().config(config).build()?);
    let tokens = TokenClient::new(Arc::clone(&client));
    let cancel = CancellationToken::new();

    let username = std::env::var("BAASIC_USERNAME")?;
    let password = std::env::var("BAASIC_PASSWORD")?;
    tokens.authenticate(&username, &password, &cancel).await?;

    let metering = MeteringDataClient::new(Arc::clone(&client));
    let page = metering.find(&FindParams::new().rpp(20).sort("dateCreated|desc"), &cancel).await?;

    println!("{} of {} metering records", page.len(), page.total_records);
    for record in &page.item {
        println!("  {:<12} {:<20} {:>10.2}", record.category, record.name, record.value);
    }

    tokens.destroy(&cancel).await?;
    Ok(())
}
