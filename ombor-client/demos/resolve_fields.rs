//! Resolve field configuration for one purchase context against a running
//! backend, then print the derived field layout.
//!
//! Usage: cargo run --example resolve_fields -- http://localhost:8080 <token>

use anyhow::{Context, Result};
use ombor_client::{ClientConfig, PricingApi};
use shared::pricing::FieldConfigRequest;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let base_url = args.next().context("usage: resolve_fields <base-url> <token>")?;
    let token = args.next().context("usage: resolve_fields <base-url> <token>")?;

    let http = ClientConfig::new(base_url)
        .with_token(token)
        .build_http_client();
    let pricing = PricingApi::new(http);

    let request = FieldConfigRequest {
        store: 1,
        product: 11,
        currency: 2,
        purchase_unit: 5,
        supplier: 9,
        date_of_arrived: "2025-03-01T10:00:00".to_string(),
    };
    let response = pricing.field_config(&request).await?;

    println!("base currency: {}", response.currency.is_base);
    for (name, spec) in &response.dynamic_fields {
        println!(
            "{name}: editable={} visible={} label={:?}",
            spec.editable, spec.show, spec.label
        );
    }
    Ok(())
}
