//! Example listing payments and cash ups
//!
//! Reads SNAPSCAN_API_KEY and SNAPSCAN_MERCHANT from the environment.

use snapscan::{QueryParams, SnapScanClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = SnapScanClient::from_env()?;
    println!("Using API at {}", client.api_base_url());

    let payments = client
        .get_payments(QueryParams::new().with("page", 1).with("perPage", 10))
        .await?;
    println!("Recent payments:\n{}", serde_json::to_string_pretty(&payments)?);

    // The API reports failures in the body, not through the status code
    if let Some(message) = payments.get("message").and_then(|m| m.as_str()) {
        println!("API reported: {}", message);
        return Ok(());
    }

    let cash_ups = client.get_cash_ups(QueryParams::new()).await?;
    println!("Cash ups:\n{}", serde_json::to_string_pretty(&cash_ups)?);

    if let Some(reference) = cash_ups
        .as_array()
        .and_then(|list| list.first())
        .and_then(|cash_up| cash_up.get("reference"))
        .and_then(|r| r.as_str())
    {
        let settled = client.get_cash_up_payments(reference).await?;
        println!("Payments in cash up {}:\n{}", reference, serde_json::to_string_pretty(&settled)?);
    }

    Ok(())
}
