//! Example generating QR code links for a merchant

use rust_decimal::Decimal;
use snapscan::{QrCodeOptions, SnapCodeType, SnapScanClient, SnapScanConfig};
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Links are built locally, so any key works here
    let client = SnapScanClient::new(SnapScanConfig::new("demo-key", "demo-merchant"))?;

    let qr = client.get_qr_code(&QrCodeOptions::new()).await?;
    println!("Default code");
    println!("  Pay:   {}", qr.url_link);
    println!("  Image: {}", qr.image_link);

    let options = QrCodeOptions::new()
        .with_id("order-1042")
        .with_amount(Decimal::from_str("149.99")?)
        .with_strict(true)
        .with_snap_code_type(SnapCodeType::Png)
        .with_snap_code_size(300)
        .with_param("plugin", "demo");

    let qr = client.get_qr_code(&options).await?;
    println!("\nFixed-amount order code");
    println!("  Pay:   {}", qr.url_link);
    println!("  Image: {}", qr.image_link);

    match client
        .get_qr_code(&QrCodeOptions::new().with_snap_code_size(1000))
        .await
    {
        Ok(_) => println!("\nUnexpectedly accepted an oversized code"),
        Err(e) => println!("\nRejected oversized code: {}", e),
    }

    Ok(())
}
