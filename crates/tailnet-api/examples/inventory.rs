//! Print a device and user inventory for a tailnet.
//!
//! ```text
//! TAILSCALE_API_KEY=tskey-api-... TAILSCALE_TAILNET=example.com \
//!     cargo run -p tailnet-api --example inventory
//! ```

use anyhow::{Context, Result};
use tailnet_api::{ClientConfig, DeviceFields, TailscaleClient};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api_key = std::env::var("TAILSCALE_API_KEY").context("TAILSCALE_API_KEY is not set")?;
    let mut config = ClientConfig::new(api_key).with_timeout(30);
    if let Ok(tailnet) = std::env::var("TAILSCALE_TAILNET") {
        config = config.with_tailnet(tailnet);
    }

    let client = TailscaleClient::from_config(config).context("building Tailscale client")?;
    info!(tailnet = client.tailnet(), "fetching inventory");

    let devices = client
        .list_devices(DeviceFields::All)
        .await
        .context("listing devices")?;
    println!("{} devices", devices.len());
    for device in &devices {
        let tags = device.tags.as_deref().unwrap_or_default().join(",");
        let status = if device.authorized { "authorized" } else { "pending" };
        println!(
            "  {:<32} {:<8} {:<10} {}",
            device.name, device.os, status, tags
        );
        if device.update_available == Some(true) {
            warn!(device = %device.name, "client update available");
        }
    }

    let users = client.list_users().await.context("listing users")?;
    println!("{} users", users.len());
    for user in &users {
        println!(
            "  {:<32} {:<12} devices={}",
            user.login_name,
            user.role.as_deref().unwrap_or("-"),
            user.device_count.unwrap_or(0)
        );
    }

    let dns = client.get_dns_config().await.context("reading DNS")?;
    println!(
        "MagicDNS {}; nameservers: {}",
        if dns.magic_dns { "on" } else { "off" },
        dns.nameservers.join(", ")
    );

    Ok(())
}
