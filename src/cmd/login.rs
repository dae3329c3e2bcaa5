//! `facility-admin login`: check that the configured credentials work.

use anyhow::Result;
use console::style;

use facility_admin::config::AdminConfig;

use super::common::signed_in_client;

pub async fn cmd_login(config: &AdminConfig) -> Result<()> {
    let client = signed_in_client(config).await?;
    println!(
        "{} Signed in to {} as {}",
        style("✓").green(),
        config.api.base_url,
        style(&config.auth.username).cyan()
    );
    client.sign_out();
    Ok(())
}
