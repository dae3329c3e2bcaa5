//! Configuration view command: `facility-admin config`.

use anyhow::Result;

use facility_admin::config::{AdminConfig, CONFIG_FILE_NAME};

use super::super::ConfigCommands;

pub fn cmd_config(config: &AdminConfig, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Facility Admin Configuration");
            println!("============================");
            println!();

            match &config.source {
                Some(path) => println!("Config file: {}", path.display()),
                None => println!("No {} found, using defaults", CONFIG_FILE_NAME),
            }
            println!();

            println!("Effective values (with env/CLI overrides):");
            println!("[api]");
            println!("  base_url = \"{}\"", config.api.base_url);
            println!("  timeout_secs = {}", config.api.timeout_secs);
            println!();
            println!("[auth]");
            println!("  username = \"{}\"", config.auth.username);
            println!("  password = \"{}\"", config.masked_password());
            println!();
            println!("[list]");
            println!("  page_size = {}", config.list.page_size);
            println!();
            println!("[logging]");
            println!("  format = \"{}\"", config.logging.format);
            if let Some(filter) = &config.logging.filter {
                println!("  filter = \"{}\"", filter);
            }
            println!("  verbose = {}", config.verbose);
            println!();
        }
    }
    Ok(())
}
