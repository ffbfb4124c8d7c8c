use std::path::PathBuf;

use bingads_bulk_client::config::ClientConfig;
use bingads_bulk_client::Result;

/// Reads `secrets.json` from the working directory, or the per-user config file when absent.
pub fn load_secrets() -> Result<ClientConfig> {
    let mut path: PathBuf = std::env::current_dir()?;
    path.push("secrets.json");
    if path.exists() {
        ClientConfig::load(Some(&path))
    } else {
        ClientConfig::load(None)
    }
}
