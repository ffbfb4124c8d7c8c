use std::path::PathBuf;

use bingads_bulk_client::config::ClientConfig;

/// Live settings from `secrets.json` next to the crate.
pub fn load_secrets() -> Result<ClientConfig, String> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("secrets.json");
    ClientConfig::load(Some(&path)).map_err(|e| e.to_string())
}
