use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use fittrack::config::ApiConfig;
use fittrack::store::MemoryStore;
use fittrack::{HttpApiClient, SessionStore};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn client_for(base_url: &str) -> Arc<HttpApiClient> {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: Some(5),
        ..Default::default()
    };
    Arc::new(HttpApiClient::new(&config).expect("failed to build client"))
}

#[allow(dead_code)]
pub fn memory_session() -> SessionStore {
    SessionStore::new(Arc::new(MemoryStore::new()))
}
