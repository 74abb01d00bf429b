//! CLI command handlers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use zeit_auth::FileSessionStore;
use zeit_client::ZeitClient;
use zeit_config::ZeitConfig;
use zeit_notify::ConsoleNotifier;

pub mod auth;
pub mod dashboard;
pub mod diagnostics;
pub mod track;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded client configuration.
    pub config: ZeitConfig,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// The session store every command shares.
    pub fn session_store(&self) -> Result<FileSessionStore> {
        let data_dir = zeit_config::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(FileSessionStore::new(&data_dir))
    }

    /// Build the API client against the configured server.
    pub fn client(&self) -> Result<ZeitClient> {
        let store = self.session_store()?;
        let client = ZeitClient::builder()
            .base_url(self.config.server_url.as_str())
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .session_store(Arc::new(store))
            .notifier(Arc::new(ConsoleNotifier::new()))
            .build()?;
        Ok(client)
    }
}
