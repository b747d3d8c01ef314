//! Process-level wiring for the authenticated upload client.
//!
//! One `UploadClient` is built at startup. It owns the single transport and
//! token store, and hands the session's request context to every upload.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::api::ApiClient;
use crate::auth::{KeyringStore, SessionManager, TokenStore};
use crate::config::Config;
use crate::models::{Outcome, SessionInfo, UploadResult};
use crate::upload::{FileRef, UploadManager};

pub struct UploadClient {
    session: SessionManager,
    uploads: UploadManager,
}

impl UploadClient {
    /// Client backed by the OS keychain
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(KeyringStore::new(config.keyring_service.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let api = ApiClient::new(config)?;
        debug!(base_url = api.base_url(), "Upload client configured");

        Ok(Self {
            session: SessionManager::new(api.clone(), store),
            uploads: UploadManager::new(api),
        })
    }

    pub async fn login(
        &self,
        identifier: &str,
        secret: &str,
        remember: bool,
    ) -> Outcome<SessionInfo> {
        self.session.login(identifier, secret, remember).await
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Upload with whatever session is currently stored.
    pub async fn upload(&self, file: &FileRef) -> Outcome<UploadResult> {
        let ctx = self.session.context();
        self.uploads.upload(&ctx, file).await
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn uploads(&self) -> &UploadManager {
        &self.uploads
    }
}
