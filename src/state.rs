use std::sync::Arc;

use reqwest::Client;

use crate::catalog::{self, Question};
use crate::config::Config;
use crate::error::SubmitError;
use crate::notify::dispatcher::ProviderDispatcher;
use crate::storage::supabase::SupabaseGateway;

pub struct AppState {
    pub config: Config,
    pub catalog: Vec<Question>,
    pub http: Client,
}

impl AppState {
    pub fn new() -> Result<Arc<Self>, String> {
        let config = Config::load();
        let catalog = catalog::load()?;
        Ok(Arc::new(Self {
            config,
            catalog,
            http: Client::new(),
        }))
    }

    pub fn dispatcher(&self) -> ProviderDispatcher {
        ProviderDispatcher::new(self.http.clone(), self.config.clone())
    }

    pub fn gateway(&self) -> Result<SupabaseGateway, SubmitError> {
        SupabaseGateway::from_config(self.http.clone(), &self.config)
    }
}
