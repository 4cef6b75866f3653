use std::sync::Arc;

use concierge_widget::{HttpSettingsBackend, WidgetSettingsStore};
use reqwest::Client;
use tokio::sync::RwLock;

use crate::env::ApiServerEnv;

pub type WidgetStore = WidgetSettingsStore<HttpSettingsBackend>;

#[derive(Clone)]
pub struct GlobalState {
    pub widget_store: Arc<RwLock<WidgetStore>>,
    pub http_client: Client,
}

impl GlobalState {
    pub fn new(env: &ApiServerEnv) -> Self {
        let http_client = Client::new();
        let backend = HttpSettingsBackend::new(http_client.clone(), env.settings.clone());
        Self::with_store(WidgetSettingsStore::new(backend), http_client)
    }

    pub fn with_store(store: WidgetStore, http_client: Client) -> Self {
        Self {
            widget_store: Arc::new(RwLock::new(store)),
            http_client,
        }
    }
}
