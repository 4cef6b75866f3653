use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use concierge_common::{optional_var, required_var, EnvVars};
use reqwest::Client;

use crate::config::WidgetConfiguration;
use crate::embed::generate;
use crate::error::{SaveError, SettingsError};
use crate::location::PageLocation;
use crate::presets::ColorScheme;

/// Where a tenant's widget settings are read from and written to.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn fetch(&self) -> Result<WidgetConfiguration, SettingsError>;
    async fn store(&self, config: &WidgetConfiguration) -> Result<(), SettingsError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEndpoints {
    pub read_url: String,
    pub write_url: String,
}

impl EnvVars for SettingsEndpoints {
    fn load() -> Result<Self> {
        let read_url = required_var("WIDGET_SETTINGS_URL")?;
        let write_url = optional_var("WIDGET_SETTINGS_UPDATE_URL").unwrap_or_else(|| read_url.clone());
        Ok(Self { read_url, write_url })
    }

    fn get_env_var(&self, key: &str) -> Option<String> {
        match key {
            "WIDGET_SETTINGS_URL" => Some(self.read_url.clone()),
            "WIDGET_SETTINGS_UPDATE_URL" => Some(self.write_url.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpSettingsBackend {
    client: Client,
    endpoints: SettingsEndpoints,
}

impl HttpSettingsBackend {
    pub fn new(client: Client, endpoints: SettingsEndpoints) -> Self {
        Self { client, endpoints }
    }

}

/// Pulls the `error` field out of a failed response body, if there is one.
async fn error_message(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let value: serde_json::Value = serde_json::from_str(&body).ok()?;
    value.get("error")?.as_str().map(ToString::to_string)
}

#[async_trait]
impl SettingsBackend for HttpSettingsBackend {
    async fn fetch(&self) -> Result<WidgetConfiguration, SettingsError> {
        let response = self.client.get(&self.endpoints.read_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SettingsError::Status {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn store(&self, config: &WidgetConfiguration) -> Result<(), SettingsError> {
        let response = self
            .client
            .post(&self.endpoints.write_url)
            .json(config)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(SettingsError::Status {
            status: status.as_u16(),
            message: error_message(response).await,
        })
    }
}

/// Counts one in-flight save; released on drop, so a cancelled save
/// doesn't leave the store marked busy.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The editable copy of one tenant's widget configuration.
///
/// Loading is best effort: failures are logged and the current state is
/// kept, so the operator can keep editing with the backend down. Saving
/// reports failures and never discards local edits.
pub struct WidgetSettingsStore<B> {
    backend: B,
    config: WidgetConfiguration,
    saves_in_flight: AtomicUsize,
}

impl<B: SettingsBackend> WidgetSettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, WidgetConfiguration::default())
    }

    pub fn with_config(backend: B, config: WidgetConfiguration) -> Self {
        Self {
            backend,
            config,
            saves_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &WidgetConfiguration {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WidgetConfiguration {
        &mut self.config
    }

    pub fn replace(&mut self, config: WidgetConfiguration) {
        self.config = config;
    }

    /// Returns `true` when the fetched configuration was adopted.
    pub async fn load(&mut self) -> bool {
        match self.backend.fetch().await {
            Ok(mut config) => {
                config.normalize();
                self.config = config;
                tracing::debug!("[WidgetSettingsStore] loaded widget settings");
                true
            }
            Err(e) => {
                tracing::warn!("[WidgetSettingsStore] failed to load widget settings, keeping current state: {}", e);
                false
            }
        }
    }

    pub async fn save(&self) -> Result<(), SaveError> {
        self.config.validate().map_err(SaveError::Invalid)?;

        let result = {
            let _in_flight = InFlight::enter(&self.saves_in_flight);
            self.backend.store(&self.config).await
        };

        match result {
            Ok(()) => {
                tracing::info!("[WidgetSettingsStore] widget settings saved");
                Ok(())
            }
            Err(e) => {
                tracing::error!("[WidgetSettingsStore] failed to save widget settings: {}", e);
                Err(e.into())
            }
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saves_in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn apply_preset(&mut self, name: &str) -> Option<&'static ColorScheme> {
        let scheme = ColorScheme::from_name(name)?;
        scheme.apply(&mut self.config);
        Some(scheme)
    }

    pub fn embed_code(&self, location: &PageLocation) -> String {
        generate(&self.config, location)
    }
}
