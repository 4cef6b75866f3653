use anyhow::Result;
use concierge_common::{optional_var, EnvVars};
use concierge_widget::SettingsEndpoints;

pub const DEFAULT_PORT: u16 = 3033;

pub struct ApiServerEnv {
    pub port: u16,
    pub settings: SettingsEndpoints,
}

impl EnvVars for ApiServerEnv {
    fn load() -> Result<Self> {
        let port = match optional_var("PORT") {
            Some(port) => port.parse()?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            settings: SettingsEndpoints::load()?,
        })
    }

    fn get_env_var(&self, key: &str) -> Option<String> {
        match key {
            "PORT" => Some(self.port.to_string()),
            _ => self.settings.get_env_var(key),
        }
    }
}
