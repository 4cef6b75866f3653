use anyhow::{anyhow, Result};

pub trait EnvVars: Sized {
    fn load() -> Result<Self>;
    fn get_env_var(&self, key: &str) -> Option<String>;
}

/// Reads `.env` once, if present. Variables already set in the process win.
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!("[env] loaded {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("[env] failed to read .env: {}", e),
    }
}

pub fn required_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("{} is not set", key))
}

pub fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
