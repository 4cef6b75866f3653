use anyhow::{anyhow, Result};
use url::Url;

use crate::config::WidgetConfiguration;

const ADMIN_PREFIX: &str = "admin.";

/// The page the embed code is being produced from: the admin console as the
/// operator's browser sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme with its trailing colon, e.g. `https:`.
    pub protocol: String,
    pub hostname: String,
    /// `protocol//host[:port]`
    pub origin: String,
}

impl PageLocation {
    pub fn parse(page_url: &str) -> Result<Self> {
        let url = Url::parse(page_url)?;
        let hostname = url
            .host_str()
            .ok_or_else(|| anyhow!("page url has no host: {}", page_url))?
            .to_string();

        Ok(Self {
            protocol: format!("{}:", url.scheme()),
            hostname,
            origin: url.origin().ascii_serialization(),
        })
    }

    /// Builds a location from a request scheme and `Host` header value (which
    /// may carry a port).
    pub fn from_parts(scheme: &str, host: &str) -> Result<Self> {
        Self::parse(&format!("{}://{}", scheme.trim_end_matches(':'), host))
    }
}

/// Admin consoles live on `admin.<public host>`; the chat itself is served
/// from the public host. Anything else chats on its own origin.
pub fn infer_chat_origin(location: &PageLocation) -> String {
    match location.hostname.strip_prefix(ADMIN_PREFIX) {
        Some(public_host) if !public_host.is_empty() => {
            format!("{}//{}", location.protocol, public_host)
        }
        _ => location.origin.clone(),
    }
}

/// An explicitly configured chat URL always wins over inference.
pub fn resolve_chat_url(config: &WidgetConfiguration, location: &PageLocation) -> String {
    match config.effective_chat_url() {
        Some(url) => url.to_string(),
        None => infer_chat_origin(location),
    }
}
