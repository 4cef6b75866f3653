use anyhow::anyhow;
use axum::http::{header, HeaderMap, StatusCode};
use concierge_widget::PageLocation;
use tracing_subscriber::EnvFilter;

use crate::response::AppError;

pub const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Where the admin console is being served from, as seen through any
/// reverse proxy in front of us.
pub fn page_location_from_headers(headers: &HeaderMap) -> Result<PageLocation, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::new(StatusCode::BAD_REQUEST, anyhow!("missing host header")))?
        .to_str()?;

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http");

    Ok(PageLocation::from_parts(scheme, host)?)
}

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_location_from_proxy_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("admin.acme.com"));
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("https, http"));

        let location = page_location_from_headers(&headers).unwrap();
        assert_eq!(location.protocol, "https:");
        assert_eq!(location.hostname, "admin.acme.com");
    }

    #[test]
    fn test_location_defaults_to_http() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3033"));

        let location = page_location_from_headers(&headers).unwrap();
        assert_eq!(location.origin, "http://localhost:3033");
    }

    #[test]
    fn test_missing_host_is_rejected() {
        let err = page_location_from_headers(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }
}
