use std::collections::HashMap;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::IntegrationError;

pub type CredentialValues = HashMap<String, String>;

#[derive(Debug, Clone, Serialize)]
pub struct CredentialField {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Rendered as a password input and never echoed back.
    pub secret: bool,
}

/// How a provider signals that the credentials are good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "pointer", rename_all = "snake_case")]
pub enum SuccessRule {
    Status2xx,
    /// The JSON value at the pointer is a non-empty array.
    NonEmptyArray(&'static str),
    /// The JSON value at the pointer is `true`.
    TrueFlag(&'static str),
}

/// A GET request that proves a set of credentials works. Templates use
/// `{field_key}` placeholders; values are URL-encoded when substituted.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationRequest {
    pub base_url: String,
    pub path: Vec<&'static str>,
    pub query: Vec<(&'static str, &'static str)>,
    pub bearer_field: Option<&'static str>,
    pub success: SuccessRule,
    pub error_pointer: Option<&'static str>,
    pub failure_message: &'static str,
}

impl VerificationRequest {
    pub fn url(&self, values: &CredentialValues) -> Result<Url, IntegrationError> {
        let mut url = Url::parse(&self.base_url)?;

        if !self.path.is_empty() {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            segments.pop_if_empty();
            for template in &self.path {
                segments.push(&expand(template, values));
            }
        }

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, template) in &self.query {
                pairs.append_pair(key, &expand(template, values));
            }
        }

        Ok(url)
    }

    fn accepts(&self, status: reqwest::StatusCode, body: Option<&Value>) -> bool {
        match self.success {
            SuccessRule::Status2xx => status.is_success(),
            SuccessRule::NonEmptyArray(pointer) => body
                .and_then(|body| body.pointer(pointer))
                .and_then(Value::as_array)
                .is_some_and(|items| !items.is_empty()),
            SuccessRule::TrueFlag(pointer) => body
                .and_then(|body| body.pointer(pointer))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }

    fn rejection(&self, body: Option<&Value>) -> String {
        self.error_pointer
            .and_then(|pointer| body?.pointer(pointer)?.as_str())
            .map(ToString::to_string)
            .unwrap_or_else(|| self.failure_message.to_string())
    }
}

fn value_of<'a>(values: &'a CredentialValues, key: &str) -> &'a str {
    values.get(key).map(|v| v.trim()).unwrap_or_default()
}

fn expand(template: &str, values: &CredentialValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(value_of(values, &rest[open + 1..open + close]));
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}

/// One messenger integration's credential form: the fields the operator
/// fills in and the request that checks them.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialForm {
    pub kind: &'static str,
    pub title: &'static str,
    pub fields: Vec<CredentialField>,
    pub verification: VerificationRequest,
}

impl CredentialForm {
    /// Points verification at another host, e.g. an egress proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.verification.base_url = base_url.into();
        self
    }

    pub fn validate(&self, values: &CredentialValues) -> Result<(), IntegrationError> {
        let missing: Vec<&'static str> = self
            .fields
            .iter()
            .filter(|field| field.required && value_of(values, field.key).is_empty())
            .map(|field| field.key)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(IntegrationError::MissingFields(missing))
        }
    }

    pub async fn verify(&self, client: &Client, values: &CredentialValues) -> Result<(), IntegrationError> {
        self.validate(values)?;

        let url = self.verification.url(values)?;
        let mut request = client.get(url);
        if let Some(field) = self.verification.bearer_field {
            request = request.bearer_auth(value_of(values, field));
        }

        let response = request.send().await?;
        let status = response.status();
        let body: Option<Value> = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok());

        if self.verification.accepts(status, body.as_ref()) {
            tracing::info!("[CredentialForm] {} credentials verified", self.kind);
            return Ok(());
        }

        let message = self.verification.rejection(body.as_ref());
        tracing::warn!("[CredentialForm] {} verification rejected ({}): {}", self.kind, status, message);
        Err(IntegrationError::Rejected(message))
    }
}
