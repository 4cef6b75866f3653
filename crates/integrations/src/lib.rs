mod error;
mod form;
mod providers;

pub use error::IntegrationError;
pub use form::{CredentialField, CredentialForm, CredentialValues, SuccessRule, VerificationRequest};
pub use providers::{builtin_forms, form_for, telegram, vk, whatsapp};
