use crate::form::{CredentialField, CredentialForm, SuccessRule, VerificationRequest};

const TELEGRAM_API: &str = "https://api.telegram.org";
const WHATSAPP_API: &str = "https://graph.facebook.com";
const VK_API: &str = "https://api.vk.com";

const fn field(key: &'static str, label: &'static str, required: bool, secret: bool) -> CredentialField {
    CredentialField { key, label, required, secret }
}

pub fn telegram() -> CredentialForm {
    CredentialForm {
        kind: "telegram",
        title: "Telegram-бот",
        fields: vec![field("bot_token", "Токен бота", true, true)],
        verification: VerificationRequest {
            base_url: TELEGRAM_API.to_string(),
            path: vec!["bot{bot_token}", "getMe"],
            query: vec![],
            bearer_field: None,
            success: SuccessRule::TrueFlag("/ok"),
            error_pointer: Some("/description"),
            failure_message: "Ошибка проверки токена",
        },
    }
}

pub fn whatsapp() -> CredentialForm {
    CredentialForm {
        kind: "whatsapp",
        title: "WhatsApp-бот",
        fields: vec![
            field("access_token", "Access Token", true, true),
            field("verify_token", "Verify Token", true, true),
            field("phone_number_id", "Phone Number ID", true, false),
        ],
        verification: VerificationRequest {
            base_url: WHATSAPP_API.to_string(),
            path: vec!["v18.0", "{phone_number_id}"],
            query: vec![],
            bearer_field: Some("access_token"),
            success: SuccessRule::Status2xx,
            error_pointer: Some("/error/message"),
            failure_message: "Ошибка проверки токена",
        },
    }
}

pub fn vk() -> CredentialForm {
    CredentialForm {
        kind: "vk",
        title: "VK-бот",
        fields: vec![
            field("group_token", "Токен группы", true, true),
            field("group_id", "ID группы", true, false),
            field("secret_key", "Секретный ключ", false, true),
        ],
        verification: VerificationRequest {
            base_url: VK_API.to_string(),
            path: vec!["method", "groups.getById"],
            query: vec![
                ("group_id", "{group_id}"),
                ("access_token", "{group_token}"),
                ("v", "5.131"),
            ],
            bearer_field: None,
            success: SuccessRule::NonEmptyArray("/response"),
            error_pointer: Some("/error/error_msg"),
            failure_message: "Ошибка проверки токена",
        },
    }
}

pub fn builtin_forms() -> Vec<CredentialForm> {
    vec![telegram(), whatsapp(), vk()]
}

pub fn form_for(kind: &str) -> Option<CredentialForm> {
    match kind {
        "telegram" => Some(telegram()),
        "whatsapp" => Some(whatsapp()),
        "vk" => Some(vk()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CredentialValues, IntegrationError};
    use httpmock::prelude::*;
    use reqwest::Client;
    use serde_json::json;

    fn values(pairs: &[(&str, &str)]) -> CredentialValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_form_lookup() {
        assert_eq!(form_for("vk").map(|f| f.kind), Some("vk"));
        assert!(form_for("max").is_none());
        assert_eq!(builtin_forms().len(), 3);
    }

    #[test]
    fn test_missing_required_fields() {
        let err = whatsapp()
            .validate(&values(&[("access_token", "EAAB"), ("verify_token", "  ")]))
            .unwrap_err();
        match err {
            IntegrationError::MissingFields(missing) => {
                assert_eq!(missing, vec!["verify_token", "phone_number_id"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(vk().validate(&values(&[("group_token", "vk1.a"), ("group_id", "1")])).is_ok());
    }

    #[tokio::test]
    async fn test_vk_verification() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/method/groups.getById")
                    .query_param("group_id", "123456789")
                    .query_param("access_token", "vk1.a.token")
                    .query_param("v", "5.131");
                then.status(200).json_body(json!({ "response": [{ "id": 123456789 }] }));
            })
            .await;

        let form = vk().with_base_url(server.base_url());
        let result = form
            .verify(&Client::new(), &values(&[("group_token", "vk1.a.token"), ("group_id", "123456789")]))
            .await;

        assert!(result.is_ok(), "Expected success, got: {result:?}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_vk_rejection_carries_provider_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/method/groups.getById");
                then.status(200)
                    .json_body(json!({ "error": { "error_code": 5, "error_msg": "User authorization failed" } }));
            })
            .await;

        let form = vk().with_base_url(server.base_url());
        let err = form
            .verify(&Client::new(), &values(&[("group_token", "bad"), ("group_id", "1")]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User authorization failed");
    }

    #[tokio::test]
    async fn test_whatsapp_uses_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v18.0/10987654321")
                    .header("authorization", "Bearer EAAB-token");
                then.status(200).json_body(json!({ "id": "10987654321" }));
            })
            .await;

        let form = whatsapp().with_base_url(server.base_url());
        let result = form
            .verify(
                &Client::new(),
                &values(&[
                    ("access_token", "EAAB-token"),
                    ("verify_token", "hook-secret"),
                    ("phone_number_id", "10987654321"),
                ]),
            )
            .await;

        assert!(result.is_ok(), "Expected success, got: {result:?}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_telegram_unauthorized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/bot123:bad/getMe");
                then.status(401).json_body(json!({ "ok": false, "error_code": 401, "description": "Unauthorized" }));
            })
            .await;

        let form = telegram().with_base_url(server.base_url());
        let err = form
            .verify(&Client::new(), &values(&[("bot_token", "123:bad")]))
            .await
            .unwrap_err();

        assert!(matches!(err, IntegrationError::Rejected(ref message) if message == "Unauthorized"));
    }
}
