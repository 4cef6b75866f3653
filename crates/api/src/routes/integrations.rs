use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use concierge_integrations::{builtin_forms, form_for, CredentialValues, IntegrationError};

use crate::response::{AppError, AppSuccess};
use crate::GlobalState;

pub fn integration_routes() -> Router<GlobalState> {
    Router::new()
        .route("/integrations",
            get(list_integrations)
        )
        .route("/integrations/{kind}/verify",
            post(verify_credentials)
        )
}

async fn list_integrations() -> Result<AppSuccess, AppError> {
    Ok(AppSuccess::ok(
        "Integrations fetched successfully",
        json!(builtin_forms()),
    ))
}

async fn verify_credentials(
    State(state): State<GlobalState>,
    Path(kind): Path<String>,
    Json(values): Json<CredentialValues>,
) -> Result<AppSuccess, AppError> {
    let form = form_for(&kind)
        .ok_or_else(|| AppError::not_found(format!("Unknown integration: {}", kind)))?;

    form.verify(&state.http_client, &values).await.map_err(|e| {
        let status = match e {
            IntegrationError::MissingFields(_) => StatusCode::BAD_REQUEST,
            IntegrationError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            IntegrationError::Transport(_) => StatusCode::BAD_GATEWAY,
            IntegrationError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError::user_facing(status, e.to_string())
    })?;

    Ok(AppSuccess::ok(
        &format!("{} подключен и готов к работе", form.title),
        json!({ "kind": form.kind, "status": "active" }),
    ))
}
