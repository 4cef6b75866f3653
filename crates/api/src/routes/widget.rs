use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use concierge_widget::{
    icon_names, resolve_chat_url, ColorScheme, PageLocation, SaveError, WidgetConfiguration,
};

use crate::response::{AppError, AppSuccess};
use crate::utils::page_location_from_headers;
use crate::GlobalState;

pub fn widget_routes() -> Router<GlobalState> {
    Router::new()
        .route("/widget/settings",
            get(get_settings)
            .put(edit_settings)
        )
        .route("/widget/settings/load",
            post(load_settings)
        )
        .route("/widget/settings/save",
            post(save_settings)
        )
        .route("/widget/presets",
            get(list_presets)
        )
        .route("/widget/presets/{name}",
            post(apply_preset)
        )
        .route("/widget/icons",
            get(list_icons)
        )
        .route("/widget/embed_code",
            get(embed_code)
        )
}

async fn get_settings(
    State(state): State<GlobalState>,
) -> Result<AppSuccess, AppError> {
    let store = state.widget_store.read().await;
    Ok(AppSuccess::ok(
        "Widget settings fetched successfully",
        json!({
            "settings": store.config(),
            "preset": ColorScheme::matching(store.config()).map(|scheme| scheme.name),
            "is_saving": store.is_saving(),
        }),
    ))
}

async fn edit_settings(
    State(state): State<GlobalState>,
    Json(mut payload): Json<WidgetConfiguration>,
) -> Result<AppSuccess, AppError> {
    payload.normalize();
    let mut store = state.widget_store.write().await;
    store.replace(payload);
    Ok(AppSuccess::ok(
        "Widget settings updated",
        json!(store.config()),
    ))
}

async fn load_settings(
    State(state): State<GlobalState>,
) -> Result<AppSuccess, AppError> {
    let mut store = state.widget_store.write().await;
    let loaded = store.load().await;
    Ok(AppSuccess::ok(
        if loaded { "Widget settings loaded" } else { "Widget settings unavailable, keeping current values" },
        json!({
            "loaded": loaded,
            "settings": store.config(),
        }),
    ))
}

async fn save_settings(
    State(state): State<GlobalState>,
) -> Result<AppSuccess, AppError> {
    let store = state.widget_store.read().await;
    store.save().await.map_err(|e| {
        let status = match e {
            SaveError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SaveError::Backend(_) => StatusCode::BAD_GATEWAY,
        };
        AppError::user_facing(status, e.user_message())
    })?;

    Ok(AppSuccess::ok(
        "Настройки виджета успешно обновлены",
        json!(store.config()),
    ))
}

async fn list_presets() -> Result<AppSuccess, AppError> {
    Ok(AppSuccess::ok(
        "Color schemes fetched successfully",
        json!(ColorScheme::all()),
    ))
}

async fn apply_preset(
    State(state): State<GlobalState>,
    Path(name): Path<String>,
) -> Result<AppSuccess, AppError> {
    let mut store = state.widget_store.write().await;
    store
        .apply_preset(&name)
        .ok_or_else(|| AppError::not_found(format!("Unknown color scheme: {}", name)))?;

    Ok(AppSuccess::ok(
        "Color scheme applied",
        json!(store.config()),
    ))
}

async fn list_icons() -> Result<AppSuccess, AppError> {
    Ok(AppSuccess::ok(
        "Icons fetched successfully",
        json!(icon_names().collect::<Vec<_>>()),
    ))
}

#[derive(Debug, Deserialize)]
struct EmbedCodeQuery {
    page_url: Option<String>,
}

async fn embed_code(
    State(state): State<GlobalState>,
    headers: HeaderMap,
    Query(query): Query<EmbedCodeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let location = match query.page_url.as_deref() {
        Some(page_url) => PageLocation::parse(page_url)?,
        None => page_location_from_headers(&headers)?,
    };

    let store = state.widget_store.read().await;
    let code = store.embed_code(&location);
    tracing::debug!(
        "[/widget/embed_code] generated for {} -> {}",
        location.origin,
        resolve_chat_url(store.config(), &location)
    );

    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        code,
    ))
}
