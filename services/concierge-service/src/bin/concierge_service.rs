use anyhow::Result;
use axum::Router;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use concierge_common::{load_dotenv, EnvVars};
use concierge_service_api::{
    integration_routes, misc_routes, setup_tracing, widget_routes, ApiServerEnv, GlobalState
};

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    setup_tracing();

    let env = ApiServerEnv::load()?;

    let cors = CorsLayer::very_permissive();
    let trace = TraceLayer::new_for_http();

    let global_state = GlobalState::new(&env);

    // Same as the console opening: best effort, defaults stay if the
    // settings endpoint is down.
    global_state.widget_store.write().await.load().await;

    let app = Router::new()
        .merge(misc_routes())
        .merge(widget_routes())
        .merge(integration_routes())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(60)))
        .layer(cors)
        .layer(trace)
        .with_state(global_state);

    let port = env.port;
    let listener = tokio::net::TcpListener::bind(format!(":::{port}")).await?;

    tracing::info!("LISTENING ON {port}");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
