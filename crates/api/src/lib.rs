mod env;
mod global_state;
mod response;
mod routes;
mod utils;

pub use routes::{integration_routes, misc_routes, widget_routes};

pub use env::{ApiServerEnv, DEFAULT_PORT};
pub use global_state::{GlobalState, WidgetStore};
pub use response::{AppError, AppSuccess};
pub use utils::{page_location_from_headers, setup_tracing};
