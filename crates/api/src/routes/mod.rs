mod integrations;
mod misc;
mod widget;

pub use integrations::integration_routes;
pub use misc::misc_routes;
pub use widget::widget_routes;
