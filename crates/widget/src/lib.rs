mod config;
mod embed;
mod error;
mod icons;
mod location;
mod presets;
mod store;

pub use config::{
    ButtonPosition, WidgetConfiguration,
    BORDER_RADIUS_BOUNDS, BUTTON_SIZE_BOUNDS, WINDOW_HEIGHT_BOUNDS, WINDOW_WIDTH_BOUNDS,
};
pub use embed::generate;
pub use error::{ConfigError, SaveError, SettingsError};
pub use icons::{icon_markup, icon_names, is_known, DEFAULT_ICON};
pub use location::{infer_chat_origin, resolve_chat_url, PageLocation};
pub use presets::{ColorScheme, COLOR_SCHEMES};
pub use store::{HttpSettingsBackend, SettingsBackend, SettingsEndpoints, WidgetSettingsStore};
