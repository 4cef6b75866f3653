use serde::Serialize;

use crate::config::WidgetConfiguration;

/// A coordinated gradient pair for the launcher button and the chat header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    pub name: &'static str,
    pub label: &'static str,
    pub button_color: &'static str,
    pub button_color_end: &'static str,
    pub header_color: &'static str,
    pub header_color_end: &'static str,
}

const fn scheme(name: &'static str, label: &'static str, start: &'static str, end: &'static str) -> ColorScheme {
    ColorScheme {
        name,
        label,
        button_color: start,
        button_color_end: end,
        header_color: start,
        header_color_end: end,
    }
}

pub static COLOR_SCHEMES: [ColorScheme; 6] = [
    scheme("blue", "Синяя", "#3b82f6", "#1d4ed8"),
    scheme("purple", "Фиолетовая", "#667eea", "#764ba2"),
    scheme("green", "Зелёная", "#10b981", "#059669"),
    scheme("orange", "Оранжевая", "#f97316", "#ea580c"),
    scheme("pink", "Розовая", "#ec4899", "#db2777"),
    scheme("dark", "Тёмная", "#1f2937", "#111827"),
];

impl ColorScheme {
    pub fn all() -> &'static [ColorScheme] {
        &COLOR_SCHEMES
    }

    pub fn from_name(name: &str) -> Option<&'static ColorScheme> {
        COLOR_SCHEMES.iter().find(|scheme| scheme.name == name)
    }

    /// Overwrites both gradient pairs. Every other field is left alone.
    pub fn apply(&self, config: &mut WidgetConfiguration) {
        config.button_color = self.button_color.to_string();
        config.button_color_end = self.button_color_end.to_string();
        config.header_color = self.header_color.to_string();
        config.header_color_end = self.header_color_end.to_string();
    }

    /// Name of the preset whose colors the configuration currently carries, if any.
    pub fn matching(config: &WidgetConfiguration) -> Option<&'static ColorScheme> {
        COLOR_SCHEMES.iter().find(|scheme| {
            scheme.button_color == config.button_color
                && scheme.button_color_end == config.button_color_end
                && scheme.header_color == config.header_color
                && scheme.header_color_end == config.header_color_end
        })
    }
}
