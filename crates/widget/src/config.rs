use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;
use crate::icons::DEFAULT_ICON;

pub const BUTTON_SIZE_BOUNDS: RangeInclusive<u32> = 40..=80;
pub const WINDOW_WIDTH_BOUNDS: RangeInclusive<u32> = 300..=600;
pub const WINDOW_HEIGHT_BOUNDS: RangeInclusive<u32> = 400..=800;
pub const BORDER_RADIUS_BOUNDS: RangeInclusive<u32> = 0..=32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum ButtonPosition {
    #[default]
    BottomRight,
    BottomLeft,
}

impl ButtonPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonPosition::BottomRight => "bottom-right",
            ButtonPosition::BottomLeft => "bottom-left",
        }
    }

    /// CSS property used for the horizontal offset.
    pub fn side(&self) -> &'static str {
        match self {
            ButtonPosition::BottomRight => "right",
            ButtonPosition::BottomLeft => "left",
        }
    }
}

// Anything the endpoint sends that we don't recognise is right-anchored.
impl From<String> for ButtonPosition {
    fn from(value: String) -> Self {
        match value.as_str() {
            "bottom-left" => ButtonPosition::BottomLeft,
            _ => ButtonPosition::BottomRight,
        }
    }
}

/// Style and behaviour settings of one tenant's embeddable chat launcher.
///
/// Field names follow the settings endpoint's wire format. The button and
/// header colors are gradient pairs (`*_color` is the start stop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfiguration {
    pub button_color: String,
    pub button_color_end: String,
    pub button_size: u32,
    pub button_position: ButtonPosition,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub button_icon: String,

    pub window_width: u32,
    pub window_height: u32,

    pub header_title: String,
    pub header_color: String,
    pub header_color_end: String,

    pub border_radius: u32,
    pub show_branding: bool,

    #[serde(default)]
    pub custom_css: Option<String>,
    #[serde(default)]
    pub chat_url: Option<String>,
}

impl Default for WidgetConfiguration {
    fn default() -> Self {
        Self {
            button_color: "#3b82f6".to_string(),
            button_color_end: "#1d4ed8".to_string(),
            button_size: 60,
            button_position: ButtonPosition::BottomRight,
            button_icon: DEFAULT_ICON.to_string(),
            window_width: 380,
            window_height: 600,
            header_title: "AI Ассистент".to_string(),
            header_color: "#3b82f6".to_string(),
            header_color_end: "#1d4ed8".to_string(),
            border_radius: 16,
            show_branding: true,
            custom_css: None,
            chat_url: None,
        }
    }
}

impl WidgetConfiguration {
    /// Fills in fields that configurations persisted by older releases may
    /// lack. Currently only `button_icon`.
    pub fn normalize(&mut self) {
        if self.button_icon.is_empty() {
            self.button_icon = DEFAULT_ICON.to_string();
        }
    }

    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let checks = [
            ("button_size", self.button_size, BUTTON_SIZE_BOUNDS),
            ("window_width", self.window_width, WINDOW_WIDTH_BOUNDS),
            ("window_height", self.window_height, WINDOW_HEIGHT_BOUNDS),
            ("border_radius", self.border_radius, BORDER_RADIUS_BOUNDS),
        ];

        let errors: Vec<ConfigError> = checks
            .into_iter()
            .filter(|(_, value, bounds)| !bounds.contains(value))
            .map(|(field, value, bounds)| ConfigError::OutOfRange {
                field,
                min: *bounds.start(),
                max: *bounds.end(),
                value,
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy with every numeric field forced into its bounds.
    pub fn clamped(&self) -> Self {
        let clamp = |value: u32, bounds: RangeInclusive<u32>| value.clamp(*bounds.start(), *bounds.end());

        Self {
            button_size: clamp(self.button_size, BUTTON_SIZE_BOUNDS),
            window_width: clamp(self.window_width, WINDOW_WIDTH_BOUNDS),
            window_height: clamp(self.window_height, WINDOW_HEIGHT_BOUNDS),
            border_radius: clamp(self.border_radius, BORDER_RADIUS_BOUNDS),
            ..self.clone()
        }
    }

    /// The operator-supplied chat URL, verbatim, if one is actually set.
    /// Blank counts as unset.
    pub fn effective_chat_url(&self) -> Option<&str> {
        self.chat_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
