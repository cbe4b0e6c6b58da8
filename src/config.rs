// ── Chat Widget: Customization Config ──────────────────────────────────────
// Typed widget customization, loaded once from the host's option store and
// validated up front. Render code receives a `WidgetConfig` by reference —
// it never reaches into storage itself.
//
// The host store contract is deliberately tiny (`ConfigStore`): return the
// stored value for a key if present, else let the caller supply the
// default. Missing keys are normal, not errors.
//
// Color fields are validated at load time. A malformed stored color logs a
// warning and falls back to that field's default — a bad customization
// value must degrade to a visible default, never break the page.

use crate::color::Rgb;
use crate::error::WidgetResult;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Option keys as stored by the host (one flat namespace).
pub const KEY_PRIMARY_COLOR: &str = "chat_primary_color";
pub const KEY_BG_COLOR: &str = "chat_bg_color";
pub const KEY_USER_MSG_BG_COLOR: &str = "user_msg_bg_color";
pub const KEY_BOT_MSG_BG_COLOR: &str = "bot_msg_bg_color";
pub const KEY_TEXT_COLOR: &str = "chat_text_color";
pub const KEY_WIDGET_POSITION: &str = "widget_position";
pub const KEY_DISPLAY_METHOD: &str = "display_method";
pub const KEY_INITIAL_BOT_MESSAGE: &str = "initial_bot_message";
pub const KEY_INITIAL_POPUP_MESSAGE: &str = "initial_popup_message";
pub const KEY_CUSTOMIZATION_VERSION: &str = "customization_version";

const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";
const DEFAULT_BG_COLOR: &str = "#ffffff";
const DEFAULT_USER_MSG_BG_COLOR: &str = "#e6f0ff";
const DEFAULT_BOT_MSG_BG_COLOR: &str = "#f0f0f0";
const DEFAULT_TEXT_COLOR: &str = "#333333";
const DEFAULT_INITIAL_BOT_MESSAGE: &str = "Hello there! Ask me anything about this website.";
const DEFAULT_INITIAL_POPUP_MESSAGE: &str = "Hello! How can I help you today?";

// ── Host store contract ────────────────────────────────────────────────

/// Read access to the host's option storage. Never fails for a missing
/// key — absence just means "use the default".
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<String>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// In-memory store for tests and hosts without persistent options.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

// ── Display mode & position ────────────────────────────────────────────

/// How the widget reaches the page: injected as a floating overlay, or
/// placed by an explicit embed directive in the page content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMethod {
    Floating,
    Embed,
}

impl DisplayMethod {
    /// Parse a stored tag. "shortcode" is the legacy spelling of Embed;
    /// anything unrecognized falls back to Floating.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "embed" | "shortcode" => DisplayMethod::Embed,
            "floating" => DisplayMethod::Floating,
            other => {
                warn!("[config] Unknown display_method {other:?}, using floating");
                DisplayMethod::Floating
            }
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            DisplayMethod::Floating => "floating",
            DisplayMethod::Embed => "embed",
        }
    }
}

/// Corner the floating widget is pinned to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetPosition {
    BottomRight,
    BottomLeft,
}

impl WidgetPosition {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bottom-left" => WidgetPosition::BottomLeft,
            "bottom-right" => WidgetPosition::BottomRight,
            other => {
                warn!("[config] Unknown widget_position {other:?}, using bottom-right");
                WidgetPosition::BottomRight
            }
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            WidgetPosition::BottomRight => "bottom-right",
            WidgetPosition::BottomLeft => "bottom-left",
        }
    }
}

// ── Widget config ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Accent color for the launcher button and send button.
    pub primary_color: String,
    /// Chat panel background.
    pub bg_color: String,
    pub user_msg_bg_color: String,
    pub bot_msg_bg_color: String,
    pub text_color: String,
    pub widget_position: WidgetPosition,
    pub display_method: DisplayMethod,
    /// First assistant bubble shown when the panel opens.
    pub initial_bot_message: String,
    /// Teaser bubble shown next to the closed launcher.
    pub initial_popup_message: String,
    /// Cache-busting token for the style/script URLs. When unset, styles
    /// fall back to the crate version and scripts to a unix timestamp.
    #[serde(default)]
    pub customization_version: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            primary_color: DEFAULT_PRIMARY_COLOR.into(),
            bg_color: DEFAULT_BG_COLOR.into(),
            user_msg_bg_color: DEFAULT_USER_MSG_BG_COLOR.into(),
            bot_msg_bg_color: DEFAULT_BOT_MSG_BG_COLOR.into(),
            text_color: DEFAULT_TEXT_COLOR.into(),
            widget_position: WidgetPosition::BottomRight,
            display_method: DisplayMethod::Floating,
            initial_bot_message: DEFAULT_INITIAL_BOT_MESSAGE.into(),
            initial_popup_message: DEFAULT_INITIAL_POPUP_MESSAGE.into(),
            customization_version: None,
        }
    }
}

impl WidgetConfig {
    /// Load customization from the host store, validating each color
    /// once. Reading never fails; a malformed color is logged and
    /// replaced by the field default.
    pub fn load(store: &impl ConfigStore) -> Self {
        WidgetConfig {
            primary_color: load_color(store, KEY_PRIMARY_COLOR, DEFAULT_PRIMARY_COLOR),
            bg_color: load_color(store, KEY_BG_COLOR, DEFAULT_BG_COLOR),
            user_msg_bg_color: load_color(store, KEY_USER_MSG_BG_COLOR, DEFAULT_USER_MSG_BG_COLOR),
            bot_msg_bg_color: load_color(store, KEY_BOT_MSG_BG_COLOR, DEFAULT_BOT_MSG_BG_COLOR),
            text_color: load_color(store, KEY_TEXT_COLOR, DEFAULT_TEXT_COLOR),
            widget_position: WidgetPosition::from_tag(
                &store.get_or(KEY_WIDGET_POSITION, WidgetPosition::BottomRight.as_tag()),
            ),
            display_method: DisplayMethod::from_tag(
                &store.get_or(KEY_DISPLAY_METHOD, DisplayMethod::Floating.as_tag()),
            ),
            initial_bot_message: store.get_or(KEY_INITIAL_BOT_MESSAGE, DEFAULT_INITIAL_BOT_MESSAGE),
            initial_popup_message: store
                .get_or(KEY_INITIAL_POPUP_MESSAGE, DEFAULT_INITIAL_POPUP_MESSAGE),
            customization_version: store.get(KEY_CUSTOMIZATION_VERSION),
        }
    }

    /// Strict variant: error on the first malformed color instead of
    /// falling back. For admin-side validation, not the render path.
    pub fn validate(&self) -> WidgetResult<()> {
        for (field, value) in [
            (KEY_PRIMARY_COLOR, &self.primary_color),
            (KEY_BG_COLOR, &self.bg_color),
            (KEY_USER_MSG_BG_COLOR, &self.user_msg_bg_color),
            (KEY_BOT_MSG_BG_COLOR, &self.bot_msg_bg_color),
            (KEY_TEXT_COLOR, &self.text_color),
        ] {
            Rgb::parse(value).map_err(|_| {
                crate::error::WidgetError::Config(format!("{field}: invalid color {value:?}"))
            })?;
        }
        Ok(())
    }
}

fn load_color(store: &impl ConfigStore, key: &str, default: &str) -> String {
    let value = store.get_or(key, default);
    match Rgb::parse(&value) {
        // Normalize to lowercase #rrggbb so downstream CSS is uniform.
        Ok(rgb) => rgb.to_hex(),
        Err(_) => {
            warn!("[config] Invalid color {value:?} for {key}, using default {default}");
            Rgb::parse(default).map(Rgb::to_hex).unwrap_or_else(|_| default.to_string())
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
