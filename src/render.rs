// ── Chat Widget: Renderer ──────────────────────────────────────────────────
// Explicit render capability for the public-facing widget. The host's page
// composition layer calls three methods and places the results itself:
//
//   head_assets()   → stylesheet + script descriptors and the generated
//                     inline CSS (custom properties + position rule)
//   body_markup()   → floating-overlay markup, or empty when the page
//                     embeds the widget explicitly
//   script_config() → typed runtime payload for the client script
//
// No hook registration, no global option reads: the renderer is handed a
// resolved `WidgetConfig` and a `LocaleProvider` and is otherwise pure.

use crate::color;
use crate::config::{DisplayMethod, WidgetConfig, WidgetPosition};
use crate::error::WidgetResult;
use crate::locale::{LocaleProvider, MessageKey};
use crate::session;
use serde::{Deserialize, Serialize};

/// DOM id of the widget's root container; the position rule targets it.
pub const WIDGET_CONTAINER_ID: &str = "chat-widget-app";

/// Percent applied to the primary color for the hover/accent variant.
const HOVER_DARKEN_PERCENT: f64 = -15.0;

// ── Asset descriptors ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleAsset {
    pub handle: String,
    pub href: String,
    /// Cache-busting token appended as `?ver=`.
    pub version: String,
}

impl StyleAsset {
    pub fn tag(&self) -> String {
        format!(
            r#"<link rel="stylesheet" id="{}-css" href="{}?ver={}" media="all">"#,
            html_escape(&self.handle),
            html_escape(&self.href),
            html_escape(&self.version),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptAsset {
    pub handle: String,
    pub src: String,
    pub version: String,
    /// Emit `type="module"` — the widget bundle uses ES module imports.
    pub module: bool,
}

impl ScriptAsset {
    pub fn tag(&self) -> String {
        let type_attr = if self.module { r#" type="module""# } else { "" };
        format!(
            r#"<script{} src="{}?ver={}" id="{}-js"></script>"#,
            type_attr,
            html_escape(&self.src),
            html_escape(&self.version),
            html_escape(&self.handle),
        )
    }
}

/// Everything the host must place in `<head>`.
#[derive(Debug, Clone)]
pub struct HeadAssets {
    pub stylesheet: StyleAsset,
    /// `:root` custom properties + position rule, for a `<style>` block
    /// after the stylesheet link.
    pub inline_css: String,
    pub script: ScriptAsset,
}

// ── Script payload ─────────────────────────────────────────────────────

/// Runtime configuration serialized into the page for the widget script.
/// Wire keys match what the client bundle reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub ajax_url: String,
    pub nonce: String,
    pub session_id: String,
    pub display_method: DisplayMethod,
    pub widget_position: WidgetPosition,
    #[serde(rename = "initialBotMessage")]
    pub initial_bot_message: String,
    #[serde(rename = "initialPopupMessage")]
    pub initial_popup_message: String,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
    #[serde(rename = "unknownError")]
    pub unknown_error: String,
    #[serde(rename = "networkError")]
    pub network_error: String,
    #[serde(rename = "loadingHistory")]
    pub loading_history: String,
    #[serde(rename = "errorLoadingHistory")]
    pub error_loading_history: String,
    pub request_failed: String,
}

// ── Renderer ───────────────────────────────────────────────────────────

/// Host-supplied wiring: where assets live and where messages go.
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Handle used for element ids on the emitted tags.
    pub handle: String,
    /// Fallback style version when no customization_version is stored.
    pub version: String,
    /// Base URL the css/js bundles are served from (no trailing slash).
    pub asset_base_url: String,
    /// Endpoint the widget script POSTs chat messages to.
    pub endpoint_url: String,
}

impl Default for RendererOptions {
    fn default() -> Self {
        RendererOptions {
            handle: "chat-widget".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            asset_base_url: "/assets/chat-widget".into(),
            endpoint_url: "/chat".into(),
        }
    }
}

pub struct ChatWidgetRenderer {
    config: WidgetConfig,
    options: RendererOptions,
}

impl ChatWidgetRenderer {
    pub fn new(config: WidgetConfig, options: RendererOptions) -> Self {
        Self { config, options }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Asset descriptors and generated inline CSS for the page `<head>`.
    pub fn head_assets(&self) -> HeadAssets {
        let style_version = self
            .config
            .customization_version
            .clone()
            .unwrap_or_else(|| self.options.version.clone());
        // Scripts bust harder: an unversioned config falls back to the
        // render timestamp so stale bundles never stick around.
        let script_version = self
            .config
            .customization_version
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().timestamp().to_string());

        HeadAssets {
            stylesheet: StyleAsset {
                handle: self.options.handle.clone(),
                href: format!("{}/css/chat-widget.css", self.options.asset_base_url),
                version: style_version,
            },
            inline_css: build_inline_css(&self.config),
            script: ScriptAsset {
                handle: self.options.handle.clone(),
                src: format!("{}/js/chat-widget.js", self.options.asset_base_url),
                version: script_version,
                module: true,
            },
        }
    }

    /// Widget markup for the end of `<body>`. Empty unless the display
    /// method is floating — embed pages place the markup themselves.
    pub fn body_markup(&self) -> String {
        match self.config.display_method {
            DisplayMethod::Floating => build_widget_html(&self.config),
            DisplayMethod::Embed => String::new(),
        }
    }

    /// Widget markup for an explicit embed directive, regardless of the
    /// configured display method.
    pub fn embed_markup(&self) -> String {
        build_widget_html(&self.config)
    }

    /// Runtime payload for the client script. Mints a fresh session id
    /// and nonce per call — one call per rendered page.
    pub fn script_config(&self, locale: &impl LocaleProvider) -> ScriptConfig {
        ScriptConfig {
            ajax_url: self.options.endpoint_url.clone(),
            nonce: session::generate_nonce(),
            session_id: session::generate_session_id(),
            display_method: self.config.display_method,
            widget_position: self.config.widget_position,
            initial_bot_message: self.config.initial_bot_message.clone(),
            initial_popup_message: self.config.initial_popup_message.clone(),
            error_message: locale.text(MessageKey::Error),
            unknown_error: locale.text(MessageKey::UnknownError),
            network_error: locale.text(MessageKey::NetworkError),
            loading_history: locale.text(MessageKey::LoadingHistory),
            error_loading_history: locale.text(MessageKey::ErrorLoadingHistory),
            request_failed: locale.text(MessageKey::RequestFailed),
        }
    }

    /// `script_config()` serialized for direct embedding in a page.
    pub fn script_config_json(&self, locale: &impl LocaleProvider) -> WidgetResult<String> {
        Ok(serde_json::to_string(&self.script_config(locale))?)
    }
}

// ── Inline CSS builder ─────────────────────────────────────────────────

/// `:root` custom properties for the resolved colors plus the rule that
/// pins the floating container to its corner. Colors are validated at
/// config load; a failed hover derivation just reuses the primary.
pub fn build_inline_css(config: &WidgetConfig) -> String {
    let hover = color::adjust(&config.primary_color, HOVER_DARKEN_PERCENT)
        .unwrap_or_else(|_| config.primary_color.clone());

    let position_css = match config.widget_position {
        WidgetPosition::BottomLeft => format!(
            "#{WIDGET_CONTAINER_ID} {{\n    right: auto;\n    left: 20px;\n}}"
        ),
        WidgetPosition::BottomRight => format!(
            "#{WIDGET_CONTAINER_ID} {{\n    left: auto;\n    right: 20px;\n}}"
        ),
    };

    format!(
        ":root {{\n\
         \x20   --chat-widget-primary-color: {};\n\
         \x20   --chat-widget-primary-color-hover: {};\n\
         \x20   --chat-widget-bg-color: {};\n\
         \x20   --chat-widget-user-msg-bg-color: {};\n\
         \x20   --chat-widget-bot-msg-bg-color: {};\n\
         \x20   --chat-widget-text-color: {};\n\
         }}\n{}",
        config.primary_color,
        hover,
        config.bg_color,
        config.user_msg_bg_color,
        config.bot_msg_bg_color,
        config.text_color,
        position_css,
    )
}

// ── Widget markup builder ──────────────────────────────────────────────

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn build_widget_html(config: &WidgetConfig) -> String {
    let popup = html_escape(&config.initial_popup_message);
    let greeting = html_escape(&config.initial_bot_message);

    format!(
        r#"<div id="{WIDGET_CONTAINER_ID}" class="chat-widget chat-widget--closed" data-position="{position}">
  <div class="chat-widget__popup" id="chat-widget-popup">{popup}</div>
  <button class="chat-widget__launcher" id="chat-widget-launcher" aria-label="Open chat" aria-expanded="false">
    <svg viewBox="0 0 24 24" width="28" height="28" aria-hidden="true"><path fill="currentColor" d="M12 3C7 3 3 6.6 3 11c0 2.2 1 4.1 2.7 5.6-.2 1-.7 2.1-1.5 2.9 1.6 0 3.1-.5 4.3-1.3 1.1.4 2.3.6 3.5.6 5 0 9-3.6 9-8S17 3 12 3z"/></svg>
  </button>
  <div class="chat-widget__panel" id="chat-widget-panel" role="dialog" aria-label="Chat" hidden>
    <div class="chat-widget__header">
      <span class="chat-widget__title">Chat</span>
      <button class="chat-widget__close" id="chat-widget-close" aria-label="Close chat">&times;</button>
    </div>
    <div class="chat-widget__messages" id="chat-widget-messages">
      <div class="chat-widget__msg chat-widget__msg--bot">{greeting}</div>
    </div>
    <form class="chat-widget__input-bar" id="chat-widget-form">
      <textarea id="chat-widget-input" rows="1" placeholder="Type a message..." required></textarea>
      <button type="submit" id="chat-widget-send">Send</button>
    </form>
  </div>
</div>"#,
        position = config.widget_position.as_tag(),
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigStore, MemoryStore, KEY_DISPLAY_METHOD, KEY_WIDGET_POSITION};
    use crate::locale::DefaultLocale;

    fn renderer_with(store: &MemoryStore) -> ChatWidgetRenderer {
        ChatWidgetRenderer::new(WidgetConfig::load(store), RendererOptions::default())
    }

    #[test]
    fn test_inline_css_has_custom_properties() {
        let css = build_inline_css(&WidgetConfig::default());
        assert!(css.contains("--chat-widget-primary-color: #3B82F6;"));
        assert!(css.contains("--chat-widget-bg-color: #ffffff;"));
        assert!(css.contains("--chat-widget-text-color: #333333;"));
    }

    #[test]
    fn test_inline_css_hover_darkened() {
        // 0x3B=59→50, 0x82=130→111 (110.5 rounds away), 0xF6=246→209
        let css = build_inline_css(&WidgetConfig::default());
        assert!(css.contains("--chat-widget-primary-color-hover: #326fd1;"), "{css}");
    }

    #[test]
    fn test_position_rule_right_default() {
        let css = build_inline_css(&WidgetConfig::default());
        assert!(css.contains("right: 20px"));
        assert!(css.contains("left: auto"));
    }

    #[test]
    fn test_position_rule_left() {
        let mut store = MemoryStore::new();
        store.set(KEY_WIDGET_POSITION, "bottom-left");
        let css = build_inline_css(&WidgetConfig::load(&store));
        assert!(css.contains("left: 20px"));
        assert!(css.contains("right: auto"));
    }

    #[test]
    fn test_body_markup_floating_only() {
        let floating = renderer_with(&MemoryStore::new());
        assert!(floating.body_markup().contains(WIDGET_CONTAINER_ID));

        let mut store = MemoryStore::new();
        store.set(KEY_DISPLAY_METHOD, "embed");
        let embed = renderer_with(&store);
        assert!(embed.body_markup().is_empty());
        // Explicit embed still renders.
        assert!(embed.embed_markup().contains(WIDGET_CONTAINER_ID));
    }

    #[test]
    fn test_markup_escapes_messages() {
        let mut store = MemoryStore::new();
        store.set(
            crate::config::KEY_INITIAL_BOT_MESSAGE,
            r#"<script>alert("hi")</script>"#,
        );
        let html = renderer_with(&store).embed_markup();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_config_wire_keys() {
        let renderer = renderer_with(&MemoryStore::new());
        let json = renderer.script_config_json(&DefaultLocale).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["display_method"], "floating");
        assert_eq!(value["widget_position"], "bottom-right");
        assert_eq!(value["ajax_url"], "/chat");
        assert!(value["initialBotMessage"].as_str().unwrap().contains("Ask me anything"));
        assert!(value["errorMessage"].as_str().is_some());
        assert!(value["loadingHistory"].as_str().is_some());
        assert_eq!(value["nonce"].as_str().unwrap().len(), 12);
        assert!(!value["session_id"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_head_assets_versioning() {
        let mut store = MemoryStore::new();
        store.set(crate::config::KEY_CUSTOMIZATION_VERSION, "7");
        let assets = renderer_with(&store).head_assets();
        assert_eq!(assets.stylesheet.version, "7");
        assert_eq!(assets.script.version, "7");
        assert!(assets.stylesheet.tag().contains("?ver=7"));
    }

    #[test]
    fn test_head_assets_version_fallbacks() {
        let assets = renderer_with(&MemoryStore::new()).head_assets();
        assert_eq!(assets.stylesheet.version, env!("CARGO_PKG_VERSION"));
        // Script fallback is a unix timestamp.
        assert!(assets.script.version.parse::<i64>().is_ok());
    }

    #[test]
    fn test_script_tag_is_module() {
        let assets = renderer_with(&MemoryStore::new()).head_assets();
        let tag = assets.script.tag();
        assert!(tag.contains(r#"type="module""#));
        assert!(tag.contains(r#"id="chat-widget-js""#));
    }

    #[test]
    fn test_store_trait_default_method() {
        let store = MemoryStore::new();
        assert_eq!(store.get_or("missing_key", "fallback"), "fallback");
    }
}
