// ── chat-widget ────────────────────────────────────────────────────────────
// Public-facing presentation layer for an embeddable AI chat widget.
//
// The host page composition layer drives everything explicitly:
//   1. `WidgetConfig::load(&store)` — resolve customization once,
//      validating colors up front (bad values degrade to defaults).
//   2. `ChatWidgetRenderer::head_assets()` — stylesheet/script
//      descriptors plus generated inline CSS (custom properties and the
//      floating-position rule).
//   3. `ChatWidgetRenderer::body_markup()` / `embed_markup()` — widget
//      markup as a floating overlay or via an explicit embed directive.
//   4. `ChatWidgetRenderer::script_config()` — typed runtime payload
//      (endpoint, nonce, session id, messages, localized strings) for
//      the client bundle.
//
// Out of scope by design: HTTP handling, chat history storage, and the
// widget JavaScript itself — those belong to the host.

pub mod color;
pub mod config;
pub mod error;
pub mod locale;
pub mod render;
pub mod session;

pub use color::{adjust, Rgb};
pub use config::{ConfigStore, DisplayMethod, MemoryStore, WidgetConfig, WidgetPosition};
pub use error::{WidgetError, WidgetResult};
pub use locale::{DefaultLocale, LocaleProvider, MessageKey};
pub use render::{
    ChatWidgetRenderer, HeadAssets, RendererOptions, ScriptAsset, ScriptConfig, StyleAsset,
};
