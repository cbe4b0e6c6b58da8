// ── Chat Widget: Sessions & Nonces ─────────────────────────────────────────
// Per-render identifiers handed to the client script. Generation only —
// the host's chat backend owns storage and validation.

/// Fresh session id for a visitor's conversation. The history backend
/// keys stored transcripts by this value.
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Short single-purpose request token the chat endpoint checks on every
/// message POST.
pub fn generate_nonce() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")[..12].to_string()
}
