// ── Chat Widget: Localized Strings ─────────────────────────────────────────
// The client script shows a handful of status/error strings; the host is
// responsible for translating them. `LocaleProvider` is that seam — the
// renderer asks for each `MessageKey` and embeds whatever comes back in
// the script payload.

/// Keys for the user-facing strings the widget script can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Generic "something went wrong" shown for a failed reply.
    Error,
    UnknownError,
    NetworkError,
    LoadingHistory,
    ErrorLoadingHistory,
    RequestFailed,
}

impl MessageKey {
    pub const ALL: [MessageKey; 6] = [
        MessageKey::Error,
        MessageKey::UnknownError,
        MessageKey::NetworkError,
        MessageKey::LoadingHistory,
        MessageKey::ErrorLoadingHistory,
        MessageKey::RequestFailed,
    ];
}

pub trait LocaleProvider {
    fn text(&self, key: MessageKey) -> String;
}

/// English strings, used when the host supplies no translations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocale;

impl LocaleProvider for DefaultLocale {
    fn text(&self, key: MessageKey) -> String {
        match key {
            MessageKey::Error => "Sorry, something went wrong.",
            MessageKey::UnknownError => "An unknown error occurred.",
            MessageKey::NetworkError => "Network error. Please try again.",
            MessageKey::LoadingHistory => "Loading chat history...",
            MessageKey::ErrorLoadingHistory => {
                "Could not load chat history. Starting a new conversation."
            }
            MessageKey::RequestFailed => "Failed to send message.",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_covers_all_keys() {
        for key in MessageKey::ALL {
            assert!(!DefaultLocale.text(key).is_empty(), "Empty string for {key:?}");
        }
    }
}
