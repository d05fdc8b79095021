use async_trait::async_trait;

/// Best-effort alert delivery.
///
/// Both channels report delivery as a boolean and never return errors: a
/// channel that fails logs why and answers `false`.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a text message to the configured chat.
    async fn send_message(&self, text: &str) -> bool;

    /// Places a voice call reading `text` to `recipient`.
    async fn make_call(&self, recipient: &str, text: &str) -> bool;
}
