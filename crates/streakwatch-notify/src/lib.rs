mod callmebot;
mod config;
mod dispatcher;
mod error;
mod telegram;

pub use callmebot::CallMeBotChannel;
pub use config::NotifyConfig;
pub use dispatcher::Dispatcher;
pub use error::NotifyError;
pub use telegram::TelegramChannel;
