use async_trait::async_trait;

/// Interactive questions a screen has to ask before a destructive action.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Yes/no confirmation; `false` aborts the action.
    async fn confirm(&self, question: &str) -> bool;

    /// Free-text reason for a service that was not provided. `None` when the
    /// user backed out.
    async fn ask_reason(&self, order_id: i32) -> Option<String>;
}

/// Transient notifications shown to the user.
pub trait Toaster: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sends notifications to the log, for headless use.
pub struct LogToaster;

impl Toaster for LogToaster {
    fn success(&self, message: &str) {
        log::info!("{message}");
    }

    fn error(&self, message: &str) {
        log::warn!("{message}");
    }
}
