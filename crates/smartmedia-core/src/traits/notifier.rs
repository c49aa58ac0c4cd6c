//! Progress notifications shown to the user while a file is processed.

/// Receives short user-facing progress messages.
pub trait ProgressNotifier: Send + Sync {
    fn info(&self, title: &str, message: &str);
    fn success(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
}

/// Emits notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl ProgressNotifier for TracingNotifier {
    fn info(&self, title: &str, message: &str) {
        tracing::info!(title, "{}", message);
    }

    fn success(&self, title: &str, message: &str) {
        tracing::info!(title, status = "success", "{}", message);
    }

    fn error(&self, title: &str, message: &str) {
        tracing::error!(title, "{}", message);
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl ProgressNotifier for NoopNotifier {
    fn info(&self, _title: &str, _message: &str) {}
    fn success(&self, _title: &str, _message: &str) {}
    fn error(&self, _title: &str, _message: &str) {}
}
