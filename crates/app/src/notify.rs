//! User-visible notifications.
//!
//! Every toast is also written to the log: failures at `warn`, everything
//! else at `info`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
}

/// Toasts raised while handling one screen request, in order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Toasts(Vec<Toast>);

impl Toasts {
    pub fn push(&mut self, level: ToastLevel, title: impl Into<String>, message: impl Into<String>) {
        let toast = Toast {
            level,
            title: title.into(),
            message: message.into(),
        };
        match level {
            ToastLevel::Error => {
                tracing::warn!(title = %toast.title, message = %toast.message, "Error toast")
            }
            ToastLevel::Success | ToastLevel::Info => {
                tracing::info!(title = %toast.title, message = %toast.message, "Toast")
            }
        }
        self.0.push(toast);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastLevel::Success, title, message);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastLevel::Error, title, message);
    }

    pub fn extend(&mut self, other: Toasts) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Toast] {
        &self.0
    }
}
