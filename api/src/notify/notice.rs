//! One-off notices that are not tied to a transaction.

use std::time::Duration;

use super::toast::Notifier;
use super::toast::Toast;
use super::toast::ToastBody;
use super::toast::ToastId;
use super::toast::ToastLevel;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeOptions {
    pub description: Option<String>,
    pub duration: Option<Duration>,
}

impl NoticeOptions {
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            duration: None,
        }
    }

    pub fn duration(duration: Duration) -> Self {
        Self {
            description: None,
            duration: Some(duration),
        }
    }
}

fn notify(
    notifier: &impl Notifier,
    level: ToastLevel,
    message: impl Into<String>,
    opts: NoticeOptions,
    default_duration: Duration,
    important: bool,
) -> ToastId {
    let id = notifier.allocate_id();
    notifier.show(Toast {
        id,
        level,
        body: ToastBody::Message {
            message: message.into(),
            description: opts.description,
        },
        duration: Some(opts.duration.unwrap_or(default_duration)),
        important,
        close_button: true,
    });
    id
}

pub fn notify_success(
    notifier: &impl Notifier,
    message: impl Into<String>,
    opts: NoticeOptions,
) -> ToastId {
    notify(notifier, ToastLevel::Success, message, opts, Duration::from_secs(5), false)
}

pub fn notify_error(
    notifier: &impl Notifier,
    message: impl Into<String>,
    opts: NoticeOptions,
) -> ToastId {
    notify(notifier, ToastLevel::Error, message, opts, Duration::from_secs(8), true)
}

pub fn notify_info(
    notifier: &impl Notifier,
    message: impl Into<String>,
    opts: NoticeOptions,
) -> ToastId {
    notify(notifier, ToastLevel::Info, message, opts, Duration::from_secs(5), false)
}

pub fn notify_warning(
    notifier: &impl Notifier,
    message: impl Into<String>,
    opts: NoticeOptions,
) -> ToastId {
    notify(notifier, ToastLevel::Warning, message, opts, Duration::from_secs(7), false)
}

/// Reports the outcome of a clipboard write. Never touches any other state.
pub fn notify_copy_result(notifier: &impl Notifier, copied: bool) -> ToastId {
    if copied {
        let opts = NoticeOptions::duration(Duration::from_secs(2));
        notify_success(notifier, "Copied to clipboard", opts)
    } else {
        dioxus_logger::tracing::warn!("clipboard write failed");
        let opts = NoticeOptions::duration(Duration::from_millis(2500));
        notify_error(notifier, "Failed to copy", opts)
    }
}
