use std::time::Duration;

use api::notify::Notifier;
use api::notify::Toast;
use api::notify::ToastId;
use api::notify::ToastQueue;
use dioxus::prelude::*;
use web_time::Instant;

/// How often expired toasts are swept.
const PRUNE_EVERY: Duration = Duration::from_millis(500);

/// The app-wide toast registry, shared through context.
#[derive(Clone, Copy, PartialEq)]
pub struct ToastHandle {
    queue: Signal<ToastQueue>,
}

impl ToastHandle {
    pub fn queue(&self) -> Signal<ToastQueue> {
        self.queue
    }

    pub fn set_max_visible(&self, max_visible: usize) {
        let mut queue = self.queue;
        queue.write().set_max_visible(max_visible);
    }
}

impl Notifier for ToastHandle {
    fn allocate_id(&self) -> ToastId {
        let mut queue = self.queue;
        let id = queue.write().allocate_id();
        id
    }

    // Tickets can render from their `Drop` while the app tears down, when
    // the queue may already be gone.
    fn show(&self, toast: Toast) {
        let mut queue = self.queue;
        match queue.try_write() {
            Ok(mut queue) => queue.upsert(toast),
            Err(_) => dioxus_logger::tracing::debug!("toast {} dropped: queue gone", toast.id),
        };
    }

    fn dismiss(&self, id: ToastId) {
        let mut queue = self.queue;
        if let Ok(mut queue) = queue.try_write() {
            queue.dismiss(id);
        };
    }
}

/// Creates the registry, provides it to descendants and keeps it pruned.
/// Call once, near the root.
pub fn use_toast_provider(max_visible: usize) -> ToastHandle {
    let queue = use_signal(|| ToastQueue::new(max_visible));
    let handle = use_context_provider(|| ToastHandle { queue });

    use_future(move || async move {
        let mut queue = handle.queue;
        loop {
            crate::compat::sleep(PRUNE_EVERY).await;
            let now = Instant::now();
            // peek so that an idle queue does not re-render
            if queue.peek().has_expired(now) {
                let expired = queue.write().prune_expired(now);
                if !expired.is_empty() {
                    dioxus_logger::tracing::debug!("pruned {} toasts", expired.len());
                }
            }
        }
    });

    handle
}

pub fn use_toasts() -> ToastHandle {
    use_context::<ToastHandle>()
}
