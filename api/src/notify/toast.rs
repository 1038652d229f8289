//! The in-memory toast registry and the `Notifier` seam used to talk to it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use super::tx::TxView;

/// Identity of a toast. Updates with the same id replace the toast in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Visual severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIs)]
pub enum ToastLevel {
    Loading,
    Success,
    Error,
    Info,
    Warning,
}

/// What a toast displays.
#[derive(Debug, Clone, PartialEq)]
pub enum ToastBody {
    Transaction(TxView),
    Message {
        message: String,
        description: Option<String>,
    },
}

/// A single notification as handed to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub level: ToastLevel,
    pub body: ToastBody,
    /// `None` means the toast stays until dismissed.
    pub duration: Option<Duration>,
    /// Important toasts are never evicted to make room for newer ones.
    pub important: bool,
    pub close_button: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    toast: Toast,
    shown_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        match self.toast.duration {
            Some(duration) => now.saturating_duration_since(self.shown_at) >= duration,
            None => false,
        }
    }
}

/// Default number of non-important toasts kept at once.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// An explicit notification registry, owned by whoever renders it.
///
/// Toasts are kept newest first. Updating an existing id keeps the toast in
/// its position and restarts its auto-dismiss clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastQueue {
    entries: VecDeque<Entry>,
    next_id: u64,
    max_visible: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VISIBLE)
    }
}

impl ToastQueue {
    pub fn new(max_visible: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 1,
            max_visible: max_visible.max(1),
        }
    }

    pub fn allocate_id(&mut self) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn upsert(&mut self, toast: Toast) {
        self.upsert_at(toast, Instant::now());
    }

    /// Inserts or replaces a toast, using `now` as its shown-at time.
    pub fn upsert_at(&mut self, toast: Toast, now: Instant) {
        match self.entries.iter_mut().find(|e| e.toast.id == toast.id) {
            Some(entry) => {
                entry.toast = toast;
                entry.shown_at = now;
            }
            None => {
                self.entries.push_front(Entry {
                    toast,
                    shown_at: now,
                });
                self.evict_overflow();
            }
        }
    }

    fn evict_overflow(&mut self) {
        loop {
            let unimportant = self.entries.iter().filter(|e| !e.toast.important).count();
            if unimportant <= self.max_visible {
                break;
            }
            // oldest non-important is the last one
            if let Some(pos) = self.entries.iter().rposition(|e| !e.toast.important) {
                self.entries.remove(pos);
            }
        }
    }

    /// Removes a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.toast.id != id);
        self.entries.len() != before
    }

    /// Removes every toast whose duration has elapsed at `now` and returns
    /// their ids. Dismissal only affects presentation.
    pub fn prune_expired(&mut self, now: Instant) -> Vec<ToastId> {
        let expired: Vec<ToastId> = self
            .entries
            .iter()
            .filter(|e| e.is_expired(now))
            .map(|e| e.toast.id)
            .collect();
        if !expired.is_empty() {
            self.entries.retain(|e| !e.is_expired(now));
        }
        expired
    }

    /// Whether `prune_expired(now)` would remove anything.
    pub fn has_expired(&self, now: Instant) -> bool {
        self.entries.iter().any(|e| e.is_expired(now))
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.entries.iter().map(|e| &e.toast).find(|t| t.id == id)
    }

    /// Iterates toasts newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|e| &e.toast)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Changes the visible limit, evicting old non-important toasts if the
    /// queue is now over it.
    pub fn set_max_visible(&mut self, max_visible: usize) {
        self.max_visible = max_visible.max(1);
        self.evict_overflow();
    }
}

/// The seam between code that raises notifications and the registry that
/// shows them. Pass one by reference (or as a cheap clone) instead of reaching
/// for a global.
pub trait Notifier {
    fn allocate_id(&self) -> ToastId;
    fn show(&self, toast: Toast);
    fn dismiss(&self, id: ToastId);
}

impl Notifier for Rc<RefCell<ToastQueue>> {
    fn allocate_id(&self) -> ToastId {
        self.borrow_mut().allocate_id()
    }

    fn show(&self, toast: Toast) {
        self.borrow_mut().upsert(toast);
    }

    fn dismiss(&self, id: ToastId) {
        self.borrow_mut().dismiss(id);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn allocate_id(&self) -> ToastId {
        (**self).allocate_id()
    }

    fn show(&self, toast: Toast) {
        (**self).show(toast)
    }

    fn dismiss(&self, id: ToastId) {
        (**self).dismiss(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_toast(
        queue: &mut ToastQueue,
        duration: Option<Duration>,
        important: bool,
    ) -> ToastId {
        let id = queue.allocate_id();
        queue.upsert(Toast {
            id,
            level: ToastLevel::Info,
            body: ToastBody::Message {
                message: id.to_string(),
                description: None,
            },
            duration,
            important,
            close_button: true,
        });
        id
    }

    #[test]
    fn newest_first_and_update_in_place() {
        let mut queue = ToastQueue::default();
        let a = message_toast(&mut queue, None, false);
        let b = message_toast(&mut queue, None, false);
        let ids: Vec<ToastId> = queue.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b, a]);

        let mut updated = queue.get(a).unwrap().clone();
        updated.level = ToastLevel::Success;
        queue.upsert(updated);

        let ids: Vec<ToastId> = queue.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b, a]);
        assert!(queue.get(a).unwrap().level.is_success());
    }

    #[test]
    fn expired_toasts_are_pruned() {
        let mut queue = ToastQueue::default();
        let start = Instant::now();
        let id = queue.allocate_id();
        let toast = Toast {
            id,
            level: ToastLevel::Success,
            body: ToastBody::Message {
                message: "done".to_string(),
                description: None,
            },
            duration: Some(Duration::from_secs(6)),
            important: false,
            close_button: true,
        };
        queue.upsert_at(toast, start);
        let sticky = message_toast(&mut queue, None, true);

        assert!(!queue.has_expired(start + Duration::from_secs(5)));
        assert!(queue.prune_expired(start + Duration::from_secs(5)).is_empty());
        assert!(queue.has_expired(start + Duration::from_secs(6)));
        assert_eq!(queue.prune_expired(start + Duration::from_secs(6)), vec![id]);
        assert!(queue.get(id).is_none());
        assert!(queue.get(sticky).is_some());
    }

    #[test]
    fn oldest_unimportant_is_evicted() {
        let mut queue = ToastQueue::new(2);
        let important = message_toast(&mut queue, None, true);
        let first = message_toast(&mut queue, None, false);
        let second = message_toast(&mut queue, None, false);
        let third = message_toast(&mut queue, None, false);

        assert!(queue.get(first).is_none());
        assert!(queue.get(second).is_some());
        assert!(queue.get(third).is_some());
        assert!(queue.get(important).is_some());
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn dismiss_reports_presence() {
        let mut queue = ToastQueue::default();
        let id = message_toast(&mut queue, None, false);
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn shrinking_limit_evicts() {
        let mut queue = ToastQueue::new(3);
        let a = message_toast(&mut queue, None, false);
        let b = message_toast(&mut queue, None, false);
        let c = message_toast(&mut queue, None, false);
        queue.set_max_visible(1);
        assert_eq!(queue.max_visible(), 1);
        let ids: Vec<ToastId> = queue.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![c]);
        assert!(queue.get(a).is_none() && queue.get(b).is_none());
    }
}
