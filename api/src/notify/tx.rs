//! Transaction lifecycle notifications.
//!
//! A [`TxTicket`] follows one asynchronous on-chain action from submission to
//! its outcome and keeps a single toast in sync with it:
//!
//! ```text
//! submitted ──► pending ──► confirmed
//!     │            │
//!     └────────────┴──────► failed
//! ```
//!
//! `confirmed` and `failed` are terminal. The ticket does no I/O of its own; the
//! caller that owns the action drives the transitions.

use std::time::Duration;

use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::warn;
use serde::Deserialize;
use serde::Serialize;

use super::toast::Notifier;
use super::toast::Toast;
use super::toast::ToastBody;
use super::toast::ToastId;
use super::toast::ToastLevel;
use crate::network::Network;

/// Default display time of a confirmed transaction toast.
pub const CONFIRMED_DURATION: Duration = Duration::from_secs(6);
/// Default display time of a failed transaction toast.
pub const FAILED_DURATION: Duration = Duration::from_secs(8);
/// Message of a ticket dropped before reaching a terminal state.
pub const INTERRUPTED_MESSAGE: &str = "Transaction tracking was interrupted";
/// Type icon of a ticket started without a kind.
pub const GENERIC_TX_ICON: &str = "ℹ";

/// The kind of operation a ticket tracks. Only affects labels and icons.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Mint,
    Burn,
    Transfer,
    Claim,
    Deposit,
    Withdraw,
}

impl TxType {
    /// Capitalized label, e.g. "Claim".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mint => "Mint",
            Self::Burn => "Burn",
            Self::Transfer => "Transfer",
            Self::Claim => "Claim",
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Mint => "✨",
            Self::Burn => "🔥",
            Self::Transfer => "⇄",
            Self::Claim => "🎁",
            Self::Deposit => "👛",
            Self::Withdraw => "💵",
        }
    }
}

/// Where a ticket is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIs, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TxState {
    Submitted,
    Pending,
    Confirmed,
    Failed,
}

impl TxState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    /// Marker for a finished state; `None` while in flight, where a spinner
    /// is drawn instead.
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            Self::Submitted | Self::Pending => None,
            Self::Confirmed => Some("✓"),
            Self::Failed => Some("✗"),
        }
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// Re-entering `pending` from `pending` is allowed and only re-renders.
    pub fn can_transition_to(&self, next: TxState) -> bool {
        match (self, next) {
            (Self::Submitted, Self::Pending | Self::Confirmed | Self::Failed) => true,
            (Self::Pending, Self::Pending | Self::Confirmed | Self::Failed) => true,
            _ => false,
        }
    }

    /// Fixed explanatory sentence shown when the caller supplies no message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Submitted => {
                "Your transaction is in the mempool. It will be picked up by miners shortly."
            }
            Self::Pending => "Your transaction is being processed. This may take a moment.",
            Self::Confirmed => "Your transaction was successfully confirmed on-chain.",
            Self::Failed => {
                "Your transaction did not complete. Please review details and try again."
            }
        }
    }
}

/// Title derived from state and kind, e.g. "Claim transaction pending".
pub fn default_title(state: TxState, kind: Option<TxType>) -> String {
    match kind {
        Some(kind) => format!("{} transaction {}", kind.label(), state),
        None => format!("Transaction {}", state),
    }
}

/// Shortens a hash to `0xabcd...7890` form. Short hashes are returned whole.
pub fn truncate_hash(hash: &str, leading: usize, trailing: usize) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= leading + trailing + 3 {
        return hash.to_string();
    }
    let head: String = chars[..leading].iter().collect();
    let tail: String = chars[chars.len() - trailing..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Options given when a ticket is started.
///
/// Every field is optional; unset fields fall back to:
/// - `kind`: none, the toast reads "Transaction ..."
/// - `network`: mainnet
/// - `title` / `message`: derived from the current state and kind
/// - `duration`: indefinite while submitted/pending, 6s confirmed, 8s failed
/// - `important`: true, except for confirmed toasts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxParams {
    pub kind: Option<TxType>,
    pub hash: Option<String>,
    pub network: Option<Network>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub duration: Option<Duration>,
    pub important: Option<bool>,
}

impl TxParams {
    pub fn new(kind: TxType) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    fn merge(&mut self, patch: TxPatch) {
        let TxPatch {
            params,
            error: _,
        } = patch;
        if params.kind.is_some() {
            self.kind = params.kind;
        }
        if params.hash.is_some() {
            self.hash = params.hash;
        }
        if params.network.is_some() {
            self.network = params.network;
        }
        if params.title.is_some() {
            self.title = params.title;
        }
        if params.message.is_some() {
            self.message = params.message;
        }
        if params.duration.is_some() {
            self.duration = params.duration;
        }
        if params.important.is_some() {
            self.important = params.important;
        }
    }
}

/// Fields to change on a transition. Set fields win over the ticket's
/// current parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxPatch {
    pub params: TxParams,
    /// Error text for `to_failed`, used as the message when the patch carries
    /// no message of its own.
    pub error: Option<String>,
}

impl TxPatch {
    pub fn hash(hash: impl Into<String>) -> Self {
        Self {
            params: TxParams {
                hash: Some(hash.into()),
                ..Default::default()
            },
            error: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            params: TxParams {
                message: Some(message.into()),
                ..Default::default()
            },
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            params: TxParams::default(),
            error: Some(error.into()),
        }
    }
}

impl From<TxParams> for TxPatch {
    fn from(params: TxParams) -> Self {
        Self {
            params,
            error: None,
        }
    }
}

/// Everything a renderer needs to draw a transaction toast.
#[derive(Debug, Clone, PartialEq)]
pub struct TxView {
    pub state: TxState,
    pub kind: Option<TxType>,
    pub hash: Option<String>,
    pub network: Network,
    pub title: String,
    pub message: String,
}

impl TxView {
    pub fn truncated_hash(&self) -> Option<String> {
        self.hash.as_deref().map(|h| truncate_hash(h, 6, 6))
    }

    pub fn explorer_url(&self) -> Option<String> {
        self.network.explorer_tx_url(self.hash.as_deref())
    }

    pub fn type_icon(&self) -> &'static str {
        self.kind.map_or(GENERIC_TX_ICON, |kind| kind.icon())
    }

    /// Whether to show the "awaiting confirmation" marker.
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.state.is_pending()
    }
}

/// Handle to one in-flight transaction and its toast.
pub struct TxTicket<N: Notifier> {
    id: ToastId,
    state: TxState,
    params: TxParams,
    notifier: N,
}

/// Starts tracking a transaction: shows an indefinite "submitted" toast and
/// returns the ticket that drives it.
pub fn begin_transaction<N: Notifier>(notifier: N, params: TxParams) -> TxTicket<N> {
    TxTicket::begin(notifier, params)
}

impl<N: Notifier> TxTicket<N> {
    pub fn begin(notifier: N, params: TxParams) -> Self {
        let id = notifier.allocate_id();
        let ticket = Self {
            id,
            state: TxState::Submitted,
            params,
            notifier,
        };
        debug!("{} submitted", ticket.id);
        ticket.render();
        ticket
    }

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn hash(&self) -> Option<&str> {
        self.params.hash.as_deref()
    }

    pub fn to_pending(&mut self, patch: TxPatch) -> TxState {
        self.transition(TxState::Pending, patch)
    }

    pub fn to_confirmed(&mut self, patch: TxPatch) -> TxState {
        self.transition(TxState::Confirmed, patch)
    }

    pub fn to_failed(&mut self, patch: TxPatch) -> TxState {
        self.transition(TxState::Failed, patch)
    }

    fn transition(&mut self, next: TxState, patch: TxPatch) -> TxState {
        if !self.state.can_transition_to(next) {
            warn!(
                "{}: ignoring transition {} -> {} on a finished transaction",
                self.id, self.state, next
            );
            return self.state;
        }

        let mut patch = patch;
        if next.is_failed() && patch.params.message.is_none() {
            patch.params.message = patch.error.take();
        }
        self.params.merge(patch);
        self.state = next;
        debug!("{} {}", self.id, next);
        self.render();
        self.state
    }

    /// The content currently shown for this ticket.
    pub fn view(&self) -> TxView {
        TxView {
            state: self.state,
            kind: self.params.kind,
            hash: self.params.hash.clone(),
            network: self.params.network.unwrap_or_default(),
            title: self
                .params
                .title
                .clone()
                .unwrap_or_else(|| default_title(self.state, self.params.kind)),
            message: self
                .params
                .message
                .clone()
                .unwrap_or_else(|| self.state.default_message().to_string()),
        }
    }

    fn render(&self) {
        let view = self.view();
        let (level, duration, important) = match self.state {
            TxState::Submitted | TxState::Pending => (
                ToastLevel::Loading,
                self.params.duration,
                self.params.important.unwrap_or(true),
            ),
            TxState::Confirmed => (
                ToastLevel::Success,
                Some(self.params.duration.unwrap_or(CONFIRMED_DURATION)),
                false,
            ),
            TxState::Failed => (
                ToastLevel::Error,
                Some(self.params.duration.unwrap_or(FAILED_DURATION)),
                true,
            ),
        };
        self.notifier.show(Toast {
            id: self.id,
            level,
            body: ToastBody::Transaction(view),
            duration,
            important,
            close_button: true,
        });
    }
}

/// A ticket dropped mid-flight (its task cancelled, say) fails its toast so
/// nothing stays "pending" forever.
impl<N: Notifier> Drop for TxTicket<N> {
    fn drop(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        warn!("{} dropped while {}", self.id, self.state);
        self.transition(TxState::Failed, TxPatch::error(INTERRUPTED_MESSAGE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::toast::ToastQueue;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rendered(queue: &Rc<RefCell<ToastQueue>>, id: ToastId) -> (Toast, TxView) {
        let queue = queue.borrow();
        let toast = queue.get(id).cloned().expect("toast is shown");
        match &toast.body {
            ToastBody::Transaction(view) => {
                let view = view.clone();
                (toast, view)
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn claim_lifecycle() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let mut ticket = begin_transaction(&queue, TxParams::new(TxType::Claim));
        assert_eq!(ticket.state(), TxState::Submitted);

        let (toast, view) = rendered(&queue, ticket.id());
        assert!(toast.level.is_loading());
        assert_eq!(toast.duration, None);
        assert!(toast.important);
        assert_eq!(view.title, "Claim transaction submitted");
        assert_eq!(view.message, TxState::Submitted.default_message());

        assert_eq!(ticket.to_pending(TxPatch::hash("0xabc")), TxState::Pending);
        let (_, view) = rendered(&queue, ticket.id());
        assert_eq!(view.hash.as_deref(), Some("0xabc"));
        assert_eq!(view.title, "Claim transaction pending");
        assert!(view.is_awaiting_confirmation());

        let state = ticket.to_confirmed(TxPatch::message("Successfully claimed 45.832 STX"));
        assert_eq!(state, TxState::Confirmed);
        let (toast, view) = rendered(&queue, ticket.id());
        assert!(toast.level.is_success());
        assert_eq!(toast.duration, Some(CONFIRMED_DURATION));
        assert!(!toast.important);
        assert_eq!(view.message, "Successfully claimed 45.832 STX");
        assert_eq!(view.hash.as_deref(), Some("0xabc"));
        assert_eq!(queue.borrow().len(), 1);
    }

    #[test]
    fn generic_label_without_kind() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let ticket = begin_transaction(&queue, TxParams::default());
        assert_eq!(ticket.view().title, "Transaction submitted");
        assert_eq!(ticket.view().network, Network::Mainnet);
    }

    #[test]
    fn terminal_states_absorb() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let mut ticket = begin_transaction(&queue, TxParams::new(TxType::Mint));
        ticket.to_failed(TxPatch::error("insufficient funds"));
        let (before, view) = rendered(&queue, ticket.id());
        assert_eq!(view.message, "insufficient funds");
        assert_eq!(before.duration, Some(FAILED_DURATION));

        assert_eq!(ticket.to_confirmed(TxPatch::message("ok")), TxState::Failed);
        assert_eq!(ticket.to_pending(TxPatch::hash("0xdef")), TxState::Failed);
        assert_eq!(ticket.to_failed(TxPatch::error("again")), TxState::Failed);

        let (after, _) = rendered(&queue, ticket.id());
        assert_eq!(before, after);
    }

    #[test]
    fn confirming_twice_keeps_render() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let mut ticket = begin_transaction(&queue, TxParams::new(TxType::Deposit));
        ticket.to_confirmed(TxPatch::default());
        let (first, _) = rendered(&queue, ticket.id());
        ticket.to_confirmed(TxPatch::message("changed"));
        let (second, view) = rendered(&queue, ticket.id());
        assert_eq!(first, second);
        assert_eq!(view.message, TxState::Confirmed.default_message());
    }

    #[test]
    fn pending_is_idempotent() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let mut ticket = begin_transaction(&queue, TxParams::new(TxType::Burn));
        ticket.to_pending(TxPatch::default());
        ticket.to_pending(TxPatch::hash("0x1234567890abcdef1234"));
        let (_, view) = rendered(&queue, ticket.id());
        assert_eq!(ticket.state(), TxState::Pending);
        assert_eq!(view.truncated_hash().as_deref(), Some("0x1234...ef1234"));
    }

    #[test]
    fn explicit_message_wins_over_error() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let mut ticket = begin_transaction(&queue, TxParams::new(TxType::Transfer));
        let patch = TxPatch {
            params: TxParams::default().with_message("Transfer rejected"),
            error: Some("nonce too low".to_string()),
        };
        ticket.to_failed(patch);
        assert_eq!(ticket.view().message, "Transfer rejected");
    }

    #[test]
    fn transition_table() {
        use TxState::*;
        let all = [Submitted, Pending, Confirmed, Failed];
        for from in all {
            for to in all {
                let allowed = from.can_transition_to(to);
                let expected = matches!(
                    (from, to),
                    (Submitted, Pending | Confirmed | Failed)
                        | (Pending, Pending | Confirmed | Failed)
                );
                assert_eq!(allowed, expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn short_hashes_are_not_truncated() {
        assert_eq!(truncate_hash("0xabcdef12345", 6, 6), "0xabcdef12345");
        assert_eq!(truncate_hash("0xabcdef123456789", 6, 6), "0xabcd...456789");
        assert_eq!(truncate_hash("", 6, 6), "");
    }

    #[test]
    fn dropped_ticket_fails_its_toast() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let mut ticket = begin_transaction(&queue, TxParams::new(TxType::Claim));
        ticket.to_pending(TxPatch::hash("0xabc"));
        let id = ticket.id();
        drop(ticket);

        let (toast, view) = rendered(&queue, id);
        assert_eq!(view.state, TxState::Failed);
        assert_eq!(view.message, INTERRUPTED_MESSAGE);
        assert_eq!(view.hash.as_deref(), Some("0xabc"));
        assert!(toast.level.is_error());
        assert_eq!(toast.duration, Some(FAILED_DURATION));
    }

    #[test]
    fn dropping_a_finished_ticket_keeps_its_render() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let mut ticket = begin_transaction(&queue, TxParams::new(TxType::Deposit));
        ticket.to_confirmed(TxPatch::message("Deposited"));
        let id = ticket.id();
        let (before, _) = rendered(&queue, id);
        drop(ticket);
        let (after, _) = rendered(&queue, id);
        assert_eq!(before, after);
    }

    #[test]
    fn icons_follow_kind_and_state() {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let mut ticket = begin_transaction(&queue, TxParams::new(TxType::Burn));
        assert_eq!(ticket.view().type_icon(), "🔥");
        assert_eq!(ticket.view().state.icon(), None);
        ticket.to_pending(TxPatch::default());
        assert_eq!(ticket.view().state.icon(), None);
        ticket.to_failed(TxPatch::error("aborted"));
        assert_eq!(ticket.view().state.icon(), Some("✗"));

        let generic = begin_transaction(&queue, TxParams::default());
        assert_eq!(generic.view().type_icon(), GENERIC_TX_ICON);
        assert_eq!(TxState::Confirmed.icon(), Some("✓"));
    }
}
