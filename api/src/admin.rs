//! Admin actions: the bounded history of what the owner did, and the runner
//! that takes one validated request through the contract.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::DateTime;
use chrono::Utc;
use dioxus_logger::tracing::info;
use dioxus_logger::tracing::warn;
use serde::Deserialize;
use serde::Serialize;

use crate::contract::ContractBackend;
use crate::contract::ContractError;
use crate::contract::TxResult;
use crate::notify::notice::notify_error;
use crate::notify::notice::notify_success;
use crate::notify::NoticeOptions;
use crate::notify::Notifier;
use crate::stx_amount::MicroStx;
use crate::validation::AdminRequest;

/// Maximum number of entries kept in the admin history.
pub const ADMIN_LOG_CAPACITY: usize = 200;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdminActionKind {
    Deposit,
    Mint,
    Burn,
    Pause,
    Unpause,
}

impl AdminActionKind {
    pub fn success_text(&self) -> &'static str {
        match self {
            Self::Deposit => "Dividend deposit confirmed",
            Self::Mint => "Mint transaction confirmed",
            Self::Burn => "Burn transaction confirmed",
            Self::Pause => "Contract paused",
            Self::Unpause => "Contract resumed",
        }
    }

    pub fn failure_text(&self) -> &'static str {
        match self {
            Self::Deposit => "Dividend deposit failed",
            Self::Mint => "Mint transaction failed",
            Self::Burn => "Burn transaction failed",
            Self::Pause => "Pause transaction failed",
            Self::Unpause => "Unpause transaction failed",
        }
    }
}

impl From<&AdminRequest> for AdminActionKind {
    fn from(request: &AdminRequest) -> Self {
        match request {
            AdminRequest::Deposit { .. } => Self::Deposit,
            AdminRequest::Mint { .. } => Self::Mint,
            AdminRequest::Burn { .. } => Self::Burn,
            AdminRequest::Pause => Self::Pause,
            AdminRequest::Unpause => Self::Unpause,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumIs)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(u64);

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "action-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAction {
    pub id: ActionId,
    pub kind: AdminActionKind,
    pub amount: Option<MicroStx>,
    pub recipient: Option<String>,
    pub tx_id: Option<String>,
    pub status: ActionStatus,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

/// Fields to overwrite when an action settles. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPatch {
    pub status: Option<ActionStatus>,
    pub tx_id: Option<String>,
    pub note: Option<String>,
}

impl ActionPatch {
    /// Patch describing the outcome of a contract call.
    pub fn from_result(result: &Result<TxResult, ContractError>) -> Self {
        match result {
            Ok(res) => Self {
                status: Some(if res.success {
                    ActionStatus::Success
                } else {
                    ActionStatus::Error
                }),
                tx_id: Some(res.tx_id.clone()),
                note: None,
            },
            Err(e) => Self {
                status: Some(ActionStatus::Error),
                tx_id: None,
                note: Some(e.to_string()),
            },
        }
    }
}

/// Newest-first history of admin actions, capped at [`ADMIN_LOG_CAPACITY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminActionLog {
    entries: VecDeque<AdminAction>,
    next_id: u64,
}

impl Default for AdminActionLog {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 1,
        }
    }
}

impl AdminActionLog {
    /// Seeds the log with existing history, given newest first.
    pub fn with_history(history: Vec<AdminAction>) -> Self {
        let next_id = history.iter().map(|a| a.id.0).max().unwrap_or(0) + 1;
        let mut entries: VecDeque<AdminAction> = history.into();
        entries.truncate(ADMIN_LOG_CAPACITY);
        Self { entries, next_id }
    }

    /// Adds a pending entry at the front and returns its id.
    pub fn record(
        &mut self,
        kind: AdminActionKind,
        amount: Option<MicroStx>,
        recipient: Option<String>,
    ) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id += 1;
        self.entries.push_front(AdminAction {
            id,
            kind,
            amount,
            recipient,
            tx_id: None,
            status: ActionStatus::Pending,
            timestamp: Utc::now(),
            note: None,
        });
        self.entries.truncate(ADMIN_LOG_CAPACITY);
        id
    }

    /// Patches an entry in place. Returns `false` for unknown (or evicted) ids.
    pub fn settle(&mut self, id: ActionId, patch: ActionPatch) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if let Some(status) = patch.status {
            entry.status = status;
        }
        if patch.tx_id.is_some() {
            entry.tx_id = patch.tx_id;
        }
        if patch.note.is_some() {
            entry.note = patch.note;
        }
        true
    }

    pub fn settle_with_result(
        &mut self,
        id: ActionId,
        result: &Result<TxResult, ContractError>,
    ) -> bool {
        self.settle(id, ActionPatch::from_result(result))
    }

    pub fn get(&self, id: ActionId) -> Option<&AdminAction> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdminAction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where admin actions are recorded. Implemented by whatever shared handle
/// the host keeps its log behind.
pub trait ActionLedger {
    fn record(
        &self,
        kind: AdminActionKind,
        amount: Option<MicroStx>,
        recipient: Option<String>,
    ) -> ActionId;
    fn settle(&self, id: ActionId, patch: ActionPatch);
}

impl ActionLedger for Rc<RefCell<AdminActionLog>> {
    fn record(
        &self,
        kind: AdminActionKind,
        amount: Option<MicroStx>,
        recipient: Option<String>,
    ) -> ActionId {
        self.borrow_mut().record(kind, amount, recipient)
    }

    fn settle(&self, id: ActionId, patch: ActionPatch) {
        self.borrow_mut().settle(id, patch);
    }
}

/// Note left on an entry whose call was dropped before the contract answered.
pub const INTERRUPTED_NOTE: &str = "Interrupted before the contract answered";

/// Settles a pending entry as an error if the runner is dropped mid-call,
/// so no entry stays pending forever.
struct PendingAction<'a, L: ActionLedger> {
    ledger: &'a L,
    id: ActionId,
    settled: bool,
}

impl<L: ActionLedger> PendingAction<'_, L> {
    fn settle(mut self, patch: ActionPatch) {
        self.settled = true;
        self.ledger.settle(self.id, patch);
    }
}

impl<L: ActionLedger> Drop for PendingAction<'_, L> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("admin {} dropped while pending", self.id);
        self.ledger.settle(
            self.id,
            ActionPatch {
                status: Some(ActionStatus::Error),
                tx_id: None,
                note: Some(INTERRUPTED_NOTE.to_string()),
            },
        );
    }
}

/// What happened to one admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminOutcome {
    pub action_id: ActionId,
    pub kind: AdminActionKind,
    pub status: ActionStatus,
    pub tx_id: Option<String>,
    pub note: Option<String>,
}

impl AdminOutcome {
    /// The contract's paused flag after a successful pause/unpause.
    pub fn paused_after(&self) -> Option<bool> {
        match (self.kind, self.status) {
            (AdminActionKind::Pause, ActionStatus::Success) => Some(true),
            (AdminActionKind::Unpause, ActionStatus::Success) => Some(false),
            _ => None,
        }
    }
}

/// Runs one validated admin request end to end: records it as pending,
/// calls the contract, settles the entry and raises a toast.
///
/// Errors are not returned: they end up in the log entry's note and in an
/// error toast.
pub async fn execute_admin_action<B, N, L>(
    backend: &B,
    notifier: &N,
    ledger: &L,
    request: AdminRequest,
) -> AdminOutcome
where
    B: ContractBackend,
    N: Notifier,
    L: ActionLedger,
{
    let kind = AdminActionKind::from(&request);
    let action_id = ledger.record(kind, request.amount(), request.recipient().map(str::to_string));
    let pending = PendingAction {
        ledger,
        id: action_id,
        settled: false,
    };

    let result = match &request {
        AdminRequest::Deposit { amount } => backend.deposit(*amount).await,
        AdminRequest::Mint { recipient, amount } => backend.mint(recipient, *amount).await,
        AdminRequest::Burn { recipient, amount } => backend.burn(recipient, *amount).await,
        AdminRequest::Pause => backend.pause().await,
        AdminRequest::Unpause => backend.unpause().await,
    };

    let patch = ActionPatch::from_result(&result);
    pending.settle(patch.clone());

    match &result {
        Ok(res) if res.success => {
            info!("admin {} confirmed: {}", kind, res.tx_id);
            notify_success(notifier, kind.success_text(), NoticeOptions::default());
        }
        Ok(res) => {
            warn!("admin {} rejected: {}", kind, res.tx_id);
            notify_error(notifier, kind.failure_text(), NoticeOptions::default());
        }
        Err(e) => {
            warn!("admin {} failed: {}", kind, e);
            notify_error(notifier, e.to_string(), NoticeOptions::default());
        }
    }

    AdminOutcome {
        action_id,
        kind,
        status: patch.status.unwrap_or(ActionStatus::Error),
        tx_id: patch.tx_id,
        note: patch.note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_capped() {
        let mut log = AdminActionLog::default();
        let first = log.record(AdminActionKind::Deposit, Some(MicroStx::from_stx(1)), None);
        for _ in 0..ADMIN_LOG_CAPACITY {
            log.record(AdminActionKind::Pause, None, None);
        }
        assert_eq!(log.len(), ADMIN_LOG_CAPACITY);
        assert!(log.get(first).is_none());
        assert!(!log.settle(first, ActionPatch::default()));
        assert_eq!(log.iter().next().unwrap().kind, AdminActionKind::Pause);
    }

    #[test]
    fn settle_patches_in_place() {
        let mut log = AdminActionLog::default();
        let mint = log.record(
            AdminActionKind::Mint,
            Some(MicroStx::from_stx(10)),
            Some("SP1ABC".to_string()),
        );
        let burn = log.record(AdminActionKind::Burn, Some(MicroStx::from_stx(2)), None);

        assert!(log.settle(mint, ActionPatch::from_result(&Ok(TxResult::ok("0xmint")))));
        let entry = log.get(mint).unwrap();
        assert_eq!(entry.status, ActionStatus::Success);
        assert_eq!(entry.tx_id.as_deref(), Some("0xmint"));
        assert_eq!(entry.recipient.as_deref(), Some("SP1ABC"));

        let err: Result<TxResult, ContractError> = Err(ContractError::Paused);
        log.settle_with_result(burn, &err);
        let entry = log.get(burn).unwrap();
        assert_eq!(entry.status, ActionStatus::Error);
        assert_eq!(entry.note.as_deref(), Some("contract is paused"));
        assert_eq!(entry.tx_id, None);

        let order: Vec<ActionId> = log.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![burn, mint]);
    }

    #[test]
    fn rejected_result_is_an_error_with_tx() {
        let patch = ActionPatch::from_result(&Ok(TxResult::rejected("0xdead")));
        assert_eq!(patch.status, Some(ActionStatus::Error));
        assert_eq!(patch.tx_id.as_deref(), Some("0xdead"));
    }

    #[test]
    fn dropped_runner_settles_as_interrupted() {
        let log = Rc::new(RefCell::new(AdminActionLog::default()));
        let id = log.record(AdminActionKind::Pause, None, None);
        drop(PendingAction {
            ledger: &log,
            id,
            settled: false,
        });
        let entry = log.borrow().get(id).cloned().unwrap();
        assert_eq!(entry.status, ActionStatus::Error);
        assert_eq!(entry.note.as_deref(), Some(INTERRUPTED_NOTE));

        let id = log.record(AdminActionKind::Unpause, None, None);
        let pending = PendingAction {
            ledger: &log,
            id,
            settled: false,
        };
        pending.settle(ActionPatch::from_result(&Ok(TxResult::ok("0xok"))));
        let entry = log.borrow().get(id).cloned().unwrap();
        assert_eq!(entry.status, ActionStatus::Success);
        assert_eq!(entry.note, None);
    }

    #[test]
    fn seeded_history_keeps_ids_unique() {
        let mut seed = AdminActionLog::default();
        seed.record(AdminActionKind::Deposit, None, None);
        seed.record(AdminActionKind::Pause, None, None);
        let history: Vec<AdminAction> = seed.iter().cloned().collect();

        let mut log = AdminActionLog::with_history(history);
        let id = log.record(AdminActionKind::Unpause, None, None);
        assert_eq!(log.len(), 3);
        assert_eq!(log.iter().filter(|a| a.id == id).count(), 1);
    }
}
