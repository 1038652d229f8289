use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use api::admin::execute_admin_action;
use api::admin::ActionStatus;
use api::admin::AdminActionKind;
use api::admin::AdminActionLog;
use api::admin::INTERRUPTED_NOTE;
use api::contract::ContractBackend;
use api::contract::ContractError;
use api::contract::ContractStatus;
use api::contract::TxResult;
use api::notify::ToastBody;
use api::notify::ToastQueue;
use api::stx_amount::AmountError;
use api::stx_amount::MicroStx;
use api::validation::AdminRequest;

/// In-memory contract that answers every write the same way.
#[derive(Default)]
struct MockContract {
    reject: bool,
    fail_with: Option<&'static str>,
    /// Never answers, like a node that hangs.
    stall: bool,
    last_recipient: RefCell<Option<String>>,
}

impl MockContract {
    async fn answer(&self, tx_id: &str) -> Result<TxResult, ContractError> {
        if self.stall {
            std::future::pending::<()>().await;
        }
        if let Some(msg) = self.fail_with {
            return Err(anyhow::anyhow!(msg).into());
        }
        Ok(if self.reject {
            TxResult::rejected(tx_id)
        } else {
            TxResult::ok(tx_id)
        })
    }
}

impl ContractBackend for MockContract {
    async fn deposit(&self, _amount: MicroStx) -> Result<TxResult, ContractError> {
        self.answer("0xdeposit").await
    }

    async fn mint(&self, recipient: &str, _amount: MicroStx) -> Result<TxResult, ContractError> {
        *self.last_recipient.borrow_mut() = Some(recipient.to_string());
        self.answer("0xmint").await
    }

    async fn burn(&self, recipient: &str, _amount: MicroStx) -> Result<TxResult, ContractError> {
        *self.last_recipient.borrow_mut() = Some(recipient.to_string());
        self.answer("0xburn").await
    }

    async fn pause(&self) -> Result<TxResult, ContractError> {
        self.answer("0xpause").await
    }

    async fn unpause(&self) -> Result<TxResult, ContractError> {
        self.answer("0xunpause").await
    }

    async fn fetch_status(&self) -> Result<ContractStatus, ContractError> {
        Ok(ContractStatus::default())
    }
}

fn fixtures() -> (Rc<RefCell<ToastQueue>>, Rc<RefCell<AdminActionLog>>) {
    (
        Rc::new(RefCell::new(ToastQueue::default())),
        Rc::new(RefCell::new(AdminActionLog::default())),
    )
}

fn only_message(queue: &Rc<RefCell<ToastQueue>>) -> String {
    let toast = {
        let queue = queue.borrow();
        assert_eq!(queue.len(), 1);
        let toast = queue.iter().next().cloned().expect("one toast");
        toast
    };
    match toast.body {
        ToastBody::Message { message, .. } => message,
        other => panic!("unexpected toast body {other:?}"),
    }
}

#[tokio::test]
async fn deposit_success_is_logged_and_toasted() {
    let (queue, log) = fixtures();
    let contract = MockContract::default();
    let request = AdminRequest::deposit("12.5").unwrap();

    let outcome = execute_admin_action(&contract, &queue, &log, request).await;

    assert_eq!(outcome.status, ActionStatus::Success);
    assert_eq!(outcome.tx_id.as_deref(), Some("0xdeposit"));
    assert_eq!(outcome.paused_after(), None);

    let log = log.borrow();
    let entry = log.get(outcome.action_id).unwrap();
    assert_eq!(entry.kind, AdminActionKind::Deposit);
    assert_eq!(entry.amount, Some(MicroStx::from_micro(12_500_000)));
    assert_eq!(entry.status, ActionStatus::Success);

    assert_eq!(only_message(&queue), "Dividend deposit confirmed");
}

#[tokio::test]
async fn pause_and_unpause_report_new_state() {
    let (queue, log) = fixtures();
    let contract = MockContract::default();

    let paused = execute_admin_action(&contract, &queue, &log, AdminRequest::Pause).await;
    assert_eq!(paused.paused_after(), Some(true));
    let resumed = execute_admin_action(&contract, &queue, &log, AdminRequest::Unpause).await;
    assert_eq!(resumed.paused_after(), Some(false));

    let kinds: Vec<AdminActionKind> = log.borrow().iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AdminActionKind::Unpause, AdminActionKind::Pause]);
}

#[tokio::test]
async fn rejected_mint_uses_failure_text() {
    let (queue, log) = fixtures();
    let contract = MockContract {
        reject: true,
        ..Default::default()
    };
    let request = AdminRequest::mint("SP2RECIPIENT", "100").unwrap();

    let outcome = execute_admin_action(&contract, &queue, &log, request).await;

    assert_eq!(outcome.status, ActionStatus::Error);
    assert_eq!(outcome.tx_id.as_deref(), Some("0xmint"));
    assert_eq!(contract.last_recipient.borrow().as_deref(), Some("SP2RECIPIENT"));
    assert_eq!(only_message(&queue), "Mint transaction failed");
}

#[tokio::test]
async fn transport_error_is_swallowed_into_note() {
    let (queue, log) = fixtures();
    let contract = MockContract {
        fail_with: Some("node unreachable"),
        ..Default::default()
    };
    let request = AdminRequest::burn("SP2RECIPIENT", "1").unwrap();

    let outcome = execute_admin_action(&contract, &queue, &log, request).await;

    assert_eq!(outcome.status, ActionStatus::Error);
    assert_eq!(outcome.paused_after(), None);
    assert_eq!(
        log.borrow().get(outcome.action_id).unwrap().note.as_deref(),
        Some("node unreachable")
    );
    assert_eq!(only_message(&queue), "node unreachable");
}

#[test]
fn invalid_input_never_becomes_a_request() {
    let err = AdminRequest::deposit("-5").unwrap_err();
    assert_eq!(err.amount, Some(AmountError::NotPositive));
    assert!(AdminRequest::mint("SP", "5").unwrap_err().recipient.is_some());

    let err = AdminRequest::mint("SP2RECIPIENT", "12.5").unwrap_err();
    assert_eq!(err.amount, Some(AmountError::NotWholeTokens));
    assert_eq!(
        err.first_message().as_deref(),
        Some("Token amounts must be whole numbers")
    );
    assert!(AdminRequest::burn("SP2RECIPIENT", "0.5").is_err());
}

#[tokio::test]
async fn cancelled_call_leaves_no_pending_entry() {
    let (queue, log) = fixtures();
    let contract = MockContract {
        stall: true,
        ..Default::default()
    };
    let request = AdminRequest::deposit("5").unwrap();

    let run = execute_admin_action(&contract, &queue, &log, request);
    let timed_out = tokio::time::timeout(Duration::from_millis(20), run).await;
    assert!(timed_out.is_err());

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    let entry = log.iter().next().unwrap();
    assert_eq!(entry.status, ActionStatus::Error);
    assert_eq!(entry.note.as_deref(), Some(INTERRUPTED_NOTE));
    assert!(queue.borrow().is_empty());
}
