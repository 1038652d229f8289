use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use api::contract::ContractError;
use api::dividends::claim_dividends;
use api::dividends::ClaimBackend;
use api::dividends::DividendBalances;
use api::network::Network;
use api::notify::ToastBody;
use api::notify::ToastLevel;
use api::notify::ToastQueue;
use api::notify::TxState;
use api::notify::TxView;
use api::notify::tx::INTERRUPTED_MESSAGE;
use api::stx_amount::MicroStx;

struct MockClaim {
    tx_id: &'static str,
    confirm_error: Option<&'static str>,
    /// Confirmation never arrives.
    stall: bool,
}

impl ClaimBackend for MockClaim {
    async fn submit_claim(&self) -> Result<String, ContractError> {
        Ok(self.tx_id.to_string())
    }

    async fn await_confirmation(&self, _tx_id: &str) -> Result<(), ContractError> {
        if self.stall {
            std::future::pending::<()>().await;
        }
        match self.confirm_error {
            Some(msg) => Err(anyhow::anyhow!(msg).into()),
            None => Ok(()),
        }
    }
}

fn tx_view(queue: &Rc<RefCell<ToastQueue>>) -> (ToastLevel, TxView) {
    let queue = queue.borrow();
    assert_eq!(queue.len(), 1);
    let toast = queue.iter().next().unwrap();
    match &toast.body {
        ToastBody::Transaction(view) => (toast.level, view.clone()),
        other => panic!("unexpected toast body {other:?}"),
    }
}

#[tokio::test]
async fn successful_claim_confirms_ticket() {
    let queue = Rc::new(RefCell::new(ToastQueue::default()));
    let backend = MockClaim {
        tx_id: "0xabc",
        confirm_error: None,
        stall: false,
    };
    let mut balances = DividendBalances {
        claimable: MicroStx::from_micro(45_832_000),
        ..Default::default()
    };

    let receipt = claim_dividends(&queue, &backend, Network::Testnet, balances.claimable)
        .await
        .unwrap();
    assert_eq!(receipt.tx_id, "0xabc");
    assert_eq!(balances.apply_claim(), receipt.amount);

    let (level, view) = tx_view(&queue);
    assert!(level.is_success());
    assert_eq!(view.state, TxState::Confirmed);
    assert_eq!(view.hash.as_deref(), Some("0xabc"));
    assert_eq!(view.message, "Successfully claimed 45.832 STX");
    assert_eq!(
        view.explorer_url().as_deref(),
        Some("https://explorer.hiro.so/txid/0xabc?chain=testnet")
    );
}

#[tokio::test]
async fn failed_confirmation_marks_ticket_failed_and_propagates() {
    let queue = Rc::new(RefCell::new(ToastQueue::default()));
    let backend = MockClaim {
        tx_id: "0xdef",
        confirm_error: Some("transaction aborted"),
        stall: false,
    };

    let err = claim_dividends(&queue, &backend, Network::Mainnet, MicroStx::from_stx(1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "transaction aborted");

    let (level, view) = tx_view(&queue);
    assert!(level.is_error());
    assert_eq!(view.state, TxState::Failed);
    assert_eq!(view.hash.as_deref(), Some("0xdef"));
    assert_eq!(view.message, "transaction aborted");
}

#[tokio::test]
async fn cancelled_claim_fails_its_ticket() {
    let queue = Rc::new(RefCell::new(ToastQueue::default()));
    let backend = MockClaim {
        tx_id: "0x123",
        confirm_error: None,
        stall: true,
    };

    let claim = claim_dividends(&queue, &backend, Network::Testnet, MicroStx::from_stx(2));
    assert!(tokio::time::timeout(Duration::from_millis(20), claim).await.is_err());

    let (level, view) = tx_view(&queue);
    assert!(level.is_error());
    assert_eq!(view.state, TxState::Failed);
    assert_eq!(view.hash.as_deref(), Some("0x123"));
    assert_eq!(view.message, INTERRUPTED_MESSAGE);
}
