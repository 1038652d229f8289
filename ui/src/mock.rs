//! Simulated wallet and contract used by the bundled front ends. Every call
//! waits a little to feel like a network round trip.

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::anyhow;
use api::contract::ContractBackend;
use api::contract::ContractError;
use api::contract::ContractStatus;
use api::contract::TxResult;
use api::dividends::ClaimBackend;
use api::dividends::Distribution;
use api::dividends::DividendBalances;
use api::holders::entitlement;
use api::holders::Holder;
use api::network::Network;
use api::stx_amount::MicroStx;
use api::wallet::WalletError;
use api::wallet::WalletProvider;
use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;

use crate::compat;

pub const DEMO_ADDRESS: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";
pub const CONTRACT_ADDRESS: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7.finovault-dividend";

const DEMO_STX_BALANCE: &str = "1234567891";

const CONNECT_DELAY: Duration = Duration::from_secs(1);
const ADMIN_CALL_DELAY: Duration = Duration::from_secs(2);
const STATUS_DELAY: Duration = Duration::from_millis(500);
const CLAIM_SUBMIT_DELAY: Duration = Duration::from_secs(2);
const CLAIM_CONFIRM_DELAY: Duration = Duration::from_secs(3);
const REFRESH_DELAY: Duration = Duration::from_secs(1);

const TX_ID_SPREAD: u128 = 0x9E37_79B9_7F4A_7C15_F39C_C060_5CED_C835;

/// Daily pool deposits of the past week, oldest first, in micro-STX.
const SEEDED_DISTRIBUTIONS: [u128; 7] = [
    15_200_000, 22_800_000, 18_500_000, 31_400_000, 12_900_000, 8_750_000, 12_500_000,
];

#[derive(Clone, Default)]
pub struct MockWallet {
    address: Rc<RefCell<Option<String>>>,
}

impl WalletProvider for MockWallet {
    async fn connect(&self) -> Result<String, WalletError> {
        compat::sleep(CONNECT_DELAY).await;
        *self.address.borrow_mut() = Some(DEMO_ADDRESS.to_string());
        Ok(DEMO_ADDRESS.to_string())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.address.borrow_mut().take();
        Ok(())
    }

    fn is_signed_in(&self) -> bool {
        self.address.borrow().is_some()
    }

    /// Testnet addresses use the `ST` version prefix.
    fn address(&self, network: Network) -> Option<String> {
        let address = self.address.borrow().clone()?;
        if network.is_mainnet() {
            Some(address)
        } else {
            Some(address.replacen("SP", "ST", 1))
        }
    }

    async fn stx_balance(&self, _address: &str) -> Result<MicroStx, WalletError> {
        if !self.is_signed_in() {
            return Err(WalletError::NotConnected);
        }
        // the wallet API reports balances as micro-unit strings
        MicroStx::from_micro_str(DEMO_STX_BALANCE)
            .map_err(|e| WalletError::Transport(anyhow!("bad balance {DEMO_STX_BALANCE:?}: {e}")))
    }
}

/// Token holders plus what is needed to compute their entitlements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoldersSnapshot {
    pub holders: Vec<Holder>,
    pub supply: u64,
    /// Total STX deposited for distribution so far.
    pub pool: Option<MicroStx>,
}

struct MockChain {
    paused: bool,
    holders: Vec<Holder>,
    pool: MicroStx,
    last_dividend_at: Option<DateTime<Utc>>,
    distributions: Vec<Distribution>,
    claimable: MicroStx,
    total_received: MicroStx,
    tx_counter: u64,
}

impl MockChain {
    fn seeded() -> Self {
        let mut holders = vec![
            Holder::new(DEMO_ADDRESS, 50_000),
            Holder::new("SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE", 35_000),
        ];
        // 38 more holders sharing the rest of the 1M supply
        let rest = 1_000_000 - 85_000;
        for i in 0..38u64 {
            let balance = if i == 37 { rest - 24_000 * 37 } else { 24_000 };
            let tag = (i + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            holders.push(Holder::new(format!("SP{:038X}", tag), balance));
        }
        let now = Utc::now();
        let distributions = SEEDED_DISTRIBUTIONS
            .iter()
            .zip((1..=7i64).rev())
            .map(|(&micro, days_ago)| Distribution {
                timestamp: now - TimeDelta::days(days_ago),
                amount: MicroStx::from_micro(micro),
            })
            .collect();
        Self {
            paused: false,
            holders,
            pool: MicroStx::from_stx(100),
            last_dividend_at: None,
            distributions,
            claimable: MicroStx::from_micro(45_832_000),
            total_received: MicroStx::from_micro(12_500_000),
            tx_counter: 0,
        }
    }

    fn supply(&self) -> u64 {
        self.holders
            .iter()
            .fold(0u64, |acc, h| acc.saturating_add(h.balance))
    }

    /// Credits whole tokens to `recipient`, refusing anything that would
    /// overflow a balance or the total supply.
    fn mint(&mut self, recipient: &str, amount: MicroStx) -> Result<(), ContractError> {
        let units = amount
            .whole_tokens()
            .ok_or_else(|| anyhow!("mint amount must be a whole token count"))?;
        self.supply()
            .checked_add(units)
            .ok_or_else(|| anyhow!("mint would overflow the token supply"))?;
        match self.holders.iter_mut().find(|h| h.address == recipient) {
            Some(holder) => {
                holder.balance = holder
                    .balance
                    .checked_add(units)
                    .ok_or_else(|| anyhow!("mint would overflow the recipient balance"))?;
            }
            None => self.holders.push(Holder::new(recipient, units)),
        }
        Ok(())
    }

    /// Debits whole tokens; `false` when the holder lacks the balance.
    fn burn(&mut self, recipient: &str, amount: MicroStx) -> bool {
        let Some(units) = amount.whole_tokens() else {
            return false;
        };
        let burned = match self.holders.iter_mut().find(|h| h.address == recipient) {
            Some(holder) if holder.balance >= units => {
                holder.balance -= units;
                true
            }
            _ => false,
        };
        self.holders.retain(|h| h.balance > 0);
        burned
    }

    fn balance_of(&self, address: &str) -> u64 {
        self.holders
            .iter()
            .find(|h| h.address == address)
            .map(|h| h.balance)
            .unwrap_or(0)
    }

    fn next_tx_id(&mut self) -> String {
        self.tx_counter += 1;
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u128;
        let mixed = nanos ^ (self.tx_counter as u128).wrapping_mul(TX_ID_SPREAD);
        format!("0x{:064x}", mixed)
    }

    fn ensure_active(&self) -> Result<(), ContractError> {
        if self.paused {
            Err(ContractError::Paused)
        } else {
            Ok(())
        }
    }
}

#[derive(Clone)]
pub struct MockContract {
    chain: Rc<RefCell<MockChain>>,
    network: Rc<Cell<Network>>,
}

impl MockContract {
    pub fn new(network: Network) -> Self {
        Self {
            chain: Rc::new(RefCell::new(MockChain::seeded())),
            network: Rc::new(Cell::new(network)),
        }
    }

    pub fn set_network(&self, network: Network) {
        self.network.set(network);
    }

    pub async fn fetch_balances(&self, address: &str) -> Result<DividendBalances, ContractError> {
        compat::sleep(REFRESH_DELAY).await;
        let chain = self.chain.borrow();
        Ok(DividendBalances {
            div_balance: chain.balance_of(address),
            claimable: chain.claimable,
            total_received: chain.total_received,
            token_supply: chain.supply(),
        })
    }

    pub async fn fetch_distributions(&self) -> Result<Vec<Distribution>, ContractError> {
        compat::sleep(REFRESH_DELAY).await;
        Ok(self.chain.borrow().distributions.clone())
    }

    pub async fn fetch_holders(&self) -> Result<HoldersSnapshot, ContractError> {
        compat::sleep(REFRESH_DELAY).await;
        let chain = self.chain.borrow();
        Ok(HoldersSnapshot {
            holders: chain.holders.clone(),
            supply: chain.supply(),
            pool: (!chain.pool.is_zero()).then_some(chain.pool),
        })
    }
}

impl ContractBackend for MockContract {
    async fn deposit(&self, amount: MicroStx) -> Result<TxResult, ContractError> {
        compat::sleep(ADMIN_CALL_DELAY).await;
        let mut chain = self.chain.borrow_mut();
        chain.ensure_active()?;
        let share = entitlement(chain.balance_of(DEMO_ADDRESS), chain.supply(), amount);
        chain.claimable += share.unwrap_or(MicroStx::ZERO);
        chain.pool += amount;
        let now = Utc::now();
        chain.last_dividend_at = Some(now);
        chain.distributions.push(Distribution {
            timestamp: now,
            amount,
        });
        Ok(TxResult::ok(chain.next_tx_id()))
    }

    async fn mint(&self, recipient: &str, amount: MicroStx) -> Result<TxResult, ContractError> {
        compat::sleep(ADMIN_CALL_DELAY).await;
        let mut chain = self.chain.borrow_mut();
        chain.ensure_active()?;
        chain.mint(recipient, amount)?;
        Ok(TxResult::ok(chain.next_tx_id()))
    }

    async fn burn(&self, recipient: &str, amount: MicroStx) -> Result<TxResult, ContractError> {
        compat::sleep(ADMIN_CALL_DELAY).await;
        let mut chain = self.chain.borrow_mut();
        chain.ensure_active()?;
        let burned = chain.burn(recipient, amount);
        let tx_id = chain.next_tx_id();
        // an insufficient balance aborts on chain
        Ok(if burned {
            TxResult::ok(tx_id)
        } else {
            TxResult::rejected(tx_id)
        })
    }

    async fn pause(&self) -> Result<TxResult, ContractError> {
        compat::sleep(ADMIN_CALL_DELAY).await;
        let mut chain = self.chain.borrow_mut();
        let tx_id = chain.next_tx_id();
        if chain.paused {
            return Ok(TxResult::rejected(tx_id));
        }
        chain.paused = true;
        Ok(TxResult::ok(tx_id))
    }

    async fn unpause(&self) -> Result<TxResult, ContractError> {
        compat::sleep(ADMIN_CALL_DELAY).await;
        let mut chain = self.chain.borrow_mut();
        let tx_id = chain.next_tx_id();
        if !chain.paused {
            return Ok(TxResult::rejected(tx_id));
        }
        chain.paused = false;
        Ok(TxResult::ok(tx_id))
    }

    async fn fetch_status(&self) -> Result<ContractStatus, ContractError> {
        compat::sleep(STATUS_DELAY).await;
        let chain = self.chain.borrow();
        Ok(ContractStatus {
            paused: chain.paused,
            total_supply: Some(chain.supply()),
            contract_address: Some(CONTRACT_ADDRESS.to_string()),
            network: Some(self.network.get()),
            last_dividend_at: chain.last_dividend_at,
            owner_address: Some(DEMO_ADDRESS.to_string()),
        })
    }
}

impl ClaimBackend for MockContract {
    async fn submit_claim(&self) -> Result<String, ContractError> {
        compat::sleep(CLAIM_SUBMIT_DELAY).await;
        let mut chain = self.chain.borrow_mut();
        chain.ensure_active()?;
        if chain.claimable.is_zero() {
            return Err(anyhow!("nothing to claim").into());
        }
        Ok(chain.next_tx_id())
    }

    async fn await_confirmation(&self, _tx_id: &str) -> Result<(), ContractError> {
        compat::sleep(CLAIM_CONFIRM_DELAY).await;
        let mut chain = self.chain.borrow_mut();
        let claimed = chain.claimable;
        chain.total_received += claimed;
        chain.claimable = MicroStx::ZERO;
        Ok(())
    }
}
