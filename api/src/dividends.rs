//! Dividend balances, claim history, the distribution chart series and the
//! claim flow.

use std::collections::BTreeMap;
use std::collections::VecDeque;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::TimeDelta;
use chrono::Utc;
use dioxus_logger::tracing::info;
use dioxus_logger::tracing::warn;
use serde::Deserialize;
use serde::Serialize;

use crate::contract::ContractError;
use crate::network::Network;
use crate::notify::Notifier;
use crate::notify::TxParams;
use crate::notify::TxPatch;
use crate::notify::TxType;
use crate::notify::begin_transaction;
use crate::stx_amount::MicroStx;

/// Number of claims listed on the dashboard.
pub const RECENT_CLAIMS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DividendBalances {
    /// Dividend token balance of the connected wallet.
    pub div_balance: u64,
    pub claimable: MicroStx,
    pub total_received: MicroStx,
    pub token_supply: u64,
}

impl DividendBalances {
    /// A claim is possible when something is claimable and no claim is
    /// already running.
    pub fn can_claim(&self, claim_in_flight: bool) -> bool {
        !claim_in_flight && !self.claimable.is_zero()
    }

    /// Moves everything claimable into the received total. Returns the
    /// amount moved.
    pub fn apply_claim(&mut self) -> MicroStx {
        let claimed = self.claimable;
        self.total_received += claimed;
        self.claimable = MicroStx::ZERO;
        claimed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendRecord {
    pub id: u64,
    pub tx_id: String,
    pub amount: MicroStx,
    pub timestamp: DateTime<Utc>,
}

/// Past claims, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DividendHistory {
    records: VecDeque<DividendRecord>,
    next_id: u64,
}

impl DividendHistory {
    pub fn push(&mut self, tx_id: impl Into<String>, amount: MicroStx) -> &DividendRecord {
        self.next_id += 1;
        self.records.push_front(DividendRecord {
            id: self.next_id,
            tx_id: tx_id.into(),
            amount,
            timestamp: Utc::now(),
        });
        &self.records[0]
    }

    pub fn recent(&self) -> impl Iterator<Item = &DividendRecord> {
        self.records.iter().take(RECENT_CLAIMS)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One dividend deposit into the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub timestamp: DateTime<Utc>,
    pub amount: MicroStx,
}

/// How far back the distribution chart looks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumIter, strum::Display, strum::EnumString,
)]
pub enum ChartRange {
    #[strum(serialize = "7d")]
    Week,
    #[strum(serialize = "30d")]
    Month,
    #[default]
    #[strum(serialize = "90d")]
    Quarter,
    #[strum(serialize = "all")]
    All,
}

impl ChartRange {
    /// Days covered, `None` for no limit.
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Quarter => Some(90),
            Self::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "7D",
            Self::Month => "30D",
            Self::Quarter => "90D",
            Self::All => "All",
        }
    }
}

/// Whether chart points show each day's amount or the running total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumIter, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ChartMode {
    Individual,
    #[default]
    Cumulative,
}

/// One point of the distribution chart: a UTC day and its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub day: NaiveDate,
    pub amount: MicroStx,
}

/// Builds the chart series: distributions inside `range` (counted back from
/// `now`), summed per UTC day, oldest day first. In cumulative mode each
/// point carries the running total instead.
pub fn distribution_series(
    distributions: &[Distribution],
    range: ChartRange,
    mode: ChartMode,
    now: DateTime<Utc>,
) -> Vec<SeriesPoint> {
    let cutoff = range.days().map(|days| now - TimeDelta::days(days));

    let mut per_day: BTreeMap<NaiveDate, MicroStx> = BTreeMap::new();
    for d in distributions {
        if cutoff.is_some_and(|cutoff| d.timestamp < cutoff) {
            continue;
        }
        *per_day.entry(d.timestamp.date_naive()).or_default() += d.amount;
    }

    let mut total = MicroStx::ZERO;
    per_day
        .into_iter()
        .map(|(day, amount)| {
            let amount = match mode {
                ChartMode::Individual => amount,
                ChartMode::Cumulative => {
                    total += amount;
                    total
                }
            };
            SeriesPoint { day, amount }
        })
        .collect()
}

/// The contract side of a dividend claim.
#[allow(async_fn_in_trait)]
pub trait ClaimBackend {
    /// Submits the claim and returns its transaction id.
    async fn submit_claim(&self) -> Result<String, ContractError>;
    /// Resolves once the transaction is confirmed.
    async fn await_confirmation(&self, tx_id: &str) -> Result<(), ContractError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub tx_id: String,
    pub amount: MicroStx,
}

/// Claims `amount` and drives a transaction notification through its
/// lifecycle. Failures mark the notification failed and are returned to the
/// caller.
pub async fn claim_dividends<N, B>(
    notifier: N,
    backend: &B,
    network: Network,
    amount: MicroStx,
) -> Result<ClaimReceipt, ContractError>
where
    N: Notifier,
    B: ClaimBackend,
{
    let params = TxParams::new(TxType::Claim)
        .with_network(network)
        .with_title("Claiming dividends")
        .with_message("Processing your dividend claim...");
    let mut ticket = begin_transaction(notifier, params);

    let result = async {
        let tx_id = backend.submit_claim().await?;
        ticket.to_pending(TxPatch::hash(tx_id.clone()));
        backend.await_confirmation(&tx_id).await?;
        Ok::<_, ContractError>(tx_id)
    }
    .await;

    match result {
        Ok(tx_id) => {
            ticket.to_confirmed(TxPatch::message(format!(
                "Successfully claimed {} STX",
                amount
            )));
            info!("claimed {} in {}", amount.to_string_with_code(), tx_id);
            Ok(ClaimReceipt { tx_id, amount })
        }
        Err(e) => {
            warn!("claim failed: {}", e);
            ticket.to_failed(TxPatch::error(e.to_string()));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_claim_moves_balance() {
        let mut balances = DividendBalances {
            div_balance: 50_000,
            claimable: MicroStx::from_micro(45_832_000),
            total_received: MicroStx::from_stx(10),
            token_supply: 1_000_000,
        };
        assert!(balances.can_claim(false));
        assert!(!balances.can_claim(true));

        let claimed = balances.apply_claim();
        assert_eq!(claimed, MicroStx::from_micro(45_832_000));
        assert_eq!(balances.total_received, MicroStx::from_micro(55_832_000));
        assert!(balances.claimable.is_zero());
        assert!(!balances.can_claim(false));
    }

    #[test]
    fn history_keeps_recent_first() {
        let mut history = DividendHistory::default();
        for i in 0..10 {
            history.push(format!("0x{i}"), MicroStx::from_stx(i));
        }
        assert_eq!(history.len(), 10);
        let recent: Vec<&str> = history.recent().map(|r| r.tx_id.as_str()).collect();
        assert_eq!(recent.len(), RECENT_CLAIMS);
        assert_eq!(recent[0], "0x9");
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        use chrono::TimeZone;
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn dist(day: u32, hour: u32, stx: u64) -> Distribution {
        Distribution {
            timestamp: at(day, hour),
            amount: MicroStx::from_stx(stx),
        }
    }

    fn amounts(points: &[SeriesPoint]) -> Vec<u64> {
        points
            .iter()
            .map(|p| p.amount.whole_stx() as u64)
            .collect()
    }

    #[test]
    fn series_groups_by_day_oldest_first() {
        // out of order, two on the 10th
        let data = [dist(12, 9, 5), dist(10, 8, 1), dist(11, 0, 2), dist(10, 23, 3)];
        let now = at(20, 0);

        let points = distribution_series(&data, ChartRange::Month, ChartMode::Individual, now);
        let days: Vec<u32> = points.iter().map(|p| chrono::Datelike::day(&p.day)).collect();
        assert_eq!(days, vec![10, 11, 12]);
        assert_eq!(amounts(&points), vec![4, 2, 5]);

        let points = distribution_series(&data, ChartRange::Month, ChartMode::Cumulative, now);
        assert_eq!(amounts(&points), vec![4, 6, 11]);
    }

    #[test]
    fn series_respects_range() {
        let data = [dist(1, 12, 7), dist(14, 12, 3), dist(20, 12, 2)];
        let now = at(21, 12);

        let week = distribution_series(&data, ChartRange::Week, ChartMode::Individual, now);
        assert_eq!(amounts(&week), vec![3, 2]);
        // the cutoff is inclusive
        assert_eq!(week[0].day, at(14, 12).date_naive());

        let all = distribution_series(&data, ChartRange::All, ChartMode::Cumulative, now);
        assert_eq!(amounts(&all), vec![7, 10, 12]);

        assert!(distribution_series(&[], ChartRange::All, ChartMode::Individual, now).is_empty());
    }

    #[test]
    fn chart_options_parse_from_their_labels() {
        use std::str::FromStr;
        assert_eq!(ChartRange::from_str("7d"), Ok(ChartRange::Week));
        assert_eq!(ChartRange::Quarter.to_string(), "90d");
        assert_eq!(ChartRange::default(), ChartRange::Quarter);
        assert_eq!(ChartMode::from_str("individual"), Ok(ChartMode::Individual));
        assert_eq!(ChartMode::default(), ChartMode::Cumulative);
    }
}
