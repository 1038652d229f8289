//! Token holder listing: filter, sort and paginate an in-memory table, and
//! compute each holder's share of the dividend pool.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

use crate::stx_amount::MicroStx;

/// Page sizes offered by the holders table.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    pub address: String,
    /// Token balance in the token's smallest unit.
    pub balance: u64,
}

impl Holder {
    pub fn new(address: impl Into<String>, balance: u64) -> Self {
        Self {
            address: address.into(),
            balance,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIs,
)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Holders whose address contains `query`, ignoring case and surrounding
/// whitespace. An empty query keeps everything.
pub fn filter_holders<'a>(holders: &'a [Holder], query: &str) -> Vec<&'a Holder> {
    let query = query.trim().to_lowercase();
    holders
        .iter()
        .filter(|h| query.is_empty() || h.address.to_lowercase().contains(&query))
        .collect()
}

/// Stable sort by balance. Equal balances keep their input order.
pub fn sort_holders(holders: &mut [&Holder], order: SortOrder) {
    match order {
        SortOrder::Asc => holders.sort_by(|a, b| a.balance.cmp(&b.balance)),
        SortOrder::Desc => holders.sort_by(|a, b| b.balance.cmp(&a.balance)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into `1..=total_pages`.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Index of the first item of this page within the full list.
    pub offset: usize,
}

/// Cuts `items` into pages of `page_size` and returns the requested one.
/// There is always at least one (possibly empty) page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let offset = (page - 1) * page_size;
    let end = (offset + page_size).min(total_items);

    Page {
        items: items.get(offset..end).unwrap_or_default().to_vec(),
        page,
        total_pages,
        total_items,
        offset,
    }
}

/// `balance / supply * pool`, exact on micro-units and truncated.
/// `None` when the supply is zero.
pub fn entitlement(balance: u64, supply: u64, pool: MicroStx) -> Option<MicroStx> {
    if supply == 0 {
        return None;
    }
    let share = BigUint::from(balance) * BigUint::from(pool.as_micro()) / BigUint::from(supply);
    share.to_u128().map(MicroStx::from_micro)
}

/// Share of supply in basis points. Zero when the supply is zero.
pub fn share_bps(balance: u64, supply: u64) -> u64 {
    if supply == 0 {
        return 0;
    }
    let bps = BigUint::from(balance) * 10_000u32 / BigUint::from(supply);
    bps.to_u64().unwrap_or(u64::MAX)
}

/// Formats basis points as a percentage with two decimals, e.g. `"5.00%"`.
pub fn format_bps(bps: u64) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

/// Shortens long addresses to the first 6 and last 4 characters.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderRow {
    /// 1-based position in the filtered, sorted list.
    pub rank: usize,
    pub holder: Holder,
    pub share_bps: u64,
    pub entitlement: Option<MicroStx>,
}

/// UI state of the holders table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderTable {
    query: String,
    order: SortOrder,
    page_size: usize,
    page: usize,
}

impl Default for HolderTable {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl HolderTable {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            order: SortOrder::default(),
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn toggle_sort(&mut self) {
        self.order = self.order.toggled();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Filters, sorts and pages `holders`. The returned page number is the
    /// clamped one; the stored page is left as requested.
    pub fn view(&self, holders: &[Holder], supply: u64, pool: Option<MicroStx>) -> Page<HolderRow> {
        let mut visible = filter_holders(holders, &self.query);
        sort_holders(&mut visible, self.order);

        let rows: Vec<HolderRow> = visible
            .into_iter()
            .enumerate()
            .map(|(i, h)| HolderRow {
                rank: i + 1,
                holder: h.clone(),
                share_bps: share_bps(h.balance, supply),
                entitlement: pool.and_then(|pool| entitlement(h.balance, supply, pool)),
            })
            .collect();

        paginate(&rows, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Holder> {
        vec![
            Holder::new("SP1ALPHA", 50_000),
            Holder::new("SP2BETA", 35_000),
            Holder::new("sp3gamma", 35_000),
            Holder::new("SP4DELTA", 10),
        ]
    }

    #[test]
    fn filter_ignores_case_and_whitespace() {
        let holders = sample();
        assert_eq!(filter_holders(&holders, "").len(), 4);
        let hits: Vec<&str> = filter_holders(&holders, "  SP3 ")
            .iter()
            .map(|h| h.address.as_str())
            .collect();
        assert_eq!(hits, vec!["sp3gamma"]);
        assert!(filter_holders(&holders, "nothing").is_empty());
    }

    #[test]
    fn sort_is_stable() {
        let holders = sample();
        let mut refs = filter_holders(&holders, "");
        sort_holders(&mut refs, SortOrder::Desc);
        let order: Vec<&str> = refs.iter().map(|h| h.address.as_str()).collect();
        assert_eq!(order, vec!["SP1ALPHA", "SP2BETA", "sp3gamma", "SP4DELTA"]);

        sort_holders(&mut refs, SortOrder::Asc);
        let order: Vec<&str> = refs.iter().map(|h| h.address.as_str()).collect();
        assert_eq!(order, vec!["SP4DELTA", "SP2BETA", "sp3gamma", "SP1ALPHA"]);
    }

    #[test]
    fn pages_add_up_to_the_filtered_count() {
        let holders: Vec<Holder> = (0..23u64)
            .map(|i| Holder::new(format!("SP{}", if i % 3 == 0 { "KEEP" } else { "DROP" }), i))
            .collect();
        let filtered = filter_holders(&holders, "keep");
        let n = filtered.len();
        assert_eq!(n, 8);

        for page_size in [1, 3, 25, n + 5] {
            let total_pages = paginate(&filtered, 1, page_size).total_pages;
            let seen: usize = (1..=total_pages)
                .map(|page| paginate(&filtered, page, page_size).items.len())
                .sum();
            assert_eq!(seen, n, "page size {page_size}");
        }
    }

    #[test]
    fn ascending_is_descending_reversed() {
        let holders: Vec<Holder> = [7u64, 3, 99, 42, 0, 18]
            .iter()
            .enumerate()
            .map(|(i, &balance)| Holder::new(format!("SP{i}"), balance))
            .collect();

        let mut asc = filter_holders(&holders, "");
        sort_holders(&mut asc, SortOrder::Asc);
        let mut desc = filter_holders(&holders, "");
        sort_holders(&mut desc, SortOrder::Desc);

        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn paginate_clamps() {
        let items: Vec<u32> = (0..23).collect();
        let last = paginate(&items, 99, 10);
        assert_eq!(last.page, 3);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.items, vec![20, 21, 22]);
        assert_eq!(last.offset, 20);

        let first = paginate(&items, 0, 10);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 10);

        let empty = paginate::<u32>(&[], 4, 25);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn entitlement_is_exact() {
        let pool = MicroStx::from_stx(100);
        assert_eq!(entitlement(50_000, 1_000_000, pool), Some(MicroStx::from_stx(5)));
        assert_eq!(
            entitlement(35_000, 1_000_000, pool),
            Some(MicroStx::from_micro(3_500_000))
        );
        assert_eq!(entitlement(1, 0, pool), None);
        assert_eq!(share_bps(50_000, 1_000_000), 500);
        assert_eq!(format_bps(share_bps(35_000, 1_000_000)), "3.50%");
        assert_eq!(share_bps(5, 0), 0);
    }

    #[test]
    fn address_truncation() {
        assert_eq!(truncate_address("SP1SHORT"), "SP1SHORT");
        assert_eq!(truncate_address("SP123456789A"), "SP123456789A");
        assert_eq!(
            truncate_address("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"),
            "SP2J6Z…9EJ7"
        );
    }

    #[test]
    fn table_state_resets_page() {
        let holders = sample();
        let mut table = HolderTable::new(2);
        table.set_page(2);
        let page = table.view(&holders, 1_000_000, Some(MicroStx::from_stx(100)));
        assert_eq!(page.page, 2);
        assert_eq!(page.items[0].rank, 3);

        table.set_query("sp");
        assert_eq!(table.page(), 1);
        table.set_page(2);
        table.set_page_size(10);
        assert_eq!(table.page(), 1);

        table.toggle_sort();
        let page = table.view(&holders, 1_000_000, None);
        assert_eq!(page.items[0].holder.address, "SP4DELTA");
        assert_eq!(page.items[0].entitlement, None);
    }
}
