//! Shared building blocks used across screens.
pub mod address;
pub mod amount;
pub mod dividend_chart;
pub mod empty_state;
pub mod pico;
pub mod toaster;
pub mod tx_hash;
pub mod wallet_connection;
