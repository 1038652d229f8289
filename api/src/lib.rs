//! Domain logic shared by every FinoVault front end: amounts, notifications,
//! admin actions, holder listings and the collaborator traits the UI plugs
//! real or simulated backends into.

pub mod admin;
pub mod contract;
pub mod dividends;
pub mod holders;
pub mod network;
pub mod notify;
pub mod poll_guard;
pub mod settings;
pub mod stx_amount;
pub mod validation;
pub mod wallet;

pub type ApiError = anyhow::Error;
