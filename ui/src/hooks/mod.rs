pub mod use_poller;
pub mod use_toasts;
