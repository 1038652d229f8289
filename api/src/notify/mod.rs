//! Notifications: the toast registry, one-off notices and transaction
//! lifecycle tickets.

pub mod notice;
pub mod toast;
pub mod tx;

pub use notice::NoticeOptions;
pub use toast::Notifier;
pub use toast::Toast;
pub use toast::ToastBody;
pub use toast::ToastId;
pub use toast::ToastLevel;
pub use toast::ToastQueue;
pub use tx::begin_transaction;
pub use tx::TxParams;
pub use tx::TxPatch;
pub use tx::TxState;
pub use tx::TxTicket;
pub use tx::TxType;
pub use tx::TxView;
