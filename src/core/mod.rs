//! Core business logic abstractions

pub mod aggregate;
pub mod config;
pub mod convert;
pub mod currency;
pub mod identity;
pub mod input;
pub mod ledger;
pub mod log;
pub mod rates;
pub mod subscription;

// Re-export main types for cleaner imports
pub use aggregate::LedgerTotals;
pub use convert::{Converter, Normalizer, REFERENCE_CURRENCY};
pub use currency::CurrencyCode;
pub use identity::{AuthError, AuthUser, Credentials, IdentityProvider};
pub use input::InputError;
pub use ledger::{FeedError, LedgerClient, LedgerPath};
pub use rates::RateTable;
pub use subscription::{LedgerState, LedgerSubscription};
