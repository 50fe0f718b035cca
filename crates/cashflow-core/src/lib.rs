pub mod error;
pub mod rates;
pub mod time_value;
pub mod types;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::CashflowError;
pub use types::*;

/// Standard result type for all cashflow operations
pub type CashflowResult<T> = Result<T, CashflowError>;
