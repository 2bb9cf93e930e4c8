//! Transaction domain models and shared entity traits.

pub mod common;
pub mod range;
pub mod transaction;

pub use common::{Displayable, Identifiable};
pub use range::DateRange;
pub use transaction::{Transaction, TransactionKind};
