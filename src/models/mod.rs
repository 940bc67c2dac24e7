mod budget;
mod money;
mod transaction;

pub use budget::Budget;
pub use money::round_money;
pub use transaction::{Transaction, TransactionKind};

#[cfg(test)]
mod tests;
