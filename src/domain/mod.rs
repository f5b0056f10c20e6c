pub mod allocation;
pub mod catalog;
pub mod tree;
pub mod uen;

pub use allocation::{AllocationRates, AllocationTable};
pub use catalog::{PnlBucket, RubroCatalog, RubroDef, SubrubroDef};
pub use tree::{BucketTotals, BudgetTree, RubroIndex, SubrubroIndex, Year};
pub use uen::{Uen, NACIONAL};
