pub mod aggregator;
pub mod allocator;
pub mod pipeline;
pub mod pnl;
pub mod projector;

pub use aggregator::BucketSlice;
pub use pipeline::{ConsolidationEngine, Granularity, ReportFilter};
pub use pnl::{PnlComparison, PnlStatement};
pub use projector::ChartRow;
