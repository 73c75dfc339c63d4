pub mod chart;
pub mod listing;
pub mod market_data;
pub mod report;

pub use chart::ChartRenderer;
pub use listing::ListingService;
pub use market_data::{MarketDataClient, MarketDataError};
pub use report::{ReportPaths, ReportWriter};
