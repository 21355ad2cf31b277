// Domain types and data contracts
pub mod breakpoint;
pub mod highlight;
pub mod series;
pub mod view_params;

// Re-export commonly used types
pub use breakpoint::ColorBreakpoint;
pub use highlight::HighlightSet;
pub use series::{ClusterPlotData, ClusterSeries, ExpressionPlotData, ExpressionPoint, Series};
pub use view_params::ViewParams;
