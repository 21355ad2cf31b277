// Fetching plot documents and tracking which results are current
pub mod endpoints;
pub mod fetch_state;
pub mod local_mirror;
pub mod source;
pub mod view;

// Re-export commonly used types
pub use endpoints::Endpoint;
pub use fetch_state::{FetchState, FetchStatus, Ticket};
pub use local_mirror::{LocalMirror, StaticSource};
pub use source::{PlotDataSource, SourceError, fetch_cell_metadata, fetch_document};
pub use view::{
    ChartPayload, ClusterChart, ExpressionChart, FetchOutcome, PendingFetch, RefetchPlan,
    Resource, TsnePlotView, run_pending,
};
