use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::Endpoint;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The source has no document for this endpoint
    NotFound(String),
    Io { path: String, message: String },
    /// The document exists but does not match the expected schema
    Decode { endpoint: String, message: String },
    /// Every source was tried; one message per source, in order
    AllSourcesFailed(Vec<String>),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NotFound(path) => write!(f, "No document for {}", path),
            SourceError::Io { path, message } => write!(f, "Failed to read {}: {}", path, message),
            SourceError::Decode { endpoint, message } => {
                write!(f, "Malformed document at {}: {}", endpoint, message)
            }
            SourceError::AllSourcesFailed(reasons) => {
                write!(f, "All sources failed: {}", reasons.join("; "))
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Where plot documents come from.
#[async_trait]
pub trait PlotDataSource: Send + Sync {
    /// Raw body of the document at `endpoint`.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<String, SourceError>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each source in order and decode the first body that matches `T`.
/// Returns the document and the signature of the source that served it.
pub async fn fetch_document<T: DeserializeOwned>(
    sources: &[Box<dyn PlotDataSource>],
    endpoint: &Endpoint,
) -> Result<(T, &'static str), SourceError> {
    let mut reasons = Vec::new();
    for source in sources {
        let attempt = source.fetch(endpoint).await.and_then(|body| {
            serde_json::from_str::<T>(&body).map_err(|e| SourceError::Decode {
                endpoint: endpoint.path(),
                message: e.to_string(),
            })
        });

        match attempt {
            Ok(document) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_fetch {
                    log::info!("Fetched {} from {}", endpoint, source.signature());
                }
                return Ok((document, source.signature()));
            }
            Err(e) => {
                log::info!("{} could not serve {}: {}", source.signature(), endpoint, e);
                reasons.push(format!("{}: {}", source.signature(), e));
                // Continue to the next source
            }
        }
    }
    Err(SourceError::AllSourcesFailed(reasons))
}

/// Tooltip metadata of one cell. The shape is owned by the atlas, so it stays untyped.
pub async fn fetch_cell_metadata(
    sources: &[Box<dyn PlotDataSource>],
    experiment: &str,
    cell_id: &str,
) -> Result<Value, SourceError> {
    let endpoint = Endpoint::cell_metadata(experiment, cell_id);
    fetch_document::<Value>(sources, &endpoint)
        .await
        .map(|(value, _)| value)
}
