use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single cell on the expression plot.
///
/// Only `expressionLevel` is interpreted here. Coordinates, cell ids and any
/// other fields the atlas sends are carried in `extra` untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExpressionPoint {
    #[serde(rename = "expressionLevel", default)]
    pub expression_level: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExpressionPoint {
    pub fn new(expression_level: f64) -> Self {
        Self {
            expression_level: Some(expression_level),
            extra: Map::new(),
        }
    }

    /// Expression level with "missing" folded into NaN.
    pub fn level(&self) -> f64 {
        self.expression_level.unwrap_or(f64::NAN)
    }
}

/// A named group of points, plotted in `data` order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Series<P = ExpressionPoint> {
    #[serde(deserialize_with = "string_or_number")]
    pub name: String,
    pub data: Vec<P>,
}

/// Cluster points are never inspected, so they stay as raw JSON objects.
pub type ClusterSeries = Series<Map<String, Value>>;

/// Document served by the gene expression endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExpressionPlotData {
    pub series: Vec<Series>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

impl ExpressionPlotData {
    /// `max` of zero (or absent) means the gene has no expression data,
    /// which callers use to hide the gradient legend.
    pub fn has_expression(&self) -> bool {
        self.max.is_some_and(|max| max > 0.0)
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.data.len()).sum()
    }
}

/// Document served by the cell clusters endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClusterPlotData {
    pub series: Vec<ClusterSeries>,
}

// Cluster series are named by their numeric cluster id on some endpoints.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "series name must be a string or number, got {}",
            other
        ))),
    }
}
