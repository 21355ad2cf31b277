//! State of the side-by-side cluster / expression view: what to fetch when the
//! page parameters change, and which results are still current.

use futures::future::join_all;
use serde::Serialize;
use strum::IntoEnumIterator;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{Endpoint, FetchState, FetchStatus, PlotDataSource, Ticket, fetch_document};
use crate::domain::{ClusterPlotData, ClusterSeries, ExpressionPlotData, HighlightSet, ViewParams};
use crate::scale::{ColorScale, ColorizedSeries, Legend, SeriesColorizer};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum Resource {
    CellClusters,
    GeneExpression,
}

/// Which documents a parameter change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefetchPlan {
    pub clusters: bool,
    pub expression: bool,
}

impl RefetchPlan {
    /// Everything, for the first render.
    pub fn initial() -> Self {
        Self {
            clusters: true,
            expression: true,
        }
    }

    /// A new projection invalidates both plots; otherwise a new k only touches
    /// the clusters and a new gene only the expression. Highlight changes are
    /// applied at render time and never refetch.
    pub fn between(old: &ViewParams, new: &ViewParams) -> Self {
        if !old.same_projection(new) {
            Self::initial()
        } else if old.selected_k != new.selected_k {
            Self {
                clusters: true,
                expression: false,
            }
        } else if old.gene_id != new.gene_id {
            Self {
                clusters: false,
                expression: true,
            }
        } else {
            Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.clusters && !self.expression
    }

    pub fn includes(&self, resource: Resource) -> bool {
        match resource {
            Resource::CellClusters => self.clusters,
            Resource::GeneExpression => self.expression,
        }
    }
}

/// A fetch that has been ticketed by the view but not run yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    pub resource: Resource,
    pub endpoint: Endpoint,
    pub ticket: Ticket,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Clusters(Ticket, Result<ClusterPlotData, String>),
    Expression(Ticket, Result<ExpressionPlotData, String>),
}

/// Run one pending fetch against `sources`. Errors become the message shown
/// by the plot overlay.
pub async fn run_pending(
    sources: &[Box<dyn PlotDataSource>],
    pending: PendingFetch,
) -> FetchOutcome {
    match pending.resource {
        Resource::CellClusters => FetchOutcome::Clusters(
            pending.ticket,
            fetch_document::<ClusterPlotData>(sources, &pending.endpoint)
                .await
                .map(|(doc, _)| doc)
                .map_err(|e| format!("{}: {}", pending.resource, e)),
        ),
        Resource::GeneExpression => FetchOutcome::Expression(
            pending.ticket,
            fetch_document::<ExpressionPlotData>(sources, &pending.endpoint)
                .await
                .map(|(doc, _)| doc)
                .map_err(|e| format!("{}: {}", pending.resource, e)),
        ),
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ClusterChart {
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub series: Vec<ClusterSeries>,
    pub highlight: HighlightSet,
}

#[derive(Serialize, Debug, Clone)]
pub struct ExpressionChart {
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub series: Vec<ColorizedSeries>,
    pub unit: String,
    pub max: Option<f64>,
    pub min: Option<f64>,
    /// Absent when the gene has no expression data
    pub legend: Option<Legend>,
}

/// Both prepared charts, ready to serialize for a renderer.
#[derive(Serialize, Debug, Clone)]
pub struct ChartPayload {
    pub clusters: ClusterChart,
    pub expression: ExpressionChart,
}

pub struct TsnePlotView {
    params: ViewParams,
    scale: ColorScale,
    clusters: FetchState<ClusterPlotData>,
    expression: FetchState<ExpressionPlotData>,
    mounted: bool,
}

impl TsnePlotView {
    pub fn new(params: ViewParams, scale: ColorScale) -> Self {
        Self {
            params,
            scale,
            clusters: FetchState::new(),
            expression: FetchState::new(),
            mounted: false,
        }
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn clusters(&self) -> &FetchState<ClusterPlotData> {
        &self.clusters
    }

    pub fn expression(&self) -> &FetchState<ExpressionPlotData> {
        &self.expression
    }

    /// Switch to `params` and ticket the fetches this requires. The first call
    /// fetches everything regardless of what changed.
    pub fn plan(&mut self, params: ViewParams) -> Vec<PendingFetch> {
        let plan = if self.mounted {
            RefetchPlan::between(&self.params, &params)
        } else {
            RefetchPlan::initial()
        };
        self.mounted = true;
        self.params = params;

        if !plan.is_empty() {
            log::info!("Refreshing {:?} for {}", plan, self.params);
        }

        Resource::iter()
            .filter(|r| plan.includes(*r))
            .map(|resource| match resource {
                Resource::CellClusters => PendingFetch {
                    resource,
                    endpoint: Endpoint::cell_clusters(&self.params),
                    ticket: self.clusters.begin(),
                },
                Resource::GeneExpression => PendingFetch {
                    resource,
                    endpoint: Endpoint::gene_expression(&self.params),
                    ticket: self.expression.begin(),
                },
            })
            .collect()
    }

    /// Store a finished fetch. Returns `false` if it was superseded.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let (resource, applied) = match outcome {
            FetchOutcome::Clusters(ticket, result) => {
                (Resource::CellClusters, self.clusters.resolve(ticket, result))
            }
            FetchOutcome::Expression(ticket, result) => (
                Resource::GeneExpression,
                self.expression.resolve(ticket, result),
            ),
        };

        #[cfg(debug_assertions)]
        if !applied && DEBUG_FLAGS.print_stale_results {
            log::debug!("Dropped stale {} result", resource);
        }
        if applied {
            match resource {
                Resource::CellClusters => {
                    if let Some(e) = self.clusters.error() {
                        log::warn!("⚠️  {}", e);
                    }
                }
                Resource::GeneExpression => {
                    if let Some(e) = self.expression.error() {
                        log::warn!("⚠️  {}", e);
                    }
                }
            }
        }
        applied
    }

    /// `plan`, run the fetches concurrently, then `apply` them.
    /// Returns how many results were applied.
    pub async fn refresh(
        &mut self,
        sources: &[Box<dyn PlotDataSource>],
        params: ViewParams,
    ) -> usize {
        let pending = self.plan(params);
        let outcomes = join_all(pending.into_iter().map(|p| run_pending(sources, p))).await;
        outcomes
            .into_iter()
            .map(|outcome| self.apply(outcome))
            .filter(|applied| *applied)
            .count()
    }

    pub fn cluster_chart(&self) -> ClusterChart {
        ClusterChart {
            status: self.clusters.status(),
            error: self.clusters.error().map(str::to_string),
            series: self
                .clusters
                .data()
                .map(|d| d.series.clone())
                .unwrap_or_default(),
            highlight: self.params.highlight_clusters.clone(),
        }
    }

    /// The expression plot is never filtered by the cluster highlight.
    pub fn expression_chart(&self, legend_ticks: usize) -> ExpressionChart {
        let empty = ExpressionPlotData::default();
        let plot = self.expression.data().unwrap_or(&empty);
        let colorizer = SeriesColorizer::new(&self.scale, HighlightSet::none());

        ExpressionChart {
            status: self.expression.status(),
            error: self.expression.error().map(str::to_string),
            series: colorizer.colorize(&plot.series),
            unit: plot.unit.clone(),
            max: plot.max,
            min: plot.min,
            legend: Legend::for_plot(plot, &self.scale, legend_ticks),
        }
    }

    pub fn chart_payload(&self, legend_ticks: usize) -> ChartPayload {
        ChartPayload {
            clusters: self.cluster_chart(),
            expression: self.expression_chart(legend_ticks),
        }
    }
}
