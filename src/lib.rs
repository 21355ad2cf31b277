// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod scale;
pub mod utils;

// Re-export commonly used types
pub use data::{ChartPayload, LocalMirror, PlotDataSource, TsnePlotView};
pub use domain::{ColorBreakpoint, ExpressionPlotData, HighlightSet, Series, ViewParams};
pub use scale::{ColorScale, SeriesColorizer};

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::config::{ATLAS, GRADIENT};

// CLI argument parsing
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory mirroring the atlas JSON endpoints
    #[arg(long)]
    pub mirror: PathBuf,

    /// Experiment accession, e.g. E-GEOD-81547
    #[arg(long)]
    pub experiment: String,

    #[arg(long)]
    pub perplexity: u32,

    /// Number of clusters
    #[arg(long)]
    pub k: u32,

    /// Gene to colour the expression plot by (empty for none)
    #[arg(long, default_value = "")]
    pub gene: String,

    /// Cluster ids to highlight on the cluster plot, comma separated
    #[arg(long, value_delimiter = ',')]
    pub highlight: Vec<String>,

    /// JSON file with the gradient breakpoints (defaults to the built-in gradient)
    #[arg(long)]
    pub gradient: Option<PathBuf>,

    /// Number of colour samples in the legend
    #[arg(long, default_value_t = ATLAS.default_legend_ticks)]
    pub legend_ticks: usize,

    /// Write the chart payload here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl Cli {
    pub fn view_params(&self) -> ViewParams {
        ViewParams {
            experiment_accession: self.experiment.clone(),
            selected_perplexity: self.perplexity,
            selected_k: self.k,
            gene_id: self.gene.clone(),
            highlight_clusters: self.highlight.iter().map(|h| h.trim()).collect(),
        }
    }

    /// Breakpoints from `--gradient`, or the built-in ones.
    pub fn scale(&self) -> Result<ColorScale> {
        let breakpoints = match &self.gradient {
            Some(path) => ColorBreakpoint::load_list(path)?,
            None => GRADIENT.default_breakpoints(),
        };
        ColorScale::new(breakpoints).context("Invalid gradient configuration")
    }
}

/// Fetch both plot documents for `cli` and prepare them for rendering.
/// This is the public API for the binary to call.
pub async fn build_chart_payload(cli: &Cli) -> Result<ChartPayload> {
    let scale = cli.scale()?;
    let params = cli.view_params();
    log::info!("Preparing plots for {} (highlight: {})", params, params.highlight_clusters);

    let sources: Vec<Box<dyn PlotDataSource>> = vec![Box::new(LocalMirror::new(&cli.mirror))];
    let mut view = TsnePlotView::new(params.clone(), scale);
    view.refresh(&sources, params).await;

    if let Some(e) = view.clusters().error() {
        bail!("Cell clusters unavailable: {}", e);
    }
    if let Some(e) = view.expression().error() {
        bail!("Gene expression unavailable: {}", e);
    }

    let payload = view.chart_payload(cli.legend_ticks);
    log::info!(
        "Prepared {} cluster series and {} expression series ({} legend)",
        payload.clusters.series.len(),
        payload.expression.series.len(),
        if payload.expression.legend.is_some() { "with" } else { "no" }
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_highlight_list() {
        let cli = Cli::parse_from([
            "tsne-plot",
            "--mirror",
            "/tmp/atlas",
            "--experiment",
            "E-1",
            "--perplexity",
            "25",
            "--k",
            "6",
            "--highlight",
            "1, 4",
        ]);
        let params = cli.view_params();
        assert!(params.highlight_clusters.contains("1"));
        assert!(params.highlight_clusters.contains("4"));
        assert_eq!(params.gene_id, "");
        assert_eq!(cli.legend_ticks, ATLAS.default_legend_ticks);
    }

    #[test]
    fn default_scale_without_gradient_file() {
        let cli = Cli::parse_from([
            "tsne-plot", "--mirror", ".", "--experiment", "E-1", "--perplexity", "5", "--k", "2",
        ]);
        assert_eq!(cli.scale().unwrap().breakpoints().len(), 4);
    }
}
