use std::fmt;

use crate::config::ATLAS;
use crate::domain::ViewParams;

/// A JSON document served by the atlas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CellClusters {
        experiment: String,
        perplexity: u32,
        k: u32,
    },
    GeneExpression {
        experiment: String,
        perplexity: u32,
        gene_id: String,
    },
    /// Tooltip content for a single cell
    CellMetadata { experiment: String, cell_id: String },
}

impl Endpoint {
    pub fn cell_clusters(params: &ViewParams) -> Self {
        Endpoint::CellClusters {
            experiment: params.experiment_accession.clone(),
            perplexity: params.selected_perplexity,
            k: params.selected_k,
        }
    }

    pub fn gene_expression(params: &ViewParams) -> Self {
        Endpoint::GeneExpression {
            experiment: params.experiment_accession.clone(),
            perplexity: params.selected_perplexity,
            gene_id: params.gene_id.clone(),
        }
    }

    pub fn cell_metadata(experiment: &str, cell_id: &str) -> Self {
        Endpoint::CellMetadata {
            experiment: experiment.to_string(),
            cell_id: cell_id.to_string(),
        }
    }

    /// Path relative to the atlas root, without a leading slash.
    pub fn path(&self) -> String {
        let e = &ATLAS.endpoints;
        match self {
            Endpoint::CellClusters {
                experiment,
                perplexity,
                k,
            } => format!(
                "{}/{}/{}/{}/{}/{}",
                e.experiments_prefix, experiment, e.tsne_segment, perplexity, e.clusters_segment, k
            ),
            Endpoint::GeneExpression {
                experiment,
                perplexity,
                gene_id,
            } => format!(
                "{}/{}/{}/{}/{}/{}",
                e.experiments_prefix,
                experiment,
                e.tsne_segment,
                perplexity,
                e.expression_segment,
                gene_id
            ),
            Endpoint::CellMetadata {
                experiment,
                cell_id,
            } => format!(
                "{}/{}/cell/{}/{}",
                e.experiment_prefix, experiment, cell_id, e.metadata_segment
            ),
        }
    }

    /// Absolute URL of this endpoint under `base` (e.g. `https://host/atlas/`).
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
