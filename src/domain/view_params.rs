use serde::{Deserialize, Serialize};

use crate::domain::HighlightSet;

/// What the page currently asks to see. Changing a field decides which
/// documents have to be fetched again (see `data::RefetchPlan`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewParams {
    pub experiment_accession: String,
    pub selected_perplexity: u32,
    pub selected_k: u32,
    /// Empty when no gene is selected
    #[serde(default)]
    pub gene_id: String,
    #[serde(default)]
    pub highlight_clusters: HighlightSet,
}

impl ViewParams {
    pub fn has_gene(&self) -> bool {
        !self.gene_id.is_empty()
    }

    /// The perplexity and experiment identify the t-SNE projection itself;
    /// both plots are invalidated when either changes.
    pub fn same_projection(&self, other: &ViewParams) -> bool {
        self.experiment_accession == other.experiment_accession
            && self.selected_perplexity == other.selected_perplexity
    }
}

impl std::fmt::Display for ViewParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} perplexity={} k={} gene={}",
            self.experiment_accession,
            self.selected_perplexity,
            self.selected_k,
            if self.has_gene() { self.gene_id.as_str() } else { "(none)" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_ignores_k_gene_and_highlight() {
        let a = ViewParams {
            experiment_accession: "E-1".to_string(),
            selected_perplexity: 25,
            selected_k: 4,
            ..Default::default()
        };
        let b = ViewParams {
            selected_k: 9,
            gene_id: "ENSG1".to_string(),
            highlight_clusters: [1u32].into_iter().collect(),
            ..a.clone()
        };
        assert!(a.same_projection(&b));
        assert!(!a.same_projection(&ViewParams {
            selected_perplexity: 30,
            ..a.clone()
        }));
        assert_eq!(a.to_string(), "E-1 perplexity=25 k=4 gene=(none)");
    }

    #[test]
    fn deserializes_page_props() {
        let json = r#"{"experimentAccession": "E-1", "selectedPerplexity": 5, "selectedK": 3,
                       "highlightClusters": ["2"]}"#;
        let params: ViewParams = serde_json::from_str(json).unwrap();
        assert!(!params.has_gene());
        assert!(params.highlight_clusters.contains("2"));
    }
}
