//! Expression atlas endpoints and CLI defaults.

/// Path templates of the JSON documents served by the atlas.
/// `{}` placeholders are filled in order by `data::Endpoint::path`.
pub struct EndpointTemplates {
    pub experiments_prefix: &'static str,
    pub experiment_prefix: &'static str,
    pub tsne_segment: &'static str,
    pub clusters_segment: &'static str,
    pub expression_segment: &'static str,
    pub metadata_segment: &'static str,
}

pub struct AtlasConfig {
    pub endpoints: EndpointTemplates,
    /// Extension appended to endpoint paths when reading a local mirror
    pub mirror_extension: &'static str,
    /// Number of colour samples emitted for the gradient legend
    pub default_legend_ticks: usize,
}

pub const ATLAS: AtlasConfig = AtlasConfig {
    endpoints: EndpointTemplates {
        experiments_prefix: "json/experiments",
        // Singular on purpose: the metadata endpoint lives under a different root
        experiment_prefix: "json/experiment",
        tsne_segment: "tsneplot",
        clusters_segment: "clusters/k",
        expression_segment: "expression",
        metadata_segment: "metadata",
    },
    mirror_extension: "json",
    default_legend_ticks: 5,
};
