use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::ATLAS;
use crate::data::{Endpoint, PlotDataSource, SourceError};

/// A directory holding atlas documents at their endpoint paths,
/// e.g. `<root>/json/experiments/E-1/tsneplot/25/clusters/k/6.json`.
pub struct LocalMirror {
    pub root: PathBuf,
}

impl LocalMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, endpoint: &Endpoint) -> PathBuf {
        // Appended rather than set: gene ids may contain dots
        self.root
            .join(format!("{}.{}", endpoint.path(), ATLAS.mirror_extension))
    }
}

#[async_trait]
impl PlotDataSource for LocalMirror {
    fn signature(&self) -> &'static str {
        "Local Mirror"
    }

    async fn fetch(&self, endpoint: &Endpoint) -> Result<String, SourceError> {
        let path = self.document_path(endpoint);
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(SourceError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Documents held in memory, keyed by endpoint path.
#[derive(Default, Clone)]
pub struct StaticSource {
    documents: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, endpoint: &Endpoint, body: impl Into<String>) {
        self.documents.insert(endpoint.path(), body.into());
    }

    pub fn with_document<T: Serialize>(
        mut self,
        endpoint: &Endpoint,
        document: &T,
    ) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(document)?;
        self.insert(endpoint, body);
        Ok(self)
    }
}

#[async_trait]
impl PlotDataSource for StaticSource {
    fn signature(&self) -> &'static str {
        "Static Documents"
    }

    async fn fetch(&self, endpoint: &Endpoint) -> Result<String, SourceError> {
        self.documents
            .get(&endpoint.path())
            .cloned()
            .ok_or_else(|| SourceError::NotFound(endpoint.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{fetch_cell_metadata, fetch_document};
    use crate::domain::{ClusterPlotData, ExpressionPlotData, ViewParams};

    fn params() -> ViewParams {
        ViewParams {
            experiment_accession: "E-MTAB-5061".to_string(),
            selected_perplexity: 10,
            selected_k: 4,
            gene_id: "ENSG0000.1".to_string(),
            ..Default::default()
        }
    }

    // Fresh directory per test under the system temp dir
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tsne-expression-plot-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn mirror_reads_documents_at_endpoint_paths() {
        let root = scratch_dir("mirror-read");
        let mirror = LocalMirror::new(&root);
        let endpoint = Endpoint::gene_expression(&params());
        let path = mirror.document_path(&endpoint);
        assert!(path.ends_with("expression/ENSG0000.1.json"));

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            concat!(
                r#"{"series": [{"name": "0","#,
                r#" "data": [{"x": 1, "y": 2, "expressionLevel": 3.5}]}],"#,
                r#" "max": 3.5, "min": 0, "unit": "TPM"}"#
            ),
        )
        .unwrap();

        let sources: Vec<Box<dyn PlotDataSource>> = vec![Box::new(mirror)];
        let (doc, signature) = fetch_document::<ExpressionPlotData>(&sources, &endpoint)
            .await
            .unwrap();
        assert_eq!(signature, "Local Mirror");
        assert_eq!(doc.unit, "TPM");
        assert_eq!(doc.point_count(), 1);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let root = scratch_dir("mirror-missing");
        let mirror = LocalMirror::new(&root);
        let err = mirror
            .fetch(&Endpoint::cell_clusters(&params()))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn falls_back_to_the_next_source() {
        let endpoint = Endpoint::cell_clusters(&params());
        let mut broken = StaticSource::new();
        broken.insert(&endpoint, r#"{"not_series": []}"#);
        let good = StaticSource::new()
            .with_document(
                &endpoint,
                &ClusterPlotData {
                    series: Vec::new(),
                },
            )
            .unwrap();

        let sources: Vec<Box<dyn PlotDataSource>> = vec![
            Box::new(LocalMirror::new(scratch_dir("mirror-fallback"))),
            Box::new(broken),
            Box::new(good),
        ];
        let (doc, _) = fetch_document::<ClusterPlotData>(&sources, &endpoint)
            .await
            .unwrap();
        assert!(doc.series.is_empty());
    }

    #[test]
    fn unserializable_documents_are_rejected_up_front() {
        use std::collections::BTreeMap;

        // JSON object keys must be strings
        let document: BTreeMap<(u8, u8), u8> = [((1, 2), 3)].into_iter().collect();
        let endpoint = Endpoint::cell_clusters(&params());
        let result = StaticSource::new().with_document(&endpoint, &document);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn reports_every_failed_source() {
        let endpoint = Endpoint::cell_clusters(&params());
        let sources: Vec<Box<dyn PlotDataSource>> =
            vec![Box::new(StaticSource::new()), Box::new(StaticSource::new())];
        match fetch_document::<ClusterPlotData>(&sources, &endpoint).await {
            Err(SourceError::AllSourcesFailed(reasons)) => assert_eq!(reasons.len(), 2),
            other => panic!("expected AllSourcesFailed, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn cell_metadata_is_passed_through_untyped() {
        let endpoint = Endpoint::cell_metadata("E-MTAB-5061", "AZ_A2");
        let source = StaticSource::new()
            .with_document(
                &endpoint,
                &serde_json::json!([{"displayName": "Sex", "value": "female"}]),
            )
            .unwrap();
        let sources: Vec<Box<dyn PlotDataSource>> = vec![Box::new(source)];
        let metadata = fetch_cell_metadata(&sources, "E-MTAB-5061", "AZ_A2")
            .await
            .unwrap();
        assert_eq!(metadata[0]["value"], "female");
    }
}
