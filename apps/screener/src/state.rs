use std::sync::Arc;

use crate::backend::{AnalysisBackend, HttpBackend};
use crate::config::Config;
use crate::export::{ArtifactSink, DownloadDir, ExportGateway};
use crate::roster::RosterController;
use crate::submission::SubmissionController;

/// Everything a front end needs, wired to one shared backend.
/// The roster vector is only ever written by `roster`.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn AnalysisBackend>,
    pub submission: SubmissionController,
    pub roster: RosterController,
    pub exports: ExportGateway,
}

impl AppState {
    pub fn new(backend: Arc<dyn AnalysisBackend>, sink: Arc<dyn ArtifactSink>) -> Self {
        Self {
            submission: SubmissionController::new(backend.clone()),
            roster: RosterController::new(backend.clone()),
            exports: ExportGateway::new(backend.clone(), sink),
            backend,
        }
    }

    /// Production wiring: HTTP backend and a download directory.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let backend = HttpBackend::new(config.api_url.clone(), config.request_timeout)?;
        let sink = DownloadDir::new(config.download_dir.clone());
        Ok(Self::new(Arc::new(backend), Arc::new(sink)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{candidate, FakeBackend};
    use crate::roster::AssumeYes;

    #[tokio::test]
    async fn test_controllers_share_one_backend() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(
            FakeBackend::new()
                .on_list(Ok(vec![candidate(1, 40.0), candidate(2, 80.0)]))
                .on_delete(Ok(())),
        );
        let state = AppState::new(backend.clone(), Arc::new(DownloadDir::new(dir.path())));

        state.roster.load().await;
        state.roster.delete_one(&1.into(), &AssumeYes).await;
        state.exports.export_csv(&state.roster.candidates()).await.unwrap();

        assert_eq!(backend.calls().len(), 2);
        let csv = std::fs::read_to_string(dir.path().join("candidates.csv")).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_from_config_builds_http_wiring() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(AppState::from_config(&config).is_ok());
    }
}
