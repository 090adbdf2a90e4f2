use std::sync::Arc;

use tracing::{error, info};

use crate::backend::AnalysisBackend;
use crate::errors::ClientError;
use crate::export::csv_report::{render_csv, CsvExportError};
use crate::export::sink::{ArtifactSink, SavedArtifact};
use crate::models::{Candidate, ExportSubject};

pub const PDF_FILE_NAME: &str = "resume_report.pdf";
pub const CSV_FILE_NAME: &str = "candidates.csv";

/// Produces downloadable artifacts: PDF reports through the service, CSV
/// locally. Failures are reported as `ClientError::Export` and never touch
/// controller state.
#[derive(Clone)]
pub struct ExportGateway {
    backend: Arc<dyn AnalysisBackend>,
    sink: Arc<dyn ArtifactSink>,
}

impl ExportGateway {
    pub fn new(backend: Arc<dyn AnalysisBackend>, sink: Arc<dyn ArtifactSink>) -> Self {
        Self { backend, sink }
    }

    /// Renders `subject` via `/export_pdf` and saves it as `resume_report.pdf`.
    /// Nothing is saved if the service call fails.
    pub async fn export_pdf(
        &self,
        subject: impl Into<ExportSubject>,
    ) -> Result<SavedArtifact, ClientError> {
        let subject = subject.into();
        let pdf = match self.backend.export_pdf(&subject).await {
            Ok(pdf) => pdf,
            Err(e) => {
                error!("PDF export failed: {e}");
                return Err(ClientError::Export("Failed to export PDF".to_string()));
            }
        };
        self.save(PDF_FILE_NAME, &pdf).await
    }

    /// Writes the roster, in the order given, to `candidates.csv`.
    /// An empty roster produces no file.
    pub async fn export_csv(&self, roster: &[Candidate]) -> Result<SavedArtifact, ClientError> {
        let document = render_csv(roster).map_err(|e| match e {
            CsvExportError::Empty => ClientError::Export(CsvExportError::Empty.to_string()),
            other => {
                error!("CSV export failed: {other}");
                ClientError::Export("Failed to export CSV".to_string())
            }
        })?;
        self.save(CSV_FILE_NAME, document.as_bytes()).await
    }

    async fn save(&self, file_name: &str, content: &[u8]) -> Result<SavedArtifact, ClientError> {
        match self.sink.save(file_name, content).await {
            Ok(saved) => {
                info!(
                    "Saved {} ({} bytes) to {}",
                    saved.file_name,
                    saved.size_bytes,
                    saved.location.display()
                );
                Ok(saved)
            }
            Err(e) => {
                error!("Could not save {file_name}: {e}");
                Err(ClientError::Export(format!("Could not save {file_name}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{
        analysis, candidate, connection_refused, server_error, Call, FakeBackend,
    };
    use crate::export::sink::DownloadDir;
    use bytes::Bytes;

    fn gateway(backend: FakeBackend) -> (ExportGateway, Arc<FakeBackend>, tempfile::TempDir) {
        let backend = Arc::new(backend);
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(DownloadDir::new(dir.path()));
        (ExportGateway::new(backend.clone(), sink), backend, dir)
    }

    #[tokio::test]
    async fn test_pdf_saved_under_fixed_name() {
        let (gateway, backend, dir) =
            gateway(FakeBackend::new().on_export(Ok(Bytes::from_static(b"%PDF-1.4"))));

        let saved = gateway.export_pdf(analysis(82.3)).await.unwrap();

        assert_eq!(saved.file_name, "resume_report.pdf");
        assert_eq!(std::fs::read(dir.path().join(PDF_FILE_NAME)).unwrap(), b"%PDF-1.4");
        assert_eq!(backend.calls(), vec![Call::ExportPdf]);
    }

    #[tokio::test]
    async fn test_pdf_accepts_candidate_subject() {
        let (gateway, _, _dir) =
            gateway(FakeBackend::new().on_export(Ok(Bytes::from_static(b"%PDF"))));
        assert!(gateway.export_pdf(candidate(4, 61.0)).await.is_ok());
    }

    #[tokio::test]
    async fn test_pdf_failure_downloads_nothing() {
        for failure in [server_error(), connection_refused()] {
            let (gateway, _, dir) = gateway(FakeBackend::new().on_export(Err(failure)));

            let err = gateway.export_pdf(analysis(50.0)).await.unwrap_err();

            assert_eq!(err, ClientError::Export("Failed to export PDF".into()));
            assert!(!dir.path().join(PDF_FILE_NAME).exists());
        }
    }

    #[tokio::test]
    async fn test_csv_empty_roster_produces_no_file() {
        let (gateway, backend, dir) = gateway(FakeBackend::new());

        let err = gateway.export_csv(&[]).await.unwrap_err();

        assert_eq!(err.user_message(), "No candidates to export.");
        assert!(!dir.path().join(CSV_FILE_NAME).exists());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_csv_written_locally() {
        let (gateway, backend, dir) = gateway(FakeBackend::new());

        let saved = gateway
            .export_csv(&[candidate(1, 55.0), candidate(2, 90.0)])
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join(CSV_FILE_NAME)).unwrap();
        assert_eq!(saved.file_name, "candidates.csv");
        assert_eq!(written.lines().count(), 3);
        assert!(written.lines().nth(1).unwrap().starts_with("Candidate 1,"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_sink_is_export_error() {
        let backend = Arc::new(FakeBackend::new());
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot be used as a directory.
        let sink = Arc::new(DownloadDir::new(file.path()));
        let gateway = ExportGateway::new(backend, sink);

        let err = gateway.export_csv(&[candidate(1, 10.0)]).await.unwrap_err();
        assert!(matches!(err, ClientError::Export(_)));
    }
}
