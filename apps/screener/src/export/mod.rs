// Export: PDF reports rendered by the service, CSV rendered locally.

pub mod csv_report;
pub mod gateway;
pub mod sink;

pub use gateway::{ExportGateway, CSV_FILE_NAME, PDF_FILE_NAME};
pub use sink::{ArtifactSink, DownloadDir, SavedArtifact};
