use std::path::Path;

use bytes::Bytes;

/// A resume attachment: the original file name plus its raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Reads a resume from disk, keeping only the final path component as the name.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, content))
    }

    /// MIME type for the multipart part, guessed from the extension.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// The analysis form as the user has filled it in so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_description: String,
    pub resume_file: Option<ResumeFile>,
}
