//! Document + sidecar writer
//!
//! Writes each pair locally, then uploads both under the kind's key prefix.
//! Nothing is rolled back when a later step fails: a failed upload leaves the
//! local files in place.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::ObjectStoreProvider;
use crate::types::MetadataSidecar;

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Paths and URIs of one written document
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenDocument {
    pub id: String,
    pub local_document: PathBuf,
    pub local_metadata: PathBuf,
    pub document_uri: String,
    pub metadata_uri: String,
}

/// Writes documents for one record kind
pub struct DocumentWriter {
    output_dir: PathBuf,
    prefix: String,
    store: Arc<dyn ObjectStoreProvider>,
}

impl DocumentWriter {
    /// Create a writer, creating `output_dir` if needed
    pub fn new(
        output_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        store: Arc<dyn ObjectStoreProvider>,
    ) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            prefix: prefix.into(),
            store,
        })
    }

    /// Local output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Object key prefix (e.g., "events/")
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Document file name for an id
    pub fn document_file_name(id: &str) -> String {
        format!("{}.txt", id)
    }

    /// Sidecar file name for an id
    pub fn metadata_file_name(id: &str) -> String {
        format!("{}.txt.metadata.json", id)
    }

    /// Write and upload one document with its sidecar
    pub async fn write(
        &self,
        id: &str,
        content: &str,
        metadata: &MetadataSidecar,
    ) -> Result<WrittenDocument> {
        validate_id(id)?;

        let document_name = Self::document_file_name(id);
        let metadata_name = Self::metadata_file_name(id);
        let local_document = self.output_dir.join(&document_name);
        let local_metadata = self.output_dir.join(&metadata_name);

        tokio::fs::write(&local_document, content.as_bytes()).await?;
        tokio::fs::write(&local_metadata, metadata.to_pretty_json()?).await?;

        let document_uri = self
            .store
            .put_object(
                &format!("{}{}", self.prefix, document_name),
                content.as_bytes().to_vec(),
                TEXT_CONTENT_TYPE,
            )
            .await?;
        let metadata_uri = self
            .store
            .put_object(
                &format!("{}{}", self.prefix, metadata_name),
                metadata.to_compact_json()?,
                JSON_CONTENT_TYPE,
            )
            .await?;

        tracing::debug!("Wrote {} -> {}", local_document.display(), document_uri);

        Ok(WrittenDocument {
            id: id.to_string(),
            local_document,
            local_metadata,
            document_uri,
            metadata_uri,
        })
    }
}

/// Ids become file names and object keys, so they must be a single plain path segment
fn validate_id(id: &str) -> Result<()> {
    let mut components = Path::new(id).components();
    let single_segment = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();
    if id.is_empty() || !single_segment || id.contains(['/', '\\']) {
        return Err(Error::malformed_record(
            id,
            "document id is not usable as a file name",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::LocalObjectStore;
    use crate::types::MetadataAttributes;

    fn sidecar() -> MetadataSidecar {
        MetadataSidecar::new(MetadataAttributes {
            location_id: "loc-1".to_string(),
            article_hash: "h1".to_string(),
            display_name: "Bar Øst".to_string(),
            categories: vec!["bar".to_string()],
            primary_category: None,
            city: None,
            country: None,
            latitude: None,
            longitude: None,
        })
    }

    #[tokio::test]
    async fn test_write_local_and_remote_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalObjectStore::new(dir.path().join("mirror")).unwrap());
        let writer = DocumentWriter::new(dir.path().join("out/events"), "events/", store).unwrap();

        let written = writer.write("evt-1", "some content", &sidecar()).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&written.local_document).unwrap(),
            "some content"
        );
        let local_meta = std::fs::read_to_string(&written.local_metadata).unwrap();
        assert!(local_meta.contains("Bar Øst"));
        assert_eq!(MetadataSidecar::from_json(&local_meta).unwrap(), sidecar());

        let remote_doc = dir.path().join("mirror/events/evt-1.txt");
        let remote_meta = dir.path().join("mirror/events/evt-1.txt.metadata.json");
        assert_eq!(std::fs::read_to_string(remote_doc).unwrap(), "some content");
        let remote_meta: MetadataSidecar =
            serde_json::from_slice(&std::fs::read(remote_meta).unwrap()).unwrap();
        assert_eq!(remote_meta, sidecar());
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalObjectStore::new(dir.path().join("mirror")).unwrap());
        let writer = DocumentWriter::new(dir.path().join("out"), "events/", store).unwrap();

        for id in ["", "..", "a/b", "../escape"] {
            let err = writer.write(id, "content", &sidecar()).await.unwrap_err();
            assert!(matches!(err, Error::MalformedRecord { .. }), "id {:?}", id);
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(DocumentWriter::document_file_name("abc"), "abc.txt");
        assert_eq!(DocumentWriter::metadata_file_name("abc"), "abc.txt.metadata.json");
    }
}
