use crate::editing::Document;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid UTF-8 in {path}: {source}")]
    InvalidUtf8 {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}

/// Read a markdown file into a document
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes).map_err(|source| IoError::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = crate::markdown::from_markdown(&content);
    log::info!("read {} nodes from {}", doc.len(), path.display());
    Ok(doc)
}

/// Write a document as markdown, creating parent directories as needed
pub fn write_document(path: &Path, doc: &Document) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut content = doc.to_markdown();
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(path, content)?;
    log::info!("wrote {} nodes to {}", doc.len(), path.display());
    Ok(())
}
