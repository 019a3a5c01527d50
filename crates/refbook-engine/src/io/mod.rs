use crate::models::{Document, SourceFile, TreeError};
use crate::tree::DocumentTree;
use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document tree in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid document {path}: {source}")]
    Tree {
        path: PathBuf,
        #[source]
        source: TreeError,
    },
}

/// Read a JSON document tree
pub fn read_document_tree(relative_path: &RelativePath, srcdir: &Path) -> Result<DocumentTree, IoError> {
    let absolute_path = relative_path.to_path(srcdir);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let content = fs::read_to_string(&absolute_path).map_err(IoError::Io)?;
    serde_json::from_str(&content).map_err(|source| IoError::Json {
        path: absolute_path,
        source,
    })
}

/// Read a source file's tree and build its document
pub fn load_document(source: &SourceFile, srcdir: &Path) -> Result<Document, IoError> {
    let tree = read_document_tree(source.relative_path(), srcdir)?;
    Document::from_tree(tree).map_err(|source_err| IoError::Tree {
        path: source.relative_path().to_path(srcdir),
        source: source_err,
    })
}

/// Write a document tree as pretty JSON
pub fn write_document_tree(
    relative_path: &RelativePath,
    srcdir: &Path,
    tree: &DocumentTree,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(srcdir);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    let json = serde_json::to_string_pretty(tree).map_err(|source| IoError::Json {
        path: absolute_path.clone(),
        source,
    })?;
    fs::write(&absolute_path, json).map_err(IoError::Io)
}
