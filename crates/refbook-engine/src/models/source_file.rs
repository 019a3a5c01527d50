use relative_path::{RelativePath, RelativePathBuf};

/// Base name of the first document of every book.
pub const INDEX_KEY: &str = "index";

/// A book source file, identified by its path relative to the source directory.
///
/// The file name without its extension is the document key under which the
/// book records the file's references ("chapters/01-intro.adoc" -> "01-intro").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    relative_path: RelativePathBuf,
    key: String,
}

impl SourceFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let key = Self::extract_key(&relative_path);
        Self { relative_path, key }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// Document key used in the book reference table.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_index(&self) -> bool {
        self.key == INDEX_KEY
    }

    /// Output page the document is rendered to, next to its source.
    pub fn output_path(&self) -> RelativePathBuf {
        self.relative_path.with_extension("html")
    }

    fn extract_key(path: &RelativePath) -> String {
        path.file_stem().unwrap_or("untitled").to_string()
    }
}

impl From<RelativePathBuf> for SourceFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for SourceFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}
