/// Languages bundled with the default highlighter build.
///
/// Source listings in any other language are reported through
/// [`crate::models::Document::extra_languages`] so the asset layer can load
/// the grammar on demand.
pub const INCLUDED_LANGUAGES: &[&str] = &[
    "bash",
    "c",
    "cpp",
    "csharp",
    "css",
    "diff",
    "go",
    "graphql",
    "ini",
    "java",
    "javascript",
    "json",
    "kotlin",
    "less",
    "lua",
    "makefile",
    "markdown",
    "objectivec",
    "perl",
    "php",
    "php-template",
    "plaintext",
    "python",
    "python-repl",
    "r",
    "ruby",
    "rust",
    "scss",
    "shell",
    "sql",
    "swift",
    "typescript",
    "vbnet",
    "wasm",
    "xml",
    "yaml",
];

pub fn is_included(lang: &str) -> bool {
    INCLUDED_LANGUAGES.binary_search(&lang).is_ok()
}
