/// Position of a document in the book's reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterRole {
    /// The first document; unnumbered.
    Index,
    /// Main-matter chapter, numbered from 1.
    Chapter(u32),
    /// Zero-based appendix position and the number of appendices in the book.
    Appendix { index: usize, total: usize },
}

impl ChapterRole {
    /// Numeral prefix for the document's blocks: none, "1", "2", ... or "A", "B", ...
    pub fn label(self) -> Option<String> {
        match self {
            ChapterRole::Index => None,
            ChapterRole::Chapter(n) => Some(n.to_string()),
            ChapterRole::Appendix { index, .. } => Some(appendix_letter(index)),
        }
    }

    /// Text of a reference to the whole document.
    ///
    /// The index is referred to by its own title. A lone appendix is just
    /// "Appendix"; several are lettered.
    pub fn reference(self, title: Option<&str>, chapname: &str, appendix_name: &str) -> Option<String> {
        match self {
            ChapterRole::Index => title.map(str::to_string),
            ChapterRole::Chapter(n) => Some(format!("{chapname} {n}")),
            ChapterRole::Appendix { total: 1, .. } => Some(appendix_name.to_string()),
            ChapterRole::Appendix { index, .. } => {
                Some(format!("{appendix_name} {}", appendix_letter(index)))
            }
        }
    }
}

/// "A", "B", ..., "Z", "AA", "AB", ... for a zero-based index.
pub fn appendix_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}
