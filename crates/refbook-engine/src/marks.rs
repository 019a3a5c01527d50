//! List item markers.
//!
//! A [`MarkFormat`] is chosen once per list from its nesting depth, its style
//! and an optional explicit format such as `(a)` or `i.`; it then renders the
//! marker of every item from the item's zero-based index.
//!
//! | depth | default       |
//! |-------|---------------|
//! | 0     | 1, 2, 3       |
//! | 1     | a, b, c       |
//! | 2     | i, ii, iii    |
//! | 3     | A, B, C       |
//! | 4+    | bullets       |

use crate::models::block::styles;

const BULLET_EVEN: &str = "\u{2022}";
const BULLET_ODD: &str = "\u{25E6}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    Arabic,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
    /// A fixed glyph for every item.
    Bullet(&'static str),
    /// `[1]`, `[2]`, ... as used by bibliographies.
    Bracketed,
    /// Circled digits, as used by callout lists.
    Circled,
}

impl Numbering {
    fn from_placeholder(c: char) -> Option<Self> {
        match c {
            '1' => Some(Numbering::Arabic),
            'a' => Some(Numbering::LowerAlpha),
            'A' => Some(Numbering::UpperAlpha),
            'i' => Some(Numbering::LowerRoman),
            'I' => Some(Numbering::UpperRoman),
            _ => None,
        }
    }

    fn from_style(style: &str) -> Option<Self> {
        match style {
            "arabic" | "decimal" => Some(Numbering::Arabic),
            "loweralpha" => Some(Numbering::LowerAlpha),
            "upperalpha" => Some(Numbering::UpperAlpha),
            "lowerroman" => Some(Numbering::LowerRoman),
            "upperroman" => Some(Numbering::UpperRoman),
            styles::BIBLIOGRAPHY => Some(Numbering::Bracketed),
            styles::FIGLIST => Some(Numbering::LowerAlpha),
            _ => None,
        }
    }

    fn for_depth(depth: usize) -> Self {
        match depth {
            0 => Numbering::Arabic,
            1 => Numbering::LowerAlpha,
            2 => Numbering::LowerRoman,
            3 => Numbering::UpperAlpha,
            d => Numbering::Bullet(bullet(d)),
        }
    }

    fn render(self, index: usize) -> String {
        match self {
            Numbering::Arabic => (index + 1).to_string(),
            Numbering::LowerAlpha => alpha(index).to_string(),
            Numbering::UpperAlpha => alpha(index).to_ascii_uppercase().to_string(),
            Numbering::LowerRoman => to_roman(index + 1).to_ascii_lowercase(),
            Numbering::UpperRoman => to_roman(index + 1),
            Numbering::Bullet(glyph) => glyph.to_string(),
            Numbering::Bracketed => format!("[{}]", index + 1),
            Numbering::Circled => callout(index),
        }
    }
}

/// How the items of one list are marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkFormat {
    numbering: Numbering,
    prefix: Option<char>,
    suffix: Option<char>,
    /// Depth whose parity decides whether back-references get parentheses.
    reference_depth: usize,
}

impl MarkFormat {
    pub fn new(numbering: Numbering, depth: usize) -> Self {
        Self {
            numbering,
            prefix: None,
            suffix: None,
            reference_depth: depth,
        }
    }

    /// Default format of an ordered list at `depth`.
    pub fn for_depth(depth: usize) -> Self {
        Self::new(Numbering::for_depth(depth), depth)
    }

    pub fn bullet(depth: usize) -> Self {
        Self::new(Numbering::Bullet(bullet(depth)), depth)
    }

    pub fn callout() -> Self {
        Self::new(Numbering::Circled, 0)
    }

    /// Parses an explicit format: one placeholder (`1`, `a`, `A`, `i`, `I`)
    /// with at most one literal character on either side, e.g. `(a)` or `1.`.
    pub fn parse(spec: &str, depth: usize) -> Option<Self> {
        let chars: Vec<char> = spec.chars().collect();
        if chars.is_empty() || chars.len() > 3 {
            return None;
        }
        let mut placeholders = chars
            .iter()
            .enumerate()
            .filter_map(|(i, c)| Numbering::from_placeholder(*c).map(|n| (i, n)));
        let (pos, numbering) = placeholders.next()?;
        if placeholders.next().is_some() || pos > 1 || chars.len() - pos > 2 {
            return None;
        }

        Some(Self {
            numbering,
            prefix: chars[..pos].first().copied(),
            suffix: chars.get(pos + 1).copied(),
            reference_depth: depth,
        })
    }

    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    /// Marker of the item at zero-based `index`.
    pub fn render(&self, index: usize) -> String {
        let mut mark = String::new();
        if let Some(c) = self.prefix {
            mark.push(c);
        }
        mark.push_str(&self.numbering.render(index));
        if let Some(c) = self.suffix {
            mark.push(c);
        }
        mark
    }

    /// Form of `mark` used when citing the item from prose.
    pub fn reference_mark(&self, mark: &str) -> String {
        match self.numbering {
            Numbering::Bullet(_) | Numbering::Bracketed | Numbering::Circled => mark.to_string(),
            _ if self.prefix.is_some() => strip_period(mark).to_string(),
            _ => default_reference_mark(mark, self.reference_depth),
        }
    }
}

/// Picks the format of a list.
///
/// An explicit `spec` wins, then an alphabet-selecting `style`, then the depth
/// default. A `spec` that does not parse falls back silently.
pub fn formatter(depth: usize, style: Option<&str>, spec: Option<&str>) -> MarkFormat {
    if let Some(format) = spec.and_then(|s| MarkFormat::parse(s, depth)) {
        return format;
    }
    match style {
        Some(styles::FIGLIST) => MarkFormat::new(Numbering::LowerAlpha, 1),
        Some(style) => Numbering::from_style(style)
            .map(|n| MarkFormat::new(n, depth))
            .unwrap_or_else(|| MarkFormat::for_depth(depth)),
        None => MarkFormat::for_depth(depth),
    }
}

/// Marker of the item at `index` of a list at `depth`.
pub fn format(depth: usize, style: Option<&str>, spec: Option<&str>, index: usize) -> String {
    formatter(depth, style, spec).render(index)
}

/// Strips one trailing "." and parenthesises marks of odd depth.
///
/// `("b", 1)` gives "(b)", `("3", 0)` gives "3".
pub fn default_reference_mark(mark: &str, depth: usize) -> String {
    let mark = strip_period(mark);
    if depth % 2 == 1 {
        format!("({mark})")
    } else {
        mark.to_string()
    }
}

fn strip_period(mark: &str) -> &str {
    mark.strip_suffix('.').unwrap_or(mark)
}

/// Bullet glyph for `depth`, alternating with parity.
pub fn bullet(depth: usize) -> &'static str {
    if depth % 2 == 0 { BULLET_EVEN } else { BULLET_ODD }
}

/// Letter for `index`, cycling within a-z.
pub fn alpha(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Largest value written in roman numerals.
pub const MAX_ROMAN: usize = 3999;

/// Upper-case roman numeral in subtractive notation; empty for 0.
///
/// Values above [`MAX_ROMAN`] are written in arabic digits.
pub fn to_roman(mut n: usize) -> String {
    if n > MAX_ROMAN {
        return n.to_string();
    }
    const TABLE: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, digits) in TABLE {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    out
}

/// Circled number for the callout at `index`; "[n]" past fifty.
pub fn callout(index: usize) -> String {
    let n = index + 1;
    let code = match n {
        1..=20 => Some(0x2460 + (n - 1)),
        21..=35 => Some(0x3251 + (n - 21)),
        36..=50 => Some(0x32B1 + (n - 36)),
        _ => None,
    };
    code.and_then(|c| char::from_u32(c as u32))
        .map(String::from)
        .unwrap_or_else(|| format!("[{n}]"))
}
