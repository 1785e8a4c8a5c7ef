//! Header normalization for matching spreadsheet columns to API field names
//!
//! Human-entered headers arrive with Turkish letters, mixed case, punctuation
//! and stray whitespace. [`normalize`] reduces them to an ASCII lowercase
//! alphanumeric token so `" Çalışan Adı "` and `"calisan_adi"` compare equal.

/// Closed folding table applied after lowercasing.
///
/// Anything outside this table that is not ASCII alphanumeric is dropped,
/// never transliterated.
pub const FOLD_TABLE: &[(char, char)] = &[
    ('ı', 'i'),
    ('ş', 's'),
    ('ç', 'c'),
    ('ö', 'o'),
    ('ü', 'u'),
    ('ğ', 'g'),
];

/// Look up a character in [`FOLD_TABLE`]
pub fn fold_char(c: char) -> char {
    FOLD_TABLE
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Normalize a single header cell.
///
/// Trims, lowercases, folds through [`FOLD_TABLE`], then keeps only ASCII
/// letters and digits. Empty input gives an empty token.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    trimmed
        .to_lowercase()
        .chars()
        .map(fold_char)
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// One header cell alongside its normalized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderToken {
    /// 1-based column position in the sheet
    pub column: usize,
    pub raw_text: Option<String>,
    pub normalized_text: String,
}

impl HeaderToken {
    pub fn new(column: usize, raw_text: Option<String>) -> Self {
        let normalized_text = raw_text.as_deref().map(normalize).unwrap_or_default();
        Self {
            column,
            raw_text,
            normalized_text,
        }
    }

    /// Cells with no text are skipped by callers rather than matched
    pub fn is_empty(&self) -> bool {
        self.raw_text
            .as_deref()
            .map(|raw| raw.trim().is_empty())
            .unwrap_or(true)
    }
}

/// Tokenize a header row, keeping column positions
pub fn tokenize_headers(headers: &[Option<String>]) -> Vec<HeaderToken> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, raw)| HeaderToken::new(idx + 1, raw.clone()))
        .collect()
}
