//! Text helpers for the configuration grammar.
//!
//! The exclusion-role list must distinguish an empty group from a missing one,
//! so splitting never collapses consecutive delimiters.

/// Returns `true` for the six ASCII whitespace bytes recognised by the grammar.
///
/// Unlike [`char::is_ascii_whitespace`], vertical tab (`0x0b`) is included.
fn is_grammar_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Strips leading and trailing whitespace.
///
/// Returns `None` when nothing but whitespace remains. The input is borrowed,
/// never modified.
pub fn trim(s: &str) -> Option<&str> {
    let trimmed = s.trim_matches(is_grammar_space);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Like [`trim`], but also accepts an absent value.
pub fn trim_opt(s: Option<&str>) -> Option<&str> {
    s.and_then(trim)
}

/// Number of fields `s` splits into on `delimiter`, empty fields included.
///
/// Always one more than the number of delimiters.
pub fn count_fields(s: &str, delimiter: char) -> usize {
    s.matches(delimiter).count() + 1
}

// ============================================================================
// SplitKeepEmpty
// ============================================================================

/// Cursor over the fields of a string split on a single delimiter.
///
/// Consecutive, leading and trailing delimiters all produce empty fields:
/// `"a;;b;"` yields `"a"`, `""`, `"b"`, `""`. A string with `n` delimiters
/// always yields exactly `n + 1` fields.
///
/// The cursor is owned by the caller, so several splits may be in progress at
/// once on different threads.
#[derive(Debug, Clone)]
pub struct SplitKeepEmpty<'a> {
    source: &'a str,
    delimiter: char,
    /// Byte offset of the next field, `None` once exhausted.
    cursor: Option<usize>,
}

impl<'a> SplitKeepEmpty<'a> {
    /// Creates a cursor positioned at the first field.
    pub fn new(source: &'a str, delimiter: char) -> Self {
        Self {
            source,
            delimiter,
            cursor: Some(0),
        }
    }

    /// Moves the cursor back to the first field.
    pub fn rewind(&mut self) {
        self.cursor = Some(0);
    }

    /// The string being split.
    pub fn source(&self) -> &'a str {
        self.source
    }
}

impl<'a> Iterator for SplitKeepEmpty<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor?;
        let rest = &self.source[start..];

        match rest.find(self.delimiter) {
            Some(offset) => {
                self.cursor = Some(start + offset + self.delimiter.len_utf8());
                Some(&rest[..offset])
            }
            None => {
                self.cursor = None;
                Some(rest)
            }
        }
    }
}

impl std::iter::FusedIterator for SplitKeepEmpty<'_> {}
