//! Text span helpers shared by the name cascades.

use regex::Regex;

/// Which letters a bare name run may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCase {
    /// ASCII letters of either case.
    Any,
    /// ASCII upper-case letters only.
    Upper,
}

impl NameCase {
    fn accepts(self, c: char) -> bool {
        match self {
            Self::Any => c.is_ascii_alphabetic(),
            Self::Upper => c.is_ascii_uppercase(),
        }
    }
}

/// End offset of the last match of `pattern` in `text`, or 0 if there is none.
///
/// 0 doubles as "no match", so callers searching from the returned offset
/// fall back to the whole text.
pub fn last_occurrence_end(text: &str, pattern: &Regex) -> usize {
    pattern.find_iter(text).last().map_or(0, |m| m.end())
}

/// Text before the first boundary marker, taken from capture group 1 of `boundary`.
pub fn span_before<'t>(text: &'t str, boundary: &Regex) -> Option<&'t str> {
    boundary
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// First whitespace-delimited run of at least two name words, trimmed.
///
/// A run starts at the beginning of the text or after whitespace, is a word
/// of letters, one whitespace character, then letters and whitespace, and
/// must end at the end of the text or just before whitespace. When the run
/// is glued to a non-letter, it is cut back to its last whitespace.
pub fn bare_name_run(text: &str, case: NameCase) -> Option<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    (0..chars.len())
        .filter(|&start| start == 0 || chars[start - 1].1.is_whitespace())
        .find_map(|start| run_end(text, &chars, start, case).map(|end| (start, end)))
        .map(|(start, end)| text[chars[start].0..end].trim().to_string())
}

/// Byte offset where a run beginning at char index `start` ends.
fn run_end(text: &str, chars: &[(usize, char)], start: usize, case: NameCase) -> Option<usize> {
    let n = chars.len();

    let mut i = start;
    while i < n && case.accepts(chars[i].1) {
        i += 1;
    }
    if i == start || i >= n || !chars[i].1.is_whitespace() {
        return None;
    }

    let tail_start = i + 1;
    let mut i = tail_start;
    while i < n && (case.accepts(chars[i].1) || chars[i].1.is_whitespace()) {
        i += 1;
    }
    if i == tail_start {
        return None;
    }
    if i == n {
        return Some(text.len());
    }

    // chars[i] is neither a letter nor whitespace
    (tail_start + 1..i)
        .rev()
        .find(|&j| chars[j].1.is_whitespace())
        .map(|j| chars[j].0)
}
