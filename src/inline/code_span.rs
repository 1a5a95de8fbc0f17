//! Backtick code spans
//!
//! A span opens with a run of backticks and closes at the next run of
//! exactly the same length; longer and shorter runs in between are content.
//! Inside a span nothing else is interpreted.

/// Scan a code span starting at `pos`; returns the normalized content and
/// the consumed length including both delimiter runs
pub(crate) fn scan_code_span(src: &str, pos: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let mut open_end = pos;
    while open_end < bytes.len() && bytes[open_end] == b'`' {
        open_end += 1;
    }
    let n = open_end - pos;
    if n == 0 {
        return None;
    }

    let mut i = open_end;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let mut j = i;
            while j < bytes.len() && bytes[j] == b'`' {
                j += 1;
            }
            if j - i == n {
                return Some((normalize_content(&src[open_end..i]), j - pos));
            }
            i = j;
        } else {
            i += 1;
        }
    }
    None
}

/// Newlines become spaces; one leading and trailing space pair is stripped
/// when the content is not all spaces
fn normalize_content(content: &str) -> String {
    let spaced: String = content
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    let strippable = spaced.len() >= 2
        && spaced.starts_with(' ')
        && spaced.ends_with(' ')
        && spaced.chars().any(|c| c != ' ');
    if strippable {
        spaced[1..spaced.len() - 1].to_string()
    } else {
        spaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_span() {
        let (content, consumed) = scan_code_span("`code` x", 0).unwrap();
        assert_eq!(content, "code");
        assert_eq!(consumed, 6);
    }

    #[test]
    fn test_double_backtick_allows_single_inside() {
        let (content, consumed) = scan_code_span("``a ` b``", 0).unwrap();
        assert_eq!(content, "a ` b");
        assert_eq!(consumed, 9);
    }

    #[test]
    fn test_mismatched_run_skipped() {
        // inner ``` is longer than the opener and cannot close it
        assert!(scan_code_span("``a ``` b", 0).is_none());
    }

    #[test]
    fn test_unterminated() {
        assert!(scan_code_span("`never closed", 0).is_none());
    }

    #[test]
    fn test_newline_becomes_space() {
        let (content, _) = scan_code_span("`a\nb`", 0).unwrap();
        assert_eq!(content, "a b");
    }

    #[test]
    fn test_space_pair_stripped() {
        let (content, _) = scan_code_span("` `` `", 0).unwrap();
        assert_eq!(content, "``");
    }

    #[test]
    fn test_all_spaces_kept() {
        let (content, _) = scan_code_span("`  `", 0).unwrap();
        assert_eq!(content, "  ");
    }
}
