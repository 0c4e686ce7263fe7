use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_wide_chars() {
        assert_eq!(display_width("P1-C1"), 5);
        assert_eq!(display_width("工程"), 4);
        assert_eq!(display_width("\u{2192} Survey"), 8);
    }

    #[test]
    fn truncate_fits_untouched() {
        assert_eq!(truncate_to_width("Alice", 8), "Alice");
        assert_eq!(truncate_to_width("Alice", 0), "");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Water Plant", 6), "Water\u{2026}");
        assert_eq!(truncate_to_width("Water Plant", 1), "\u{2026}");
    }

    #[test]
    fn truncate_does_not_split_wide_char() {
        // Budget of 2 cells cannot take a second 2-cell char
        assert_eq!(truncate_to_width("工程部", 3), "工\u{2026}");
    }

    #[test]
    fn prev_boundary_keeps_clusters_whole() {
        let s = "cafe\u{0301}";
        assert_eq!(prev_grapheme_boundary(s, s.len()), Some(3));
        assert_eq!(prev_grapheme_boundary("ab", 2), Some(1));
        assert_eq!(prev_grapheme_boundary("ab", 0), None);
    }
}
