use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Collapses line breaks so a message fits on a single overlay row.
pub fn single_line(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cuts `s` to at most `width` terminal columns, ending with `...` when cut.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let budget = width - 3;
    let mut used = 0;
    let mut truncated = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(c);
    }
    truncated.push_str("...");
    truncated
}
