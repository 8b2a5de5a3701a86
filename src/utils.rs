use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `s` to at most `max_width` display columns, marking the cut with "...".
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Ratio the progress gauge can draw; the label carries the real numbers.
pub fn gauge_ratio(progress: f64) -> f64 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Splits text into visual lines of at most `max_width` columns.
/// Returns (line_text, first_char, end_char) per line, in char positions.
fn simulate_wrapped_lines(text: &str, max_width: usize) -> Vec<(String, usize, usize)> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;
    let mut line_start = 0;
    let mut count = 0;

    for (idx, ch) in text.chars().enumerate() {
        count = idx + 1;
        if ch == '\n' {
            lines.push((current_line.trim_end().to_string(), line_start, idx));
            current_line = String::new();
            current_width = 0;
            line_start = idx + 1;
            continue;
        }

        let char_width = ch.width().unwrap_or(1);
        if current_width + char_width > max_width && current_width > 0 {
            lines.push((current_line.trim_end().to_string(), line_start, idx));
            current_line = ch.to_string();
            current_width = char_width;
            line_start = idx;
        } else {
            current_line.push(ch);
            current_width += char_width;
        }
    }

    if !current_line.is_empty() || text.ends_with('\n') {
        lines.push((current_line.trim_end().to_string(), line_start, count));
    }

    lines
}

/// Line and column of a char-indexed cursor once `text` wraps at `max_width`.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_index: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor_index == 0 {
        return (0, 0);
    }

    let wrapped_lines = simulate_wrapped_lines(text, max_width);

    for (line_idx, (_, start, end)) in wrapped_lines.iter().enumerate() {
        if cursor_index >= *start && cursor_index <= *end {
            return (line_idx, cursor_index - start);
        }
    }

    match wrapped_lines.last() {
        Some((last_text, _, _)) => (wrapped_lines.len() - 1, last_text.chars().count()),
        None => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Rosaceae", 20), "Rosaceae");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let result = truncate_string("West-Europese bomen en struiken", 20);
        assert_eq!(result, "West-Europese bom...");
        assert!(result.width() <= 20);
    }

    #[test]
    fn test_truncate_string_multibyte() {
        let result = truncate_string("Érable champêtre à feuilles", 10);
        assert_eq!(result, "Érable ...");
    }

    #[test]
    fn test_truncate_string_empty() {
        assert_eq!(truncate_string("", 20), "");
    }

    #[test]
    fn test_gauge_ratio_clamps() {
        assert_eq!(gauge_ratio(0.5), 0.5);
        assert_eq!(gauge_ratio(2.0), 1.0);
        assert_eq!(gauge_ratio(-1.0), 0.0);
        assert_eq!(gauge_ratio(f64::NAN), 0.0);
    }

    #[test]
    fn test_cursor_position_empty_text() {
        assert_eq!(calculate_wrapped_cursor_position("", 0, 10), (0, 0));
    }

    #[test]
    fn test_cursor_position_single_line() {
        assert_eq!(calculate_wrapped_cursor_position("Quercus", 3, 10), (0, 3));
    }

    #[test]
    fn test_cursor_position_wraps() {
        let text = "Fraxinus excelsior pendula";
        // "Fraxinus e" | "xcelsior p" | "endula"
        assert_eq!(calculate_wrapped_cursor_position(text, 15, 10), (1, 5));
        assert_eq!(calculate_wrapped_cursor_position(text, 22, 10), (2, 2));
    }

    #[test]
    fn test_cursor_position_exact_boundary() {
        let text = "0123456789";
        assert_eq!(calculate_wrapped_cursor_position(text, 10, 10), (0, 10));
        let text = "0123456789A";
        assert_eq!(calculate_wrapped_cursor_position(text, 11, 10), (1, 1));
    }

    #[test]
    fn test_cursor_position_beyond_text() {
        assert_eq!(calculate_wrapped_cursor_position("Es", 10, 10), (0, 2));
    }

    #[test]
    fn test_cursor_position_counts_chars_not_bytes() {
        assert_eq!(calculate_wrapped_cursor_position("Érable", 2, 10), (0, 2));
    }

    #[test]
    fn test_wrapped_lines_with_newlines() {
        let lines = simulate_wrapped_lines("Eik\nBeuk\nEs", 20);
        let texts: Vec<&str> = lines.iter().map(|(text, _, _)| text.as_str()).collect();
        assert_eq!(texts, vec!["Eik", "Beuk", "Es"]);
    }
}
