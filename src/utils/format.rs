use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Cut `s` to at most `width` terminal columns, marking the cut with `…`.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad to `width` terminal columns.
pub fn pad(s: &str, width: usize) -> String {
    let cut = truncate(s, width);
    let fill = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(fill))
}

/// Day dots for a Sunday-first week.
pub fn week_dots(days: &[bool; 7]) -> String {
    days.iter()
        .map(|climbed| if *climbed { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_proportional() {
        assert_eq!(progress_bar(1, 2, 4), "██░░");
        assert_eq!(progress_bar(0, 0, 3), "░░░");
        assert_eq!(progress_bar(9, 3, 3), "███");
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate("Top Rope", 20), "Top Rope");
        assert_eq!(truncate("The Climbing Hangar", 8), "The Cli…");
        assert_eq!(truncate("ボルダリング", 5), "ボル…");
        assert_eq!(pad("Lead", 6), "Lead  ");
    }

    #[test]
    fn dots() {
        let days = [true, false, false, true, false, false, false];
        assert_eq!(week_dots(&days), "● ○ ○ ● ○ ○ ○");
    }
}
