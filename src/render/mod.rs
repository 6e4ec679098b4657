pub mod html;
pub mod terminal;

/// ANSI escape codes for the terminal report.
pub struct Ansi;

impl Ansi {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const MAGENTA: &'static str = "\x1b[35m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Wrap `text` in a color code unless color is disabled.
pub fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{}", Ansi::RESET)
    } else {
        text.to_string()
    }
}

/// Squash whitespace and cut to `width` chars, with an ellipsis when cut.
pub fn trim_to(text: &str, width: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= width {
        return text;
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{cut}…")
}

pub fn fmt_pct(value: f64) -> String {
    format!("{:5.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_respects_toggle() {
        assert_eq!(paint("x", Ansi::RED, false), "x");
        assert_eq!(paint("x", Ansi::RED, true), "\x1b[31mx\x1b[0m");
    }

    #[test]
    fn trim_to_cuts_with_ellipsis() {
        assert_eq!(trim_to("short", 10), "short");
        assert_eq!(trim_to("a  spaced   out phrase", 100), "a spaced out phrase");
        let cut = trim_to("abcdefghij", 5);
        assert_eq!(cut.chars().count(), 5);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn fmt_pct_scales() {
        assert_eq!(fmt_pct(0.625), " 62.5%");
    }
}
