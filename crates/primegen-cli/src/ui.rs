//! Styled terminal messages. `NO_COLOR` switches every helper to plain text.

use console::{style, Color};

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// Render `[TAG] text`, coloring only the tag.
fn tagged(tag: &str, color: Color, text: &str) -> String {
    let tag = format!("[{tag}]");
    if is_color_disabled() {
        format!("{tag} {text}")
    } else {
        format!("{} {text}", style(tag).fg(color).bold())
    }
}

/// Print the run banner.
pub fn print_header(text: &str) {
    let banner = format!("=== {text} ===");
    if is_color_disabled() {
        println!("{banner}");
    } else {
        println!("{}", style(banner).bold().cyan());
    }
}

/// The target count was reached.
pub fn print_success(text: &str) {
    println!("{}", tagged("OK", Color::Green, text));
}

/// The run stopped early but normally.
pub fn print_notice(text: &str) {
    println!("{}", tagged("STOP", Color::Yellow, text));
}

/// Fatal errors go to stderr.
pub fn print_error(text: &str) {
    eprintln!("{}", tagged("ERROR", Color::Red, text));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_precedes_text() {
        let line = tagged("STOP", Color::Yellow, "Cancelled by external signal.");
        assert!(line.contains("STOP"));
        assert!(line.ends_with(" Cancelled by external signal."));
    }

    #[test]
    fn print_functions_do_not_panic() {
        print_header("Prime search");
        print_success("Wrote 10 primes");
        print_notice("Cancelled by external signal.");
        print_error("could not open file");
    }

    #[test]
    fn print_functions_with_empty_text() {
        print_header("");
        print_success("");
        print_notice("");
        print_error("");
    }
}
