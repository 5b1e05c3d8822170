//! Preparing model output for a speech synthesizer.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*_`#]").unwrap());
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Pause inserted where the text had line breaks.
pub const PAUSE: &str = "。 ";

/// Strip markdown emphasis characters and turn line breaks into pauses.
pub fn speakable(text: &str) -> String {
    let stripped = MARKUP.replace_all(text, "");
    LINE_BREAKS
        .replace_all(&stripped, PAUSE)
        .trim()
        .to_string()
}
