//! Progress bar for batch tagging.

use aigc_tag::constants::SPINNER_CHARS;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar counting tagged files.
///
/// Falls back to the default style if the template is rejected.
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░").tick_strings(SPINNER_CHARS));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(10);
        // Just verify it creates without panicking
        pb.set_message("tagging");
        pb.inc(5);
        assert_eq!(pb.position(), 5);
        pb.finish_and_clear();
    }
}
