
use indicatif::ProgressStyle;

/// Shared function to pull our progress bar styling
pub fn get_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len}; ETA: {eta_precise} {msg}")
        .unwrap()
        .progress_chars("##-")
}
