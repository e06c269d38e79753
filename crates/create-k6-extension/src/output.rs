//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a step success line
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print a step failure line
pub fn failure(msg: &str) {
    println!("{} {}", style("✗").red().bold(), msg);
}

/// Print a section header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).yellow().bold());
}

/// Print captured command output as a diagnostic block
pub fn diagnostic(msg: &str) {
    print!("{}", style(msg).italic().dim());
}

/// Create a spinner for a pipeline step
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.yellow} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
