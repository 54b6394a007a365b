use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::difficulty::{estimate_time, format_difficulty, format_duration};
use crate::search::VanityMatch;
use crate::stats::{format_number, SearchStats};

/// Spinner drawn on stderr
pub fn create_progress_bar(description: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(format!("Searching for: {}", description));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Update progress bar with current stats
pub fn update_progress(pb: &ProgressBar, stats: &SearchStats, difficulty: Option<u64>) {
    let next = match difficulty {
        Some(difficulty) => {
            let speed = stats.speed();
            if speed > 0.0 {
                format_duration(estimate_time(difficulty, speed))
            } else {
                "calculating...".to_string()
            }
        }
        None => "never".to_string(),
    };

    pb.set_message(format!(
        "Speed: {} | Scanned: {} | Found: {} | Next match in ~{}",
        stats.format_speed(),
        format_number(stats.get_attempts()),
        stats.get_matches(),
        next
    ));
}

/// Report a match: the bare address on stdout, details through the spinner
pub fn display_match(pb: &ProgressBar, found: &VanityMatch, path: &Path) {
    pb.suspend(|| println!("{}", found.onion));
    pb.println(format!(
        "  ✓ {}.onion  word: {}  key: {}",
        found.onion,
        found.word,
        path.display()
    ));
}

/// Banner printed before the workers start
pub fn display_search_banner(
    format_name: &str,
    threads: usize,
    words: usize,
    difficulty: Option<u64>,
    output_dir: &Path,
) {
    println!("\nKey format:  {}", format_name);
    println!("Threads:     {}", threads);
    println!("Words:       {}", format_number(words as u64));
    match difficulty {
        Some(d) => println!("Difficulty:  1 in {} keys per match", format_difficulty(d)),
        None => println!("Difficulty:  no word can match"),
    }
    println!("Output:      {}", output_dir.display());
    println!("\nPress Ctrl+C to stop\n");
}

/// Summary printed after the search stops
pub fn display_summary(stats: &SearchStats, written: u64) {
    println!("\nSearch stopped.");
    println!("  Keys scanned:   {}", format_number(stats.get_attempts()));
    println!("  Matches:        {}", format_number(stats.get_matches()));
    println!("  Keys written:   {}", format_number(written));
    println!("  Time elapsed:   {}", format_duration(stats.elapsed()));
    println!("  Average speed:  {}", stats.format_speed());
}
