use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use onion_vanity::{
    calculate_difficulty, create_progress_bar, display_match, display_search_banner,
    display_summary, format_number, format_speed, load_dictionary, update_progress,
    DictionarySource, KeyFormat, KeyWriter, Result, VanityConfig, VanityMatch, VanitySearcher,
};

#[derive(Parser)]
#[command(name = "onion-vanity")]
#[command(about = "Search for Tor onion addresses that start with dictionary words", long_about = None)]
struct Cli {
    /// Address format: legacy RSA-1024 or v3 Ed25519
    #[arg(short = 'k', long = "key", value_enum, default_value_t = KeyFormat::Rsa)]
    key: KeyFormat,

    /// Minimum word length (default: 3 for rsa, 4 for ed25519)
    #[arg(short = 'm', long = "min", value_name = "N")]
    min: Option<usize>,

    /// Path to a dictionary file (whitespace separated words)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<PathBuf>,

    /// URL of a dictionary file, fetched with plain HTTP GET
    #[arg(short = 'u', long = "url", value_name = "URL")]
    url: Option<String>,

    /// Number of threads to use (default: all CPU cores)
    #[arg(short = 't', long, value_name = "N")]
    threads: Option<usize>,

    /// Directory for found keys
    #[arg(short = 'o', long = "out", value_name = "DIR", default_value = "keys")]
    out: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long = "log-level", value_name = "FILTER", default_value = "warn")]
    log_level: String,

    /// Run benchmark mode (10 second test, no dictionary needed)
    #[arg(long = "benchmark")]
    benchmark: bool,
}

impl Cli {
    /// The dictionary to search with, or `None` unless exactly one of
    /// `--file` / `--url` was given
    fn dictionary_source(&self) -> Option<DictionarySource> {
        match (&self.file, &self.url) {
            (Some(path), None) => Some(DictionarySource::File(path.clone())),
            (None, Some(url)) => Some(DictionarySource::Url(url.clone())),
            _ => None,
        }
    }

    fn threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let outcome = if cli.benchmark {
        run_benchmark(cli.key, cli.threads())
    } else {
        let Some(source) = cli.dictionary_source() else {
            println!("No dictionary supplied. Give exactly one of --file or --url.");
            return ExitCode::SUCCESS;
        };
        run_search(&cli, &source)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_search(cli: &Cli, source: &DictionarySource) -> Result<()> {
    let format = cli.key;
    let min_length = cli.min.unwrap_or_else(|| format.default_min_length());

    println!("Loading dictionary from {}...", source.describe());
    let words = load_dictionary(source, min_length)?;
    println!("{} words found.", words.len());

    let mut writer = KeyWriter::new(&cli.out)?;

    let difficulty = calculate_difficulty(&words, format.identifier_len());
    let config = VanityConfig {
        format,
        words: words.into(),
        threads: cli.threads(),
    };

    display_search_banner(
        format.display_name(),
        config.threads,
        config.words.len(),
        difficulty,
        writer.output_dir(),
    );

    let searcher = VanitySearcher::start(&config)?;
    install_stop_handler(&searcher);

    let stats = Arc::clone(searcher.stats());
    let pb = create_progress_bar(&format!("{} dictionary words", config.words.len()));

    // Single consumer: drain matches in arrival order until every worker has stopped
    loop {
        match searcher.results().recv_timeout(Duration::from_millis(100)) {
            Ok(found) => persist_match(&mut writer, &pb, &found),
            Err(RecvTimeoutError::Timeout) => update_progress(&pb, &stats, difficulty),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    for found in searcher.shutdown() {
        persist_match(&mut writer, &pb, &found);
    }
    pb.finish_and_clear();

    display_summary(&stats, writer.written());
    Ok(())
}

/// Write a match to disk and report it. If the write fails the key is printed
/// to stderr instead so it is not lost.
fn persist_match(writer: &mut KeyWriter, pb: &ProgressBar, found: &VanityMatch) {
    match writer.write(found) {
        Ok(path) => display_match(pb, found, &path),
        Err(e) => {
            tracing::error!(onion = %found.onion, error = %e, "failed to write key file");
            pb.suspend(|| {
                println!("{}", found.onion);
                eprintln!("Could not save key for {}.onion: {}", found.onion, e);
                eprintln!("Private key: {}", found.private_key);
            });
        }
    }
}

fn install_stop_handler(searcher: &VanitySearcher) {
    let running = searcher.stop_flag();
    if let Err(e) = ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    }) {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }
}

fn run_benchmark(format: KeyFormat, threads: usize) -> Result<()> {
    println!("\nRunning 10-second benchmark...");
    println!("Key format: {}", format.display_name());
    println!("Threads:    {}\n", threads);

    // No words: every candidate is generated and checked, nothing matches
    let config = VanityConfig {
        format,
        words: Vec::<String>::new().into(),
        threads,
    };
    let searcher = VanitySearcher::start(&config)?;
    install_stop_handler(&searcher);

    let stats = Arc::clone(searcher.stats());
    let running = searcher.stop_flag();
    let pb = create_progress_bar("benchmark");

    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(10) && running.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_millis(100));
        update_progress(&pb, &stats, None);
    }

    searcher.shutdown();
    pb.finish_and_clear();

    let speed = stats.speed();
    println!("Benchmark Results:");
    println!("  Total keys:  {}", format_number(stats.get_attempts()));
    println!("  Avg speed:   {}", format_speed(speed));
    println!("  Per thread:  {}", format_speed(speed / threads as f64));
    Ok(())
}
