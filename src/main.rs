use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use chronos_extract::error::Result;
use chronos_extract::{
    ArticleScanner, ChapterSet, TimelineEvent, YearRange, chapters, extract_timeline, reduce,
};

#[derive(Parser)]
#[command(name = "chronos_extract", about = "Timeline extraction from unstructured prose")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a timeline from a text/HTML/chapter-JSON file or directory
    Extract {
        /// Source file (.txt, .html, .json) or a directory to walk
        path: PathBuf,
        /// Inclusive start of the year window
        #[arg(long, default_value_t = 1850)]
        start: u16,
        /// Inclusive end of the year window
        #[arg(long, default_value_t = 2025)]
        end: u16,
        /// Scoping query (case-insensitive substring)
        #[arg(long)]
        query: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Extract {
            path,
            start,
            end,
            query,
        } => run_extract(&path, YearRange::new(start, end), query.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: source files → reduced timeline JSON on stdout
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(path: &Path, range: YearRange, query: Option<&str>) -> Result<()> {
    let files = collect_files(path);
    eprintln!(
        "Scanning {} source file(s) under {}",
        files.len(),
        path.display()
    );

    let mut events: Vec<TimelineEvent> = Vec::new();
    for file in &files {
        events.extend(extract_file(file, range, query)?);
    }
    // Per-file lists are already reduced; the merged list needs one more pass.
    let events = reduce::finalize(events, range);

    eprintln!(
        "Extracted {} event(s) in {}–{}",
        events.len(),
        range.start,
        range.end
    );

    let json = serde_json::to_string_pretty(&events)?;
    println!("{json}");
    Ok(())
}

/// A file is taken as-is; a directory is walked for known source kinds.
fn collect_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| matches!(extension(p), Some("txt" | "html" | "htm" | "json")))
        .collect()
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Dispatch a single file to the adapter matching its shape.
fn extract_file(path: &Path, range: YearRange, query: Option<&str>) -> Result<Vec<TimelineEvent>> {
    match extension(path) {
        Some("json") => {
            let json = std::fs::read_to_string(path)?;
            let set = ChapterSet::parse(&json)?;
            chapters::extract_from_chapters(&set, range, query)
        }
        Some("html" | "htm") => {
            let html = std::fs::read_to_string(path)?;
            ArticleScanner::new().extract(&html, range)
        }
        _ => {
            let text = std::fs::read_to_string(path)?;
            extract_timeline(&text, range, query)
        }
    }
}
