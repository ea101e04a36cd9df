use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dirscope::cli::OutputFormat;
use dirscope::config::Config;
use dirscope::fs::{aggregate, is_empty_dir, listing, SizeCache};
use dirscope::history::HistoryLogger;
use dirscope::output::{prepare, render_json, render_terminal};
use dirscope::tui::App;
use dirscope::utils::ask_confirmation;
use dirscope::{logging, Args};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::info;

fn main() -> ExitCode {
    let args = Args::parse_args();
    logging::init();

    let result = match Config::load() {
        Ok(config) => run(args, config),
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(mut args: Args, config: Config) -> Result<ExitCode> {
    if let Some(limit) = args.history {
        run_history(limit)?;
        return Ok(ExitCode::SUCCESS);
    }

    args.humanize |= config.listing.humanize;
    let base = resolve_path(&args.path)?;
    info!(path = %base.display(), "inspecting");

    if args.browse {
        run_browser(&config, base)?;
    } else if args.rm_empty {
        run_rm_empty(&base, &args)?;
    } else {
        run_listing(&base, &args, &config)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Anchors a relative argument to the current working directory.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn run_listing(base: &Path, args: &Args, config: &Config) -> Result<()> {
    let start = Instant::now();
    let cache = SizeCache::new();

    let entries = if args.first_only {
        listing::first_level(base, &cache)
    } else {
        aggregate(base, &cache)
    };

    let key = args.sort.unwrap_or(config.listing.default_sort);
    let entries = prepare(entries, args, key);

    match args.format {
        OutputFormat::Human => render_terminal(&entries, args)?,
        OutputFormat::Json => render_json(&entries, args)?,
    }

    report_timing(start.elapsed(), args.quiet);
    Ok(())
}

fn run_rm_empty(base: &Path, args: &Args) -> Result<()> {
    let start = Instant::now();
    let cache = SizeCache::new();
    let history = HistoryLogger::new();

    // Deepest first, so a directory that only contained empty directories
    // becomes deletable in the same pass.
    let mut dirs: Vec<PathBuf> = aggregate(base, &cache)
        .into_iter()
        .filter(|e| e.is_dir && e.path != base)
        .map(|e| e.path)
        .collect();
    dirs.sort_by_key(|p| std::cmp::Reverse(p.components().count()));

    let mut removed = 0usize;
    for dir in dirs {
        if !is_empty_dir(&dir) {
            continue;
        }
        if !args.yes && !ask_confirmation(&format!("Delete empty directory {}?", dir.display())) {
            continue;
        }
        match std::fs::remove_dir(&dir) {
            Ok(()) => {
                info!(path = %dir.display(), "removed empty directory");
                if let Err(err) = history.log_delete(&dir, Some(0)) {
                    eprintln!("Warning: could not record deletion: {}", err);
                }
                removed += 1;
            }
            Err(err) => eprintln!("Could not delete {}: {}", dir.display(), err),
        }
    }

    if !args.quiet {
        println!("Removed {} empty director{}", removed, if removed == 1 { "y" } else { "ies" });
    }
    report_timing(start.elapsed(), args.quiet);
    Ok(())
}

fn run_browser(config: &Config, base: PathBuf) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, base);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_history(limit: usize) -> Result<()> {
    let logger = HistoryLogger::new();
    let entries = logger.read_history(Some(limit))?;

    if entries.is_empty() {
        println!("No history found.");
        return Ok(());
    }

    println!("Last {} deletion(s):\n", entries.len());
    for entry in entries {
        let size = entry
            .size
            .map(|s| format!(" ({} bytes)", s))
            .unwrap_or_default();
        println!(
            "{} {} {}{}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            entry.path.display(),
            size
        );
    }
    Ok(())
}

fn report_timing(elapsed: Duration, quiet: bool) {
    if quiet || elapsed.as_millis() <= 100 {
        return;
    }
    if elapsed.as_secs() >= 1 {
        println!("Done in {:.1}s", elapsed.as_secs_f64());
    } else {
        println!("Done in {}ms", elapsed.as_millis());
    }
}
