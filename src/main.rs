/*!
 * Command-line interface for foldcat
 */

use std::io::{self, Write};
use std::iter;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rayon::ThreadPoolBuilder;

use foldcat::config::{Args, Config};
use foldcat::report::{DropReport, ReportFormat, Reporter};
use foldcat::session::{DropStatus, Session};
use foldcat::source::LocalEntry;
use foldcat::utils::count_files;
use foldcat::writer::{write_document, TextWriter};

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "foldcat", &mut io::stdout());
        return Ok(());
    }

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = Config::from_args(args);
    config.validate()?;

    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        warn!("Failed to set thread pool size: {}", e);
    }

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?,
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("📊 Setup");
    progress.set_message(format!("📂 Scanning: {}", config.target.display()));

    let total_files = if config.target.is_dir() {
        count_files(&config.target)
    } else {
        1
    };
    progress.set_length(total_files);
    progress.set_prefix("📊 Processing");

    let root = LocalEntry::from_path(&config.target)?;
    // a previous run's output inside the target must not be combined again
    let excluded = if config.to_stdout {
        Vec::new()
    } else {
        root.tree_path_of(&config.output_file).into_iter().collect()
    };
    let session = Session::new(config.max_file_size_mib, Arc::new(progress.clone()))?
        .with_excluded_paths(excluded);

    let start_time = Instant::now();
    let status = session.drop_entries(iter::once(root))?;

    let result = match status {
        DropStatus::Combined(result) => result,
        DropStatus::RootIgnored(name) => {
            progress.finish_and_clear();
            eprintln!("⚠️  '{}' is an ignored directory; nothing to combine", name);
            return Ok(());
        }
        DropStatus::NothingDropped => {
            progress.finish_and_clear();
            eprintln!("⚠️  Nothing to combine");
            return Ok(());
        }
    };

    let output = if config.to_stdout {
        write_document(&mut io::stdout().lock(), &result.document)?;
        "<stdout>".to_string()
    } else {
        let writer = TextWriter::new(&config.output_file);
        writer.write(&result.document)?;
        writer.output_file().display().to_string()
    };
    io::stdout().flush()?;

    let duration = start_time.elapsed();
    progress.finish_and_clear();

    let reporter = Reporter::new(ReportFormat::ConsoleTable);
    reporter.print_report(&DropReport {
        output,
        duration,
        max_file_size_mib: session.max_file_size_mib(),
        statistics: result.statistics.clone(),
        warnings: result.warnings.clone(),
    });

    Ok(())
}
