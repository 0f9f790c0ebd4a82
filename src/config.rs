/*!
 * Configuration handling for foldcat
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::{FoldcatError, Result};

/// Bytes per MiB
pub const MIB: u64 = 1_048_576;

/// Smallest accepted size limit, in MiB
pub const MIN_FILE_SIZE_MIB: u64 = 1;

/// Largest accepted size limit, in MiB
pub const MAX_FILE_SIZE_MIB: u64 = 10;

/// Default size limit, in MiB
pub const DEFAULT_FILE_SIZE_MIB: u64 = 1;

/// Name of the combined document
pub const DEFAULT_OUTPUT_FILE: &str = "combined-files.txt";

/// Command-line arguments for foldcat
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "foldcat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Combine a folder into a single text document",
    long_about = "Renders the directory tree of a folder followed by the contents of every text file in it, skipping dependency, build and VCS directories as well as binary or oversized files."
)]
pub struct Args {
    /// Folder (or single file) to combine
    #[clap(default_value = ".")]
    pub path: String,

    /// Output file name
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Maximum size of an included file, in MiB
    #[clap(
        long = "max-size",
        value_name = "MIB",
        default_value_t = DEFAULT_FILE_SIZE_MIB,
        value_parser = clap::value_parser!(u64).range(MIN_FILE_SIZE_MIB..=MAX_FILE_SIZE_MIB)
    )]
    pub max_size: u64,

    /// Number of threads to use for walking
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Print the document to stdout instead of writing the output file
    #[clap(long)]
    pub stdout: bool,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Entry to process
    pub target: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    /// Maximum size of an included file, in MiB
    pub max_file_size_mib: u64,

    /// Number of threads to use for walking
    pub num_threads: usize,

    /// Print to stdout instead of writing a file
    pub to_stdout: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            max_file_size_mib: DEFAULT_FILE_SIZE_MIB,
            num_threads: 4,
            to_stdout: false,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target: PathBuf::from(args.path),
            output_file: PathBuf::from(args.output_file),
            max_file_size_mib: args.max_size,
            num_threads: args.threads,
            to_stdout: args.stdout,
        }
    }

    /// Size limit in bytes; files must be strictly smaller to be included
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mib * MIB
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_max_size(self.max_file_size_mib)?;
        ensure!(self.num_threads > 0, Config, "thread count must be at least 1");

        if !self.target.exists() {
            return Err(FoldcatError::PathNotFound(
                self.target.display().to_string(),
            ));
        }

        if !self.to_stdout {
            if let Some(parent) = self.output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(FoldcatError::PathNotFound(format!(
                        "output directory {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Check a size limit against the accepted 1..=10 MiB range
pub fn validate_max_size(mib: u64) -> Result<()> {
    ensure!(
        (MIN_FILE_SIZE_MIB..=MAX_FILE_SIZE_MIB).contains(&mib),
        InvalidArgument,
        "max file size must be between {} and {} MiB, got {}",
        MIN_FILE_SIZE_MIB,
        MAX_FILE_SIZE_MIB,
        mib
    );
    Ok(())
}
