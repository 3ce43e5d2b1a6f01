//! md2rtf: CLI tool to convert Markdown files to RTF

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use config::{CONFIG_FILE_NAME, Config, OutputFormat};
use md2rtf_core::{
    RtfOptions, document_from_json, document_to_rtf, markdown_to_plain_text, markdown_to_rtf,
};

#[derive(Parser, Debug)]
#[command(name = "md2rtf")]
#[command(about = "Convert Markdown files to RTF")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "Examples:
  md2rtf README.md                  # Convert single file to README.rtf
  md2rtf README.md -o out.rtf       # Convert to specific output file
  md2rtf tree.json                  # Convert a JSON document tree
  md2rtf docs/ -o rtf/ -r           # Convert directory recursively
  md2rtf docs/ -o rtf/ -j4          # Use 4 parallel jobs
  md2rtf notes.md --plain-text      # Strip markup, write notes.txt
  md2rtf init                       # Write a sample _md2rtf.toml")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input Markdown (.md, .markdown) or JSON document tree (.json) file, or a directory
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Emit an RTF fragment without the document envelope
    #[arg(long)]
    no_envelope: bool,

    /// Do not insert empty paragraphs between blocks
    #[arg(long)]
    no_spacing: bool,

    /// Write plain text instead of RTF
    #[arg(long)]
    plain_text: bool,

    /// Configuration file (defaults to _md2rtf.toml next to the input)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a sample configuration file
    Init {
        /// Output path for the configuration file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Print the JSON schema of the configuration file instead
        #[arg(long)]
        schema: bool,
    },
}

/// Settings resolved from command line flags, the configuration file and defaults
#[derive(Debug, Clone)]
struct Settings {
    format: OutputFormat,
    rtf: RtfOptions,
    verbose: bool,
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    if let Some(Commands::Init { output, schema }) = &cli.command {
        return run_init(output, *schema);
    }

    let Some(input) = cli.input.as_deref() else {
        anyhow::bail!("No input given. Run `md2rtf --help` for usage.");
    };

    let config = load_config(&cli, input)?;
    let settings = resolve_settings(&cli, config.as_ref());
    debug!("Settings: {:?}", settings);

    if input.is_file() {
        convert_file(input, cli.output.as_deref(), &settings)?;
    } else if input.is_dir() {
        convert_directory(input, cli.output.as_deref(), cli.recursive, cli.jobs, &settings)?;
    } else {
        anyhow::bail!("Input path does not exist: {}", input.display());
    }

    Ok(())
}

/// `RUST_LOG` takes precedence over `-v` / `-q`
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run_init(output: &Path, schema: bool) -> Result<()> {
    if schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if output.exists() {
        anyhow::bail!("Configuration file already exists: {}", output.display());
    }

    let content = Config::sample().to_toml_with_schema()?;
    fs::write(output, content)
        .with_context(|| format!("Failed to write: {}", output.display()))?;
    println!("{}", output.display());

    Ok(())
}

/// Explicit `--config`, otherwise `_md2rtf.toml` in the input's directory
fn load_config(cli: &Cli, input: &Path) -> Result<Option<Config>> {
    if let Some(path) = &cli.config {
        return Config::load(path).map(Some);
    }

    let dir = if input.is_dir() {
        input
    } else {
        match input.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    };
    let config = Config::load_from_dir(dir)?;
    if config.is_some() {
        info!("Using {}", dir.join(CONFIG_FILE_NAME).display());
    }
    Ok(config)
}

/// Command line flags win over the configuration file, which wins over defaults
fn resolve_settings(cli: &Cli, config: Option<&Config>) -> Settings {
    let mut rtf = config.map(Config::rtf_options).unwrap_or_default();
    if cli.no_envelope {
        rtf.envelope = false;
    }
    if cli.no_spacing {
        rtf.spacer_paragraphs = false;
    }

    let format = if cli.plain_text {
        OutputFormat::Txt
    } else {
        config.and_then(|c| c.output.format).unwrap_or_default()
    };

    Settings {
        format,
        rtf,
        verbose: cli.verbose,
        quiet: cli.quiet,
    }
}

/// Convert a single file
fn convert_file(input: &Path, output: Option<&Path>, settings: &Settings) -> Result<()> {
    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension(settings.format.extension()),
    };

    if settings.verbose {
        eprintln!(
            "Converting: {} -> {}",
            input.display(),
            output_path.display()
        );
    }

    convert_file_inner(input, &output_path, settings)?;

    if !settings.quiet {
        println!("{}", output_path.display());
    }

    Ok(())
}

/// Convert a directory of Markdown files
fn convert_directory(
    input: &Path,
    output: Option<&Path>,
    recursive: bool,
    jobs: Option<usize>,
    settings: &Settings,
) -> Result<()> {
    let output_dir = output.unwrap_or(input);

    let files = collect_input_files(input, recursive)?;

    if files.is_empty() {
        if !settings.quiet {
            eprintln!("No Markdown files found in {}", input.display());
        }
        return Ok(());
    }

    let total = files.len();
    if settings.verbose {
        eprintln!("Found {} Markdown files", total);
    }

    // Configure thread pool if jobs specified
    if let Some(n) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    // Atomic counters for thread-safe progress tracking
    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    // Parallel conversion
    let errors: Vec<_> = files
        .par_iter()
        .filter_map(|file| {
            let relative = file.strip_prefix(input).unwrap_or(file);
            let output_file = output_dir
                .join(relative)
                .with_extension(settings.format.extension());

            match convert_file_inner(file, &output_file, settings) {
                Ok(()) => {
                    success.fetch_add(1, Ordering::Relaxed);
                    if !settings.quiet {
                        println!("{}", output_file.display());
                    }
                    None
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    Some((file.clone(), e))
                }
            }
        })
        .collect();

    // Report errors
    for (file, e) in &errors {
        eprintln!("Error converting {}: {:#}", file.display(), e);
    }

    let success_count = success.load(Ordering::Relaxed);
    let failed_count = failed.load(Ordering::Relaxed);

    if !settings.quiet {
        eprintln!("Converted {} files, {} failed", success_count, failed_count);
    }

    if failed_count > 0 {
        anyhow::bail!("{} files failed to convert", failed_count);
    }

    Ok(())
}

/// Inner conversion function that doesn't print (for parallel use)
fn convert_file_inner(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;

    let converted = convert_content(&content, InputKind::of(input), settings)
        .with_context(|| format!("Failed to convert: {}", input.display()))?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(output, &converted)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Markdown,
    /// Serialized document tree
    Json,
}

impl InputKind {
    fn of(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputKind::Json,
            _ => InputKind::Markdown,
        }
    }
}

/// Core conversion function
fn convert_content(content: &str, kind: InputKind, settings: &Settings) -> Result<String> {
    match (kind, settings.format) {
        (InputKind::Markdown, OutputFormat::Rtf) => Ok(markdown_to_rtf(content, &settings.rtf)),
        (InputKind::Markdown, OutputFormat::Txt) => Ok(markdown_to_plain_text(content)),
        (InputKind::Json, OutputFormat::Rtf) => {
            let doc = document_from_json(content)?;
            Ok(document_to_rtf(&doc, &settings.rtf))
        }
        (InputKind::Json, OutputFormat::Txt) => {
            anyhow::bail!("Plain-text output is only available for Markdown input")
        }
    }
}

/// Collect all Markdown files in a directory
fn collect_input_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension()
                && (ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
            {
                files.push(path);
            }
        } else if path.is_dir() && recursive {
            files.extend(collect_input_files(&path, recursive)?);
        }
    }

    files.sort();
    Ok(files)
}
