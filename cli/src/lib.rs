use anyhow::{Error, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use ttl2jsonld::api::init_logging;
use ttl2jsonld::{Config, Converter, DocumentSource, Strategy};
use walkdir::WalkDir;

#[derive(Debug, Parser)]
#[command(name = "ttl2jsonld")]
#[command(about = "Turtle to JSON-LD converter")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// Offline mode - will not attempt to fetch context or frame documents from the web
    #[clap(long, short, action, default_value = "false", global = true)]
    offline: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a single Turtle file to a JSON-LD document
    Convert {
        /// The Turtle file to convert
        input: PathBuf,
        /// Context document used for compaction (file path or URL)
        #[clap(long, short)]
        context: Option<String>,
        /// Frame document applied after compaction (file path or URL)
        #[clap(long, short)]
        frame: Option<String>,
        /// Output file path, defaults to the input path with a .jsonld extension
        #[clap(long, short = 'O')]
        output: Option<PathBuf>,
        /// Output shape: one of [basic, grouped, flat] (default: grouped)
        #[clap(long, short)]
        strategy: Option<String>,
        /// Fail instead of replacing an existing output file
        #[clap(long, action)]
        no_overwrite: bool,
    },
    /// Convert every .ttl file under a directory
    Batch {
        /// The directory to scan for Turtle files
        directory: PathBuf,
        /// Directory to write converted documents into, mirroring the input tree.
        /// Defaults to writing next to each input file.
        #[clap(long)]
        out_dir: Option<PathBuf>,
        /// Context document used for compaction (file path or URL)
        #[clap(long, short)]
        context: Option<String>,
        /// Frame document applied after compaction (file path or URL)
        #[clap(long, short)]
        frame: Option<String>,
        /// Output shape: one of [basic, grouped, flat] (default: grouped)
        #[clap(long, short)]
        strategy: Option<String>,
    },
    /// Parse and group a Turtle file without writing anything, printing statistics
    Inspect {
        /// The Turtle file to inspect
        input: PathBuf,
        /// Output JSON instead of text
        #[clap(long, action, default_value = "false")]
        json: bool,
    },
    /// Prints the version of the ttl2jsonld binary
    Version,
}

pub fn run() -> Result<()> {
    init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn parse_strategy(strategy: Option<&str>) -> Result<Strategy> {
    match strategy {
        Some(s) => Strategy::from_str(s),
        None => Ok(Strategy::default()),
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("jsonld")
}

fn execute(cmd: Cli) -> Result<()> {
    // The RUST_LOG env var is set by `init_logging` if TTL2JSONLD_LOG is present.
    // CLI flags for verbosity take precedence. If nothing is set, we default to "warn".
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    match cmd.command {
        Commands::Convert {
            input,
            context,
            frame,
            output,
            strategy,
            no_overwrite,
        } => {
            let output = output.unwrap_or_else(|| default_output(&input));
            let config = Config::builder()
                .input(input)
                .output(output)
                .context(context.as_deref().map(DocumentSource::from_str))
                .frame(frame.as_deref().map(DocumentSource::from_str))
                .strategy(parse_strategy(strategy.as_deref())?)
                .offline(cmd.offline)
                .overwrite(!no_overwrite)
                .build()?;
            if cmd.verbose || cmd.debug {
                config.print();
            }
            let report = Converter::new(config).run()?;
            println!("{report}");
        }
        Commands::Batch {
            directory,
            out_dir,
            context,
            frame,
            strategy,
        } => {
            let strategy = parse_strategy(strategy.as_deref())?;
            let context = context.as_deref().map(DocumentSource::from_str);
            let frame = frame.as_deref().map(DocumentSource::from_str);

            let mut inputs: Vec<PathBuf> = WalkDir::new(&directory)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| {
                    e.path()
                        .extension()
                        .map(|ext| ext == "ttl")
                        .unwrap_or(false)
                })
                .map(|e| e.path().to_path_buf())
                .collect();
            inputs.sort();

            if inputs.is_empty() {
                return Err(anyhow::anyhow!(
                    "No .ttl files found under {}",
                    directory.display()
                ));
            }
            info!("Converting {} files under {}", inputs.len(), directory.display());

            // one bad file aborts the whole batch; partial batches are not valid output
            for input in inputs {
                let output = match &out_dir {
                    Some(dir) => {
                        let rel = input.strip_prefix(&directory).unwrap_or(&input);
                        dir.join(rel).with_extension("jsonld")
                    }
                    None => default_output(&input),
                };
                let config = Config::builder()
                    .input(input)
                    .output(output)
                    .context(context.clone())
                    .frame(frame.clone())
                    .strategy(strategy)
                    .offline(cmd.offline)
                    .build()?;
                let report = Converter::new(config).run()?;
                println!("{report}");
            }
        }
        Commands::Inspect { input, json } => {
            let config = Config::builder()
                .input(input.clone())
                .output(default_output(&input))
                .build()?;
            let report = Converter::new(config).inspect()?;
            if json {
                let obj = serde_json::json!({
                    "input": input.display().to_string(),
                    "triples": report.triples,
                    "subjects": report.subjects,
                });
                println!("{}", serde_json::to_string_pretty(&obj)?);
            } else {
                println!(
                    "{}: {} triples across {} subjects",
                    input.display(),
                    report.triples,
                    report.subjects
                );
            }
        }
        Commands::Version => {
            println!("ttl2jsonld {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
