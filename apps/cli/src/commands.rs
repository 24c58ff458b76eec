//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use studypack_core::pipeline::{BuildConfig, BuildResult, ProgressReporter, build};
use studypack_core::validate::validate_site;
use studypack_shared::{AppConfig, config_file_path, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// studypack — compile study content trees into static site artifacts.
#[derive(Parser)]
#[command(
    name = "studypack",
    version,
    about = "Compile per-institution lesson, quiz, and flashcard content into a static site artifact set.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Compile the content tree into database.json and content shards.
    Build {
        /// Content root directory (overrides config).
        #[arg(long)]
        content: Option<PathBuf>,

        /// Site root output directory (overrides config).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Explicit config file path.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Audit an emitted site: index parses and every referenced shard exists.
    Validate {
        /// Site root directory (overrides config).
        #[arg(long)]
        site: Option<PathBuf>,

        /// Explicit config file path.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "studypack=info",
        1 => "studypack=debug",
        _ => "studypack=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            content,
            out,
            config,
        } => cmd_build(content, out, config.as_deref()),
        Command::Validate { site, config } => cmd_validate(site, config.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

fn resolve_config(path: Option<&std::path::Path>) -> Result<AppConfig> {
    Ok(match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    })
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_build(
    content: Option<PathBuf>,
    out: Option<PathBuf>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = resolve_config(config_path)?;

    let build_config = BuildConfig {
        content_root: content.unwrap_or_else(|| PathBuf::from(&config.paths.content_root)),
        site_root: out.unwrap_or_else(|| PathBuf::from(&config.paths.site_root)),
    };

    info!(
        content_root = %build_config.content_root.display(),
        site_root = %build_config.site_root.display(),
        "compiling content tree"
    );

    let reporter = CliProgress::new();
    let result = build(&build_config, &reporter)?;

    println!();
    println!("  Site compiled successfully!");
    println!("  Institutions:    {}", result.institutions);
    println!("  Topics:          {}", result.topics);
    println!("  Lesson shards:   {}", result.lesson_shards);
    println!("  Resource shards: {}", result.resource_shards);
    println!("  Index:           {}", result.database_path.display());
    println!("  Time:            {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_validate(site: Option<PathBuf>, config_path: Option<&std::path::Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let site_root = site.unwrap_or_else(|| PathBuf::from(&config.paths.site_root));

    info!(site_root = %site_root.display(), "validating site artifacts");

    let database = validate_site(&site_root)?;

    println!(
        "  OK — {} institution tree(s), all referenced shards present.",
        database.tree.len()
    );
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Created config file at {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let path = config_file_path()?;

    println!("# resolved config (user file: {})", path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn institution_scanned(&self, key: &str, current: usize) {
        self.spinner
            .set_message(format!("Scanned institution [{current}] {key}"));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}
