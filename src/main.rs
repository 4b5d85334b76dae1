//! sysample CLI - systematic sampling with a randomized reserve list.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use sysample::interactive::run_interactive;
use sysample::models::FormDefaults;
use sysample::sampling::source_for;
use sysample::{
    render_summary, validate_within, Config, ExportFormat, Exporter, ParamCandidate, Session,
};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sysample")]
#[command(version)]
#[command(about = "Systematic sampling of a numbered class list with a randomized reserve list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (optional)
    #[arg(short, long, global = true, default_value = "sysample.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a sample, show it and export the report
    Sample {
        #[command(flatten)]
        params: ParamArgs,

        /// Seed for a reproducible draw (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write the report into (overrides config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Report format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Only show the result, do not write a file
        #[arg(long)]
        no_export: bool,
    },

    /// Check parameters without drawing a sample
    Validate {
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Fill in the form interactively
    Interactive {
        /// Seed for reproducible draws (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show example configuration
    Example,
}

/// Sampling parameters; omitted flags fall back to the config defaults.
#[derive(Args)]
struct ParamArgs {
    /// Grade label carried into the report
    #[arg(short, long)]
    grade: Option<String>,

    /// Total number of students (N)
    #[arg(short = 'N', long, allow_hyphen_values = true)]
    total: Option<String>,

    /// Main sample size (n)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    sample_size: Option<String>,

    /// Reserve list size
    #[arg(short, long, allow_hyphen_values = true)]
    reserve_size: Option<String>,
}

impl ParamArgs {
    fn candidate(&self, defaults: &FormDefaults) -> ParamCandidate {
        let grade = self.grade.clone().unwrap_or_else(|| defaults.grade.clone());
        let total = self.total.clone().unwrap_or_else(|| defaults.total.to_string());
        let sample_size = self
            .sample_size
            .clone()
            .unwrap_or_else(|| defaults.sample_size.to_string());
        let reserve_size = self
            .reserve_size
            .clone()
            .unwrap_or_else(|| defaults.reserve_size.to_string());
        ParamCandidate::from_form(&grade, &total, &sample_size, &reserve_size)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ExportFormat::Text,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn print_example_config() {
    let example = r#"# sysample configuration file

[defaults]
# Values pre-filled into the form and used for omitted CLI flags
grade = "Grade 6"
total = 30
sample_size = 6
reserve_size = 3

[random]
# Fixed seed for reproducible draws; omit for a fresh draw every run
# seed = 42

[output]
dir = "."
format = "text"  # or "json"

[limits]
# Largest population that will be sampled
max_total = 1000000
"#;
    println!("{example}");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Example => print_example_config(),

        Commands::Validate { params } => {
            let candidate = params.candidate(&config.defaults);
            let params = validate_within(&candidate, config.limits.max_total)?;
            info!("Parameters are valid");
            println!("Grade:        {}", params.grade());
            println!("Total (N):    {}", params.total());
            println!("Sample (n):   {}", params.sample_size());
            println!("Reserve:      {}", params.reserve_size());
            println!("Interval (k): {}", params.interval());
        }

        Commands::Sample {
            params,
            seed,
            output_dir,
            format,
            no_export,
        } => {
            let mut session = Session::new(source_for(seed.or(config.random.seed)))
                .with_max_total(config.limits.max_total);
            let result = session.generate(&params.candidate(&config.defaults))?;
            println!("{}", render_summary(result));

            if !no_export {
                let exporter = Exporter::new(
                    output_dir.unwrap_or(config.output.dir),
                    format.map(ExportFormat::from).unwrap_or(config.output.format),
                );
                let path = exporter
                    .export(result)
                    .context("Failed to export sampling results")?;
                println!("Output:       {}", path.display());
            }
        }

        Commands::Interactive { seed } => {
            let mut session = Session::new(source_for(seed.or(config.random.seed)))
                .with_max_total(config.limits.max_total);
            let exporter = Exporter::new(config.output.dir.clone(), config.output.format);
            let stdin = io::stdin();
            run_interactive(
                &mut stdin.lock(),
                &mut io::stdout().lock(),
                &mut session,
                &config.defaults,
                &exporter,
            )?;
        }
    }

    Ok(())
}
