use clap::Parser;
use insanity_tools::repl::Repl;
use insanity_tools::session::{Session, Settings, expand_path};
use insanity_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_level)?;
    let settings = cli.settings();

    let mut repl = Repl::new()?;
    repl.greet();
    let input = match settings.input {
        Some(input) => input,
        None => repl.prompt_input_path()?,
    };

    let session = Session::open(&input, settings.output)?;
    repl.run(&session)
}

/// Installs a stderr subscriber so log lines never mix with the transcript.
/// `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|error| ToolError::Logging(error.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Browse a multi-sheet workbook as a category tree and export selections."
)]
struct Cli {
    /// Workbook to browse; prompted for when omitted.
    input: Option<String>,

    /// Where `fix the insanity` writes the exported items.
    #[arg(long, default_value = insanity_tools::io::excel_write::DEFAULT_OUTPUT)]
    output: String,

    /// Default tracing filter when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            input: self.input.as_deref().map(expand_path),
            output: expand_path(&self.output),
        }
    }
}
