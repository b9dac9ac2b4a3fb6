/*!
# Asoka - A Wellness Companion

Command-line entry point. Parses arguments, sets up logging and
configuration, then hands the command to [`asoka::cli::commands::run`].

## Usage

```
asoka [OPTIONS] <COMMAND>

Commands:
  serve     Serve the built web app with client-side routing
  journal   Read and write journal entries
  reminder  Manage meditation reminders
  tip       Print today's wellness tip
  breathe   Run a guided box-breathing exercise
  guided    Generate a spoken guided meditation as raw 24 kHz PCM16
  stress    Print stress chart data
  articles  List articles, or read one by id
  login     Complete sign-in
  logout    Sign out

Options:
      --log-format <LOG_FORMAT>  Log output format: "text" or "json"
  -v, --verbose                  Print verbose output
  -h, --help                     Print help
  -V, --version                  Print version
```

## Configuration

- `ASOKA_DATA_DIR`: where durable state is stored (defaults to `~/.local/share/asoka`)
- `ASOKA_DIST_DIR`: the built web app served by `serve` (defaults to `dist`)
- `PORT`: port for `serve` (defaults to 3000)
- `API_KEY`: key for the generative-AI service
- `ASOKA_AI_BASE_URL`: base URL of the generative-AI service
- `ASOKA_LOG_LEVEL`, `ASOKA_LOG_FORMAT`, `RUST_LOG`: logging
*/

use asoka::cli::{commands, CliArgs};
use asoka::config::Config;
use asoka::constants::{ENV_VAR_LOG_FORMAT, LOG_FORMAT_TEXT};
use asoka::errors::AppResult;
use asoka::logging::{self, LogFormat};
use clap::Parser;
use std::env;
use std::io;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Coordinates one invocation:
/// 1. Parses command-line arguments
/// 2. Loads configuration and initializes logging
/// 3. Validates configuration
/// 4. Runs the command inside the invocation's root span
///
/// # Errors
///
/// Returns configuration, storage, AI or server errors from the command.
fn run() -> AppResult<()> {
    let args = CliArgs::parse();

    let config = Config::load()?;
    let format = match args.log_format.as_deref() {
        Some(raw) => LogFormat::parse(raw)?,
        None => LogFormat::parse(
            &env::var(ENV_VAR_LOG_FORMAT).unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string()),
        )?,
    };
    let level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    logging::init(level, format)?;

    let span = logging::root_span();
    let _guard = span.enter();

    info!("Starting asoka");
    debug!("CLI arguments: {:?}", args);
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(args.command, &config, &mut out)
}
