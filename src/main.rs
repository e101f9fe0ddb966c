//! vsock-send - send one line to the host over VSOCK and print the reply.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vsock_send::cli::{parse_args, Invocation};
use vsock_send::client::RequestResponder;
use vsock_send::config::{Settings, DEFAULT_CONFIG_PATH};
use vsock_send::error::{ClientError, ClientResult};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

fn main() -> ExitCode {
    let invocation = match parse_args(env::args().skip(1)) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::from(1);
        }
    };

    let (config_path, tokens) = match invocation {
        Invocation::Help => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Invocation::Version => {
            println!("{} {}", NAME, VERSION);
            return ExitCode::SUCCESS;
        }
        Invocation::Send {
            config_path,
            tokens,
        } => (config_path, tokens),
    };

    // Load configuration
    let settings = match load_settings(config_path.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging based on configuration
    if let Err(e) = init_logging(&settings) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    debug!("Starting {} v{}", NAME, VERSION);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error creating runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&settings, &tokens)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Request failed");
            eprintln!("{}: {}", NAME, e);
            ExitCode::FAILURE
        }
    }
}

/// Perform the exchange and print the reply.
async fn run(settings: &Settings, tokens: &[String]) -> ClientResult<()> {
    let responder = RequestResponder::from_settings(settings)?;
    let response = responder.send_and_receive(tokens).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(settings.output.label.as_bytes())?;
    stdout.write_all(response.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// Load the given config file, or the default one if it exists.
fn load_settings(path: Option<&Path>) -> Result<Settings, ClientError> {
    match path {
        Some(p) => Settings::load(p),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                Settings::load(default_path)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

/// Print usage to stderr.
fn print_usage() {
    eprintln!("usage: {} [OPTIONS] [--] token(s)", NAME);
}

/// Print help message.
fn print_help() {
    println!(
        r#"{} {}
Send one line to a host over VSOCK and print the reply.

USAGE:
    {} [OPTIONS] [--] <TOKEN>...

The tokens are sent as one space-separated, newline-terminated line.

OPTIONS:
    -c, --config <PATH>    Path to configuration file
                           [default: {}, if present]
    -h, --help             Print help information
    -V, --version          Print version information
"#,
        NAME, VERSION, NAME, DEFAULT_CONFIG_PATH
    );
}

/// Initialize logging based on settings. Logs go to stderr.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
