use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct FetchCommand {
    pub config_path: Option<String>,
    pub out_path: Option<String>,
    pub access_token: Option<String>,
    pub show_progress: bool,
}

pub struct Args {
    pub command: FetchCommand,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "zenfetch",
    version,
    author,
    about = "Download dataset files from a Zenodo record, unpack them and point the trainer at its checkpoint"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(
        short = 'o',
        long = "out_path",
        visible_alias = "out-path",
        value_name = "DIR",
        help = "Directory to download into (default: output.path from the config file)"
    )]
    out_path: Option<String>,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file layered over the built-in defaults"
    )]
    config: Option<String>,

    #[arg(
        short = 't',
        long = "access-token",
        value_name = "TOKEN",
        help = "Bearer token for restricted records (overrides access_token / ZENFETCH_ACCESS_TOKEN)"
    )]
    access_token: Option<String>,

    #[arg(long = "no-progress", help = "Disables download progress bars")]
    no_progress: bool,
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = FetchCommand {
        config_path: cli.config,
        out_path: cli.out_path,
        access_token: cli.access_token,
        show_progress: !cli.no_progress,
    };

    Args { command, log_level }
}
