use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use outfitter_cli::OutputFormat;
use outfitter_cli::commands;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "outfitter")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Place per-guest gear orders through a live browser session",
    long_about = "Outfitter reads guest sizes from a roster spreadsheet and fills the store's cart \
                  and checkout in a Chrome window you are already logged into. Start Chrome with \
                  `outfitter open`, then run `outfitter order` and type guest names."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (discount code, billing address, product pages)
    #[arg(
        short,
        long,
        global = true,
        env = "OUTFITTER_CONFIG",
        default_value = "secrets.json"
    )]
    config: PathBuf,

    /// Session handoff file written by `open` and read by `order`
    #[arg(
        long,
        global = true,
        env = "OUTFITTER_HANDOFF",
        default_value = "session_info.txt"
    )]
    handoff: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch Chrome on the store and save the session for `order`
    Open {
        /// Path to the Chrome executable
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Named profile under ~/.outfitter/profiles (keeps the store login)
        #[arg(long)]
        profile: Option<String>,

        /// Use a throwaway temporary profile instead
        #[arg(long)]
        temp: bool,

        /// Remote debugging port
        #[arg(long, default_value_t = outfitter_browser::DEFAULT_DEBUGGING_PORT)]
        port: u16,

        /// Start page (defaults to the configured store URL)
        #[arg(long)]
        url: Option<String>,
    },

    /// Attach to the saved session and enter guest orders interactively
    Order {
        /// Roster spreadsheet (.xlsx, .xls, .ods or .csv)
        #[arg(value_name = "ROSTER", env = "OUTFITTER_ROSTER")]
        roster: PathBuf,
    },

    /// Show what each guest in the roster would be ordered
    Roster {
        /// Roster spreadsheet (.xlsx, .xls, .ods or .csv)
        #[arg(value_name = "ROSTER", env = "OUTFITTER_ROSTER")]
        roster: PathBuf,

        /// Only show this guest
        #[arg(long)]
        guest: Option<String>,

        /// Also check that the configuration has a product page for every item
        #[arg(long)]
        check_pages: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:
    bash, zsh, fish, powershell, elvish

INSTALLATION:
    bash:  outfitter completion --shell bash >> ~/.bashrc
    zsh:   outfitter completion --shell zsh > ~/.zfunc/_outfitter
    fish:  outfitter completion --shell fish > ~/.config/fish/completions/outfitter.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Open {
            chrome_path,
            profile,
            temp,
            port,
            url,
        } => commands::open::execute(commands::open::OpenOptions {
            config: cli.config,
            handoff: cli.handoff,
            chrome_path,
            profile,
            temp,
            port,
            url,
        }),
        Commands::Order { roster } => commands::order::execute(&cli.config, &roster, &cli.handoff),
        Commands::Roster {
            roster,
            guest,
            check_pages,
            format,
        } => commands::roster::execute(
            &roster,
            check_pages.then_some(cli.config.as_path()),
            guest.as_deref(),
            format,
        ),
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command(), &mut std::io::stdout())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("outfitter=debug,outfitter_cli=debug,outfitter_core=debug,outfitter_browser=debug")
    } else {
        EnvFilter::new("outfitter=info,outfitter_cli=info,outfitter_browser=warn,outfitter_core=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
