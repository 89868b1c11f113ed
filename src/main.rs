mod colors;
mod commands;

use brufile::BrewApi;
use brufile::config::Config;
use brufile::entry::PackageKind;
use brufile::locate::Selection;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brufile")]
#[command(
    author,
    version,
    about = "Add and drop formulae and casks in a Brewfile",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Brewfile location flags
#[derive(Args)]
struct LocationArgs {
    /// Read the Brewfile from ~/.Brewfile (or $HOMEBREW_BUNDLE_FILE_GLOBAL)
    #[arg(short, long, conflicts_with = "file")]
    global: bool,

    /// Read the Brewfile from this location
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
}

impl From<LocationArgs> for Selection {
    fn from(args: LocationArgs) -> Self {
        Selection {
            file: args.file,
            global: args.global,
        }
    }
}

/// Package kind flags
#[derive(Args)]
struct KindArgs {
    /// Treat all named arguments as formulae
    #[arg(long, visible_alias = "formulae", conflicts_with = "cask")]
    formula: bool,

    /// Treat all named arguments as casks
    #[arg(long, visible_alias = "casks")]
    cask: bool,
}

impl KindArgs {
    fn kind(&self) -> Option<PackageKind> {
        match (self.formula, self.cask) {
            (true, _) => Some(PackageKind::Formula),
            (_, true) => Some(PackageKind::Cask),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add formulae and casks to a Brewfile
    ///
    /// Set HOMEBREW_BUNDLE_QUOTE_TYPE=single to write brew 'x' instead of brew "x".
    Add {
        /// Formula or cask names
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        kind: KindArgs,

        /// Add a comment with the package description above each line
        /// (default when HOMEBREW_BUNDLE_DUMP_DESCRIBE is set)
        #[arg(long)]
        describe: bool,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Drop formulae and casks from a Brewfile
    Drop {
        /// Formula or cask names
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        kind: KindArgs,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Open a Brewfile in $HOMEBREW_EDITOR, $VISUAL or $EDITOR
    File {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Display a Brewfile (uses bat if HOMEBREW_BAT is set)
    View {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    colors::init_colors();

    let config = Config::from_env();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Add {
            names,
            kind,
            describe,
            location,
        } => {
            let api = BrewApi::with_base_url(&config.api_base)?;
            let args = commands::AddArgs {
                names,
                kind: kind.kind(),
                describe,
                selection: location.into(),
                quiet,
            };
            commands::add(&api, &config, &args).await?;
        }
        Commands::Drop {
            names,
            kind,
            location,
        } => {
            let api = BrewApi::with_base_url(&config.api_base)?;
            let args = commands::DropArgs {
                names,
                kind: kind.kind(),
                selection: location.into(),
                quiet,
            };
            commands::drop(&api, &config, &args).await?;
        }
        Commands::File { location } => {
            commands::file(&config, &location.into(), quiet)?;
        }
        Commands::View { location } => {
            commands::view(&config, &location.into())?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "brufile", &mut std::io::stdout());
        }
    }

    Ok(())
}
