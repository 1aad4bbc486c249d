//! CLI entry point for advent-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "advent-rs")]
#[command(version)]
#[command(about = "A date-gated advent calendar blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new calendar site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create the article for a day
    New {
        /// Day number (1-24)
        day: String,

        /// Title of the new article
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List every day and whether it is open
    List {
        /// Pretend today is this day of the month
        #[arg(long)]
        today: Option<u32>,
    },

    /// Resolve one day the way the server would
    Show {
        /// Day as it would appear in the URL
        day: String,

        /// Pretend today is this day of the month
        #[arg(long)]
        today: Option<u32>,

        /// Print the render mode as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate static files for the days open today
    #[command(alias = "g")]
    Generate {
        /// Pretend today is this day of the month
        #[arg(long)]
        today: Option<u32>,

        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,

        /// Pretend today is this day of the month
        #[arg(long)]
        today: Option<u32>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "advent_rs=debug,info"
    } else {
        "advent_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            advent_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized advent calendar in {:?}", target_dir);
        }

        Commands::New { day, title } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            let path = advent_rs::commands::new::create_post(&advent, &day, title.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List { today } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            advent_rs::commands::list::run(&advent, today)?;
        }

        Commands::Show { day, today, json } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            advent_rs::commands::show::run(&advent, &day, today, json).await?;
        }

        Commands::Generate { today, watch } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            tracing::info!("Generating static files...");
            let written = advent.generate(today).await?;
            println!("Generated {} article(s)!", written);

            if watch {
                advent_rs::commands::generate::watch(&advent, today).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
            today,
        } => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            advent_rs::server::start(&advent, today, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let advent = advent_rs::Advent::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            advent.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("advent-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
