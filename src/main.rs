//! CLI entry point for folio-render

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_render::{Category, Folio};

#[derive(Parser)]
#[command(name = "folio-render")]
#[command(version)]
#[command(about = "Render markdown content into JSON collections for the website", long_about = None)]
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
    /// Render one category (blog, projects) or all of them
    #[command(alias = "r")]
    Render {
        #[arg(default_value = "all")]
        category: String,

        /// Print the JSON instead of writing the artifact
        #[arg(long)]
        stdout: bool,
    },

    /// Show a category's items in output order
    List {
        category: String,
    },

    /// Delete generated collections
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_render=debug,info"
    } else {
        "folio_render=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Render { category, stdout } => {
            let categories = Category::parse_selection(&category)?;
            let folio = Folio::new(&base_dir)?;
            if stdout {
                for category in categories {
                    let collection = folio.assemble(category)?;
                    println!("{}", collection.to_json()?);
                }
            } else {
                for report in folio.render_categories(&categories)? {
                    println!(
                        "Rendered {} {} items to {}",
                        report.count,
                        report.category,
                        report.output.display()
                    );
                }
            }
        }

        Commands::List { category } => {
            let category: Category = category.parse()?;
            let folio = Folio::new(&base_dir)?;
            folio_render::commands::list::run(&folio, category)?;
        }

        Commands::Clean => {
            let folio = Folio::new(&base_dir)?;
            let removed = folio.clean()?;
            println!("Cleaned {} collection(s)", removed.len());
        }

        Commands::Version => {
            println!("folio-render version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
