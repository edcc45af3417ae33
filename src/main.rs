//! CLI entry point for inked

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inked")]
#[command(version)]
#[command(about = "Markdown insights loader and static site tooling", long_about = None)]
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
    /// List visible articles or their slugs
    List {
        /// Type of content to list (article, slug)
        #[arg(default_value = "article")]
        r#type: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one article by slug
    Show {
        slug: String,

        /// Print the rendered HTML body instead of the raw article
        #[arg(long)]
        html: bool,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// Keep the article out of listings
        #[arg(long)]
        hidden: bool,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
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
    },

    /// Clean the public folder
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inked_rs=debug,inked=debug,info"
    } else {
        "inked_rs=info,inked=info"
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
    let site = inked_rs::Site::new(&base_dir)?;
    tracing::debug!("Content directory: {:?}", site.content_dir);

    match cli.command {
        Commands::List { r#type, json } => {
            inked_rs::commands::list::run(&site, &r#type, json)?;
        }

        Commands::Show { slug, html } => {
            inked_rs::commands::show::run(&site, &slug, html)?;
        }

        Commands::New {
            title,
            slug,
            hidden,
        } => {
            tracing::info!("Creating new article with title: {}", title);
            inked_rs::commands::new::run(&site, &title, slug.as_deref(), hidden)?;
        }

        Commands::Generate { watch } => {
            if watch {
                // Watching an empty site is fine; articles arrive later
                std::fs::create_dir_all(&site.content_dir)?;
            }
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                inked_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            inked_rs::server::start(&site, &ip, port).await?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
