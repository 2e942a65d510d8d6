//! CitizenLab - terminal front-end

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use citizenlab::{
    app::App,
    config::Config,
    models::MenuItem,
    screens::{documents::DownloadOutcome, EventTab, LoadTrigger, Render},
    theme::ColorScheme,
};

#[derive(Parser, Debug)]
#[command(name = "citizenlab", version, about = "CitizenLab community content client")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "config.yml")]
    config: PathBuf,
    /// Use the dark colour scheme
    #[arg(long, global = true)]
    dark: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Home page sections
    Home,
    /// Header menu
    Menu,
    /// All news
    News {
        #[arg(long)]
        search: Option<String>,
    },
    /// A single article by URI
    Article { uri: String },
    /// Events
    Events {
        /// Show past events instead of upcoming ones
        #[arg(long)]
        past: bool,
    },
    /// A single event
    Event {
        id: i64,
        /// Open the event location or meeting link
        #[arg(long)]
        open: bool,
    },
    /// Team members
    Team,
    /// Projects
    Projects {
        #[arg(long)]
        search: Option<String>,
    },
    /// Podcast episodes
    Podcasts {
        #[arg(long)]
        search: Option<String>,
    },
    /// Document catalogue
    Documents {
        /// Category chip, e.g. "Rapports"
        #[arg(long)]
        category: Option<String>,
    },
    /// Download and share a document
    Download { id: String },
}

fn print_menu(items: &[MenuItem], depth: usize) {
    for item in items {
        println!("{}{}  {}", "  ".repeat(depth), item.text, item.href);
        print_menu(item.children(), depth + 1);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_with_env(&cli.config)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting CitizenLab client {}", env!("CARGO_PKG_VERSION"));

    let app = App::new(config)?;
    if cli.dark {
        app.theme.set(ColorScheme::Dark);
    }
    let palette = app.theme.palette();

    match cli.command {
        Command::Home => {
            let mut screen = app.home();
            screen.load(LoadTrigger::Mount).await;
            print!("{}", screen.render(palette));
        }
        Command::Menu => {
            print_menu(&app.content.nav_menu().await, 0);
        }
        Command::News { search } => {
            let mut screen = app.news();
            screen.load(LoadTrigger::Mount).await;
            if let Some(query) = search {
                screen.set_query(query);
            }
            print!("{}", screen.render(palette));
        }
        Command::Article { uri } => {
            let mut screen = app.news_detail(&uri);
            screen.load().await;
            print!("{}", screen.render(palette));
        }
        Command::Events { past } => {
            let mut screen = app.events();
            screen.load(LoadTrigger::Mount).await;
            if past {
                screen.select_tab(EventTab::Past);
            }
            print!("{}", screen.render(palette));
        }
        Command::Event { id, open } => {
            let mut screen = app.event_detail(id);
            screen.load().await;
            print!("{}", screen.render(palette));
            if open && !screen.open(app.links.as_ref())? {
                println!("Aucun lieu ni lien pour cet événement.");
            }
        }
        Command::Team => {
            let mut screen = app.team();
            screen.load(LoadTrigger::Mount).await;
            print!("{}", screen.render(palette));
        }
        Command::Projects { search } => {
            let mut screen = app.projects();
            screen.load(LoadTrigger::Mount).await;
            if let Some(query) = search {
                screen.set_query(query);
            }
            print!("{}", screen.render(palette));
        }
        Command::Podcasts { search } => {
            let mut screen = app.podcasts()?;
            screen.load(LoadTrigger::Mount).await;
            if let Some(query) = search {
                screen.set_query(query);
            }
            print!("{}", screen.render(palette));
        }
        Command::Documents { category } => {
            let mut screen = app.documents();
            if let Some(category) = category {
                screen.select_chip(&category)?;
            }
            print!("{}", screen.render(palette));
        }
        Command::Download { id } => match app.documents().download(&id).await {
            DownloadOutcome::Shared(path) | DownloadOutcome::Saved(path) => {
                tracing::info!("Document {} saved to {}", id, path.display());
            }
            DownloadOutcome::NotFound => anyhow::bail!("Unknown document: {}", id),
            DownloadOutcome::InFlight | DownloadOutcome::Failed => std::process::exit(1),
        },
    }

    Ok(())
}
