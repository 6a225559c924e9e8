//! CLI command implementations

use std::sync::Arc;

use clap::Subcommand;
use marquee_core::config::MarqueeConfig;
use marquee_core::{MarqueeError, Result};
use marquee_search::listing::{page_window, project};
use marquee_search::{
    CatalogError, DemoProvider, MovieId, MovieProvider, ResultPage, SortKey, TimeWindow,
    TmdbProvider,
};

use crate::{browse, render};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search movies by title
    Search {
        /// Title to search for
        term: String,
        /// Result page to fetch
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Client-side ordering (none, year-asc, rating-desc, ...)
        #[arg(short, long, default_value = "none")]
        sort: SortKey,
        /// Maximum number of movies to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List popular movies
    Discover {
        /// Result page to fetch
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Client-side ordering (none, year-asc, rating-desc, ...)
        #[arg(short, long, default_value = "none")]
        sort: SortKey,
        /// Maximum number of movies to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show trending movies
    Trending {
        /// Trending window (day or week)
        #[arg(short, long, default_value = "week")]
        window: TimeWindow,
    },
    /// Show the full record of one movie
    Details {
        /// TMDB movie identifier
        id: u64,
    },
    /// Browse interactively: type to search, `:help` for commands
    Browse,
}

/// Handle the CLI command
///
/// # Errors
/// - `MarqueeError::Configuration` - Invalid configuration or missing API token
/// - `MarqueeError::Search` - The catalog request failed
/// - `MarqueeError::Io` - Reading interactive input failed
pub async fn handle_command(command: Commands, demo: bool) -> Result<()> {
    let config = MarqueeConfig::from_env();
    config.validate()?;
    let provider = build_provider(&config, demo)?;

    match command {
        Commands::Search {
            term,
            page,
            sort,
            limit,
        } => search_movies(provider.as_ref(), &term, page, sort, limit).await,
        Commands::Discover { page, sort, limit } => {
            discover_movies(provider.as_ref(), page, sort, limit).await
        }
        Commands::Trending { window } => show_trending(provider.as_ref(), window).await,
        Commands::Details { id } => show_details(provider.as_ref(), MovieId(id)).await,
        Commands::Browse => browse::run_browse(config.listing, provider).await,
    }
}

fn build_provider(config: &MarqueeConfig, demo: bool) -> Result<Arc<dyn MovieProvider>> {
    if demo {
        tracing::info!("Using built-in demo catalog");
        return Ok(Arc::new(DemoProvider::new()));
    }

    match TmdbProvider::from_config(&config.api) {
        Ok(provider) => Ok(Arc::new(provider)),
        Err(CatalogError::MissingCredential) => Err(MarqueeError::Configuration {
            reason: "set MARQUEE_TMDB_TOKEN or TMDB_API_KEY, or pass --demo".to_string(),
        }),
        Err(e) => Err(MarqueeError::from_search_error(e)),
    }
}

/// Search movies by title and print one page
///
/// # Errors
/// - `MarqueeError::Search` - The catalog request failed
pub async fn search_movies(
    provider: &dyn MovieProvider,
    term: &str,
    page: u32,
    sort: SortKey,
    limit: Option<usize>,
) -> Result<()> {
    let result = provider
        .search(term, page.max(1))
        .await
        .map_err(MarqueeError::from_search_error)?;

    if result.is_empty() {
        println!("No movies found for '{term}'");
        return Ok(());
    }

    println!("Results for '{term}':");
    print_page(&result, sort, limit);
    Ok(())
}

/// Print one page of the discover feed
///
/// # Errors
/// - `MarqueeError::Search` - The catalog request failed
pub async fn discover_movies(
    provider: &dyn MovieProvider,
    page: u32,
    sort: SortKey,
    limit: Option<usize>,
) -> Result<()> {
    let result = provider
        .discover(page.max(1))
        .await
        .map_err(MarqueeError::from_search_error)?;

    println!("Popular movies:");
    print_page(&result, sort, limit);
    Ok(())
}

/// Print the trending movies
///
/// # Errors
/// - `MarqueeError::Search` - The catalog request failed
pub async fn show_trending(provider: &dyn MovieProvider, window: TimeWindow) -> Result<()> {
    let movies = provider
        .trending(window)
        .await
        .map_err(MarqueeError::from_search_error)?;

    match window {
        TimeWindow::Day => println!("Trending today:"),
        TimeWindow::Week => println!("Trending this week:"),
    }
    for (index, movie) in movies.iter().enumerate() {
        println!("{}", render::format_movie_line(index + 1, movie));
    }
    Ok(())
}

/// Print the full record of one movie
///
/// # Errors
/// - `MarqueeError::Search` - Movie not found or the catalog request failed
pub async fn show_details(provider: &dyn MovieProvider, id: MovieId) -> Result<()> {
    let details = provider
        .movie_details(id)
        .await
        .map_err(MarqueeError::from_search_error)?;

    println!("{}", render::format_details(&details));
    Ok(())
}

fn print_page(page: &ResultPage, sort: SortKey, limit: Option<usize>) {
    let visible = limit.unwrap_or(page.items().len());
    for (index, movie) in project(page.items(), sort, visible).into_iter().enumerate() {
        println!("{}", render::format_movie_line(index + 1, movie));
    }

    let current = page.requested_page();
    let strip = render::format_page_strip(&page_window(current, page.total_pages()), current);
    if !strip.is_empty() {
        println!("\n{strip}");
    }
}
