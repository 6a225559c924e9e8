//! Interactive listing browser driven by stdin.

use std::sync::Arc;

use marquee_core::config::ListingConfig;
use marquee_core::{MarqueeError, Result};
use marquee_search::listing::{ListingHandle, ListingView, spawn_listing_controller};
use marquee_search::{
    ControllerState, InMemorySearchAnalytics, MovieProvider, SearchAnalytics, SortKey,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::render;

const TOP_SEARCHES_LIMIT: usize = 10;

const HELP: &str = "\
Type to search; an empty line shows popular movies.
  :page N     jump to page N
  :next       next page
  :prev       previous page
  :sort KEY   none, year-asc, year-desc, rating-asc, rating-desc, votes-asc, votes-desc
  :more       show more results
  :top        most searched terms
  :help       this help
  :quit       exit";

/// One line of browse input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    Term(String),
    Page(u32),
    Next,
    Prev,
    Sort(SortKey),
    More,
    Top,
    Help,
    Quit,
    Invalid(String),
}

/// Parses a line: `:`-prefixed lines are commands, anything else is raw
/// search input and is passed through untrimmed.
pub fn parse_browse_input(line: &str) -> BrowseInput {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return BrowseInput::Term(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("page" | "p"), Some(page), None) => page
            .parse()
            .map(BrowseInput::Page)
            .unwrap_or_else(|_| BrowseInput::Invalid(format!("Not a page number: {page}"))),
        (Some("next" | "n"), None, None) => BrowseInput::Next,
        (Some("prev"), None, None) => BrowseInput::Prev,
        (Some("sort" | "s"), Some(key), None) => key
            .parse()
            .map(BrowseInput::Sort)
            .unwrap_or_else(BrowseInput::Invalid),
        (Some("more" | "m"), None, None) => BrowseInput::More,
        (Some("top"), None, None) => BrowseInput::Top,
        (Some("help" | "h"), None, None) => BrowseInput::Help,
        (Some("quit" | "q"), None, None) => BrowseInput::Quit,
        _ => BrowseInput::Invalid(format!("Unknown command: :{}", command.trim())),
    }
}

/// Runs the interactive browser until `:quit` or end of input.
///
/// # Errors
/// - `MarqueeError::Io` - Reading stdin failed
/// - `MarqueeError::Search` - The listing controller stopped unexpectedly
pub async fn run_browse(config: ListingConfig, provider: Arc<dyn MovieProvider>) -> Result<()> {
    let step = config.visible_count_step;
    let analytics = Arc::new(InMemorySearchAnalytics::new());
    let handle = spawn_listing_controller(
        config,
        provider,
        Some(analytics.clone() as Arc<dyn SearchAnalytics>),
    );
    let renderer = tokio::spawn(render_updates(handle.subscribe()));

    println!("{HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_browse_input(&line) {
            BrowseInput::Term(term) => handle
                .set_raw_term(term)
                .await
                .map_err(MarqueeError::from_search_error)?,
            BrowseInput::Page(page) => request_page(&handle, page).await?,
            BrowseInput::Next => request_page(&handle, handle.view().current_page + 1).await?,
            BrowseInput::Prev => {
                request_page(&handle, handle.view().current_page.saturating_sub(1)).await?;
            }
            BrowseInput::Sort(key) => handle
                .set_sort_key(key)
                .await
                .map_err(MarqueeError::from_search_error)?,
            BrowseInput::More => handle
                .expand_visible_count(step)
                .await
                .map_err(MarqueeError::from_search_error)?,
            BrowseInput::Top => {
                let entries = analytics
                    .top_searches(TOP_SEARCHES_LIMIT)
                    .await
                    .map_err(MarqueeError::from_search_error)?;
                println!("{}", render::format_top_searches(&entries));
            }
            BrowseInput::Help => println!("{HELP}"),
            BrowseInput::Quit => break,
            BrowseInput::Invalid(message) => eprintln!("{message}"),
        }
    }

    handle
        .shutdown()
        .await
        .map_err(MarqueeError::from_search_error)?;
    let _ = renderer.await;

    Ok(())
}

async fn request_page(handle: &ListingHandle, page: u32) -> Result<()> {
    let issued = handle
        .request_page(page)
        .await
        .map_err(MarqueeError::from_search_error)?;
    if !issued {
        let view = handle.view();
        eprintln!("No page {page}; pages run 1 to {}", view.total_pages);
    }
    Ok(())
}

/// Prints the listing every time the controller publishes a new state.
async fn render_updates(mut state: watch::Receiver<ControllerState>) {
    while state.changed().await.is_ok() {
        let view = ListingView::from_state(&state.borrow_and_update());
        println!("{}\n", render::format_listing(&view));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_are_raw_terms() {
        assert_eq!(
            parse_browse_input("dune\n"),
            BrowseInput::Term("dune".to_string())
        );
        assert_eq!(
            parse_browse_input("  star wars "),
            BrowseInput::Term("  star wars ".to_string())
        );
        assert_eq!(parse_browse_input(""), BrowseInput::Term(String::new()));
    }

    #[test]
    fn test_navigation_commands() {
        assert_eq!(parse_browse_input(":page 3"), BrowseInput::Page(3));
        assert_eq!(parse_browse_input(" :p 12"), BrowseInput::Page(12));
        assert_eq!(parse_browse_input(":next"), BrowseInput::Next);
        assert_eq!(parse_browse_input(":prev"), BrowseInput::Prev);
        assert_eq!(parse_browse_input(":more"), BrowseInput::More);
        assert_eq!(parse_browse_input(":top"), BrowseInput::Top);
        assert_eq!(parse_browse_input(":q"), BrowseInput::Quit);
    }

    #[test]
    fn test_sort_command_accepts_key_spellings() {
        assert_eq!(
            parse_browse_input(":sort year-asc"),
            BrowseInput::Sort(SortKey::YearAsc)
        );
        assert_eq!(
            parse_browse_input(":sort votes_desc"),
            BrowseInput::Sort(SortKey::VoteCountDesc)
        );
        assert!(matches!(
            parse_browse_input(":sort sideways"),
            BrowseInput::Invalid(_)
        ));
    }

    #[test]
    fn test_malformed_commands_are_invalid() {
        assert!(matches!(parse_browse_input(":page x"), BrowseInput::Invalid(_)));
        assert!(matches!(parse_browse_input(":page"), BrowseInput::Invalid(_)));
        assert!(matches!(parse_browse_input(":next 2"), BrowseInput::Invalid(_)));
        assert_eq!(
            parse_browse_input(":jump"),
            BrowseInput::Invalid("Unknown command: :jump".to_string())
        );
    }
}
