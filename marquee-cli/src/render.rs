//! Plain-text rendering for terminal output.

use marquee_search::listing::{ListingView, PageSlot};
use marquee_search::{MovieDetails, MovieSummary, SearchCount};

/// One numbered listing line: title, year, rating and vote count.
pub fn format_movie_line(index: usize, movie: &MovieSummary) -> String {
    let year = movie
        .release_year
        .map_or_else(|| "----".to_string(), |year| year.to_string());
    let rating = movie
        .vote_average
        .map_or_else(|| "N/A".to_string(), |rating| format!("{rating:.1}"));

    let mut line = format!("{index:>3}. {} ({year})  {rating}", movie.title);
    if let Some(votes) = movie.vote_count {
        line.push_str(&format!("  [{votes} votes]"));
    }
    line.push_str(&format!("  #{}", movie.id));
    line
}

/// Pagination strip with the current page in brackets, e.g. `1 … [9] 10 … 20`.
pub fn format_page_strip(slots: &[PageSlot], current: u32) -> String {
    slots
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(page) if *page == current => format!("[{page}]"),
            PageSlot::Page(page) => page.to_string(),
            PageSlot::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_details(details: &MovieDetails) -> String {
    let mut lines = vec![match details.release_year {
        Some(year) => format!("{} ({year})", details.title),
        None => details.title.clone(),
    }];

    if let Some(tagline) = &details.tagline {
        lines.push(format!("\"{tagline}\""));
    }

    let mut facts = Vec::new();
    if let Some(runtime) = details.format_runtime() {
        facts.push(runtime);
    }
    if !details.genres.is_empty() {
        facts.push(details.genres.join(", "));
    }
    if let Some(rating) = details.vote_average {
        let votes = details.vote_count.unwrap_or(0);
        facts.push(format!("{rating:.1}/10 from {votes} votes"));
    }
    if let Some(language) = &details.original_language {
        facts.push(language.to_uppercase());
    }
    if !facts.is_empty() {
        lines.push(facts.join(" | "));
    }

    if let Some(overview) = &details.overview {
        lines.push(String::new());
        lines.push(overview.clone());
    }

    lines.join("\n")
}

/// Full browse screen for one published listing state.
pub fn format_listing(view: &ListingView) -> String {
    if view.loading {
        return if view.term.trim().is_empty() {
            "Loading popular movies...".to_string()
        } else {
            format!("Searching for '{}'...", view.term)
        };
    }

    if let Some(error) = &view.error {
        return error.clone();
    }

    if view.items.is_empty() {
        return "No movies found".to_string();
    }

    let mut lines: Vec<String> = view
        .items
        .iter()
        .enumerate()
        .map(|(index, movie)| format_movie_line(index + 1, movie))
        .collect();

    if view.hidden_count > 0 {
        lines.push(format!("    ... {} more (:more)", view.hidden_count));
    }

    let strip = format_page_strip(&view.page_slots, view.current_page);
    let mut footer = format!(
        "Page {} of {}  sort: {}",
        view.current_page, view.total_pages, view.sort_key
    );
    if !strip.is_empty() {
        footer = format!("{strip}\n{footer}");
    }
    lines.push(String::new());
    lines.push(footer);

    lines.join("\n")
}

pub fn format_top_searches(entries: &[SearchCount]) -> String {
    if entries.is_empty() {
        return "No searches recorded yet".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "{:>3}. {} ({} searches, top result #{})",
                index + 1,
                entry.term,
                entry.count,
                entry.movie_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use marquee_search::listing::page_window;
    use marquee_search::{MovieId, SortKey};

    use super::*;

    #[test]
    fn test_movie_line_with_all_fields() {
        let movie = MovieSummary::new(438631, "Dune")
            .with_year(2021)
            .with_rating(7.84)
            .with_vote_count(12400);
        assert_eq!(
            format_movie_line(1, &movie),
            "  1. Dune (2021)  7.8  [12400 votes]  #438631"
        );
    }

    #[test]
    fn test_movie_line_with_missing_fields() {
        let movie = MovieSummary::new(7, "Untitled");
        assert_eq!(format_movie_line(12, &movie), " 12. Untitled (----)  N/A  #7");
    }

    #[test]
    fn test_page_strip_marks_current_page() {
        assert_eq!(
            format_page_strip(&page_window(10, 20), 10),
            "1 … 9 [10] 11 … 20"
        );
        assert_eq!(format_page_strip(&page_window(1, 1), 1), "");
    }

    #[test]
    fn test_details_block() {
        let details = MovieDetails {
            id: MovieId(693134),
            title: "Dune: Part Two".to_string(),
            tagline: Some("Long live the fighters.".to_string()),
            overview: Some("Paul Atreides unites with the Fremen.".to_string()),
            release_year: Some(2024),
            runtime_minutes: Some(166),
            genres: vec!["Science Fiction".to_string(), "Adventure".to_string()],
            vote_average: Some(8.2),
            vote_count: Some(6100),
            poster_path: None,
            original_language: Some("en".to_string()),
        };

        let rendered = format_details(&details);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Dune: Part Two (2024)");
        assert_eq!(lines[1], "\"Long live the fighters.\"");
        assert_eq!(
            lines[2],
            "2h 46m | Science Fiction, Adventure | 8.2/10 from 6100 votes | EN"
        );
        assert_eq!(lines[4], "Paul Atreides unites with the Fremen.");
    }

    const FAILED: &str = "Error fetching movies. Please try again later...";

    fn view(loading: bool, error: Option<&str>, items: Vec<MovieSummary>) -> ListingView {
        ListingView {
            term: "dune".to_string(),
            items,
            hidden_count: 0,
            sort_key: SortKey::None,
            current_page: 1,
            total_pages: 1,
            page_slots: Vec::new(),
            has_previous: false,
            has_next: false,
            loading,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_listing_states() {
        assert_eq!(
            format_listing(&view(true, None, Vec::new())),
            "Searching for 'dune'..."
        );
        assert_eq!(
            format_listing(&view(false, Some(FAILED), Vec::new())),
            FAILED
        );
        assert_eq!(format_listing(&view(false, None, Vec::new())), "No movies found");

        let rendered = format_listing(&view(false, None, vec![MovieSummary::new(1, "Dune")]));
        assert!(rendered.starts_with("  1. Dune (----)"));
        assert!(rendered.ends_with("Page 1 of 1  sort: none"));
    }

    #[test]
    fn test_top_searches() {
        assert_eq!(format_top_searches(&[]), "No searches recorded yet");
        let entry = SearchCount {
            term: "dune".to_string(),
            count: 3,
            movie_id: MovieId(438631),
            poster_url: None,
            release_year: Some(2021),
            vote_average: Some(7.8),
        };
        assert_eq!(
            format_top_searches(&[entry]),
            "  1. dune (3 searches, top result #438631)"
        );
    }
}
