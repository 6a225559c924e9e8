//! Demo provider implementation for offline development.

use async_trait::async_trait;
use strsim::normalized_levenshtein;

use super::MovieProvider;
use crate::errors::CatalogError;
use crate::types::{MovieDetails, MovieId, MovieSummary, ResultPage, TimeWindow};

/// Items per page, matching the upstream API.
const DEMO_PAGE_SIZE: usize = 20;

/// Minimum title similarity accepted when no title contains the term.
const FUZZY_THRESHOLD: f64 = 0.6;

/// Built-in catalog entry.
struct DemoMovie {
    id: u64,
    title: &'static str,
    year: i32,
    rating: f64,
    votes: u64,
    language: &'static str,
    runtime: u32,
    genres: &'static [&'static str],
}

impl DemoMovie {
    fn summary(&self) -> MovieSummary {
        let mut summary = MovieSummary::new(self.id, self.title)
            .with_year(self.year)
            .with_rating(self.rating)
            .with_vote_count(self.votes);
        summary.original_language = Some(self.language.to_string());
        summary.overview = Some(format!("Demo description for {}", self.title));
        summary
    }

    fn details(&self) -> MovieDetails {
        MovieDetails {
            id: MovieId(self.id),
            title: self.title.to_string(),
            tagline: None,
            overview: Some(format!("Demo description for {}", self.title)),
            release_year: Some(self.year),
            runtime_minutes: Some(self.runtime),
            genres: self.genres.iter().map(|g| g.to_string()).collect(),
            vote_average: Some(self.rating),
            vote_count: Some(self.votes),
            poster_path: None,
            original_language: Some(self.language.to_string()),
        }
    }
}

#[rustfmt::skip]
const CATALOG: &[DemoMovie] = &[
    DemoMovie { id: 438631, title: "Dune", year: 2021, rating: 7.8, votes: 12_400, language: "en", runtime: 155, genres: &["Science Fiction", "Adventure"] },
    DemoMovie { id: 841, title: "Dune", year: 1984, rating: 6.3, votes: 2_900, language: "en", runtime: 137, genres: &["Science Fiction", "Adventure"] },
    DemoMovie { id: 693134, title: "Dune: Part Two", year: 2024, rating: 8.2, votes: 6_100, language: "en", runtime: 166, genres: &["Science Fiction", "Adventure"] },
    DemoMovie { id: 603, title: "The Matrix", year: 1999, rating: 8.2, votes: 26_000, language: "en", runtime: 136, genres: &["Action", "Science Fiction"] },
    DemoMovie { id: 27205, title: "Inception", year: 2010, rating: 8.4, votes: 36_000, language: "en", runtime: 148, genres: &["Action", "Science Fiction"] },
    DemoMovie { id: 157336, title: "Interstellar", year: 2014, rating: 8.4, votes: 35_000, language: "en", runtime: 169, genres: &["Adventure", "Drama"] },
    DemoMovie { id: 155, title: "The Dark Knight", year: 2008, rating: 8.5, votes: 32_000, language: "en", runtime: 152, genres: &["Drama", "Action"] },
    DemoMovie { id: 348, title: "Alien", year: 1979, rating: 8.2, votes: 14_500, language: "en", runtime: 117, genres: &["Horror", "Science Fiction"] },
    DemoMovie { id: 679, title: "Aliens", year: 1986, rating: 7.9, votes: 9_800, language: "en", runtime: 137, genres: &["Action", "Thriller"] },
    DemoMovie { id: 78, title: "Blade Runner", year: 1982, rating: 7.9, votes: 13_900, language: "en", runtime: 117, genres: &["Science Fiction", "Drama"] },
    DemoMovie { id: 335984, title: "Blade Runner 2049", year: 2017, rating: 7.6, votes: 13_700, language: "en", runtime: 164, genres: &["Science Fiction", "Drama"] },
    DemoMovie { id: 129, title: "Spirited Away", year: 2001, rating: 8.5, votes: 16_500, language: "ja", runtime: 125, genres: &["Animation", "Family"] },
    DemoMovie { id: 496243, title: "Parasite", year: 2019, rating: 8.5, votes: 18_300, language: "ko", runtime: 133, genres: &["Comedy", "Thriller"] },
    DemoMovie { id: 680, title: "Pulp Fiction", year: 1994, rating: 8.5, votes: 28_000, language: "en", runtime: 154, genres: &["Thriller", "Crime"] },
    DemoMovie { id: 238, title: "The Godfather", year: 1972, rating: 8.7, votes: 20_500, language: "en", runtime: 175, genres: &["Drama", "Crime"] },
    DemoMovie { id: 550, title: "Fight Club", year: 1999, rating: 8.4, votes: 29_500, language: "en", runtime: 139, genres: &["Drama"] },
    DemoMovie { id: 13, title: "Forrest Gump", year: 1994, rating: 8.5, votes: 27_500, language: "en", runtime: 142, genres: &["Comedy", "Drama", "Romance"] },
    DemoMovie { id: 11, title: "Star Wars", year: 1977, rating: 8.2, votes: 20_800, language: "en", runtime: 121, genres: &["Adventure", "Action"] },
    DemoMovie { id: 105, title: "Back to the Future", year: 1985, rating: 8.3, votes: 19_900, language: "en", runtime: 116, genres: &["Adventure", "Comedy"] },
    DemoMovie { id: 329, title: "Jurassic Park", year: 1993, rating: 7.9, votes: 16_400, language: "en", runtime: 127, genres: &["Adventure", "Science Fiction"] },
    DemoMovie { id: 76341, title: "Mad Max: Fury Road", year: 2015, rating: 7.6, votes: 22_800, language: "en", runtime: 121, genres: &["Action", "Adventure"] },
    DemoMovie { id: 872585, title: "Oppenheimer", year: 2023, rating: 8.1, votes: 9_500, language: "en", runtime: 181, genres: &["Drama", "History"] },
    DemoMovie { id: 346698, title: "Barbie", year: 2023, rating: 7.0, votes: 9_300, language: "en", runtime: 114, genres: &["Comedy", "Adventure"] },
    DemoMovie { id: 545611, title: "Everything Everywhere All at Once", year: 2022, rating: 7.8, votes: 6_400, language: "en", runtime: 140, genres: &["Action", "Adventure"] },
    DemoMovie { id: 569094, title: "Spider-Man: Across the Spider-Verse", year: 2023, rating: 8.4, votes: 6_900, language: "en", runtime: 140, genres: &["Animation", "Action"] },
    DemoMovie { id: 324857, title: "Spider-Man: Into the Spider-Verse", year: 2018, rating: 8.4, votes: 15_000, language: "en", runtime: 117, genres: &["Animation", "Action"] },
    DemoMovie { id: 120, title: "The Lord of the Rings: The Fellowship of the Ring", year: 2001, rating: 8.4, votes: 25_000, language: "en", runtime: 179, genres: &["Adventure", "Fantasy"] },
    DemoMovie { id: 372058, title: "Your Name.", year: 2016, rating: 8.5, votes: 11_300, language: "ja", runtime: 106, genres: &["Animation", "Romance"] },
    DemoMovie { id: 1891, title: "The Empire Strikes Back", year: 1980, rating: 8.4, votes: 17_100, language: "en", runtime: 124, genres: &["Adventure", "Action"] },
    DemoMovie { id: 62, title: "2001: A Space Odyssey", year: 1968, rating: 8.1, votes: 11_500, language: "en", runtime: 149, genres: &["Science Fiction", "Mystery"] },
];

/// Demo provider for offline development and demonstrations.
///
/// Serves a small built-in catalog with the same paging shape as the real
/// API. The discover feed is ordered by vote count as a popularity stand-in;
/// searches match title substrings and fall back to fuzzy title matching.
#[derive(Debug, Default)]
pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        Self
    }

    fn paginate(movies: Vec<MovieSummary>, page: u32) -> ResultPage {
        let total_pages = movies.len().div_ceil(DEMO_PAGE_SIZE).max(1);
        let start = usize::try_from(page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(DEMO_PAGE_SIZE);
        let items = movies
            .into_iter()
            .skip(start)
            .take(DEMO_PAGE_SIZE)
            .collect();
        ResultPage::new(items, u32::try_from(total_pages).ok(), page)
    }

    fn matching(term: &str) -> Vec<MovieSummary> {
        let needle = term.trim().to_lowercase();

        let exact: Vec<MovieSummary> = CATALOG
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .map(DemoMovie::summary)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let mut fuzzy: Vec<(f64, MovieSummary)> = CATALOG
            .iter()
            .map(|movie| {
                (
                    normalized_levenshtein(&movie.title.to_lowercase(), &needle),
                    movie,
                )
            })
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .map(|(score, movie)| (score, movie.summary()))
            .collect();
        fuzzy.sort_by(|a, b| b.0.total_cmp(&a.0));
        fuzzy.into_iter().map(|(_, movie)| movie).collect()
    }
}

#[async_trait]
impl MovieProvider for DemoProvider {
    async fn discover(&self, page: u32) -> Result<ResultPage, CatalogError> {
        let mut movies: Vec<&DemoMovie> = CATALOG.iter().collect();
        movies.sort_by(|a, b| b.votes.cmp(&a.votes));
        Ok(Self::paginate(
            movies.into_iter().map(DemoMovie::summary).collect(),
            page,
        ))
    }

    async fn search(&self, term: &str, page: u32) -> Result<ResultPage, CatalogError> {
        Ok(Self::paginate(Self::matching(term), page))
    }

    async fn trending(&self, window: TimeWindow) -> Result<Vec<MovieSummary>, CatalogError> {
        let mut movies: Vec<&DemoMovie> = CATALOG.iter().collect();
        match window {
            TimeWindow::Day => movies.sort_by(|a, b| b.year.cmp(&a.year)),
            TimeWindow::Week => movies.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
        Ok(movies
            .into_iter()
            .take(10)
            .map(DemoMovie::summary)
            .collect())
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, CatalogError> {
        CATALOG
            .iter()
            .find(|movie| movie.id == id.0)
            .map(DemoMovie::details)
            .ok_or(CatalogError::NotFound { id })
    }
}
