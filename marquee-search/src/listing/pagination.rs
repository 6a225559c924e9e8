//! Page strip layout for the pagination control.

/// One slot of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    /// Elided run of pages
    Gap,
}

/// Computes the page strip around `current` for `total` pages.
///
/// The strip always shows the first and last page plus the neighbours of
/// `current`. A gap stands in for every elided run between them. A single
/// page needs no strip at all.
pub fn page_window(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total - 1);

    let mut slots = vec![PageSlot::Page(1)];
    if start > 2 {
        slots.push(PageSlot::Gap);
    }
    // Empty when current sits next to both ends.
    slots.extend((start..=end).map(PageSlot::Page));
    if end < total - 1 {
        slots.push(PageSlot::Gap);
    }
    slots.push(PageSlot::Page(total));
    slots
}

pub fn has_previous(current: u32) -> bool {
    current > 1
}

pub fn has_next(current: u32, total: u32) -> bool {
    current < total
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::PageSlot::{Gap, Page};
    use super::*;

    #[test]
    fn test_single_page_has_no_strip() {
        assert!(page_window(1, 1).is_empty());
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_short_ranges_list_every_page() {
        assert_eq!(page_window(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(page_window(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(
            page_window(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_gaps_near_the_edges() {
        assert_eq!(page_window(1, 500), vec![Page(1), Page(2), Gap, Page(500)]);
        assert_eq!(
            page_window(2, 10),
            vec![Page(1), Page(2), Page(3), Gap, Page(10)]
        );
        assert_eq!(page_window(10, 10), vec![Page(1), Gap, Page(9), Page(10)]);
        assert_eq!(page_window(5, 5), vec![Page(1), Gap, Page(4), Page(5)]);
        assert_eq!(
            page_window(499, 500),
            vec![Page(1), Gap, Page(498), Page(499), Page(500)]
        );
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(page_window(0, 10), page_window(1, 10));
        assert_eq!(page_window(u32::MAX, 10), page_window(10, 10));
    }

    #[test]
    fn test_gaps_on_both_sides_in_the_middle() {
        assert_eq!(
            page_window(10, 20),
            vec![Page(1), Gap, Page(9), Page(10), Page(11), Gap, Page(20)]
        );
    }

    #[test]
    fn test_neighbour_pages() {
        assert!(!has_previous(1));
        assert!(has_previous(4));
        assert!(!has_next(3, 3));
        assert!(has_next(2, 3));
    }

    proptest! {
        #[test]
        fn test_strip_keeps_ends_and_current(total in 2u32..600, current in 1u32..600) {
            let current = current.min(total);
            let slots = page_window(current, total);

            prop_assert_eq!(slots.first(), Some(&Page(1)));
            prop_assert_eq!(slots.last(), Some(&Page(total)));
            prop_assert!(slots.contains(&Page(current)));
            prop_assert!(!slots.windows(2).any(|pair| matches!(pair, [Gap, Gap])));

            let pages: Vec<u32> = slots
                .iter()
                .filter_map(|slot| match slot {
                    Page(page) => Some(*page),
                    Gap => None,
                })
                .collect();
            prop_assert!(pages.len() <= 5);
            prop_assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
