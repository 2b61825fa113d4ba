//! Abstractions for page-number pagination.

use std::fmt;

/// Width of the page-[`Button`] window rendered around the current page.
const WINDOW: usize = 3;

/// Single page of a paginated list.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items of this [`Page`].
    pub items: Vec<I>,

    /// Number of this [`Page`], starting from 1.
    ///
    /// Always clamped to `1..=total_pages` (and to 1 when the list is
    /// empty).
    pub current_page: usize,

    /// Total number of [`Page`]s in the list.
    pub total_pages: usize,

    /// Total number of items in the list (across all [`Page`]s).
    pub total_count: usize,

    /// Number of items per [`Page`].
    pub per_page: usize,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] by slicing the provided `items` according to
    /// the provided [`Arguments`].
    ///
    /// The requested page is clamped into the valid range, so the returned
    /// [`Page`] is never out of bounds.
    #[must_use]
    pub fn new(args: &Arguments, items: Vec<I>) -> Self {
        let total_count = items.len();
        let total_pages = total_pages(total_count, args.per_page);
        let current_page = args.page.clamp(1, total_pages.max(1));

        Self {
            items: items
                .into_iter()
                .skip((current_page - 1) * args.per_page)
                .take(args.per_page)
                .collect(),
            current_page,
            total_pages,
            total_count,
            per_page: args.per_page,
        }
    }

    /// Returns the sequence of page [`Button`]s to render for this [`Page`].
    #[must_use]
    pub fn buttons(&self) -> Vec<Button> {
        buttons(self.total_pages, self.current_page)
    }

    /// Returns the number of the previous page, floor-clamped at 1.
    #[must_use]
    pub fn prev_page(&self) -> usize {
        self.current_page.saturating_sub(1).max(1)
    }

    /// Returns the number of the next page, ceiling-clamped at
    /// [`Page::total_pages`].
    #[must_use]
    pub fn next_page(&self) -> usize {
        (self.current_page + 1).min(self.total_pages.max(1))
    }

    /// Indicates whether this [`Page`] is the first one.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    /// Indicates whether this [`Page`] is the last one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// Returns the total number of pages required to fit `count` items,
/// `per_page` items each.
#[must_use]
pub fn total_pages(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page.max(1))
}

/// Returns the slice of `items` forming the provided `page`
/// (`per_page` items each), clipped to the bounds of `items`.
///
/// A `page` beyond the available range yields an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.max(1).saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Returns the sequence of page [`Button`]s for the provided `total_pages`
/// around the provided `current_page`.
///
/// When `total_pages` exceeds the window width, a 3-wide window is centered
/// near `current_page` and bounded by first-/last-page [`Button`]s with
/// [`Button::Ellipsis`] markers filling the gaps.
#[must_use]
pub fn buttons(total_pages: usize, current_page: usize) -> Vec<Button> {
    if total_pages <= WINDOW {
        return (1..=total_pages).map(Button::Number).collect();
    }

    let start = current_page.saturating_sub(1).max(1);
    let end = (start + WINDOW - 1).min(total_pages);
    // Near the end the window narrows, so shift it left to keep the width.
    let start = if end - start + 1 < WINDOW {
        end.saturating_sub(WINDOW - 1).max(1)
    } else {
        start
    };

    let mut out = Vec::with_capacity(WINDOW + 4);
    if start > 1 {
        out.push(Button::Number(1));
        if start > 2 {
            out.push(Button::Ellipsis);
        }
    }
    out.extend((start..=end).map(Button::Number));
    if end < total_pages {
        if end < total_pages - 1 {
            out.push(Button::Ellipsis);
        }
        out.push(Button::Number(total_pages));
    }
    out
}

/// Single button in a page-[`Button`] sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Button {
    /// Button selecting the page with the contained number.
    Number(usize),

    /// Marker of the pages elided between the window and the first/last
    /// page.
    Ellipsis,
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Ellipsis => write!(f, "..."),
        }
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Number of the requested page, starting from 1.
    pub page: usize,

    /// Number of items per page.
    pub per_page: usize,
}

impl Arguments {
    /// Creates new [`Arguments`] from the optional raw values, falling back
    /// to the first page and the provided `default_per_page`.
    ///
    /// [`None`] is returned if any provided value is not a positive number.
    pub fn new<Num>(
        page: Option<Num>,
        per_page: Option<Num>,
        default_per_page: usize,
    ) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        let page = page.map_or(Some(1), |p| p.try_into().ok())?;
        let per_page =
            per_page.map_or(Some(default_per_page), |p| p.try_into().ok())?;
        (page >= 1 && per_page >= 1).then_some(Self { page, per_page })
    }
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{buttons, paginate, total_pages, Arguments, Button, Page};

    #[test]
    fn paginate_slices_within_bounds() {
        let items = [1, 2, 3, 4, 5];

        assert_eq!(paginate(&items, 1, 2), &[1, 2]);
        assert_eq!(paginate(&items, 2, 2), &[3, 4]);
        assert_eq!(paginate(&items, 3, 2), &[5]);
        let empty: &[i32] = &[];
        assert_eq!(paginate(&items, 4, 2), empty);
    }

    #[test]
    fn paginate_round_trips_without_loss() {
        let items = (0..17).collect::<Vec<_>>();
        for per_page in 1..=items.len() + 1 {
            let rejoined = (1..=total_pages(items.len(), per_page))
                .flat_map(|page| {
                    paginate(&items, page, per_page).iter().copied()
                })
                .collect::<Vec<_>>();
            assert_eq!(rejoined, items, "per_page: {per_page}");
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
    }

    #[test]
    fn few_pages_render_without_ellipsis() {
        for current in 1..=2 {
            assert_eq!(
                buttons(2, current),
                vec![Button::Number(1), Button::Number(2)],
            );
        }
    }

    #[test]
    fn window_is_bounded_by_ellipses() {
        assert_eq!(
            buttons(10, 5),
            vec![
                Button::Number(1),
                Button::Ellipsis,
                Button::Number(4),
                Button::Number(5),
                Button::Number(6),
                Button::Ellipsis,
                Button::Number(10),
            ],
        );
    }

    #[test]
    fn window_keeps_width_near_edges() {
        assert_eq!(
            buttons(10, 1),
            vec![
                Button::Number(1),
                Button::Number(2),
                Button::Number(3),
                Button::Ellipsis,
                Button::Number(10),
            ],
        );
        assert_eq!(
            buttons(10, 10),
            vec![
                Button::Number(1),
                Button::Ellipsis,
                Button::Number(8),
                Button::Number(9),
                Button::Number(10),
            ],
        );
    }

    #[test]
    fn adjacent_edge_skips_ellipsis() {
        // Window `[2, 4]`: both gaps are single steps, no markers.
        assert_eq!(
            buttons(4, 3),
            vec![
                Button::Number(1),
                Button::Number(2),
                Button::Number(3),
                Button::Number(4),
            ],
        );
    }

    #[test]
    fn page_clamps_current_page() {
        let args = Arguments { page: 9, per_page: 2 };
        let page = Page::new(&args, vec!['a', 'b', 'c']);

        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items, vec!['c']);
    }

    #[test]
    fn empty_list_stays_on_first_page() {
        let args = Arguments { page: 3, per_page: 5 };
        let page = Page::new(&args, Vec::<u8>::new());

        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(page.buttons().is_empty());
    }

    #[test]
    fn navigation_is_clamped_at_boundaries() {
        let first = Page::new(
            &Arguments { page: 1, per_page: 1 },
            vec![1, 2, 3],
        );
        assert_eq!(first.prev_page(), 1);
        assert_eq!(first.next_page(), 2);

        let last = Page::new(
            &Arguments { page: 3, per_page: 1 },
            vec![1, 2, 3],
        );
        assert_eq!(last.next_page(), 3);
        assert_eq!(last.prev_page(), 2);
    }

    #[test]
    fn arguments_reject_non_positive_values() {
        assert_eq!(
            Arguments::new(Some(2), None, 5),
            Some(Arguments { page: 2, per_page: 5 }),
        );
        assert_eq!(Arguments::new(Some(0), None, 5), None);
        assert_eq!(Arguments::new(None, Some(-1), 5), None);
        assert_eq!(
            Arguments::new(None::<i32>, None, 5),
            Some(Arguments { page: 1, per_page: 5 }),
        );
    }
}
