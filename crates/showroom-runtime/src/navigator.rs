#![forbid(unsafe_code)]

//! Index management behind every paged, carousel and lightbox widget.
//!
//! - [`Navigator`]: finite-list cursor with wraparound and direction.
//! - [`Lightbox`]: a navigator plus an independent visibility flag.
//! - [`Carousel`]: a navigator advanced by an interval timer.
//! - [`FilteredCollection`]: items filtered by category, with a lightbox over
//!   the visible subsequence.
//!
//! # Invariants
//!
//! 1. When `count > 0`, `index` is always in `0..count`; when `count == 0`,
//!    `index` is 0 and every navigation call is a no-op.
//! 2. `next()` applied `count` times returns to the starting index.
//! 3. `go_to(i)` with `i >= count` is rejected and changes nothing.
//! 4. Changing a collection's filter rebuilds its lightbox from scratch, so
//!    no index into the previous subsequence survives.
//!
//! # Design Notes
//!
//! The carousel's interval timer keeps its phase across manual navigation:
//! a manual `next()` shortly before the timer fires is followed by the timed
//! advance on its original schedule.

use std::fmt;

use web_time::{Duration, Instant};

use crate::host::{Component, Host, TimerId, release_timer};

/// Default carousel advance period.
pub const DEFAULT_AUTO_ADVANCE: Duration = Duration::from_millis(6000);

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Direction of the most recent move, for transition animations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    /// -1, 0 or +1.
    #[must_use]
    pub const fn signum(self) -> i8 {
        match self {
            Self::Backward => -1,
            Self::None => 0,
            Self::Forward => 1,
        }
    }

    fn between(from: usize, to: usize) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Less => Self::Backward,
            std::cmp::Ordering::Equal => Self::None,
            std::cmp::Ordering::Greater => Self::Forward,
        }
    }
}

/// Snapshot of a navigator for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorState {
    pub index: usize,
    pub count: usize,
    pub direction: Direction,
}

/// Finite-list cursor with wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    index: usize,
    count: usize,
    direction: Direction,
}

impl Navigator {
    /// Create a navigator over `count` items at index 0.
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            index: 0,
            count,
            direction: Direction::None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current index, or `None` for an empty list.
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        if self.count == 0 { None } else { Some(self.index) }
    }

    #[must_use]
    pub const fn state(&self) -> NavigatorState {
        NavigatorState {
            index: self.index,
            count: self.count,
            direction: self.direction,
        }
    }

    /// Advance with wraparound.
    pub fn next(&mut self) {
        if self.count == 0 {
            return;
        }
        self.index = (self.index + 1) % self.count;
        self.direction = Direction::Forward;
        tracing::trace!(target: "showroom.navigator", index = self.index, "next");
    }

    /// Retreat with wraparound.
    pub fn previous(&mut self) {
        if self.count == 0 {
            return;
        }
        self.index = (self.index + self.count - 1) % self.count;
        self.direction = Direction::Backward;
        tracing::trace!(target: "showroom.navigator", index = self.index, "previous");
    }

    /// Jump to `index`. Returns `false` (and changes nothing) if out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.count {
            tracing::debug!(
                target: "showroom.navigator",
                index,
                count = self.count,
                "go_to rejected"
            );
            return false;
        }
        self.direction = Direction::between(self.index, index);
        self.index = index;
        true
    }

    /// Replace the item count and start over at index 0.
    pub fn reset(&mut self, count: usize) {
        *self = Self::new(count);
    }
}

// ---------------------------------------------------------------------------
// Lightbox
// ---------------------------------------------------------------------------

/// Navigator with a visibility flag.
///
/// Navigation while closed is ignored; opening selects the requested item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lightbox {
    nav: Navigator,
    open: bool,
}

impl Lightbox {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            nav: Navigator::new(count),
            open: false,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// Open on item `index`. Returns `false` if out of range.
    pub fn open(&mut self, index: usize) -> bool {
        if !self.nav.go_to(index) {
            return false;
        }
        self.open = true;
        tracing::debug!(target: "showroom.navigator", index, "lightbox opened");
        true
    }

    /// Hide the lightbox. The index is kept.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            tracing::debug!(target: "showroom.navigator", "lightbox closed");
        }
    }

    pub fn next(&mut self) {
        if self.open {
            self.nav.next();
        }
    }

    pub fn previous(&mut self) {
        if self.open {
            self.nav.previous();
        }
    }

    /// Index shown while open.
    #[must_use]
    pub const fn shown(&self) -> Option<usize> {
        if self.open { self.nav.current() } else { None }
    }

    /// One-based "n of m" position, while open.
    #[must_use]
    pub fn position_label(&self) -> Option<PositionLabel> {
        self.shown().map(|index| PositionLabel {
            position: index + 1,
            total: self.nav.count(),
        })
    }
}

/// One-based position within the visible items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionLabel {
    pub position: usize,
    pub total: usize,
}

impl fmt::Display for PositionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.position, self.total)
    }
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// Navigator advanced by a recurring timer.
#[derive(Debug, Clone)]
pub struct Carousel {
    nav: Navigator,
    period: Duration,
    timer: Option<TimerId>,
}

impl Carousel {
    #[must_use]
    pub fn new(count: usize, period: Duration) -> Self {
        Self {
            nav: Navigator::new(count),
            period,
            timer: None,
        }
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Pending auto-advance timer, if mounted.
    #[must_use]
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn next(&mut self) {
        self.nav.next();
    }

    pub fn previous(&mut self) {
        self.nav.previous();
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.nav.go_to(index)
    }
}

impl Component for Carousel {
    fn name(&self) -> &'static str {
        "carousel"
    }

    fn mount(&mut self, host: &mut Host, now: Instant) {
        if self.timer.is_none() {
            self.timer = Some(host.timers.schedule_every(self.name(), now, self.period));
        }
    }

    fn on_timer(&mut self, _host: &mut Host, timer: TimerId, _at: Instant) -> bool {
        if self.timer != Some(timer) {
            return false;
        }
        self.nav.next();
        tracing::debug!(
            target: "showroom.navigator",
            index = self.nav.index(),
            "carousel auto-advanced"
        );
        true
    }

    fn dispose(&mut self, host: &mut Host) {
        release_timer(host, &mut self.timer);
    }
}

// ---------------------------------------------------------------------------
// Filtered collection
// ---------------------------------------------------------------------------

/// Items that belong to a category.
pub trait Categorized {
    fn category(&self) -> &str;
}

/// Active category filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Parse a filter label; `"all"` (any case) selects everything.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(label.to_owned())
        }
    }

    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => c == category,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(c) => f.write_str(c),
        }
    }
}

/// Items filtered by category, with a lightbox over the visible ones.
#[derive(Debug, Clone)]
pub struct FilteredCollection<T> {
    items: Vec<T>,
    filter: Filter,
    visible: Vec<usize>,
    lightbox: Lightbox,
}

impl<T: Categorized> FilteredCollection<T> {
    /// Create a collection showing every item.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        let visible: Vec<usize> = (0..items.len()).collect();
        Self {
            lightbox: Lightbox::new(visible.len()),
            items,
            filter: Filter::All,
            visible,
        }
    }

    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for item in &self.items {
            let c = item.category();
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    /// Select a filter: recompute the visible items and reset the lightbox.
    pub fn set_filter(&mut self, filter: Filter) {
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.matches(item.category()))
            .map(|(i, _)| i)
            .collect();
        self.lightbox = Lightbox::new(self.visible.len());
        tracing::debug!(
            target: "showroom.navigator",
            filter = %filter,
            visible = self.visible.len(),
            "filter changed"
        );
        self.filter = filter;
    }

    /// Number of visible items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether no item passes the filter (the view renders an empty state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Original indices of the visible items, in original order.
    #[must_use]
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Visible item at `index` within the visible subsequence.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.visible.get(index).and_then(|&i| self.items.get(i))
    }

    /// Iterate the visible items.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible.iter().filter_map(|&i| self.items.get(i))
    }

    #[must_use]
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    #[must_use]
    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    /// Item shown by the lightbox, while open.
    #[must_use]
    pub fn shown(&self) -> Option<&T> {
        self.lightbox.shown().and_then(|i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Item(&'static str, &'static str);

    impl Categorized for Item {
        fn category(&self) -> &str {
            self.1
        }
    }

    #[test]
    fn next_wraps_after_count_steps() {
        for n in 1..8 {
            let mut nav = Navigator::new(n);
            for _ in 0..n {
                nav.next();
            }
            assert_eq!(nav.index(), 0);
        }
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut nav = Navigator::new(4);
        nav.previous();
        assert_eq!(nav.index(), 3);
        assert_eq!(nav.direction(), Direction::Backward);
    }

    #[test]
    fn empty_navigator_is_inert() {
        let mut nav = Navigator::new(0);
        nav.next();
        nav.previous();
        assert!(!nav.go_to(0));
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.current(), None);
        assert_eq!(nav.direction(), Direction::None);
    }

    #[test]
    fn go_to_sets_direction_and_rejects_out_of_range() {
        let mut nav = Navigator::new(5);
        assert!(nav.go_to(3));
        assert_eq!(nav.direction(), Direction::Forward);
        assert!(nav.go_to(1));
        assert_eq!(nav.direction(), Direction::Backward);
        assert!(nav.go_to(1));
        assert_eq!(nav.direction(), Direction::None);
        assert!(!nav.go_to(5));
        assert_eq!(nav.index(), 1);
    }

    #[test]
    fn lightbox_ignores_navigation_while_closed() {
        let mut lb = Lightbox::new(3);
        lb.next();
        assert_eq!(lb.navigator().index(), 0);
        assert!(lb.open(2));
        lb.next();
        assert_eq!(lb.shown(), Some(0));
        lb.close();
        assert_eq!(lb.shown(), None);
        assert!(!lb.open(3));
        assert!(!lb.is_open());
    }

    #[test]
    fn position_label_is_one_based() {
        let mut lb = Lightbox::new(8);
        assert_eq!(lb.position_label(), None);
        lb.open(2);
        assert_eq!(lb.position_label().map(|l| l.to_string()).as_deref(), Some("3 of 8"));
    }

    #[test]
    fn filter_parse() {
        assert_eq!(Filter::parse("All"), Filter::All);
        assert_eq!(Filter::parse("living"), Filter::Category("living".into()));
    }

    #[test]
    fn filter_change_resets_lightbox() {
        let mut c = FilteredCollection::new(vec![
            Item("a", "living"),
            Item("b", "bedroom"),
            Item("c", "living"),
        ]);
        assert!(c.lightbox_mut().open(2));
        c.set_filter(Filter::parse("living"));
        assert!(!c.lightbox().is_open());
        assert_eq!(c.lightbox().navigator().index(), 0);
        assert_eq!(c.visible_indices(), &[0, 2]);
        assert_eq!(c.get(1).map(|i| i.0), Some("c"));
        assert_eq!(c.categories(), vec!["living", "bedroom"]);
    }

    #[test]
    fn empty_filter_result() {
        let mut c = FilteredCollection::new(vec![Item("a", "living")]);
        c.set_filter(Filter::parse("villa"));
        assert!(c.is_empty());
        assert!(!c.lightbox_mut().open(0));
        assert!(c.shown().is_none());
    }
}
