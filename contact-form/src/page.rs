//! Stateless page behaviours that sit around the form.
//!
//! Each of these turns one input (a scroll offset, a click, a location) into
//! the classes or positions the page should show. None of them own anything
//! beyond a flag or two.

use std::collections::HashSet;

/// Scroll offset past which the header switches to its compact style.
pub const HEADER_SCROLL_THRESHOLD: f64 = 60.0;

/// Scroll offset past which the back-to-top button appears.
pub const BACK_TO_TOP_THRESHOLD: f64 = 400.0;

/// Height of the fixed header; anchor targets land just below it.
pub const HEADER_OFFSET: f64 = 80.0;

pub const MENU_OPEN_LABEL: &str = "メニューを開く";
pub const MENU_CLOSE_LABEL: &str = "メニューを閉じる";

// =============================================================================
// Header
// =============================================================================

/// Modifier class on the site header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClass {
    /// Scrolled away from the top.
    Scrolled,
    /// At the top, over a hero image.
    Top,
    /// At the top, opaque header.
    Plain,
}

impl HeaderClass {
    pub fn for_scroll(scroll_y: f64, transparent: bool) -> Self {
        if scroll_y > HEADER_SCROLL_THRESHOLD {
            Self::Scrolled
        } else if transparent {
            Self::Top
        } else {
            Self::Plain
        }
    }

    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Scrolled => Some("site-header--scrolled"),
            Self::Top => Some("site-header--top"),
            Self::Plain => None,
        }
    }
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}

// =============================================================================
// Navigation
// =============================================================================

/// Indices of the nav links pointing at the current page.
///
/// Links are compared against the last segment of `pathname`; an empty
/// segment means `index.html`.
pub fn active_nav_links<'a>(pathname: &str, hrefs: impl IntoIterator<Item = &'a str>) -> Vec<usize> {
    let page = match pathname.rsplit('/').next() {
        Some("") | None => "index.html",
        Some(page) => page,
    };

    hrefs
        .into_iter()
        .enumerate()
        .filter(|(_, href)| *href == page)
        .map(|(index, _)| index)
        .collect()
}

/// Where to scroll for an in-page anchor.
///
/// `target_top` is the target's offset relative to the viewport. Returns
/// `None` when the anchor has no target, in which case the click is left
/// alone.
pub fn anchor_scroll_top(target_top: Option<f64>, scroll_y: f64) -> Option<f64> {
    target_top.map(|top| top + scroll_y - HEADER_OFFSET)
}

/// Open/closed state of the mobile navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Flip the menu and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close on a link click, or a click on the backdrop itself.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether page scrolling should be locked behind the menu.
    pub fn locks_body_scroll(self) -> bool {
        self.open
    }

    /// Accessible label for the toggle button.
    pub fn toggle_label(self) -> &'static str {
        if self.open {
            MENU_CLOSE_LABEL
        } else {
            MENU_OPEN_LABEL
        }
    }
}

// =============================================================================
// Reveal on scroll
// =============================================================================

/// Tracks which elements have been revealed.
///
/// An element is revealed the first time it intersects the viewport and is
/// never hidden again.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: HashSet<String>,
    revealed: HashSet<String>,
}

impl RevealTracker {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            observed: ids.into_iter().map(Into::into).collect(),
            revealed: HashSet::new(),
        }
    }

    /// Report an intersection change. Returns true if this reveals the element.
    pub fn intersect(&mut self, id: &str, intersecting: bool) -> bool {
        if !intersecting || !self.observed.remove(id) {
            return false;
        }
        self.revealed.insert(id.to_string());
        true
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }
}
