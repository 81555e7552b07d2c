#![forbid(unsafe_code)]

//! Product-detail selection state: color, image, quantity, liked.

use crate::navigator::{Navigator, NavigatorState};

/// Selection state for one product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    colors: Vec<String>,
    color: usize,
    images: Navigator,
    quantity: u32,
    liked: bool,
}

impl ProductDetail {
    /// First color, first image, quantity 1, not liked.
    #[must_use]
    pub fn new(colors: Vec<String>, image_count: usize) -> Self {
        Self {
            colors,
            color: 0,
            images: Navigator::new(image_count),
            quantity: 1,
            liked: false,
        }
    }

    /// Selected color, if the product has any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.colors.get(self.color).map(String::as_str)
    }

    #[must_use]
    pub fn color_index(&self) -> usize {
        self.color
    }

    /// Select a color by index. Out-of-range requests are ignored.
    pub fn select_color(&mut self, index: usize) -> bool {
        if index >= self.colors.len() {
            return false;
        }
        self.color = index;
        true
    }

    #[must_use]
    pub fn image(&self) -> NavigatorState {
        self.images.state()
    }

    /// Select a thumbnail.
    pub fn select_image(&mut self, index: usize) -> bool {
        self.images.go_to(index)
    }

    pub fn next_image(&mut self) {
        self.images.next();
    }

    pub fn previous_image(&mut self) {
        self.images.previous();
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Decrease the quantity, never below 1.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    #[must_use]
    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        self.liked
    }
}
