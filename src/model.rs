// Artwork records and the carousel that walks through them.

use serde::Deserialize;
use std::rc::Rc;
use yew::Reducible;

use crate::error::CatalogueError;

const CATALOGUE_JSON: &str = include_str!("../assets/artworks.json");

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Artwork {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub image: String,
    pub description: String,
    /// Optional route to an interactive experience for this piece.
    #[serde(default)]
    pub link: Option<String>,
}

/// Parse a catalogue. Insertion order is display order.
pub fn parse_catalogue(raw: &str) -> Result<Vec<Artwork>, CatalogueError> {
    let items: Vec<Artwork> = serde_json::from_str(raw)?;
    if items.is_empty() {
        return Err(CatalogueError::Empty);
    }
    Ok(items)
}

/// The catalogue bundled with the site.
pub fn load_catalogue() -> Result<Vec<Artwork>, CatalogueError> {
    parse_catalogue(CATALOGUE_JSON)
}

// ---------------- Carousel -----------------

#[derive(Clone, Debug, PartialEq)]
pub struct Carousel {
    /// Fixed at construction; never empty.
    pub items: Rc<Vec<Artwork>>,
    pub current: usize,
    /// Minimum horizontal travel (px) for a swipe to navigate.
    pub swipe_threshold: f64,
    /// Horizontal start of an in-progress swipe.
    pub swipe_start: Option<f64>,
}

impl Carousel {
    pub fn new(items: Vec<Artwork>, swipe_threshold: f64) -> Self {
        debug_assert!(!items.is_empty(), "carousel needs at least one item");
        Self {
            items: Rc::new(items),
            current: 0,
            swipe_threshold,
            swipe_start: None,
        }
    }

    pub fn current_item(&self) -> &Artwork {
        &self.items[self.current]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.len();
    }

    pub fn prev(&mut self) {
        self.current = (self.current + self.len() - 1) % self.len();
    }

    /// Jump to `index`. Callers only offer indices from the thumbnail list.
    pub fn select(&mut self, index: usize) {
        debug_assert!(index < self.len(), "carousel index {} out of range", index);
        self.current = index;
    }

    pub fn swipe_start(&mut self, x: f64) {
        self.swipe_start = Some(x);
    }

    /// Leftward swipe goes forward, rightward goes back, short ones do nothing.
    pub fn swipe_end(&mut self, x: f64) {
        let Some(start) = self.swipe_start.take() else {
            return;
        };
        let diff = x - start;
        if diff < -self.swipe_threshold {
            self.next();
        } else if diff > self.swipe_threshold {
            self.prev();
        }
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum CarouselAction {
    Next,
    Prev,
    Select(usize),
    SwipeStart { x: f64 },
    SwipeEnd { x: f64 },
}

impl Reducible for Carousel {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use CarouselAction::*;
        let mut new = (*self).clone();
        match action {
            Next => new.next(),
            Prev => new.prev(),
            Select(index) => new.select(index),
            SwipeStart { x } => new.swipe_start(x),
            SwipeEnd { x } => new.swipe_end(x),
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}
