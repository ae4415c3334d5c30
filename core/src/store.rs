use aippt_protocol::{Deck, Slide};

/// Holds the most recent deck and the index of the slide on screen.
///
/// The cursor only moves in unit steps and never leaves `0..slides.len()`.
#[derive(Debug, Default, Clone)]
pub struct PresentationStore {
    deck: Option<Deck>,
    cursor: usize,
}

impl PresentationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever deck was held and rewind to the first slide.
    pub fn load(&mut self, deck: Deck) {
        self.deck = Some(deck);
        self.cursor = 0;
    }

    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Slide> {
        self.deck.as_ref()?.slides.get(self.cursor)
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.deck.is_some()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.deck.as_ref().map_or(0, |d| d.slides.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.len()
    }

    pub fn has_prev(&self) -> bool {
        self.cursor > 0
    }

    /// One-based position and total, as shown in the "N / M" label.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor + 1, self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Deck {
        Deck {
            title: "Deck".into(),
            description: "desc".into(),
            slides: (1..=n)
                .map(|i| Slide { title: format!("S{i}"), content: format!("body {i}") })
                .collect(),
        }
    }

    #[test]
    fn empty_store_has_nothing_to_show() {
        let mut store = PresentationStore::new();
        assert!(store.current().is_none());
        assert!(!store.next());
        assert!(!store.prev());
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn next_stops_at_last_slide() {
        let mut store = PresentationStore::new();
        store.load(deck(3));
        assert!(store.next());
        assert!(store.next());
        assert_eq!(store.cursor(), 2);
        assert!(!store.has_next());
        assert!(!store.next());
        assert_eq!(store.cursor(), 2);
        assert_eq!(store.current().map(|s| s.title.as_str()), Some("S3"));
    }

    #[test]
    fn prev_stops_at_first_slide() {
        let mut store = PresentationStore::new();
        store.load(deck(3));
        assert!(!store.has_prev());
        assert!(!store.prev());
        assert_eq!(store.cursor(), 0);
        store.next();
        assert!(store.prev());
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn load_resets_cursor() {
        let mut store = PresentationStore::new();
        store.load(deck(4));
        store.next();
        store.next();
        store.load(deck(2));
        assert_eq!(store.cursor(), 0);
        assert_eq!(store.position(), (1, 2));
        assert_eq!(store.current().map(|s| s.title.as_str()), Some("S1"));
    }

    #[test]
    fn single_slide_deck_disables_both_directions() {
        let mut store = PresentationStore::new();
        store.load(deck(1));
        assert!(!store.has_next());
        assert!(!store.has_prev());
        assert_eq!(store.position(), (1, 1));
    }
}
