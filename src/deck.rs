use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A deck of distinct cards, initially the standard 52.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in a full deck.
    pub const SIZE: usize = 52;

    /// Full deck ordered by suit (H, D, S, C), then rank (2..A).
    ///
    /// ```
    /// use poker_equity::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// assert_eq!(deck.remaining()[0].to_string(), "2H");
    /// assert_eq!(deck.remaining()[51].to_string(), "AC");
    /// ```
    pub fn standard() -> Self {
        let cards =
            Suit::ALL.iter().flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s))).collect();
        Self { cards }
    }

    /// Full deck minus every `claimed` card, in standard order.
    ///
    /// ```
    /// use poker_equity::cards::parse_cards;
    /// use poker_equity::deck::Deck;
    ///
    /// let claimed = parse_cards("AH AS KH KS").unwrap();
    /// let deck = Deck::excluding(&claimed);
    /// assert_eq!(deck.len(), 48);
    /// assert!(!deck.contains(claimed[0]));
    /// ```
    pub fn excluding(claimed: &[Card]) -> Self {
        let mut taken = [false; Self::SIZE];
        for c in claimed {
            taken[c.index()] = true;
        }
        let mut deck = Self::standard();
        deck.cards.retain(|c| !taken[c.index()]);
        deck
    }

    /// Unclaimed cards. Deterministic order unless the deck was shuffled.
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
