use rand::seq::SliceRandom;
use rand::rngs::SmallRng;

use super::card::Card;

/// the 52-card deck, shuffled once and drawn from the top. traversal-local:
/// callers seed a fresh `Deck` per MCCFR traversal from that traversal's
/// `SmallRng` so dealt hole cards and boards are reproducible given a seed.
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(rng: &mut SmallRng) -> Self {
        let mut cards: Vec<Card> = (0..52u8).map(Card::from).collect();
        cards.shuffle(rng);
        Self { cards }
    }

    /// a fresh, shuffled deck with `excluded` cards removed before the
    /// shuffle, so known cards (other players' holes, the board so far)
    /// are never redealt.
    pub fn excluding(rng: &mut SmallRng, excluded: &[Card]) -> Self {
        let mut cards: Vec<Card> = (0..52u8)
            .map(Card::from)
            .filter(|c| !excluded.contains(c))
            .collect();
        cards.shuffle(rng);
        Self { cards }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn draws_are_disjoint_and_exhaustive() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::new(&mut rng);
        let mut seen = std::collections::HashSet::new();
        while let Some(c) = deck.draw() {
            assert!(seen.insert(c.to_int()));
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn excluding_never_redeals_known_cards() {
        let mut rng = SmallRng::seed_from_u64(1);
        let known = vec![Card::from(0u8), Card::from(1u8)];
        let mut deck = Deck::excluding(&mut rng, &known);
        assert_eq!(deck.remaining(), 50);
        while let Some(c) = deck.draw() {
            assert!(!known.contains(&c));
        }
    }
}
