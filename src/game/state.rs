use rand::rngs::SmallRng;

use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::street::Street;
use crate::cards::strength::Strength;
use crate::game::action::{Action, Edge, RaiseSize};
use crate::game::payout;
use crate::{Chips, B_BLIND, N, S_BLIND, STACK};

/// seat 0 is the button, seat 1 the small blind, seat 2 the big blind. the
/// button acts first preflop (there is no player left to act "under the
/// gun" in a three-handed game); the small blind acts first on every
/// street after that.
const PREFLOP_ORDER: [usize; N] = [0, 1, 2];
const POSTFLOP_ORDER: [usize; N] = [1, 2, 0];

fn order_for(street: Street) -> [usize; N] {
    match street {
        Street::Pref => PREFLOP_ORDER,
        _ => POSTFLOP_ORDER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Betting,
    Showdown,
    Complete,
}

#[derive(Debug, Clone, Copy)]
pub struct Seat {
    pub stack: Chips,
    pub bet: Chips,
    pub total_in: Chips,
    pub folded: bool,
    pub all_in: bool,
}

impl Seat {
    fn new(stack: Chips) -> Self {
        Self { stack, bet: 0, total_in: 0, folded: false, all_in: false }
    }

    fn commit(&mut self, amount: Chips) {
        let amount = amount.min(self.stack);
        self.stack -= amount;
        self.bet += amount;
        self.total_in += amount;
        if self.stack == 0 {
            self.all_in = true;
        }
    }

    fn active(&self) -> bool {
        !self.folded && !self.all_in
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub seats: [Seat; N],
    pub holes: [Vec<Card>; N],
    pub board: Vec<Card>,
    pub street: Street,
    pub phase: Phase,
    pub to_act: usize,
    pub current_bet: Chips,
    pub min_raise: Chips,
    to_act_remaining: u8,
}

impl GameState {
    /// deals a fresh hand: two hole cards to each seat, a five-card board
    /// held back street by street, and posts blinds.
    pub fn deal(rng: &mut SmallRng) -> Self {
        let mut deck = Deck::new(rng);
        let holes: [Vec<Card>; N] = std::array::from_fn(|_| deck.draw_n(2));
        let board = deck.draw_n(5);

        let mut seats = [Seat::new(STACK), Seat::new(STACK), Seat::new(STACK)];
        seats[1].commit(S_BLIND);
        seats[2].commit(B_BLIND);

        let mut state = Self {
            seats,
            holes,
            board,
            street: Street::Pref,
            phase: Phase::Betting,
            to_act: 0,
            current_bet: B_BLIND,
            min_raise: B_BLIND,
            to_act_remaining: 0,
        };
        state.to_act_remaining = state.active_mask();
        state.to_act = state
            .first_to_act(Street::Pref)
            .expect("three fresh seats can always act preflop");
        state
    }

    fn active_mask(&self) -> u8 {
        let mut mask = 0u8;
        for (i, seat) in self.seats.iter().enumerate() {
            if seat.active() {
                mask |= 1 << i;
            }
        }
        mask
    }

    fn non_folded_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.folded).count()
    }

    fn first_to_act(&self, street: Street) -> Option<usize> {
        order_for(street).into_iter().find(|&i| self.seats[i].active())
    }

    fn next_after(&self, street: Street, current: usize) -> Option<usize> {
        let order = order_for(street);
        let pos = order.iter().position(|&i| i == current).unwrap();
        (1..=N).map(|k| order[(pos + k) % N]).find(|&i| self.seats[i].active())
    }

    /// the cards visible on the board at the current street.
    pub fn visible_board(&self) -> Hand {
        Hand::from(self.board[..self.street.board_len()].to_vec())
    }

    pub fn hole_cards(&self, seat: usize) -> Hand {
        Hand::from(self.holes[seat].clone())
    }

    /// edges legal for the seat on the move, before chip amounts are
    /// resolved. fold is only offered when facing a bet; a raise edge
    /// survives here only if its resolved size (see `to_action`) reaches
    /// the minimum legal raise; all-in is offered whenever the seat has
    /// chips behind beyond what a call would take.
    pub fn legal_edges(&self) -> Vec<Edge> {
        if self.phase != Phase::Betting {
            return Vec::new();
        }
        let seat = &self.seats[self.to_act];
        let facing = self.current_bet - seat.bet;
        let mut edges = Vec::with_capacity(10);

        if facing > 0 {
            edges.push(Edge::Fold);
        }
        edges.push(Edge::CheckCall);

        if seat.stack > facing {
            for size in RaiseSize::ALL {
                if let Action::Raise(amount) = self.to_action(Edge::Raise(size)) {
                    if amount >= self.current_bet + self.min_raise {
                        edges.push(Edge::Raise(size));
                    }
                }
            }
            edges.push(Edge::AllIn);
        }
        edges
    }

    /// resolves an edge to a concrete, stack-capped action for the seat on
    /// the move.
    pub fn to_action(&self, edge: Edge) -> Action {
        let seat = &self.seats[self.to_act];
        let facing = self.current_bet - seat.bet;
        match edge {
            Edge::Fold => Action::Fold,
            Edge::CheckCall => {
                if facing <= 0 {
                    Action::Check
                } else {
                    Action::Call(facing.min(seat.stack))
                }
            }
            Edge::Raise(size) => {
                let pot = self.seats.iter().map(|s| s.total_in).sum();
                let desired = size.raise_to(self.street, pot, self.current_bet);
                let max_to = seat.bet + seat.stack;
                Action::Raise(desired.min(max_to))
            }
            Edge::AllIn => Action::Raise(seat.bet + seat.stack),
        }
    }

    pub fn apply_edge(&self, rng: &mut SmallRng, edge: Edge) -> Self {
        let action = self.to_action(edge);
        self.apply(rng, action)
    }

    /// advances the state by one action, copy-on-write. handles fold
    /// termination, round closure, street advancement (dealing no new
    /// cards beyond what was already held back at `deal`), and showdown.
    pub fn apply(&self, rng: &mut SmallRng, action: Action) -> Self {
        let mut next = self.clone();
        let acting = next.to_act;

        match action {
            Action::Fold => {
                next.seats[acting].folded = true;
                next.to_act_remaining &= !(1 << acting);
            }
            Action::Check => {
                next.to_act_remaining &= !(1 << acting);
            }
            Action::Call(amount) => {
                next.seats[acting].commit(amount);
                next.to_act_remaining &= !(1 << acting);
            }
            Action::Raise(to) => {
                let raise_increment = to - next.current_bet;
                let delta = to - next.seats[acting].bet;
                next.seats[acting].commit(delta);
                // an all-in short raise still reopens action against the new
                // high bet, it just doesn't raise the minimum legal size.
                next.current_bet = next.current_bet.max(next.seats[acting].bet);
                next.min_raise = raise_increment.max(next.min_raise);
                next.to_act_remaining = next.active_mask() & !(1 << acting);
            }
        }

        if next.non_folded_count() == 1 {
            next.phase = Phase::Complete;
            return next;
        }

        if next.to_act_remaining & next.active_mask() == 0 {
            next.advance_street(rng);
        } else if let Some(nxt) = next.next_after(next.street, acting) {
            next.to_act = nxt;
        }
        next
    }

    fn advance_street(&mut self, _rng: &mut SmallRng) {
        for seat in &mut self.seats {
            seat.bet = 0;
        }
        self.current_bet = 0;
        self.min_raise = B_BLIND;

        match self.street.next() {
            Some(next_street) => {
                self.street = next_street;
                self.to_act_remaining = self.active_mask();
                match self.first_to_act(next_street) {
                    Some(seat) => self.to_act = seat,
                    // everyone left is all-in: no more decisions, run the
                    // remaining streets out face up to showdown.
                    None => {
                        if next_street == Street::Rive {
                            self.phase = Phase::Showdown;
                        } else {
                            self.advance_street(_rng);
                        }
                    }
                }
            }
            None => self.phase = Phase::Showdown,
        }
    }

    /// evaluated showdown strength per seat, `None` for folded seats.
    pub fn showdown_strengths(&self) -> [Option<Strength>; N] {
        std::array::from_fn(|i| {
            if self.seats[i].folded {
                None
            } else {
                let hand = self.hole_cards(i).union(&Hand::from(self.board.clone()));
                Some(Strength::of(&hand))
            }
        })
    }

    /// net chip result per seat for the completed hand (payout minus what
    /// they put in), settling side pots if the hand reached showdown. an
    /// uncontested fold never needs a showdown comparison, since `payout`
    /// awards any pot slice with a single eligible contributor outright.
    pub fn settle(&self) -> [Chips; N] {
        let total_in: [Chips; N] = std::array::from_fn(|i| self.seats[i].total_in);
        let folded: [bool; N] = std::array::from_fn(|i| self.seats[i].folded);
        let strengths = if self.non_folded_count() == 1 {
            [None, None, None]
        } else {
            self.showdown_strengths()
        };
        let payouts = payout::settle(&total_in, &folded, &strengths, &POSTFLOP_ORDER);
        std::array::from_fn(|i| payouts[i] - total_in[i])
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Complete | Phase::Showdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn deal_posts_blinds_and_starts_on_the_button() {
        let state = GameState::deal(&mut rng());
        assert_eq!(state.seats[1].bet, S_BLIND);
        assert_eq!(state.seats[2].bet, B_BLIND);
        assert_eq!(state.to_act, 0);
        assert_eq!(state.street, Street::Pref);
    }

    #[test]
    fn button_fold_then_small_blind_fold_ends_hand_uncontested() {
        let mut rng = rng();
        let state = GameState::deal(&mut rng);
        let state = state.apply_edge(&mut rng, Edge::Fold);
        assert_eq!(state.to_act, 1);
        let state = state.apply_edge(&mut rng, Edge::Fold);
        assert_eq!(state.phase, Phase::Complete);
        let result = state.settle();
        assert_eq!(result[2], state.seats[0].total_in + state.seats[1].total_in);
    }

    #[test]
    fn checking_around_advances_the_street() {
        let mut rng = rng();
        let mut state = GameState::deal(&mut rng);
        state = state.apply_edge(&mut rng, Edge::CheckCall); // button calls the big blind
        state = state.apply_edge(&mut rng, Edge::CheckCall); // small blind completes
        state = state.apply_edge(&mut rng, Edge::CheckCall); // big blind checks its option
        assert_eq!(state.street, Street::Flop);
        assert_eq!(state.to_act, 1);
        assert_eq!(state.current_bet, 0);
    }

    #[test]
    fn fold_is_only_legal_when_facing_a_bet() {
        let state = GameState::deal(&mut rng());
        let edges = state.legal_edges();
        assert!(edges.contains(&Edge::Fold));
        assert!(edges.contains(&Edge::CheckCall));

        let checked_through = state.clone();
        let mut rng = rng();
        let after_call = checked_through.apply_edge(&mut rng, Edge::CheckCall);
        let after_complete = after_call.apply_edge(&mut rng, Edge::CheckCall);
        assert!(!after_complete.legal_edges().contains(&Edge::Fold));
    }
}
