//! literal three-handed hand scenarios, run end to end through the public
//! `GameState` surface rather than unit-testing individual methods.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::action::Edge;
use super::state::{GameState, Phase};
use crate::cards::card::Card;
use crate::cards::rank::Rank::*;
use crate::cards::suit::Suit::*;
use crate::{B_BLIND, S_BLIND, STACK};

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(11)
}

#[test]
fn button_and_small_blind_fold_awards_the_pot_to_the_big_blind() {
    let mut rng = rng();
    let state = GameState::deal(&mut rng);
    let state = state.apply_edge(&mut rng, Edge::Fold);
    let state = state.apply_edge(&mut rng, Edge::Fold);
    assert_eq!(state.phase, Phase::Complete);

    let payoffs = state.settle();
    assert_eq!(payoffs, [0, -S_BLIND, S_BLIND]);
}

#[test]
fn raising_to_three_big_blinds_and_folding_through_is_a_walk() {
    let mut rng = rng();
    let state = GameState::deal(&mut rng);

    let raise_to_three_bb = 3 * B_BLIND;
    let size = super::action::RaiseSize::ALL
        .into_iter()
        .find(|&r| r.raise_to(state.street, 0, state.current_bet) == raise_to_three_bb)
        .expect("one preflop raise size lands on exactly 3 big blinds");

    let state = state.apply_edge(&mut rng, Edge::Raise(size));
    let state = state.apply_edge(&mut rng, Edge::Fold);
    let state = state.apply_edge(&mut rng, Edge::Fold);
    assert_eq!(state.phase, Phase::Complete);

    let payoffs = state.settle();
    assert_eq!(payoffs, [3 * S_BLIND, -S_BLIND, -B_BLIND]);
}

#[test]
fn three_way_all_in_preflop_tie_between_button_and_small_blind() {
    let mut rng = rng();
    let mut state = GameState::deal(&mut rng);
    // both the button and the small blind hold an ace, so their best
    // five-card hand (ace, king-or-queen kicker ties on the board's
    // shared cards) is engineered to be identical instead.
    state.board = vec![
        Card::new(Two, Club),
        Card::new(Three, Diamond),
        Card::new(Four, Heart),
        Card::new(Five, Spade),
        Card::new(Seven, Club),
    ];
    state.holes = [
        vec![Card::new(Ace, Heart), Card::new(King, Diamond)],
        vec![Card::new(Ace, Club), Card::new(King, Spade)],
        vec![Card::new(Jack, Heart), Card::new(Ten, Club)],
    ];

    let state = state.apply_edge(&mut rng, Edge::AllIn);
    let state = state.apply_edge(&mut rng, Edge::AllIn);
    let state = state.apply_edge(&mut rng, Edge::AllIn);
    assert_eq!(state.phase, Phase::Showdown);

    let payoffs = state.settle();
    assert_eq!(payoffs, [10 * B_BLIND, 10 * B_BLIND, -20 * B_BLIND]);
}

#[test]
fn side_pot_goes_to_the_short_stack_while_the_deep_stacks_fight_for_the_rest() {
    let mut rng = rng();
    let mut state = GameState::deal(&mut rng);
    // the big blind bought in for only 5 BB; its entire stack (minus the
    // blind it already posted) is what is left to call or shove.
    state.seats[2].stack = 5 * B_BLIND - B_BLIND;
    // unpaired-high-card board, no straight draw live: best hand is
    // decided purely by each seat's two hole cards. big blind has the
    // best hand overall (ace-king), the button beats the small blind for
    // the rest (ace-queen over jack-ten).
    state.board = vec![
        Card::new(Two, Club),
        Card::new(Three, Diamond),
        Card::new(Four, Heart),
        Card::new(Five, Spade),
        Card::new(Seven, Club),
    ];
    state.holes = [
        vec![Card::new(Ace, Club), Card::new(Queen, Diamond)],
        vec![Card::new(Jack, Heart), Card::new(Ten, Club)],
        vec![Card::new(Ace, Heart), Card::new(King, Diamond)],
    ];

    let state = state.apply_edge(&mut rng, Edge::AllIn); // button shoves 20 BB
    let state = state.apply_edge(&mut rng, Edge::AllIn); // small blind shoves 20 BB
    let state = state.apply_edge(&mut rng, Edge::CheckCall); // big blind calls all-in for less
    assert_eq!(state.phase, Phase::Showdown);
    assert_eq!(state.seats[0].total_in, STACK);
    assert_eq!(state.seats[1].total_in, STACK);
    assert_eq!(state.seats[2].total_in, 5 * B_BLIND);

    let payoffs = state.settle();
    // big blind wins the entire 15 BB main pot outright (net +10 after its
    // own 5 BB); the button, holding the best of the two deep stacks,
    // takes the 30 BB side pot (net +10 after its own 20 BB); the small
    // blind is shut out of both (net -20).
    assert_eq!(payoffs, [10 * B_BLIND, -20 * B_BLIND, 10 * B_BLIND]);
}

#[test]
fn checking_every_street_to_showdown_settles_to_zero_sum() {
    let mut rng = rng();
    let mut state = GameState::deal(&mut rng);
    for _ in 0..4 {
        for _ in 0..3 {
            if state.phase != Phase::Betting {
                break;
            }
            state = state.apply_edge(&mut rng, Edge::CheckCall);
        }
    }
    assert_eq!(state.phase, Phase::Showdown);

    let payoffs = state.settle();
    assert_eq!(payoffs.iter().sum::<crate::Chips>(), 0);
}
