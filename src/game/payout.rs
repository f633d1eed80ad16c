use crate::cards::strength::Strength;
use crate::{Chips, N};

/// resolves side pots from each seat's total contribution for the hand and,
/// for seats still in it at showdown, their evaluated `Strength`. folded
/// seats pass `None` and can never win a slice, but their chips still form
/// part of whatever pots they contributed to.
///
/// `postflop_order` is the seating order used postflop (first to act first);
/// it is also the tie-break order for odd chips that don't divide evenly
/// among the winners of a slice, per the earliest-to-act convention.
pub fn settle(
    total_in: &[Chips; N],
    folded: &[bool; N],
    strengths: &[Option<Strength>; N],
    postflop_order: &[usize; N],
) -> [Chips; N] {
    let mut payouts = [0 as Chips; N];

    let mut levels: Vec<Chips> = total_in.iter().copied().filter(|&c| c > 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut prev = 0 as Chips;
    for level in levels {
        let contributors: Vec<usize> = (0..N).filter(|&i| total_in[i] >= level).collect();
        let slice_total = (level - prev) * contributors.len() as Chips;
        prev = level;

        let eligible: Vec<usize> = contributors.into_iter().filter(|&i| !folded[i]).collect();
        if eligible.len() == 1 {
            payouts[eligible[0]] += slice_total;
            continue;
        }
        let best = eligible
            .iter()
            .filter_map(|&i| strengths[i].map(|s| (i, s)))
            .max_by_key(|&(_, s)| s);
        let Some((_, best_strength)) = best else {
            continue; // every contributor to this slice folded; unreachable in a well-formed hand
        };
        let winners: Vec<usize> = eligible
            .into_iter()
            .filter(|&i| strengths[i] == Some(best_strength))
            .collect();

        let share = slice_total / winners.len() as Chips;
        let remainder = slice_total - share * winners.len() as Chips;
        for &w in &winners {
            payouts[w] += share;
        }
        let ordered: Vec<usize> = postflop_order
            .iter()
            .copied()
            .filter(|i| winners.contains(i))
            .collect();
        for k in 0..remainder as usize {
            payouts[ordered[k % ordered.len()]] += 1;
        }
    }
    payouts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncontested_fold_awards_entire_pot() {
        let total_in = [20, 10, 0];
        let folded = [false, true, true];
        let strengths = [None, None, None];
        let order = [0, 1, 2];
        let payouts = settle(&total_in, &folded, &strengths, &order);
        assert_eq!(payouts, [30, 0, 0]);
    }

    #[test]
    fn side_pot_splits_by_stake_level() {
        use crate::cards::card::Card;
        use crate::cards::hand::Hand;
        use crate::cards::rank::Rank::*;
        use crate::cards::suit::Suit::*;

        let hand_of = |cards: &[(crate::cards::rank::Rank, crate::cards::suit::Suit)]| {
            Strength::of(&Hand::from(
                cards.iter().map(|&(r, s)| Card::new(r, s)).collect::<Vec<_>>(),
            ))
        };

        // seat 0 all-in for 10 with trip kings, seats 1 and 2 both go to 30
        // with a king-pair and a queen-pair respectively.
        let total_in = [10, 30, 30];
        let folded = [false, false, false];
        let strengths = [
            Some(hand_of(&[(King, Club), (King, Diamond), (King, Heart), (Two, Spade), (Four, Club)])),
            Some(hand_of(&[(King, Spade), (King, Club), (Nine, Diamond), (Seven, Heart), (Five, Spade)])),
            Some(hand_of(&[(Queen, Spade), (Queen, Club), (Nine, Diamond), (Seven, Heart), (Five, Spade)])),
        ];
        let order = [1, 2, 0];
        let payouts = settle(&total_in, &folded, &strengths, &order);
        assert_eq!(payouts[0], 30); // trips wins the main pot (3 x 10)
        assert_eq!(payouts[1], 40); // king pair wins the side pot (2 x 20)
        assert_eq!(payouts[2], 0);
    }
}
