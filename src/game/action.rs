use crate::cards::street::Street;
use crate::Chips;

/// seven raise sizes, interpreted against different scales depending on the
/// street: a multiple of the current bet preflop, a fraction of the pot
/// postflop — the two fixed raise ladders named in the action alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RaiseSize {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
}

impl RaiseSize {
    pub const ALL: [RaiseSize; 7] = [
        RaiseSize::R0,
        RaiseSize::R1,
        RaiseSize::R2,
        RaiseSize::R3,
        RaiseSize::R4,
        RaiseSize::R5,
        RaiseSize::R6,
    ];

    /// preflop: 2x, 2.5x, 3x, 4x, 5x, 7.5x, 10x the current bet.
    const PREFLOP_MULTIPLE: [f32; 7] = [2.0, 2.5, 3.0, 4.0, 5.0, 7.5, 10.0];
    /// postflop: 0.33, 0.5, 0.66, 0.75, 1, 1.5, 2 pot.
    const POSTFLOP_POT_FRACTION: [f32; 7] = [0.33, 0.5, 0.66, 0.75, 1.0, 1.5, 2.0];

    fn index(self) -> usize {
        match self {
            RaiseSize::R0 => 0,
            RaiseSize::R1 => 1,
            RaiseSize::R2 => 2,
            RaiseSize::R3 => 3,
            RaiseSize::R4 => 4,
            RaiseSize::R5 => 5,
            RaiseSize::R6 => 6,
        }
    }

    /// desired raise-to amount (absolute chip level), before capping against
    /// the acting player's remaining stack.
    pub fn raise_to(self, street: Street, pot: Chips, current_bet: Chips) -> Chips {
        match street {
            Street::Pref => {
                let mult = Self::PREFLOP_MULTIPLE[self.index()];
                (current_bet as f32 * mult).round() as Chips
            }
            _ => {
                let frac = Self::POSTFLOP_POT_FRACTION[self.index()];
                let bet = ((pot as f32 * frac).round() as Chips).max(1);
                current_bet + bet
            }
        }
    }
}

/// the fixed ten-edge alphabet: fold, the merged check/call, the seven
/// abstracted raise sizes, and an explicit all-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    Fold,
    CheckCall,
    Raise(RaiseSize),
    AllIn,
}

impl Edge {
    pub const ALL: [Edge; 10] = [
        Edge::Fold,
        Edge::CheckCall,
        Edge::Raise(RaiseSize::R0),
        Edge::Raise(RaiseSize::R1),
        Edge::Raise(RaiseSize::R2),
        Edge::Raise(RaiseSize::R3),
        Edge::Raise(RaiseSize::R4),
        Edge::Raise(RaiseSize::R5),
        Edge::Raise(RaiseSize::R6),
        Edge::AllIn,
    ];

    /// dense 0..10 index, used to pack an `Edge` into a nibble of
    /// `mccfr::path::Path` and to index a blueprint's policy vector.
    pub fn to_index(self) -> u8 {
        match self {
            Edge::Fold => 0,
            Edge::CheckCall => 1,
            Edge::Raise(r) => 2 + r.index() as u8,
            Edge::AllIn => 9,
        }
    }

    pub fn from_index(i: u8) -> Self {
        match i {
            0 => Edge::Fold,
            1 => Edge::CheckCall,
            9 => Edge::AllIn,
            n => Edge::Raise(RaiseSize::ALL[(n - 2) as usize]),
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Edge::Fold => write!(f, "fold"),
            Edge::CheckCall => write!(f, "check/call"),
            Edge::Raise(r) => write!(f, "raise{}", r.index()),
            Edge::AllIn => write!(f, "all-in"),
        }
    }
}

/// a concrete action with resolved chip amounts, the result of filtering
/// `Edge::ALL` down to what is legal in a given `GameState` and resolving
/// each surviving edge's abstract size to real chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call(Chips),
    Raise(Chips),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call(n) => write!(f, "call {}", n),
            Action::Raise(n) => write!(f, "raise to {}", n),
        }
    }
}
