use serde::{Deserialize, Serialize};

use crate::cards::CardSet;

/// The five betting actions a `BettingRound` recognizes. `Raise` carries the
/// new *total* street bet, not an increment over the current bet; there is
/// no separate `Bet` variant because an opening bet is simply a `Raise` over
/// a `current_bet` of zero. `SitOut`/`SitIn`/`Quit` are not modeled here:
/// they are table-lifecycle intents, observational messages forwarded to an
/// external driver between hands rather than betting actions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(u32),
    AllIn,
}

/// The action kind without a committed amount, returned by `ValidActions`
/// alongside the legal `(min, max)` range for that kind.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// A seated player for the duration of one hand.
#[derive(Debug, Clone)]
pub struct Player {
    pub seat: usize,
    pub name: String,
    pub chips: u32,
    pub hole_cards: CardSet,
    /// Contribution to the current street only; reset to 0 after each
    /// street's bets are collected into the pot manager.
    pub bet: u32,
    /// Cumulative contribution across the whole hand; monotonic
    /// non-decreasing, never reset.
    pub total_bet: u32,
    pub folded: bool,
    pub all_in: bool,
    pub last_action: Option<Action>,
}

impl Player {
    pub fn new(seat: usize, name: impl Into<String>, chips: u32) -> Self {
        Self {
            seat,
            name: name.into(),
            chips,
            hole_cards: CardSet::EMPTY,
            bet: 0,
            total_bet: 0,
            folded: false,
            all_in: false,
            last_action: None,
        }
    }

    /// Commits `amount` chips from the stack into this street's bet,
    /// marking the player all-in if it exhausts their stack. Saturates
    /// rather than going negative; callers validate the amount first.
    pub fn contribute(&mut self, amount: u32) {
        let amount = amount.min(self.chips);
        self.chips -= amount;
        self.bet += amount;
        self.total_bet += amount;
        if self.chips == 0 {
            self.all_in = true;
        }
    }

    pub fn fold(&mut self) {
        self.folded = true;
        self.last_action = Some(Action::Fold);
    }

    /// Starting-stack reconstruction for the chip-conservation invariant:
    /// `chips + total_bet` must equal what the player started the hand with.
    pub fn starting_stack(&self) -> u32 {
        self.chips + self.total_bet
    }

    /// Whether this seat can still act this street.
    pub fn is_active(&self) -> bool {
        !self.folded && !self.all_in
    }
}
