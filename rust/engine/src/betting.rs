use crate::errors::GameError;
use crate::player::{Action, ActionKind, Player};

/// Per-street betting bookkeeping: who must still act, the bet everyone has
/// to match, and the minimum legal raise increment.
#[derive(Debug, Clone)]
pub struct BettingRound {
    pub current_bet: u32,
    /// Minimum legal raise *increment* above `current_bet`. Reset to the big
    /// blind at the start of every street.
    pub min_raise: u32,
    /// Last seat whose action was a full legal raise.
    pub last_raiser: Option<usize>,
    /// Whether each seat has acted since the last full raise (or since
    /// street start), indexed by seat.
    acted_this_round: Vec<bool>,
    /// Whether the big blind has exercised its preflop option. Only
    /// meaningful preflop; kept for introspection and tests even though
    /// `acted_this_round` alone already withholds closure until the big
    /// blind acts.
    pub bb_option_used: bool,
    is_preflop: bool,
    big_blind_seat: usize,
    /// Seats that already faced and matched `current_bet` once, and so are
    /// barred from raising until a genuine full raise reopens action for
    /// everyone. Set by an insufficient (non-reopening) all-in; cleared by
    /// the next full raise.
    raise_barred: Vec<bool>,
}

impl BettingRound {
    pub fn new(n_seats: usize, big_blind: u32, is_preflop: bool, big_blind_seat: usize) -> Self {
        Self {
            current_bet: if is_preflop { big_blind } else { 0 },
            min_raise: big_blind,
            last_raiser: None,
            acted_this_round: vec![false; n_seats],
            bb_option_used: false,
            is_preflop,
            big_blind_seat,
            raise_barred: vec![false; n_seats],
        }
    }

    pub fn to_call(&self, player: &Player) -> u32 {
        self.current_bet.saturating_sub(player.bet)
    }

    /// The round is complete when every non-folded, non-all-in player has
    /// `acted_this_round == true` and has matched `current_bet` (or is
    /// all-in), or fewer than two non-folded players remain. Requiring both
    /// conditions — not `acted_this_round` alone — is what forces a player
    /// who already acted to come back and call the extra delta left by a
    /// later, smaller all-in raise.
    pub fn is_complete(&self, players: &[Player]) -> bool {
        let non_folded = players.iter().filter(|p| !p.folded).count();
        if non_folded <= 1 {
            return true;
        }
        players.iter().filter(|p| p.is_active()).all(|p| {
            self.acted_this_round[p.seat] && p.bet == self.current_bet
        })
    }

    pub fn valid_actions(&self, seat: usize, players: &[Player]) -> Vec<(ActionKind, u32, u32)> {
        let player = &players[seat];
        if player.folded || player.all_in {
            return Vec::new();
        }
        let to_call = self.to_call(player);
        let mut actions = vec![(ActionKind::Fold, 0, 0)];
        if to_call == 0 {
            actions.push((ActionKind::Check, 0, 0));
        } else if player.chips > to_call {
            actions.push((ActionKind::Call, to_call, to_call));
        }
        let max_total = player.bet + player.chips;
        let min_raise_total = self.current_bet + self.min_raise;
        if player.chips > 0 {
            if !self.raise_barred[seat] && max_total > self.current_bet && min_raise_total <= max_total {
                actions.push((ActionKind::Raise, min_raise_total, max_total));
            }
            actions.push((ActionKind::AllIn, max_total, max_total));
        }
        actions
    }

    /// Validates and applies `action` for `seat`, mutating `players[seat]`
    /// and this round's bookkeeping. Rejects atomically: on `Err`, neither
    /// the player nor the round state has changed. Returns the chips the
    /// seat committed by this action (0 for fold/check).
    pub fn process_action(
        &mut self,
        seat: usize,
        players: &mut [Player],
        action: Action,
    ) -> Result<u32, GameError> {
        let had_no_raiser = self.last_raiser.is_none();
        let chips_before = players[seat].chips;

        {
            let player = &players[seat];
            if player.folded || player.all_in {
                return Err(GameError::IllegalAction {
                    reason: format!("seat {seat} cannot act: folded or all-in"),
                });
            }
        }

        match action {
            Action::Fold => {
                players[seat].fold();
            }
            Action::Check => {
                let player = &players[seat];
                if self.to_call(player) != 0 {
                    return Err(GameError::IllegalAction {
                        reason: format!("seat {seat} cannot check facing a bet"),
                    });
                }
                players[seat].last_action = Some(Action::Check);
            }
            Action::Call => {
                let player = &players[seat];
                let to_call = self.to_call(player);
                if to_call == 0 {
                    return Err(GameError::IllegalAction {
                        reason: format!("seat {seat} has nothing to call"),
                    });
                }
                if player.chips <= to_call {
                    return Err(GameError::IllegalAction {
                        reason: format!(
                            "seat {seat} cannot call for exactly their stack; submit AllIn"
                        ),
                    });
                }
                players[seat].contribute(to_call);
                players[seat].last_action = Some(Action::Call);
            }
            Action::Raise(total) => {
                if self.raise_barred[seat] {
                    return Err(GameError::IllegalAction {
                        reason: format!(
                            "seat {seat} already matched current bet against an insufficient all-in and cannot re-raise"
                        ),
                    });
                }
                let player = &players[seat];
                let max_total = player.bet + player.chips;
                let min_total = self.current_bet + self.min_raise;
                if total <= self.current_bet {
                    return Err(GameError::IllegalAction {
                        reason: format!("raise total {total} does not exceed current bet"),
                    });
                }
                if total > max_total {
                    return Err(GameError::IllegalAction {
                        reason: format!("seat {seat} cannot raise to {total}, stack allows {max_total}"),
                    });
                }
                if total < min_total {
                    return Err(GameError::IllegalAction {
                        reason: format!(
                            "raise to {total} is below the minimum legal raise to {min_total}"
                        ),
                    });
                }
                let increment = total - self.current_bet;
                let add = total - player.bet;
                players[seat].contribute(add);
                players[seat].last_action = Some(action);
                self.current_bet = total;
                self.min_raise = increment;
                self.last_raiser = Some(seat);
                for p in players.iter().filter(|p| p.is_active()) {
                    self.acted_this_round[p.seat] = p.seat == seat;
                    self.raise_barred[p.seat] = false;
                }
            }
            Action::AllIn => {
                let player = &players[seat];
                if player.chips == 0 {
                    return Err(GameError::IllegalAction {
                        reason: format!("seat {seat} has no chips to push all-in"),
                    });
                }
                let add = player.chips;
                let total_after = player.bet + add;
                players[seat].contribute(add);
                players[seat].last_action = Some(action);
                if total_after > self.current_bet {
                    let increment = total_after - self.current_bet;
                    self.current_bet = total_after;
                    if increment >= self.min_raise {
                        // Full raise: reopens action to everyone still in the hand.
                        self.min_raise = increment;
                        self.last_raiser = Some(seat);
                        for p in players.iter().filter(|p| p.is_active()) {
                            self.acted_this_round[p.seat] = p.seat == seat;
                            self.raise_barred[p.seat] = false;
                        }
                    } else {
                        // Insufficient all-in: bars seats that already faced
                        // the prior current_bet from re-raising, though they
                        // still owe (and must act on) the extra delta.
                        for p in players.iter().filter(|p| p.is_active() && p.seat != seat) {
                            if self.acted_this_round[p.seat] {
                                self.raise_barred[p.seat] = true;
                            }
                        }
                    }
                }
            }
        }

        self.acted_this_round[seat] = true;
        if self.is_preflop && seat == self.big_blind_seat && had_no_raiser {
            self.bb_option_used = true;
        }
        Ok(chips_before - players[seat].chips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_players(chips: [u32; 3]) -> Vec<Player> {
        (0..3).map(|i| Player::new(i, format!("p{i}"), chips[i])).collect()
    }

    #[test]
    fn insufficient_all_in_does_not_reopen_action() {
        // UTG (seat 0) raises to 30; min_raise becomes 20. Seat 1 shoves
        // all-in for a total of 45 (increment 15 < 20), which must not
        // reopen raising for seat 0.
        let mut players = three_players([1000, 45, 1000]);
        let mut round = BettingRound::new(3, 10, true, 1);
        round.process_action(0, &mut players, Action::Raise(30)).unwrap();
        round.process_action(1, &mut players, Action::AllIn).unwrap();
        assert_eq!(round.min_raise, 20);
        let err = round.process_action(0, &mut players, Action::Raise(65)).unwrap_err();
        assert!(matches!(err, GameError::IllegalAction { .. }));
        // Seat 0 may still call the extra delta.
        round.process_action(0, &mut players, Action::Call).unwrap();
        assert_eq!(players[0].bet, 45);
    }

    #[test]
    fn full_raise_reopens_a_previously_barred_seat() {
        let mut players = three_players([1000, 45, 1000]);
        let mut round = BettingRound::new(3, 10, true, 1);
        round.process_action(0, &mut players, Action::Raise(30)).unwrap();
        round.process_action(1, &mut players, Action::AllIn).unwrap();
        round.process_action(2, &mut players, Action::Raise(90)).unwrap();
        // seat 0 was barred, but seat 2's full raise reopened action.
        round.process_action(0, &mut players, Action::Raise(150)).unwrap();
        assert_eq!(round.current_bet, 150);
    }

    #[test]
    fn preflop_big_blind_gets_an_option_after_bare_calls() {
        let mut players = three_players([1000, 1000, 990]);
        players[2].bet = 10;
        players[2].total_bet = 10;
        let mut round = BettingRound::new(3, 10, true, 2);
        round.current_bet = 10;
        round.process_action(0, &mut players, Action::Call).unwrap();
        round.process_action(1, &mut players, Action::Call).unwrap();
        assert!(!round.is_complete(&players));
        round.process_action(2, &mut players, Action::Check).unwrap();
        assert!(round.bb_option_used);
        assert!(round.is_complete(&players));
    }
}
