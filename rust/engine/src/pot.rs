use std::collections::{BTreeSet, HashMap};

use crate::errors::GameError;
use crate::hand::HandRank;
use crate::player::Player;

/// One pot (main or side) awarded as a unit at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: u32,
    /// Seats that may win this pot: folded players are excluded; an all-in
    /// player remains eligible up to the level they contributed.
    pub eligible: BTreeSet<usize>,
    /// The per-player contribution level this pot is capped at, or `None`
    /// for the final, uncapped pot.
    pub cap: Option<u32>,
}

/// Accumulates street bets into a main pot and, once any player is all-in,
/// partitions contributions into the canonical main/side-pot layout.
#[derive(Debug, Clone)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    /// One empty pot, all seated players eligible.
    pub fn new(seats: impl IntoIterator<Item = usize>) -> Self {
        Self {
            pots: vec![Pot {
                amount: 0,
                eligible: seats.into_iter().collect(),
                cap: None,
            }],
        }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Moves each player's street-local `bet` into the last pot and resets
    /// it to zero. Called once at the end of each betting round.
    pub fn collect_bets(&mut self, players: &mut [Player]) {
        let last = self.pots.last_mut().expect("PotManager always has a pot");
        for player in players.iter_mut() {
            if player.bet > 0 {
                last.amount += player.bet;
                player.bet = 0;
            }
        }
    }

    /// Recomputes the canonical side-pot layout from `total_bet`. Gathers
    /// the unique `total_bet` levels among all-in players (ascending); the
    /// pot at level `L_i` holds `(L_i - L_{i-1})` chips from every player
    /// (folded or not) with `total_bet >= L_i`, eligible to non-folded
    /// players with `total_bet >= L_i`. A final uncapped pot holds the
    /// excess contributed by non-all-in players above the highest all-in
    /// level. Safe to call repeatedly: it always rebuilds from the current
    /// `total_bet` values, which only grow across streets.
    pub fn calculate_side_pots(&mut self, players: &[Player]) {
        let mut levels: Vec<u32> = players
            .iter()
            .filter(|p| p.all_in)
            .map(|p| p.total_bet)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::new();
        let mut prev = 0u32;
        for level in levels {
            let amount: u32 = players
                .iter()
                .filter(|p| p.total_bet >= level)
                .map(|_| level - prev)
                .sum();
            let eligible: BTreeSet<usize> = players
                .iter()
                .filter(|p| !p.folded && p.total_bet >= level)
                .map(|p| p.seat)
                .collect();
            if amount > 0 {
                pots.push(Pot {
                    amount,
                    eligible,
                    cap: Some(level),
                });
            }
            prev = level;
        }

        let remaining: u32 = players
            .iter()
            .filter(|p| !p.all_in && p.total_bet > prev)
            .map(|p| p.total_bet - prev)
            .sum();
        if remaining > 0 {
            let eligible: BTreeSet<usize> = players
                .iter()
                .filter(|p| !p.folded && !p.all_in && p.total_bet > prev)
                .map(|p| p.seat)
                .collect();
            pots.push(Pot {
                amount: remaining,
                eligible,
                cap: None,
            });
        }

        if pots.is_empty() {
            pots.push(Pot {
                amount: 0,
                eligible: players.iter().filter(|p| !p.folded).map(|p| p.seat).collect(),
                cap: None,
            });
        }

        self.pots = pots;
    }

    /// Current pots plus any not-yet-collected street bets, attributed to
    /// the last pot where active betting is happening. Pure: does not
    /// mutate `self` or `players`.
    pub fn pots_with_uncollected(&self, players: &[Player]) -> Vec<Pot> {
        let mut pots = self.pots.clone();
        let uncollected: u32 = players.iter().map(|p| p.bet).sum();
        if uncollected > 0 {
            if let Some(last) = pots.last_mut() {
                last.amount += uncollected;
            }
        }
        pots
    }

    /// For each pot, in order, pays the subset of eligible players with the
    /// maximal hand rank an equal share; any remainder chip goes to the
    /// eligible winner seated closest clockwise from the button. Zeroes each
    /// pot's amount once awarded, so a chip-conservation check taken
    /// afterwards sees the payout reflected only in player stacks. Returns
    /// the winning seats per pot, in pot order.
    pub fn distribute(
        &mut self,
        players: &mut [Player],
        ranks: &HashMap<usize, HandRank>,
        button: usize,
        n_seats: usize,
    ) -> Vec<Vec<usize>> {
        let mut winners_per_pot = Vec::with_capacity(self.pots.len());
        for pot in &mut self.pots {
            let mut best: Option<HandRank> = None;
            let mut winners: Vec<usize> = Vec::new();
            for &seat in &pot.eligible {
                if let Some(&rank) = ranks.get(&seat) {
                    match best {
                        Some(b) if rank < b => {}
                        Some(b) if rank == b => winners.push(seat),
                        _ => {
                            best = Some(rank);
                            winners = vec![seat];
                        }
                    }
                }
            }
            winners.sort_unstable();

            if !winners.is_empty() {
                let share = pot.amount / winners.len() as u32;
                let remainder = pot.amount % winners.len() as u32;
                for &seat in &winners {
                    if let Some(p) = players.iter_mut().find(|p| p.seat == seat) {
                        p.chips += share;
                    }
                }
                if remainder > 0 {
                    let target = winners
                        .iter()
                        .copied()
                        .min_by_key(|&seat| clockwise_distance(button, seat, n_seats))
                        .expect("winners is non-empty");
                    if let Some(p) = players.iter_mut().find(|p| p.seat == target) {
                        p.chips += remainder;
                    }
                }
            }
            pot.amount = 0;
            winners_per_pot.push(winners);
        }
        winners_per_pot
    }

    /// Verifies `Σ(pot.amount) + Σ(player.bet) + Σ(player.chips) ==
    /// starting_total`. A failure is a core bug, not a recoverable caller
    /// error.
    pub fn verify_conservation(
        &self,
        players: &[Player],
        starting_total: u32,
    ) -> Result<(), GameError> {
        let pots_total: u32 = self.pots.iter().map(|p| p.amount).sum();
        let bets_total: u32 = players.iter().map(|p| p.bet).sum();
        let chips_total: u32 = players.iter().map(|p| p.chips).sum();
        let total = pots_total + bets_total + chips_total;
        if total == starting_total {
            Ok(())
        } else {
            Err(GameError::InvariantViolation {
                reason: format!(
                    "chip conservation failed: pots {pots_total} + bets {bets_total} + chips {chips_total} = {total}, expected {starting_total}"
                ),
            })
        }
    }
}

fn clockwise_distance(button: usize, seat: usize, n_seats: usize) -> usize {
    (seat + n_seats - (button + 1) % n_seats) % n_seats
}
