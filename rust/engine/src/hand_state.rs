use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;

use crate::betting::BettingRound;
use crate::cards::CardSet;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{publish, Event, EventSubscriber, PlayerSnapshot, Street};
use crate::hand;
use crate::player::{Action, ActionKind, Player};
use crate::pot::{Pot, PotManager};

/// Per-player starting-chip policy for [`HandState::new`].
pub enum ChipSetup {
    Uniform(u32),
    PerPlayer(Vec<u32>),
}

fn format_hand_id(date: &str, seq: u32) -> String {
    format!("{date}-{seq:06}")
}

/// Orchestrates one complete hand: blind posting, street progression,
/// action processing, and showdown. Not reusable across hands — construct a
/// new `HandState` (with a rotated button) for the next one.
pub struct HandState {
    hand_id: String,
    players: Vec<Player>,
    button: usize,
    small_blind: u32,
    big_blind: u32,
    street: Street,
    board: CardSet,
    deck: Deck,
    active_player: Option<usize>,
    betting: BettingRound,
    pot_manager: PotManager,
    starting_total: u32,
    subscribers: Vec<Box<dyn EventSubscriber>>,
    complete: bool,
    winners_per_pot: Option<Vec<Vec<usize>>>,
}

impl HandState {
    /// Constructs a new hand: validates the roster and blinds, shuffles (or
    /// accepts a pre-built) deck with the caller's RNG, posts blinds, deals
    /// hole cards, and sets the first actor. `hand_sequence` is an
    /// externally tracked counter (the core has no hand-numbering state of
    /// its own); it's combined with today's date into `hand_id`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rng: &mut impl Rng,
        names: Vec<String>,
        chips: ChipSetup,
        button: usize,
        small_blind: u32,
        big_blind: u32,
        deck: Option<Deck>,
        hand_sequence: u32,
    ) -> Result<Self, GameError> {
        let n = names.len();
        if n < 2 {
            return Err(GameError::InvalidConfig {
                reason: "a hand requires at least 2 players".to_string(),
            });
        }
        if button >= n {
            return Err(GameError::InvalidConfig {
                reason: format!("button seat {button} is out of range for {n} players"),
            });
        }
        if small_blind == 0 || big_blind == 0 {
            return Err(GameError::InvalidConfig {
                reason: "blinds must be positive".to_string(),
            });
        }
        let chip_counts = match chips {
            ChipSetup::Uniform(c) => vec![c; n],
            ChipSetup::PerPlayer(v) => {
                if v.len() != n {
                    return Err(GameError::InvalidConfig {
                        reason: format!(
                            "chip-count list has {} entries, expected {n}",
                            v.len()
                        ),
                    });
                }
                v
            }
        };

        let mut players: Vec<Player> = names
            .into_iter()
            .zip(chip_counts.iter())
            .enumerate()
            .map(|(seat, (name, &chips))| Player::new(seat, name, chips))
            .collect();

        let starting_total: u32 = chip_counts.iter().sum();

        let (sb_seat, bb_seat) = if n == 2 {
            (button, (button + 1) % n)
        } else {
            ((button + 1) % n, (button + 2) % n)
        };

        let mut deck = match deck {
            Some(d) => d,
            None => Deck::shuffled(rng),
        };

        players[sb_seat].contribute(small_blind);
        players[sb_seat].last_action = Some(Action::Raise(players[sb_seat].bet));
        players[bb_seat].contribute(big_blind);
        players[bb_seat].last_action = Some(Action::Raise(players[bb_seat].bet));

        let deal_order: Vec<usize> = (0..n).map(|i| (button + 1 + i) % n).collect();
        for _ in 0..2 {
            for &seat in &deal_order {
                let card = deck.deal_one()?;
                players[seat].hole_cards.insert(card);
            }
        }

        let betting = BettingRound::new(n, big_blind, true, bb_seat);
        let active_player = if n == 2 {
            Some(sb_seat)
        } else {
            first_active_seat_from(&players, (bb_seat + 1) % n)
        };

        let hand_id = format_hand_id(&Utc::now().format("%Y%m%d").to_string(), hand_sequence);

        let mut hand = Self {
            hand_id,
            players,
            button,
            small_blind,
            big_blind,
            street: Street::Preflop,
            board: CardSet::EMPTY,
            deck,
            active_player,
            betting,
            pot_manager: PotManager::new(0..n),
            starting_total,
            subscribers: Vec::new(),
            complete: false,
            winners_per_pot: None,
        };

        let snapshot = hand
            .players
            .iter()
            .map(|p| PlayerSnapshot {
                seat: p.seat,
                name: p.name.clone(),
                chips: p.chips,
            })
            .collect();
        hand.emit(Event::HandStart {
            hand_id: hand.hand_id.clone(),
            players: snapshot,
            small_blind,
            big_blind,
        });

        Ok(hand)
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    fn emit(&mut self, event: Event) {
        publish(&mut self.subscribers, &event);
    }

    pub fn hand_id(&self) -> &str {
        &self.hand_id
    }

    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn current_player(&self) -> Option<usize> {
        self.active_player
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn current_street(&self) -> Street {
        self.street
    }

    pub fn board(&self) -> CardSet {
        self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn pots(&self) -> &[Pot] {
        self.pot_manager.pots()
    }

    pub fn total_pot(&self) -> u32 {
        self.pot_manager
            .pots_with_uncollected(&self.players)
            .iter()
            .map(|p| p.amount)
            .sum()
    }

    pub fn valid_actions(&self) -> Vec<(ActionKind, u32, u32)> {
        match self.active_player {
            Some(seat) => self.betting.valid_actions(seat, &self.players),
            None => Vec::new(),
        }
    }

    pub fn get_winners(&self) -> Result<&[Vec<usize>], GameError> {
        self.winners_per_pot
            .as_deref()
            .ok_or(GameError::HandNotComplete)
    }

    /// Validates and applies `action` for `seat`, requiring it to be that
    /// seat's turn. Rejected actions leave all state untouched.
    pub fn process_action(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        if self.complete {
            return Err(GameError::IllegalAction {
                reason: "hand already complete".to_string(),
            });
        }
        let active = self.active_player.ok_or_else(|| GameError::IllegalAction {
            reason: "no seat is currently entitled to act".to_string(),
        })?;
        if active != seat {
            return Err(GameError::IllegalAction {
                reason: format!("it is seat {active}'s turn, not seat {seat}"),
            });
        }
        self.apply_action(seat, action)
    }

    /// Lets an external driver (e.g. a timeout handler) force a fold on any
    /// non-folded, non-all-in seat without threading the turn-order check.
    pub fn force_fold_seat(&mut self, seat: usize) -> Result<(), GameError> {
        if self.complete {
            return Err(GameError::IllegalAction {
                reason: "hand already complete".to_string(),
            });
        }
        self.apply_action(seat, Action::Fold)
    }

    fn apply_action(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        let amount = self.betting.process_action(seat, &mut self.players, action)?;
        self.emit(Event::PlayerAction {
            seat,
            action,
            amount,
            street: self.street,
            pot_after: self.total_pot(),
        });

        if self.players[seat].folded {
            let non_folded: Vec<usize> = self
                .players
                .iter()
                .filter(|p| !p.folded)
                .map(|p| p.seat)
                .collect();
            if non_folded.len() == 1 {
                self.award_uncontested(non_folded[0]);
                return Ok(());
            }
        }

        self.active_player = self.next_active_seat(seat);

        if self.betting.is_complete(&self.players) {
            self.close_betting_round()?;
        }

        Ok(())
    }

    fn next_active_seat(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|&seat| self.players[seat].is_active())
    }

    fn close_betting_round(&mut self) -> Result<(), GameError> {
        self.pot_manager.collect_bets(&mut self.players);
        if self.players.iter().any(|p| p.all_in) {
            self.pot_manager.calculate_side_pots(&self.players);
        }

        let non_folded: Vec<usize> = self
            .players
            .iter()
            .filter(|p| !p.folded)
            .map(|p| p.seat)
            .collect();
        if non_folded.len() == 1 {
            self.award_uncontested(non_folded[0]);
            return Ok(());
        }

        let contestants_can_act = self.players.iter().filter(|p| p.is_active()).count();
        if contestants_can_act <= 1 {
            // Everyone left is all-in (or only one non-all-in remains with
            // nothing more to decide): run out the remaining board silently.
            while self.street != Street::River {
                self.deal_next_street()?;
            }
            self.showdown()?;
            return Ok(());
        }

        self.deal_next_street()?;
        Ok(())
    }

    fn deal_next_street(&mut self) -> Result<(), GameError> {
        let next = match self.street {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => {
                self.showdown()?;
                return Ok(());
            }
        };

        self.deck.burn()?;
        let n_new = if next == Street::Flop { 3 } else { 1 };
        for card in self.deck.deal(n_new)? {
            self.board.insert(card);
        }
        self.street = next;

        let bb_seat = if self.players.len() == 2 {
            (self.button + 1) % self.players.len()
        } else {
            (self.button + 2) % self.players.len()
        };
        self.betting = BettingRound::new(self.players.len(), self.big_blind, false, bb_seat);
        self.active_player = first_active_seat_from(&self.players, (self.button + 1) % self.players.len());

        self.emit(Event::StreetChange {
            street: self.street,
            board: self.board,
        });

        if self.active_player.is_none() {
            // No one left who can act (all remaining are all-in): keep
            // running out streets.
            return self.deal_next_street();
        }

        Ok(())
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.street = Street::Showdown;
        let mut ranks = HashMap::new();
        for player in self.players.iter().filter(|p| !p.folded) {
            let seven = player.hole_cards.union(self.board);
            let rank = hand::evaluate7(seven)?;
            ranks.insert(player.seat, rank);
        }
        let n_seats = self.players.len();
        let winners = self
            .pot_manager
            .distribute(&mut self.players, &ranks, self.button, n_seats);
        self.pot_manager
            .verify_conservation(&self.players, self.starting_total)?;
        self.winners_per_pot = Some(winners.clone());
        self.active_player = None;
        self.complete = true;
        self.emit(Event::HandEnd {
            winners_per_pot: winners,
            final_board: self.board,
        });
        Ok(())
    }

    fn award_uncontested(&mut self, seat: usize) {
        self.pot_manager.collect_bets(&mut self.players);
        if self.players.iter().any(|p| p.all_in) {
            self.pot_manager.calculate_side_pots(&self.players);
        }
        let total: u32 = self.pot_manager.pots().iter().map(|p| p.amount).sum();
        if let Some(p) = self.players.iter_mut().find(|p| p.seat == seat) {
            p.chips += total;
        }
        let winners = vec![vec![seat]; self.pot_manager.pots().len().max(1)];
        let _ = self
            .pot_manager
            .verify_conservation(&self.players, self.starting_total);
        self.winners_per_pot = Some(winners.clone());
        self.active_player = None;
        self.complete = true;
        self.street = Street::Showdown;
        self.emit(Event::HandEnd {
            winners_per_pot: winners,
            final_board: self.board,
        });
    }
}

fn first_active_seat_from(players: &[Player], start: usize) -> Option<usize> {
    let n = players.len();
    (0..n)
        .map(|i| (start + i) % n)
        .find(|&seat| players[seat].is_active())
}
