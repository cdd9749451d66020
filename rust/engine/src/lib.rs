//! # holdem-engine: No-Limit Texas Hold'em hand engine
//!
//! Drives a single hand of No-Limit Hold'em from blind posting through
//! showdown: bitset-based 7-card evaluation, a betting-round state machine
//! enforcing NLHE action and min-raise rules, and a pot manager that builds
//! main/side pots under mixed all-in/fold conditions. Deterministic given a
//! caller-supplied RNG and action sequence.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card/Suit/Rank representation and the `CardSet` bitset
//! - [`deck`] - Ordered deck with caller-driven shuffling
//! - [`hand`] - 7-card hand evaluation and strength comparison
//! - [`player`] - Per-seat player state and the betting action taxonomy
//! - [`betting`] - Betting-round state machine (min-raise, closure, side-pot reopening)
//! - [`pot`] - Main/side pot construction and showdown distribution
//! - [`hand_state`] - Orchestrates one hand end to end
//! - [`events`] - Observable event stream published during a hand
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::{Card, CardSet};
//! use holdem_engine::hand::evaluate7;
//!
//! let cards: CardSet = Card::parse_many("Ah Kh Qh Jh Th 2c 3d").unwrap().into_iter().collect();
//! let rank = evaluate7(cards).unwrap();
//! println!("Hand strength: {:?}", holdem_engine::hand::category(rank));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All outcomes are reproducible from a caller-owned seeded RNG:
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use holdem_engine::deck::Deck;
//!
//! let mut rng1 = ChaCha8Rng::seed_from_u64(42);
//! let mut rng2 = ChaCha8Rng::seed_from_u64(42);
//! let deck1 = Deck::shuffled(&mut rng1);
//! let deck2 = Deck::shuffled(&mut rng2);
//! // deck1 and deck2 have an identical card order.
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod events;
pub mod hand;
pub mod hand_state;
pub mod player;
pub mod pot;
