use serde::{Deserialize, Serialize};

use crate::cards::CardSet;
use crate::player::Action;

/// A betting street. `Showdown` marks the terminal phase after the river
/// betting round closes (or after an early single-survivor finish).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Immutable snapshot of a seat published on `HandStart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub seat: usize,
    pub name: String,
    pub chips: u32,
}

/// Events are published in the order actions are processed: `HandStart`
/// once, then interleaved `PlayerAction`/`StreetChange`, then `HandEnd`
/// once. Every payload is an immutable snapshot; subscribers must not (and
/// cannot, since they only see `&Event`) mutate core state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    HandStart {
        hand_id: String,
        players: Vec<PlayerSnapshot>,
        small_blind: u32,
        big_blind: u32,
    },
    PlayerAction {
        seat: usize,
        action: Action,
        amount: u32,
        street: Street,
        pot_after: u32,
    },
    StreetChange {
        street: Street,
        board: CardSet,
    },
    HandEnd {
        winners_per_pot: Vec<Vec<usize>>,
        final_board: CardSet,
    },
}

/// Observer of a hand's event stream. A subscriber error is isolated: it
/// never corrupts core state and the core does not await or retry it.
pub trait EventSubscriber {
    fn on_event(&mut self, event: &Event) -> Result<(), String>;
}

/// Publishes to every registered subscriber, suppressing individual
/// failures so one broken subscriber cannot block or corrupt the others or
/// the hand itself.
pub fn publish(subscribers: &mut [Box<dyn EventSubscriber>], event: &Event) {
    for subscriber in subscribers.iter_mut() {
        let _ = subscriber.on_event(event);
    }
}
