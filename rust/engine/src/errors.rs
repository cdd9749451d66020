use thiserror::Error;

/// Every fallible core operation returns this error. Each variant is a stable
/// machine-readable kind paired with a human-readable reason; there is no
/// exception-style propagation anywhere in the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Hand construction rejected: too few players, non-positive blinds, a
    /// button seat out of range, or a chip-count list that doesn't match the
    /// player roster.
    #[error("invalid hand configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The deck ran out of cards. Only reachable via malformed test fixtures;
    /// a normal hand never deals more than 21 cards from a 52-card deck.
    #[error("deck exhausted: requested {requested} card(s), {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },

    /// An action was rejected: out of turn, wrong type for the current
    /// state, amount below the minimum raise, or amount exceeding the
    /// actor's stack. Rejection never partially mutates state.
    #[error("illegal action: {reason}")]
    IllegalAction { reason: String },

    /// Winners were queried before the hand reached a terminal state.
    #[error("hand has not completed")]
    HandNotComplete,

    /// A chip-conservation or other core invariant failed. This indicates a
    /// bug; it halts the hand and is never swallowed.
    #[error("invariant violation: {reason}")]
    InvariantViolation { reason: String },

    /// A card string (e.g. for test fixtures) did not parse.
    #[error("invalid card string: {0}")]
    InvalidCard(String),

    /// The evaluator was handed a `CardSet` whose popcount wasn't 7.
    #[error("evaluator requires exactly 7 cards, got {actual}")]
    WrongCardCount { actual: u32 },
}
