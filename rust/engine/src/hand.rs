use crate::cards::CardSet;
use crate::errors::GameError;

/// Hand categories in strictly increasing poker precedence. Royal Flush is
/// not a distinct category; it is simply the Ace-high `StraightFlush`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl Category {
    fn from_u32(v: u32) -> Category {
        match v {
            0 => Category::HighCard,
            1 => Category::Pair,
            2 => Category::TwoPair,
            3 => Category::Trips,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::Quads,
            _ => Category::StraightFlush,
        }
    }
}

/// An opaque totally-ordered score: the top nibble (bits 20..23) encodes
/// [`Category`], and five 4-bit fields below it encode up to five kickers in
/// descending-rank order, so `HandRank` comparison via plain integer `>` is
/// poker precedence. Rank values (2..=14) fit a 4-bit field.
pub type HandRank = u32;

fn pack(category: Category, kickers: [u8; 5]) -> HandRank {
    let mut r = (category as u32) << 20;
    for (i, &k) in kickers.iter().enumerate() {
        r |= (k as u32) << (16 - 4 * i as u32);
    }
    r
}

/// Extracts the hand category from a [`HandRank`] produced by [`evaluate7`].
pub fn category(r: HandRank) -> Category {
    Category::from_u32((r >> 20) & 0xF)
}

/// Total order on [`HandRank`]: `-1`, `0`, or `+1` exactly like
/// [`std::cmp::Ordering`] collapsed to an integer, since callers compare
/// poker hands across language-neutral interfaces.
pub fn compare(a: HandRank, b: HandRank) -> i8 {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Evaluates the best 5-card hand contained in a 7-card [`CardSet`].
///
/// `cards` must have popcount exactly 7 (2 hole cards + 5 board cards); any
/// other popcount is a caller bug and returns [`GameError::WrongCardCount`]
/// rather than panicking.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::{Card, CardSet};
/// use holdem_engine::hand::{category, evaluate7, Category};
///
/// let cards = CardSet::from_cards(&Card::parse_many("Ah Kh Qh Jh Th 2c 3d").unwrap());
/// let rank = evaluate7(cards).unwrap();
/// assert_eq!(category(rank), Category::StraightFlush);
/// ```
pub fn evaluate7(cards: CardSet) -> Result<HandRank, GameError> {
    if cards.len() != 7 {
        return Err(GameError::WrongCardCount {
            actual: cards.len(),
        });
    }

    let rank_counts = rank_counts(cards);
    let suit_masks = suit_masks(cards);
    let rank_mask = suit_masks.iter().fold(0u16, |acc, m| acc | m);

    // Flush test, and straight flush on the flush suit's 13-bit rank mask.
    let flush_suit = suit_masks
        .iter()
        .position(|m| m.count_ones() >= 5);
    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(suit_masks[s]) {
            return Ok(pack(Category::StraightFlush, [high, 0, 0, 0, 0]));
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return Ok(pack(Category::Quads, [quad, kicker, 0, 0, 0]));
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return Ok(pack(Category::FullHouse, [trip, pair, 0, 0, 0]));
    }

    if let Some(s) = flush_suit {
        let mut ranks: Vec<u8> = (2..=14u8)
            .filter(|&r| (suit_masks[s] & (1 << r)) != 0)
            .collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return Ok(pack(Category::Flush, k));
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return Ok(pack(Category::Straight, [high, 0, 0, 0, 0]));
    }

    let (trip_ranks, pair_ranks, singles) = classify_multiples(&rank_counts);
    if let Some(t) = trip_ranks.first().copied() {
        let mut remain: Vec<u8> = pair_ranks.iter().chain(singles.iter()).copied().collect();
        remain.sort_unstable_by(|a, b| b.cmp(a));
        let k = [t, *remain.first().unwrap_or(&0), *remain.get(1).unwrap_or(&0), 0, 0];
        return Ok(pack(Category::Trips, k));
    }
    if pair_ranks.len() >= 2 {
        let mut prs = pair_ranks.clone();
        prs.sort_unstable_by(|a, b| b.cmp(a));
        // The kicker pool is everything outside the top two pairs: a third
        // pair (e.g. AA KK QQ) contributes its rank as a kicker same as any
        // unpaired card would.
        let mut rest: Vec<u8> = prs[2..].iter().chain(singles.iter()).copied().collect();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        let k = [prs[0], prs[1], *rest.first().unwrap_or(&0), 0, 0];
        return Ok(pack(Category::TwoPair, k));
    }
    if let Some(p) = pair_ranks.first().copied() {
        let mut rest = singles.clone();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [p, 0, 0, 0, 0];
        for i in 0..3 {
            k[i + 1] = *rest.get(i).unwrap_or(&0);
        }
        return Ok(pack(Category::Pair, k));
    }

    let mut highs = singles;
    highs.sort_unstable_by(|a, b| b.cmp(a));
    let mut k = [0u8; 5];
    for (i, item) in k.iter_mut().enumerate() {
        *item = *highs.get(i).unwrap_or(&0);
    }
    Ok(pack(Category::HighCard, k))
}

fn rank_counts(cards: CardSet) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for card in cards.to_cards() {
        counts[card.rank.index() as usize + 2] += 1;
    }
    counts
}

fn suit_masks(cards: CardSet) -> [u16; 4] {
    let mut masks = [0u16; 4];
    for card in cards.to_cards() {
        masks[card.suit.index() as usize] |= 1u16 << (card.rank.index() + 2);
    }
    masks
}

/// Finds the high card of the best straight in a 13-value rank-presence
/// bitmask (bits 2..=14). The ace-low wheel (A-2-3-4-5) is detected by
/// mirroring the Ace bit below Two; its high card is 5, ranking below any
/// 6-high straight.
fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u16).rev() {
        let window = (1u16 << (high - 4))
            | (1 << (high - 3))
            | (1 << (high - 2))
            | (1 << (high - 1))
            | (1 << high);
        if (m & window) == window {
            return Some(high as u8);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips = vec![];
    let mut pairs = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    if trips.is_empty() {
        return None;
    }
    if trips.len() >= 2 {
        return Some((trips[0], trips[1]));
    }
    pairs.first().map(|&p| (trips[0], p))
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in 2..=14u8 {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
