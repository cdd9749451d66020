use holdem_engine::cards::Card;
use holdem_engine::cards::CardSet;
use holdem_engine::deck::Deck;
use holdem_engine::events::Street;
use holdem_engine::hand_state::{ChipSetup, HandState};
use holdem_engine::player::Action;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn fixed_deck(known: &str) -> Deck {
    let mut cards = Card::parse_many(known).unwrap();
    let known_set = CardSet::from_cards(&cards);
    for c in holdem_engine::cards::full_deck() {
        if !known_set.contains(c) {
            cards.push(c);
        }
    }
    Deck::from_cards(cards)
}

#[test]
fn short_stack_blinds_post_correctly_and_go_all_in() {
    // seat 1 (small blind) has only 5 chips; seat 2 (big blind) has only 10.
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let hand = HandState::new(
        &mut rng,
        vec!["a".into(), "b".into(), "c".into()],
        ChipSetup::PerPlayer(vec![100, 5, 10]),
        0,
        5,
        10,
        None,
        1,
    )
    .unwrap();

    assert_eq!(hand.players()[1].bet, 5);
    assert!(hand.players()[1].all_in);
    assert_eq!(hand.players()[2].bet, 10);
    assert!(hand.players()[2].all_in);
    let total: u32 = hand.players().iter().map(|p| p.chips + p.bet).sum();
    assert_eq!(total, 115);
}

#[test]
fn deal_hand_progresses_streets_and_reaches_showdown() {
    let deck = fixed_deck("2c 2d 3c 3d 9h 9s 4c 4d 5c");
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut hand = HandState::new(
        &mut rng,
        vec!["a".into(), "b".into()],
        ChipSetup::Uniform(1000),
        0,
        5,
        10,
        Some(deck),
        4,
    )
    .unwrap();

    for _ in 0..32 {
        if hand.is_complete() {
            break;
        }
        let actor = hand.current_player().unwrap();
        let actions = hand.valid_actions();
        let can_call = actions
            .iter()
            .any(|(k, _, _)| matches!(k, holdem_engine::player::ActionKind::Call));
        let action = if can_call { Action::Call } else { Action::Check };
        hand.process_action(actor, action).unwrap();
    }

    assert!(hand.is_complete());
    assert_eq!(hand.current_street(), Street::Showdown);
    assert_eq!(hand.board().len(), 5);
    let winners = hand.get_winners().unwrap();
    assert!(!winners.is_empty());
}

#[test]
fn querying_winners_before_completion_is_an_error() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let hand = HandState::new(
        &mut rng,
        vec!["a".into(), "b".into()],
        ChipSetup::Uniform(1000),
        0,
        5,
        10,
        None,
        5,
    )
    .unwrap();
    assert!(hand.get_winners().is_err());
}

#[test]
fn force_fold_ends_the_hand_for_the_remaining_player() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mut hand = HandState::new(
        &mut rng,
        vec!["a".into(), "b".into(), "c".into()],
        ChipSetup::Uniform(200),
        0,
        5,
        10,
        None,
        6,
    )
    .unwrap();
    let first = hand.current_player().unwrap();
    hand.force_fold_seat(first).unwrap();
    let second = hand.current_player().unwrap();
    hand.force_fold_seat(second).unwrap();
    assert!(hand.is_complete());
    let total: u32 = hand.players().iter().map(|p| p.chips).sum();
    assert_eq!(total, 600);
}
