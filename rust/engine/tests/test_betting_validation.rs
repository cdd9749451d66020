use holdem_engine::betting::BettingRound;
use holdem_engine::errors::GameError;
use holdem_engine::player::{Action, ActionKind, Player};

fn three_players(chips: [u32; 3]) -> Vec<Player> {
    (0..3).map(|i| Player::new(i, format!("p{i}"), chips[i])).collect()
}

#[test]
fn valid_actions_exclude_raise_when_stack_cant_cover_min_raise() {
    let mut players = three_players([1000, 25, 1000]);
    let mut round = BettingRound::new(3, 10, true, 1);
    round.process_action(0, &mut players, Action::Raise(30)).unwrap();
    // seat 1 has only 25 chips; a legal raise needs a total of at least 50.
    let actions = round.valid_actions(1, &players);
    assert!(!actions.iter().any(|(k, _, _)| *k == ActionKind::Raise));
    assert!(actions.iter().any(|(k, _, _)| *k == ActionKind::AllIn));
}

#[test]
fn call_for_exactly_the_stack_must_be_submitted_as_allin() {
    let mut players = three_players([1000, 30, 1000]);
    let mut round = BettingRound::new(3, 10, true, 1);
    round.process_action(0, &mut players, Action::Raise(30)).unwrap();
    let err = round.process_action(1, &mut players, Action::Call).unwrap_err();
    assert!(matches!(err, GameError::IllegalAction { .. }));
    round.process_action(1, &mut players, Action::AllIn).unwrap();
    assert!(players[1].all_in);
    assert_eq!(players[1].bet, 30);
}

#[test]
fn check_facing_a_bet_is_rejected_without_mutating_state() {
    let mut players = three_players([1000, 1000, 1000]);
    let mut round = BettingRound::new(3, 10, true, 1);
    round.process_action(0, &mut players, Action::Raise(30)).unwrap();
    let before = players[1].clone();
    let err = round.process_action(1, &mut players, Action::Check).unwrap_err();
    assert!(matches!(err, GameError::IllegalAction { .. }));
    assert_eq!(players[1].bet, before.bet);
    assert_eq!(players[1].chips, before.chips);
}

#[test]
fn raise_below_minimum_is_rejected() {
    let mut players = three_players([1000, 1000, 1000]);
    let mut round = BettingRound::new(3, 10, true, 1);
    round.process_action(0, &mut players, Action::Raise(30)).unwrap();
    // min_raise is 20 (30 - current_bet 10), so the smallest legal raise total is 50.
    let err = round.process_action(1, &mut players, Action::Raise(40)).unwrap_err();
    assert!(matches!(err, GameError::IllegalAction { .. }));
}

#[test]
fn acting_folded_or_all_in_seat_is_rejected() {
    let mut players = three_players([1000, 1000, 1000]);
    let mut round = BettingRound::new(3, 10, true, 1);
    round.process_action(0, &mut players, Action::Fold).unwrap();
    let err = round.process_action(0, &mut players, Action::Check).unwrap_err();
    assert!(matches!(err, GameError::IllegalAction { .. }));
}
