use std::collections::{BTreeSet, HashMap};

use holdem_engine::player::Player;
use holdem_engine::pot::PotManager;

fn all_in_player(seat: usize, total_bet: u32, folded: bool) -> Player {
    let mut p = Player::new(seat, format!("p{seat}"), 0);
    p.total_bet = total_bet;
    p.all_in = true;
    p.folded = folded;
    p
}

#[test]
fn equal_all_in_stacks_produce_a_single_pot() {
    let players = vec![all_in_player(0, 1000, false), all_in_player(1, 1000, false)];
    let mut pm = PotManager::new(0..2);
    pm.calculate_side_pots(&players);
    assert_eq!(pm.pots().len(), 1);
    assert_eq!(pm.pots()[0].amount, 2000);
    assert_eq!(pm.pots()[0].eligible, BTreeSet::from([0, 1]));
}

#[test]
fn uneven_heads_up_all_in_builds_a_capped_pot_and_a_refund_pot() {
    // short stack all-in for 500, covering stack contributes 1000 total.
    let mut players = vec![all_in_player(0, 500, false), Player::new(1, "b", 0)];
    players[1].total_bet = 1000;
    let mut pm = PotManager::new(0..2);
    pm.calculate_side_pots(&players);
    let amounts: Vec<u32> = pm.pots().iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![1000, 500]);
    assert_eq!(pm.pots()[0].eligible, BTreeSet::from([0, 1]));
    assert_eq!(pm.pots()[1].eligible, BTreeSet::from([1]));
}

#[test]
fn side_pot_sum_equals_total_contributed_even_with_a_fold() {
    let players = vec![
        all_in_player(0, 50, false),
        all_in_player(1, 1000, false),
        all_in_player(2, 160, true),
        all_in_player(3, 300, false),
    ];
    let mut pm = PotManager::new(0..4);
    pm.calculate_side_pots(&players);
    let sum: u32 = pm.pots().iter().map(|p| p.amount).sum();
    let expected: u32 = players.iter().map(|p| p.total_bet).sum();
    assert_eq!(sum, expected);
    // the folded seat's contribution stays in the pots it fed but it wins nothing.
    assert!(pm.pots().iter().all(|p| !p.eligible.contains(&2)));
}

#[test]
fn distribute_splits_evenly_and_collapses_pots_to_zero() {
    let mut players = vec![
        Player::new(0, "a", 0),
        Player::new(1, "b", 0),
        Player::new(2, "c", 0),
    ];
    players[0].bet = 30;
    players[1].bet = 30;
    players[2].bet = 30;
    let mut pm = PotManager::new(0..3);
    pm.collect_bets(&mut players);
    assert_eq!(pm.pots()[0].amount, 90);

    let mut ranks = HashMap::new();
    ranks.insert(0, 500);
    ranks.insert(1, 500);
    ranks.insert(2, 100);
    let winners = pm.distribute(&mut players, &ranks, 0, 3);
    assert_eq!(winners, vec![vec![0, 1]]);
    assert_eq!(players[0].chips, 45);
    assert_eq!(players[1].chips, 45);
    assert_eq!(players[2].chips, 0);
    assert_eq!(pm.pots()[0].amount, 0);
}
