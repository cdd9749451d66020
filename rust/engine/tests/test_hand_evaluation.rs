use holdem_engine::cards::{Card, CardSet};
use holdem_engine::hand::{category, evaluate7, Category};

fn cs(s: &str) -> CardSet {
    CardSet::from_cards(&Card::parse_many(s).unwrap())
}

#[test]
fn flush_outranks_straight() {
    let straight = evaluate7(cs("5h 6c 7d 8s 9h 2c 3d")).unwrap();
    let flush = evaluate7(cs("2h 5h 8h Jh Kh 3c 4d")).unwrap();
    assert_eq!(category(straight), Category::Straight);
    assert_eq!(category(flush), Category::Flush);
    assert!(flush > straight);
}

#[test]
fn full_house_outranks_flush() {
    let flush = evaluate7(cs("2h 5h 8h Jh Kh 3c 4d")).unwrap();
    let full_house = evaluate7(cs("Kc Kd Kh Qc Qd 2h 3s")).unwrap();
    assert!(full_house > flush);
}

#[test]
fn two_pair_beats_one_pair_with_a_higher_top_pair_as_tiebreak() {
    let aces_up = evaluate7(cs("Ah As Kc Kd 2h 3c 9d")).unwrap();
    let kings_up = evaluate7(cs("Kh Ks Qc Qd 2h 3c 9d")).unwrap();
    assert_eq!(category(aces_up), Category::TwoPair);
    assert!(aces_up > kings_up);
}

#[test]
fn kicker_breaks_ties_down_to_the_fifth_card() {
    let better_kicker = evaluate7(cs("Ah Kc Qd Jc 9h 2s 3d")).unwrap();
    let worse_kicker = evaluate7(cs("Ah Kc Qd Jc 8h 2s 3d")).unwrap();
    assert_eq!(category(better_kicker), Category::HighCard);
    assert_eq!(category(worse_kicker), Category::HighCard);
    assert!(better_kicker > worse_kicker);
}

#[test]
fn wheel_loses_to_broadway() {
    let wheel = evaluate7(cs("Ah 2c 3d 4s 5h 9c 9d")).unwrap();
    let broadway = evaluate7(cs("Ah Kc Qd Jc Th 2s 3d")).unwrap();
    assert!(broadway > wheel);
}

#[test]
fn identical_seven_card_sets_compare_equal() {
    let a = evaluate7(cs("Ah Ac Kh Kc Qh Qc Jh")).unwrap();
    let b = evaluate7(cs("Ah Ac Kh Kc Qh Qc Jh")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn three_pair_shape_uses_the_third_pair_as_the_two_pair_kicker() {
    // AA/KK/QQ + 5d: the best hand is A-A K-K with kicker Q, not 5 — the
    // third pair's rank is a kicker candidate same as any unpaired card.
    let r = evaluate7(cs("Ah Ac Kh Kc Qh Qc 5d")).unwrap();
    assert_eq!(category(r), Category::TwoPair);
    assert_eq!((r >> 16) & 0xF, 14); // top pair: aces
    assert_eq!((r >> 12) & 0xF, 13); // second pair: kings
    assert_eq!((r >> 8) & 0xF, 12); // kicker: queen, not the 5
}
