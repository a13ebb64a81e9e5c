use headsup_holdem::cards::{parse_cards, Card, Rank};
use headsup_holdem::evaluator::{best_of_seven, evaluate_five, Category};

fn five(s: &str) -> [Card; 5] {
    let v = parse_cards(s).unwrap();
    [v[0], v[1], v[2], v[3], v[4]]
}

fn category(s: &str) -> Category {
    evaluate_five(&five(s)).category
}

#[test]
fn every_category_is_detected() {
    assert_eq!(category("As Ks Qs Js Ts"), Category::StraightFlush);
    assert_eq!(category("9c 9d 9h 9s Ac"), Category::FourOfAKind);
    assert_eq!(category("3c 3d 3h Js Jc"), Category::FullHouse);
    assert_eq!(category("2h 7h 9h Jh Kh"), Category::Flush);
    assert_eq!(category("6c 7d 8h 9s Tc"), Category::Straight);
    assert_eq!(category("Qc Qd Qh 4s 2c"), Category::ThreeOfAKind);
    assert_eq!(category("5c 5d 8h 8s Ac"), Category::TwoPair);
    assert_eq!(category("Kc Kd 8h 4s 2c"), Category::Pair);
    assert_eq!(category("Ac Jd 8h 4s 2c"), Category::HighCard);
}

#[test]
fn quads_beat_full_house_from_seven_cards() {
    let cards = parse_cards("As Ah Ad Kc Ks 2c 7h").unwrap();
    let best = best_of_seven(&cards).unwrap();
    assert_eq!(best.category, Category::FourOfAKind);
    assert_eq!(best.tiebreakers, vec![Rank::Ace, Rank::King]);
}

#[test]
fn tiebreak_orders_per_category() {
    let flush = evaluate_five(&five("2h 7h 9h Jh Kh"));
    assert_eq!(flush.tiebreakers, vec![Rank::King, Rank::Jack, Rank::Nine, Rank::Seven, Rank::Two]);
    let pair = evaluate_five(&five("Kc Kd 8h 4s 2c"));
    assert_eq!(pair.tiebreakers, vec![Rank::King, Rank::Eight, Rank::Four, Rank::Two]);
    let sf = evaluate_five(&five("5d 4d 3d 2d Ad"));
    assert_eq!(sf.category, Category::StraightFlush);
    assert_eq!(sf.tiebreakers, vec![Rank::Five]);
}

#[test]
fn kickers_decide_within_a_category() {
    let a = evaluate_five(&five("Kc Kd 8h 4s 3c"));
    let b = evaluate_five(&five("Ks Kh 8c 4d 2c"));
    assert!(a > b);
    let c = evaluate_five(&five("Ks Kh 8c 4d 3s"));
    assert_eq!(a, c, "suits never break ties");
}

#[test]
fn board_plays_for_both_seats() {
    let board = "Ks Qh Jd Tc 9c";
    let x = best_of_seven(&parse_cards(&format!("2c 3d {board}")).unwrap()).unwrap();
    let y = best_of_seven(&parse_cards(&format!("2d 4s {board}")).unwrap()).unwrap();
    assert_eq!(x.category, Category::Straight);
    assert_eq!(x.score(), y.score());
}
