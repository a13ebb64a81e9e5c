use headsup_holdem::cards::{parse_cards, Card};
use headsup_holdem::game::{Action, Stage};
use headsup_holdem::policy::{decide, postflop_strength, preflop_grade, Opponent, Situation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn hole(s: &str) -> [Card; 2] {
    let v = parse_cards(s).unwrap();
    [v[0], v[1]]
}

fn at<'a>(stage: Stage, h: &str, board: &'a [Card], to_call: u64, pot: u64) -> Situation<'a> {
    Situation {
        stage,
        hole: hole(h),
        board,
        to_call,
        pot,
        raise_available: true,
        big_blind: 20,
        stack: 980,
    }
}

fn frequency(s: &Situation<'_>, want: impl Fn(Action) -> bool) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let n = 2000;
    let hits = (0..n).filter(|_| want(decide(s, &mut rng))).count();
    hits as f64 / n as f64
}

#[test]
fn premium_pair_raises_about_forty_percent_when_facing_a_bet() {
    let s = at(Stage::Preflop, "Kh Kd", &[], 10, 30);
    let raises = frequency(&s, |a| a == Action::Raise(10 + 20 * 4));
    assert!((0.34..0.46).contains(&raises), "raise rate {raises}");
    let folds = frequency(&s, |a| a == Action::Fold);
    assert_eq!(folds, 0.0);
}

#[test]
fn trash_mostly_folds_to_a_raise() {
    let s = at(Stage::Preflop, "7c 2d", &[], 60, 100);
    let calls = frequency(&s, |a| a == Action::Call);
    assert!((0.15..0.25).contains(&calls), "loose call rate {calls}");
}

#[test]
fn marginal_hand_calls_small_preflop_raises_only() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    // grade 1: unsuited connector with a ten
    assert_eq!(preflop_grade(hole("Td 9c")), 1);
    let cheap = at(Stage::Preflop, "Td 9c", &[], 50, 90);
    assert_eq!(decide(&cheap, &mut rng), Action::Call);
    let dear = at(Stage::Preflop, "Td 9c", &[], 51, 90);
    assert!(matches!(decide(&dear, &mut rng), Action::Call | Action::Fold));
}

#[test]
fn made_hands_bet_sized_from_the_pot() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let board = parse_cards("9h 8h 2h").unwrap();
    // flush on the flop: 60% of the pot
    let s = at(Stage::Flop, "Ah 3h", &board, 0, 100);
    assert_eq!(postflop_strength(s.hole, &board), 3);
    assert_eq!(decide(&s, &mut rng), Action::Bet(60));
    // small pots fall back to two big blinds
    let s = at(Stage::Flop, "Ah 3h", &board, 0, 40);
    assert_eq!(decide(&s, &mut rng), Action::Bet(40));
}

#[test]
fn checks_when_the_raise_is_gone() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let board = parse_cards("9h 8h 2h").unwrap();
    let mut s = at(Stage::Flop, "Ah 3h", &board, 0, 100);
    s.raise_available = false;
    assert_eq!(decide(&s, &mut rng), Action::Check);
}

#[test]
fn trips_facing_a_big_bet_rarely_continue() {
    let board = parse_cards("9h 9c 2d 5s").unwrap();
    let s = at(Stage::Turn, "9d 3c", &board, 300, 400);
    let calls = frequency(&s, |a| a == Action::Call);
    assert!((0.1..0.2).contains(&calls), "call rate {calls}");
    let small = at(Stage::Turn, "9d 3c", &board, 60, 400);
    assert_eq!(frequency(&small, |a| a == Action::Call), 1.0);
}

#[test]
fn opponent_replays_with_the_same_seed() {
    let board = parse_cards("9h 8h 2c").unwrap();
    let s = at(Stage::Flop, "Kc 9d", &board, 100, 200);
    let mut a = Opponent::new(Some(99));
    let mut b = Opponent::new(Some(99));
    for _ in 0..64 {
        assert_eq!(a.decide(&s), b.decide(&s));
    }
}
