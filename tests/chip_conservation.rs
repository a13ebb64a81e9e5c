use headsup_holdem::config::TableConfig;
use headsup_holdem::game::{Action, Game, Progress, Stage};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy)]
enum Choice {
    Fold,
    Passive,
    Raise(u64),
}

fn choice() -> impl Strategy<Value = Choice> {
    prop_oneof![
        1 => Just(Choice::Fold),
        6 => Just(Choice::Passive),
        3 => (1u64..1200).prop_map(Choice::Raise),
    ]
}

fn to_action(game: &Game, seat: usize, choice: Choice) -> Action {
    let passive = if game.to_call(seat) > 0 { Action::Call } else { Action::Check };
    match choice {
        Choice::Fold => Action::Fold,
        Choice::Passive => passive,
        Choice::Raise(amount) if game.raise_bounds().is_some() => Action::Raise(amount),
        Choice::Raise(_) => passive,
    }
}

/// Play one hand to `HandOver`, checking the chip total after every step.
fn play_hand(game: &mut Game, rng: &mut ChaCha8Rng, choices: &mut impl Iterator<Item = Choice>) {
    let mut progress = game.start_hand(rng).unwrap();
    let total = game.chips_in_play();
    loop {
        progress = match progress {
            Progress::Await(seat) => {
                let choice = choices.next().unwrap_or(Choice::Passive);
                let action = to_action(game, seat, choice);
                game.act(seat, action).unwrap()
            }
            Progress::RoundComplete | Progress::Showdown => game.advance().unwrap(),
            _ => break,
        };
        if game.stage() != Stage::HandOver {
            assert_eq!(game.chips_in_play(), total);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn chips_are_conserved_across_hands(
        seed in any::<u64>(),
        choices in prop::collection::vec(choice(), 0..200),
    ) {
        let mut game = Game::new(TableConfig::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut choices = choices.into_iter();
        for _ in 0..8 {
            if game.busted_seat().is_some() {
                break;
            }
            play_hand(&mut game, &mut rng, &mut choices);
            let stacks: u64 = game.seats().iter().map(|s| s.chips()).sum();
            prop_assert_eq!(stacks + game.unassigned_chips(), 2000);
            prop_assert_eq!(game.pot(), 0);
        }
    }
}
