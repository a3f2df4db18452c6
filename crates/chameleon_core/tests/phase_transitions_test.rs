//! Tests for the phase transition table and its guards.

use chameleon_core::{
    Action, ActionKind, BoardItem, GameController, GameError, GameMode, Phase, Rarity,
    ResolutionStyle, RoundOptions,
};

fn items() -> Vec<BoardItem> {
    (0..16)
        .map(|i| BoardItem::new(format!("Card {i}"), Rarity::Common, 2))
        .collect()
}

fn with_players(seed: u64, count: usize) -> GameController {
    let mut game = GameController::seeded(seed);
    for i in 0..count {
        game.add_player(&format!("Player {i}")).unwrap();
    }
    game
}

/// Drives a fresh three-player game to `target`.
fn game_in(target: Phase, options: RoundOptions) -> GameController {
    let mut game = with_players(7, 3);
    if target == Phase::Setup {
        return game;
    }
    game.start_game(options).unwrap();
    if target == Phase::LoadingBoard {
        return game;
    }
    game.content_ready(items()).unwrap();
    if target == Phase::RevealInterstitial {
        return game;
    }
    game.reveal_role().unwrap();
    if target == Phase::RevealInfo {
        return game;
    }
    while game.phase().is_revealing() {
        if game.phase() == Phase::RevealInterstitial {
            game.reveal_role().unwrap();
        }
        game.finish_reveal().unwrap();
    }
    if target == Phase::Playing {
        return game;
    }
    game.start_voting().unwrap();
    if target == Phase::Voting {
        return game;
    }
    game.apply(Action::CastVote { caught: true }).unwrap();
    assert_eq!(game.phase(), Phase::GameOver);
    game
}

const ALL_PHASES: [Phase; 7] = [
    Phase::Setup,
    Phase::LoadingBoard,
    Phase::RevealInterstitial,
    Phase::RevealInfo,
    Phase::Playing,
    Phase::Voting,
    Phase::GameOver,
];

#[test]
fn test_start_with_two_players_rejected() {
    let mut game = with_players(1, 2);
    let result = game.start_game(RoundOptions::default());
    assert_eq!(
        result,
        Err(GameError::InsufficientPlayers {
            count: 2,
            required: 3
        })
    );
    assert_eq!(game.phase(), Phase::Setup);
}

#[test]
fn test_ten_items_board_unavailable() {
    let mut game = with_players(1, 3);
    game.start_game(RoundOptions::default()).unwrap();
    let short: Vec<_> = items().into_iter().take(10).collect();

    let result = game.content_ready(short);
    assert!(matches!(result, Err(GameError::BoardUnavailable(_))));
    assert_eq!(game.phase(), Phase::Setup);
    assert!(game.state().board().is_none());
    assert!(game.state().secret_item().is_none());
}

#[test]
fn test_duplicate_names_do_not_count_toward_board() {
    let mut game = with_players(1, 3);
    game.start_game(RoundOptions::default()).unwrap();
    let mut dupes = items();
    dupes.truncate(15);
    dupes.push(BoardItem::new("Card 0", Rarity::Epic, 5));

    assert!(matches!(
        game.content_ready(dupes),
        Err(GameError::BoardUnavailable(_))
    ));
}

#[test]
fn test_content_failed_returns_to_setup() {
    let mut game = with_players(1, 3);
    game.start_game(RoundOptions::default()).unwrap();
    let result = game.apply(Action::ContentFailed("timeout".into()));
    assert_eq!(result, Err(GameError::BoardUnavailable("timeout".into())));
    assert_eq!(game.phase(), Phase::Setup);
}

#[test]
fn test_roster_locked_while_loading() {
    let mut game = game_in(Phase::LoadingBoard, RoundOptions::default());
    let id = *game.state().players()[0].id();

    assert_eq!(
        game.add_player("Late"),
        Err(GameError::InvalidTransition {
            phase: Phase::LoadingBoard,
            action: ActionKind::AddPlayer
        })
    );
    assert!(game.remove_player(id).is_err());
    assert_eq!(game.state().players().len(), 3);
}

#[test]
fn test_blank_name_rejected() {
    let mut game = GameController::seeded(1);
    assert_eq!(game.add_player("   "), Err(GameError::EmptyName));
    assert!(game.state().players().is_empty());
}

#[test]
fn test_names_trimmed_and_ids_unique() {
    let mut game = GameController::seeded(1);
    let a = game.add_player("  Ada ").unwrap();
    let b = game.add_player("Ada").unwrap();
    assert_ne!(a, b);
    assert_eq!(game.state().player(a).unwrap().name(), "Ada");
}

#[test]
fn test_removed_id_not_reused() {
    let mut game = GameController::seeded(1);
    let a = game.add_player("A").unwrap();
    game.remove_player(a).unwrap();
    let b = game.add_player("B").unwrap();
    assert_ne!(a, b);
    assert!(matches!(
        game.remove_player(a),
        Err(GameError::UnknownPlayer(_))
    ));
}

#[test]
fn test_reset_accepted_from_every_phase() {
    for phase in ALL_PHASES {
        let mut game = game_in(phase, RoundOptions::default());
        assert_eq!(game.apply(Action::Reset), Ok(Phase::Setup), "from {phase}");
        assert_eq!(game.state().players().len(), 3);
        assert!(game.state().board().is_none());
        assert!(game.state().secret_item().is_none());
        assert!(game.state().starter_player_id().is_none());
        assert_eq!(game.state().chameleon_count(), 0);
        assert_eq!(*game.state().round(), 0);
    }
}

#[test]
fn test_reset_is_idempotent() {
    let mut game = game_in(Phase::GameOver, RoundOptions::default());
    game.reset();
    let once = game.state().clone();
    game.reset();
    assert_eq!(game.state(), &once);
}

#[test]
fn test_content_after_reset_rejected() {
    let mut game = game_in(Phase::LoadingBoard, RoundOptions::default());
    game.reset();
    assert_eq!(
        game.content_ready(items()),
        Err(GameError::InvalidTransition {
            phase: Phase::Setup,
            action: ActionKind::ContentReady
        })
    );
    assert!(game.content_failed("late").is_err());
    assert_eq!(game.phase(), Phase::Setup);
}

#[test]
fn test_invalid_events_leave_state_untouched() {
    let probes = [
        Action::StartVoting,
        Action::Reveal,
        Action::FinishReveal,
        Action::BackToBoard,
        Action::PlayAgain,
        Action::CastVote { caught: false },
    ];
    for phase in ALL_PHASES {
        let mut game = game_in(phase, RoundOptions::default());
        for probe in probes.clone() {
            let before = game.state().clone();
            let kind = ActionKind::from(&probe);
            if game.apply(probe).is_err() {
                assert_eq!(game.state(), &before, "{kind} during {phase}");
            } else {
                // Accepted: restore the phase under test.
                game = game_in(phase, RoundOptions::default());
            }
        }
    }
}

#[test]
fn test_back_to_board_then_vote_again() {
    let mut game = game_in(Phase::Voting, RoundOptions::default());
    assert_eq!(game.back_to_board(), Ok(Phase::Playing));
    assert_eq!(game.start_voting(), Ok(Phase::Voting));
}

#[test]
fn test_resolution_defaults_follow_mode() {
    let mut game = game_in(
        Phase::Voting,
        RoundOptions::new(GameMode::Impostor),
    );
    assert!(game.cast_vote(true).is_err());
    assert_eq!(game.reveal_chameleon(), Ok(Phase::GameOver));

    let mut game = game_in(
        Phase::Voting,
        RoundOptions::new(GameMode::Impostor).with_resolution(ResolutionStyle::Accusation),
    );
    assert_eq!(game.cast_vote(false), Ok(Phase::GameOver));
}

#[test]
fn test_private_queries_gated_by_phase() {
    let game = game_in(Phase::RevealInterstitial, RoundOptions::default());
    assert!(game.reveal().is_none());
    assert!(game.chameleon().is_none());
    assert!(game.current_player().is_some());

    let game = game_in(Phase::RevealInfo, RoundOptions::default());
    assert!(game.reveal().is_some());

    let game = game_in(Phase::Playing, RoundOptions::default());
    assert!(game.reveal().is_none());
    assert!(game.current_player().is_none());
    assert!(game.starter().is_some());
}
