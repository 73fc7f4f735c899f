//! Tests for the turn/outcome state machine.

use tictactoe_engine::{
    Coord, Dimension, Game, GameError, IllegalMove, Marker, MoveAction, MoveLog, Outcome,
};

#[test]
fn test_moves_strictly_alternate() {
    let mut game = Game::new(Dimension::TwoD);
    game.submit(Marker::X, Coord::plane(0, 0)).unwrap();
    assert_eq!(
        game.submit(Marker::X, Coord::plane(0, 1)),
        Err(GameError::NotYourTurn(Marker::X))
    );
    game.submit(Marker::O, Coord::plane(0, 1)).unwrap();
    assert_eq!(game.to_move(), Marker::X);
}

#[test]
fn test_rejections_do_not_advance_state() {
    let mut game = Game::new(Dimension::TwoD);
    game.submit(Marker::X, Coord::plane(1, 1)).unwrap();
    assert_eq!(
        game.submit(Marker::O, Coord::plane(1, 1)),
        Err(GameError::Illegal(IllegalMove::CellOccupied(Marker::X)))
    );
    assert_eq!(
        game.submit(Marker::O, Coord::plane(0, 3)),
        Err(GameError::Illegal(IllegalMove::OutOfBounds))
    );
    assert_eq!(game.to_move(), Marker::O);
    assert_eq!(game.log().len(), 1);
}

#[test]
fn test_win_ends_the_game() {
    let mut game = Game::new(Dimension::TwoD);
    game.submit(Marker::X, Coord::plane(0, 0)).unwrap();
    game.submit(Marker::O, Coord::plane(1, 0)).unwrap();
    game.submit(Marker::X, Coord::plane(0, 1)).unwrap();
    game.submit(Marker::O, Coord::plane(1, 1)).unwrap();
    assert_eq!(
        game.submit(Marker::X, Coord::plane(0, 2)),
        Ok(Outcome::Won(Marker::X))
    );
    assert_eq!(game.outcome(), Outcome::Won(Marker::X));
    assert_eq!(
        game.submit(Marker::O, Coord::plane(2, 2)),
        Err(GameError::AlreadyFinished)
    );
    assert_eq!(game.resign(Marker::O), Err(GameError::AlreadyFinished));
}

#[test]
fn test_full_game_reaches_tie() {
    let mut game = Game::new(Dimension::TwoD);
    let script = [
        (Marker::X, 0, 0), (Marker::O, 0, 1), (Marker::X, 0, 2),
        (Marker::O, 1, 1), (Marker::X, 1, 0), (Marker::O, 1, 2),
        (Marker::X, 2, 1), (Marker::O, 2, 0),
    ];
    for (marker, x, y) in script {
        assert_eq!(game.submit(marker, Coord::plane(x, y)), Ok(Outcome::InProgress));
    }
    assert_eq!(game.submit(Marker::X, Coord::plane(2, 2)), Ok(Outcome::Tie));
}

#[test]
fn test_resignation_keeps_the_grid() {
    let mut game = Game::starting(Dimension::ThreeD, Marker::O);
    game.submit(Marker::O, Coord::cube(0, 0, 0)).unwrap();
    game.submit(Marker::X, Coord::cube(1, 1, 1)).unwrap();
    let before = game.board().clone();

    assert_eq!(game.resign(Marker::O), Ok(Outcome::Resigned(Marker::O)));
    assert_eq!(game.board(), &before);
    assert_eq!(game.outcome(), Outcome::Resigned(Marker::O));

    let last = game.log().entries().last().unwrap();
    assert_eq!(last.position(), MoveAction::Resign);
    assert_eq!(last.player(), Marker::O);
}

#[test]
fn test_log_replays_to_the_same_board() {
    let mut game = Game::new(Dimension::ThreeD);
    let script = [
        (Marker::X, 0, 0, 0), (Marker::O, 1, 2, 3), (Marker::X, 3, 3, 3),
        (Marker::O, 2, 1, 0), (Marker::X, 0, 1, 2),
    ];
    for (marker, x, y, z) in script {
        game.submit(marker, Coord::cube(x, y, z)).unwrap();
    }
    let board = game.log().replay(Dimension::ThreeD).unwrap();
    assert_eq!(&board, game.board());
}

#[test]
fn test_game_replay_restores_full_state() {
    let mut game = Game::starting(Dimension::TwoD, Marker::O);
    game.submit(Marker::O, Coord::plane(1, 1)).unwrap();
    game.submit(Marker::X, Coord::plane(0, 2)).unwrap();
    game.resign(Marker::X).unwrap();

    let replayed = Game::replay(Dimension::TwoD, game.log()).unwrap();
    assert_eq!(replayed, game);
    assert_eq!(replayed.outcome(), Outcome::Resigned(Marker::X));
}

#[test]
fn test_game_survives_serialization() {
    let mut game = Game::new(Dimension::TwoD);
    game.submit(Marker::X, Coord::plane(2, 0)).unwrap();
    let json = serde_json::to_string(&game).unwrap();
    let back: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game);
}

#[test]
fn test_log_wire_format() {
    let mut game = Game::new(Dimension::TwoD);
    game.submit(Marker::X, Coord::plane(0, 1)).unwrap();
    game.resign(Marker::O).unwrap();

    let json = serde_json::to_value(game.log()).unwrap();
    assert_eq!(json[0]["player"], serde_json::json!("X"));
    assert_eq!(json[0]["position"], serde_json::json!([0, 1]));
    assert_eq!(json[1]["position"], serde_json::json!("RESIGN"));

    let back: MoveLog = serde_json::from_value(json).unwrap();
    assert_eq!(&back, game.log());
}
