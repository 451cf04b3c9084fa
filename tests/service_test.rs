//! Tests for the session service: lifecycle, terminal removal and locking.

use std::sync::Arc;
use std::time::Duration;
use strictly_chat_games::{DamesService, ManualClock, ServiceError, SessionStore};
use strictly_dames::{Board, Cell, Color, Coord, Game, GameStatus, Piece, Rejection};

fn service() -> (DamesService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let store = SessionStore::new(clock.clone());
    (DamesService::new(store), clock)
}

fn at(s: &str) -> Coord {
    s.parse().expect("Valid coordinate")
}

fn xy(s: &str) -> (i32, i32) {
    at(s).into()
}

/// Light man on E6 facing a lone Dark man on D5.
fn last_capture_game() -> Game {
    let mut board = Board::empty();
    board.place(at("E6"), Cell::Occupied(Piece::man(Color::Light)));
    board.place(at("D5"), Cell::Occupied(Piece::man(Color::Dark)));
    Game::from_position(board, Color::Light).expect("Valid position")
}

#[test]
fn test_start_reports_opening_position() {
    let (service, _) = service();
    let report = service.start("chat");
    assert_eq!(report.session_id, "chat");
    assert_eq!(report.turn, Color::Light);
    assert_eq!(report.board, Board::new());
}

#[test]
fn test_simple_move() {
    let (service, _) = service();
    service.start("chat");

    let report = service
        .play_move("chat", xy("A6"), xy("B5"))
        .expect("Opening move is legal");
    assert_eq!(report.mover, Color::Light);
    assert_eq!(report.turn, Color::Dark);
    assert_eq!(report.status, GameStatus::InProgress);
    assert_eq!(report.captured, None);
    assert!(!report.promoted);
    assert_eq!(report.board.piece(at("B5")), Some(Piece::man(Color::Light)));
}

#[test]
fn test_dark_piece_on_lights_turn() {
    let (service, _) = service();
    service.start("chat");
    assert_eq!(
        service.play_move("chat", xy("B3"), xy("A4")),
        Err(ServiceError::IllegalMove(Rejection::WrongTurn))
    );
    assert_eq!(
        service.play_move("chat", xy("C4"), xy("D5")),
        Err(ServiceError::IllegalMove(Rejection::NoPiece))
    );
}

#[test]
fn test_elimination_closes_session() {
    let (service, _) = service();
    service.store().start_with("chat", last_capture_game());

    let report = service
        .play_move("chat", xy("E6"), xy("C4"))
        .expect("Capture is legal");
    assert_eq!(report.status, GameStatus::Won(Color::Light));
    assert_eq!(report.turn, Color::Light);
    assert_eq!(report.captured, Some(at("D5")));
    assert!(report.is_terminal());

    assert_eq!(service.inspect("chat"), Err(ServiceError::NoActiveSession));
    assert_eq!(
        service.play_move("chat", xy("C4"), xy("B3")),
        Err(ServiceError::NoActiveSession)
    );
}

#[test]
fn test_blockade_closes_session() {
    let mut board = Board::empty();
    board.place(at("A6"), Cell::Occupied(Piece::man(Color::Dark)));
    board.place(at("A8"), Cell::Occupied(Piece::man(Color::Light)));
    board.place(at("C8"), Cell::Occupied(Piece::man(Color::Light)));

    let (service, _) = service();
    service.store().start_with(
        "chat",
        Game::from_position(board, Color::Light).expect("Valid position"),
    );

    let report = service
        .play_move("chat", xy("A8"), xy("B7"))
        .expect("Step is legal");
    assert_eq!(report.status, GameStatus::Blocked(Color::Light));
    assert!(service.store().is_empty());
}

#[test]
fn test_inspect_reports_progress() {
    let (service, clock) = service();
    service.start("chat");
    clock.advance(Duration::from_secs(90));
    service
        .play_move("chat", xy("A6"), xy("B5"))
        .expect("Opening move is legal");

    let view = service.inspect("chat").expect("Session exists");
    assert_eq!(view.turn, Color::Dark);
    assert_eq!(view.move_count, 1);
    assert_eq!(view.captures.total(), 0);
    assert_eq!(view.pieces.light_men, 12);
    assert_eq!(view.pieces.dark_men, 12);
    assert_eq!(view.elapsed_secs, 90);
    let last = view.last_move.expect("A move was played");
    assert_eq!((last.from, last.to), (at("A6"), at("B5")));
}

#[test]
fn test_inspect_without_session() {
    let (service, _) = service();
    assert_eq!(service.inspect("nobody"), Err(ServiceError::NoActiveSession));
}

#[test]
fn test_quit_is_idempotent() {
    let (service, _) = service();
    service.start("chat");
    assert!(service.quit("chat"));
    assert!(!service.quit("chat"));
    assert_eq!(service.inspect("chat"), Err(ServiceError::NoActiveSession));
}

#[test]
fn test_restart_discards_previous_game() {
    let (service, _) = service();
    service.start("chat");
    service
        .play_move("chat", xy("A6"), xy("B5"))
        .expect("Opening move is legal");

    service.start("chat");
    let view = service.inspect("chat").expect("Session exists");
    assert_eq!(view.move_count, 0);
    assert_eq!(view.turn, Color::Light);
}

#[test]
fn test_sessions_are_independent() {
    let (service, _) = service();
    service.start("one");
    service.start("two");
    service
        .play_move("one", xy("A6"), xy("B5"))
        .expect("Opening move is legal");

    assert_eq!(service.inspect("one").map(|v| v.turn), Ok(Color::Dark));
    assert_eq!(service.inspect("two").map(|v| v.turn), Ok(Color::Light));
}

#[test]
fn test_out_of_range_coordinates() {
    let (service, _) = service();
    service.start("chat");
    assert!(matches!(
        service.play_move("chat", (-1, 5), (0, 4)),
        Err(ServiceError::OutOfRange(_))
    ));
    assert_eq!(service.inspect("chat").map(|v| v.move_count), Ok(0));
}

#[test]
fn test_concurrent_moves_on_one_session_serialize() {
    let (service, _) = service();
    service.start("chat");

    let results: Vec<_> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| service.play_move("chat", xy("A6"), xy("B5"))))
            .collect();
        workers
            .into_iter()
            .map(|w| w.join().expect("Worker panicked"))
            .collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == ServiceError::IllegalMove(Rejection::NoPiece))
    );
    assert_eq!(service.inspect("chat").map(|v| v.move_count), Ok(1));
}

#[test]
fn test_concurrent_sessions() {
    let (service, _) = service();
    let ids: Vec<String> = (0..16).map(|i| format!("chat-{i}")).collect();

    std::thread::scope(|scope| {
        for id in &ids {
            let service = &service;
            scope.spawn(move || {
                service.start(id);
                service
                    .play_move(id, xy("A6"), xy("B5"))
                    .expect("Opening move is legal");
                service
                    .play_move(id, xy("B3"), xy("A4"))
                    .expect("Reply is legal");
            });
        }
    });

    assert_eq!(service.store().len(), 16);
    for id in &ids {
        assert_eq!(service.inspect(id).map(|v| v.move_count), Ok(2));
    }
}
