//! Session controller tests - commit ordering, deferred work, and restarts

use block_blast::core::{
    is_game_over, Board, GameSession, Phase, PlaceError, SessionConfig, TaskKind,
};
use block_blast::types::{
    Color, PieceInstance, PieceKey, SessionEvent, CLEAR_SWEEP_MS, TRAY_REFILL_MS,
};

fn inst(key: PieceKey) -> PieceInstance {
    PieceInstance::new(key, Color::Violet)
}

fn fill() -> PieceInstance {
    inst(PieceKey::A1)
}

fn started(config: SessionConfig) -> GameSession {
    let mut s = GameSession::with_config(2024, config);
    s.start_session();
    s
}

#[test]
fn test_three_cell_placement_adds_three() {
    let mut s = started(SessionConfig::default());
    s.set_tray([Some(inst(PieceKey::A3)), Some(fill()), None]);

    let out = s.commit_placement(0, 7, 2).unwrap();
    assert_eq!(out.cells_placed, 3);
    assert_eq!(out.lines_cleared, 0);
    assert_eq!(s.score(), 3);
    assert_eq!(s.moves(), 1);
    assert_eq!(s.phase(), Phase::Dealt);
}

#[test]
fn test_illegal_commit_changes_nothing() {
    let mut s = started(SessionConfig::default());
    s.set_board(Board::from_ascii(&["", "..#"], fill()));
    s.set_tray([Some(inst(PieceKey::C2)), None, None]);
    let before = *s.board();

    assert_eq!(s.commit_placement(0, 0, 0), Err(PlaceError::Blocked));
    assert_eq!(s.commit_placement(0, 8, 8), Err(PlaceError::Blocked));
    assert_eq!(*s.board(), before);
    assert_eq!(s.score(), 0);
    assert!(s.piece_at(0).is_some());
}

#[test]
fn test_line_clear_flags_then_sweeps_after_delay() {
    let mut s = started(SessionConfig::default());
    s.set_board(Board::from_ascii(&["#########."], fill()));
    s.set_tray([Some(fill()), Some(fill()), None]);

    let out = s.commit_placement(0, 0, 9).unwrap();
    assert_eq!(out.lines_cleared, 1);
    assert_eq!(out.rows.as_slice(), &[0]);
    assert_eq!(s.score(), 11);
    assert_eq!(s.board().clearing_count(), 10);
    assert!(s.is_pending(TaskKind::ClearSweep));
    assert_eq!(s.snapshot().sweep_in_ms, Some(CLEAR_SWEEP_MS));

    // Flagged cells still block placement.
    assert!(!s.can_place(1, 0, 0));

    assert!(!s.tick(CLEAR_SWEEP_MS - 1));
    assert_eq!(s.board().clearing_count(), 10);
    assert!(s.tick(1));
    assert_eq!(s.board().occupied_count(), 0);
    assert!(s.can_place(1, 0, 0));
}

#[test]
fn test_pending_sweep_absorbs_later_clears() {
    let mut s = started(SessionConfig::default());
    s.set_board(Board::from_ascii(&["#########.", "#########."], fill()));
    s.set_tray([Some(fill()), Some(fill()), Some(fill())]);

    s.commit_placement(0, 0, 9).unwrap();
    s.tick(100);
    s.commit_placement(1, 1, 9).unwrap();
    assert_eq!(s.board().clearing_count(), 20);
    assert_eq!(s.snapshot().sweep_in_ms, Some(CLEAR_SWEEP_MS - 100));

    s.tick(CLEAR_SWEEP_MS - 100);
    assert_eq!(s.board().occupied_count(), 0);
}

#[test]
fn test_refill_triggers_when_tray_empties() {
    let mut s = started(SessionConfig::default());
    s.set_tray([None, Some(fill()), None]);
    let out = s.commit_placement(1, 3, 3).unwrap();

    assert!(out.tray_emptied);
    assert_eq!(s.phase(), Phase::Empty);
    assert_eq!(s.snapshot().refill_in_ms, Some(TRAY_REFILL_MS));
    assert_eq!(s.commit_placement(0, 0, 0), Err(PlaceError::EmptySlot));

    s.tick(TRAY_REFILL_MS - 16);
    assert_eq!(s.phase(), Phase::Empty);
    s.tick(16);
    assert_eq!(s.phase(), Phase::Dealt);
    assert!(s.tray().iter().all(Option::is_some));
}

#[test]
fn test_refill_is_followed_by_game_over_check() {
    // A checkerboard only ever fits single cells.
    let mut rows = Vec::new();
    for r in 0..10 {
        rows.push(if r % 2 == 0 { "#.#.#.#.#." } else { ".#.#.#.#.#" });
    }
    for seed in 1..20 {
        let mut s = GameSession::with_config(seed, SessionConfig::immediate());
        s.start_session();
        s.set_board(Board::from_ascii(&rows, fill()));
        s.set_tray([Some(fill()), None, None]);
        s.commit_placement(0, 0, 1).unwrap();

        assert!(s.tray().iter().all(Option::is_some));
        assert_eq!(
            s.game_over(),
            is_game_over(s.tray(), &s.board().settled()),
            "seed {}",
            seed
        );
    }
}

#[test]
fn test_game_over_ignores_cells_about_to_be_swept() {
    // Filling (0, 9) completes row 0; below it a checkerboard. The remaining
    // A5 only fits once row 0 is swept, so the game continues.
    let mut rows = vec!["#########."];
    for r in 1..10 {
        rows.push(if r % 2 == 1 { ".#.#.#.#.#" } else { "#.#.#.#.#." });
    }
    let mut s = started(SessionConfig::default());
    s.set_board(Board::from_ascii(&rows, fill()));
    s.set_tray([Some(fill()), Some(inst(PieceKey::A5)), None]);

    s.commit_placement(0, 0, 9).unwrap();
    assert!(s.is_pending(TaskKind::ClearSweep));
    assert!(!s.can_place(1, 0, 0));
    assert!(!s.game_over());
}

#[test]
fn test_game_over_rejects_commits_until_restart() {
    let mut s = started(SessionConfig::default());
    s.set_board(Board::from_ascii(&["##########"; 9], fill()));
    s.set_tray([Some(inst(PieceKey::C1)), None, None]);
    assert!(s.game_over());
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.commit_placement(0, 9, 0), Err(PlaceError::NotPlayable));

    s.start_session();
    assert!(!s.game_over());
    assert_eq!(s.score(), 0);
    assert_eq!(s.board().occupied_count(), 0);
    assert_eq!(s.episode_id(), 2);
}

#[test]
fn test_restart_cancels_stale_sweep() {
    let mut s = started(SessionConfig::default());
    s.set_board(Board::from_ascii(&["#########."], fill()));
    s.set_tray([Some(fill()), Some(fill()), None]);
    s.commit_placement(0, 0, 9).unwrap();
    assert!(s.is_pending(TaskKind::ClearSweep));

    s.start_session();
    assert!(!s.is_pending(TaskKind::ClearSweep));
    s.set_tray([Some(inst(PieceKey::C1)), Some(fill()), None]);
    s.commit_placement(0, 0, 0).unwrap();
    let _ = s.take_events();

    // Well past the old deadline: nothing fires and the new board is intact.
    assert!(!s.tick(CLEAR_SWEEP_MS * 2));
    assert_eq!(s.board().occupied_count(), 4);
    assert!(s
        .take_events()
        .iter()
        .all(|e| !matches!(e, SessionEvent::Swept { .. })));
}

#[test]
fn test_restart_cancels_stale_refill() {
    let mut s = started(SessionConfig::default());
    s.set_tray([Some(fill()), None, None]);
    s.commit_placement(0, 0, 0).unwrap();
    assert!(s.is_pending(TaskKind::TrayRefill));

    s.start_session();
    let dealt = *s.tray();
    s.tick(TRAY_REFILL_MS);
    assert_eq!(*s.tray(), dealt);
}

#[test]
fn test_same_seed_deals_same_trays() {
    let a = started(SessionConfig::default());
    let b = started(SessionConfig::default());
    assert_eq!(a.tray(), b.tray());

    let mut c = started(SessionConfig::default());
    let first = *c.tray();
    c.start_session();
    // The stream continues across restarts.
    assert_ne!(*c.tray(), first);
}

#[test]
fn test_commit_event_carries_running_score() {
    let mut s = started(SessionConfig::immediate());
    s.set_board(Board::from_ascii(&["########.."], fill()));
    s.set_tray([Some(inst(PieceKey::A2)), Some(fill()), None]);
    let _ = s.take_events();

    s.commit_placement(0, 0, 8).unwrap();
    let events = s.take_events();
    assert_eq!(
        events[0],
        SessionEvent::Committed {
            episode: 1,
            move_index: 1,
            slot: 0,
            piece: inst(PieceKey::A2),
            row: 0,
            col: 8,
            cells_placed: 2,
            lines_cleared: 1,
            line_points: 10,
            score: 12,
        }
    );
    // Immediate config sweeps inside the commit.
    assert_eq!(events[1], SessionEvent::Swept { episode: 1, cells: 10 });
    assert_eq!(s.board().occupied_count(), 0);
}
