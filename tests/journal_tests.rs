//! Journal file format tests

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use block_blast::core::{first_fit, GameSession, SessionConfig};
use block_blast::journal::{Journal, JournalLine, JournalRecord};

fn temp_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    std::env::temp_dir().join(format!(
        "block-blast-{}-{}-{}.jsonl",
        tag,
        std::process::id(),
        nanos
    ))
}

#[test]
fn journal_appends_one_json_object_per_event() {
    let path = temp_path("journal");
    let mut session = GameSession::with_config(77, SessionConfig::immediate());
    session.start_session();
    let piece = session.piece_at(0).unwrap();
    let (row, col) = first_fit(session.board(), piece.key).unwrap();
    session.commit_placement(0, row, col).unwrap();

    let mut journal = Journal::open(&path).unwrap();
    journal.record_all(&session.take_events()).unwrap();
    journal.flush().unwrap();
    drop(journal);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<JournalLine> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 3);
    assert!(matches!(lines[0].record, JournalRecord::SessionStarted { episode: 1, .. }));
    assert!(matches!(lines[1].record, JournalRecord::TrayDealt { .. }));
    match &lines[2].record {
        JournalRecord::Placement {
            move_index,
            slot,
            row: r,
            col: c,
            piece: p,
            ..
        } => {
            assert_eq!((*move_index, *slot), (1, 0));
            assert_eq!((*r as i32, *c as i32), (row, col));
            assert_eq!(p.key, piece.key.as_str());
        }
        other => panic!("expected placement, got {:?}", other),
    }
    let seqs: Vec<u64> = lines.iter().map(|l| l.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);

    let raw: serde_json::Value = serde_json::from_str(text.lines().nth(2).unwrap()).unwrap();
    assert_eq!(raw["type"], "placement");

    fs::remove_file(&path).ok();
}

#[test]
fn journal_reopen_appends() {
    let path = temp_path("append");
    for episode in 1..=2 {
        let mut journal = Journal::open(&path).unwrap();
        journal
            .record(&block_blast::types::SessionEvent::GameOver {
                episode,
                score: 10,
                moves: 3,
            })
            .unwrap();
        journal.flush().unwrap();
    }
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|l| l.contains(r#""type":"game_over""#)));
    fs::remove_file(&path).ok();
}
