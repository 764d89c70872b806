//! Serialized shape of journal lines.

use serde::{Deserialize, Serialize};

use crate::types::{PieceInstance, SessionEvent, TRAY_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    /// Catalog key, e.g. `"D2"`
    pub key: String,
    /// Palette name, e.g. `"indigo"`
    pub color: String,
}

impl From<PieceInstance> for PieceRecord {
    fn from(p: PieceInstance) -> Self {
        Self {
            key: p.key.as_str().to_string(),
            color: p.color.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalRecord {
    SessionStarted {
        episode: u32,
        seed: u32,
    },
    TrayDealt {
        episode: u32,
        /// `null` for a slot dealt empty
        tray: [Option<PieceRecord>; TRAY_SIZE],
    },
    Placement {
        episode: u32,
        move_index: u32,
        slot: u8,
        piece: PieceRecord,
        row: i8,
        col: i8,
        cells_placed: u32,
        lines_cleared: u32,
        line_points: u32,
        score: u32,
    },
    CellsSwept {
        episode: u32,
        cells: u32,
    },
    GameOver {
        episode: u32,
        score: u32,
        moves: u32,
    },
}

impl From<&SessionEvent> for JournalRecord {
    fn from(event: &SessionEvent) -> Self {
        match *event {
            SessionEvent::Started { episode, seed } => JournalRecord::SessionStarted { episode, seed },
            SessionEvent::Dealt { episode, tray } => JournalRecord::TrayDealt {
                episode,
                tray: tray.map(|slot| slot.map(PieceRecord::from)),
            },
            SessionEvent::Committed {
                episode,
                move_index,
                slot,
                piece,
                row,
                col,
                cells_placed,
                lines_cleared,
                line_points,
                score,
            } => JournalRecord::Placement {
                episode,
                move_index,
                slot,
                piece: piece.into(),
                row,
                col,
                cells_placed,
                lines_cleared,
                line_points,
                score,
            },
            SessionEvent::Swept { episode, cells } => JournalRecord::CellsSwept { episode, cells },
            SessionEvent::GameOver {
                episode,
                score,
                moves,
            } => JournalRecord::GameOver {
                episode,
                score,
                moves,
            },
        }
    }
}

/// One journal line: envelope fields plus the tagged record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub seq: u64,
    pub ts: u64,
    #[serde(flatten)]
    pub record: JournalRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKey};

    #[test]
    fn placement_parses_back() {
        let event = SessionEvent::Committed {
            episode: 2,
            move_index: 5,
            slot: 1,
            piece: PieceInstance::new(PieceKey::D2, Color::Indigo),
            row: 3,
            col: 4,
            cells_placed: 4,
            lines_cleared: 1,
            line_points: 10,
            score: 40,
        };
        let line = JournalLine {
            seq: 9,
            ts: 0,
            record: JournalRecord::from(&event),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains(r#""type":"placement""#));
        assert!(json.contains(r#""key":"D2""#));
        let back: JournalLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn dealt_tray_keeps_empty_slots_as_null() {
        let p = PieceInstance::new(PieceKey::A1, Color::Red);
        let record = JournalRecord::from(&SessionEvent::Dealt {
            episode: 1,
            tray: [Some(p), None, Some(p)],
        });
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["type"], "tray_dealt");
        assert!(v["tray"][1].is_null());
        assert_eq!(v["tray"][2]["color"], "red");
    }
}
