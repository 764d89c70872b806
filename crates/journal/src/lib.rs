//! Session journal - line-delimited JSON record of session events
//!
//! Every message has: type, seq (per-journal sequence number), ts (wall
//! clock in ms), followed by the event's own fields. One JSON object per
//! line; the file is opened in append mode so several runs can share it.

pub mod record;

pub use block_blast_types as types;

pub use record::{JournalLine, JournalRecord, PieceRecord};

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::types::SessionEvent;

pub struct Journal<W: Write = BufWriter<File>> {
    out: W,
    seq: u64,
    line: Vec<u8>,
}

impl Journal<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening journal {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            line: Vec::with_capacity(512),
        }
    }

    /// Records written so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, event: &SessionEvent) -> Result<()> {
        self.seq += 1;
        let line = JournalLine {
            seq: self.seq,
            ts: now_ms(),
            record: JournalRecord::from(event),
        };

        self.line.clear();
        serde_json::to_writer(&mut self.line, &line).context("encoding journal record")?;
        self.line.push(b'\n');
        self.out
            .write_all(&self.line)
            .context("writing journal record")?;
        Ok(())
    }

    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a SessionEvent>) -> Result<()> {
        for event in events {
            self.record(event)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flushing journal")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
