use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::history::{HandEvent, HistoryEntry};
use crate::player::PlayerId;

/// One finished hand as persisted: a JSON object per line of a `.jsonl` file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// `YYYYMMDD-NNNNNN`
    pub hand_id: String,
    /// Table seed, when the deck was seeded
    pub seed: Option<u64>,
    pub events: Vec<HistoryEntry>,
    pub board: Vec<Card>,
    pub winners: Vec<PlayerId>,
    /// RFC3339, filled in by [`HandLogger::write`] when absent
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl HandRecord {
    /// Summarises a hand history; board and winners are read off its events.
    pub fn from_history(hand_id: String, seed: Option<u64>, events: &[HistoryEntry]) -> Self {
        let board = events
            .iter()
            .filter_map(|e| match &e.event {
                HandEvent::DealCommunity { cards } => Some(cards.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect();
        let winners = events
            .iter()
            .rev()
            .find_map(|e| match &e.event {
                HandEvent::HandEnd { winners, .. } => Some(winners.clone()),
                _ => None,
            })
            .unwrap_or_default();
        Self {
            hand_id,
            seed,
            events: events.to_vec(),
            board,
            winners,
            ts: None,
            meta: None,
        }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    /// Creates (truncating) the file at `path` and any missing parent directories.
    /// Hand ids use today's UTC date.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers hands under a fixed date and writes nowhere.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
