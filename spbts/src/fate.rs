use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use board::{File, Occupancy, Side};

use crate::{arrival, Landing, PawnHistory};

/// The whole story of a pawn over the analysed window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Fate {
    NeverBlocked,
    PushOne,
    PushTwo,
    CaptureLeft,
    CaptureRight,
    TemporaryBlock,
    PermanentBlock,
}

impl Fate {
    pub const ALL: [Fate; 7] = [
        Fate::NeverBlocked,
        Fate::PushOne,
        Fate::PushTwo,
        Fate::CaptureLeft,
        Fate::CaptureRight,
        Fate::TemporaryBlock,
        Fate::PermanentBlock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Fate::NeverBlocked => "never_blocked",
            Fate::PushOne => "push_one",
            Fate::PushTwo => "push_two",
            Fate::CaptureLeft => "capture_left",
            Fate::CaptureRight => "capture_right",
            Fate::TemporaryBlock => "temporary_block",
            Fate::PermanentBlock => "permanent_block",
        }
    }
}

impl Display for Fate {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Landing> for Fate {
    fn from(landing: Landing) -> Self {
        match landing {
            Landing::PushOne => Fate::PushOne,
            Landing::PushTwo => Fate::PushTwo,
            Landing::CaptureLeft => Fate::CaptureLeft,
            Landing::CaptureRight => Fate::CaptureRight,
        }
    }
}

/// Decides the fate of the `side` pawn on `file`.
///
/// `None` when the pawn was never on its start square, or when it left the start square for a
/// square none of the categories describe (e.g. it was captured there). Those games are left out
/// of fate counts.
pub fn track_fate<O: Occupancy>(positions: &[O], side: Side, file: File) -> Option<Fate> {
    let history = PawnHistory::observe(positions, side, file);

    if !history.ever_exposed() {
        return None;
    }

    if let Some(ply) = history.move_off_ply() {
        return arrival(&positions[ply - 1], &positions[ply], file, side).map(Fate::from);
    }

    let Some(block_start) = history.first_block_ply() else {
        return Some(Fate::NeverBlocked);
    };

    let freed = (block_start + 1..history.len())
        .any(|t| history.is_exposed(t) && !history.is_blocked(t));

    if freed {
        Some(Fate::TemporaryBlock)
    } else {
        Some(Fate::PermanentBlock)
    }
}

/// Count per fate. All seven fates are always present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct FateCounts(BTreeMap<Fate, usize>);

impl FateCounts {
    pub fn new() -> Self {
        Self(Fate::ALL.iter().map(|&fate| (fate, 0)).collect())
    }

    /// Counts of a single game: one for its fate, if it has one.
    pub fn from_fate(fate: Option<Fate>) -> Self {
        let mut counts = Self::new();
        if let Some(fate) = fate {
            counts.add(fate, 1);
        }
        counts
    }

    pub fn add(&mut self, fate: Fate, count: usize) {
        *self.0.entry(fate).or_insert(0) += count;
    }

    pub fn merge(&mut self, other: &FateCounts) {
        for (&fate, &count) in &other.0 {
            self.add(fate, count);
        }
    }

    pub fn get(&self, fate: Fate) -> usize {
        self.0.get(&fate).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Captures towards either diagonal.
    pub fn captures(&self) -> usize {
        self.get(Fate::CaptureLeft) + self.get(Fate::CaptureRight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Fate, usize)> + '_ {
        self.0.iter().map(|(&fate, &count)| (fate, count))
    }
}

impl Default for FateCounts {
    fn default() -> Self {
        Self::new()
    }
}
