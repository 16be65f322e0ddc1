//! Page replacement simulation over a reference string.
//!
//! Each policy keeps its own frame set behind the [`PageReplacer`] trait;
//! [`run`] replays the references through it and records a snapshot after
//! every access.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::history::{FrameSnapshot, History};

/// Eviction policy used for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Policy {
    Fifo,
    Lru,
}

impl Policy {
    pub const ALL: [Policy; 2] = [Policy::Fifo, Policy::Lru];

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fifo => "FIFO",
            Policy::Lru => "LRU",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Hit,
    /// Page was loaded into a free frame.
    Loaded,
    /// Page replaced `evicted`.
    Replaced { evicted: i64 },
    /// No frame can ever hold the page (zero capacity).
    Dropped,
}

impl Access {
    pub fn is_fault(&self) -> bool {
        !matches!(self, Access::Hit)
    }
}

/// A bounded set of resident pages with a policy for choosing victims.
pub trait PageReplacer {
    /// Touch `page`, loading it (and evicting if full) when it is not resident.
    fn access(&mut self, page: i64) -> Access;

    /// Copy of the resident pages in slot order.
    fn snapshot(&self) -> FrameSnapshot;

    fn policy(&self) -> Policy;
}

/// Non-positive frame counts give a frame set that never holds anything.
fn capacity_for(frame_count: i64) -> usize {
    usize::try_from(frame_count).unwrap_or(0)
}

/// First-in-first-out frames: hits never reorder, the oldest load is evicted.
#[derive(Debug, Clone)]
pub struct FifoFrames {
    queue: VecDeque<i64>,
    capacity: usize,
}

impl FifoFrames {
    pub fn new(frame_count: i64) -> Self {
        FifoFrames { queue: VecDeque::new(), capacity: capacity_for(frame_count) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl PageReplacer for FifoFrames {
    fn access(&mut self, page: i64) -> Access {
        if self.queue.contains(&page) {
            return Access::Hit;
        }
        if self.queue.len() < self.capacity {
            self.queue.push_back(page);
            return Access::Loaded;
        }
        match self.queue.pop_front() {
            Some(evicted) => {
                self.queue.push_back(page);
                Access::Replaced { evicted }
            }
            None => Access::Dropped,
        }
    }

    fn snapshot(&self) -> FrameSnapshot {
        self.queue.iter().copied().collect()
    }

    fn policy(&self) -> Policy {
        Policy::Fifo
    }
}

/// Least-recently-used approximation with one staleness counter per slot.
///
/// `staleness[k]` counts the steps since `pages[k]` was last touched. A hit or
/// a load resets the slot to 0, then every counter ages by one, so after each
/// access the touched slot reads 1. Replacement overwrites the victim slot in
/// place, so slot order is not recency order.
#[derive(Debug, Clone)]
pub struct LruFrames {
    pages: Vec<i64>,
    staleness: Vec<u64>,
    capacity: usize,
}

impl LruFrames {
    pub fn new(frame_count: i64) -> Self {
        LruFrames { pages: Vec::new(), staleness: Vec::new(), capacity: capacity_for(frame_count) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Staleness counters, parallel to the resident pages.
    pub fn staleness(&self) -> &[u64] {
        &self.staleness
    }

    fn age(&mut self) {
        for ticks in &mut self.staleness {
            *ticks += 1;
        }
    }
}

/// Index of the largest counter; ties go to the lowest index.
pub(crate) fn first_max_index(counters: &[u64]) -> Option<usize> {
    let mut victim: Option<(usize, u64)> = None;
    for (index, &ticks) in counters.iter().enumerate() {
        match victim {
            Some((_, best)) if ticks <= best => {}
            _ => victim = Some((index, ticks)),
        }
    }
    victim.map(|(index, _)| index)
}

impl PageReplacer for LruFrames {
    fn access(&mut self, page: i64) -> Access {
        let access = if let Some(slot) = self.pages.iter().position(|&p| p == page) {
            self.staleness[slot] = 0;
            Access::Hit
        } else if self.pages.len() < self.capacity {
            self.pages.push(page);
            self.staleness.push(0);
            Access::Loaded
        } else {
            match first_max_index(&self.staleness) {
                Some(slot) => {
                    let evicted = std::mem::replace(&mut self.pages[slot], page);
                    self.staleness[slot] = 0;
                    Access::Replaced { evicted }
                }
                None => Access::Dropped,
            }
        };
        self.age();
        access
    }

    fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::from(self.pages.clone())
    }

    fn policy(&self) -> Policy {
        Policy::Lru
    }
}

/// Result of replaying a reference string under one policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Simulation {
    pub policy: Policy,
    pub history: History,
    pub faults: usize,
}

impl Simulation {
    pub fn hits(&self) -> usize {
        self.history.len() - self.faults
    }

    /// Resident pages after the last access, empty for an empty reference string.
    pub fn final_frames(&self) -> &[i64] {
        self.history.last().map(|s| s.pages()).unwrap_or(&[])
    }
}

/// Replay `references` through `replacer`, recording one snapshot per access.
pub fn run<R: PageReplacer>(mut replacer: R, references: &[i64]) -> Simulation {
    let policy = replacer.policy();
    let mut history = History::with_capacity(references.len());
    let mut faults = 0;

    for (step, &page) in references.iter().enumerate() {
        let access = replacer.access(page);
        if access.is_fault() {
            faults += 1;
        }
        trace!(%policy, step, page, ?access, "access");
        history.record(replacer.snapshot());
    }

    debug!(%policy, accesses = references.len(), faults, "simulation finished");
    Simulation { policy, history, faults }
}

pub fn simulate_fifo(references: &[i64], frame_count: i64) -> Simulation {
    run(FifoFrames::new(frame_count), references)
}

pub fn simulate_lru(references: &[i64], frame_count: i64) -> Simulation {
    run(LruFrames::new(frame_count), references)
}

pub fn simulate(policy: Policy, references: &[i64], frame_count: i64) -> Simulation {
    match policy {
        Policy::Fifo => simulate_fifo(references, frame_count),
        Policy::Lru => simulate_lru(references, frame_count),
    }
}
