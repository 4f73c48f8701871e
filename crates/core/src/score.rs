//! Score accumulator with change notifications
//!
//! Listeners are plain callbacks keyed by a [`SubscriptionId`]. Owners should
//! unsubscribe when they go away so no callback outlives the state it feeds.

use log::debug;

use crate::types::POINTS_PER_TILE;

/// Handle returned by [`ScoreNotifier::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(u32)>;

/// Running score plus the callbacks interested in it
pub struct ScoreNotifier {
    score: u32,
    next_id: u32,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ScoreNotifier {
    pub fn new() -> Self {
        Self {
            score: 0,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Register a callback receiving every new total
    pub fn subscribe(&mut self, listener: impl FnMut(u32) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a callback. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Credit a resolve pass of `matched` cells and notify once.
    ///
    /// A pass with no cells changes nothing and notifies nobody.
    pub fn award(&mut self, matched: usize) -> u32 {
        if matched == 0 {
            return self.score;
        }
        let points = (matched as u32).saturating_mul(POINTS_PER_TILE);
        self.score = self.score.saturating_add(points);
        debug!("score +{} -> {}", points, self.score);
        self.notify();
        self.score
    }

    /// Zero the score (new board) and notify.
    pub fn reset(&mut self) {
        self.score = 0;
        self.notify();
    }

    fn notify(&mut self) {
        let score = self.score;
        for (_, listener) in self.listeners.iter_mut() {
            listener(score);
        }
    }
}

impl Default for ScoreNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScoreNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreNotifier")
            .field("score", &self.score)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
