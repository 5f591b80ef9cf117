use std::collections::{BTreeMap, VecDeque};

use crate::controls::Nudge;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    // Input-derived intents
    Nudge(Nudge),
    Look { dx: f32, dy: f32 },
    ToggleStats,
    ToggleFogCulling,

    // Housekeeping
    ReloadConfig,
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

/// Frame-indexed event queue: one tick per rendered frame.
pub struct EventQueue {
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        self.emit_at(self.now, kind)
    }

    pub fn emit_at(&mut self, tick: u64, kind: Event) -> u64 {
        let id = self.alloc_id();
        let env = EventEnvelope { id, tick, kind };
        self.by_tick.entry(tick).or_default().push_back(env);
        id
    }

    pub fn emit_after(&mut self, delta: u64, kind: Event) -> u64 {
        self.emit_at(self.now + delta, kind)
    }

    /// Next event due this tick, in emission order.
    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        for (_, q) in self.by_tick.range_mut(..=self.now) {
            if let Some(env) = q.pop_front() {
                return Some(env);
            }
        }
        None
    }

    pub fn advance_tick(&mut self) {
        // Drop drained buckets up to and including now.
        self.by_tick.retain(|tick, q| *tick > self.now || !q.is_empty());
        self.now = self.now.wrapping_add(1);
    }

    pub fn pending(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }
}
