//! Invulnerability window - merging hits that land in quick succession
//!
//! A fresh hit opens a window of `window_ticks`. While more than
//! `merge_threshold` ticks remain, a new hit only deals what it exceeds the
//! strongest hit of the window by, and plays no hurt cosmetics.

use crate::types::ActorId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Window state of one victim
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InvulnerabilityState {
    pub ticks_remaining: u32,
    /// Strongest hit accepted in the current window
    pub last_damage_amount: f32,
}

/// How an incoming hit relates to the victim's current window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeDecision {
    /// Not stronger than the window's peak; dropped
    Absorbed,
    /// Stronger than the peak; only the difference goes through
    Merged { marginal: f32 },
    /// Window expired; the full amount goes through
    Fresh { amount: f32 },
}

impl MergeDecision {
    /// Only the first hit of a window plays hurt sounds and animations
    pub fn plays_cosmetics(self) -> bool {
        matches!(self, MergeDecision::Fresh { .. })
    }
}

/// Per-victim invulnerability windows
#[derive(Debug, Clone)]
pub struct InvulnerabilityTracker {
    states: HashMap<ActorId, InvulnerabilityState>,
    window_ticks: u32,
    merge_threshold: u32,
}

impl Default for InvulnerabilityTracker {
    fn default() -> Self {
        Self::new(20, 10)
    }
}

impl InvulnerabilityTracker {
    pub fn new(window_ticks: u32, merge_threshold: u32) -> Self {
        InvulnerabilityTracker {
            states: HashMap::new(),
            window_ticks,
            merge_threshold,
        }
    }

    pub fn state(&self, victim: ActorId) -> Option<InvulnerabilityState> {
        self.states.get(&victim).copied()
    }

    /// Overwrite a victim's window
    pub fn set_state(&mut self, victim: ActorId, state: InvulnerabilityState) {
        if state.ticks_remaining == 0 {
            self.states.remove(&victim);
        } else {
            self.states.insert(victim, state);
        }
    }

    pub fn is_merging(&self, victim: ActorId) -> bool {
        self.states
            .get(&victim)
            .is_some_and(|s| s.ticks_remaining > self.merge_threshold)
    }

    /// Classify an incoming hit and update the window
    pub fn check(&mut self, victim: ActorId, amount: f32) -> MergeDecision {
        if self.is_merging(victim) {
            let state = self.states.entry(victim).or_default();
            if amount <= state.last_damage_amount {
                return MergeDecision::Absorbed;
            }
            let marginal = amount - state.last_damage_amount;
            state.last_damage_amount = amount;
            return MergeDecision::Merged { marginal };
        }

        self.states.insert(
            victim,
            InvulnerabilityState {
                ticks_remaining: self.window_ticks,
                last_damage_amount: amount,
            },
        );
        MergeDecision::Fresh { amount }
    }

    /// Count every window down, dropping expired ones
    pub fn tick(&mut self) {
        self.states.retain(|_, state| {
            state.ticks_remaining = state.ticks_remaining.saturating_sub(1);
            state.ticks_remaining > 0
        });
    }

    pub fn clear(&mut self, victim: ActorId) {
        self.states.remove(&victim);
    }

    pub fn tracked(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VICTIM: ActorId = ActorId(7);

    #[test]
    fn test_first_hit_is_fresh() {
        let mut tracker = InvulnerabilityTracker::default();
        let decision = tracker.check(VICTIM, 4.0);
        assert_eq!(decision, MergeDecision::Fresh { amount: 4.0 });
        assert!(decision.plays_cosmetics());

        let state = tracker.state(VICTIM).unwrap();
        assert_eq!(state.ticks_remaining, 20);
        assert!((state.last_damage_amount - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_stronger_hit_merges() {
        let mut tracker = InvulnerabilityTracker::default();
        tracker.set_state(
            VICTIM,
            InvulnerabilityState {
                ticks_remaining: 15,
                last_damage_amount: 3.0,
            },
        );

        let decision = tracker.check(VICTIM, 5.0);
        assert_eq!(decision, MergeDecision::Merged { marginal: 2.0 });
        assert!(!decision.plays_cosmetics());

        let state = tracker.state(VICTIM).unwrap();
        assert!((state.last_damage_amount - 5.0).abs() < f32::EPSILON);
        // merging never extends the window
        assert_eq!(state.ticks_remaining, 15);
    }

    #[test]
    fn test_weaker_hit_absorbed() {
        let mut tracker = InvulnerabilityTracker::default();
        tracker.check(VICTIM, 6.0);
        assert_eq!(tracker.check(VICTIM, 6.0), MergeDecision::Absorbed);
        assert_eq!(tracker.check(VICTIM, 1.0), MergeDecision::Absorbed);
    }

    #[test]
    fn test_late_hit_starts_new_window() {
        let mut tracker = InvulnerabilityTracker::default();
        tracker.check(VICTIM, 6.0);
        for _ in 0..10 {
            tracker.tick();
        }
        // exactly 10 ticks left: no longer merging
        assert!(!tracker.is_merging(VICTIM));
        assert_eq!(tracker.check(VICTIM, 1.0), MergeDecision::Fresh { amount: 1.0 });
        assert_eq!(tracker.state(VICTIM).unwrap().ticks_remaining, 20);
    }

    #[test]
    fn test_tick_evicts_expired() {
        let mut tracker = InvulnerabilityTracker::new(2, 1);
        tracker.check(VICTIM, 1.0);
        tracker.tick();
        assert_eq!(tracker.tracked(), 1);
        tracker.tick();
        assert_eq!(tracker.tracked(), 0);
        assert!(tracker.state(VICTIM).is_none());
    }

    proptest! {
        #[test]
        fn prop_repeated_check_is_idempotent(amount in 0.0f32..100.0, extra_checks in 1usize..5) {
            let mut tracker = InvulnerabilityTracker::default();
            tracker.check(VICTIM, amount);
            for _ in 0..extra_checks {
                let decision = tracker.check(VICTIM, amount);
                prop_assert_eq!(decision, MergeDecision::Absorbed);
                prop_assert!(!decision.plays_cosmetics());
                prop_assert!((tracker.state(VICTIM).unwrap().last_damage_amount - amount).abs() < f32::EPSILON);
            }
        }
    }
}
