use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ledger::AccountId;

/// Per-(streamer, trigger) trade timer enforcing a minimum interval between
/// point-earning trades from the same trader under the same referrer.
///
/// The timestamp is overwritten on every qualifying trade, including ones the
/// gate rejects: rapid retries keep pushing the window out instead of
/// averaging it away.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CooldownGate {
    window: u64,
    last_trade: BTreeMap<AccountId, BTreeMap<AccountId, u64>>,
}

impl CooldownGate {
    pub fn new(window: u64) -> Self {
        Self {
            window,
            last_trade: BTreeMap::new(),
        }
    }

    pub fn window(&self) -> u64 {
        self.window
    }

    pub fn last_trade(&self, streamer: &AccountId, trigger: &AccountId) -> Option<u64> {
        self.last_trade
            .get(streamer)
            .and_then(|per_trigger| per_trigger.get(trigger))
            .copied()
    }

    /// Returns whether the pair is outside the cooldown window, and records
    /// `now` as the pair's last trade time in both branches.
    pub fn check_and_touch(&mut self, streamer: &AccountId, trigger: &AccountId, now: u64) -> bool {
        let slot = self
            .last_trade
            .entry(streamer.clone())
            .or_default()
            .entry(trigger.clone());
        match slot {
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
            std::collections::btree_map::Entry::Occupied(mut entry) => {
                let eligible = now.saturating_sub(*entry.get()) >= self.window;
                entry.insert(now);
                eligible
            }
        }
    }
}
