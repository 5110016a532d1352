use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub type AccountId = String;
pub type AssetId = String;
pub type Amount = u128;

/// Fixed-point unit of one point: balances are denominated in 1e-18 points.
pub const POINT_SCALE: Amount = 1_000_000_000_000_000_000;

type BalanceMap = BTreeMap<AccountId, BTreeMap<AssetId, Amount>>;

/// Multi-asset balance store for points, referred volume, reward-asset
/// holdings, and the system's payout inventory.
///
/// The ledger is the sole owner of this state: the engines mutate it through
/// the methods below, never by writing a cell directly. Balances for
/// different assets under the same account are fully independent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointLedger {
    points: BalanceMap,
    volume: BalanceMap,
    holdings: BalanceMap,
    inventory: BTreeMap<AssetId, Amount>,
}

impl PointLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, streamer: &AccountId, asset: &AssetId, amount: Amount) {
        let cell = cell_mut(&mut self.points, streamer, asset);
        *cell = cell.saturating_add(amount);
    }

    /// Removes the entire point balance for (streamer, asset) and returns it.
    pub fn burn_all(&mut self, streamer: &AccountId, asset: &AssetId) -> Amount {
        take_cell(&mut self.points, streamer, asset)
    }

    pub fn add_volume(&mut self, streamer: &AccountId, asset: &AssetId, amount: Amount) {
        let cell = cell_mut(&mut self.volume, streamer, asset);
        *cell = cell.saturating_add(amount);
    }

    /// Zeroes the referred-volume accumulator and returns the prior value.
    pub fn reset_volume(&mut self, streamer: &AccountId, asset: &AssetId) -> Amount {
        take_cell(&mut self.volume, streamer, asset)
    }

    pub fn balance(&self, streamer: &AccountId, asset: &AssetId) -> Amount {
        read_cell(&self.points, streamer, asset)
    }

    pub fn volume(&self, streamer: &AccountId, asset: &AssetId) -> Amount {
        read_cell(&self.volume, streamer, asset)
    }

    pub fn holding(&self, account: &AccountId, asset: &AssetId) -> Amount {
        read_cell(&self.holdings, account, asset)
    }

    pub fn inventory(&self, asset: &AssetId) -> Amount {
        self.inventory.get(asset).copied().unwrap_or(0)
    }

    pub fn deposit_inventory(&mut self, asset: &AssetId, amount: Amount) {
        let cell = self.inventory.entry(asset.clone()).or_default();
        *cell = cell.saturating_add(amount);
    }

    /// Moves `amount` units of `asset` from the system inventory to
    /// `account`. Refuses (without mutating) when the inventory is short;
    /// the claim path checks first and treats a refusal as a bug guard.
    pub fn pay_out(&mut self, account: &AccountId, asset: &AssetId, amount: Amount) -> bool {
        let available = self.inventory.entry(asset.clone()).or_default();
        if *available < amount {
            return false;
        }
        *available -= amount;
        let cell = cell_mut(&mut self.holdings, account, asset);
        *cell = cell.saturating_add(amount);
        true
    }

    /// Sum of all outstanding point balances for one asset.
    pub fn total_points(&self, asset: &AssetId) -> Amount {
        self.points
            .values()
            .filter_map(|per_asset| per_asset.get(asset))
            .sum()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            points: self.points.clone(),
            volume: self.volume.clone(),
            holdings: self.holdings.clone(),
            inventory: self.inventory.clone(),
            digest: self.digest(),
        }
    }

    /// Sha256 over the canonical (sorted) entries of every store. Two
    /// ledgers with equal state produce equal digests.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (label, map) in [
            (&b"points"[..], &self.points),
            (&b"volume"[..], &self.volume),
            (&b"holdings"[..], &self.holdings),
        ] {
            for (account, per_asset) in map {
                for (asset, amount) in per_asset {
                    hasher.update(label);
                    hasher.update(account.as_bytes());
                    hasher.update(asset.as_bytes());
                    hasher.update(amount.to_le_bytes());
                }
            }
        }
        for (asset, amount) in &self.inventory {
            hasher.update(b"inventory");
            hasher.update(asset.as_bytes());
            hasher.update(amount.to_le_bytes());
        }
        hasher.finalize().into()
    }
}

/// Point-in-time serializable copy of the ledger with an integrity digest.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub points: BalanceMap,
    pub volume: BalanceMap,
    pub holdings: BalanceMap,
    pub inventory: BTreeMap<AssetId, Amount>,
    #[serde(with = "hex_digest")]
    pub digest: [u8; 32],
}

mod hex_digest {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(de)?;
        let raw = hex::decode(&s).map_err(serde::de::Error::custom)?;
        raw.try_into()
            .map_err(|_| serde::de::Error::custom("digest must be 32 bytes"))
    }
}

fn cell_mut<'a>(map: &'a mut BalanceMap, account: &AccountId, asset: &AssetId) -> &'a mut Amount {
    map.entry(account.clone())
        .or_default()
        .entry(asset.clone())
        .or_default()
}

fn read_cell(map: &BalanceMap, account: &AccountId, asset: &AssetId) -> Amount {
    map.get(account)
        .and_then(|per_asset| per_asset.get(asset))
        .copied()
        .unwrap_or(0)
}

fn take_cell(map: &mut BalanceMap, account: &AccountId, asset: &AssetId) -> Amount {
    map.get_mut(account)
        .and_then(|per_asset| per_asset.get_mut(asset))
        .map(std::mem::take)
        .unwrap_or(0)
}
