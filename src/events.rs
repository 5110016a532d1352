use serde::{Deserialize, Serialize};

use crate::ledger::{AccountId, Amount, AssetId};

/// Notification record appended to the reward center's event log.
///
/// The log is the observability surface: UIs and indexers consume it in
/// order. Trade classification (`Buy`/`Sell`) is recorded for every settled
/// trade, whether or not the trade earned points.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardEvent {
    StreamerRegistered {
        account: AccountId,
    },
    OwnershipTransferred {
        previous_owner: AccountId,
        new_owner: AccountId,
    },
    UpdaterGranted {
        asset: AssetId,
        account: AccountId,
    },
    UpdaterRevoked {
        asset: AssetId,
        account: AccountId,
    },
    RewardAssetSetup {
        asset: AssetId,
        rate_per_point: Amount,
    },
    RateUpdated {
        asset: AssetId,
        old_rate: Amount,
        new_rate: Amount,
    },
    Buy {
        trader: AccountId,
        referral: Option<AccountId>,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: Amount,
        amount_out: Amount,
    },
    Sell {
        trader: AccountId,
        referral: Option<AccountId>,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: Amount,
        amount_out: Amount,
    },
    PointsEarned {
        streamer: AccountId,
        trader: AccountId,
        asset: AssetId,
        points: Amount,
    },
    CooldownActive {
        streamer: AccountId,
        trader: AccountId,
    },
    ClaimCompleted {
        streamer: AccountId,
        asset: AssetId,
        points_burned: Amount,
        volume_reset: Amount,
        payout: Amount,
    },
    InventoryDeposited {
        asset: AssetId,
        amount: Amount,
    },
}
