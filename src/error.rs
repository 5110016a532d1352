use thiserror::Error;

use crate::ledger::{AccountId, Amount, AssetId};

/// Canonical error type for every mutating entry point.
///
/// Each variant maps to a distinct rejection: callers can match on the kind
/// to decide retry policy. A rejected call leaves the state untouched.
#[derive(Debug, Error)]
pub enum RewardError {
    /// Caller lacks the role the operation requires.
    #[error("account {caller} is not authorized for this operation")]
    Unauthorized { caller: AccountId },

    /// Structurally invalid input (empty identity, zero rate).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Self-registration attempted twice.
    #[error("account {account} is already registered as a streamer")]
    AlreadyRegistered { account: AccountId },

    /// Updater grant already present for this (asset, account) pair.
    #[error("account {account} already holds the updater grant for {asset}")]
    AlreadyGranted { asset: AssetId, account: AccountId },

    /// Revoke without a prior grant.
    #[error("account {account} holds no updater grant for {asset}")]
    NotGranted { asset: AssetId, account: AccountId },

    /// Single-shot reward asset setup attempted twice.
    #[error("reward asset {asset} is already configured")]
    AlreadyConfigured { asset: AssetId },

    /// Operation requires a configured reward asset.
    #[error("reward asset {asset} is not configured")]
    NotConfigured { asset: AssetId },

    /// Claim requires a registered streamer.
    #[error("account {account} is not a registered streamer")]
    NotRegistered { account: AccountId },

    /// Claim with zero referred volume.
    #[error("no referred volume recorded for {streamer} in {asset}")]
    NoVolume { streamer: AccountId, asset: AssetId },

    /// Claim with zero point balance.
    #[error("no points to claim for {streamer} in {asset}")]
    NoPoints { streamer: AccountId, asset: AssetId },

    /// Payout exceeds the system's inventory of the reward asset.
    #[error("insufficient inventory for {asset}: need {required}, have {available}")]
    InsufficientInventory {
        asset: AssetId,
        required: Amount,
        available: Amount,
    },

    /// Arithmetic overflow while computing points or payout.
    #[error("arithmetic overflow in reward computation")]
    Overflow,
}
