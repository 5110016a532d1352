use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::RewardError;
use crate::ledger::{AccountId, Amount, AssetId};

/// Owner plus per-asset updater grants.
///
/// Exactly one owner exists after construction. The owner manages grants and
/// may hand ownership off, but never to the empty identity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleRegistry {
    owner: AccountId,
    updaters: BTreeMap<AssetId, BTreeSet<AccountId>>,
}

impl RoleRegistry {
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            updaters: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Owner always passes; otherwise the (asset, account) grant must hold.
    pub fn is_authorized(&self, asset: &AssetId, account: &AccountId) -> bool {
        account == &self.owner || self.is_updater(asset, account)
    }

    pub fn is_updater(&self, asset: &AssetId, account: &AccountId) -> bool {
        self.updaters
            .get(asset)
            .map(|grants| grants.contains(account))
            .unwrap_or(false)
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<AccountId, RewardError> {
        if caller != &self.owner {
            return Err(RewardError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if new_owner.is_empty() {
            return Err(RewardError::InvalidArgument("new owner must be non-empty"));
        }
        let previous = std::mem::replace(&mut self.owner, new_owner);
        Ok(previous)
    }

    pub fn grant_updater(
        &mut self,
        caller: &AccountId,
        asset: &AssetId,
        account: &AccountId,
    ) -> Result<(), RewardError> {
        self.check_owner_and_args(caller, asset, account)?;
        let grants = self.updaters.entry(asset.clone()).or_default();
        if !grants.insert(account.clone()) {
            return Err(RewardError::AlreadyGranted {
                asset: asset.clone(),
                account: account.clone(),
            });
        }
        Ok(())
    }

    pub fn revoke_updater(
        &mut self,
        caller: &AccountId,
        asset: &AssetId,
        account: &AccountId,
    ) -> Result<(), RewardError> {
        self.check_owner_and_args(caller, asset, account)?;
        let held = self
            .updaters
            .get_mut(asset)
            .map(|grants| grants.remove(account))
            .unwrap_or(false);
        if !held {
            return Err(RewardError::NotGranted {
                asset: asset.clone(),
                account: account.clone(),
            });
        }
        Ok(())
    }

    fn check_owner_and_args(
        &self,
        caller: &AccountId,
        asset: &AssetId,
        account: &AccountId,
    ) -> Result<(), RewardError> {
        if caller != &self.owner {
            return Err(RewardError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if asset.is_empty() || account.is_empty() {
            return Err(RewardError::InvalidArgument(
                "asset and account must be non-empty",
            ));
        }
        Ok(())
    }
}

/// One-shot self-registration flags. Registration is permanent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamerRegistry {
    registered: BTreeSet<AccountId>,
}

impl StreamerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self, account: &AccountId) -> bool {
        self.registered.contains(account)
    }

    pub fn register(&mut self, account: &AccountId) -> Result<(), RewardError> {
        if account.is_empty() {
            return Err(RewardError::InvalidArgument("account must be non-empty"));
        }
        if !self.registered.insert(account.clone()) {
            return Err(RewardError::AlreadyRegistered {
                account: account.clone(),
            });
        }
        Ok(())
    }
}

/// Points-to-payout rate for one reward asset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardAssetConfig {
    pub rate_per_point: Amount,
}

/// Per-asset reward configuration. Setup is single-shot; later rate changes
/// go through [`RewardAssetRegistry::update_rate`] so the old rate is
/// available for the audit event.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardAssetRegistry {
    assets: BTreeMap<AssetId, RewardAssetConfig>,
}

impl RewardAssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, asset: &AssetId) -> Option<RewardAssetConfig> {
        self.assets.get(asset).copied()
    }

    pub fn is_configured(&self, asset: &AssetId) -> bool {
        self.assets.contains_key(asset)
    }

    pub fn setup(&mut self, asset: &AssetId, rate_per_point: Amount) -> Result<(), RewardError> {
        if asset.is_empty() {
            return Err(RewardError::InvalidArgument("asset must be non-empty"));
        }
        if rate_per_point == 0 {
            return Err(RewardError::InvalidArgument("rate must be positive"));
        }
        if self.assets.contains_key(asset) {
            return Err(RewardError::AlreadyConfigured {
                asset: asset.clone(),
            });
        }
        self.assets
            .insert(asset.clone(), RewardAssetConfig { rate_per_point });
        Ok(())
    }

    /// Replaces the rate and returns the old one.
    pub fn update_rate(
        &mut self,
        asset: &AssetId,
        new_rate: Amount,
    ) -> Result<Amount, RewardError> {
        if new_rate == 0 {
            return Err(RewardError::InvalidArgument("rate must be positive"));
        }
        let config = self
            .assets
            .get_mut(asset)
            .ok_or_else(|| RewardError::NotConfigured {
                asset: asset.clone(),
            })?;
        let old = config.rate_per_point;
        config.rate_per_point = new_rate;
        Ok(old)
    }
}
