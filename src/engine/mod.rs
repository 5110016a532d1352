use serde::{Deserialize, Serialize};

use crate::cooldown::CooldownGate;
use crate::error::RewardError;
use crate::events::RewardEvent;
use crate::ledger::{AccountId, Amount, AssetId, LedgerSnapshot, PointLedger, POINT_SCALE};
use crate::registry::{RewardAssetConfig, RewardAssetRegistry, RoleRegistry, StreamerRegistry};

/// Tunables of the accrual policy. The defaults reproduce the reference
/// behavior: ETH-anchored pools, a 60-unit cooldown, and the asymmetric
/// 5x buy / 2x sell point multipliers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardConfig {
    pub anchor_asset: AssetId,
    pub cooldown_window: u64,
    pub buy_multiplier: Amount,
    pub sell_multiplier: Amount,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            anchor_asset: "ETH".to_string(),
            cooldown_window: 60,
            buy_multiplier: 5,
            sell_multiplier: 2,
        }
    }
}

/// One settled trade as reported by the pool collaborator. Deltas are
/// trusted as given; the engine never re-derives pricing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeSettlement {
    pub trader: AccountId,
    /// Pool side claimed to be the anchor (native/quote) asset.
    pub anchor_candidate: AssetId,
    pub other_asset: AssetId,
    /// true when the anchor was spent to acquire the other asset (a buy).
    pub anchor_to_other: bool,
    pub anchor_delta: i128,
    pub other_delta: i128,
    /// Out-of-band referral metadata, decodable as an account id.
    pub referral_memo: Option<Vec<u8>>,
}

impl TradeSettlement {
    /// Decodes the referral memo to an account id. Absent, empty, or
    /// non-UTF-8 memos resolve to no referral rather than an error: a bad
    /// memo must not abort trade settlement.
    pub fn referral(&self) -> Option<AccountId> {
        self.referral_memo
            .as_ref()
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
            .filter(|account| !account.is_empty())
    }
}

/// Why an otherwise well-formed trade earned no points.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NonAnchorPool,
    MissingReferral,
    UnregisteredReferral,
    UnconfiguredAsset,
    CooldownActive,
}

/// Outcome of feeding one trade through the accrual engine. Skips are
/// defined no-ops, not errors: the overall settlement proceeds either way.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccrualOutcome {
    Accrued { points: Amount, volume: Amount },
    Skipped(SkipReason),
}

/// What a completed claim paid and consumed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub points_burned: Amount,
    pub volume_reset: Amount,
    pub payout: Amount,
}

/// The reward center: one context struct owning every registry, the gate,
/// the ledger, and the event log.
///
/// All mutation flows through `&mut self` methods, so a center behaves as a
/// single sequential ledger: each call is one indivisible unit. Every method
/// performs all of its precondition checks before its first state write,
/// which makes a rejected call leave the state untouched without needing an
/// undo log.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardCenter {
    config: RewardConfig,
    roles: RoleRegistry,
    streamers: StreamerRegistry,
    reward_assets: RewardAssetRegistry,
    cooldown: CooldownGate,
    ledger: PointLedger,
    events: Vec<RewardEvent>,
}

impl RewardCenter {
    pub fn new(owner: AccountId, config: RewardConfig) -> Self {
        let cooldown = CooldownGate::new(config.cooldown_window);
        Self {
            config,
            roles: RoleRegistry::new(owner),
            streamers: StreamerRegistry::new(),
            reward_assets: RewardAssetRegistry::new(),
            cooldown,
            ledger: PointLedger::new(),
            events: Vec::new(),
        }
    }

    // ---- ownership & roles -------------------------------------------------

    pub fn owner(&self) -> &AccountId {
        self.roles.owner()
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), RewardError> {
        let previous_owner = self.roles.transfer_ownership(caller, new_owner.clone())?;
        self.events.push(RewardEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    pub fn grant_updater(
        &mut self,
        caller: &AccountId,
        asset: &AssetId,
        account: &AccountId,
    ) -> Result<(), RewardError> {
        self.roles.grant_updater(caller, asset, account)?;
        self.events.push(RewardEvent::UpdaterGranted {
            asset: asset.clone(),
            account: account.clone(),
        });
        Ok(())
    }

    pub fn revoke_updater(
        &mut self,
        caller: &AccountId,
        asset: &AssetId,
        account: &AccountId,
    ) -> Result<(), RewardError> {
        self.roles.revoke_updater(caller, asset, account)?;
        self.events.push(RewardEvent::UpdaterRevoked {
            asset: asset.clone(),
            account: account.clone(),
        });
        Ok(())
    }

    pub fn is_updater(&self, asset: &AssetId, account: &AccountId) -> bool {
        self.roles.is_updater(asset, account)
    }

    // ---- streamer registration --------------------------------------------

    pub fn register(&mut self, caller: &AccountId) -> Result<(), RewardError> {
        self.streamers.register(caller)?;
        self.events.push(RewardEvent::StreamerRegistered {
            account: caller.clone(),
        });
        Ok(())
    }

    pub fn is_registered(&self, account: &AccountId) -> bool {
        self.streamers.is_registered(account)
    }

    // ---- reward asset configuration ---------------------------------------

    pub fn setup_reward_asset(
        &mut self,
        caller: &AccountId,
        asset: &AssetId,
        rate_per_point: Amount,
    ) -> Result<(), RewardError> {
        if !self.roles.is_authorized(asset, caller) {
            return Err(RewardError::Unauthorized {
                caller: caller.clone(),
            });
        }
        self.reward_assets.setup(asset, rate_per_point)?;
        self.events.push(RewardEvent::RewardAssetSetup {
            asset: asset.clone(),
            rate_per_point,
        });
        Ok(())
    }

    pub fn update_rate(
        &mut self,
        caller: &AccountId,
        asset: &AssetId,
        new_rate: Amount,
    ) -> Result<(), RewardError> {
        if !self.roles.is_authorized(asset, caller) {
            return Err(RewardError::Unauthorized {
                caller: caller.clone(),
            });
        }
        let old_rate = self.reward_assets.update_rate(asset, new_rate)?;
        self.events.push(RewardEvent::RateUpdated {
            asset: asset.clone(),
            old_rate,
            new_rate,
        });
        Ok(())
    }

    pub fn reward_asset_info(&self, asset: &AssetId) -> Option<RewardAssetConfig> {
        self.reward_assets.get(asset)
    }

    // ---- accrual ----------------------------------------------------------

    /// Feeds one settled trade through classification and accrual.
    ///
    /// Classification (the Buy/Sell event) is recorded for every trade; the
    /// eligibility gates below only decide whether points are minted. The
    /// cooldown timer is touched even when it rejects the trade.
    pub fn on_trade(
        &mut self,
        trade: &TradeSettlement,
        now: u64,
    ) -> Result<AccrualOutcome, RewardError> {
        let referral = trade.referral();
        let anchor_amount = trade.anchor_delta.unsigned_abs();
        let other_amount = trade.other_delta.unsigned_abs();

        // Points are computed up front so an overflow rejects the call
        // before any state (event log included) has been written.
        let multiplier = if trade.anchor_to_other {
            self.config.buy_multiplier
        } else {
            self.config.sell_multiplier
        };
        let points = anchor_amount
            .checked_mul(multiplier)
            .ok_or(RewardError::Overflow)?;

        self.events.push(if trade.anchor_to_other {
            RewardEvent::Buy {
                trader: trade.trader.clone(),
                referral: referral.clone(),
                asset_in: trade.anchor_candidate.clone(),
                asset_out: trade.other_asset.clone(),
                amount_in: anchor_amount,
                amount_out: other_amount,
            }
        } else {
            RewardEvent::Sell {
                trader: trade.trader.clone(),
                referral: referral.clone(),
                asset_in: trade.other_asset.clone(),
                asset_out: trade.anchor_candidate.clone(),
                amount_in: other_amount,
                amount_out: anchor_amount,
            }
        });

        if trade.anchor_candidate != self.config.anchor_asset {
            return Ok(AccrualOutcome::Skipped(SkipReason::NonAnchorPool));
        }
        let referral = match referral {
            Some(referral) => referral,
            None => return Ok(AccrualOutcome::Skipped(SkipReason::MissingReferral)),
        };
        if !self.streamers.is_registered(&referral) {
            return Ok(AccrualOutcome::Skipped(SkipReason::UnregisteredReferral));
        }
        if !self.reward_assets.is_configured(&trade.other_asset) {
            return Ok(AccrualOutcome::Skipped(SkipReason::UnconfiguredAsset));
        }
        if !self.cooldown.check_and_touch(&referral, &trade.trader, now) {
            self.events.push(RewardEvent::CooldownActive {
                streamer: referral,
                trader: trade.trader.clone(),
            });
            return Ok(AccrualOutcome::Skipped(SkipReason::CooldownActive));
        }

        self.ledger
            .add_volume(&referral, &trade.other_asset, anchor_amount);
        self.ledger.mint(&referral, &trade.other_asset, points);
        self.events.push(RewardEvent::PointsEarned {
            streamer: referral,
            trader: trade.trader.clone(),
            asset: trade.other_asset.clone(),
            points,
        });
        Ok(AccrualOutcome::Accrued {
            points,
            volume: anchor_amount,
        })
    }

    // ---- claims -----------------------------------------------------------

    /// Redeems the caller's full point balance in `asset` for payout units.
    /// Fails before any mutation; on success volume reset, point burn, and
    /// the inventory transfer land together.
    pub fn claim(
        &mut self,
        caller: &AccountId,
        asset: &AssetId,
    ) -> Result<ClaimReceipt, RewardError> {
        if !self.streamers.is_registered(caller) {
            return Err(RewardError::NotRegistered {
                account: caller.clone(),
            });
        }
        let config = self
            .reward_assets
            .get(asset)
            .ok_or_else(|| RewardError::NotConfigured {
                asset: asset.clone(),
            })?;
        let volume = self.ledger.volume(caller, asset);
        if volume == 0 {
            return Err(RewardError::NoVolume {
                streamer: caller.clone(),
                asset: asset.clone(),
            });
        }
        let points = self.ledger.balance(caller, asset);
        if points == 0 {
            return Err(RewardError::NoPoints {
                streamer: caller.clone(),
                asset: asset.clone(),
            });
        }
        let payout = points_to_payout(points, config.rate_per_point)?;
        let available = self.ledger.inventory(asset);
        if available < payout {
            return Err(RewardError::InsufficientInventory {
                asset: asset.clone(),
                required: payout,
                available,
            });
        }

        let volume_reset = self.ledger.reset_volume(caller, asset);
        let points_burned = self.ledger.burn_all(caller, asset);
        let paid = self.ledger.pay_out(caller, asset, payout);
        debug_assert!(paid && points_burned == points && volume_reset == volume);
        self.events.push(RewardEvent::ClaimCompleted {
            streamer: caller.clone(),
            asset: asset.clone(),
            points_burned,
            volume_reset,
            payout,
        });
        Ok(ClaimReceipt {
            points_burned,
            volume_reset,
            payout,
        })
    }

    /// Tops up the system's payout inventory for one reward asset.
    pub fn deposit_inventory(
        &mut self,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), RewardError> {
        if asset.is_empty() {
            return Err(RewardError::InvalidArgument("asset must be non-empty"));
        }
        self.ledger.deposit_inventory(asset, amount);
        self.events
            .push(RewardEvent::InventoryDeposited {
                asset: asset.clone(),
                amount,
            });
        Ok(())
    }

    // ---- reads ------------------------------------------------------------

    pub fn points(&self, streamer: &AccountId, asset: &AssetId) -> Amount {
        self.ledger.balance(streamer, asset)
    }

    pub fn volume(&self, streamer: &AccountId, asset: &AssetId) -> Amount {
        self.ledger.volume(streamer, asset)
    }

    pub fn holding(&self, account: &AccountId, asset: &AssetId) -> Amount {
        self.ledger.holding(account, asset)
    }

    pub fn inventory(&self, asset: &AssetId) -> Amount {
        self.ledger.inventory(asset)
    }

    pub fn total_points(&self, asset: &AssetId) -> Amount {
        self.ledger.total_points(asset)
    }

    pub fn events(&self) -> &[RewardEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }
}

/// `points * rate / POINT_SCALE`, truncating toward zero.
///
/// Computed as `(p / S) * r + (p % S) * r / S`, which equals the floor of
/// the full-width product divided by S exactly, without a 256-bit type.
fn points_to_payout(points: Amount, rate_per_point: Amount) -> Result<Amount, RewardError> {
    let whole = (points / POINT_SCALE)
        .checked_mul(rate_per_point)
        .ok_or(RewardError::Overflow)?;
    let frac = (points % POINT_SCALE)
        .checked_mul(rate_per_point)
        .ok_or(RewardError::Overflow)?
        / POINT_SCALE;
    whole.checked_add(frac).ok_or(RewardError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILLI: Amount = POINT_SCALE / 1_000; // 0.001 in scaled units

    fn owner() -> AccountId {
        "owner".to_string()
    }

    fn widget() -> AssetId {
        "WIDGET".to_string()
    }

    fn center() -> RewardCenter {
        RewardCenter::new(owner(), RewardConfig::default())
    }

    /// Center with streamer "sara" registered and WIDGET configured at
    /// rate 100 with ample inventory.
    fn funded_center() -> RewardCenter {
        let mut center = center();
        center.register(&"sara".into()).unwrap();
        center
            .setup_reward_asset(&owner(), &widget(), 100)
            .unwrap();
        center
            .deposit_inventory(&widget(), 1_000_000 * POINT_SCALE)
            .unwrap();
        center
    }

    fn buy(trader: &str, amount: Amount, referral: Option<&str>) -> TradeSettlement {
        TradeSettlement {
            trader: trader.to_string(),
            anchor_candidate: "ETH".into(),
            other_asset: widget(),
            anchor_to_other: true,
            anchor_delta: -(amount as i128),
            other_delta: (amount as i128) * 3,
            referral_memo: referral.map(|r| r.as_bytes().to_vec()),
        }
    }

    fn sell(trader: &str, amount: Amount, referral: Option<&str>) -> TradeSettlement {
        TradeSettlement {
            anchor_to_other: false,
            anchor_delta: amount as i128,
            other_delta: -((amount as i128) * 3),
            ..buy(trader, amount, referral)
        }
    }

    #[test]
    fn buy_accrues_five_times_anchor_amount() {
        let mut center = funded_center();
        let outcome = center.on_trade(&buy("tom", MILLI, Some("sara")), 10).unwrap();
        assert_eq!(
            outcome,
            AccrualOutcome::Accrued {
                points: 5 * MILLI,
                volume: MILLI
            }
        );
        assert_eq!(center.points(&"sara".into(), &widget()), 5 * MILLI);
        assert_eq!(center.volume(&"sara".into(), &widget()), MILLI);
    }

    #[test]
    fn sell_accrues_two_times_anchor_amount() {
        let mut center = funded_center();
        center.on_trade(&sell("tom", MILLI, Some("sara")), 10).unwrap();
        assert_eq!(center.points(&"sara".into(), &widget()), 2 * MILLI);
        assert_eq!(center.volume(&"sara".into(), &widget()), MILLI);
    }

    #[test]
    fn classification_event_is_recorded_even_for_ineligible_trades() {
        let mut center = center();
        let mut trade = buy("tom", MILLI, None);
        trade.anchor_candidate = "USDC".into();
        let outcome = center.on_trade(&trade, 10).unwrap();
        assert_eq!(outcome, AccrualOutcome::Skipped(SkipReason::NonAnchorPool));
        assert!(matches!(center.events(), [RewardEvent::Buy { .. }]));
    }

    #[test]
    fn eligibility_gates_short_circuit_in_order() {
        let mut center = center();
        assert_eq!(
            center.on_trade(&buy("tom", MILLI, None), 10).unwrap(),
            AccrualOutcome::Skipped(SkipReason::MissingReferral)
        );
        assert_eq!(
            center.on_trade(&buy("tom", MILLI, Some("sara")), 11).unwrap(),
            AccrualOutcome::Skipped(SkipReason::UnregisteredReferral)
        );
        center.register(&"sara".into()).unwrap();
        assert_eq!(
            center.on_trade(&buy("tom", MILLI, Some("sara")), 12).unwrap(),
            AccrualOutcome::Skipped(SkipReason::UnconfiguredAsset)
        );
        // none of the skips minted anything or touched the cooldown
        assert_eq!(center.points(&"sara".into(), &widget()), 0);
        assert_eq!(center.volume(&"sara".into(), &widget()), 0);
    }

    #[test]
    fn invalid_utf8_memo_means_no_referral() {
        let mut center = funded_center();
        let mut trade = buy("tom", MILLI, None);
        trade.referral_memo = Some(vec![0xff, 0xfe]);
        assert_eq!(
            center.on_trade(&trade, 10).unwrap(),
            AccrualOutcome::Skipped(SkipReason::MissingReferral)
        );
    }

    #[test]
    fn second_trade_inside_cooldown_earns_nothing_but_touches_timer() {
        let mut center = funded_center();
        center.on_trade(&buy("tom", MILLI, Some("sara")), 100).unwrap();
        let outcome = center.on_trade(&sell("tom", MILLI, Some("sara")), 130).unwrap();
        assert_eq!(outcome, AccrualOutcome::Skipped(SkipReason::CooldownActive));
        assert_eq!(center.points(&"sara".into(), &widget()), 5 * MILLI);
        assert_eq!(center.volume(&"sara".into(), &widget()), MILLI);
        assert!(center
            .events()
            .iter()
            .any(|e| matches!(e, RewardEvent::CooldownActive { .. })));
        // the rejected trade reset the timer, so 60 after the FIRST trade
        // is still inside the window
        assert_eq!(
            center.on_trade(&buy("tom", MILLI, Some("sara")), 160).unwrap(),
            AccrualOutcome::Skipped(SkipReason::CooldownActive)
        );
        assert!(matches!(
            center.on_trade(&buy("tom", MILLI, Some("sara")), 220).unwrap(),
            AccrualOutcome::Accrued { .. }
        ));
    }

    #[test]
    fn cooldown_is_per_trader_pair() {
        let mut center = funded_center();
        center.on_trade(&buy("tom", MILLI, Some("sara")), 100).unwrap();
        let outcome = center.on_trade(&buy("uma", MILLI, Some("sara")), 101).unwrap();
        assert!(matches!(outcome, AccrualOutcome::Accrued { .. }));
    }

    #[test]
    fn claim_round_trip_zeroes_state_and_pays_exactly() {
        let mut center = funded_center();
        center
            .on_trade(&buy("tom", POINT_SCALE, Some("sara")), 10)
            .unwrap();
        let receipt = center.claim(&"sara".into(), &widget()).unwrap();
        let points = 5 * POINT_SCALE;
        assert_eq!(receipt.points_burned, points);
        assert_eq!(receipt.volume_reset, POINT_SCALE);
        assert_eq!(receipt.payout, 500);
        assert_eq!(center.points(&"sara".into(), &widget()), 0);
        assert_eq!(center.volume(&"sara".into(), &widget()), 0);
        assert_eq!(center.holding(&"sara".into(), &widget()), receipt.payout);
    }

    #[test]
    fn claim_preconditions_fail_cleanly() {
        let mut center = funded_center();
        assert!(matches!(
            center.claim(&"nobody".into(), &widget()),
            Err(RewardError::NotRegistered { .. })
        ));
        assert!(matches!(
            center.claim(&"sara".into(), &"GADGET".into()),
            Err(RewardError::NotConfigured { .. })
        ));
        let before = center.clone();
        assert!(matches!(
            center.claim(&"sara".into(), &widget()),
            Err(RewardError::NoVolume { .. })
        ));
        assert_eq!(center, before);
    }

    #[test]
    fn insufficient_inventory_leaves_state_unchanged_and_retry_succeeds() {
        let mut center = center();
        center.register(&"sara".into()).unwrap();
        center
            .setup_reward_asset(&owner(), &widget(), 100 * POINT_SCALE)
            .unwrap();
        center.on_trade(&buy("tom", MILLI, Some("sara")), 10).unwrap();
        // 0.005 points at 100-units-per-point
        let expected_payout = 5 * MILLI * 100;
        center.deposit_inventory(&widget(), expected_payout - 1).unwrap();

        let before_events = center.events().len();
        let before = center.clone();
        let err = center.claim(&"sara".into(), &widget()).unwrap_err();
        match err {
            RewardError::InsufficientInventory {
                required,
                available,
                ..
            } => {
                assert_eq!(required, expected_payout);
                assert_eq!(available, expected_payout - 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(center, before);
        assert_eq!(center.events().len(), before_events);

        center.deposit_inventory(&widget(), 1).unwrap();
        let receipt = center.claim(&"sara".into(), &widget()).unwrap();
        assert_eq!(receipt.payout, expected_payout);
        assert_eq!(center.inventory(&widget()), 0);
    }

    #[test]
    fn conservation_of_minted_minus_burned() {
        let mut center = funded_center();
        center.register(&"rhea".into()).unwrap();
        center.on_trade(&buy("tom", MILLI, Some("sara")), 10).unwrap();
        center.on_trade(&sell("uma", 2 * MILLI, Some("rhea")), 11).unwrap();
        let minted = 5 * MILLI + 2 * 2 * MILLI;
        assert_eq!(center.total_points(&widget()), minted);
        let receipt = center.claim(&"sara".into(), &widget()).unwrap();
        assert_eq!(center.total_points(&widget()), minted - receipt.points_burned);
    }

    #[test]
    fn updater_grant_allows_setup_and_setup_is_single_shot() {
        let mut center = center();
        let upd: AccountId = "upd".into();
        assert!(matches!(
            center.setup_reward_asset(&upd, &widget(), 100),
            Err(RewardError::Unauthorized { .. })
        ));
        center.grant_updater(&owner(), &widget(), &upd).unwrap();
        assert!(center.is_updater(&widget(), &upd));
        center.setup_reward_asset(&upd, &widget(), 100).unwrap();
        assert!(matches!(
            center.setup_reward_asset(&upd, &widget(), 100),
            Err(RewardError::AlreadyConfigured { .. })
        ));
    }

    #[test]
    fn rate_update_records_old_and_new_rate() {
        let mut center = funded_center();
        center.update_rate(&owner(), &widget(), 250).unwrap();
        assert_eq!(center.reward_asset_info(&widget()).unwrap().rate_per_point, 250);
        assert!(center.events().iter().any(|e| matches!(
            e,
            RewardEvent::RateUpdated {
                old_rate: 100,
                new_rate: 250,
                ..
            }
        )));
    }

    #[test]
    fn payout_truncates_toward_zero() {
        // 1.5 points at rate 3 => 4.5, truncated to 4
        let points = POINT_SCALE + POINT_SCALE / 2;
        assert_eq!(points_to_payout(points, 3).unwrap(), 4);
        assert_eq!(points_to_payout(0, 100).unwrap(), 0);
        // the split form matches the naive product where it fits
        assert_eq!(
            points_to_payout(7 * POINT_SCALE / 10, 1_000).unwrap(),
            7 * POINT_SCALE / 10 * 1_000 / POINT_SCALE
        );
    }

    #[test]
    fn payout_overflow_is_an_error() {
        assert!(matches!(
            points_to_payout(Amount::MAX, Amount::MAX),
            Err(RewardError::Overflow)
        ));
    }

    #[test]
    fn trade_overflow_rejects_before_any_write() {
        let mut center = funded_center();
        let before = center.clone();
        let mut huge = buy("tom", 1, Some("sara"));
        huge.anchor_delta = -i128::MAX;
        let err = center.on_trade(&huge, 10).unwrap_err();
        assert!(matches!(err, RewardError::Overflow));
        assert_eq!(center, before);
    }

    #[test]
    fn center_round_trips_through_json() {
        let mut center = funded_center();
        center.on_trade(&buy("tom", MILLI, Some("sara")), 10).unwrap();
        let json = serde_json::to_string(&center).unwrap();
        let back: RewardCenter = serde_json::from_str(&json).unwrap();
        assert_eq!(center, back);
        assert_eq!(center.snapshot().digest, back.snapshot().digest);
    }
}
