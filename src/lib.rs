//! Referral accrual and reward ledger for streamer-referred pool trades.
//!
//! Streamers register once, trades carrying their referral memo accrue them
//! per-asset points and referred volume, and accumulated points are redeemed
//! for a configured quantity of the reward asset. The crate is organised as
//! small, leaf-first modules:
//!
//! * [`registry`] — owner/updater roles, streamer registration, and per-asset
//!   reward rates.
//! * [`cooldown`] — the anti-abuse trade timer between a referrer and a
//!   trader.
//! * [`ledger`] — the multi-asset balance store for points, volume, payout
//!   holdings, and system inventory.
//! * [`engine`] — the [`RewardCenter`](engine::RewardCenter) context that
//!   wires everything together and exposes the mutating entry points.
//!
//! All state lives in one explicit [`engine::RewardCenter`] instance; there
//! are no globals, and every mutating call is a single indivisible unit that
//! either fully applies or leaves the state untouched.

pub mod cooldown;
pub mod engine;
pub mod events;
pub mod ledger;
pub mod registry;

mod error;

pub use engine::{
    AccrualOutcome, ClaimReceipt, RewardCenter, RewardConfig, SkipReason, TradeSettlement,
};
pub use error::RewardError;
pub use events::RewardEvent;
pub use ledger::{AccountId, Amount, AssetId, LedgerSnapshot, POINT_SCALE};
