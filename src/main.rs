use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};

use refledger::{RewardCenter, RewardConfig, TradeSettlement};

#[derive(Parser)]
#[command(name = "refledger", version, about = "Referral accrual and reward ledger")]
struct Cli {
    /// JSON state file holding the reward center.
    #[arg(long, default_value = "refledger.state.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a fresh state file.
    Init {
        #[arg(long)]
        owner: String,
        /// Asset id treated as the pool anchor (native/quote) asset.
        #[arg(long, default_value = "ETH")]
        anchor: String,
        /// Cooldown window between trades of one (referrer, trader) pair.
        #[arg(long, default_value_t = 60)]
        cooldown: u64,
    },
    /// Register the calling account as a streamer.
    Register {
        #[arg(long)]
        account: String,
    },
    TransferOwnership {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        new_owner: String,
    },
    GrantUpdater {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        asset: String,
        #[arg(long)]
        account: String,
    },
    RevokeUpdater {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        asset: String,
        #[arg(long)]
        account: String,
    },
    /// Configure a reward asset (single-shot).
    SetupAsset {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        asset: String,
        #[arg(long)]
        rate: u128,
    },
    UpdateRate {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        asset: String,
        #[arg(long)]
        rate: u128,
    },
    /// Top up the system's payout inventory for an asset.
    DepositInventory {
        #[arg(long)]
        asset: String,
        #[arg(long)]
        amount: u128,
    },
    /// Feed one settled trade through the accrual engine.
    Trade {
        #[arg(long)]
        trader: String,
        #[arg(long)]
        anchor: String,
        #[arg(long)]
        other: String,
        /// Sell direction (other asset spent for anchor); default is buy.
        #[arg(long)]
        sell: bool,
        #[arg(long, allow_hyphen_values = true)]
        anchor_delta: i128,
        #[arg(long, allow_hyphen_values = true)]
        other_delta: i128,
        /// Referral account attached to the trade.
        #[arg(long, conflicts_with = "referral_hex")]
        referral: Option<String>,
        /// Raw referral metadata bytes in hex.
        #[arg(long)]
        referral_hex: Option<String>,
        /// Settlement timestamp; defaults to the current unix time.
        #[arg(long)]
        now: Option<u64>,
    },
    /// Redeem the caller's points in an asset for a payout.
    Claim {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        asset: String,
    },
    /// Print the current ledger snapshot (and optionally the event log).
    Show {
        #[arg(long)]
        events: bool,
    },
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Command::Init {
        owner,
        anchor,
        cooldown,
    } = &cli.command
    {
        let center = RewardCenter::new(
            owner.clone(),
            RewardConfig {
                anchor_asset: anchor.clone(),
                cooldown_window: *cooldown,
                ..RewardConfig::default()
            },
        );
        save(&cli.state, &center)?;
        println!("initialized {} (owner {owner})", cli.state.display());
        return Ok(());
    }

    let mut center = load(&cli.state)?;
    let seen = center.events().len();

    match cli.command {
        Command::Init { .. } => unreachable!(),
        Command::Register { account } => center.register(&account)?,
        Command::TransferOwnership { caller, new_owner } => {
            center.transfer_ownership(&caller, new_owner)?
        }
        Command::GrantUpdater {
            caller,
            asset,
            account,
        } => center.grant_updater(&caller, &asset, &account)?,
        Command::RevokeUpdater {
            caller,
            asset,
            account,
        } => center.revoke_updater(&caller, &asset, &account)?,
        Command::SetupAsset {
            caller,
            asset,
            rate,
        } => center.setup_reward_asset(&caller, &asset, rate)?,
        Command::UpdateRate {
            caller,
            asset,
            rate,
        } => center.update_rate(&caller, &asset, rate)?,
        Command::DepositInventory { asset, amount } => {
            center.deposit_inventory(&asset, amount)?
        }
        Command::Trade {
            trader,
            anchor,
            other,
            sell,
            anchor_delta,
            other_delta,
            referral,
            referral_hex,
            now,
        } => {
            let referral_memo = match (referral, referral_hex) {
                (Some(account), _) => Some(account.into_bytes()),
                (None, Some(raw)) => Some(hex::decode(raw.trim())?),
                (None, None) => None,
            };
            let trade = TradeSettlement {
                trader,
                anchor_candidate: anchor,
                other_asset: other,
                anchor_to_other: !sell,
                anchor_delta,
                other_delta,
                referral_memo,
            };
            let now = match now {
                Some(now) => now,
                None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
            };
            let outcome = center.on_trade(&trade, now)?;
            println!("{}", serde_json::to_string(&outcome)?);
        }
        Command::Claim { caller, asset } => {
            let receipt = center.claim(&caller, &asset)?;
            println!("{}", serde_json::to_string(&receipt)?);
        }
        Command::Show { events } => {
            println!("owner: {}", center.owner());
            println!("{}", serde_json::to_string_pretty(&center.snapshot())?);
            if events {
                for event in center.events() {
                    println!("{}", serde_json::to_string(event)?);
                }
            }
            return Ok(());
        }
    }

    for event in &center.events()[seen..] {
        println!("{}", serde_json::to_string(event)?);
    }
    save(&cli.state, &center)
}

fn load(path: &Path) -> Result<RewardCenter, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err} (run init first?)", path.display()))?;
    Ok(serde_json::from_str(&raw)?)
}

fn save(path: &Path, center: &RewardCenter) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(center)?)?;
    Ok(())
}
