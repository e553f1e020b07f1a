use soroban_sdk::{contractclient, log, token, Address, Env, Vec};

use crate::accounting::RewardSplit;
use crate::errors::CampaignError;
use crate::storage;
use crate::storage_types::{PoolAsset, RewardShare};

/// Interface of the external rewards ledger that holds withdrawable balances.
/// The depositor transfers `total` to the ledger before calling, and the
/// shares must add up to exactly that amount.
#[contractclient(name = "RewardLedgerClient")]
pub trait RewardLedgerInterface {
    fn deposit_rewards(env: Env, token: Address, total: i128, shares: Vec<RewardShare>);
}

/// Token contract backing a pool asset.
pub fn asset_address(e: &Env, asset: &PoolAsset) -> Result<Address, CampaignError> {
    match asset {
        PoolAsset::Native => storage::native_token(e),
        PoolAsset::Token(token) => Ok(token.clone()),
    }
}

pub fn transfer(
    e: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), CampaignError> {
    if amount == 0 {
        return Ok(());
    }
    match token::TokenClient::new(e, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(e, "transfer failed", token.clone(), amount);
            Err(CampaignError::TransferFailed)
        }
    }
}

/// Pulls `amount` of `token` from `from` into this contract against an
/// allowance granted to the contract.
pub fn pull_allowance(e: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), CampaignError> {
    let this = e.current_contract_address();
    match token::TokenClient::new(e, token).try_transfer_from(&this, from, &this, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(e, "transfer_from failed", token.clone(), amount);
            Err(CampaignError::TransferFailed)
        }
    }
}

/// Moves a collected fee held by this contract into the reward ledger,
/// credited to treasury, creator and referrer.
pub fn deposit_claim_fee(
    e: &Env,
    ledger: &Address,
    fee: i128,
    creator: &Address,
    referrer: &Option<Address>,
) -> Result<RewardSplit, CampaignError> {
    let split = RewardSplit::compute(fee, referrer.is_some())?;
    let native = storage::native_token(e)?;

    let mut shares = Vec::new(e);
    shares.push_back(RewardShare {
        recipient: storage::treasury(e)?,
        amount: split.platform,
    });
    shares.push_back(RewardShare {
        recipient: creator.clone(),
        amount: split.creator,
    });
    if let Some(referrer) = referrer {
        shares.push_back(RewardShare {
            recipient: referrer.clone(),
            amount: split.referrer,
        });
    }

    transfer(e, &native, &e.current_contract_address(), ledger, split.total())?;
    match RewardLedgerClient::new(e, ledger).try_deposit_rewards(&native, &split.total(), &shares) {
        Ok(Ok(())) => Ok(split),
        _ => Err(CampaignError::RewardDepositFailed),
    }
}
