use soroban_sdk::{xdr::ToXdr, Address, BytesN, Env};

use crate::errors::CampaignError;
use crate::storage_types::*;

pub fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn get_instance<V>(e: &Env, key: &DataKey) -> Result<V, CampaignError>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    e.storage()
        .instance()
        .get(key)
        .ok_or(CampaignError::NotInitialized)
}

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Owner)
}

pub fn owner(e: &Env) -> Result<Address, CampaignError> {
    get_instance(e, &DataKey::Owner)
}

pub fn set_owner(e: &Env, owner: &Address) {
    e.storage().instance().set(&DataKey::Owner, owner);
}

pub fn trusted_address(e: &Env) -> Result<BytesN<20>, CampaignError> {
    get_instance(e, &DataKey::TrustedAddress)
}

pub fn set_trusted_address(e: &Env, signer: &BytesN<20>) {
    e.storage().instance().set(&DataKey::TrustedAddress, signer);
}

pub fn treasury(e: &Env) -> Result<Address, CampaignError> {
    get_instance(e, &DataKey::Treasury)
}

pub fn set_treasury(e: &Env, treasury: &Address) {
    e.storage().instance().set(&DataKey::Treasury, treasury);
}

pub fn native_token(e: &Env) -> Result<Address, CampaignError> {
    get_instance(e, &DataKey::NativeToken)
}

pub fn set_native_token(e: &Env, token: &Address) {
    e.storage().instance().set(&DataKey::NativeToken, token);
}

pub fn claim_fee(e: &Env) -> Result<i128, CampaignError> {
    get_instance(e, &DataKey::ClaimFee)
}

pub fn set_claim_fee(e: &Env, fee: i128) {
    e.storage().instance().set(&DataKey::ClaimFee, &fee);
}

pub fn sponsored_claim_fee(e: &Env) -> Result<i128, CampaignError> {
    get_instance(e, &DataKey::SponsoredClaimFee)
}

pub fn set_sponsored_claim_fee(e: &Env, fee: i128) {
    e.storage().instance().set(&DataKey::SponsoredClaimFee, &fee);
}

pub fn total_claim_fees(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalClaimFees)
        .unwrap_or(0)
}

pub fn set_total_claim_fees(e: &Env, total: i128) {
    e.storage().instance().set(&DataKey::TotalClaimFees, &total);
}

pub fn reward_ledger(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::RewardLedger)
}

pub fn set_reward_ledger(e: &Env, ledger: &Option<Address>) {
    match ledger {
        Some(ledger) => e.storage().instance().set(&DataKey::RewardLedger, ledger),
        None => e.storage().instance().remove(&DataKey::RewardLedger),
    }
}

pub fn config(e: &Env) -> Result<CampaignsConfig, CampaignError> {
    Ok(CampaignsConfig {
        owner: owner(e)?,
        trusted_address: trusted_address(e)?,
        treasury: treasury(e)?,
        native_token: native_token(e)?,
        claim_fee: claim_fee(e)?,
        sponsored_claim_fee: sponsored_claim_fee(e)?,
        total_claim_fees: total_claim_fees(e),
        reward_ledger: reward_ledger(e),
    })
}

/// Number of campaigns the creator has opened, which is also the next index.
pub fn campaign_count(e: &Env, creator: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&PersistentKey::CampaignCount(creator.clone()))
        .unwrap_or(0)
}

pub fn set_campaign_count(e: &Env, creator: &Address, count: u32) {
    let key = PersistentKey::CampaignCount(creator.clone());
    e.storage().persistent().set(&key, &count);
    extend_persistent(e, &key);
}

pub fn load_campaign(e: &Env, creator: &Address, campaign_id: u32) -> Result<Campaign, CampaignError> {
    let core: CampaignCore = e
        .storage()
        .persistent()
        .get(&PersistentKey::Campaign(creator.clone(), campaign_id))
        .ok_or(CampaignError::CampaignNotFound)?;

    let mode = if core.is_gasless {
        CampaignMode::Gasless
    } else {
        // Records written before sponsorship existed have no quota entry
        match e
            .storage()
            .persistent()
            .get::<PersistentKey, SponsoredQuota>(&PersistentKey::Sponsorship(creator.clone(), campaign_id))
        {
            Some(quota) if quota.max_sponsored_claims > 0 => CampaignMode::Sponsored(quota),
            _ => CampaignMode::Standard,
        }
    };

    Ok(Campaign {
        pool_asset: core.pool_asset,
        max_claims: core.max_claims,
        no_of_claims: core.no_of_claims,
        amount_per_claim: core.amount_per_claim,
        is_inactive: core.is_inactive,
        mode,
    })
}

pub fn save_campaign(e: &Env, creator: &Address, campaign_id: u32, campaign: &Campaign) {
    let core = CampaignCore {
        pool_asset: campaign.pool_asset.clone(),
        max_claims: campaign.max_claims,
        no_of_claims: campaign.no_of_claims,
        amount_per_claim: campaign.amount_per_claim,
        is_inactive: campaign.is_inactive,
        is_gasless: campaign.mode.is_gasless(),
    };
    let core_key = PersistentKey::Campaign(creator.clone(), campaign_id);
    e.storage().persistent().set(&core_key, &core);
    extend_persistent(e, &core_key);

    if let CampaignMode::Sponsored(quota) = &campaign.mode {
        let quota_key = PersistentKey::Sponsorship(creator.clone(), campaign_id);
        e.storage().persistent().set(&quota_key, quota);
        extend_persistent(e, &quota_key);
    }
}

/// Dedup fingerprint of one claimant against one campaign.
pub fn claim_fingerprint(
    e: &Env,
    creator: &Address,
    campaign_id: u32,
    claimant: &Address,
) -> BytesN<32> {
    let mut bytes = creator.clone().to_xdr(e);
    bytes.append(&campaign_id.to_xdr(e));
    bytes.append(&claimant.clone().to_xdr(e));
    e.crypto().sha256(&bytes).to_bytes()
}

pub fn is_claimed(e: &Env, fingerprint: &BytesN<32>) -> bool {
    e.storage()
        .persistent()
        .has(&PersistentKey::Claimed(fingerprint.clone()))
}

pub fn mark_claimed(e: &Env, fingerprint: &BytesN<32>) {
    let key = PersistentKey::Claimed(fingerprint.clone());
    e.storage().persistent().set(&key, &true);
    extend_persistent(e, &key);
}

pub fn nonce(e: &Env, user: &Address) -> u64 {
    e.storage()
        .persistent()
        .get(&PersistentKey::Nonce(user.clone()))
        .unwrap_or(0)
}

pub fn set_nonce(e: &Env, user: &Address, nonce: u64) {
    let key = PersistentKey::Nonce(user.clone());
    e.storage().persistent().set(&key, &nonce);
    extend_persistent(e, &key);
}
