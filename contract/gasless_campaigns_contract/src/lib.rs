#![no_std]

mod meta_tx;

#[cfg(test)]
mod test;

use campaigns_common::{admin, claim_auth, engine, storage, typed_data};
use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env};

pub use campaigns_common::{
    Campaign, CampaignError, CampaignMode, CampaignParams, CampaignsConfig, ClaimRequest,
    PoolAsset, SponsoredQuota,
};
pub use meta_tx::MetaCall;

const VARIANT: campaigns_common::Variant = campaigns_common::Variant::Gasless;

#[contract]
pub struct GaslessCampaignsContract;

#[contractimpl]
impl GaslessCampaignsContract {
    pub fn initialize(
        env: Env,
        owner: Address,
        trusted_address: BytesN<20>,
        treasury: Address,
        native_token: Address,
        claim_fee: i128,
        sponsored_claim_fee: i128,
    ) -> Result<(), CampaignError> {
        admin::initialize(
            &env,
            &owner,
            &trusted_address,
            &treasury,
            &native_token,
            claim_fee,
            sponsored_claim_fee,
        )
    }

    /// Open a campaign. Gasless campaigns never charge a claim fee and cannot
    /// carry a sponsorship quota.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        pool_asset: PoolAsset,
        max_claims: u32,
        amount_per_claim: i128,
        is_gasless: bool,
        max_sponsored_claims: u32,
        paid_value: i128,
    ) -> Result<u32, CampaignError> {
        creator.require_auth();
        let params = CampaignParams {
            pool_asset,
            max_claims,
            amount_per_claim,
            is_gasless,
            max_sponsored_claims,
        };
        engine::create_campaign(&env, &creator, &params, paid_value)
    }

    pub fn claim(
        env: Env,
        claimant: Address,
        campaign_manager: Address,
        campaign_id: u32,
        r: BytesN<32>,
        s: BytesN<32>,
        v: u32,
        referrer: Option<Address>,
        paid_value: i128,
    ) -> Result<(), CampaignError> {
        claimant.require_auth();
        let request = ClaimRequest {
            campaign_manager,
            campaign_id,
            r,
            s,
            v,
            referrer,
        };
        engine::claim(&env, VARIANT, &claimant, &request, paid_value)
    }

    pub fn withdraw_campaign(env: Env, creator: Address, campaign_id: u32) -> Result<i128, CampaignError> {
        creator.require_auth();
        engine::withdraw_campaign(&env, &creator, campaign_id)
    }

    pub fn increase_max_sponsored_claims(
        env: Env,
        payer: Address,
        campaign_manager: Address,
        campaign_id: u32,
        additional_slots: u32,
        paid_value: i128,
    ) -> Result<(), CampaignError> {
        payer.require_auth();
        engine::increase_max_sponsored_claims(
            &env,
            &payer,
            &campaign_manager,
            campaign_id,
            additional_slots,
            paid_value,
        )
    }

    /// Run `function_payload` (XDR of a `MetaCall`) on behalf of `user`. The
    /// user must authorize `meta_transaction_digest(user, function_payload)`;
    /// anyone may submit it.
    pub fn execute_meta_transaction(env: Env, user: Address, function_payload: Bytes) -> Result<(), CampaignError> {
        meta_tx::execute(&env, &user, &function_payload)
    }

    // Administration

    pub fn set_trusted_address(env: Env, owner: Address, trusted_address: BytesN<20>) -> Result<(), CampaignError> {
        admin::set_trusted_address(&env, &owner, &trusted_address)
    }

    pub fn set_treasury(env: Env, owner: Address, treasury: Address) -> Result<(), CampaignError> {
        admin::set_treasury(&env, &owner, &treasury)
    }

    pub fn set_claim_fee(env: Env, owner: Address, claim_fee: i128) -> Result<(), CampaignError> {
        admin::set_claim_fee(&env, &owner, claim_fee)
    }

    pub fn set_sponsored_claim_fee(env: Env, owner: Address, sponsored_claim_fee: i128) -> Result<(), CampaignError> {
        admin::set_sponsored_claim_fee(&env, &owner, sponsored_claim_fee)
    }

    pub fn set_reward_ledger(env: Env, owner: Address, reward_ledger: Option<Address>) -> Result<(), CampaignError> {
        admin::set_reward_ledger(&env, &owner, &reward_ledger)
    }

    pub fn withdraw_total_claim_fees(env: Env, owner: Address, to: Address) -> Result<i128, CampaignError> {
        admin::withdraw_total_claim_fees(&env, &owner, &to)
    }

    pub fn transfer_ownership(env: Env, owner: Address, new_owner: Address) -> Result<(), CampaignError> {
        admin::transfer_ownership(&env, &owner, &new_owner)
    }

    pub fn upgrade(env: Env, owner: Address, new_wasm_hash: BytesN<32>) -> Result<(), CampaignError> {
        admin::upgrade(&env, &owner, new_wasm_hash)
    }

    // Views

    pub fn get_campaign(env: Env, creator: Address, campaign_id: u32) -> Result<Campaign, CampaignError> {
        storage::load_campaign(&env, &creator, campaign_id)
    }

    pub fn campaign_count(env: Env, creator: Address) -> u32 {
        storage::campaign_count(&env, &creator)
    }

    pub fn has_claimed(env: Env, creator: Address, campaign_id: u32, claimant: Address) -> bool {
        let fingerprint = storage::claim_fingerprint(&env, &creator, campaign_id, &claimant);
        storage::is_claimed(&env, &fingerprint)
    }

    pub fn get_config(env: Env) -> Result<CampaignsConfig, CampaignError> {
        storage::config(&env)
    }

    pub fn get_nonce(env: Env, user: Address) -> u64 {
        storage::nonce(&env, &user)
    }

    pub fn domain_separator(env: Env) -> BytesN<32> {
        typed_data::domain_separator(&env, VARIANT.domain_name())
    }

    pub fn claim_digest(env: Env, creator: Address, campaign_id: u32, claimant: Address) -> BytesN<32> {
        claim_auth::claim_digest(&env, VARIANT, &creator, campaign_id, &claimant).to_bytes()
    }

    /// Digest `user` must authorize to relay `function_payload` at their
    /// current nonce.
    pub fn meta_transaction_digest(env: Env, user: Address, function_payload: Bytes) -> BytesN<32> {
        let nonce = storage::nonce(&env, &user);
        meta_tx::digest(&env, &user, nonce, &function_payload).to_bytes()
    }
}
