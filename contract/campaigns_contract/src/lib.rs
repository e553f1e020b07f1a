#![no_std]


use campaigns_common::{admin, claim_auth, engine, storage, typed_data};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env};

pub use campaigns_common::{
    Campaign, CampaignError, CampaignMode, CampaignParams, CampaignsConfig, ClaimRequest,
    PoolAsset, SponsoredQuota,
};

const VARIANT: campaigns_common::Variant = campaigns_common::Variant::Standard;

#[contract]
pub struct CampaignsContract;

#[contractimpl]
impl CampaignsContract {
    /// Initialize the contract. `native_token` is the asset contract used for
    /// pools marked native and for every fee.
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

    /// Open a campaign and escrow `max_claims * amount_per_claim` of the pool
    /// asset. Returns the creator-scoped campaign index.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        pool_asset: PoolAsset,
        max_claims: u32,
        amount_per_claim: i128,
        max_sponsored_claims: u32,
        paid_value: i128,
    ) -> Result<u32, CampaignError> {
        creator.require_auth();
        let params = CampaignParams {
            pool_asset,
            max_claims,
            amount_per_claim,
            is_gasless: false,
            max_sponsored_claims,
        };
        engine::create_campaign(&env, &creator, &params, paid_value)
    }

    /// Redeem one claim with an authorization signed by the trusted address.
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

    /// Close the campaign and return the unclaimed remainder to its creator.
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

    /// Sweep claim fees retained while no reward ledger was set.
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

    pub fn domain_separator(env: Env) -> BytesN<32> {
        typed_data::domain_separator(&env, VARIANT.domain_name())
    }

    /// Digest the trusted address signs to authorize `claimant`.
    pub fn claim_digest(env: Env, creator: Address, campaign_id: u32, claimant: Address) -> BytesN<32> {
        claim_auth::claim_digest(&env, VARIANT, &creator, campaign_id, &claimant).to_bytes()
    }
}
