use soroban_sdk::{contracttype, Address, Bytes, Env, Symbol};

use crate::storage_types::PoolAsset;

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub creator: Address,
    pub campaign_id: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignClaimedEvent {
    pub creator: Address,
    pub campaign_id: u32,
    pub claimant: Address,
    pub asset: PoolAsset,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignWithdrawnEvent {
    pub creator: Address,
    pub campaign_id: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct ClaimFeePaidEvent {
    pub amount: i128,
    pub claimant: Address,
    pub platform: Address,
    pub creator: Address,
    pub campaign_id: u32,
    pub referrer: Option<Address>,
}

#[contracttype]
#[derive(Clone)]
pub struct SponsoredClaimFeesPaidEvent {
    pub slots: u32,
    pub per_slot_fee: i128,
    pub treasury: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct WithdrawalEvent {
    pub amount: i128,
    pub to: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct MetaTransactionExecutedEvent {
    pub user: Address,
    pub nonce: u64,
    pub function_payload: Bytes,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreatedEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_created"),), event);
}

pub fn emit_campaign_claimed(env: &Env, event: CampaignClaimedEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_claimed"),), event);
}

pub fn emit_campaign_withdrawn(env: &Env, event: CampaignWithdrawnEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_withdrawn"),), event);
}

pub fn emit_claim_fee_paid(env: &Env, event: ClaimFeePaidEvent) {
    env.events()
        .publish((Symbol::new(env, "claim_fee_paid"),), event);
}

pub fn emit_sponsored_claim_fees_paid(env: &Env, event: SponsoredClaimFeesPaidEvent) {
    env.events()
        .publish((Symbol::new(env, "sponsored_claim_fees_paid"),), event);
}

pub fn emit_withdrawal(env: &Env, event: WithdrawalEvent) {
    env.events().publish((Symbol::new(env, "withdrawal"),), event);
}

pub fn emit_ownership_transferred(env: &Env, event: OwnershipTransferredEvent) {
    env.events()
        .publish((Symbol::new(env, "ownership_transferred"),), event);
}

pub fn emit_meta_transaction_executed(env: &Env, event: MetaTransactionExecutedEvent) {
    env.events()
        .publish((Symbol::new(env, "meta_transaction_executed"),), event);
}
