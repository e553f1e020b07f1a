//! Campaign lifecycle: creation, claims, sponsorship top-ups and withdrawal.
//!
//! Every operation validates and writes its state changes before the first
//! token call, so a callee never observes a half-updated campaign. Callers
//! have already authorized `creator`, `claimant` or `payer`.

use soroban_sdk::{log, Address, Env};

use crate::accounting::{sponsorship_cost, PaymentRegime};
use crate::claim_auth;
use crate::errors::CampaignError;
use crate::events;
use crate::settlement;
use crate::storage;
use crate::storage_types::*;

pub fn create_campaign(
    e: &Env,
    creator: &Address,
    params: &CampaignParams,
    paid_value: i128,
) -> Result<u32, CampaignError> {
    if params.max_claims == 0 {
        return Err(CampaignError::InvalidMaxClaims);
    }
    if params.amount_per_claim <= 0 {
        return Err(CampaignError::InvalidAmountPerClaim);
    }
    if params.max_sponsored_claims > params.max_claims {
        return Err(CampaignError::SponsoredClaimsExceedMax);
    }
    let mode = CampaignMode::new(params.is_gasless, params.max_sponsored_claims)?;

    let escrow = escrow_amount(params.max_claims, params.amount_per_claim)?;
    let per_slot_fee = storage::sponsored_claim_fee(e)?;
    let sponsorship_fee = sponsorship_cost(params.max_sponsored_claims, per_slot_fee)?;
    let expected = match params.pool_asset {
        PoolAsset::Native => escrow
            .checked_add(sponsorship_fee)
            .ok_or(CampaignError::ArithmeticOverflow)?,
        PoolAsset::Token(_) => sponsorship_fee,
    };
    if paid_value != expected {
        return Err(CampaignError::IncorrectValue);
    }

    let campaign_id = storage::campaign_count(e, creator);
    let next_id = campaign_id
        .checked_add(1)
        .ok_or(CampaignError::ArithmeticOverflow)?;
    let campaign = Campaign {
        pool_asset: params.pool_asset.clone(),
        max_claims: params.max_claims,
        no_of_claims: 0,
        amount_per_claim: params.amount_per_claim,
        is_inactive: false,
        mode,
    };
    storage::save_campaign(e, creator, campaign_id, &campaign);
    storage::set_campaign_count(e, creator, next_id);

    let native = storage::native_token(e)?;
    let this = e.current_contract_address();
    match &params.pool_asset {
        PoolAsset::Native => settlement::transfer(e, &native, creator, &this, escrow)?,
        PoolAsset::Token(token) => settlement::pull_allowance(e, token, creator, escrow)?,
    }

    if params.max_sponsored_claims > 0 {
        let treasury = storage::treasury(e)?;
        settlement::transfer(e, &native, creator, &treasury, sponsorship_fee)?;
        events::emit_sponsored_claim_fees_paid(
            e,
            events::SponsoredClaimFeesPaidEvent {
                slots: params.max_sponsored_claims,
                per_slot_fee,
                treasury,
            },
        );
    }

    events::emit_campaign_created(
        e,
        events::CampaignCreatedEvent {
            creator: creator.clone(),
            campaign_id,
        },
    );
    Ok(campaign_id)
}

pub fn claim(
    e: &Env,
    variant: Variant,
    claimant: &Address,
    request: &ClaimRequest,
    paid_value: i128,
) -> Result<(), CampaignError> {
    claim_auth::verify_claim(e, variant, claimant, request)?;

    let creator = &request.campaign_manager;
    let campaign_id = request.campaign_id;
    let mut campaign = storage::load_campaign(e, creator, campaign_id)?;
    if campaign.is_inactive {
        return Err(CampaignError::CampaignInactive);
    }
    let fingerprint = storage::claim_fingerprint(e, creator, campaign_id, claimant);
    if storage::is_claimed(e, &fingerprint) {
        return Err(CampaignError::AlreadyClaimed);
    }
    if campaign.no_of_claims >= campaign.max_claims {
        return Err(CampaignError::ExceedsMaxClaims);
    }

    let regime = PaymentRegime::for_claim(&campaign.mode, storage::claim_fee(e)?);
    regime.check_paid_value(paid_value)?;

    if regime == PaymentRegime::Sponsored {
        campaign.mode.consume_sponsored_slot();
    }
    campaign.no_of_claims += 1;
    storage::mark_claimed(e, &fingerprint);
    storage::save_campaign(e, creator, campaign_id, &campaign);

    let fee = regime.fee();
    let ledger = storage::reward_ledger(e);
    if fee > 0 && ledger.is_none() {
        let retained = storage::total_claim_fees(e)
            .checked_add(fee)
            .ok_or(CampaignError::ArithmeticOverflow)?;
        storage::set_total_claim_fees(e, retained);
        log!(e, "claim fee retained", fee, retained);
    }

    let native = storage::native_token(e)?;
    let this = e.current_contract_address();
    if fee > 0 {
        settlement::transfer(e, &native, claimant, &this, fee)?;
        if let Some(ledger) = ledger {
            settlement::deposit_claim_fee(e, &ledger, fee, creator, &request.referrer)?;
        }
    }
    events::emit_claim_fee_paid(
        e,
        events::ClaimFeePaidEvent {
            amount: fee,
            claimant: claimant.clone(),
            platform: storage::treasury(e)?,
            creator: creator.clone(),
            campaign_id,
            referrer: request.referrer.clone(),
        },
    );

    let asset = settlement::asset_address(e, &campaign.pool_asset)?;
    settlement::transfer(e, &asset, &this, claimant, campaign.amount_per_claim)?;
    events::emit_campaign_claimed(
        e,
        events::CampaignClaimedEvent {
            creator: creator.clone(),
            campaign_id,
            claimant: claimant.clone(),
            asset: campaign.pool_asset.clone(),
            amount: campaign.amount_per_claim,
        },
    );
    Ok(())
}

/// Returns the unclaimed remainder to the creator and closes the campaign.
pub fn withdraw_campaign(e: &Env, creator: &Address, campaign_id: u32) -> Result<i128, CampaignError> {
    let mut campaign = storage::load_campaign(e, creator, campaign_id)?;
    if campaign.is_inactive {
        return Err(CampaignError::CampaignInactive);
    }
    let remaining = campaign.remaining_escrow()?;
    campaign.is_inactive = true;
    storage::save_campaign(e, creator, campaign_id, &campaign);

    let asset = settlement::asset_address(e, &campaign.pool_asset)?;
    settlement::transfer(e, &asset, &e.current_contract_address(), creator, remaining)?;

    events::emit_campaign_withdrawn(
        e,
        events::CampaignWithdrawnEvent {
            creator: creator.clone(),
            campaign_id,
        },
    );
    Ok(remaining)
}

/// Buys `additional_slots` more sponsored claims. The payment goes straight
/// to the treasury.
pub fn increase_max_sponsored_claims(
    e: &Env,
    payer: &Address,
    campaign_manager: &Address,
    campaign_id: u32,
    additional_slots: u32,
    paid_value: i128,
) -> Result<(), CampaignError> {
    if additional_slots == 0 {
        return Err(CampaignError::InvalidSlotCount);
    }
    let mut campaign = storage::load_campaign(e, campaign_manager, campaign_id)?;
    if campaign.is_inactive {
        return Err(CampaignError::CampaignInactive);
    }
    campaign
        .mode
        .add_sponsored_slots(additional_slots, campaign.max_claims)?;

    let per_slot_fee = storage::sponsored_claim_fee(e)?;
    let cost = sponsorship_cost(additional_slots, per_slot_fee)?;
    if paid_value != cost {
        return Err(CampaignError::IncorrectValue);
    }
    storage::save_campaign(e, campaign_manager, campaign_id, &campaign);

    let treasury = storage::treasury(e)?;
    settlement::transfer(e, &storage::native_token(e)?, payer, &treasury, cost)?;
    events::emit_sponsored_claim_fees_paid(
        e,
        events::SponsoredClaimFeesPaidEvent {
            slots: additional_slots,
            per_slot_fee,
            treasury,
        },
    );
    Ok(())
}
