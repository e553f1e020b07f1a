//! Relay of user-signed meta-transactions.
//!
//! The user authorizes the typed digest of `(nonce, user, payload)` through
//! Soroban's authorization framework; whoever submits the transaction only
//! pays for it. The payload is the XDR of a [`MetaCall`], run with the user
//! as the acting address.

use campaigns_common::typed_data::{self, StructEncoder};
use campaigns_common::{engine, events, storage};
use campaigns_common::{CampaignError, CampaignParams, ClaimRequest, Variant};
use soroban_sdk::{contracttype, crypto::Hash, log, xdr::FromXdr, Address, Bytes, Env, IntoVal};

const META_TRANSACTION_TYPE: &[u8] =
    b"MetaTransaction(uint256 nonce,address from,bytes functionSignature)";

/// A campaign operation carried inside a meta-transaction. Each case mirrors
/// the direct entry point minus its acting address.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum MetaCall {
    CreateCampaign(CampaignParams, i128),
    Claim(ClaimRequest, i128),
    WithdrawCampaign(u32),
    IncreaseMaxSponsoredClaims(Address, u32, u32, i128),
}

pub fn digest(env: &Env, user: &Address, nonce: u64, function_payload: &Bytes) -> Hash<32> {
    let struct_hash = StructEncoder::new(env, META_TRANSACTION_TYPE)
        .uint(nonce)
        .word(&typed_data::address_word(env, user))
        .word(&env.crypto().keccak256(function_payload).to_bytes())
        .hash(env);
    let domain = typed_data::domain_separator(env, Variant::Gasless.domain_name());
    typed_data::digest(env, &domain, &struct_hash)
}

pub fn execute(env: &Env, user: &Address, function_payload: &Bytes) -> Result<(), CampaignError> {
    let nonce = storage::nonce(env, user);
    let digest = digest(env, user, nonce, function_payload).to_bytes();
    user.require_auth_for_args((digest,).into_val(env));

    let next = nonce.checked_add(1).ok_or(CampaignError::ArithmeticOverflow)?;
    storage::set_nonce(env, user, next);

    let call = MetaCall::from_xdr(env, function_payload).map_err(|_| {
        log!(env, "undecodable meta-transaction payload", user.clone(), nonce);
        CampaignError::InvalidPayload
    })?;
    dispatch(env, user, call)?;

    events::emit_meta_transaction_executed(
        env,
        events::MetaTransactionExecutedEvent {
            user: user.clone(),
            nonce,
            function_payload: function_payload.clone(),
        },
    );
    Ok(())
}

fn dispatch(env: &Env, user: &Address, call: MetaCall) -> Result<(), CampaignError> {
    match call {
        MetaCall::CreateCampaign(params, paid_value) => {
            engine::create_campaign(env, user, &params, paid_value).map(|_| ())
        }
        MetaCall::Claim(request, paid_value) => {
            engine::claim(env, Variant::Gasless, user, &request, paid_value)
        }
        MetaCall::WithdrawCampaign(campaign_id) => {
            engine::withdraw_campaign(env, user, campaign_id).map(|_| ())
        }
        MetaCall::IncreaseMaxSponsoredClaims(campaign_manager, campaign_id, slots, paid_value) => {
            engine::increase_max_sponsored_claims(
                env,
                user,
                &campaign_manager,
                campaign_id,
                slots,
                paid_value,
            )
        }
    }
}
