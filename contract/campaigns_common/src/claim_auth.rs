//! Claim authorization issued off-chain by the trusted address.
//!
//! The issuer signs `Claim(campaignManager, campaignId, claimant)` with a
//! secp256k1 key; the contract recovers the signer and compares it with the
//! configured trusted address. There is no expiry: a signature stays usable
//! until the claim fingerprint is marked or the trusted address is rotated.

use soroban_sdk::{crypto::Hash, Address, Bytes, BytesN, Env};

use crate::errors::CampaignError;
use crate::storage;
use crate::storage_types::{ClaimRequest, Variant};
use crate::typed_data::{self, StructEncoder};

const CLAIM_TYPE: &[u8] = b"Claim(address campaignManager,uint256 campaignId,address claimant)";

pub fn claim_digest(
    env: &Env,
    variant: Variant,
    campaign_manager: &Address,
    campaign_id: u32,
    claimant: &Address,
) -> Hash<32> {
    let struct_hash = StructEncoder::new(env, CLAIM_TYPE)
        .word(&typed_data::address_word(env, campaign_manager))
        .uint(u64::from(campaign_id))
        .word(&typed_data::address_word(env, claimant))
        .hash(env);
    let domain = typed_data::domain_separator(env, variant.domain_name());
    typed_data::digest(env, &domain, &struct_hash)
}

/// Checks that `request` was authorized by the trusted address for `claimant`.
/// A referrer equal to the claimant is treated as an invalid authorization.
pub fn verify_claim(
    env: &Env,
    variant: Variant,
    claimant: &Address,
    request: &ClaimRequest,
) -> Result<(), CampaignError> {
    if request.referrer.as_ref() == Some(claimant) {
        return Err(CampaignError::InvalidAuthorization);
    }

    let digest = claim_digest(
        env,
        variant,
        &request.campaign_manager,
        request.campaign_id,
        claimant,
    );
    let signer = recover_signer(env, &digest, &request.r, &request.s, request.v)?;

    if signer != storage::trusted_address(env)? {
        return Err(CampaignError::InvalidAuthorization);
    }
    Ok(())
}

pub fn recover_signer(
    env: &Env,
    digest: &Hash<32>,
    r: &BytesN<32>,
    s: &BytesN<32>,
    v: u32,
) -> Result<BytesN<20>, CampaignError> {
    let recovery_id = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return Err(CampaignError::InvalidAuthorization),
    };

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(&r.to_array());
    signature[32..].copy_from_slice(&s.to_array());

    let public_key = env.crypto().secp256k1_recover(
        digest,
        &BytesN::from_array(env, &signature),
        recovery_id,
    );
    Ok(signer_address(env, &public_key))
}

/// Last 20 bytes of keccak-256 over an uncompressed SEC1 key (`0x04 ‖ x ‖ y`).
pub fn signer_address(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
    let key = public_key.to_array();
    let hash = env
        .crypto()
        .keccak256(&Bytes::from_slice(env, &key[1..]))
        .to_array();
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    BytesN::from_array(env, &address)
}
