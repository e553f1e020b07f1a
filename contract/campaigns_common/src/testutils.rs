//! Test doubles shared by the contract crates.

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, BytesN, Env, Vec};

use crate::claim_auth;
use crate::storage_types::RewardShare;

/// Off-chain trusted issuer holding a secp256k1 key.
pub struct Issuer {
    key: SigningKey,
}

impl Issuer {
    pub fn new(seed: u8) -> Self {
        let key = SigningKey::from_slice(&[seed; 32]).expect("valid secret scalar");
        Issuer { key }
    }

    pub fn address(&self, env: &Env) -> BytesN<20> {
        let point = self.key.verifying_key().as_affine().to_encoded_point(false);
        let mut uncompressed = [0u8; 65];
        uncompressed.copy_from_slice(point.as_bytes());
        claim_auth::signer_address(env, &BytesN::from_array(env, &uncompressed))
    }

    /// Signs a prehashed digest, returning `(r, s, v)` with `v` in `{27, 28}`.
    pub fn sign(&self, env: &Env, digest: &BytesN<32>) -> (BytesN<32>, BytesN<32>, u32) {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest.to_array())
            .expect("signing succeeds");
        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        (
            BytesN::from_array(env, &r),
            BytesN::from_array(env, &s),
            u32::from(recovery_id.to_byte()) + 27,
        )
    }
}

#[derive(Clone)]
#[contracttype]
enum LedgerKey {
    Accounted(Address),
    Reward(Address, Address),
}

/// Reward ledger that credits shares only when they add up to the value it
/// actually received.
#[contract]
pub struct MockRewardLedger;

#[contractimpl]
impl MockRewardLedger {
    pub fn deposit_rewards(env: Env, token: Address, total: i128, shares: Vec<RewardShare>) {
        let mut sum: i128 = 0;
        for share in shares.iter() {
            sum += share.amount;
        }
        assert_eq!(sum, total, "shares must add up to the deposit");

        let accounted_key = LedgerKey::Accounted(token.clone());
        let accounted: i128 = env.storage().instance().get(&accounted_key).unwrap_or(0);
        let balance = token::TokenClient::new(&env, &token).balance(&env.current_contract_address());
        assert_eq!(balance - accounted, total, "deposit must be funded");
        env.storage().instance().set(&accounted_key, &balance);

        for share in shares.iter() {
            let key = LedgerKey::Reward(token.clone(), share.recipient.clone());
            let credited: i128 = env.storage().instance().get(&key).unwrap_or(0);
            env.storage().instance().set(&key, &(credited + share.amount));
        }
    }

    pub fn rewards_of(env: Env, token: Address, recipient: Address) -> i128 {
        env.storage()
            .instance()
            .get(&LedgerKey::Reward(token, recipient))
            .unwrap_or(0)
    }
}
