//! Typed structured-data hashing in the EIP-712 layout.
//!
//! Both verifiers (claim authorization and meta-transaction relay) build their
//! digests from these pieces, each with its own struct type. The domain binds
//! a digest to one contract instance on one network.

use soroban_sdk::{crypto::Hash, xdr::ToXdr, Address, Bytes, BytesN, Env};

const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,bytes32 chainId,address verifyingContract)";

pub const DOMAIN_VERSION: &[u8] = b"1";

pub fn keccak(env: &Env, data: &[u8]) -> BytesN<32> {
    env.crypto().keccak256(&Bytes::from_slice(env, data)).to_bytes()
}

/// 32-byte word standing in for an address inside a struct hash.
pub fn address_word(env: &Env, address: &Address) -> BytesN<32> {
    env.crypto()
        .keccak256(&address.clone().to_xdr(env))
        .to_bytes()
}

/// Big-endian `uint256` word.
pub fn uint_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Incremental encoder for `typeHash ‖ word ‖ word ‖ …`.
pub struct StructEncoder {
    encoded: Bytes,
}

impl StructEncoder {
    pub fn new(env: &Env, struct_type: &[u8]) -> Self {
        let mut encoded = Bytes::new(env);
        encoded.extend_from_array(&keccak(env, struct_type).to_array());
        StructEncoder { encoded }
    }

    pub fn word(mut self, word: &BytesN<32>) -> Self {
        self.encoded.extend_from_array(&word.to_array());
        self
    }

    pub fn uint(mut self, value: u64) -> Self {
        self.encoded.extend_from_array(&uint_word(value));
        self
    }

    pub fn hash(self, env: &Env) -> BytesN<32> {
        env.crypto().keccak256(&self.encoded).to_bytes()
    }
}

pub fn domain_separator(env: &Env, name: &str) -> BytesN<32> {
    StructEncoder::new(env, DOMAIN_TYPE)
        .word(&keccak(env, name.as_bytes()))
        .word(&keccak(env, DOMAIN_VERSION))
        .word(&env.ledger().network_id())
        .word(&address_word(env, &env.current_contract_address()))
        .hash(env)
}

/// `keccak256(0x1901 ‖ domainSeparator ‖ structHash)`
pub fn digest(env: &Env, domain_separator: &BytesN<32>, struct_hash: &BytesN<32>) -> Hash<32> {
    let mut encoded = Bytes::from_array(env, &[0x19, 0x01]);
    encoded.extend_from_array(&domain_separator.to_array());
    encoded.extend_from_array(&struct_hash.to_array());
    env.crypto().keccak256(&encoded)
}
