#![cfg(test)]

use super::*;
use campaigns_common::testutils::{Issuer, MockRewardLedger, MockRewardLedgerClient};
use soroban_sdk::{
    testutils::{Address as _, MockAuth, MockAuthInvoke},
    token,
    xdr::ToXdr,
    Address, Bytes, BytesN, ConversionError, Env, IntoVal, InvokeError,
};

const CLAIM_FEE: i128 = 1_000;
const SPONSORED_CLAIM_FEE: i128 = 40;

type RelayResult = Result<Result<(), ConversionError>, Result<CampaignError, InvokeError>>;

struct Harness<'a> {
    env: Env,
    contract: GaslessCampaignsContractClient<'a>,
    native: token::StellarAssetClient<'a>,
    native_token: token::TokenClient<'a>,
    ledger: MockRewardLedgerClient<'a>,
    issuer: Issuer,
    owner: Address,
    treasury: Address,
}

impl<'a> Harness<'a> {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let sac = env.register_stellar_asset_contract_v2(Address::generate(&env));
        let native = token::StellarAssetClient::new(&env, &sac.address());
        let native_token = token::TokenClient::new(&env, &sac.address());
        let ledger = MockRewardLedgerClient::new(&env, &env.register(MockRewardLedger, ()));
        let issuer = Issuer::new(1);
        let owner = Address::generate(&env);
        let treasury = Address::generate(&env);

        let contract = GaslessCampaignsContractClient::new(&env, &env.register(GaslessCampaignsContract, ()));
        contract.initialize(
            &owner,
            &issuer.address(&env),
            &treasury,
            &sac.address(),
            &CLAIM_FEE,
            &SPONSORED_CLAIM_FEE,
        );
        contract.set_reward_ledger(&owner, &Some(ledger.address.clone()));

        Harness {
            env,
            contract,
            native,
            native_token,
            ledger,
            issuer,
            owner,
            treasury,
        }
    }

    fn funded(&self, amount: i128) -> Address {
        let account = Address::generate(&self.env);
        self.native.mint(&account, &amount);
        account
    }

    fn campaign(&self, creator: &Address, is_gasless: bool, max_claims: u32, amount_per_claim: i128) -> u32 {
        let paid = i128::from(max_claims) * amount_per_claim;
        self.native.mint(creator, &paid);
        self.contract.create_campaign(
            creator,
            &PoolAsset::Native,
            &max_claims,
            &amount_per_claim,
            &is_gasless,
            &0,
            &paid,
        )
    }

    fn claim_request(&self, creator: &Address, campaign_id: u32, claimant: &Address) -> ClaimRequest {
        let digest = self.contract.claim_digest(creator, &campaign_id, claimant);
        let (r, s, v) = self.issuer.sign(&self.env, &digest);
        ClaimRequest {
            campaign_manager: creator.clone(),
            campaign_id,
            r,
            s,
            v,
            referrer: None,
        }
    }

    fn authorize_relay(&self, signer: &Address, digest: BytesN<32>) {
        self.env.mock_auths(&[MockAuth {
            address: signer,
            invoke: &MockAuthInvoke {
                contract: &self.contract.address,
                fn_name: "execute_meta_transaction",
                args: (digest,).into_val(&self.env),
                sub_invokes: &[],
            },
        }]);
    }

    /// Signs the payload as `user` at the current nonce and submits it.
    fn relay(&self, user: &Address, payload: &Bytes) -> RelayResult {
        let digest = self.contract.meta_transaction_digest(user, payload);
        self.authorize_relay(user, digest);
        let result = self.contract.try_execute_meta_transaction(user, payload);
        self.env.mock_all_auths();
        result
    }

    fn balance(&self, account: &Address) -> i128 {
        self.native_token.balance(account)
    }
}

#[test]
fn test_gasless_campaign_rejects_sponsorship() {
    let h = Harness::new();
    let creator = h.funded(1_000);

    assert_eq!(
        h.contract
            .try_create_campaign(&creator, &PoolAsset::Native, &10, &10, &true, &1, &140),
        Err(Ok(CampaignError::GaslessSponsorshipConflict))
    );

    let id = h.campaign(&creator, true, 10, 10);
    assert_eq!(h.contract.get_campaign(&creator, &id).mode, CampaignMode::Gasless);
    assert_eq!(
        h.contract
            .try_increase_max_sponsored_claims(&creator, &creator, &id, &1, &SPONSORED_CLAIM_FEE),
        Err(Ok(CampaignError::GaslessSponsorshipConflict))
    );
}

#[test]
fn test_gasless_claim_is_fee_exempt() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.campaign(&creator, true, 10, 10);

    let claimant = h.funded(CLAIM_FEE);
    let request = h.claim_request(&creator, id, &claimant);
    assert_eq!(
        h.contract.try_claim(
            &claimant,
            &creator,
            &id,
            &request.r,
            &request.s,
            &request.v,
            &None,
            &CLAIM_FEE
        ),
        Err(Ok(CampaignError::InvalidFee))
    );
    h.contract
        .claim(&claimant, &creator, &id, &request.r, &request.s, &request.v, &None, &0);

    assert_eq!(h.balance(&claimant), CLAIM_FEE + 10);
    assert_eq!(h.balance(&h.ledger.address), 0);
    assert_eq!(h.contract.get_campaign(&creator, &id).no_of_claims, 1);
}

#[test]
fn test_standard_campaign_in_gasless_contract_charges_fee() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.campaign(&creator, false, 10, 10);

    let claimant = h.funded(CLAIM_FEE);
    let request = h.claim_request(&creator, id, &claimant);
    assert_eq!(
        h.contract
            .try_claim(&claimant, &creator, &id, &request.r, &request.s, &request.v, &None, &0),
        Err(Ok(CampaignError::InvalidFee))
    );
    h.contract.claim(
        &claimant,
        &creator,
        &id,
        &request.r,
        &request.s,
        &request.v,
        &None,
        &CLAIM_FEE,
    );

    assert_eq!(h.balance(&claimant), 10);
    assert_eq!(h.ledger.rewards_of(&h.native.address, &h.treasury), 700);
    assert_eq!(h.ledger.rewards_of(&h.native.address, &creator), 300);
}

#[test]
fn test_meta_transaction_claim() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.campaign(&creator, true, 10, 10);
    let user = Address::generate(&h.env);

    let request = h.claim_request(&creator, id, &user);
    let payload = MetaCall::Claim(request, 0).to_xdr(&h.env);
    let digest = h.contract.meta_transaction_digest(&user, &payload);

    assert_eq!(h.contract.get_nonce(&user), 0);
    assert_eq!(h.relay(&user, &payload), Ok(Ok(())));

    assert_eq!(h.contract.get_nonce(&user), 1);
    assert_eq!(h.balance(&user), 10);
    assert!(h.contract.has_claimed(&creator, &id, &user));

    // The digest moved on with the nonce, so the old authorization is useless
    assert_ne!(h.contract.meta_transaction_digest(&user, &payload), digest);
    h.authorize_relay(&user, digest);
    assert!(h.contract.try_execute_meta_transaction(&user, &payload).is_err());
    h.env.mock_all_auths();
    assert_eq!(h.contract.get_nonce(&user), 1);

    // A fresh authorization reaches the claim itself, which is spent
    assert_eq!(
        h.relay(&user, &payload),
        Err(Ok(CampaignError::AlreadyClaimed))
    );
    assert_eq!(h.contract.get_nonce(&user), 1);
}

#[test]
fn test_meta_transaction_nonce_counts_every_call() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let first = h.campaign(&creator, true, 10, 10);
    let second = h.campaign(&creator, true, 10, 10);
    let user = Address::generate(&h.env);

    for id in [first, second] {
        let payload = MetaCall::Claim(h.claim_request(&creator, id, &user), 0).to_xdr(&h.env);
        assert_eq!(h.relay(&user, &payload), Ok(Ok(())));
    }
    assert_eq!(h.contract.get_nonce(&user), 2);
    assert_eq!(h.balance(&user), 20);
}

#[test]
fn test_meta_transaction_requires_user_authorization() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.campaign(&creator, true, 10, 10);
    let user = Address::generate(&h.env);
    let relayer = Address::generate(&h.env);

    let payload = MetaCall::Claim(h.claim_request(&creator, id, &user), 0).to_xdr(&h.env);
    let digest = h.contract.meta_transaction_digest(&user, &payload);

    // Authorized by the relayer rather than the user
    h.authorize_relay(&relayer, digest);
    assert!(h.contract.try_execute_meta_transaction(&user, &payload).is_err());
    h.env.mock_all_auths();

    assert_eq!(h.contract.get_nonce(&user), 0);
    assert!(!h.contract.has_claimed(&creator, &id, &user));
}

#[test]
fn test_meta_transaction_invalid_payload() {
    let h = Harness::new();
    let user = Address::generate(&h.env);
    let payload = 7u32.to_xdr(&h.env);

    assert_eq!(
        h.relay(&user, &payload),
        Err(Ok(CampaignError::InvalidPayload))
    );
    assert_eq!(h.contract.get_nonce(&user), 0);
}

#[test]
fn test_meta_transaction_non_xdr_payload_aborts() {
    let h = Harness::new();
    let user = Address::generate(&h.env);
    let payload = Bytes::from_array(&h.env, &[0xde, 0xad, 0xbe, 0xef]);

    // Rejected by the host deserializer before any contract error is produced
    assert_eq!(h.relay(&user, &payload), Err(Err(InvokeError::Abort)));
    assert_eq!(h.contract.get_nonce(&user), 0);
}

#[test]
fn test_meta_transaction_inner_error_rolls_back_nonce() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.campaign(&creator, true, 10, 10);
    let user = Address::generate(&h.env);
    let other = Address::generate(&h.env);

    // Authorization issued for a different claimant
    let payload = MetaCall::Claim(h.claim_request(&creator, id, &other), 0).to_xdr(&h.env);
    assert_eq!(
        h.relay(&user, &payload),
        Err(Ok(CampaignError::InvalidAuthorization))
    );
    assert_eq!(h.contract.get_nonce(&user), 0);

    let payload = MetaCall::WithdrawCampaign(3).to_xdr(&h.env);
    assert_eq!(
        h.relay(&user, &payload),
        Err(Ok(CampaignError::CampaignNotFound))
    );
    assert_eq!(h.contract.get_nonce(&user), 0);
}

#[test]
fn test_meta_transaction_withdraw() {
    let h = Harness::new();
    let creator = Address::generate(&h.env);
    let id = h.campaign(&creator, true, 4, 25);
    assert_eq!(h.balance(&creator), 0);

    let payload = MetaCall::WithdrawCampaign(id).to_xdr(&h.env);
    assert_eq!(h.relay(&creator, &payload), Ok(Ok(())));

    assert_eq!(h.balance(&creator), 100);
    assert!(h.contract.get_campaign(&creator, &id).is_inactive);
    assert_eq!(h.contract.get_nonce(&creator), 1);
}

#[test]
fn test_meta_transaction_create_token_campaign() {
    let h = Harness::new();
    let pool_sac = h.env.register_stellar_asset_contract_v2(Address::generate(&h.env));
    let pool = token::TokenClient::new(&h.env, &pool_sac.address());
    let user = Address::generate(&h.env);
    token::StellarAssetClient::new(&h.env, &pool_sac.address()).mint(&user, &300);
    pool.approve(&user, &h.contract.address, &300, &1_000);

    let params = CampaignParams {
        pool_asset: PoolAsset::Token(pool_sac.address()),
        max_claims: 3,
        amount_per_claim: 100,
        is_gasless: true,
        max_sponsored_claims: 0,
    };
    let payload = MetaCall::CreateCampaign(params, 0).to_xdr(&h.env);
    assert_eq!(h.relay(&user, &payload), Ok(Ok(())));

    assert_eq!(h.contract.campaign_count(&user), 1);
    assert_eq!(pool.balance(&h.contract.address), 300);
    assert_eq!(h.contract.get_campaign(&user, &0).mode, CampaignMode::Gasless);
    assert_eq!(h.contract.get_nonce(&user), 1);
}

#[test]
fn test_signatures_are_bound_to_contract_instance() {
    let h = Harness::new();
    let twin = GaslessCampaignsContractClient::new(&h.env, &h.env.register(GaslessCampaignsContract, ()));
    twin.initialize(
        &h.owner,
        &h.issuer.address(&h.env),
        &h.treasury,
        &h.native.address,
        &CLAIM_FEE,
        &SPONSORED_CLAIM_FEE,
    );
    assert_ne!(h.contract.domain_separator(), twin.domain_separator());

    let creator = Address::generate(&h.env);
    let user = Address::generate(&h.env);
    let id = h.campaign(&creator, true, 10, 10);
    h.native.mint(&creator, &100);
    twin.create_campaign(&creator, &PoolAsset::Native, &10, &10, &true, &0, &100);

    let request = h.claim_request(&creator, id, &user);
    assert_eq!(
        twin.try_claim(&user, &creator, &id, &request.r, &request.s, &request.v, &None, &0),
        Err(Ok(CampaignError::InvalidAuthorization))
    );

    let payload = MetaCall::Claim(request, 0).to_xdr(&h.env);
    assert_ne!(
        h.contract.meta_transaction_digest(&user, &payload),
        twin.meta_transaction_digest(&user, &payload)
    );
}
