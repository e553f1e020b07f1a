use soroban_sdk::{contracttype, Address, BytesN};

use crate::errors::CampaignError;

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Owner,
    TrustedAddress,
    Treasury,
    NativeToken,
    ClaimFee,
    SponsoredClaimFee,
    TotalClaimFees,
    RewardLedger,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    CampaignCount(Address),
    Campaign(Address, u32),
    Sponsorship(Address, u32),
    Claimed(BytesN<32>),
    Nonce(Address),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum PoolAsset {
    Native,
    Token(Address),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SponsoredQuota {
    pub no_of_sponsored_claims: u32,
    pub max_sponsored_claims: u32,
}

/// How claims against a campaign are charged. Sponsorship and gasless claims
/// are the two fee waivers and never apply to the same campaign.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum CampaignMode {
    Standard,
    Sponsored(SponsoredQuota),
    Gasless,
}

impl CampaignMode {
    pub fn new(is_gasless: bool, max_sponsored_claims: u32) -> Result<Self, CampaignError> {
        match (is_gasless, max_sponsored_claims) {
            (true, 0) => Ok(CampaignMode::Gasless),
            (true, _) => Err(CampaignError::GaslessSponsorshipConflict),
            (false, 0) => Ok(CampaignMode::Standard),
            (false, max) => Ok(CampaignMode::Sponsored(SponsoredQuota {
                no_of_sponsored_claims: 0,
                max_sponsored_claims: max,
            })),
        }
    }

    pub fn is_gasless(&self) -> bool {
        matches!(self, CampaignMode::Gasless)
    }

    pub fn max_sponsored_claims(&self) -> u32 {
        match self {
            CampaignMode::Sponsored(quota) => quota.max_sponsored_claims,
            _ => 0,
        }
    }

    pub fn no_of_sponsored_claims(&self) -> u32 {
        match self {
            CampaignMode::Sponsored(quota) => quota.no_of_sponsored_claims,
            _ => 0,
        }
    }

    /// Raises the sponsored-claim maximum, turning a standard campaign into a
    /// sponsored one.
    pub fn add_sponsored_slots(&mut self, slots: u32, max_claims: u32) -> Result<(), CampaignError> {
        let (used, max) = match self {
            CampaignMode::Gasless => return Err(CampaignError::GaslessSponsorshipConflict),
            CampaignMode::Standard => (0, 0),
            CampaignMode::Sponsored(quota) => (quota.no_of_sponsored_claims, quota.max_sponsored_claims),
        };
        let new_max = max
            .checked_add(slots)
            .ok_or(CampaignError::SponsoredClaimsExceedMax)?;
        if new_max > max_claims {
            return Err(CampaignError::SponsoredClaimsExceedMax);
        }
        *self = CampaignMode::Sponsored(SponsoredQuota {
            no_of_sponsored_claims: used,
            max_sponsored_claims: new_max,
        });
        Ok(())
    }

    pub(crate) fn consume_sponsored_slot(&mut self) {
        if let CampaignMode::Sponsored(quota) = self {
            quota.no_of_sponsored_claims += 1;
        }
    }
}

/// A campaign as the engine works with it. The persisted form is split over
/// [`CampaignCore`] and [`SponsoredQuota`], see `storage::load_campaign`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub pool_asset: PoolAsset,
    pub max_claims: u32,
    pub no_of_claims: u32,
    pub amount_per_claim: i128,
    pub is_inactive: bool,
    pub mode: CampaignMode,
}

impl Campaign {
    /// Value still held in escrow for this campaign.
    pub fn remaining_escrow(&self) -> Result<i128, CampaignError> {
        escrow_amount(self.max_claims - self.no_of_claims, self.amount_per_claim)
    }
}

// First-version record layout. Fields are never reordered or removed; data
// added later lives under its own key.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignCore {
    pub pool_asset: PoolAsset,
    pub max_claims: u32,
    pub no_of_claims: u32,
    pub amount_per_claim: i128,
    pub is_inactive: bool,
    pub is_gasless: bool,
}

// Creation parameters, also carried inside relayed meta-transactions
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignParams {
    pub pool_asset: PoolAsset,
    pub max_claims: u32,
    pub amount_per_claim: i128,
    pub is_gasless: bool,
    pub max_sponsored_claims: u32,
}

// Claim arguments in signature order
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ClaimRequest {
    pub campaign_manager: Address,
    pub campaign_id: u32,
    pub r: BytesN<32>,
    pub s: BytesN<32>,
    pub v: u32,
    pub referrer: Option<Address>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RewardShare {
    pub recipient: Address,
    pub amount: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignsConfig {
    pub owner: Address,
    pub trusted_address: BytesN<20>,
    pub treasury: Address,
    pub native_token: Address,
    pub claim_fee: i128,
    pub sponsored_claim_fee: i128,
    pub total_claim_fees: i128,
    pub reward_ledger: Option<Address>,
}

/// Which contract the engine runs inside.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    Standard,
    Gasless,
}

impl Variant {
    pub fn domain_name(self) -> &'static str {
        match self {
            Variant::Standard => "Campaigns",
            Variant::Gasless => "GaslessCampaigns",
        }
    }
}

pub fn escrow_amount(claims: u32, amount_per_claim: i128) -> Result<i128, CampaignError> {
    i128::from(claims)
        .checked_mul(amount_per_claim)
        .ok_or(CampaignError::ArithmeticOverflow)
}

// Constants
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
