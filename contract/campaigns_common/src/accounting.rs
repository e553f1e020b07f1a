use crate::errors::CampaignError;
use crate::storage_types::CampaignMode;

pub const BASIS_POINTS: i128 = 10_000; // 100% in basis points
pub const PLATFORM_SHARE_BPS: i128 = 6_000; // 60%
pub const CREATOR_SHARE_BPS: i128 = 3_000; // 30%
pub const REFERRER_SHARE_BPS: i128 = 1_000; // 10%

/// Which of the three payment rules applies to a claim.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaymentRegime {
    GaslessExempt,
    Sponsored,
    FeeRequired(i128),
}

impl PaymentRegime {
    /// Decided in priority order: gasless, then an open sponsored slot, then
    /// the configured claim fee.
    pub fn for_claim(mode: &CampaignMode, claim_fee: i128) -> Self {
        match mode {
            CampaignMode::Gasless => PaymentRegime::GaslessExempt,
            CampaignMode::Sponsored(quota)
                if quota.no_of_sponsored_claims < quota.max_sponsored_claims =>
            {
                PaymentRegime::Sponsored
            }
            _ => PaymentRegime::FeeRequired(claim_fee),
        }
    }

    pub fn fee(&self) -> i128 {
        match self {
            PaymentRegime::FeeRequired(fee) => *fee,
            _ => 0,
        }
    }

    pub fn check_paid_value(&self, paid_value: i128) -> Result<(), CampaignError> {
        if paid_value != self.fee() {
            return Err(CampaignError::InvalidFee);
        }
        Ok(())
    }
}

/// Partition of one collected claim fee. The platform takes whatever the
/// creator and referrer shares leave, so rounding never loses value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RewardSplit {
    pub platform: i128,
    pub creator: i128,
    pub referrer: i128,
}

impl RewardSplit {
    pub fn compute(fee: i128, has_referrer: bool) -> Result<Self, CampaignError> {
        let creator = share_of(fee, CREATOR_SHARE_BPS)?;
        let referrer = if has_referrer {
            share_of(fee, REFERRER_SHARE_BPS)?
        } else {
            0
        };
        Ok(RewardSplit {
            platform: fee - creator - referrer,
            creator,
            referrer,
        })
    }

    pub fn total(&self) -> i128 {
        self.platform + self.creator + self.referrer
    }
}

fn share_of(amount: i128, bps: i128) -> Result<i128, CampaignError> {
    amount
        .checked_mul(bps)
        .map(|scaled| scaled / BASIS_POINTS)
        .ok_or(CampaignError::ArithmeticOverflow)
}

/// Price of `slots` sponsored claims at `per_slot_fee` each.
pub fn sponsorship_cost(slots: u32, per_slot_fee: i128) -> Result<i128, CampaignError> {
    i128::from(slots)
        .checked_mul(per_slot_fee)
        .ok_or(CampaignError::ArithmeticOverflow)
}
