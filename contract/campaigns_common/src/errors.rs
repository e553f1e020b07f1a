use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CampaignError {
    // Configuration
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidMaxClaims = 3,
    InvalidAmountPerClaim = 4,
    SponsoredClaimsExceedMax = 5,
    GaslessSponsorshipConflict = 6,
    InvalidSlotCount = 7,
    InvalidFeeAmount = 8,

    // Value accounting
    IncorrectValue = 10,
    InvalidFee = 11,
    ArithmeticOverflow = 12,
    NothingToWithdraw = 13,

    // Authorization
    InvalidAuthorization = 20,

    // Campaign state
    CampaignNotFound = 30,
    CampaignInactive = 31,
    AlreadyClaimed = 32,
    ExceedsMaxClaims = 33,

    // Transfers
    TransferFailed = 40,
    RewardDepositFailed = 41,

    // Access
    NotOwner = 50,

    // Relay
    InvalidPayload = 60,
}
