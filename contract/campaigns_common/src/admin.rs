use soroban_sdk::{Address, BytesN, Env};

use crate::errors::CampaignError;
use crate::events;
use crate::settlement;
use crate::storage;

pub fn initialize(
    e: &Env,
    owner: &Address,
    trusted_address: &BytesN<20>,
    treasury: &Address,
    native_token: &Address,
    claim_fee: i128,
    sponsored_claim_fee: i128,
) -> Result<(), CampaignError> {
    if storage::is_initialized(e) {
        return Err(CampaignError::AlreadyInitialized);
    }
    owner.require_auth();
    validate_fee(claim_fee)?;
    validate_fee(sponsored_claim_fee)?;

    storage::set_owner(e, owner);
    storage::set_trusted_address(e, trusted_address);
    storage::set_treasury(e, treasury);
    storage::set_native_token(e, native_token);
    storage::set_claim_fee(e, claim_fee);
    storage::set_sponsored_claim_fee(e, sponsored_claim_fee);
    storage::set_total_claim_fees(e, 0);
    storage::extend_instance(e);
    Ok(())
}

pub fn require_owner(e: &Env, caller: &Address) -> Result<(), CampaignError> {
    caller.require_auth();
    if *caller != storage::owner(e)? {
        return Err(CampaignError::NotOwner);
    }
    storage::extend_instance(e);
    Ok(())
}

fn validate_fee(fee: i128) -> Result<(), CampaignError> {
    if fee < 0 {
        return Err(CampaignError::InvalidFeeAmount);
    }
    Ok(())
}

pub fn set_trusted_address(e: &Env, caller: &Address, trusted_address: &BytesN<20>) -> Result<(), CampaignError> {
    require_owner(e, caller)?;
    storage::set_trusted_address(e, trusted_address);
    Ok(())
}

pub fn set_treasury(e: &Env, caller: &Address, treasury: &Address) -> Result<(), CampaignError> {
    require_owner(e, caller)?;
    storage::set_treasury(e, treasury);
    Ok(())
}

pub fn set_claim_fee(e: &Env, caller: &Address, fee: i128) -> Result<(), CampaignError> {
    require_owner(e, caller)?;
    validate_fee(fee)?;
    storage::set_claim_fee(e, fee);
    Ok(())
}

pub fn set_sponsored_claim_fee(e: &Env, caller: &Address, fee: i128) -> Result<(), CampaignError> {
    require_owner(e, caller)?;
    validate_fee(fee)?;
    storage::set_sponsored_claim_fee(e, fee);
    Ok(())
}

pub fn set_reward_ledger(e: &Env, caller: &Address, ledger: &Option<Address>) -> Result<(), CampaignError> {
    require_owner(e, caller)?;
    storage::set_reward_ledger(e, ledger);
    Ok(())
}

pub fn transfer_ownership(e: &Env, caller: &Address, new_owner: &Address) -> Result<(), CampaignError> {
    require_owner(e, caller)?;
    storage::set_owner(e, new_owner);
    events::emit_ownership_transferred(
        e,
        events::OwnershipTransferredEvent {
            previous_owner: caller.clone(),
            new_owner: new_owner.clone(),
        },
    );
    Ok(())
}

/// Sweeps the claim fees retained while no reward ledger was configured.
pub fn withdraw_total_claim_fees(e: &Env, caller: &Address, to: &Address) -> Result<i128, CampaignError> {
    require_owner(e, caller)?;
    let amount = storage::total_claim_fees(e);
    if amount == 0 {
        return Err(CampaignError::NothingToWithdraw);
    }
    storage::set_total_claim_fees(e, 0);

    let native = storage::native_token(e)?;
    settlement::transfer(e, &native, &e.current_contract_address(), to, amount)?;

    events::emit_withdrawal(
        e,
        events::WithdrawalEvent {
            amount,
            to: to.clone(),
        },
    );
    Ok(amount)
}

/// Swaps in new contract code. Campaign records keep their layout, so
/// existing data stays readable after the upgrade.
pub fn upgrade(e: &Env, caller: &Address, new_wasm_hash: BytesN<32>) -> Result<(), CampaignError> {
    require_owner(e, caller)?;
    e.deployer().update_current_contract_wasm(new_wasm_hash);
    Ok(())
}
