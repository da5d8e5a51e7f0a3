use soroban_sdk::{contracttype, Address, Env};

use crate::errors::ContractError;
use crate::events;
use crate::storage;

pub const DEFAULT_MIN_CONTRIBUTION: i128 = 1;
pub const DEFAULT_MAX_CONTRIBUTION: i128 = i128::MAX;
pub const DEFAULT_MIN_MEMBERS: u32 = 2;
pub const DEFAULT_MAX_MEMBERS: u32 = 100;

/// Contract-wide limits applied when a group is created. Existing groups are
/// never re-validated against a newer config.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractConfig {
    pub min_contribution: i128,
    pub max_contribution: i128,
    pub min_members: u32,
    pub max_members: u32,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            min_contribution: DEFAULT_MIN_CONTRIBUTION,
            max_contribution: DEFAULT_MAX_CONTRIBUTION,
            min_members: DEFAULT_MIN_MEMBERS,
            max_members: DEFAULT_MAX_MEMBERS,
        }
    }
}

impl ContractConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.min_contribution <= 0 || self.min_contribution > self.max_contribution {
            return Err(ContractError::InvalidState);
        }
        if self.min_members == 0 || self.min_members > self.max_members {
            return Err(ContractError::InvalidState);
        }
        Ok(())
    }

    pub fn check_group_params(
        &self,
        contribution_amount: i128,
        member_count: u32,
    ) -> Result<(), ContractError> {
        if contribution_amount <= 0
            || contribution_amount < self.min_contribution
            || contribution_amount > self.max_contribution
        {
            return Err(ContractError::InvalidAmount);
        }
        if member_count == 0
            || member_count < self.min_members
            || member_count > self.max_members
        {
            return Err(ContractError::InvalidState);
        }
        Ok(())
    }
}

pub fn update_config(
    env: &Env,
    admin: Address,
    config: ContractConfig,
) -> Result<(), ContractError> {
    admin.require_auth();

    if admin != storage::get_admin(env)? {
        return Err(ContractError::Unauthorized);
    }
    config.validate()?;

    storage::set_config(env, &config);
    events::config_updated(env, &admin);

    Ok(())
}
