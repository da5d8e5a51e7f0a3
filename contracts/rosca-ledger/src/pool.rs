use soroban_sdk::{contracttype, Env};

use crate::contribution::ContributionTracker;
use crate::errors::ContractError;
use crate::group::{self, GroupRegistry, StoredGroups};
use crate::storage::{KeyBuilder, PersistentStore, Store};

/// Snapshot of a cycle's pool, derived from group configuration and cycle
/// accounting. Recomputed on every read and never persisted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub group_id: u64,
    pub cycle: u32,
    pub member_count: u32,
    pub contribution_amount: i128,
    /// contribution_amount × member_count
    pub total_pool_amount: i128,
    pub current_contributions: i128,
    pub contributors_count: u32,
    pub is_cycle_complete: bool,
}

impl PoolInfo {
    /// Each recipient receives the whole pool once.
    pub fn return_amount(&self) -> i128 {
        self.total_pool_amount
    }

    pub fn is_complete(&self) -> bool {
        self.contributors_count >= self.member_count
    }

    pub fn remaining_contributions_needed(&self) -> i128 {
        self.total_pool_amount
            .saturating_sub(self.current_contributions)
            .max(0)
    }

    pub fn remaining_contributors_needed(&self) -> u32 {
        self.member_count.saturating_sub(self.contributors_count)
    }

    /// Collected share of the pool, 0..=100. An empty pool reads as 0%.
    pub fn completion_percentage(&self) -> u32 {
        if self.total_pool_amount <= 0 || self.current_contributions <= 0 {
            return 0;
        }
        if self.current_contributions >= self.total_pool_amount {
            return 100;
        }

        // current < total here, so the quotient is below 100.
        let percentage = match self.current_contributions.checked_mul(100) {
            Some(scaled) => scaled / self.total_pool_amount,
            None => self.current_contributions / (self.total_pool_amount / 100),
        };
        percentage.clamp(0, 100) as u32
    }
}

/// Payout lifecycle of one (group, cycle).
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CycleState {
    Open,
    Complete,
    Paid,
}

pub struct PoolCalculator;

impl PoolCalculator {
    pub fn calculate_total_pool(
        contribution_amount: i128,
        member_count: u32,
    ) -> Result<i128, ContractError> {
        if contribution_amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if member_count == 0 {
            return Err(ContractError::InvalidState);
        }

        contribution_amount
            .checked_mul(i128::from(member_count))
            .ok_or(ContractError::Overflow)
    }

    pub fn get_pool_info<R: GroupRegistry, S: Store>(
        registry: &R,
        store: &S,
        group_id: u64,
        cycle: u32,
    ) -> Result<PoolInfo, ContractError> {
        let member_count = registry.get_member_count(group_id)?;
        let contribution_amount = registry.get_contribution_amount(group_id)?;
        let total_pool_amount = Self::calculate_total_pool(contribution_amount, member_count)?;

        let totals = ContributionTracker::new(store).cycle_totals(group_id, cycle);

        Ok(PoolInfo {
            group_id,
            cycle,
            member_count,
            contribution_amount,
            total_pool_amount,
            current_contributions: totals.total_contributed,
            contributors_count: totals.contributor_count,
            is_cycle_complete: totals.contributor_count >= member_count,
        })
    }

    /// Both checks are required: a full contributor count does not prove the
    /// collected amount, so the amount must match the pool exactly as well.
    pub fn validate_pool_ready_for_payout(pool_info: &PoolInfo) -> Result<(), ContractError> {
        if pool_info.contributors_count < pool_info.member_count {
            return Err(ContractError::CycleNotComplete);
        }
        if pool_info.current_contributions != pool_info.total_pool_amount {
            return Err(ContractError::InvalidAmount);
        }
        Ok(())
    }

    pub fn cycle_state<R: GroupRegistry, S: Store>(
        registry: &R,
        store: &S,
        group_id: u64,
        cycle: u32,
    ) -> Result<CycleState, ContractError> {
        if store.has(&KeyBuilder::payout_record_key(group_id, cycle)) {
            return Ok(CycleState::Paid);
        }

        let pool_info = Self::get_pool_info(registry, store, group_id, cycle)?;
        match Self::validate_pool_ready_for_payout(&pool_info) {
            Ok(()) => Ok(CycleState::Complete),
            Err(ContractError::CycleNotComplete | ContractError::InvalidAmount) => {
                Ok(CycleState::Open)
            }
            Err(err) => Err(err),
        }
    }
}

pub fn get_pool_info(env: &Env, group_id: u64, cycle: u32) -> Result<PoolInfo, ContractError> {
    let store = PersistentStore::new(env);
    PoolCalculator::get_pool_info(&StoredGroups::new(&store), &store, group_id, cycle)
}

pub fn get_current_pool_info(env: &Env, group_id: u64) -> Result<PoolInfo, ContractError> {
    let store = PersistentStore::new(env);
    let group = group::load_group(&store, group_id)?;
    PoolCalculator::get_pool_info(
        &StoredGroups::new(&store),
        &store,
        group_id,
        group.current_cycle,
    )
}

pub fn get_cycle_state(
    env: &Env,
    group_id: u64,
    cycle: u32,
) -> Result<CycleState, ContractError> {
    let store = PersistentStore::new(env);
    PoolCalculator::cycle_state(&StoredGroups::new(&store), &store, group_id, cycle)
}
