#![no_std]

use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env};

mod config;
mod contribution;
mod errors;
mod events;
mod group;
mod membership;
mod payout;
mod pool;
mod storage;
mod types;

pub use config::ContractConfig;
pub use contribution::{ContributionTracker, CycleAccounting};
pub use errors::{ContractError, ErrorCategory};
pub use group::{GroupRegistry, StoredGroups};
pub use pool::{CycleState, PoolCalculator, PoolInfo};
pub use storage::{KeyBuilder, PersistentStore, StorageKey, Store};
pub use types::*;

#[contract]
pub struct RoscaLedgerContract;

#[contractimpl]
impl RoscaLedgerContract {
    /// Initialize the ledger with a contract admin and default limits.
    pub fn __constructor(env: Env, admin: Address) {
        if storage::has_admin(&env) {
            panic_with_error!(&env, ContractError::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        storage::set_config(&env, &ContractConfig::default());
    }

    // ─── Configuration ──────────────────────────────────────────────

    /// Current group-creation limits.
    pub fn get_config(env: Env) -> Result<ContractConfig, ContractError> {
        storage::get_config(&env)
    }

    /// Replace the group-creation limits. Contract admin only.
    pub fn update_config(
        env: Env,
        admin: Address,
        config: ContractConfig,
    ) -> Result<(), ContractError> {
        config::update_config(&env, admin, config)
    }

    // ─── Groups ─────────────────────────────────────────────────────

    /// Create a pending group with `member_count` slots. Returns the new id.
    pub fn create_group(
        env: Env,
        creator: Address,
        token: Address,
        contribution_amount: i128,
        cycle_duration: u64,
        member_count: u32,
    ) -> Result<u64, ContractError> {
        group::create_group(
            &env,
            creator,
            token,
            contribution_amount,
            cycle_duration,
            member_count,
        )
    }

    /// Take the next free slot. The group activates when the last slot fills.
    pub fn join_group(env: Env, member: Address, group_id: u64) -> Result<(), ContractError> {
        membership::join_group(&env, member, group_id)
    }

    /// Get group details.
    pub fn get_group(env: Env, group_id: u64) -> Result<Group, ContractError> {
        group::get_group(&env, group_id)
    }

    /// Number of groups created so far; also the highest assigned id.
    pub fn get_group_count(env: Env) -> u64 {
        group::get_group_count(&env)
    }

    /// Freeze contributions and payouts. Group creator or contract admin.
    pub fn pause_group(env: Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
        group::pause_group(&env, caller, group_id)
    }

    /// Resume a paused group.
    pub fn resume_group(env: Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
        group::resume_group(&env, caller, group_id)
    }

    /// End a group for good, refunding the unpaid cycle. Group creator or
    /// contract admin.
    pub fn cancel_group(env: Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
        group::cancel_group(&env, caller, group_id)
    }

    // ─── Membership ─────────────────────────────────────────────────

    /// Existence-only membership query. Open to anyone; never fails.
    pub fn is_member(env: Env, group_id: u64, address: Address) -> bool {
        membership::is_member(&PersistentStore::new(&env), group_id, &address)
    }

    /// Profile of a member. Fails with `NotMember` for anyone else.
    pub fn get_member_details(
        env: Env,
        group_id: u64,
        address: Address,
    ) -> Result<MemberProfile, ContractError> {
        membership::get_member_details(&env, group_id, address)
    }

    // ─── Contributions ──────────────────────────────────────────────

    /// Pay the fixed contribution into the group's current cycle.
    pub fn contribute(env: Env, member: Address, group_id: u64) -> Result<(), ContractError> {
        contribution::contribute(&env, member, group_id)
    }

    /// Whether `member` paid into `cycle`. Members only.
    pub fn has_contributed(
        env: Env,
        member: Address,
        group_id: u64,
        cycle: u32,
    ) -> Result<bool, ContractError> {
        contribution::has_contributed(&env, member, group_id, cycle)
    }

    /// Contribution record of `member` for `cycle`, if any. Members only.
    pub fn get_contribution(
        env: Env,
        member: Address,
        group_id: u64,
        cycle: u32,
    ) -> Result<Option<ContributionRecord>, ContractError> {
        contribution::get_contribution(&env, member, group_id, cycle)
    }

    // ─── Pool ───────────────────────────────────────────────────────

    /// Pool snapshot of any cycle.
    pub fn get_pool_info(env: Env, group_id: u64, cycle: u32) -> Result<PoolInfo, ContractError> {
        pool::get_pool_info(&env, group_id, cycle)
    }

    /// Pool of the cycle currently collecting.
    pub fn get_current_pool(env: Env, group_id: u64) -> Result<PoolInfo, ContractError> {
        pool::get_current_pool_info(&env, group_id)
    }

    /// Open, complete (ready to pay) or paid.
    pub fn get_cycle_state(
        env: Env,
        group_id: u64,
        cycle: u32,
    ) -> Result<CycleState, ContractError> {
        pool::get_cycle_state(&env, group_id, cycle)
    }

    // ─── Payouts ────────────────────────────────────────────────────

    /// Dry run of `distribute_payout`: returns the pool when it may be paid.
    pub fn validate_payout(env: Env, group_id: u64) -> Result<PoolInfo, ContractError> {
        payout::validate_payout(&env, group_id)
    }

    /// Pay the current cycle's recipient once every member has contributed
    /// and the collected total equals the pool. Anyone can call this.
    pub fn distribute_payout(env: Env, group_id: u64) -> Result<PayoutRecord, ContractError> {
        payout::distribute_payout(&env, group_id)
    }

    /// Payout record of a paid cycle.
    pub fn get_payout(env: Env, group_id: u64, cycle: u32) -> Result<PayoutRecord, ContractError> {
        payout::get_payout(&env, group_id, cycle)
    }

    /// Member due the current cycle's payout.
    pub fn get_current_recipient(env: Env, group_id: u64) -> Result<Address, ContractError> {
        payout::get_current_recipient(&env, group_id)
    }
}

#[cfg(test)]
mod testutils;
