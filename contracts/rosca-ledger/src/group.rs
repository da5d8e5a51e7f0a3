use soroban_sdk::{token, Address, Env};

use crate::contribution::ContributionTracker;
use crate::errors::ContractError;
use crate::events;
use crate::pool::PoolCalculator;
use crate::storage::{self, KeyBuilder, PersistentStore, Store};
use crate::types::{Group, GroupStatus};

/// Source of group configuration for pool accounting.
pub trait GroupRegistry {
    fn get_member_count(&self, group_id: u64) -> Result<u32, ContractError>;
    fn get_contribution_amount(&self, group_id: u64) -> Result<i128, ContractError>;
}

/// Registry backed by the `Group` records in a `Store`.
pub struct StoredGroups<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> StoredGroups<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: Store> GroupRegistry for StoredGroups<'_, S> {
    fn get_member_count(&self, group_id: u64) -> Result<u32, ContractError> {
        load_group(self.store, group_id).map(|group| group.member_count)
    }

    fn get_contribution_amount(&self, group_id: u64) -> Result<i128, ContractError> {
        load_group(self.store, group_id).map(|group| group.contribution_amount)
    }
}

pub fn load_group<S: Store>(store: &S, group_id: u64) -> Result<Group, ContractError> {
    store
        .get(&KeyBuilder::group_key(group_id))
        .ok_or(ContractError::GroupNotFound)
}

pub fn save_group<S: Store>(store: &S, group: &Group) {
    store.set(&KeyBuilder::group_key(group.id), group);
}

pub(crate) fn transition(group: &mut Group, next: GroupStatus) -> Result<(), ContractError> {
    if !group.status.can_transition_to(&next) {
        return Err(ContractError::InvalidState);
    }
    group.status = next;
    Ok(())
}

/// Create a pending group. Ids are sequential from 1; 0 is never assigned.
/// The creator is not enrolled and must `join_group` like everyone else.
pub fn create_group(
    env: &Env,
    creator: Address,
    token: Address,
    contribution_amount: i128,
    cycle_duration: u64,
    member_count: u32,
) -> Result<u64, ContractError> {
    creator.require_auth();

    let config = storage::get_config(env)?;
    config.check_group_params(contribution_amount, member_count)?;
    if cycle_duration == 0 {
        return Err(ContractError::InvalidState);
    }
    // A pool that does not fit in i128 could never be paid out.
    PoolCalculator::calculate_total_pool(contribution_amount, member_count)?;

    let group_id = storage::get_group_counter(env)
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    storage::set_group_counter(env, group_id);

    let group = Group {
        id: group_id,
        creator: creator.clone(),
        token,
        contribution_amount,
        cycle_duration,
        member_count,
        joined_count: 0,
        current_cycle: 0,
        status: GroupStatus::Pending,
        created_at: env.ledger().timestamp(),
    };
    save_group(&PersistentStore::new(env), &group);

    events::group_created(env, group_id, &creator, contribution_amount, member_count);

    Ok(group_id)
}

pub fn get_group(env: &Env, group_id: u64) -> Result<Group, ContractError> {
    load_group(&PersistentStore::new(env), group_id)
}

pub fn get_group_count(env: &Env) -> u64 {
    storage::get_group_counter(env)
}

pub fn pause_group(env: &Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let store = PersistentStore::new(env);
    let mut group = load_group(&store, group_id)?;
    authorize_operator(env, &caller, &group)?;

    transition(&mut group, GroupStatus::Paused)?;
    save_group(&store, &group);

    events::group_paused(env, group_id, &caller);

    Ok(())
}

pub fn resume_group(env: &Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let store = PersistentStore::new(env);
    let mut group = load_group(&store, group_id)?;
    authorize_operator(env, &caller, &group)?;

    if group.status != GroupStatus::Paused {
        return Err(ContractError::InvalidState);
    }
    transition(&mut group, GroupStatus::Active)?;
    save_group(&store, &group);

    events::group_resumed(env, group_id, &caller);

    Ok(())
}

/// End a group for good. Contributions already made to the unpaid current
/// cycle go back to the members who made them.
pub fn cancel_group(env: &Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let store = PersistentStore::new(env);
    let mut group = load_group(&store, group_id)?;
    authorize_operator(env, &caller, &group)?;

    let collecting = matches!(group.status, GroupStatus::Active | GroupStatus::Paused);
    transition(&mut group, GroupStatus::Cancelled)?;

    let refunded = if collecting {
        refund_open_cycle(env, &store, &group)?
    } else {
        0
    };
    save_group(&store, &group);

    events::group_cancelled(env, group_id, &caller, refunded);

    Ok(())
}

/// Members are walked by payout position, so every joined address is visited
/// once.
fn refund_open_cycle<S: Store>(env: &Env, store: &S, group: &Group) -> Result<i128, ContractError> {
    let tracker = ContributionTracker::new(store);
    let token_client = token::Client::new(env, &group.token);
    let contract_addr = env.current_contract_address();

    let mut refunded: i128 = 0;
    for position in 0..group.joined_count {
        let member: Option<Address> =
            store.get(&KeyBuilder::payout_recipient_key(group.id, position));
        let Some(member) = member else {
            continue;
        };
        if let Some(record) = tracker.get_contribution(group.id, group.current_cycle, &member) {
            token_client.transfer(&contract_addr, &member, &record.amount);
            refunded = refunded
                .checked_add(record.amount)
                .ok_or(ContractError::Overflow)?;
        }
    }

    Ok(refunded)
}

/// Group creator or contract admin.
fn authorize_operator(env: &Env, caller: &Address, group: &Group) -> Result<(), ContractError> {
    if *caller == group.creator {
        return Ok(());
    }
    if *caller == storage::get_admin(env)? {
        return Ok(());
    }
    Err(ContractError::Unauthorized)
}
