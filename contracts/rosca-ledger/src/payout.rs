use soroban_sdk::{log, token, Address, Env, String};

use crate::errors::ContractError;
use crate::events;
use crate::group::{self, StoredGroups};
use crate::pool::{PoolCalculator, PoolInfo};
use crate::storage::{KeyBuilder, PersistentStore, Store};
use crate::types::{Group, GroupStatus, PayoutRecord};

/// Check the current cycle of an active group against the payout rules
/// without moving funds.
pub fn validate_payout(env: &Env, group_id: u64) -> Result<PoolInfo, ContractError> {
    let store = PersistentStore::new(env);
    let group = group::load_group(&store, group_id)?;
    ready_pool(&store, &group)
}

/// Pay the current cycle's pool to its recipient and open the next cycle.
/// Anyone can trigger this once the cycle is fully and exactly collected.
pub fn distribute_payout(env: &Env, group_id: u64) -> Result<PayoutRecord, ContractError> {
    let store = PersistentStore::new(env);
    let mut group = group::load_group(&store, group_id)?;

    let pool_info = match ready_pool(&store, &group) {
        Ok(pool_info) => pool_info,
        Err(err) => {
            log!(
                env,
                "payout rejected",
                group_id,
                group.current_cycle,
                err.code(),
                err.category(),
                String::from_str(env, err.message())
            );
            return Err(err);
        }
    };

    let cycle = group.current_cycle;
    let recipient: Address = store
        .get(&KeyBuilder::payout_recipient_key(group_id, cycle))
        .ok_or(ContractError::InvalidState)?;

    token::Client::new(env, &group.token).transfer(
        &env.current_contract_address(),
        &recipient,
        &pool_info.total_pool_amount,
    );

    let record = PayoutRecord {
        recipient: recipient.clone(),
        group_id,
        cycle,
        amount: pool_info.total_pool_amount,
        timestamp: env.ledger().timestamp(),
    };
    store.set(&KeyBuilder::payout_record_key(group_id, cycle), &record);
    events::paid_out(env, group_id, cycle, &recipient, record.amount);

    advance_cycle(&mut group)?;
    group::save_group(&store, &group);
    if group.status == GroupStatus::Completed {
        events::group_completed(env, group_id);
    }

    Ok(record)
}

pub fn get_payout(env: &Env, group_id: u64, cycle: u32) -> Result<PayoutRecord, ContractError> {
    PersistentStore::new(env)
        .get(&KeyBuilder::payout_record_key(group_id, cycle))
        .ok_or(ContractError::PayoutNotFound)
}

pub fn get_current_recipient(env: &Env, group_id: u64) -> Result<Address, ContractError> {
    let store = PersistentStore::new(env);
    let group = group::load_group(&store, group_id)?;

    if !matches!(group.status, GroupStatus::Active | GroupStatus::Paused) {
        return Err(ContractError::InvalidState);
    }

    store
        .get(&KeyBuilder::payout_recipient_key(group_id, group.current_cycle))
        .ok_or(ContractError::InvalidState)
}

fn ready_pool<S: Store>(store: &S, group: &Group) -> Result<PoolInfo, ContractError> {
    if group.status != GroupStatus::Active {
        return Err(ContractError::InvalidState);
    }

    let cycle = group.current_cycle;
    if store.has(&KeyBuilder::payout_record_key(group.id, cycle)) {
        return Err(ContractError::PayoutAlreadyProcessed);
    }

    let pool_info =
        PoolCalculator::get_pool_info(&StoredGroups::new(store), store, group.id, cycle)?;
    PoolCalculator::validate_pool_ready_for_payout(&pool_info)?;

    Ok(pool_info)
}

/// Move past a paid cycle; after the last one the group is completed.
fn advance_cycle(group: &mut Group) -> Result<(), ContractError> {
    if group.is_last_cycle() {
        return group::transition(group, GroupStatus::Completed);
    }

    group.current_cycle = group
        .current_cycle
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::MemoryStore;
    use soroban_sdk::testutils::Address as _;

    fn active_group(env: &Env, member_count: u32) -> Group {
        Group {
            id: 1,
            creator: Address::generate(env),
            token: Address::generate(env),
            contribution_amount: 100,
            cycle_duration: 604_800,
            member_count,
            joined_count: member_count,
            current_cycle: 0,
            status: GroupStatus::Active,
            created_at: 0,
        }
    }

    #[test]
    fn test_advance_cycle_until_completed() {
        let env = Env::default();
        let mut group = active_group(&env, 3);

        advance_cycle(&mut group).unwrap();
        assert_eq!(group.current_cycle, 1);
        advance_cycle(&mut group).unwrap();
        assert_eq!(group.current_cycle, 2);
        assert_eq!(group.status, GroupStatus::Active);

        advance_cycle(&mut group).unwrap();
        assert_eq!(group.current_cycle, 2);
        assert_eq!(group.status, GroupStatus::Completed);

        assert_eq!(advance_cycle(&mut group), Err(ContractError::InvalidState));
    }

    #[test]
    fn test_ready_pool_requires_active_group() {
        let env = Env::default();
        let store = MemoryStore::new(&env);
        let mut group = active_group(&env, 2);
        group.status = GroupStatus::Paused;
        group::save_group(&store, &group);

        assert_eq!(ready_pool(&store, &group), Err(ContractError::InvalidState));
    }

    #[test]
    fn test_ready_pool_rejects_paid_cycle() {
        let env = Env::default();
        let store = MemoryStore::new(&env);
        let group = active_group(&env, 2);
        group::save_group(&store, &group);

        let record = PayoutRecord {
            recipient: Address::generate(&env),
            group_id: 1,
            cycle: 0,
            amount: 200,
            timestamp: 0,
        };
        store.set(&KeyBuilder::payout_record_key(1, 0), &record);

        assert_eq!(
            ready_pool(&store, &group),
            Err(ContractError::PayoutAlreadyProcessed)
        );
    }

    #[test]
    fn test_ready_pool_reports_incomplete_cycle() {
        let env = Env::default();
        let store = MemoryStore::new(&env);
        let group = active_group(&env, 2);
        group::save_group(&store, &group);

        assert_eq!(
            ready_pool(&store, &group),
            Err(ContractError::CycleNotComplete)
        );
    }
}
