use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;
use crate::events;
use crate::group;
use crate::membership;
use crate::storage::{KeyBuilder, PersistentStore, Store};
use crate::types::ContributionRecord;

/// Running totals of one (group, cycle). Absent entries read as zero.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CycleAccounting {
    pub total_contributed: i128,
    pub contributor_count: u32,
}

/// Sole writer of cycle accounting.
pub struct ContributionTracker<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> ContributionTracker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record `address`'s contribution for `cycle`.
    ///
    /// The caller must already have passed the membership gate. A second
    /// contribution from the same address in the same cycle is rejected with
    /// `AlreadyContributed` and leaves every counter untouched. Totals and
    /// the per-member record are written together or not at all.
    pub fn record_contribution(
        &self,
        group_id: u64,
        cycle: u32,
        address: &Address,
        amount: i128,
        timestamp: u64,
    ) -> Result<CycleAccounting, ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let record_key = KeyBuilder::contribution_key(group_id, cycle, address);
        if self.store.has(&record_key) {
            return Err(ContractError::AlreadyContributed);
        }

        let current = self.cycle_totals(group_id, cycle);
        let updated = CycleAccounting {
            total_contributed: current
                .total_contributed
                .checked_add(amount)
                .ok_or(ContractError::Overflow)?,
            contributor_count: current
                .contributor_count
                .checked_add(1)
                .ok_or(ContractError::Overflow)?,
        };

        let record = ContributionRecord {
            member: address.clone(),
            group_id,
            cycle,
            amount,
            timestamp,
        };
        self.store.set(&record_key, &record);
        self.store.set(
            &KeyBuilder::cycle_contribution_total_key(group_id, cycle),
            &updated.total_contributed,
        );
        self.store.set(
            &KeyBuilder::cycle_contributor_count_key(group_id, cycle),
            &updated.contributor_count,
        );

        Ok(updated)
    }

    pub fn cycle_totals(&self, group_id: u64, cycle: u32) -> CycleAccounting {
        CycleAccounting {
            total_contributed: self
                .store
                .get(&KeyBuilder::cycle_contribution_total_key(group_id, cycle))
                .unwrap_or(0),
            contributor_count: self
                .store
                .get(&KeyBuilder::cycle_contributor_count_key(group_id, cycle))
                .unwrap_or(0),
        }
    }

    pub fn has_contributed(&self, group_id: u64, cycle: u32, address: &Address) -> bool {
        self.store
            .has(&KeyBuilder::contribution_key(group_id, cycle, address))
    }

    pub fn get_contribution(
        &self,
        group_id: u64,
        cycle: u32,
        address: &Address,
    ) -> Option<ContributionRecord> {
        self.store
            .get(&KeyBuilder::contribution_key(group_id, cycle, address))
    }
}

/// Pay the group's fixed amount into the current cycle.
pub fn contribute(env: &Env, member: Address, group_id: u64) -> Result<(), ContractError> {
    member.require_auth();

    let store = PersistentStore::new(env);
    membership::require_member(&store, group_id, &member)?;

    let group = group::load_group(&store, group_id)?;
    if !group.status.accepts_contributions() {
        return Err(ContractError::InvalidState);
    }

    let cycle = group.current_cycle;
    if store.has(&KeyBuilder::payout_record_key(group_id, cycle)) {
        return Err(ContractError::PayoutAlreadyProcessed);
    }

    let totals = ContributionTracker::new(&store).record_contribution(
        group_id,
        cycle,
        &member,
        group.contribution_amount,
        env.ledger().timestamp(),
    )?;

    token::Client::new(env, &group.token).transfer(
        &member,
        &env.current_contract_address(),
        &group.contribution_amount,
    );

    events::contributed(
        env,
        group_id,
        cycle,
        &member,
        group.contribution_amount,
        totals.total_contributed,
    );

    Ok(())
}

pub fn has_contributed(
    env: &Env,
    member: Address,
    group_id: u64,
    cycle: u32,
) -> Result<bool, ContractError> {
    let store = PersistentStore::new(env);
    membership::require_member(&store, group_id, &member)?;

    Ok(ContributionTracker::new(&store).has_contributed(group_id, cycle, &member))
}

pub fn get_contribution(
    env: &Env,
    member: Address,
    group_id: u64,
    cycle: u32,
) -> Result<Option<ContributionRecord>, ContractError> {
    let store = PersistentStore::new(env);
    membership::require_member(&store, group_id, &member)?;

    Ok(ContributionTracker::new(&store).get_contribution(group_id, cycle, &member))
}
