use core::fmt::Debug;

use soroban_sdk::{contracttype, Address, Env, IntoVal, TryFromVal, Val};

use crate::config::ContractConfig;
use crate::errors::ContractError;

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;

// --- Key space ---
//
// The variant order and field types below are the on-ledger key encoding.
// Reordering or retyping anything here orphans every stored record.

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum StorageKey {
    Group(GroupKey),
    Member(MemberKey),
    Contribution(ContributionKey),
    Payout(PayoutKey),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum GroupKey {
    Data(u64),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum MemberKey {
    Profile(u64, Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum ContributionKey {
    CycleTotal(u64, u32),
    CycleCount(u64, u32),
    Individual(u64, u32, Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum PayoutKey {
    /// Written once the cycle has been paid; doubles as the closed flag.
    Record(u64, u32),
    /// Member paid out at a given zero-indexed position.
    Recipient(u64, u32),
}

/// Pure constructors for every persistent key.
pub struct KeyBuilder;

impl KeyBuilder {
    pub fn group_key(group_id: u64) -> StorageKey {
        StorageKey::Group(GroupKey::Data(group_id))
    }

    pub fn member_key(group_id: u64, address: &Address) -> StorageKey {
        StorageKey::Member(MemberKey::Profile(group_id, address.clone()))
    }

    pub fn cycle_contribution_total_key(group_id: u64, cycle: u32) -> StorageKey {
        StorageKey::Contribution(ContributionKey::CycleTotal(group_id, cycle))
    }

    pub fn cycle_contributor_count_key(group_id: u64, cycle: u32) -> StorageKey {
        StorageKey::Contribution(ContributionKey::CycleCount(group_id, cycle))
    }

    pub fn contribution_key(group_id: u64, cycle: u32, address: &Address) -> StorageKey {
        StorageKey::Contribution(ContributionKey::Individual(
            group_id,
            cycle,
            address.clone(),
        ))
    }

    pub fn payout_record_key(group_id: u64, cycle: u32) -> StorageKey {
        StorageKey::Payout(PayoutKey::Record(group_id, cycle))
    }

    pub fn payout_recipient_key(group_id: u64, position: u32) -> StorageKey {
        StorageKey::Payout(PayoutKey::Recipient(group_id, position))
    }
}

// --- Store ---

/// Key-value access used by every ledger component. Production code goes
/// through `PersistentStore`; tests swap in an in-memory map.
pub trait Store {
    fn has(&self, key: &StorageKey) -> bool;

    fn get<V>(&self, key: &StorageKey) -> Option<V>
    where
        V: TryFromVal<Env, Val>,
        V::Error: Debug;

    fn set<V>(&self, key: &StorageKey, value: &V)
    where
        V: IntoVal<Env, Val>;
}

/// `Store` over the contract's persistent storage. Reads that hit and all
/// writes bump the entry TTL; `has` is a bare existence check.
pub struct PersistentStore<'a> {
    env: &'a Env,
}

impl<'a> PersistentStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn extend_ttl(&self, key: &StorageKey) {
        self.env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_TTL_THRESHOLD,
            PERSISTENT_TTL_EXTEND,
        );
    }
}

impl Store for PersistentStore<'_> {
    fn has(&self, key: &StorageKey) -> bool {
        self.env.storage().persistent().has(key)
    }

    fn get<V>(&self, key: &StorageKey) -> Option<V>
    where
        V: TryFromVal<Env, Val>,
        V::Error: Debug,
    {
        let result = self.env.storage().persistent().get(key);
        if result.is_some() {
            self.extend_ttl(key);
        }
        result
    }

    fn set<V>(&self, key: &StorageKey, value: &V)
    where
        V: IntoVal<Env, Val>,
    {
        self.env.storage().persistent().set(key, value);
        self.extend_ttl(key);
    }
}

// --- Instance data ---

#[contracttype]
#[derive(Clone)]
pub enum InstanceKey {
    Admin,
    GroupCounter,
    Config,
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&InstanceKey::Admin)
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&InstanceKey::Admin)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&InstanceKey::Admin, admin);
    extend_instance_ttl(env);
}

pub fn get_group_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&InstanceKey::GroupCounter)
        .unwrap_or(0)
}

pub fn set_group_counter(env: &Env, counter: u64) {
    env.storage()
        .instance()
        .set(&InstanceKey::GroupCounter, &counter);
    extend_instance_ttl(env);
}

pub fn get_config(env: &Env) -> Result<ContractConfig, ContractError> {
    env.storage()
        .instance()
        .get(&InstanceKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &ContractConfig) {
    env.storage().instance().set(&InstanceKey::Config, config);
    extend_instance_ttl(env);
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}
