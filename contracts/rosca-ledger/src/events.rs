use soroban_sdk::{symbol_short, Address, Env, Symbol};

const GROUP_CREATED: Symbol = symbol_short!("grp_creat");
const MEMBER_JOINED: Symbol = symbol_short!("grp_join");
const GROUP_ACTIVATED: Symbol = symbol_short!("grp_actv");
const GROUP_PAUSED: Symbol = symbol_short!("grp_paus");
const GROUP_RESUMED: Symbol = symbol_short!("grp_resm");
const GROUP_COMPLETED: Symbol = symbol_short!("grp_comp");
const GROUP_CANCELLED: Symbol = symbol_short!("grp_cncl");
const CONTRIBUTED: Symbol = symbol_short!("contrib");
const PAID_OUT: Symbol = symbol_short!("payout");
const CONFIG_UPDATED: Symbol = symbol_short!("cfg_upd");

pub fn group_created(
    env: &Env,
    group_id: u64,
    creator: &Address,
    contribution_amount: i128,
    member_count: u32,
) {
    env.events().publish(
        (GROUP_CREATED,),
        (group_id, creator.clone(), contribution_amount, member_count),
    );
}

pub fn member_joined(env: &Env, group_id: u64, member: &Address, payout_position: u32) {
    env.events()
        .publish((MEMBER_JOINED,), (group_id, member.clone(), payout_position));
}

pub fn group_activated(env: &Env, group_id: u64) {
    env.events().publish((GROUP_ACTIVATED,), group_id);
}

pub fn group_paused(env: &Env, group_id: u64, by: &Address) {
    env.events().publish((GROUP_PAUSED,), (group_id, by.clone()));
}

pub fn group_resumed(env: &Env, group_id: u64, by: &Address) {
    env.events().publish((GROUP_RESUMED,), (group_id, by.clone()));
}

pub fn group_completed(env: &Env, group_id: u64) {
    env.events().publish((GROUP_COMPLETED,), group_id);
}

pub fn group_cancelled(env: &Env, group_id: u64, by: &Address, refunded: i128) {
    env.events()
        .publish((GROUP_CANCELLED,), (group_id, by.clone(), refunded));
}

pub fn contributed(
    env: &Env,
    group_id: u64,
    cycle: u32,
    member: &Address,
    amount: i128,
    cycle_total: i128,
) {
    env.events().publish(
        (CONTRIBUTED, group_id),
        (cycle, member.clone(), amount, cycle_total),
    );
}

pub fn paid_out(env: &Env, group_id: u64, cycle: u32, recipient: &Address, amount: i128) {
    env.events()
        .publish((PAID_OUT, group_id), (cycle, recipient.clone(), amount));
}

pub fn config_updated(env: &Env, admin: &Address) {
    env.events().publish((CONFIG_UPDATED,), admin.clone());
}
