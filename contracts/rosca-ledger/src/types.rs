use soroban_sdk::{contracttype, Address};

/// Lifecycle of a savings group.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupStatus {
    Pending,   // Accepting members until every slot is filled
    Active,    // Cycles in progress
    Paused,    // Frozen by the creator or the contract admin
    Completed, // Every member has received one payout
    Cancelled, // Ended early by the creator or the contract admin
}

impl GroupStatus {
    pub fn can_transition_to(&self, next: &GroupStatus) -> bool {
        matches!(
            (self, next),
            (GroupStatus::Pending, GroupStatus::Active)
                | (GroupStatus::Active, GroupStatus::Paused)
                | (GroupStatus::Active, GroupStatus::Completed)
                | (GroupStatus::Paused, GroupStatus::Active)
                | (GroupStatus::Pending, GroupStatus::Cancelled)
                | (GroupStatus::Active, GroupStatus::Cancelled)
                | (GroupStatus::Paused, GroupStatus::Cancelled)
        )
    }

    pub fn accepts_members(&self) -> bool {
        matches!(self, GroupStatus::Pending)
    }

    pub fn accepts_contributions(&self) -> bool {
        matches!(self, GroupStatus::Active)
    }
}

/// Group configuration plus the cursor of the cycle currently collecting.
///
/// `contribution_amount`, `cycle_duration` and `member_count` are fixed at
/// creation. `cycle_duration` is in seconds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Group {
    pub id: u64,
    pub creator: Address,
    pub token: Address,
    pub contribution_amount: i128,
    pub cycle_duration: u64,
    pub member_count: u32,
    pub joined_count: u32,
    pub current_cycle: u32,
    pub status: GroupStatus,
    pub created_at: u64,
}

impl Group {
    pub fn is_full(&self) -> bool {
        self.joined_count >= self.member_count
    }

    /// Every member receives exactly one payout, so the group runs
    /// `member_count` cycles.
    pub fn is_last_cycle(&self) -> bool {
        self.current_cycle.saturating_add(1) >= self.member_count
    }
}

/// One membership fact. Its presence at the member key is what makes an
/// address a member; the payload is only read by `get_member_details`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberProfile {
    pub address: Address,
    pub group_id: u64,
    pub joined_at: u64,
    /// Zero-indexed join order; the member is paid out in this cycle.
    pub payout_position: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRecord {
    pub member: Address,
    pub group_id: u64,
    pub cycle: u32,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutRecord {
    pub recipient: Address,
    pub group_id: u64,
    pub cycle: u32,
    pub amount: i128,
    pub timestamp: u64,
}
