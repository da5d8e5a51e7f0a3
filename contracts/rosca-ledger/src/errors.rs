use soroban_sdk::{contracterror, contracttype};

/// Error codes returned by the ledger. Codes are grouped by range and are
/// part of the client-facing ABI: never renumber an existing variant.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // Group (1000-1999)
    GroupNotFound = 1001,
    GroupFull = 1002,
    InvalidState = 1003,

    // Member (2000-2999)
    AlreadyMember = 2001,
    NotMember = 2002,
    Unauthorized = 2003,

    // Contribution (3000-3999)
    InvalidAmount = 3001,
    AlreadyContributed = 3002,
    CycleNotComplete = 3003,

    // Payout (4000-4999)
    PayoutAlreadyProcessed = 4002,
    PayoutNotFound = 4004,

    // System (9000-9999)
    NotInitialized = 9003,
    AlreadyInitialized = 9004,
    Overflow = 9005,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    Group,
    Member,
    Contribution,
    Payout,
    System,
}

impl ContractError {
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            1000..=1999 => ErrorCategory::Group,
            2000..=2999 => ErrorCategory::Member,
            3000..=3999 => ErrorCategory::Contribution,
            4000..=4999 => ErrorCategory::Payout,
            _ => ErrorCategory::System,
        }
    }

    /// Short description for logs and client-side fallbacks. Clients should
    /// branch on `code()`, not on this text.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::GroupNotFound => "group does not exist",
            ContractError::GroupFull => "group has no free member slots",
            ContractError::InvalidState => "group or configuration is in an invalid state",
            ContractError::AlreadyMember => "address is already a member of the group",
            ContractError::NotMember => "address is not a member of the group",
            ContractError::Unauthorized => "caller is not allowed to perform this operation",
            ContractError::InvalidAmount => "amount is non-positive or does not match the pool",
            ContractError::AlreadyContributed => "member already contributed this cycle",
            ContractError::CycleNotComplete => "not every member has contributed this cycle",
            ContractError::PayoutAlreadyProcessed => "cycle has already been paid out",
            ContractError::PayoutNotFound => "no payout recorded for this cycle",
            ContractError::NotInitialized => "contract has not been initialized",
            ContractError::AlreadyInitialized => "contract is already initialized",
            ContractError::Overflow => "arithmetic overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_member_code_is_stable() {
        assert_eq!(ContractError::NotMember.code(), 2002);
        assert_eq!(ContractError::NotMember.category(), ErrorCategory::Member);
    }

    #[test]
    fn test_categories_follow_ranges() {
        assert_eq!(ContractError::GroupNotFound.category(), ErrorCategory::Group);
        assert_eq!(ContractError::InvalidState.category(), ErrorCategory::Group);
        assert_eq!(
            ContractError::CycleNotComplete.category(),
            ErrorCategory::Contribution
        );
        assert_eq!(
            ContractError::PayoutAlreadyProcessed.category(),
            ErrorCategory::Payout
        );
        assert_eq!(ContractError::Overflow.category(), ErrorCategory::System);
    }

    #[test]
    fn test_messages_are_distinct_for_gate_failures() {
        assert_ne!(
            ContractError::NotMember.message(),
            ContractError::GroupNotFound.message()
        );
        assert_ne!(
            ContractError::NotMember.message(),
            ContractError::Unauthorized.message()
        );
    }
}
