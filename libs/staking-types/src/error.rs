use soroban_sdk::contracterror;

/// Every reason a ledger operation can be rejected.
///
/// Returning any of these aborts the invocation and the host discards its writes.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum StakingError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,

    BadMagicNumber = 10,
    ZeroAmount = 11,
    MintExceedsMaximumSupply = 12,
    LockDurationExceedsMaximum = 13,
    InvalidPositionId = 14,
    CallerNotPositionOwner = 15,
    BurnBeforeFreeTime = 16,
    WithdrawBeforeFreeTime = 17,

    CircuitBreakerOpen = 20,
    CircuitBreakerAlreadyOpen = 21,
    CircuitBreakerAlreadyClosed = 22,

    InsufficientAssetBalance = 30,
    TransferFailed = 31,
    SlushTooLarge = 32,
    AmountOverflow = 33,
}
