use soroban_sdk::contracterror;

/// Custom error types for the VestLock contract
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VestLockError {
    // Schedule validation errors (1000-1099)
    InvalidAddress = 1000,
    InvalidVestedAmount = 1001,
    InvalidStartTimestamp = 1002,
    InvalidEndTimestamp = 1003,
    InvalidReleaseInterval = 1004,
    InvalidCliffAmount = 1005,
    InvalidCliffRelease = 1006,
    InvalidIntervalLength = 1007,

    // Authorization errors (1100-1199)
    NotAdmin = 1100,
    NotVestingOwner = 1101,
    NotFeeCollector = 1102,
    NotAuthorizedForTransfer = 1103,

    // Funding errors (1200-1299)
    InsufficientBalance = 1200,
    InsufficientFunding = 1201,
    FundingLimitExceeded = 1202,
    VestingFullyFunded = 1203,

    // Lifecycle errors (1300-1399)
    VestingNotActive = 1300,
    EmptyVesting = 1301,
    FullyVested = 1302,
    VestingNotRevocable = 1303,

    // Transfer workflow errors (1400-1499)
    PendingTransferExists = 1400,
    NoPendingTransfer = 1401,

    // Claim gating errors (1500-1599)
    TimelockEnabled = 1500,
    InsufficientFee = 1501,
    FeeTooLow = 1502,

    // Batch and pagination errors (1600-1699)
    ArrayLengthMismatch = 1600,
    EmptyArray = 1601,
    InvalidRange = 1602,

    // Operational errors (1700-1799)
    TransferFailed = 1700,
    OperationNotAllowed = 1701,
}
