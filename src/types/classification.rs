//! Closed classification vocabularies.
//!
//! Every value the query layer sees as a classification string is one of
//! these enums, so a typo'd category can only fail at construction time.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionCategory {
    Mint,
    Burn,
    LiquidationReward,
    Deposit,
    Withdrawal,
    StakingOperation,
    DexSwapIn,
    DexSwapOut,
    BridgeDeposit,
    BridgeWithdrawal,
    InstitutionalOperation,
    P2pTransfer,
    TroveOperation,
    Liquidation,
    Redemption,
    PriceUpdate,
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TransactionCategory::Mint => "MINT",
            TransactionCategory::Burn => "BURN",
            TransactionCategory::LiquidationReward => "LIQUIDATION_REWARD",
            TransactionCategory::Deposit => "DEPOSIT",
            TransactionCategory::Withdrawal => "WITHDRAWAL",
            TransactionCategory::StakingOperation => "STAKING_OPERATION",
            TransactionCategory::DexSwapIn => "DEX_SWAP_IN",
            TransactionCategory::DexSwapOut => "DEX_SWAP_OUT",
            TransactionCategory::BridgeDeposit => "BRIDGE_DEPOSIT",
            TransactionCategory::BridgeWithdrawal => "BRIDGE_WITHDRAWAL",
            TransactionCategory::InstitutionalOperation => {
                "INSTITUTIONAL_OPERATION"
            },
            TransactionCategory::P2pTransfer => "P2P_TRANSFER",
            TransactionCategory::TroveOperation => "TROVE_OPERATION",
            TransactionCategory::Liquidation => "LIQUIDATION",
            TransactionCategory::Redemption => "REDEMPTION",
            TransactionCategory::PriceUpdate => "PRICE_UPDATE",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EcosystemType {
    ProtocolNative,
    Dex,
    Bridge,
    P2p,
    DefiIntegration,
}

impl fmt::Display for EcosystemType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            EcosystemType::ProtocolNative => "PROTOCOL_NATIVE",
            EcosystemType::Dex => "DEX",
            EcosystemType::Bridge => "BRIDGE",
            EcosystemType::P2p => "P2P",
            EcosystemType::DefiIntegration => "DEFI_INTEGRATION",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferType {
    Normal,
    Mint,
    Burn,
    ProtocolOperation,
    DexSwap,
    BridgeTransfer,
    Institutional,
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TransferType::Normal => "NORMAL",
            TransferType::Mint => "MINT",
            TransferType::Burn => "BURN",
            TransferType::ProtocolOperation => "PROTOCOL_OPERATION",
            TransferType::DexSwap => "DEX_SWAP",
            TransferType::BridgeTransfer => "BRIDGE_TRANSFER",
            TransferType::Institutional => "INSTITUTIONAL",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    RetailUser,
    DexTrader,
    BridgeUser,
    DefiUser,
    ProtocolNative,
    PowerUser,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            UserType::RetailUser => "RETAIL_USER",
            UserType::DexTrader => "DEX_TRADER",
            UserType::BridgeUser => "BRIDGE_USER",
            UserType::DefiUser => "DEFI_USER",
            UserType::ProtocolNative => "PROTOCOL_NATIVE",
            UserType::PowerUser => "POWER_USER",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TroveStatus {
    Active,
    ClosedByOwner,
    ClosedByLiquidation,
}

impl TroveStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TroveStatus::Active)
    }
}

impl fmt::Display for TroveStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TroveStatus::Active => "ACTIVE",
            TroveStatus::ClosedByOwner => "CLOSED_BY_OWNER",
            TroveStatus::ClosedByLiquidation => "CLOSED_BY_LIQUIDATION",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::VeryHigh => "VERY_HIGH",
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
            RiskLevel::VeryLow => "VERY_LOW",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StakingStrategy {
    WhaleStaker,
    LongTermHolder,
    YieldFarmer,
    ActiveManager,
    CasualStaker,
}

impl fmt::Display for StakingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            StakingStrategy::WhaleStaker => "WHALE_STAKER",
            StakingStrategy::LongTermHolder => "LONG_TERM_HOLDER",
            StakingStrategy::YieldFarmer => "YIELD_FARMER",
            StakingStrategy::ActiveManager => "ACTIVE_MANAGER",
            StakingStrategy::CasualStaker => "CASUAL_STAKER",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountTier {
    Dust,
    Micro,
    Small,
    Medium,
    Large,
    Whale,
    Institutional,
}

impl fmt::Display for AmountTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            AmountTier::Dust => "DUST",
            AmountTier::Micro => "MICRO",
            AmountTier::Small => "SMALL",
            AmountTier::Medium => "MEDIUM",
            AmountTier::Large => "LARGE",
            AmountTier::Whale => "WHALE",
            AmountTier::Institutional => "INSTITUTIONAL",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TroveOperation {
    Open,
    Close,
    AddCollateral,
    WithdrawCollateral,
    Borrow,
    Repay,
    Adjust,
    Liquidate,
}

impl fmt::Display for TroveOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TroveOperation::Open => "OPEN",
            TroveOperation::Close => "CLOSE",
            TroveOperation::AddCollateral => "ADD_COLLATERAL",
            TroveOperation::WithdrawCollateral => "WITHDRAW_COLLATERAL",
            TroveOperation::Borrow => "BORROW",
            TroveOperation::Repay => "REPAY",
            TroveOperation::Adjust => "ADJUST",
            TroveOperation::Liquidate => "LIQUIDATE",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StabilityOperation {
    Deposit,
    Withdraw,
    ClaimGains,
}

impl fmt::Display for StabilityOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            StabilityOperation::Deposit => "DEPOSIT",
            StabilityOperation::Withdraw => "WITHDRAW",
            StabilityOperation::ClaimGains => "CLAIM_GAINS",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StakeOperation {
    Stake,
    Unstake,
    ClaimGains,
}

impl fmt::Display for StakeOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            StakeOperation::Stake => "STAKE",
            StakeOperation::Unstake => "UNSTAKE",
            StakeOperation::ClaimGains => "CLAIM_GAINS",
        };
        write!(f, "{}", s)
    }
}
