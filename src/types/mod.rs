mod bridge_operation_type;
mod classification;
mod common;
mod dex_trade_type;
mod price_feed_type;
mod redemption_type;
mod stability_deposit_type;
mod stability_gains_type;
mod stake_type;
mod staking_gains_type;
mod transfer_type;
mod trove_liquidated_type;
mod trove_updated_type;

pub use bridge_operation_type::Bridge_Operation_Type;
pub use classification::{
    AmountTier, EcosystemType, RiskLevel, StabilityOperation, StakeOperation,
    StakingStrategy, TransactionCategory, TransferType, TroveOperation,
    TroveStatus, UserType,
};
pub use common::{EventEnvelope, EventsType};
pub use dex_trade_type::DEX_Trade_Type;
pub use price_feed_type::Price_Feed_Type;
pub use redemption_type::Redemption_Type;
pub use stability_deposit_type::SP_Deposit_Type;
pub use stability_gains_type::SP_Gains_Type;
pub use stake_type::ST_Stake_Type;
pub use staking_gains_type::ST_Gains_Type;
pub use transfer_type::Transfer_Type;
pub use trove_liquidated_type::Trove_Liquidated_Type;
pub use trove_updated_type::Trove_Updated_Type;
