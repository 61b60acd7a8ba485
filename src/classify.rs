//! Transfer classification engine.
//!
//! Maps a (from, to, value) tuple to a category, ecosystem bucket and
//! transfer type through a prioritized rule chain. The known-address sets
//! are configuration data; changing them never touches the rule order.

use std::collections::{HashMap, HashSet};

use bigdecimal::BigDecimal;

use crate::types::{EcosystemType, TransactionCategory, TransferType};

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolRole {
    TroveManager,
    BorrowerOperations,
    StabilityPool,
    Staking,
}

/// Address → role mapping for the protocol, DEX and bridge contract sets.
/// Addresses are normalized to lowercase on insertion and lookup.
#[derive(Debug, Default)]
pub struct AddressBook {
    protocol: HashMap<String, ProtocolRole>,
    dex: HashSet<String>,
    bridge: HashSet<String>,
}

impl AddressBook {
    pub fn new() -> AddressBook {
        AddressBook::default()
    }

    pub fn add_protocol(&mut self, address: &str, role: ProtocolRole) {
        self.protocol.insert(address.to_lowercase(), role);
    }

    pub fn add_dex(&mut self, address: &str) {
        self.dex.insert(address.to_lowercase());
    }

    pub fn add_bridge(&mut self, address: &str) {
        self.bridge.insert(address.to_lowercase());
    }

    pub fn protocol_role(&self, address: &str) -> Option<ProtocolRole> {
        self.protocol.get(&address.to_lowercase()).copied()
    }

    pub fn is_dex(&self, address: &str) -> bool {
        self.dex.contains(&address.to_lowercase())
    }

    pub fn is_bridge(&self, address: &str) -> bool {
        self.bridge.contains(&address.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: TransactionCategory,
    pub ecosystem: EcosystemType,
    pub transfer_type: TransferType,
}

/// First match wins: zero address → protocol contract → DEX → bridge →
/// institutional size → P2P default. Total; always returns a value.
pub fn classify(
    book: &AddressBook,
    from: &str,
    to: &str,
    value: &BigDecimal,
    institutional_threshold: &BigDecimal,
) -> Classification {
    if from.eq_ignore_ascii_case(ZERO_ADDRESS) {
        return Classification {
            category: TransactionCategory::Mint,
            ecosystem: EcosystemType::ProtocolNative,
            transfer_type: TransferType::Mint,
        };
    }

    if to.eq_ignore_ascii_case(ZERO_ADDRESS) {
        return Classification {
            category: TransactionCategory::Burn,
            ecosystem: EcosystemType::ProtocolNative,
            transfer_type: TransferType::Burn,
        };
    }

    let from_role = book.protocol_role(from);
    let to_role = book.protocol_role(to);

    if let Some(role) = from_role.or(to_role) {
        let category = match role {
            ProtocolRole::TroveManager => {
                TransactionCategory::LiquidationReward
            },
            ProtocolRole::BorrowerOperations => {
                TransactionCategory::TroveOperation
            },
            // Direction matters for the pool: funds flowing to the pool
            // are a deposit, funds leaving it are a withdrawal.
            ProtocolRole::StabilityPool => {
                if to_role == Some(ProtocolRole::StabilityPool) {
                    TransactionCategory::Deposit
                } else {
                    TransactionCategory::Withdrawal
                }
            },
            ProtocolRole::Staking => TransactionCategory::StakingOperation,
        };
        return Classification {
            category,
            ecosystem: EcosystemType::ProtocolNative,
            transfer_type: TransferType::ProtocolOperation,
        };
    }

    if book.is_dex(from) {
        return Classification {
            category: TransactionCategory::DexSwapIn,
            ecosystem: EcosystemType::Dex,
            transfer_type: TransferType::DexSwap,
        };
    }

    if book.is_dex(to) {
        return Classification {
            category: TransactionCategory::DexSwapOut,
            ecosystem: EcosystemType::Dex,
            transfer_type: TransferType::DexSwap,
        };
    }

    if book.is_bridge(from) {
        return Classification {
            category: TransactionCategory::BridgeWithdrawal,
            ecosystem: EcosystemType::Bridge,
            transfer_type: TransferType::BridgeTransfer,
        };
    }

    if book.is_bridge(to) {
        return Classification {
            category: TransactionCategory::BridgeDeposit,
            ecosystem: EcosystemType::Bridge,
            transfer_type: TransferType::BridgeTransfer,
        };
    }

    // A value equal to the cutoff belongs to the upper bucket, matching the
    // amount-tier boundary semantics.
    if value >= institutional_threshold {
        return Classification {
            category: TransactionCategory::InstitutionalOperation,
            ecosystem: EcosystemType::DefiIntegration,
            transfer_type: TransferType::Institutional,
        };
    }

    Classification {
        category: TransactionCategory::P2pTransfer,
        ecosystem: EcosystemType::P2p,
        transfer_type: TransferType::Normal,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const POOL: &str = "0x00000000000000000000000000000000000000a1";
    const MANAGER: &str = "0x00000000000000000000000000000000000000a2";
    const STAKING: &str = "0x00000000000000000000000000000000000000a3";
    const DEX: &str = "0x00000000000000000000000000000000000000b1";
    const BRIDGE: &str = "0x00000000000000000000000000000000000000c1";
    const ALICE: &str = "0x00000000000000000000000000000000000000d1";

    fn book() -> AddressBook {
        let mut book = AddressBook::new();
        book.add_protocol(POOL, ProtocolRole::StabilityPool);
        book.add_protocol(MANAGER, ProtocolRole::TroveManager);
        book.add_protocol(STAKING, ProtocolRole::Staking);
        book.add_dex(DEX);
        book.add_bridge(BRIDGE);
        book
    }

    fn threshold() -> BigDecimal {
        // 1,000,000 whole tokens at 18 decimals.
        BigDecimal::from_str("1000000000000000000000000").unwrap()
    }

    fn value(n: &str) -> BigDecimal {
        BigDecimal::from_str(n).unwrap()
    }

    #[test]
    fn zero_address_takes_priority_over_protocol() {
        let c =
            classify(&book(), ZERO_ADDRESS, POOL, &value("1"), &threshold());
        assert_eq!(c.category, TransactionCategory::Mint);
        assert_eq!(c.transfer_type, TransferType::Mint);
    }

    #[test]
    fn burn_on_zero_destination() {
        let c =
            classify(&book(), ALICE, ZERO_ADDRESS, &value("1"), &threshold());
        assert_eq!(c.category, TransactionCategory::Burn);
    }

    #[test]
    fn stability_pool_is_direction_sensitive() {
        let to_pool = classify(&book(), ALICE, POOL, &value("5"), &threshold());
        assert_eq!(to_pool.category, TransactionCategory::Deposit);

        let from_pool =
            classify(&book(), POOL, ALICE, &value("5"), &threshold());
        assert_eq!(from_pool.category, TransactionCategory::Withdrawal);
    }

    #[test]
    fn trove_manager_is_direction_agnostic() {
        let a = classify(&book(), MANAGER, ALICE, &value("5"), &threshold());
        let b = classify(&book(), ALICE, MANAGER, &value("5"), &threshold());
        assert_eq!(a.category, TransactionCategory::LiquidationReward);
        assert_eq!(b.category, TransactionCategory::LiquidationReward);
    }

    #[test]
    fn staking_contract_classifies_as_staking_operation() {
        let c = classify(&book(), ALICE, STAKING, &value("5"), &threshold());
        assert_eq!(c.category, TransactionCategory::StakingOperation);
        assert_eq!(c.ecosystem, EcosystemType::ProtocolNative);
    }

    #[test]
    fn dex_direction() {
        let swap_in = classify(&book(), DEX, ALICE, &value("5"), &threshold());
        assert_eq!(swap_in.category, TransactionCategory::DexSwapIn);
        assert_eq!(swap_in.ecosystem, EcosystemType::Dex);

        let swap_out = classify(&book(), ALICE, DEX, &value("5"), &threshold());
        assert_eq!(swap_out.category, TransactionCategory::DexSwapOut);
    }

    #[test]
    fn bridge_direction() {
        let withdrawal =
            classify(&book(), BRIDGE, ALICE, &value("5"), &threshold());
        assert_eq!(
            withdrawal.category,
            TransactionCategory::BridgeWithdrawal
        );

        let deposit =
            classify(&book(), ALICE, BRIDGE, &value("5"), &threshold());
        assert_eq!(deposit.category, TransactionCategory::BridgeDeposit);
    }

    #[test]
    fn institutional_cutoff_inclusive() {
        let at = classify(&book(), ALICE, ALICE, &threshold(), &threshold());
        assert_eq!(at.category, TransactionCategory::InstitutionalOperation);

        let below = classify(
            &book(),
            ALICE,
            ALICE,
            &value("999999999999999999999999"),
            &threshold(),
        );
        assert_eq!(below.category, TransactionCategory::P2pTransfer);
        assert_eq!(below.transfer_type, TransferType::Normal);
    }

    #[test]
    fn addresses_match_case_insensitively() {
        let c = classify(
            &book(),
            ALICE,
            &POOL.to_uppercase().replace("0X", "0x"),
            &value("5"),
            &threshold(),
        );
        assert_eq!(c.category, TransactionCategory::Deposit);
    }
}
