use std::{env, fs, ops::Deref, path::Path, str::FromStr, sync::Arc};

use bigdecimal::BigDecimal;

use crate::{
    classify::{AddressBook, ProtocolRole},
    error::Error,
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub book: AddressBook,
}

impl State {
    pub fn new(config: Config) -> Result<State, Error> {
        let book = Self::init_address_book(&config)?;
        Ok(Self { config, book })
    }

    fn init_address_book(config: &Config) -> Result<AddressBook, Error> {
        let mut book = AddressBook::new();

        for (address, role) in [
            (&config.trove_manager_contract, ProtocolRole::TroveManager),
            (
                &config.borrower_operations_contract,
                ProtocolRole::BorrowerOperations,
            ),
            (&config.stability_pool_contract, ProtocolRole::StabilityPool),
            (&config.staking_contract, ProtocolRole::Staking),
        ] {
            if !address.starts_with("0x") {
                return Err(Error::ConfigurationError(format!(
                    "protocol contract address is not hex: {}",
                    address
                )));
            }
            book.add_protocol(address, role);
        }

        for address in &config.dex_addresses {
            book.add_dex(address);
        }

        for address in &config.bridge_addresses {
            book.add_bridge(address);
        }

        Ok(book)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub events_file: String,
    pub token_decimals: u32,
    /// Base units; derived from the whole-token env value.
    pub institutional_threshold: BigDecimal,
    pub off_hours_start: u32,
    pub off_hours_end: u32,
    pub enable_ml_risk: bool,
    pub enable_market_conditions: bool,
    pub trove_manager_contract: String,
    pub borrower_operations_contract: String,
    pub stability_pool_contract: String,
    pub staking_contract: String,
    pub dex_addresses: Vec<String>,
    pub bridge_addresses: Vec<String>,
}

#[cfg(not(feature = "testnet"))]
mod defaults {
    pub const TROVE_MANAGER: &str =
        "0xd2057c74a50f10a3bbe1cbca476cd4a70ab4e8b3";
    pub const BORROWER_OPERATIONS: &str =
        "0x32b5b59864e80c1d1b6b358ad4b9bc16f0b1d6a9";
    pub const STABILITY_POOL: &str =
        "0x9f2d3c1b4e5a6d7c8b9a0f1e2d3c4b5a69788796";
    pub const STAKING: &str = "0x1c9e7a3b5d2f4e6a8c0b1d3f5a7c9e2b4d6f8a1c";
}

#[cfg(feature = "testnet")]
mod defaults {
    pub const TROVE_MANAGER: &str =
        "0x7a4b8c2d1e9f3a5c6b8d0e2f4a6c8e1b3d5f7a9c";
    pub const BORROWER_OPERATIONS: &str =
        "0x5e3a1c9b7d2f4e6a8c0b1d3f5a7c9e2b4d6f8a1c";
    pub const STABILITY_POOL: &str =
        "0x2b6d8f1a3c5e7a9c1b3d5f7a9c2e4b6d8f1a3c5e";
    pub const STAKING: &str = "0x8f1a3c5e7a9c2b4d6f8a1c3e5b7d9f2a4c6e8b1d";
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_list(key: &str) -> Vec<String> {
    env::var(key)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

pub fn get_configuration() -> Result<Config, Error> {
    let events_file = env::var("EVENTS_FILE")?;
    let token_decimals: u32 = env_or("TOKEN_DECIMALS", "18").parse()?;

    let institutional_whole =
        BigDecimal::from_str(&env_or("INSTITUTIONAL_THRESHOLD", "1000000"))?;
    let scale = BigDecimal::from_str(
        &format!("1{}", "0".repeat(token_decimals as usize)),
    )?;
    let institutional_threshold = institutional_whole * scale;

    let off_hours_start: u32 = env_or("OFF_HOURS_START", "22").parse()?;
    let off_hours_end: u32 = env_or("OFF_HOURS_END", "6").parse()?;

    if off_hours_start > 23 || off_hours_end > 23 {
        return Err(Error::ConfigurationError(format!(
            "off-hours window out of range: [{}, {})",
            off_hours_start, off_hours_end
        )));
    }

    let enable_ml_risk: bool = env_or("ENABLE_ML_RISK", "true").parse()?;
    let enable_market_conditions: bool =
        env_or("ENABLE_MARKET_CONDITIONS", "true").parse()?;

    let config = Config {
        events_file,
        token_decimals,
        institutional_threshold,
        off_hours_start,
        off_hours_end,
        enable_ml_risk,
        enable_market_conditions,
        trove_manager_contract: env_or(
            "TROVE_MANAGER_CONTRACT",
            defaults::TROVE_MANAGER,
        ),
        borrower_operations_contract: env_or(
            "BORROWER_OPERATIONS_CONTRACT",
            defaults::BORROWER_OPERATIONS,
        ),
        stability_pool_contract: env_or(
            "STABILITY_POOL_CONTRACT",
            defaults::STABILITY_POOL,
        ),
        staking_contract: env_or("STAKING_CONTRACT", defaults::STAKING),
        dex_addresses: env_list("DEX_ADDRESSES"),
        bridge_addresses: env_list("BRIDGE_ADDRESSES"),
    };

    Ok(config)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";
    let etl_config_file: &str = "etl.conf";

    let directory = env!("CARGO_MANIFEST_DIR");

    for file in [config_file, etl_config_file] {
        let path = format!("{}/{}", directory, file);
        if Path::new(&path).exists() {
            let config_string = fs::read_to_string(path)?;
            parse_config_string(config_string)?;
        }
    }

    Ok(())
}

fn parse_config_string(config: String) -> Result<(), Error> {
    for line in config.split('\n') {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            env::set_var(key, value);
        }
    }

    Ok(())
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for unit tests; no env access.
    pub fn for_tests() -> Config {
        Config {
            events_file: String::new(),
            token_decimals: 18,
            institutional_threshold: BigDecimal::from_str(
                "1000000000000000000000000",
            )
            .unwrap(),
            off_hours_start: 22,
            off_hours_end: 6,
            enable_ml_risk: true,
            enable_market_conditions: true,
            trove_manager_contract: defaults::TROVE_MANAGER.to_owned(),
            borrower_operations_contract: defaults::BORROWER_OPERATIONS
                .to_owned(),
            stability_pool_contract: defaults::STABILITY_POOL.to_owned(),
            staking_contract: defaults::STAKING.to_owned(),
            dex_addresses: vec![
                "0x00000000000000000000000000000000000000b1".to_owned(),
            ],
            bridge_addresses: vec![
                "0x00000000000000000000000000000000000000c1".to_owned(),
            ],
        }
    }
}
