use crate::helpers::*;
use pondo_core::{
    config::{OracleConfig, ProtocolConfig},
    constants::*,
    oracle::{signature::Ed25519Scheme, TimeOracle},
    vesting::{schedule::VestingPolicy, store::ClaimStore},
};
use pretty_assertions::assert_eq;

#[test]
fn load_config_file() -> anyhow::Result<()> {
    let config_dir = setup_new_config_dir("pondo-config")?;
    let path = config_dir.path().join("config.json");
    let k = keyholders(4);
    let committee = addresses(&k[..3]);
    let admin = k[3].address();

    let config = ProtocolConfig {
        oracle: OracleConfig {
            committee,
            genesis_timestamp: 1_000,
            ..Default::default()
        },
        vesting: VestingPolicy {
            min_cancel_height: 50,
            ..Default::default()
        },
        claim_admins: vec![admin.clone()],
        ..Default::default()
    };
    std::fs::write(&path, serde_json::to_vec_pretty(&config)?)?;

    let loaded = ProtocolConfig::from_path(&path)?;
    assert_eq!(loaded, config);

    let committee = loaded.oracle.committee()?;
    assert_eq!(committee.len(), 3);
    assert_eq!(committee.quorum(), ORACLE_QUORUM);

    let mut oracle = TimeOracle::new(committee, Ed25519Scheme);
    oracle.initialize(loaded.oracle.genesis_timestamp)?;
    assert_eq!(oracle.committed_clock(), Some(1_000));

    let store = ClaimStore::new(loaded.vesting, loaded.claim_admins);
    assert!(store.is_admin(&admin));
    assert_eq!(store.policy().min_cancel_height, 50);
    Ok(())
}

#[test]
fn invalid_config_files() -> anyhow::Result<()> {
    let config_dir = setup_new_config_dir("pondo-config")?;
    let path = config_dir.path().join("config.json");

    assert!(ProtocolConfig::from_path(&path).is_err());

    std::fs::write(&path, r#"{ "claim_admins": ["not-an-address"] }"#)?;
    assert!(ProtocolConfig::from_path(&path).is_err());

    // an empty committee only fails once it is used
    std::fs::write(&path, "{}")?;
    let config = ProtocolConfig::from_path(&path)?;
    assert_eq!(config, ProtocolConfig::default());
    assert!(config.oracle.committee().is_err());
    Ok(())
}
