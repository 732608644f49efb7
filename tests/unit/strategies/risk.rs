//! Unit tests for the shared strategy math

use async_trait::async_trait;
use chrono::Utc;
use signatrix::models::signal::TradeAction;
use signatrix::models::snapshot::{MarketMeta, MarketSnapshot, VwapBands};
use signatrix::services::{AccountProvider, ServiceError, StaticAccountProvider};
use signatrix::strategies::risk;

struct FailingAccount;

#[async_trait]
impl AccountProvider for FailingAccount {
    async fn get_leverage(&self) -> Result<f64, ServiceError> {
        Err(ServiceError::Unavailable("account api down".into()))
    }

    async fn get_markets(&self) -> Result<Vec<MarketMeta>, ServiceError> {
        Err(ServiceError::Unavailable("account api down".into()))
    }
}

fn snapshot_with_bands(bands: Option<VwapBands>) -> MarketSnapshot {
    let mut snapshot = MarketSnapshot::empty(MarketMeta::new("SOL", 2, 3), 100.0, Utc::now());
    snapshot.vwap = bands;
    snapshot
}

#[test]
fn test_validate_data_requires_bands() {
    let with_bands = snapshot_with_bands(Some(VwapBands {
        value: 99.0,
        std_dev: 1.0,
        upper: vec![100.0, 101.0, 102.0],
        lower: vec![98.0, 97.0, 96.0],
    }));
    assert!(risk::validate_data(&with_bands).is_valid);

    let empty_bands = snapshot_with_bands(Some(VwapBands {
        value: 99.0,
        std_dev: 1.0,
        upper: Vec::new(),
        lower: Vec::new(),
    }));
    assert!(!risk::validate_data(&empty_bands).is_valid);

    let missing = snapshot_with_bands(None);
    assert!(!risk::validate_data(&missing).is_valid);
}

#[test]
fn test_pnl_and_risk_long() {
    let (pnl, risk_amount) = risk::calculate_pnl_and_risk(
        TradeAction::Long,
        100.0,
        95.0,
        105.0,
        1_000.0,
        0.001,
    )
    .unwrap();

    // 10 units: gross 50 both ways; fees 1.0 entry, 1.05 at target, 0.95 at stop
    assert!((pnl - 47.95).abs() < 1e-9);
    assert!((risk_amount - 51.95).abs() < 1e-9);
}

#[test]
fn test_pnl_and_risk_short_mirrors() {
    let (pnl, risk_amount) = risk::calculate_pnl_and_risk(
        TradeAction::Short,
        100.0,
        105.0,
        95.0,
        1_000.0,
        0.001,
    )
    .unwrap();

    assert!((pnl - (50.0 - 1.0 - 0.95)).abs() < 1e-9);
    assert!((risk_amount - (50.0 + 1.0 + 1.05)).abs() < 1e-9);
}

#[test]
fn test_pnl_guards_zero_entry() {
    assert!(
        risk::calculate_pnl_and_risk(TradeAction::Long, 0.0, 95.0, 105.0, 1_000.0, 0.001)
            .is_none()
    );
}

#[test]
fn test_take_profit_minimum() {
    let too_small = risk::validate_take_profit(100.0, 95.0, 100.3, 0.005);
    assert!(!too_small.is_valid);

    let acceptable = risk::validate_take_profit(100.0, 95.0, 105.0, 0.005);
    assert!(acceptable.is_valid);
    let details = acceptable.details.unwrap();
    assert!((details["risk_reward"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_stop_target_boundary_percents() {
    let account = StaticAccountProvider::new(3.0);
    tokio_test::block_on(async {
        assert!(
            risk::calculate_stop_and_target(&account, 100.0, true, None, Some(0.05))
                .await
                .is_none()
        );
        assert!(
            risk::calculate_stop_and_target(&account, 100.0, true, Some(0.0), Some(0.05))
                .await
                .is_none()
        );
        assert!(
            risk::calculate_stop_and_target(&account, 100.0, true, Some(0.05), None)
                .await
                .is_none()
        );
        assert!(
            risk::calculate_stop_and_target(&account, 100.0, true, Some(0.05), Some(0.0))
                .await
                .is_none()
        );
    });
}

#[tokio::test]
async fn test_stop_scales_with_leverage() {
    let account = StaticAccountProvider::new(5.0);
    let (stop, target) =
        risk::calculate_stop_and_target(&account, 100.0, true, Some(0.05), Some(0.05))
            .await
            .unwrap();

    // 5% raw stop over 5x leverage leaves a 1% effective stop
    assert!((stop - 99.0).abs() < 1e-9);
    assert!((target - 105.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_leverage_lookup_fails_open() {
    let (stop, target) =
        risk::calculate_stop_and_target(&FailingAccount, 100.0, true, Some(0.05), Some(0.05))
            .await
            .unwrap();

    assert!((stop - 95.0).abs() < 1e-9);
    assert!((target - 105.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_short_direction_straddle() {
    let account = StaticAccountProvider::new(1.0);
    let (stop, target) =
        risk::calculate_stop_and_target(&account, 100.0, false, Some(0.02), Some(0.04))
            .await
            .unwrap();

    assert!(stop > 100.0);
    assert!(target < 100.0);
}

#[test]
fn test_nearest_band_selection() {
    let lower = [95.0, 90.0, 85.0];
    let upper = [105.0, 110.0, 115.0];
    assert_eq!(risk::nearest_band_below(&lower, 100.0), Some(95.0));
    assert_eq!(risk::nearest_band_above(&upper, 100.0), Some(105.0));
    assert_eq!(risk::nearest_band_below(&lower, 80.0), None);
    assert_eq!(risk::nearest_band_above(&upper, 120.0), None);
}
