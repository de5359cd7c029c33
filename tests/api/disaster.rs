use axum::http::StatusCode;
use serde_json::json;

use crate::{as_f64, post_json, post_raw};

// 10_750 allocated over 14_000 damage across the bundled records.
const AVG_DAMAGE_RATIO: f64 = 10_750.0 / 14_000.0;

#[tokio::test]
async fn empty_body_uses_default_disaster_inputs() {
    let (status, body) = post_raw("/api/calculate-disaster-fund", "").await;
    assert_eq!(status, StatusCode::OK);

    // severity 5, damage 1000, total 225000
    let expected_fund = 1_000.0 * AVG_DAMAGE_RATIO * 0.5;
    assert_eq!(body["requiredFund"], json!(expected_fund.round() as i64));

    let adjustments = body["sectorAdjustments"]
        .as_array()
        .expect("adjustments should be a list");
    assert_eq!(adjustments.len(), 6);
    assert_eq!(adjustments[0]["sector"], "Healthcare");
    assert_eq!(adjustments[0]["originalBudget"], 33_750);

    let defence = adjustments
        .iter()
        .find(|entry| entry["sector"] == "Defence")
        .expect("defence adjustment present");
    assert_eq!(defence["originalBudget"], 56_250);
    assert_eq!(defence["adjustedBudget"], 56_154);
    assert_eq!(defence["difference"], -96);
}

#[tokio::test]
async fn numeric_strings_are_accepted_for_disaster_inputs() {
    let (status, body) = post_json(
        "/api/calculate-disaster-fund",
        json!({"severity": "9", "estimatedDamage": "2000", "totalBudget": 100000}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let expected_fund = 2_000.0 * AVG_DAMAGE_RATIO * 0.9;
    assert_eq!(as_f64(&body["requiredFund"]), expected_fund.round());
}

#[tokio::test]
async fn out_of_range_severity_uses_fallback_weight() {
    let (_, unlisted) = post_json(
        "/api/calculate-disaster-fund",
        json!({"severity": 42, "estimatedDamage": 1000}),
    )
    .await;
    let (_, mid) = post_json(
        "/api/calculate-disaster-fund",
        json!({"severity": 5, "estimatedDamage": 1000}),
    )
    .await;
    assert_eq!(unlisted["requiredFund"], mid["requiredFund"]);
}

#[tokio::test]
async fn zero_total_is_rejected() {
    let (status, body) = post_json(
        "/api/calculate-disaster-fund",
        json!({"totalBudget": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("non-zero"));
}

#[tokio::test]
async fn negative_total_is_reallocated_not_rejected() {
    let (status, body) = post_json(
        "/api/calculate-disaster-fund",
        json!({"totalBudget": -100000}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let defence = body["sectorAdjustments"]
        .as_array()
        .expect("adjustments should be a list")
        .iter()
        .find(|entry| entry["sector"] == "Defence")
        .expect("defence adjustment present")
        .clone();
    assert_eq!(defence["originalBudget"], -25_000);
    assert!(as_f64(&defence["adjustedBudget"]) < -25_000.0);
}

#[tokio::test]
async fn totals_beyond_reportable_range_are_rejected() {
    let (status, body) = post_json(
        "/api/calculate-disaster-fund",
        json!({"totalBudget": 1e30}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("too large"));
}

#[tokio::test]
async fn non_numeric_severity_is_rejected() {
    let (status, body) = post_json(
        "/api/calculate-disaster-fund",
        json!({"severity": "severe"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("severity"));
}
