use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::{as_f64, post_json, post_raw};

fn assert_sorted_by_amount(sectors: &[Value]) {
    let amounts: Vec<i64> = sectors
        .iter()
        .map(|entry| entry["amount"].as_i64().expect("amount is an integer"))
        .collect();
    assert!(
        amounts.windows(2).all(|pair| pair[0] >= pair[1]),
        "sectors should be sorted largest first: {amounts:?}",
    );
}

fn amount_sum(sectors: &[Value]) -> i64 {
    sectors
        .iter()
        .map(|entry| entry["amount"].as_i64().expect("amount is an integer"))
        .sum()
}

#[tokio::test]
async fn forecast_returns_sorted_sectors_for_requested_year() {
    let (status, body) = post_json(
        "/api/forecast-budget",
        json!({"year": 2026, "totalBudget": 300000}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2026);
    assert_eq!(body["totalBudget"], 300_000);
    assert_eq!(body["message"], "AI-powered budget forecast for 2026");

    let sectors = body["sectors"].as_array().expect("sectors should be a list");
    assert_eq!(sectors.len(), 6);
    assert_sorted_by_amount(sectors);
    assert!((amount_sum(sectors) - 300_000).abs() <= 6);

    let percentage: f64 = sectors.iter().map(|entry| as_f64(&entry["percentage"])).sum();
    assert!((percentage - 100.0).abs() < 0.1);
}

#[tokio::test]
async fn forecast_defaults_to_2024() {
    let (status, body) = post_raw("/api/forecast-budget", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2024);
    assert_eq!(body["totalBudget"], 225_000);
}

#[tokio::test]
async fn forecast_passes_negative_totals_through() {
    let (status, body) = post_json(
        "/api/forecast-budget",
        json!({"year": 2024, "totalBudget": -1000}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalBudget"], -1_000);

    let sectors = body["sectors"].as_array().expect("sectors should be a list");
    assert!(sectors.iter().all(|entry| as_f64(&entry["amount"]) < 0.0));
    assert_sorted_by_amount(sectors);
}

#[tokio::test]
async fn forecast_rejects_totals_too_large_to_report() {
    let (status, body) = post_json("/api/forecast-budget", json!({"totalBudget": 1e30})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("too large"));
}

#[tokio::test]
async fn historical_budget_reports_bundled_year() {
    let (status, body) = post_json("/api/historical-budget", json!({"year": 2023})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2023);
    assert_eq!(body["totalBudget"], 225_000);

    let sectors = body["sectors"].as_array().expect("sectors should be a list");
    assert_sorted_by_amount(sectors);
    assert_eq!(sectors[0]["sector"], "Healthcare");
    assert_eq!(sectors[0]["amount"], 50_000);
    assert_eq!(as_f64(&sectors[0]["percentage"]), 22.22);
    assert_eq!(sectors[5]["sector"], "Environment");
}

#[tokio::test]
async fn historical_budget_reports_published_total_and_shares_of_it() {
    let (status, body) = post_json("/api/historical-budget", json!({"year": 2020})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalBudget"], 195_000);

    let sectors = body["sectors"].as_array().expect("sectors should be a list");
    let healthcare = sectors
        .iter()
        .find(|entry| entry["sector"] == "Healthcare")
        .expect("healthcare present");
    assert_eq!(healthcare["amount"], 43_000);
    // 43_000 / 195_000
    assert_eq!(as_f64(&healthcare["percentage"]), 22.05);
}

#[tokio::test]
async fn historical_budget_for_missing_year_is_not_found() {
    let (status, body) = post_json("/api/historical-budget", json!({"year": 2025})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No data available for year 2025");
}

#[tokio::test]
async fn custom_budget_uses_default_total_and_formats_message() {
    let (status, body) = post_raw("/api/distribute-custom-budget", "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalBudget"], 225_000);
    assert_eq!(
        body["message"],
        "AI-optimized distribution of ₹225,000 Crores"
    );

    let sectors = body["sectors"].as_array().expect("sectors should be a list");
    assert_sorted_by_amount(sectors);
    assert!((amount_sum(sectors) - 225_000).abs() <= 6);
}

#[tokio::test]
async fn custom_budget_rejects_non_positive_totals() {
    for total in [json!(0), json!(-500), json!("0")] {
        let (status, body) =
            post_json("/api/distribute-custom-budget", json!({"totalBudget": total})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Budget amount must be greater than 0");
    }
}

#[tokio::test]
async fn regression_projection_covers_every_sector() {
    let (status, body) = post_json("/api/predict-budget", json!({"year": 2024})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2024);
    assert_eq!(body["message"], "Regression-based budget projection for 2024");

    let sectors = body["sectors"].as_array().expect("sectors should be a list");
    assert_eq!(sectors.len(), 6);
    assert_sorted_by_amount(sectors);
    let total = body["totalBudget"].as_i64().expect("total is an integer");
    assert!((amount_sum(sectors) - total).abs() <= 6);
    assert!(total > 200_000, "projection should grow past history: {total}");
}
