use axum::{Json, body::Bytes, extract::State};

use crate::{
    api::{
        AppState,
        error::ApiError,
        types::{
            BudgetForecastRequest, BudgetForecastResponse, CustomBudgetRequest,
            CustomDistributionResponse, DisasterFundRequest, DisasterFundResponse,
            HealthResponse, HistoricalBudgetResponse, SectorAdjustment, TaxOptimizationRequest,
            TaxOptimizationResponse, TaxRecommendationView, YearRequest, capitalize, float_or,
            format_thousands, int_or, parse_body, round_currency, sector_shares, year_or,
        },
    },
    models::{EconomicCondition, historical_budget, sector_total},
};

const DEFAULT_SEVERITY: i64 = 5;
const DEFAULT_ESTIMATED_DAMAGE: f64 = 1_000.0;
const DEFAULT_TOTAL_BUDGET: f64 = 225_000.0;
const DEFAULT_ECONOMIC_CONDITION: &str = "stable";
const DEFAULT_REVENUE_TARGET: f64 = 200_000.0;
const DEFAULT_FORECAST_YEAR: i32 = 2024;
const DEFAULT_HISTORICAL_YEAR: i32 = 2023;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Budget Allocation API is running",
    })
}

pub async fn calculate_disaster_fund(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DisasterFundResponse>, ApiError> {
    let request: DisasterFundRequest = parse_body(&body)?;
    let severity = int_or(request.severity.as_ref(), "severity", DEFAULT_SEVERITY)?;
    let estimated_damage = float_or(
        request.estimated_damage.as_ref(),
        "estimatedDamage",
        DEFAULT_ESTIMATED_DAMAGE,
    )?;
    let total_budget = float_or(
        request.total_budget.as_ref(),
        "totalBudget",
        DEFAULT_TOTAL_BUDGET,
    )?;

    let disaster = &state.models.disaster;
    let required_fund = disaster.estimate_fund(severity, estimated_damage)?;
    let reallocation = disaster.reallocate(total_budget, required_fund)?;

    let mut sector_adjustments = Vec::with_capacity(reallocation.original.len());
    for (sector, original) in &reallocation.original {
        let Some(adjusted) = reallocation.adjusted.get(sector) else {
            continue;
        };
        sector_adjustments.push(SectorAdjustment {
            sector: sector.to_string(),
            original_budget: round_currency(*original)?,
            adjusted_budget: round_currency(*adjusted)?,
            difference: round_currency(adjusted - original)?,
        });
    }

    tracing::debug!(
        target: "api",
        severity,
        estimated_damage,
        required_fund,
        "disaster_fund_calculated"
    );
    Ok(Json(DisasterFundResponse {
        required_fund: round_currency(required_fund)?,
        sector_adjustments,
    }))
}

pub async fn optimize_taxes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TaxOptimizationResponse>, ApiError> {
    let request: TaxOptimizationRequest = parse_body(&body)?;
    let label = request
        .economic_condition
        .unwrap_or_else(|| DEFAULT_ECONOMIC_CONDITION.to_string());
    let revenue_target = float_or(
        request.revenue_target.as_ref(),
        "revenueTarget",
        DEFAULT_REVENUE_TARGET,
    )?;

    let advisor = &state.models.tax;
    let recommendations = advisor.recommend(EconomicCondition::from_label(&label), revenue_target)?;

    // Recommended points are applied unsigned, as published by the advisor.
    let adjustments: Vec<_> = recommendations
        .iter()
        .map(|recommendation| {
            (
                recommendation.rule.tax_type,
                f64::from(recommendation.rule.amount_points),
            )
        })
        .collect();
    let projection = advisor.project_revenue(&adjustments, revenue_target)?;

    let recommendations = recommendations
        .iter()
        .map(|recommendation| {
            Ok(TaxRecommendationView {
                tax_type: recommendation.rule.tax_type.to_string(),
                action: recommendation.rule.action.label().to_string(),
                amount: format!("{}%", recommendation.rule.amount_points),
                impact: recommendation.rule.impact.label().to_string(),
                revenue_impact: round_currency(recommendation.revenue_impact)?,
                implementation: recommendation.implementation().to_string(),
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(TaxOptimizationResponse {
        recommendations,
        total_projected_revenue: round_currency(projection.total)?,
        economic_condition: capitalize(&label),
    }))
}

pub async fn forecast_budget(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BudgetForecastResponse>, ApiError> {
    let request: BudgetForecastRequest = parse_body(&body)?;
    let year = year_or(request.year.as_ref(), DEFAULT_FORECAST_YEAR)?;
    let total_budget = float_or(
        request.total_budget.as_ref(),
        "totalBudget",
        DEFAULT_TOTAL_BUDGET,
    )?;

    let distribution = state.models.distributor.distribute_budget(total_budget, year)?;

    Ok(Json(BudgetForecastResponse {
        year,
        total_budget: round_currency(total_budget)?,
        sectors: sector_shares(&distribution, total_budget)?,
        message: format!("AI-powered budget forecast for {year}"),
    }))
}

pub async fn historical_budget_for_year(
    body: Bytes,
) -> Result<Json<HistoricalBudgetResponse>, ApiError> {
    let request: YearRequest = parse_body(&body)?;
    let year = year_or(request.year.as_ref(), DEFAULT_HISTORICAL_YEAR)?;

    let row = historical_budget(year)?;
    // Shares are taken of the published headline, not of the sector sum.
    let total = row.published_total;

    Ok(Json(HistoricalBudgetResponse {
        year,
        total_budget: round_currency(total)?,
        sectors: sector_shares(&row.amounts(), total)?,
    }))
}

pub async fn distribute_custom_budget(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CustomDistributionResponse>, ApiError> {
    let request: CustomBudgetRequest = parse_body(&body)?;
    let total_budget = float_or(
        request.total_budget.as_ref(),
        "totalBudget",
        DEFAULT_TOTAL_BUDGET,
    )?;
    if total_budget <= 0.0 {
        return Err(ApiError::Validation(
            "Budget amount must be greater than 0".to_string(),
        ));
    }

    let distributor = &state.models.distributor;
    let reference_year = distributor.last_training_year()?;
    let distribution = distributor.distribute_budget(total_budget, reference_year)?;
    let rounded_total = round_currency(total_budget)?;

    Ok(Json(CustomDistributionResponse {
        total_budget: rounded_total,
        sectors: sector_shares(&distribution, total_budget)?,
        message: format!(
            "AI-optimized distribution of ₹{} Crores",
            format_thousands(rounded_total)
        ),
    }))
}

pub async fn predict_budget(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BudgetForecastResponse>, ApiError> {
    let request: YearRequest = parse_body(&body)?;
    let year = year_or(request.year.as_ref(), DEFAULT_FORECAST_YEAR)?;

    let predictions = state.models.distributor.predict_year(year)?;
    let total = sector_total(&predictions);
    if total <= 0.0 {
        return Err(ApiError::Validation(format!(
            "regression projection for {year} has no positive budget"
        )));
    }

    Ok(Json(BudgetForecastResponse {
        year,
        total_budget: round_currency(total)?,
        sectors: sector_shares(&predictions, total)?,
        message: format!("Regression-based budget projection for {year}"),
    }))
}
