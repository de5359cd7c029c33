//! Wire types for the JSON API and the presentation helpers that turn model
//! output into them.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{api::error::ApiError, models::SectorAmounts};

/// A numeric request field. Front-ends post form values either as JSON
/// numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumberField {
    pub fn to_f64(&self, field: &str) -> Result<f64, ApiError> {
        let value = match self {
            NumberField::Integer(value) => *value as f64,
            NumberField::Float(value) => *value,
            NumberField::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid_number(field, text))?,
        };
        if !value.is_finite() {
            return Err(ApiError::Validation(format!("{field} must be a finite number")));
        }
        Ok(value)
    }

    /// Floats truncate toward zero; text must be an integer literal.
    pub fn to_i64(&self, field: &str) -> Result<i64, ApiError> {
        match self {
            NumberField::Integer(value) => Ok(*value),
            NumberField::Float(value) => {
                let truncated = value.trunc();
                if !truncated.is_finite() || truncated.abs() > i64::MAX as f64 {
                    return Err(ApiError::Validation(format!("{field} is out of range")));
                }
                Ok(truncated as i64)
            }
            NumberField::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid_number(field, text)),
        }
    }
}

fn invalid_number(field: &str, text: &str) -> ApiError {
    ApiError::Validation(format!("{field} must be numeric, got '{text}'"))
}

pub fn float_or(value: Option<&NumberField>, field: &str, default: f64) -> Result<f64, ApiError> {
    value.map_or(Ok(default), |value| value.to_f64(field))
}

pub fn int_or(value: Option<&NumberField>, field: &str, default: i64) -> Result<i64, ApiError> {
    value.map_or(Ok(default), |value| value.to_i64(field))
}

pub fn year_or(value: Option<&NumberField>, default: i32) -> Result<i32, ApiError> {
    let year = int_or(value, "year", i64::from(default))?;
    i32::try_from(year).map_err(|_| ApiError::Validation(format!("year {year} is out of range")))
}

/// An empty body means "use every default".
pub fn parse_body<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::Validation(format!("invalid JSON body: {err}")))?;
    if !value.is_object() {
        return Err(ApiError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value)
        .map_err(|err| ApiError::Validation(format!("invalid request body: {err}")))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterFundRequest {
    pub severity: Option<NumberField>,
    pub estimated_damage: Option<NumberField>,
    pub total_budget: Option<NumberField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxOptimizationRequest {
    pub economic_condition: Option<String>,
    pub revenue_target: Option<NumberField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetForecastRequest {
    pub year: Option<NumberField>,
    pub total_budget: Option<NumberField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRequest {
    pub year: Option<NumberField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBudgetRequest {
    pub total_budget: Option<NumberField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorShare {
    pub sector: String,
    pub amount: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAdjustment {
    pub sector: String,
    pub original_budget: i64,
    pub adjusted_budget: i64,
    pub difference: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterFundResponse {
    pub required_fund: i64,
    pub sector_adjustments: Vec<SectorAdjustment>,
}

// Field names stay snake_case; the front-end reads them as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxRecommendationView {
    pub tax_type: String,
    pub action: String,
    pub amount: String,
    pub impact: String,
    pub revenue_impact: i64,
    pub implementation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxOptimizationResponse {
    pub recommendations: Vec<TaxRecommendationView>,
    pub total_projected_revenue: i64,
    pub economic_condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetForecastResponse {
    pub year: i32,
    pub total_budget: i64,
    pub sectors: Vec<SectorShare>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalBudgetResponse {
    pub year: i32,
    pub total_budget: i64,
    pub sectors: Vec<SectorShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDistributionResponse {
    pub total_budget: i64,
    pub sectors: Vec<SectorShare>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Currency is reported in whole units, ties to even. Amounts beyond the
/// `i64` range are rejected instead of saturating.
pub fn round_currency(value: f64) -> Result<i64, ApiError> {
    let rounded = value.round_ties_even();
    // `i64::MAX as f64` is 2^63, one past the largest representable value.
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(ApiError::Validation(format!(
            "amount {value} is too large to report"
        )));
    }
    Ok(rounded as i64)
}

pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Shares sorted by rounded amount, largest first. Equal amounts keep
/// sector order.
pub fn sector_shares(amounts: &SectorAmounts, total: f64) -> Result<Vec<SectorShare>, ApiError> {
    let mut shares = amounts
        .iter()
        .map(|(sector, amount)| {
            Ok(SectorShare {
                sector: sector.to_string(),
                amount: round_currency(*amount)?,
                percentage: round_percentage(amount / total * 100.0),
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(shares)
}

pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
