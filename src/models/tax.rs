use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{
    dataset::TaxRecord,
    error::{ModelError, invalid_input, untrained},
    regression::mean,
};

const MODEL_NAME: &str = "tax policy advisor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxType {
    IncomeTax,
    CorporateTax,
    Gst,
    PropertyTax,
    CustomsDuty,
    ExciseDuty,
}

impl TaxType {
    pub const ALL: [TaxType; 6] = [
        TaxType::IncomeTax,
        TaxType::CorporateTax,
        TaxType::Gst,
        TaxType::PropertyTax,
        TaxType::CustomsDuty,
        TaxType::ExciseDuty,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TaxType::IncomeTax => "Income Tax",
            TaxType::CorporateTax => "Corporate Tax",
            TaxType::Gst => "GST",
            TaxType::PropertyTax => "Property Tax",
            TaxType::CustomsDuty => "Customs Duty",
            TaxType::ExciseDuty => "Excise Duty",
        }
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicCondition {
    Recession,
    Stable,
    Growth,
}

impl EconomicCondition {
    /// Labels match exactly as the front-end sends them (`"recession"`,
    /// `"stable"`, `"growth"`). Anything else, including other casings,
    /// falls back to `Stable`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "recession" => EconomicCondition::Recession,
            "growth" => EconomicCondition::Growth,
            _ => EconomicCondition::Stable,
        }
    }

    pub fn rules(self) -> &'static [TaxAdjustmentRule; 6] {
        match self {
            EconomicCondition::Recession => &RECESSION_RULES,
            EconomicCondition::Stable => &STABLE_RULES,
            EconomicCondition::Growth => &GROWTH_RULES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxAction {
    Increase,
    Decrease,
    Maintain,
}

impl TaxAction {
    pub fn label(self) -> &'static str {
        match self {
            TaxAction::Increase => "Increase",
            TaxAction::Decrease => "Decrease",
            TaxAction::Maintain => "Maintain",
        }
    }

    pub fn implementation(self) -> &'static str {
        match self {
            TaxAction::Increase => "Next Quarter",
            TaxAction::Decrease => "Immediate",
            TaxAction::Maintain => "No Change Required",
        }
    }

    fn sign(self) -> f64 {
        match self {
            TaxAction::Increase => 1.0,
            TaxAction::Decrease => -1.0,
            TaxAction::Maintain => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactTier {
    Low,
    Medium,
    High,
}

impl ImpactTier {
    pub fn weight(self) -> f64 {
        match self {
            ImpactTier::Low => 0.3,
            ImpactTier::Medium => 0.6,
            ImpactTier::High => 0.9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImpactTier::Low => "Low",
            ImpactTier::Medium => "Medium",
            ImpactTier::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxAdjustmentRule {
    pub tax_type: TaxType,
    pub action: TaxAction,
    pub amount_points: u32,
    pub impact: ImpactTier,
}

const fn rule(
    tax_type: TaxType,
    action: TaxAction,
    amount_points: u32,
    impact: ImpactTier,
) -> TaxAdjustmentRule {
    TaxAdjustmentRule {
        tax_type,
        action,
        amount_points,
        impact,
    }
}

use ImpactTier::{High, Low, Medium};
use TaxAction::{Decrease, Increase, Maintain};

const RECESSION_RULES: [TaxAdjustmentRule; 6] = [
    rule(TaxType::IncomeTax, Decrease, 2, Medium),
    rule(TaxType::CorporateTax, Decrease, 3, High),
    rule(TaxType::Gst, Decrease, 1, Medium),
    rule(TaxType::PropertyTax, Maintain, 0, Low),
    rule(TaxType::CustomsDuty, Decrease, 2, Medium),
    rule(TaxType::ExciseDuty, Increase, 1, High),
];

const STABLE_RULES: [TaxAdjustmentRule; 6] = [
    rule(TaxType::IncomeTax, Maintain, 0, Low),
    rule(TaxType::CorporateTax, Maintain, 0, Medium),
    rule(TaxType::Gst, Maintain, 0, Medium),
    rule(TaxType::PropertyTax, Increase, 1, Medium),
    rule(TaxType::CustomsDuty, Maintain, 0, Low),
    rule(TaxType::ExciseDuty, Increase, 1, Medium),
];

const GROWTH_RULES: [TaxAdjustmentRule; 6] = [
    rule(TaxType::IncomeTax, Increase, 1, High),
    rule(TaxType::CorporateTax, Increase, 2, High),
    rule(TaxType::Gst, Increase, 1, High),
    rule(TaxType::PropertyTax, Increase, 2, Medium),
    rule(TaxType::CustomsDuty, Decrease, 1, Medium),
    rule(TaxType::ExciseDuty, Increase, 2, High),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxModelRatios {
    pub avg_revenue_impact: f64,
    pub avg_collection_efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRecommendation {
    pub rule: TaxAdjustmentRule,
    pub revenue_impact: f64,
}

impl TaxRecommendation {
    pub fn implementation(&self) -> &'static str {
        self.rule.action.implementation()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueProjection {
    /// In the order the adjustments were supplied.
    pub by_tax: Vec<(TaxType, f64)>,
    /// Sum of the unrounded per-tax projections.
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxPolicyAdvisor {
    ratios: Option<TaxModelRatios>,
}

impl TaxPolicyAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn train(&mut self, records: &[TaxRecord]) -> Result<(), ModelError> {
        if records.is_empty() {
            return Err(invalid_input("tax policy advisor requires at least one record"));
        }

        let rates: Vec<f64> = records.iter().map(|r| r.rate_percent).collect();
        let revenue: Vec<f64> = records.iter().map(|r| r.revenue_generated).collect();
        let efficiency: Vec<f64> = records
            .iter()
            .map(|r| r.collection_efficiency_percent)
            .collect();

        let mean_rate = mean(&rates);
        if mean_rate == 0.0 {
            return Err(invalid_input("tax records must have a non-zero mean rate"));
        }

        let ratios = TaxModelRatios {
            avg_revenue_impact: mean(&revenue) / mean_rate,
            avg_collection_efficiency: mean(&efficiency) / 100.0,
        };
        self.ratios = Some(ratios);

        tracing::info!(
            target: "models",
            records = records.len(),
            avg_revenue_impact = ratios.avg_revenue_impact,
            avg_collection_efficiency = ratios.avg_collection_efficiency,
            "tax_policy_advisor_trained"
        );
        Ok(())
    }

    pub fn ratios(&self) -> Result<TaxModelRatios, ModelError> {
        self.ratios.ok_or_else(|| untrained(MODEL_NAME))
    }

    /// Recommendations for `condition`, highest impact tier first; equal
    /// tiers keep table order.
    ///
    /// `revenue_target` is accepted for interface compatibility and does not
    /// influence the recommendations or their revenue impact.
    pub fn recommend(
        &self,
        condition: EconomicCondition,
        revenue_target: f64,
    ) -> Result<Vec<TaxRecommendation>, ModelError> {
        let ratios = self.ratios()?;
        let _ = revenue_target;

        let mut recommendations: Vec<TaxRecommendation> = condition
            .rules()
            .iter()
            .map(|rule| TaxRecommendation {
                rule: *rule,
                revenue_impact: rule.action.sign()
                    * f64::from(rule.amount_points)
                    * rule.impact.weight()
                    * ratios.avg_revenue_impact,
            })
            .collect();
        recommendations.sort_by(|a, b| b.rule.impact.weight().total_cmp(&a.rule.impact.weight()));

        Ok(recommendations)
    }

    /// `adjustments` are percentage points per tax type.
    pub fn project_revenue(
        &self,
        adjustments: &[(TaxType, f64)],
        base_revenue: f64,
    ) -> Result<RevenueProjection, ModelError> {
        let ratios = self.ratios()?;

        let by_tax: Vec<(TaxType, f64)> = adjustments
            .iter()
            .map(|(tax_type, points)| {
                let impact = points * ratios.avg_revenue_impact * ratios.avg_collection_efficiency;
                (*tax_type, base_revenue * (1.0 + impact / 100.0))
            })
            .collect();
        let total = by_tax.iter().map(|(_, projected)| projected).sum();

        Ok(RevenueProjection { by_tax, total })
    }
}
