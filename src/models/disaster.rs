use crate::models::{
    dataset::DisasterRecord,
    error::{ModelError, invalid_input, untrained},
    regression::mean,
    sector::{Sector, SectorAmounts},
};

const MODEL_NAME: &str = "disaster fund estimator";

/// Indexed by severity - 1.
const SEVERITY_WEIGHTS: [f64; 10] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
const UNLISTED_SEVERITY_WEIGHT: f64 = 0.5;

/// Fixed sector split used for disaster reallocation. Not derived from the
/// historical budget rows.
pub const DISASTER_BASE_PROPORTIONS: [(Sector, f64); 6] = [
    (Sector::Healthcare, 0.15),
    (Sector::Education, 0.20),
    (Sector::Defence, 0.25),
    (Sector::Infrastructure, 0.20),
    (Sector::Agriculture, 0.10),
    (Sector::Environment, 0.10),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisasterFundRatios {
    pub avg_damage_ratio: f64,
    /// Kept for reporting; the fund estimate does not use it.
    pub severity_allocation_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorReallocation {
    pub original: SectorAmounts,
    pub adjusted: SectorAmounts,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisasterFundEstimator {
    ratios: Option<DisasterFundRatios>,
}

/// Severities outside 1..=10 fall back to 0.5 instead of being rejected.
pub fn severity_weight(severity: i64) -> f64 {
    usize::try_from(severity)
        .ok()
        .and_then(|severity| severity.checked_sub(1))
        .and_then(|index| SEVERITY_WEIGHTS.get(index))
        .copied()
        .unwrap_or(UNLISTED_SEVERITY_WEIGHT)
}

impl DisasterFundEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn train(&mut self, records: &[DisasterRecord]) -> Result<(), ModelError> {
        if records.is_empty() {
            return Err(invalid_input(
                "disaster fund estimator requires at least one record",
            ));
        }

        let allocated: Vec<f64> = records.iter().map(|r| r.budget_allocated).collect();
        let damage: Vec<f64> = records.iter().map(|r| r.estimated_damage).collect();
        let severity: Vec<f64> = records.iter().map(|r| r.severity as f64).collect();

        let mean_damage = mean(&damage);
        let mean_severity = mean(&severity);
        if mean_damage == 0.0 || mean_severity == 0.0 {
            return Err(invalid_input(
                "disaster records must have non-zero mean damage and severity",
            ));
        }

        let ratios = DisasterFundRatios {
            avg_damage_ratio: mean(&allocated) / mean_damage,
            severity_allocation_ratio: mean(&allocated) / mean_severity,
        };
        self.ratios = Some(ratios);

        tracing::info!(
            target: "models",
            records = records.len(),
            avg_damage_ratio = ratios.avg_damage_ratio,
            "disaster_fund_estimator_trained"
        );
        Ok(())
    }

    pub fn ratios(&self) -> Result<DisasterFundRatios, ModelError> {
        self.ratios.ok_or_else(|| untrained(MODEL_NAME))
    }

    pub fn estimate_fund(&self, severity: i64, estimated_damage: f64) -> Result<f64, ModelError> {
        let ratios = self.ratios()?;
        Ok(estimated_damage * ratios.avg_damage_ratio * severity_weight(severity))
    }

    /// Every sector gives up the same fraction of its base budget. A fund
    /// larger than the total leaves negative adjusted budgets in place, and a
    /// negative total is scaled through as-is.
    pub fn reallocate(
        &self,
        total_budget: f64,
        required_fund: f64,
    ) -> Result<SectorReallocation, ModelError> {
        self.ratios()?;
        if !total_budget.is_finite() || total_budget == 0.0 {
            return Err(invalid_input("total budget must be a non-zero finite amount"));
        }

        let retained_fraction = 1.0 - required_fund / total_budget;
        let original: SectorAmounts = DISASTER_BASE_PROPORTIONS
            .iter()
            .map(|(sector, proportion)| (*sector, total_budget * proportion))
            .collect();
        let adjusted = original
            .iter()
            .map(|(sector, amount)| (*sector, amount * retained_fraction))
            .collect();

        Ok(SectorReallocation { original, adjusted })
    }
}
