use std::{collections::BTreeMap, fmt};

use crate::models::{
    dataset::HistoricalBudgetRow,
    error::{ModelError, internal_error, invalid_input, untrained},
    regression::{BoostingParams, GradientBoostedTrees, LinearFit, mean},
    sector::{Sector, SectorAmounts, sector_total},
};

const MODEL_NAME: &str = "budget distributor";

/// Share of the budget no sector may fall below before normalisation.
pub const MIN_SECTOR_PROPORTION: f64 = 0.01;
const LINEAR_BLEND_WEIGHT: f64 = 0.3;
const BOOSTED_BLEND_WEIGHT: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorProportionProfile {
    pub mean_proportion: f64,
    /// Change in proportion per training row.
    pub trend: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct SectorRegressors {
    linear: LinearFit,
    boosted: GradientBoostedTrees,
}

impl SectorRegressors {
    fn predict(&self, year: f64) -> f64 {
        LINEAR_BLEND_WEIGHT * self.linear.predict(year)
            + BOOSTED_BLEND_WEIGHT * self.boosted.predict(year)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TrainedDistribution {
    profiles: BTreeMap<Sector, SectorProportionProfile>,
    regressors: BTreeMap<Sector, SectorRegressors>,
    last_training_year: i32,
}

/// Splits a total budget across sectors by extrapolating each sector's
/// historical share of the budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetDistributor {
    trained: Option<TrainedDistribution>,
}

impl BudgetDistributor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows must be in strictly ascending year order; the final row's year
    /// anchors extrapolation.
    pub fn train(&mut self, rows: &[HistoricalBudgetRow]) -> Result<(), ModelError> {
        let Some(last_row) = rows.last() else {
            return Err(invalid_input(
                "budget distributor requires at least one historical row",
            ));
        };
        if rows.windows(2).any(|pair| pair[0].year >= pair[1].year) {
            return Err(invalid_input(
                "historical budget rows must be in strictly ascending year order",
            ));
        }

        let totals: Vec<f64> = rows.iter().map(HistoricalBudgetRow::total).collect();
        if let Some((row, _)) = rows.iter().zip(&totals).find(|(_, total)| **total <= 0.0) {
            return Err(invalid_input(format!(
                "historical budget for {} has a non-positive total",
                row.year
            )));
        }
        let mean_total = mean(&totals);
        let row_indices: Vec<f64> = (0..rows.len()).map(|index| index as f64).collect();
        let years: Vec<f64> = rows.iter().map(|row| f64::from(row.year)).collect();

        let mut profiles = BTreeMap::new();
        let mut regressors = BTreeMap::new();
        for sector in Sector::ALL {
            let amounts: Vec<f64> = rows.iter().map(|row| row.amount(sector)).collect();
            let proportions: Vec<f64> = amounts
                .iter()
                .zip(&totals)
                .map(|(amount, total)| amount / total)
                .collect();

            profiles.insert(
                sector,
                SectorProportionProfile {
                    mean_proportion: mean(&amounts) / mean_total,
                    trend: LinearFit::fit(&row_indices, &proportions)?.slope,
                },
            );
            regressors.insert(
                sector,
                SectorRegressors {
                    linear: LinearFit::fit(&years, &amounts)?,
                    boosted: GradientBoostedTrees::fit(
                        &years,
                        &amounts,
                        BoostingParams::default(),
                    )?,
                },
            );
        }

        self.trained = Some(TrainedDistribution {
            profiles,
            regressors,
            last_training_year: last_row.year,
        });
        tracing::info!(
            target: "models",
            rows = rows.len(),
            last_training_year = last_row.year,
            "budget_distributor_trained"
        );
        Ok(())
    }

    pub fn is_trained(&self) -> bool {
        self.trained.is_some()
    }

    pub fn last_training_year(&self) -> Result<i32, ModelError> {
        Ok(self.state()?.last_training_year)
    }

    pub fn profile(&self, sector: Sector) -> Result<SectorProportionProfile, ModelError> {
        self.state()?
            .profiles
            .get(&sector)
            .copied()
            .ok_or_else(|| internal_error(format!("no proportion profile for {sector}")))
    }

    /// Trend-adjusted share per sector for `year`, floored at
    /// `MIN_SECTOR_PROPORTION` and not yet normalised.
    pub fn adjusted_proportions(&self, year: i32) -> Result<SectorAmounts, ModelError> {
        let state = self.state()?;
        let years_from_base = f64::from(year) - f64::from(state.last_training_year);

        Ok(state
            .profiles
            .iter()
            .map(|(sector, profile)| {
                let adjusted = profile.mean_proportion + profile.trend * years_from_base;
                (*sector, adjusted.max(MIN_SECTOR_PROPORTION))
            })
            .collect())
    }

    /// A negative total is split like a positive one, giving negative
    /// amounts. Callers that need a positive budget check it themselves.
    pub fn distribute_budget(
        &self,
        total_budget: f64,
        year: i32,
    ) -> Result<SectorAmounts, ModelError> {
        if !total_budget.is_finite() || total_budget == 0.0 {
            return Err(invalid_input("total budget must be a non-zero finite amount"));
        }

        let proportions = self.adjusted_proportions(year)?;
        let proportion_sum = sector_total(&proportions);

        Ok(proportions
            .into_iter()
            .map(|(sector, proportion)| (sector, total_budget * proportion / proportion_sum))
            .collect())
    }

    /// Blended regression estimate of each sector's absolute amount in
    /// `year`. Independent of `distribute_budget`.
    pub fn predict_year(&self, year: i32) -> Result<SectorAmounts, ModelError> {
        let state = self.state()?;
        Ok(state
            .regressors
            .iter()
            .map(|(sector, regressors)| (*sector, regressors.predict(f64::from(year))))
            .collect())
    }

    fn state(&self) -> Result<&TrainedDistribution, ModelError> {
        self.trained.as_ref().ok_or_else(|| untrained(MODEL_NAME))
    }
}

/// Console rendering of a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionReport<'a> {
    pub year: i32,
    pub total_budget: f64,
    pub distribution: &'a SectorAmounts,
}

impl fmt::Display for DistributionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Budget Distribution for {} (Total: ₹{:.2}):",
            self.year, self.total_budget
        )?;
        writeln!(f, "{}", "-".repeat(50))?;
        for (sector, amount) in self.distribution {
            writeln!(
                f,
                "{sector}: ₹{amount:.2} ({:.1}%)",
                amount / self.total_budget * 100.0
            )?;
        }
        write!(f, "{}", "-".repeat(50))
    }
}
