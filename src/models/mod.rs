pub mod dataset;
pub mod disaster;
pub mod distributor;
pub mod error;
pub mod regression;
pub mod sector;
pub mod tax;

pub use dataset::{
    DISASTER_RECORDS, DisasterRecord, HISTORICAL_BUDGETS, HistoricalBudgetRow, TAX_RECORDS,
    TaxRecord, historical_budget,
};
pub use disaster::{
    DISASTER_BASE_PROPORTIONS, DisasterFundEstimator, DisasterFundRatios, SectorReallocation,
    severity_weight,
};
pub use distributor::{
    BudgetDistributor, DistributionReport, MIN_SECTOR_PROPORTION, SectorProportionProfile,
};
pub use error::{ModelError, ModelErrorKind};
pub use sector::{SECTOR_COUNT, Sector, SectorAmounts, sector_total};
pub use tax::{
    EconomicCondition, ImpactTier, RevenueProjection, TaxAction, TaxAdjustmentRule,
    TaxModelRatios, TaxPolicyAdvisor, TaxRecommendation, TaxType,
};

/// The three trained components served by the API. Built once before the
/// server starts and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetModels {
    pub disaster: DisasterFundEstimator,
    pub tax: TaxPolicyAdvisor,
    pub distributor: BudgetDistributor,
}

impl BudgetModels {
    pub fn train(
        disaster_records: &[DisasterRecord],
        tax_records: &[TaxRecord],
        budget_rows: &[HistoricalBudgetRow],
    ) -> Result<Self, ModelError> {
        let mut disaster = DisasterFundEstimator::new();
        disaster.train(disaster_records)?;

        let mut tax = TaxPolicyAdvisor::new();
        tax.train(tax_records)?;

        let mut distributor = BudgetDistributor::new();
        distributor.train(budget_rows)?;

        Ok(Self {
            disaster,
            tax,
            distributor,
        })
    }

    /// Trains every component on the embedded sample data.
    pub fn bootstrap() -> Result<Self, ModelError> {
        Self::train(&DISASTER_RECORDS, &TAX_RECORDS, &HISTORICAL_BUDGETS)
    }
}
