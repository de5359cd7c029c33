//! Embedded sample data the models are trained on at startup. Amounts are in
//! crores.

use crate::models::{
    error::{ModelError, not_found},
    sector::{SECTOR_COUNT, Sector, SectorAmounts},
    tax::TaxType,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalBudgetRow {
    pub year: i32,
    /// Headline total as published for the year. It is not the sum of
    /// `allocations` for every year.
    pub published_total: f64,
    /// Indexed by `Sector::index`.
    pub allocations: [f64; SECTOR_COUNT],
}

impl HistoricalBudgetRow {
    pub fn amount(&self, sector: Sector) -> f64 {
        self.allocations[sector.index()]
    }

    /// Sum of the sector allocations. Training works on this, not on
    /// `published_total`.
    pub fn total(&self) -> f64 {
        self.allocations.iter().sum()
    }

    pub fn amounts(&self) -> SectorAmounts {
        Sector::ALL
            .iter()
            .map(|sector| (*sector, self.amount(*sector)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisasterRecord {
    pub severity: i64,
    pub estimated_damage: f64,
    pub budget_allocated: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRecord {
    pub tax_type: TaxType,
    pub rate_percent: f64,
    pub revenue_generated: f64,
    pub collection_efficiency_percent: f64,
}

pub const HISTORICAL_BUDGETS: [HistoricalBudgetRow; 5] = [
    HistoricalBudgetRow {
        year: 2019,
        published_total: 188_000.0,
        allocations: [40_000.0, 35_000.0, 30_000.0, 38_000.0, 25_000.0, 20_000.0],
    },
    HistoricalBudgetRow {
        year: 2020,
        published_total: 195_000.0,
        allocations: [43_000.0, 37_000.0, 32_000.0, 40_000.0, 26_500.0, 21_000.0],
    },
    HistoricalBudgetRow {
        year: 2021,
        published_total: 210_000.0,
        allocations: [47_000.0, 38_500.0, 33_500.0, 42_000.0, 28_000.0, 22_500.0],
    },
    HistoricalBudgetRow {
        year: 2022,
        published_total: 217_000.0,
        allocations: [48_500.0, 39_000.0, 34_000.0, 44_000.0, 29_000.0, 24_000.0],
    },
    HistoricalBudgetRow {
        year: 2023,
        published_total: 225_000.0,
        allocations: [50_000.0, 40_000.0, 35_000.0, 45_000.0, 30_000.0, 25_000.0],
    },
];

pub const DISASTER_RECORDS: [DisasterRecord; 8] = [
    disaster(3, 500.0, 200.0),
    disaster(5, 1_000.0, 600.0),
    disaster(7, 2_000.0, 1_500.0),
    disaster(9, 5_000.0, 4_500.0),
    disaster(4, 700.0, 350.0),
    disaster(6, 1_500.0, 1_000.0),
    disaster(8, 3_000.0, 2_500.0),
    disaster(2, 300.0, 100.0),
];

pub const TAX_RECORDS: [TaxRecord; 6] = [
    tax(TaxType::IncomeTax, 30.0, 50_000.0, 85.0),
    tax(TaxType::CorporateTax, 25.0, 30_000.0, 90.0),
    tax(TaxType::Gst, 18.0, 45_000.0, 92.0),
    tax(TaxType::PropertyTax, 10.0, 15_000.0, 75.0),
    tax(TaxType::CustomsDuty, 15.0, 20_000.0, 88.0),
    tax(TaxType::ExciseDuty, 12.0, 18_000.0, 80.0),
];

const fn disaster(severity: i64, estimated_damage: f64, budget_allocated: f64) -> DisasterRecord {
    DisasterRecord {
        severity,
        estimated_damage,
        budget_allocated,
    }
}

const fn tax(
    tax_type: TaxType,
    rate_percent: f64,
    revenue_generated: f64,
    collection_efficiency_percent: f64,
) -> TaxRecord {
    TaxRecord {
        tax_type,
        rate_percent,
        revenue_generated,
        collection_efficiency_percent,
    }
}

pub fn historical_budget(year: i32) -> Result<&'static HistoricalBudgetRow, ModelError> {
    HISTORICAL_BUDGETS
        .iter()
        .find(|row| row.year == year)
        .ok_or_else(|| not_found(format!("No data available for year {year}")))
}
