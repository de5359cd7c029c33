mod tax;

use budget_allocation::models::BudgetModels;

pub fn trained_models() -> BudgetModels {
    BudgetModels::bootstrap().expect("bundled data should train every model")
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}",
    );
}
