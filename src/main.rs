use std::sync::Arc;

use anyhow::{Context, Result};

use budget_allocation::{
    cli::config_path_from_args,
    config::Config,
    logging::init_tracing,
    models::{BudgetModels, DistributionReport},
    server,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path_from_args()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let _logging_guard = init_tracing(&config).context("failed to initialize logging")?;

    let models = BudgetModels::bootstrap().context("failed to train budget models")?;
    let reference_year = models.distributor.last_training_year()?;
    let reference_total = 225_000.0;
    let reference = models
        .distributor
        .distribute_budget(reference_total, reference_year)?;
    let report = DistributionReport {
        year: reference_year,
        total_budget: reference_total,
        distribution: &reference,
    };
    tracing::info!(target: "models", report = %report, "reference_distribution");

    server::run(config.server, Arc::new(models)).await
}
