use budget_allocation::models::{
    EconomicCondition, ImpactTier, ModelErrorKind, TAX_RECORDS, TaxAction, TaxPolicyAdvisor,
    TaxType,
};

use crate::{assert_close, trained_models};

// 29_666.67 mean revenue over an 18.33 mean rate.
const AVG_REVENUE_IMPACT: f64 = 178_000.0 / 110.0;

#[test]
fn ratios_come_from_bundled_tax_records() {
    let models = trained_models();
    let ratios = models.tax.ratios().expect("advisor should be trained");
    assert_close(ratios.avg_revenue_impact, AVG_REVENUE_IMPACT, 1e-9);
    assert_close(ratios.avg_collection_efficiency, 0.85, 1e-12);
}

#[test]
fn recession_recommendations_are_ordered_by_impact_tier() {
    let models = trained_models();
    let recommendations = models
        .tax
        .recommend(EconomicCondition::Recession, 200_000.0)
        .expect("recommendations should compute");

    let order: Vec<(TaxType, ImpactTier)> = recommendations
        .iter()
        .map(|recommendation| (recommendation.rule.tax_type, recommendation.rule.impact))
        .collect();
    assert_eq!(
        order,
        vec![
            (TaxType::CorporateTax, ImpactTier::High),
            (TaxType::ExciseDuty, ImpactTier::High),
            (TaxType::IncomeTax, ImpactTier::Medium),
            (TaxType::Gst, ImpactTier::Medium),
            (TaxType::CustomsDuty, ImpactTier::Medium),
            (TaxType::PropertyTax, ImpactTier::Low),
        ]
    );
}

#[test]
fn revenue_impact_follows_action_direction() {
    let models = trained_models();
    let recommendations = models
        .tax
        .recommend(EconomicCondition::Recession, 200_000.0)
        .expect("recommendations should compute");

    let corporate = &recommendations[0];
    assert_eq!(corporate.rule.action, TaxAction::Decrease);
    assert_close(corporate.revenue_impact, -3.0 * 0.9 * AVG_REVENUE_IMPACT, 1e-6);
    assert_eq!(corporate.implementation(), "Immediate");

    let excise = &recommendations[1];
    assert_eq!(excise.rule.action, TaxAction::Increase);
    assert_close(excise.revenue_impact, 0.9 * AVG_REVENUE_IMPACT, 1e-6);
    assert_eq!(excise.implementation(), "Next Quarter");

    let property = &recommendations[5];
    assert_eq!(property.rule.action, TaxAction::Maintain);
    assert_eq!(property.revenue_impact, 0.0);
    assert_eq!(property.implementation(), "No Change Required");
}

#[test]
fn unknown_condition_falls_back_to_stable() {
    assert_eq!(
        EconomicCondition::from_label("boom"),
        EconomicCondition::Stable
    );
    assert_eq!(
        EconomicCondition::from_label("growth"),
        EconomicCondition::Growth
    );
    for label in ["Recession", "GROWTH", " recession "] {
        assert_eq!(
            EconomicCondition::from_label(label),
            EconomicCondition::Stable,
            "{label:?} should not match a known condition",
        );
    }

    let models = trained_models();
    let fallback = models
        .tax
        .recommend(EconomicCondition::from_label("sideways"), 200_000.0)
        .expect("fallback should compute");
    let stable = models
        .tax
        .recommend(EconomicCondition::Stable, 200_000.0)
        .expect("stable should compute");
    assert_eq!(fallback, stable);
    assert_eq!(stable.len(), 6);
}

#[test]
fn revenue_target_does_not_change_recommendations() {
    let models = trained_models();
    let low = models
        .tax
        .recommend(EconomicCondition::Growth, 1.0)
        .expect("recommendations should compute");
    let high = models
        .tax
        .recommend(EconomicCondition::Growth, 9_000_000.0)
        .expect("recommendations should compute");
    assert_eq!(low, high);
}

#[test]
fn projection_total_is_sum_of_per_tax_projections() {
    let models = trained_models();
    let projection = models
        .tax
        .project_revenue(
            &[(TaxType::IncomeTax, 2.0), (TaxType::Gst, 0.0), (TaxType::ExciseDuty, -1.0)],
            1_000.0,
        )
        .expect("projection should compute");

    assert_eq!(projection.by_tax.len(), 3);
    assert_eq!(projection.by_tax[0].0, TaxType::IncomeTax);
    assert_close(
        projection.by_tax[0].1,
        1_000.0 * (1.0 + 2.0 * AVG_REVENUE_IMPACT * 0.85 / 100.0),
        1e-6,
    );
    assert_close(projection.by_tax[1].1, 1_000.0, 1e-9);

    let sum: f64 = projection.by_tax.iter().map(|(_, projected)| projected).sum();
    assert_close(projection.total, sum, 1e-9);
}

#[test]
fn untrained_advisor_reports_untrained() {
    let advisor = TaxPolicyAdvisor::new();
    let err = advisor
        .recommend(EconomicCondition::Stable, 200_000.0)
        .expect_err("untrained advisor must fail");
    assert_eq!(err.kind, ModelErrorKind::Untrained);

    let err = advisor
        .project_revenue(&[(TaxType::Gst, 1.0)], 100.0)
        .expect_err("untrained advisor must fail");
    assert_eq!(err.kind, ModelErrorKind::Untrained);
}

#[test]
fn training_requires_records() {
    let mut advisor = TaxPolicyAdvisor::new();
    let err = advisor.train(&[]).expect_err("empty records must fail");
    assert_eq!(err.kind, ModelErrorKind::InvalidInput);

    advisor
        .train(&TAX_RECORDS[..1])
        .expect("a single record should train");
    let ratios = advisor.ratios().expect("trained");
    assert_close(ratios.avg_revenue_impact, 50_000.0 / 30.0, 1e-9);
}
