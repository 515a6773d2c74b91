use nixcon_tax_core::catalog::LineItem;
use nixcon_tax_core::engine::{simulate, SimulationInput};
use nixcon_tax_core::rates::{CompanyProfile, SimulationContext, UserType, SIMPLES_NACIONAL_REGIME};
use nixcon_tax_core::TaxKind;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

// ===========================================================================
// Builders
// ===========================================================================

fn item(quantity: Decimal, price: Decimal, cost: Decimal) -> LineItem {
    LineItem {
        product_id: "prod-1".to_string(),
        description: "Item".to_string(),
        quantity,
        unit_sale_price: price,
        unit_cost: cost,
        line_total: Decimal::ZERO,
        fiscal_config: None,
    }
}

fn input(items: Vec<LineItem>, global: Option<Decimal>, ctx: SimulationContext) -> SimulationInput {
    SimulationInput {
        items,
        global_sale_value: global,
        context: ctx,
    }
}

// ===========================================================================
// Host JSON boundary
// ===========================================================================

#[test]
fn test_simulation_input_from_host_json() {
    // Shapes exactly as the host product sends them: camelCase keys,
    // numbers as strings, junk in numeric fields.
    let parsed: SimulationInput = serde_json::from_str(
        r#"{
            "items": [{
                "productId": "prod-1",
                "description": "Monitor 24\"",
                "quantity": "2",
                "unitSalePrice": 100,
                "unitCost": "50",
                "lineTotal": "n/a",
                "fiscalConfig": {"icms": "0.10"}
            }],
            "globalSaleValue": null,
            "context": {"userType": "escritorio"}
        }"#,
    )
    .unwrap();

    let report = simulate(&parsed);
    let summary = report.result.summary.unwrap();

    assert_eq!(summary.total_revenue, dec!(200));
    assert_eq!(summary.total_product_cost, dec!(100));
    assert_eq!(summary.sales_taxes, dec!(20.00));
    assert_eq!(summary.purchase_taxes, dec!(5.00));
    assert_eq!(summary.difal, dec!(4.00));
    assert_eq!(summary.gross_profit, dec!(71.00));
}

#[test]
fn test_empty_items_short_circuit() {
    let parsed: SimulationInput =
        serde_json::from_str(r#"{"items": [], "globalSaleValue": 900}"#).unwrap();
    let report = simulate(&parsed);

    assert!(report.result.items.is_empty());
    assert!(report.result.summary.is_none());
}

// ===========================================================================
// Rate priority across sources
// ===========================================================================

#[test]
fn test_user_config_outranks_item_and_company() {
    let ctx = SimulationContext {
        user_type: UserType::Calculadora,
        acting_as_company: false,
        user_tax_config: Some(BTreeMap::from([(TaxKind::Icms, "20".to_string())])),
        company: Some(CompanyProfile {
            tax_regime: None,
            default_fiscal_config: Some(BTreeMap::from([(TaxKind::Icms, "10".to_string())])),
        }),
    };
    let mut line = item(dec!(1), dec!(100), dec!(0));
    line.fiscal_config = Some(BTreeMap::from([(TaxKind::Icms, dec!(0.5))]));

    let report = simulate(&input(vec![line], None, ctx));
    let summary = report.result.summary.unwrap();

    // 100 * 0.20, not 100 * 0.5 and not 100 * 0.10.
    assert_eq!(summary.sales_taxes, dec!(20.00));
}

#[test]
fn test_company_default_fills_missing_item_rates() {
    let ctx = SimulationContext {
        user_type: UserType::Empresa,
        acting_as_company: false,
        user_tax_config: None,
        company: Some(CompanyProfile {
            tax_regime: Some("Lucro Presumido".to_string()),
            default_fiscal_config: Some(BTreeMap::from([
                (TaxKind::Icms, "18".to_string()),
                (TaxKind::Iss, "5".to_string()),
            ])),
        }),
    };

    let report = simulate(&input(vec![item(dec!(1), dec!(200), dec!(0))], None, ctx));
    let summary = report.result.summary.unwrap();

    // 200 * (0.18 + 0.05)
    assert_eq!(summary.sales_taxes, dec!(46.00));
}

// ===========================================================================
// Redistribution
// ===========================================================================

#[test]
fn test_redistribution_conserves_global_value() {
    let items = vec![
        item(dec!(1), dec!(33.33), dec!(12)),
        item(dec!(2), dec!(17.77), dec!(6)),
        item(dec!(5), dec!(9.99), dec!(3)),
    ];
    let report = simulate(&input(items, Some(dec!(777)), SimulationContext::default()));
    let outcome = &report.result;

    // The summary uses the override exactly.
    assert_eq!(outcome.summary.as_ref().unwrap().total_revenue, dec!(777));

    // The redistributed line totals re-sum to it within decimal precision.
    let redistributed: Decimal = outcome.items.iter().map(|i| i.line_total).sum();
    let drift = (redistributed - dec!(777)).abs();
    assert!(drift < dec!(0.000000001), "drift was {drift}");

    // Proportions are preserved: item revenue shares stay equal before
    // and after scaling.
    let before = [dec!(33.33), dec!(35.54), dec!(49.95)];
    let total_before: Decimal = before.iter().copied().sum();
    for (line, natural) in outcome.items.iter().zip(before) {
        let share_before = natural / total_before;
        let share_after = line.line_total / dec!(777);
        assert!((share_before - share_after).abs() < dec!(0.000000001));
    }
}

#[test]
fn test_zero_quantity_line_keeps_finite_price_under_redistribution() {
    let items = vec![
        item(dec!(0), dec!(80), dec!(15)),
        item(dec!(4), dec!(25), dec!(10)),
    ];
    let report = simulate(&input(items, Some(dec!(150)), SimulationContext::default()));
    let outcome = &report.result;

    assert_eq!(outcome.items[0].line_total, Decimal::ZERO);
    assert_eq!(outcome.items[0].unit_sale_price, Decimal::ZERO);
    assert_eq!(outcome.items[1].line_total, dec!(150));
    assert_eq!(outcome.items[1].unit_sale_price, dec!(37.5));
}

// ===========================================================================
// Regime branches
// ===========================================================================

#[test]
fn test_same_sale_under_simples_and_itemized() {
    let mut line = item(dec!(2), dec!(100), dec!(50));
    line.fiscal_config = Some(BTreeMap::from([
        (TaxKind::Icms, dec!(0.18)),
        (TaxKind::Ipi, dec!(0.05)),
        (TaxKind::SimplesNacional, dec!(0.06)),
    ]));

    let simples_ctx = SimulationContext {
        user_type: UserType::Empresa,
        acting_as_company: false,
        user_tax_config: None,
        company: Some(CompanyProfile {
            tax_regime: Some(SIMPLES_NACIONAL_REGIME.to_string()),
            default_fiscal_config: None,
        }),
    };
    let itemized_ctx = SimulationContext::default();

    let simples = simulate(&input(vec![line.clone()], None, simples_ctx));
    let itemized = simulate(&input(vec![line], None, itemized_ctx));

    // Simples: 200 * 0.06. Itemized: 200 * 0.18 + 100 * 0.05.
    assert_eq!(simples.result.summary.unwrap().sales_taxes, dec!(12.00));
    assert_eq!(itemized.result.summary.unwrap().sales_taxes, dec!(41.00));
}

#[test]
fn test_acting_as_company_enables_simples() {
    let mut line = item(dec!(1), dec!(500), dec!(200));
    line.fiscal_config = Some(BTreeMap::from([(TaxKind::SimplesNacional, dec!(0.06))]));

    let ctx = SimulationContext {
        user_type: UserType::Escritorio,
        acting_as_company: true,
        user_tax_config: None,
        company: Some(CompanyProfile {
            tax_regime: Some(SIMPLES_NACIONAL_REGIME.to_string()),
            default_fiscal_config: None,
        }),
    };

    let report = simulate(&input(vec![line], None, ctx));
    assert_eq!(report.result.summary.unwrap().sales_taxes, dec!(30.00));
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_report_serializes_with_result_envelope() {
    let report = simulate(&input(
        vec![item(dec!(1), dec!(100), dec!(40))],
        None,
        SimulationContext::default(),
    ));
    let value = serde_json::to_value(&report).unwrap();

    assert!(value.get("result").is_some());
    assert!(value.get("methodology").is_some());
    assert!(value.get("assumptions").is_some());
    assert!(value.get("metadata").is_some());

    let summary = &value["result"]["summary"];
    assert!(summary.get("totalRevenue").is_some());
    assert!(summary.get("grossProfit").is_some());
}

#[test]
fn test_warnings_collect_in_envelope() {
    let ctx = SimulationContext {
        user_type: UserType::Empresa,
        acting_as_company: false,
        user_tax_config: None,
        company: Some(CompanyProfile {
            tax_regime: None,
            default_fiscal_config: Some(BTreeMap::from([(TaxKind::Icms, "isento".to_string())])),
        }),
    };
    // Override present but the only item has no revenue.
    let report = simulate(&input(vec![item(dec!(0), dec!(0), dec!(5))], Some(dec!(100)), ctx));

    assert!(report.warnings.iter().any(|w| w.contains("not numeric")));
    assert!(report.warnings.iter().any(|w| w.contains("no revenue")));
}
