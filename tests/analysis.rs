//! A complete analysis: raw records and the model versions sheet to indicator figures.

use approx::assert_relative_eq;
use iamcompare::core::meta::{MetaTable, ModelVersion};
use iamcompare::core::panel::RawRecord;
use iamcompare::core::preprocessing::import_data;
use iamcompare::plot::figures::{carbint_over_enerint, fossil_fuel_reduction};
use iamcompare::plot::ComparisonOptions;
use iamcompare::AnalysisConfig;
use serde_json::json;

const CONFIG: &str = r#"
[preprocess]
only_world = true

[preprocess.model_renames]
"IMAGE_3.0" = "IMAGE 3.0"
"#;

fn record(model: &str, scenario: &str, variable: &str, unit: &str, values: [f64; 3]) -> RawRecord {
    RawRecord {
        model: model.to_string(),
        scenario: scenario.to_string(),
        region: "World".to_string(),
        variable: variable.to_string(),
        unit: unit.to_string(),
        values: [2020, 2050, 2100].into_iter().zip(values).collect(),
    }
}

fn model_records(model: &str, k: f64) -> Vec<RawRecord> {
    let co2 = "Emissions|CO2|Energy and Industrial Processes";
    vec![
        record(model, "DIAG-BASE", co2, "Mt CO2/yr", [35000.0, 50000.0, 60000.0]),
        // Reported in kilotonnes
        record(
            model,
            "DIAG-C80-GR5",
            co2,
            "Kt",
            [35e6, (15000.0 - 2000.0 * k) * 1000.0, 1e6 * k],
        ),
        record(model, "DIAG-BASE", "Final Energy", "EJ/yr", [400.0, 600.0, 800.0]),
        record(
            model,
            "DIAG-C80-GR5",
            "Final Energy",
            "EJ/yr",
            [400.0, 450.0 + 20.0 * k, 500.0 - 10.0 * k],
        ),
        record(model, "DIAG-BASE", "GDP|MER", "billion US$2010/yr", [1e5, 2e5, 4e5]),
        record(
            model,
            "DIAG-C80-GR5",
            "GDP|MER",
            "billion US$2010/yr",
            [1e5, 195000.0 - 1000.0 * k, 390000.0 - 3000.0 * k],
        ),
        record(model, "DIAG-BASE", "Primary Energy|Fossil", "EJ/yr", [500.0, 650.0, 800.0]),
        record(
            model,
            "DIAG-C80-GR5",
            "Primary Energy|Fossil",
            "EJ/yr",
            [500.0, 250.0 + 20.0 * k, 50.0 + 10.0 * k],
        ),
        record(model, "DIAG-C80-GR5", "Primary Energy|Nuclear", "EJ/yr", [30.0, 40.0, 50.0]),
        // Other regions are dropped
        RawRecord {
            region: "R5ASIA".to_string(),
            ..record(model, "DIAG-BASE", co2, "Mt CO2/yr", [1.0, 1.0, 1.0])
        },
    ]
}

fn versions() -> Vec<ModelVersion> {
    serde_json::from_value(json!([
        {"Model": "GCAM 4.2", "Stripped model": "GCAM", "Type": "Recursive", "Age": 1, "GDP_metric": "GDP|MER"},
        {"Model": "REMIND 1.7", "Stripped model": "REMIND", "Type": "Intertemporal", "Age": 1, "GDP_metric": "GDP|MER"},
        {"Model": "IMAGE 3.0", "Stripped model": "IMAGE", "Type": "Recursive", "Age": 1, "GDP_metric": "GDP|MER"},
        {"Model": "WITCH 1.0", "Stripped model": "WITCH", "Type": "Intertemporal", "Age": 1}
    ]))
    .unwrap()
}

#[test]
fn test_analysis_from_records() {
    let config = AnalysisConfig::from_toml_str(CONFIG).unwrap();

    let mut records = Vec::new();
    for (k, model) in ["GCAM 4.2", "REMIND 1.7", "IMAGE_3.0"].iter().enumerate() {
        records.extend(model_records(model, k as f64));
    }
    let panel = import_data(records, &config.preprocess).unwrap();
    assert_eq!(panel.regions().len(), 1);

    // WITCH is not in the data
    let meta = MetaTable::create(&panel, versions());
    assert_eq!(meta.models(), vec!["GCAM 4.2", "REMIND 1.7", "IMAGE 3.0"]);

    let meta = config.apply_indicators(&panel, &meta).unwrap();

    // Emissions were converted to Mt before the RAI was calculated
    assert_relative_eq!(
        meta.value("REMIND 1.7", "RAI c80 2050 CO2 FFI").unwrap().unwrap(),
        (50000.0 - 13000.0) / 50000.0
    );
    assert_relative_eq!(
        meta.value("GCAM 4.2", "FFR 2100").unwrap().unwrap(),
        0.9
    );
    // No policy cost variable configured
    assert_eq!(meta.value("GCAM 4.2", "CAV 2050").unwrap(), None);

    let models = config.models_table(&meta);
    assert_eq!(models.len(), 3);

    let coei = carbint_over_enerint::create_fig(
        &meta,
        &models,
        2050,
        None,
        ComparisonOptions::default(),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&coei.to_json().unwrap()).unwrap();
    assert_eq!(value["layout"]["height"], 400);

    let ffr = fossil_fuel_reduction::create_fig(&meta, &models, 2100, None, None)
        .unwrap()
        .to_value()
        .unwrap();
    let nuclear = &ffr["data"][2];
    assert_eq!(nuclear["name"], "Nuclear");
    assert_eq!(nuclear["x"][0], 50.0);
}
