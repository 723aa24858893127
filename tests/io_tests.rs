//! CSV in, cleaned CSV and chart specs out.

mod test_data_gen;

use std::fs;

use autobi_charts::{recommend, resolve, ChartType};
use autobi_clean::DataCleaner;
use autobi_core::config::AnalysisConfig;
use autobi_core::schema::DataType;
use autobi_infer::{infer_schema, SchemaInferer};
use autobi_io::{
    load_chart_specs, load_config_file, read_export, read_table, write_export, CsvWriter,
    ExportDocument, JsonlWriter,
};
use test_data_gen::create_temp_dir;

fn write_sales_csv(path: &std::path::Path) {
    let mut text = String::from("date,region,sales\n");
    for i in 0..60 {
        text.push_str(&format!(
            "2024-03-{:02},{},{}\n",
            i % 28 + 1,
            test_data_gen::REGIONS[i % 5],
            10.0 + i as f64 * 1.25
        ));
    }
    // a blank sale and a padded region
    text.push_str("2024-03-01, north ,\n");
    fs::write(path, text).unwrap();
}

#[test]
fn csv_to_export_and_back() {
    let dir = create_temp_dir("export");
    let input = dir.join("sales.csv");
    write_sales_csv(&input);

    let raw = read_table(&input).unwrap();
    assert_eq!(raw.num_rows(), 61);
    assert_eq!(raw.column("date").unwrap().data_type, DataType::Utf8);
    assert_eq!(raw.column("sales").unwrap().data_type, DataType::Float64);

    let (cleaned, report) = DataCleaner::default().clean(&raw);
    assert_eq!(report.steps.len(), 5);
    assert_eq!(cleaned.column("date").unwrap().data_type, DataType::Datetime);
    assert_eq!(cleaned.column("sales").unwrap().null_count(), 0);

    let schema = infer_schema(&cleaned);
    let recs = recommend(&schema, &cleaned);
    assert_eq!(recs[0].chart_type, ChartType::Line);

    let export_path = dir.join("chart_specs.json");
    let doc = ExportDocument::new(schema, recs.clone());
    write_export(&export_path, &doc).unwrap();
    assert_eq!(read_export(&export_path).unwrap(), doc);
    assert_eq!(load_chart_specs(&export_path).unwrap(), recs);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn cleaned_csv_reads_back_with_same_values() {
    let dir = create_temp_dir("cleaned");
    let input = dir.join("sales.csv");
    write_sales_csv(&input);
    let (cleaned, _) = DataCleaner::default().clean(&read_table(&input).unwrap());

    let out = dir.join("cleaned_data.csv");
    CsvWriter::to_path(&out).unwrap().write_table(&cleaned).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("date,region,sales\n2024-03-01,north,10.0\n"));

    // dates come back as text and clean into the same table
    let (again, _) = DataCleaner::default().clean(&read_table(&out).unwrap());
    assert_eq!(again, cleaned);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn fractional_seconds_survive_a_cleaned_csv() {
    let dir = create_temp_dir("subsecond");
    let input = dir.join("events.csv");
    fs::write(
        &input,
        "at,value\n2024-03-01 09:30:05.250,1\n2024-03-01 09:30:06,2\n2024-03-02,3\n",
    )
    .unwrap();
    let (cleaned, _) = DataCleaner::default().clean(&read_table(&input).unwrap());
    assert_eq!(cleaned.column("at").unwrap().data_type, DataType::Datetime);

    let out = dir.join("cleaned_data.csv");
    CsvWriter::to_path(&out).unwrap().write_table(&cleaned).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("2024-03-01 09:30:05.250,1\n"));

    let (again, _) = DataCleaner::default().clean(&read_table(&out).unwrap());
    assert_eq!(again, cleaned);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn jsonl_has_one_line_per_row() {
    let dir = create_temp_dir("jsonl");
    let input = dir.join("sales.csv");
    write_sales_csv(&input);
    let table = read_table(&input).unwrap();

    let out = dir.join("rows.jsonl");
    JsonlWriter::to_path(&out).unwrap().write_table(&table).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), table.num_rows());
    let last: serde_json::Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
    assert!(last["sales"].is_null());
    assert_eq!(last["region"], " north ");

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn yaml_specs_resolve_against_cleaned_table() {
    let dir = create_temp_dir("yaml");
    let input = dir.join("sales.csv");
    write_sales_csv(&input);
    let specs_path = dir.join("charts.yaml");
    fs::write(
        &specs_path,
        "- type: bar\n  x: region\n  y: sales\n  agg: mean\n- type: heatmap\n  x: region\n  y: date\n- type: donut\n  x: region\n",
    )
    .unwrap();

    let (cleaned, _) = DataCleaner::default().clean(&read_table(&input).unwrap());
    let specs = load_chart_specs(&specs_path).unwrap();
    let plots: Vec<_> = specs.iter().map(|s| resolve(&cleaned, s)).collect();
    assert_eq!(plots[0].fallback, None);
    assert_eq!(plots[1].z.as_deref(), Some("sales"));
    assert!(plots[2].fallback.is_some());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn config_file_changes_the_threshold() {
    let dir = create_temp_dir("config");
    let cfg_path = dir.join("autobi.yaml");
    fs::write(&cfg_path, "measure_distinct_threshold: 100\nmissing_text_placeholder: n/a\n").unwrap();

    let mut cfg = AnalysisConfig::default();
    cfg.apply_file(&load_config_file(&cfg_path).unwrap());
    assert_eq!(cfg.measure_distinct_threshold, 100);

    let input = dir.join("sales.csv");
    write_sales_csv(&input);
    let (cleaned, _) = DataCleaner::new(cfg.clone()).clean(&read_table(&input).unwrap());
    let schema = SchemaInferer::new(&cfg).infer_schema(&cleaned);
    assert!(schema.measures().is_empty());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn unreadable_inputs_are_errors() {
    assert!(read_table("/definitely/not/here.csv").is_err());
    assert!(matches!(
        read_table("report.xlsx"),
        Err(autobi_io::Error::Format(_))
    ));
}
