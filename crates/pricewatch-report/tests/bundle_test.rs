//! CSV in, report bundle out.

use std::fs;
use std::path::Path;

use pricewatch_analysis::PricingPipeline;
use pricewatch_core::config::ReportConfig;
use pricewatch_core::PricewatchConfig;
use pricewatch_report::bundle::{ANALYSIS_FILE, CHART_FILE, MANIFEST_FILE, ORIGINAL_FILE};
use pricewatch_report::{CsvIngestor, ReportBundle, ReportManifest};

const SOURCE_CSV: &str = "\
biz_assoc_id,part_nbr1,YEAR,MONTH,unit_price_amt,cantidad,region
D,P,2024,1,10,100,north
D,P,2024,2,15,50,north
E,P,2024,2,10,200,south
F,P,2024,2,8,300,east
G,P,2024,2,10,400,west
H,P,2024,2,5,500,west
";

fn run_into(dir: &Path) -> ReportManifest {
    let config = PricewatchConfig {
        report: ReportConfig {
            output_dir: Some(dir.to_path_buf()),
            ..Default::default()
        },
        ..Default::default()
    };
    let table = CsvIngestor::new(&config.ingest)
        .read(SOURCE_CSV.as_bytes())
        .unwrap();
    let result = PricingPipeline::new(&config).run_raw(table.rows).unwrap();
    ReportBundle::new(&config.report)
        .write(
            &result.data,
            &config.ingest.columns,
            &table.passthrough_headers,
            None,
        )
        .unwrap()
}

/// Every bundle file is written and the manifest lists the three sheets.
#[test]
fn writes_all_bundle_files() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = run_into(dir.path());

    for file in [ANALYSIS_FILE, ORIGINAL_FILE, CHART_FILE, MANIFEST_FILE] {
        assert!(dir.path().join(file).exists(), "{file} missing");
    }
    let names: Vec<&str> = manifest.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Analysis", "Original", "Visualization"]);
    assert_eq!(manifest.sheets[0].rows, 6);
    assert_eq!(manifest.summary.total_rows, 6);

    let on_disk: ReportManifest =
        serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap()).unwrap();
    assert_eq!(on_disk.sheets, manifest.sheets);
}

/// The Analysis sheet flags the reference record as Rule 1.
#[test]
fn analysis_sheet_contents() {
    let dir = tempfile::tempdir().unwrap();
    run_into(dir.path());

    let mut reader = csv::Reader::from_path(dir.path().join(ANALYSIS_FILE)).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(0), Some("biz_assoc_id"));
    assert_eq!(headers.get(14), Some("rule_outcome"));

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    let d_feb = rows
        .iter()
        .find(|r| r.get(0) == Some("D") && r.get(4) == Some("2"))
        .unwrap();
    assert_eq!(d_feb.get(8), Some("50"));
    assert_eq!(d_feb.get(12), Some("-50"));
    assert_eq!(d_feb.get(14), Some("Rule 1: High Price + Low Sales"));
}

/// The Original sheet keeps pass-through columns.
#[test]
fn original_sheet_keeps_passthrough() {
    let dir = tempfile::tempdir().unwrap();
    run_into(dir.path());

    let mut reader = csv::Reader::from_path(dir.path().join(ORIGINAL_FILE)).unwrap();
    let headers = reader.headers().unwrap().clone();
    let region = headers.iter().position(|h| h == "region").unwrap();
    let first = reader.records().next().unwrap().unwrap();
    assert_eq!(first.get(region), Some("north"));
}

/// Two runs over the same input write byte-identical sheets and chart.
#[test]
fn output_is_byte_identical_across_runs() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    run_into(a.path());
    run_into(b.path());
    for file in [ANALYSIS_FILE, ORIGINAL_FILE, CHART_FILE] {
        assert_eq!(
            fs::read(a.path().join(file)).unwrap(),
            fs::read(b.path().join(file)).unwrap(),
            "{file} differs"
        );
    }
}
