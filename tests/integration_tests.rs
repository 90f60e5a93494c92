use httpmock::prelude::*;
use insular_analyzer::core::report;
use insular_analyzer::{AnalysisEngine, AnalyzerError, LocalStorage, SourceStorage, TomlConfig};
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_DATA: &str = include_str!("../data/insular_manuscripts_britain_700_1100.csv");

fn config_for(source: &str, extra: &str) -> TomlConfig {
    let content = format!("[data]\nsource = \"{}\"\n{}", source, extra);
    TomlConfig::from_toml_str(&content).unwrap()
}

#[tokio::test]
async fn test_end_to_end_with_local_file() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("manuscripts.csv");
    std::fs::write(&data_path, SAMPLE_DATA).unwrap();

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let mut engine = AnalysisEngine::new(storage, config_for("manuscripts.csv", ""));

    assert_eq!(engine.load().await.unwrap(), 9);

    let full = engine.analyze("700-1100").unwrap();
    assert_eq!(full.summary.total, 7);
    assert_eq!(full.summary.illustrated, 6);
    assert_eq!(full.summary.percentage, "85.71");

    let first_year = engine.analyze("700").unwrap();
    assert_eq!(first_year.summary.total, 1);
    assert_eq!(first_year.summary.percentage, "100.00");

    let mid = engine.analyze("850-950").unwrap();
    assert_eq!((mid.summary.total, mid.summary.illustrated), (2, 1));
    assert_eq!(mid.summary.percentage, "50.00");

    let text = report::render_text(&mid, "Britain");
    assert!(text.contains("Total known extant manuscripts (Britain, 850-950 CE): 2"));
    assert!(text.contains("Percentage illustrated: 50.00%"));
}

#[tokio::test]
async fn test_source_storage_reads_local_path() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("manuscripts.csv");
    std::fs::write(&data_path, SAMPLE_DATA).unwrap();
    let source = data_path.to_str().unwrap().replace('\\', "/");

    let storage = SourceStorage::for_location(&source);
    assert!(matches!(storage, SourceStorage::Local(_)));

    let mut engine = AnalysisEngine::new(storage, config_for(&source, "check_header = true\n"));
    assert_eq!(engine.load().await.unwrap(), 9);
    assert_eq!(engine.analyze("1050").unwrap().summary.total, 3);
}

#[tokio::test]
async fn test_end_to_end_with_http_source() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/insular_manuscripts_britain_700_1100.csv");
        then.status(200)
            .header("Content-Type", "text/csv")
            .body(SAMPLE_DATA);
    });

    let url = server.url("/insular_manuscripts_britain_700_1100.csv");
    let storage = SourceStorage::for_location(&url);
    assert!(matches!(storage, SourceStorage::Http(_)));

    let mut engine = AnalysisEngine::new(storage, config_for(&url, ""));
    assert_eq!(engine.load().await.unwrap(), 9);
    api_mock.assert();

    let analysis = engine.analyze("1000-1100").unwrap();
    assert_eq!(analysis.summary.total, 3);
    assert_eq!(analysis.summary.illustrated, 3);

    let json = report::render_json(&analysis).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["percentage"], "100.00");
}

#[tokio::test]
async fn test_http_failure_leaves_data_unloaded() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/missing.csv");
        then.status(404);
    });

    let url = server.url("/missing.csv");
    let mut engine = AnalysisEngine::new(SourceStorage::for_location(&url), config_for(&url, ""));

    let err = engine.load().await.unwrap_err();
    api_mock.assert();
    assert!(matches!(err, AnalyzerError::HttpStatusError { status: 404, .. }));

    let err = engine.analyze("850").unwrap_err();
    assert!(matches!(err, AnalyzerError::DataNotLoadedError));
    assert_eq!(err.to_string(), "Data not loaded. Please try again.");
}

#[tokio::test]
async fn test_invalid_input_is_reported_with_bounds() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("m.csv"), SAMPLE_DATA).unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let mut engine = AnalysisEngine::new(storage, config_for("m.csv", ""));
    engine.load().await.unwrap();

    for input in ["699", "1101", "1100-700", "eight hundred", "850-"] {
        let err = engine.analyze(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Invalid input: \"{}\". Please enter a year (YYYY) or a year range (YYYY-YYYY) between 700 and 1100.",
                input
            )
        );
    }
}

#[tokio::test]
async fn test_custom_bounds_from_config() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("m.csv"), SAMPLE_DATA).unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let config = config_for("m.csv", "[query]\nmin_year = 650\nmax_year = 1066\n");
    let mut engine = AnalysisEngine::new(storage, config);
    engine.load().await.unwrap();

    assert_eq!(engine.analyze("690").unwrap().summary.total, 1);
    assert!(engine.analyze("1100").is_err());
}

#[test]
fn test_shipped_config_file_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("analyzer-config.toml");
    let config = TomlConfig::from_file(path).unwrap();
    insular_analyzer::utils::validation::Validate::validate(&config).unwrap();
}
