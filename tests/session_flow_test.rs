use reqminer::config::AnalysisConfig;
use reqminer::domain::analysis::ExtractionReport;
use reqminer::domain::table::RecordTable;
use reqminer::repository::{database, Repository};
use reqminer::services::{records_to_csv, AnalysisClient, SessionService};

fn service_over(pool: sqlx::SqlitePool) -> SessionService {
    SessionService::new(
        Repository::new(pool),
        AnalysisClient::new(AnalysisConfig::with_base_url("http://127.0.0.1:9")),
    )
}

#[tokio::test]
async fn upload_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("session.db");
    let db_path = db_path.to_string_lossy();

    {
        let pool = database::init_database(&db_path).await.unwrap();
        let service = service_over(pool);
        service
            .store_csv("reviews.csv", b"app,review\nMaps,slow\n")
            .await
            .unwrap();
    }

    // A fresh pool over the same file sees the uploaded CSV.
    let pool = database::init_database(&db_path).await.unwrap();
    let service = service_over(pool);
    assert!(service.has_file().await.unwrap());
    let bytes = service.current_csv().await.unwrap().unwrap();
    assert_eq!(bytes, b"app,review\nMaps,slow\n");
}

#[tokio::test]
async fn extraction_response_flows_into_table_and_export() {
    let body = r#"{
        "distribution_over_apps": {"Maps": 2, "Mail": 1},
        "sentiment_distribution": {"positive": 1, "negative": 2},
        "records": {
            "0": {"App": "Maps", "Review": "Routing is great", "Date": "2023-01",
                  "requirements": [{"requirement": "offline maps", "sentiment": "positive"}]},
            "1": {"App": "Maps", "Review": "Crashes on launch", "Date": "2023-02",
                  "requirements": [{"requirement": "crash fixes", "sentiment": "negative"}]},
            "2": {"App": "Mail", "Review": "Search never finds anything", "Date": "2023-02",
                  "requirements": [{"requirement": "better search", "sentiment": "negative"}]}
        }
    }"#;

    let report: ExtractionReport = serde_json::from_str(body).unwrap();
    let mut table = RecordTable::new(report.records.clone());
    assert_eq!(table.total_count(), 3);

    table.set_search_term("maps");
    assert_eq!(table.filtered_count(), 2);

    let rows = table.export_rows();
    let csv = records_to_csv(&rows).unwrap();
    assert_eq!(csv.lines().count(), 3); // header + two filtered rows
    assert!(csv.contains(r#""offline maps""#));
    assert!(!csv.contains("better search"));
}

#[tokio::test]
async fn rejected_and_failed_operations_leave_no_traces() {
    let pool = database::init_test_database().await.unwrap();
    let service = service_over(pool);

    // Wrong extension: rejected before any state change.
    assert!(service.store_csv("reviews.txt", b"not csv").await.is_err());
    assert!(!service.has_file().await.unwrap());

    // Dispatch without a file: blocked with the missing-file error.
    let err = service.run_extraction().await.unwrap_err();
    assert_eq!(err.to_string(), "No file available. Please upload a file first.");

    // With a file but a dead endpoint: the call fails and nothing is
    // cached.
    service.store_csv("reviews.csv", b"app,review\n").await.unwrap();
    assert!(service.run_extraction().await.is_err());
    assert_eq!(service.cached_extraction().await.unwrap(), None);
}
