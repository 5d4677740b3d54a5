//! End-to-end runs of the XML checker against a mock TCM.

mod common;

use common::{catalog, fixture, statuses, PROJECT_KEY};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zephyr_sync::commands::{check_xml, run_xml_check, XmlCheckConfig};
use zephyr_sync::core::Platform;
use zephyr_sync::tcm::ZephyrClient;

fn config(output_dir: &Path) -> XmlCheckConfig {
    XmlCheckConfig {
        project_key: PROJECT_KEY.to_string(),
        report_from: fixture("junit/checker-report.xml"),
        platform: Platform::Android,
        update_cases: false,
        suite_name_contains: None,
        max_case_results: 1900,
        max_status_results: 10,
        output_dir: output_dir.to_path_buf(),
    }
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/testcases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(statuses()))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> ZephyrClient {
    ZephyrClient::new(&server.uri(), "token", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_full_comparison_without_updates() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let output = check_xml(&client(&server), &config(out.path()))
        .await
        .unwrap();

    assert_eq!(output.missing_ids, vec!["com.example.app.SettingsTest.openSettings"]);
    assert_eq!(
        output.duplicate_keys.into_iter().collect::<Vec<_>>(),
        vec![("PROJ-T6".to_string(), 2)]
    );

    let tsm = output.tsm.unwrap();
    assert_eq!(tsm.should_be_in_code, vec!["PROJ-T3 Checkout [Update DISABLED]"]);
    assert_eq!(tsm.should_be_in_zephyr, vec!["PROJ-T2 in PROJ_T2_logout"]);
    assert_eq!(
        tsm.missing_status,
        vec!["PROJ-T5 in PROJ_T5_profile [Update DISABLED]"]
    );
    assert_eq!(
        tsm.deprecated_case,
        vec![
            "PROJ-T6 in PROJ_T6_addToCart",
            "PROJ-T6 in PROJ_T6_addToCartAgain"
        ]
    );

    let coverage = output.coverage.unwrap();
    assert_eq!(coverage.total_cases, 5);
    assert_eq!(coverage.non_deprecated_cases, 3);
    assert_eq!(coverage.count_by_automation_status.done, 2);
    assert_eq!(coverage.percentages.automated_of_can_be, 66.67);
}

#[tokio::test]
async fn test_interleaved_report_matches_contiguous_report() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let out = TempDir::new().unwrap();
    let contiguous = check_xml(&client(&server), &config(out.path()))
        .await
        .unwrap();

    let mut interleaved = config(out.path());
    interleaved.report_from = fixture("junit/interleaved-report.xml");
    let output = check_xml(&client(&server), &interleaved).await.unwrap();

    assert_eq!(output.missing_ids, contiguous.missing_ids);
    assert_eq!(output.duplicate_keys, contiguous.duplicate_keys);
    assert_eq!(output.tsm, contiguous.tsm);
    assert_eq!(
        output.tsm.unwrap().should_be_in_zephyr,
        vec!["PROJ-T2 in PROJ_T2_logout"]
    );
}

#[tokio::test]
async fn test_updates_are_pushed_and_tagged() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("PUT"))
        .and(path("/testcases/PROJ-T5"))
        .and(body_partial_json(json!({"customFields": {"Android Auto": "Done"}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/testcases/PROJ-T3"))
        .and(body_partial_json(json!({"customFields": {"Android Auto": null}})))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let mut config = config(out.path());
    config.update_cases = true;

    let tsm = check_xml(&client(&server), &config)
        .await
        .unwrap()
        .tsm
        .unwrap();

    assert_eq!(tsm.should_be_in_code, vec!["PROJ-T3 Checkout [Update FAILED]"]);
    assert_eq!(tsm.missing_status, vec!["PROJ-T5 in PROJ_T5_profile [Update OK]"]);
    assert_eq!(tsm.should_be_in_zephyr, vec!["PROJ-T2 in PROJ_T2_logout"]);
    assert_eq!(tsm.deprecated_case.len(), 2);
}

#[tokio::test]
async fn test_suite_filter_limits_local_references() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let out = TempDir::new().unwrap();
    let mut config = config(out.path());
    config.suite_name_contains = Some("Login".to_string());

    let output = check_xml(&client(&server), &config).await.unwrap();

    assert!(output.duplicate_keys.is_empty());
    let tsm = output.tsm.unwrap();
    assert!(tsm.deprecated_case.is_empty());
    // PROJ-T6 and PROJ-T7 are deprecated, so their absence is not reported.
    assert_eq!(tsm.should_be_in_code, vec!["PROJ-T3 Checkout [Update DISABLED]"]);
}

#[tokio::test]
async fn test_catalog_fetch_failure_skips_comparison() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/testcases"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"errorCode": 403, "message": "Forbidden"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(statuses()))
        .expect(0)
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let (output, written) = run_xml_check(&client(&server), &config(out.path()))
        .await
        .unwrap();

    assert!(output.tsm.is_none());
    assert!(output.coverage.is_none());
    assert_eq!(output.missing_ids.len(), 1);
    assert_eq!(written.len(), 2);

    let json: Value = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("zephyr.checker.result.json")).unwrap(),
    )
    .unwrap();
    assert!(json.get("shouldBeInCode").is_none());
    assert_eq!(json["duplicateKeys"]["PROJ-T6"], 2);
}

#[tokio::test]
async fn test_missing_deprecated_status_skips_comparison() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/testcases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{"id": 1, "name": "Draft"}]
        })))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let output = check_xml(&client(&server), &config(out.path()))
        .await
        .unwrap();

    assert!(output.tsm.is_none());
}

#[tokio::test]
async fn test_reports_are_written() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let out = TempDir::new().unwrap();
    run_xml_check(&client(&server), &config(out.path()))
        .await
        .unwrap();

    let md = std::fs::read_to_string(out.path().join("zephyr.checker.result.md")).unwrap();
    assert!(md.starts_with("### Zephyr integration check\n"));
    assert!(md.contains("<summary>Missing IDs:</summary>"));
    assert!(md.contains("- PROJ-T6: 2"));
    assert!(md.contains("<summary>Missing Cases in CODE:</summary>"));
    assert!(md.contains("- PROJ-T2 in PROJ_T2_logout"));
    assert!(md.contains("<summary>Automation coverage:</summary>"));

    let json: Value = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("zephyr.checker.result.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["shouldBeInZephyr"], json!(["PROJ-T2 in PROJ_T2_logout"]));
    assert_eq!(json["coverage"]["canBeAutomated"], 3);
}

#[tokio::test]
async fn test_missing_report_is_an_error() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();
    let mut config = config(out.path());
    config.report_from = fixture("junit/does-not-exist.xml");

    let err = check_xml(&client(&server), &config).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read XML report"));
}
