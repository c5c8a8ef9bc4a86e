//! Integration tests for zoho-crm-api.
//!
//! These tests require a Zoho CRM account with API access.
//! Run with: `cargo test --test integration_test -- --ignored`
//!
//! Environment variables:
//! - ZOHO_CRM_AUTHTOKEN: auth token for the account (required)
//! - ZOHO_CRM_DOMAIN: region domain, e.g. https://crm.zoho.eu (optional)
//!
//! The write tests create a lead named `zoho-crm-api-integration` in the
//! account and convert it; run them against a sandbox.

use zoho_crm_api::crm::ErrorKind;
use zoho_crm_api::{
    ClientConfig, CrmClient, Credentials, ExtraParams, ListOptions, Normalized, Record,
    WriteOptions,
};

const TEST_LAST_NAME: &str = "zoho-crm-api-integration";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a client from the environment.
fn test_client() -> CrmClient {
    init_tracing();
    let creds = Credentials::from_env().expect("ZOHO_CRM_AUTHTOKEN must be set");
    CrmClient::new(creds).expect("Failed to create CRM client")
}

// ============================================================================
// Credentials
// ============================================================================

#[test]
#[ignore = "requires Zoho CRM account"]
fn test_credentials_debug_redaction() {
    let creds = Credentials::from_env().expect("ZOHO_CRM_AUTHTOKEN must be set");

    let debug_output = format!("{:?}", creds);
    assert!(debug_output.contains("[REDACTED]"), "Debug should contain [REDACTED]");
    assert!(
        !debug_output.contains(creds.auth_token()),
        "Debug should not contain the actual token"
    );
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
#[ignore = "requires Zoho CRM account"]
async fn test_list_leads() {
    let client = test_client();

    let leads = client
        .list("Leads", 1, 5, &ListOptions::default().sort_by("Created Time", false))
        .await
        .expect("list should succeed");

    assert!(leads.len() <= 5, "Should honour the index range");
    for lead in &leads {
        assert!(lead.contains("LEADID"), "Every lead should carry LEADID: {:?}", lead);
    }
}

#[tokio::test]
#[ignore = "requires Zoho CRM account"]
async fn test_search_without_matches_is_empty() {
    let client = test_client();

    let result = client
        .search(
            "Leads",
            "(Last Name:no-such-lead-7f3a9c)",
            &ExtraParams::new(),
        )
        .await
        .expect("search should succeed");

    assert!(result.is_empty(), "Expected no matches, got {:?}", result);
}

#[tokio::test]
#[ignore = "requires Zoho CRM account"]
async fn test_invalid_token_is_upstream_error() {
    init_tracing();
    let domain = Credentials::from_env()
        .map(|c| c.domain().to_string())
        .unwrap_or_else(|_| zoho_crm_api::client::DEFAULT_DOMAIN.to_string());
    let creds = Credentials::new("invalid-token-for-tests")
        .unwrap()
        .with_domain(domain);
    let client = CrmClient::with_config(
        creds,
        ClientConfig::builder()
            .with_timeout(std::time::Duration::from_secs(30))
            .build(),
    )
    .unwrap();

    let err = client
        .get_record_by_id("Leads", "1")
        .await
        .expect_err("invalid token must fail");
    assert!(
        matches!(err.kind, ErrorKind::UpstreamApi { .. }),
        "Expected an upstream error, got {:?}",
        err
    );
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
#[ignore = "requires Zoho CRM account"]
async fn test_insert_fetch_update_convert() {
    let client = test_client();

    let lead = Record::new()
        .with("Last Name", TEST_LAST_NAME)
        .with("Company", "Acme & Sons <Test>");
    let id = client
        .insert("Leads", &lead, &WriteOptions::default().allow_duplicates(true))
        .await
        .expect("insert should succeed");
    assert!(!id.is_empty(), "Insert should return an id");

    let fetched = client
        .get_record_by_id("Leads", &id)
        .await
        .expect("fetch should succeed")
        .into_record()
        .expect("inserted lead should be found");
    assert_eq!(fetched.get("Last Name"), Some(TEST_LAST_NAME));
    assert_eq!(fetched.get("Company"), Some("Acme & Sons <Test>"));

    let updated = client
        .update(
            "Leads",
            &id,
            &Record::new().with("Company", "Acme Updated"),
            &WriteOptions::default().trigger_workflow(false),
        )
        .await
        .expect("update should succeed");
    assert!(matches!(updated, Normalized::Message(_)), "Got {:?}", updated);

    let converted = client
        .convert_lead(
            &id,
            &Record::new()
                .with("Potential Name", TEST_LAST_NAME)
                .with("Closing Date", "12/31/2030")
                .with("Stage", "Qualification"),
            &WriteOptions::default(),
        )
        .await
        .expect("convert should succeed");
    let message = converted.message().expect("conversion should report ids");
    assert!(message.detail.contains("Contact"), "Got {:?}", message);
}

#[tokio::test]
#[ignore = "requires Zoho CRM account"]
async fn test_upload_file_to_lead() {
    let client = test_client();

    let id = client
        .insert(
            "Leads",
            &Record::new().with("Last Name", TEST_LAST_NAME),
            &WriteOptions::default().allow_duplicates(true),
        )
        .await
        .expect("insert should succeed");

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "integration test attachment").unwrap();

    let result = client
        .upload_file("Leads", &id, &file)
        .await
        .expect("upload should succeed");
    assert!(result.message().is_some(), "Got {:?}", result);
}
