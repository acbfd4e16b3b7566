use church_admin_api::types::{Church, FundTransfer, Page, User};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_fund_transfers() {
    let json = load_fixture("fund_transfers.json");
    let page: Page<FundTransfer> = serde_json::from_str(&json).unwrap();
    assert_eq!(page.len(), 3);
    assert_eq!(page.total_count(), 37);
    assert_eq!(page.page_size_hint(), Some(3));
    assert!(page.has_next());
    assert!(!page.has_previous());

    let first = &page.items()[0];
    assert_eq!(first.id.as_str(), "101");
    assert_eq!(first.reference.as_deref(), Some("FT-2024-0101"));
    assert_eq!(first.amount.as_ref().map(|a| a.as_str()), Some("150000.00"));
    assert_eq!(first.status.as_deref(), Some("pending"));

    // Numeric amounts are kept as text too.
    assert_eq!(page.items()[1].amount.as_ref().map(|a| a.as_str()), Some("2500"));
    assert_eq!(page.items()[2].church_name, None);
    assert_eq!(page.items()[2].requested_by, None);
}

#[test]
fn deserialize_users_with_uuid_ids() {
    let json = load_fixture("users.json");
    let page: Page<User> = serde_json::from_str(&json).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.page_size_hint(), None);
    assert!(!page.has_next());

    assert_eq!(page.items()[0].display_name(), "Grace Adeyemi");
    assert_eq!(page.items()[1].display_name(), "treasurer@example.org");
    assert_eq!(page.items()[1].is_active, Some(false));
}

#[test]
fn deserialize_last_page_with_previous_cursor() {
    let json = load_fixture("churches.json");
    let page: Page<Church> = serde_json::from_str(&json).unwrap();
    assert!(!page.has_next());
    assert_eq!(
        page.previous_cursor().map(|c| c.as_str()),
        Some("http://localhost/churches/?limit=15")
    );
    assert_eq!(page.items()[0].zone_name.as_deref(), Some("Lagos Mainland"));
}

#[test]
fn deserialize_empty_page() {
    let json = load_fixture("empty.json");
    let page: Page<FundTransfer> = serde_json::from_str(&json).unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_count(), 0);
    assert!(page.next_cursor().is_none());
    assert!(page.previous_cursor().is_none());
}

#[test]
fn deserialize_missing_results_as_empty() {
    let json = load_fixture("no_results.json");
    let page: Page<FundTransfer> = serde_json::from_str(&json).unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_count(), 5);
}

#[test]
fn serialize_uses_wire_field_names() {
    let json = load_fixture("churches.json");
    let page: Page<Church> = serde_json::from_str(&json).unwrap();
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["count"], 1);
    assert_eq!(value["limit"], 15);
    assert!(value["next"].is_null());
    assert_eq!(value["results"][0]["name"], "Grace Assembly Ikeja");
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"{"results": not valid json}"#;
    assert!(serde_json::from_str::<Page<FundTransfer>>(bad_json).is_err());
}

#[test]
fn deserialize_negative_count_returns_error() {
    let json = r#"{"count": -1, "results": []}"#;
    assert!(serde_json::from_str::<Page<FundTransfer>>(json).is_err());
}
