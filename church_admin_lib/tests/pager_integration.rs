use std::time::Duration;

use church_admin_api::types::{Cursor, FundTransfer, HasStatus, Resource};
use church_admin_api::{Client, FinanceQuery, Filters, SERVER_ERROR_MESSAGE};
use church_admin_lib::pager::{LoadState, Outcome, Pager};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transfers(ids: std::ops::RangeInclusive<u32>) -> Vec<Value> {
    ids.map(|id| {
        json!({
            "id": id,
            "amount": "10.00",
            "status": if id % 3 == 0 { "approved" } else { "pending" },
        })
    })
    .collect()
}

async fn mount_two_pages(mock_server: &MockServer, delay_second: Option<Duration>) {
    let uri = mock_server.uri();
    let mut second = ResponseTemplate::new(200).set_body_json(json!({
        "count": 15,
        "limit": 10,
        "next": null,
        "previous": format!("{}/finance/fund-transfers/?limit=10", uri),
        "results": transfers(11..=15),
    }));
    if let Some(delay) = delay_second {
        second = second.set_delay(delay);
    }
    Mock::given(method("GET"))
        .and(path("/finance/fund-transfers/"))
        .and(query_param("offset", "10"))
        .respond_with(second)
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/finance/fund-transfers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 15,
            "limit": 10,
            "next": format!("{}/finance/fund-transfers/?limit=10&offset=10", uri),
            "previous": null,
            "results": transfers(1..=10),
        })))
        .mount(mock_server)
        .await;
}

fn pager(mock_server: &MockServer) -> Pager<FundTransfer, FinanceQuery> {
    let client = Client::new(&mock_server.uri(), None).unwrap();
    Pager::new(
        client.pages().clone(),
        client.endpoint(Resource::FundTransfers),
        FinanceQuery::default(),
    )
}

#[tokio::test]
async fn walks_forward_and_back() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server, None).await;
    let pager = pager(&mock_server);

    assert_eq!(pager.load_first().await, Outcome::Loaded);
    assert_eq!(pager.status_line(), "Page 1 of 2 (15 records)");
    assert!(pager.can_next());
    assert!(!pager.can_previous());

    assert_eq!(pager.next().await, Outcome::Loaded);
    assert_eq!(pager.page_number(), Some(2));
    assert_eq!(pager.current().unwrap().len(), 5);
    assert_eq!(pager.status_line(), "Page 2 of 2 (15 records)");
    assert!(!pager.can_next());

    assert_eq!(pager.previous().await, Outcome::Loaded);
    assert_eq!(pager.page_number(), Some(1));
    assert_eq!(pager.current().unwrap().len(), 10);
}

#[tokio::test]
async fn next_on_last_page_sends_nothing() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server, None).await;
    let pager = pager(&mock_server);

    pager.load_first().await;
    pager.next().await;
    assert_eq!(pager.next().await, Outcome::Unavailable);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
    assert_eq!(pager.page_number(), Some(2));
}

#[tokio::test]
async fn next_before_any_load_is_unavailable() {
    let mock_server = MockServer::start().await;
    let pager = pager(&mock_server);
    assert_eq!(pager.next().await, Outcome::Unavailable);
    assert_eq!(pager.previous().await, Outcome::Unavailable);
    assert!(matches!(pager.state(), LoadState::Idle));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn slow_stale_response_is_discarded() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server, Some(Duration::from_millis(500))).await;
    let pager = pager(&mock_server);
    pager.load_first().await;

    // "Next" is slow; the user resets to the first page before it answers.
    let (next, first) = tokio::join!(pager.next(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        pager.load_first().await
    });

    assert_eq!(first, Outcome::Loaded);
    assert_eq!(next, Outcome::Stale);
    assert_eq!(pager.page_number(), Some(1));
    assert_eq!(pager.current().unwrap().items()[0].id.as_str(), "1");
}

#[tokio::test]
async fn failure_is_shown_and_does_not_block_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/finance/fund-transfers/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_two_pages(&mock_server, None).await;
    let pager = pager(&mock_server);

    assert_eq!(
        pager.load_first().await,
        Outcome::Failed(SERVER_ERROR_MESSAGE.to_string())
    );
    assert_eq!(pager.status_line(), SERVER_ERROR_MESSAGE);
    assert!(!pager.can_next());

    assert_eq!(pager.load_first().await, Outcome::Loaded);
    assert!(pager.can_next());
}

#[tokio::test]
async fn failed_next_can_be_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/finance/fund-transfers/"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_two_pages(&mock_server, None).await;
    let pager = pager(&mock_server);
    pager.load_first().await;

    assert_eq!(
        pager.next().await,
        Outcome::Failed(SERVER_ERROR_MESSAGE.to_string())
    );
    assert_eq!(pager.status_line(), SERVER_ERROR_MESSAGE);
    assert!(pager.can_next());
    assert_eq!(pager.current().unwrap().len(), 10);

    assert_eq!(pager.next().await, Outcome::Loaded);
    assert_eq!(pager.page_number(), Some(2));
    assert_eq!(pager.status_line(), "Page 2 of 2 (15 records)");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn reload_fetches_displayed_page_again() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server, None).await;
    let pager = pager(&mock_server);

    assert_eq!(pager.reload().await, Outcome::Loaded);
    assert_eq!(pager.page_number(), Some(1));

    pager.next().await;
    assert_eq!(pager.reload().await, Outcome::Loaded);
    assert_eq!(pager.page_number(), Some(2));
    assert_eq!(pager.current().unwrap().len(), 5);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert!(!requests[0].url.query().unwrap_or("").contains("offset"));
    assert_eq!(requests[2].url.query(), Some("limit=10&offset=10"));
}

#[tokio::test]
async fn restored_cursor_has_unknown_page_number() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server, None).await;
    let pager = pager(&mock_server);
    let cursor = Cursor::restore(&format!(
        "{}/finance/fund-transfers/?limit=10&offset=10",
        mock_server.uri()
    ))
    .unwrap();

    assert_eq!(pager.open_cursor(cursor).await, Outcome::Loaded);
    assert_eq!(pager.page_number(), None);
    assert_eq!(pager.status_line(), "Page ? of 2 (15 records)");

    assert_eq!(pager.previous().await, Outcome::Loaded);
    assert_eq!(pager.page_number(), None);
    assert_eq!(pager.status_line(), "Page ? of 2 (15 records)");
}

#[tokio::test]
async fn local_status_filter_only_filters_current_page() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server, None).await;
    let pager = pager(&mock_server).with_local_filter(|t: &FundTransfer| t.has_status("approved"));

    pager.load_first().await;
    let page = pager.current().unwrap();
    let ids: Vec<&str> = page.items().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "6", "9"]);
    assert_eq!(page.total_count(), 15);
    assert!(pager.can_next());

    pager.next().await;
    let ids: Vec<String> = pager
        .current()
        .unwrap()
        .items()
        .iter()
        .map(|t| t.id.to_string())
        .collect();
    assert_eq!(ids, vec!["12", "15"]);
}

#[tokio::test]
async fn filters_are_sent_without_blanks() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/finance/remittances/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "results": []})))
        .mount(&mock_server)
        .await;
    let client = Client::new(&mock_server.uri(), None).unwrap();
    let mut pager: Pager<FundTransfer> = Pager::new(
        client.pages().clone(),
        client.endpoint(Resource::Remittances),
        Filters::new().with("church", "4").with("status", ""),
    );

    assert_eq!(pager.load_first().await, Outcome::Loaded);
    assert_eq!(pager.status_line(), "No records found.");

    pager.set_query(Filters::new().with("zone", "2"));
    pager.load_first().await;

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("church=4"));
    assert_eq!(requests[1].url.query(), Some("zone=2"));
}
