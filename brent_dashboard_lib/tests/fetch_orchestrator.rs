use std::time::Duration;

use brent_dashboard_lib::{
    build_chart, validation, DashboardConfig, DashboardError, DateRange, FetchFailure,
    FetchState, ReentryPolicy, RetryConfig, ViewSession, CANCELLED_REASON,
};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRICES: &str = include_str!("../../brent_api/tests/fixtures/prices.json");
const CHANGE_POINT: &str = include_str!("../../brent_api/tests/fixtures/change_point.json");
const EVENTS: &str = include_str!("../../brent_api/tests/fixtures/events.json");
const STATS: &str = include_str!("../../brent_api/tests/fixtures/stats.json");
const NULL_DATA: &str = include_str!("../../brent_api/tests/fixtures/null_data.json");

fn session(server: &MockServer) -> ViewSession {
    ViewSession::new(&DashboardConfig::for_base_url(&server.uri()).with_retry(RetryConfig::disabled()))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn range_from(start: &str) -> DateRange {
    validation::validate_range(Some(start), None, today()).unwrap()
}

async fn mount_fixtures(server: &MockServer) {
    for (route, body) in [
        ("/prices", PRICES),
        ("/change-point", CHANGE_POINT),
        ("/events", EVENTS),
        ("/stats", STATS),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }
}

/// Mounts a complete, distinguishable view for requests whose `start` is
/// `start_param`. Every facet carries `tag` so mixtures are detectable.
async fn mount_tagged_view(
    server: &MockServer,
    start_param: &str,
    tag: &str,
    prices_delay: Option<Duration>,
) {
    let mut prices = ResponseTemplate::new(200).set_body_json(json!({
        "data": [{ "Date": "2020-01-01", "Log_Return": if tag == "A" { -1.0 } else { 1.0 } }]
    }));
    if let Some(delay) = prices_delay {
        prices = prices.set_delay(delay);
    }
    Mock::given(method("GET"))
        .and(path("/prices"))
        .and(query_param("start", start_param))
        .respond_with(prices)
        .mount(server)
        .await;

    let bodies = [
        ("/change-point", json!({ "data": { "change_date": if tag == "A" { "2020-01-01" } else { "2021-01-01" } } })),
        ("/events", json!({ "data": [{ "Start Date": "2020-01-01", "Event": tag }] })),
        ("/stats", json!({ "data": { "volatility": if tag == "A" { 0.1 } else { 0.2 }, "average_change": null } })),
    ];
    for (route, body) in bodies {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("start", start_param))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn full_view_becomes_ready() {
    let server = MockServer::start().await;
    mount_fixtures(&server).await;

    let session = session(&server);
    let view = session.fetch_view(&DateRange::unbounded()).await.unwrap();

    assert_eq!(view.prices.len(), 3);
    assert_eq!(
        view.change_point.unwrap().date,
        Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap()
    );
    assert_eq!(view.events.len(), 3);
    assert_eq!(view.stats.data_points, Some(3));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.state.view(), Some(&view));

    let spec = build_chart(&view);
    assert_eq!(spec.point_count(), 3);
    assert_eq!(spec.annotations.len(), 1);
    let hovered = Utc.with_ymd_and_hms(2020, 1, 2, 23, 0, 0).unwrap();
    assert_eq!(spec.find_event(hovered), Some("OPEC cut"));
    assert_eq!(spec.stats[0].value, "0.1235");
}

#[tokio::test]
async fn same_range_params_go_to_all_four_resources() {
    let server = MockServer::start().await;
    for (route, body) in [
        ("/prices", PRICES),
        ("/change-point", CHANGE_POINT),
        ("/events", EVENTS),
        ("/stats", STATS),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("start", "2020-01-01T00:00:00.000Z"))
            .and(query_param("end", "2020-06-30T00:00:00.000Z"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let range = validation::validate_range(Some("2020-01-01"), Some("2020-06-30"), today()).unwrap();
    session(&server).fetch_view(&range).await.unwrap();
}

#[tokio::test]
async fn unbounded_range_sends_no_query_string() {
    let server = MockServer::start().await;
    mount_fixtures(&server).await;

    session(&server)
        .fetch_view(&DateRange::unbounded())
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 4);
    assert!(received.iter().all(|r| r.url.query().is_none()));
}

#[tokio::test]
async fn null_data_is_an_empty_view_not_an_error() {
    let server = MockServer::start().await;
    for route in ["/prices", "/change-point", "/events"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(NULL_DATA))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let session = session(&server);
    let view = session.fetch_view(&DateRange::unbounded()).await.unwrap();
    assert!(view.prices.is_empty());
    assert!(view.change_point.is_none());
    assert!(view.events.is_empty());
    assert!(view.stats.volatility.is_none());

    let spec = build_chart(&view);
    assert!(spec.annotations.is_empty());
    assert_eq!(spec.empty_message(), Some("No data available."));
    assert_eq!(spec.stats[0].value, "N/A");
    assert!(matches!(session.state(), FetchState::Ready(_)));
}

#[tokio::test]
async fn one_failed_resource_fails_the_whole_view() {
    let server = MockServer::start().await;
    mount_tagged_view(&server, "2020-01-01T00:00:00.000Z", "A", None).await;

    for (route, body) in [
        ("/prices", PRICES),
        ("/change-point", CHANGE_POINT),
        ("/events", EVENTS),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("start", "2021-01-01T00:00:00.000Z"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/stats"))
        .and(query_param("start", "2021-01-01T00:00:00.000Z"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let session = session(&server);
    session.fetch_view(&range_from("2020-01-01")).await.unwrap();
    assert!(session.state().view().is_some());

    let result = session.fetch_view(&range_from("2021-01-01")).await;
    assert!(matches!(result, Err(DashboardError::Api(_))));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.generation, 2);
    match snapshot.state {
        FetchState::Failed(failure) => {
            assert_eq!(failure.reason, "Request to stats failed with status 500")
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn server_message_becomes_failure_reason() {
    let server = MockServer::start().await;
    mount_fixtures(&server).await;
    Mock::given(method("GET"))
        .and(path("/prices"))
        .and(query_param("start", "2020-01-01T00:00:00.000Z"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "No data for range" })),
        )
        .with_priority(1)
        .mount(&server)
        .await;

    let session = session(&server);
    assert!(session.fetch_view(&range_from("2020-01-01")).await.is_err());
    assert_eq!(
        session.state(),
        FetchState::Failed(FetchFailure {
            reason: "No data for range".to_string()
        })
    );
}

#[tokio::test]
async fn malformed_event_date_is_rejected_at_the_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "Start Date": "sometime in spring", "Event": "Rumour" }]
        })))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_fixtures(&server).await;

    let session = session(&server);
    let err = session
        .fetch_view(&DateRange::unbounded())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Adapter { .. }));
    assert!(matches!(session.state(), FetchState::Failed(_)));
}

#[tokio::test]
async fn later_call_wins_over_slower_earlier_call() {
    let server = MockServer::start().await;
    mount_tagged_view(
        &server,
        "2020-01-01T00:00:00.000Z",
        "A",
        Some(Duration::from_millis(400)),
    )
    .await;
    mount_tagged_view(&server, "2021-01-01T00:00:00.000Z", "B", None).await;

    let session = session(&server);
    let range_a = range_from("2020-01-01");
    let range_b = range_from("2021-01-01");

    let (a, b) = tokio::join!(session.fetch_view(&range_a), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.fetch_view(&range_b).await
    });

    // The superseded call still hands its own result to its caller.
    let a = a.unwrap();
    assert_eq!(a.events[0].label, "A");
    assert_eq!(b.unwrap().events[0].label, "B");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.generation, 2);
    let view = snapshot.state.view().expect("ready").clone();
    assert_eq!(view.events[0].label, "B");
    assert_eq!(view.prices[0].log_return, 1.0);
    assert_eq!(view.stats.volatility, Some(0.2));
    assert_eq!(
        view.change_point.unwrap().date,
        Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn reject_policy_refuses_overlapping_call() {
    let server = MockServer::start().await;
    mount_tagged_view(
        &server,
        "2020-01-01T00:00:00.000Z",
        "A",
        Some(Duration::from_millis(300)),
    )
    .await;
    mount_tagged_view(&server, "2021-01-01T00:00:00.000Z", "B", None).await;

    let session = ViewSession::new(
        &DashboardConfig::for_base_url(&server.uri())
            .with_retry(RetryConfig::disabled())
            .with_reentry(ReentryPolicy::Reject),
    );
    let range_a = range_from("2020-01-01");
    let range_b = range_from("2021-01-01");

    let (a, b) = tokio::join!(session.fetch_view(&range_a), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.fetch_view(&range_b).await
    });

    assert!(a.is_ok());
    assert!(matches!(b, Err(DashboardError::Busy)));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.state.view().unwrap().events[0].label, "A");
}

#[tokio::test]
async fn timed_out_fetch_does_not_block_the_next_one() {
    let server = MockServer::start().await;
    mount_tagged_view(
        &server,
        "2020-01-01T00:00:00.000Z",
        "A",
        Some(Duration::from_millis(500)),
    )
    .await;
    mount_tagged_view(&server, "2021-01-01T00:00:00.000Z", "B", None).await;

    let session = ViewSession::new(
        &DashboardConfig::for_base_url(&server.uri())
            .with_retry(RetryConfig::disabled())
            .with_reentry(ReentryPolicy::Reject),
    );

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        session.fetch_view(&range_from("2020-01-01")),
    )
    .await;
    assert!(timed_out.is_err());
    assert_eq!(
        session.state(),
        FetchState::Failed(FetchFailure {
            reason: CANCELLED_REASON.to_string()
        })
    );

    let view = session.fetch_view(&range_from("2021-01-01")).await.unwrap();
    assert_eq!(view.events[0].label, "B");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.generation, 2);
    assert!(snapshot.state.view().is_some());
}

#[tokio::test]
async fn transient_failure_is_retried_inside_one_retrieval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_fixtures(&server).await;

    let session = ViewSession::new(&DashboardConfig::for_base_url(&server.uri()).with_retry(
        RetryConfig {
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
        },
    ));
    let view = session.fetch_view(&DateRange::unbounded()).await.unwrap();
    assert_eq!(view.stats.volatility, Some(0.123456));
    assert_eq!(session.snapshot().generation, 1);
}

#[tokio::test]
async fn subscribers_see_whole_snapshots() {
    let server = MockServer::start().await;
    mount_fixtures(&server).await;

    let session = session(&server);
    let mut rx = session.subscribe();
    assert_eq!(rx.borrow().state, FetchState::Idle);

    session
        .fetch_view(&DateRange::unbounded())
        .await
        .unwrap();

    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.state.view().unwrap().prices.len(), 3);
}
