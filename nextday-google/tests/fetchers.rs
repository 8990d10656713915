use mockito::{Matcher, Server};
use nextday_google::{GoogleConfig, ProviderError, Services};
use serde_json::json;

fn services(server: &Server) -> Services {
    let config = GoogleConfig {
        calendar_api_base: server.url(),
        tasks_api_base: server.url(),
        ..GoogleConfig::default()
    };
    Services::with_access_token(&config, "ya29.token")
}

#[tokio::test]
async fn test_list_calendars_sends_bearer_token() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", Matcher::Regex(r"^/users/me/calendarList".to_string()))
        .match_header("authorization", "Bearer ya29.token")
        .with_status(200)
        .with_body(
            json!({
                "kind": "calendar#calendarList",
                "items": [{ "id": "primary@example.com", "summary": "Me", "timeZone": "Europe/Kyiv", "accessRole": "owner" }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let calendars = services(&server).events.list_calendars().await.unwrap();

    mock.assert_async().await;
    assert_eq!(calendars.len(), 1);
    assert_eq!(calendars[0].time_zone, "Europe/Kyiv");
    assert_eq!(calendars[0].description, None);
}

#[tokio::test]
async fn test_calendar_id_is_percent_encoded() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock(
            "GET",
            Matcher::Regex(r"^/calendars/en\.usa%23holiday@group\.v\.calendar\.google\.com/events".to_string()),
        )
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "items": [] }).to_string())
        .expect(1)
        .create_async()
        .await;

    let events = services(&server)
        .events
        .list_events_for_calendar(
            "en.usa#holiday@group.v.calendar.google.com",
            "2024-03-15T00:00:00+00:00",
            "2024-03-15T23:59:59.999999+00:00",
            "UTC",
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_http_error_is_a_transport_failure() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", Matcher::Regex(r"^/users/me/calendarList".to_string()))
        .with_status(401)
        .with_body(json!({ "error": { "code": 401, "message": "Invalid Credentials" } }).to_string())
        .create_async()
        .await;

    let err = services(&server).events.list_calendars().await.unwrap_err();

    assert!(err.is_transport());
    match err {
        ProviderError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Invalid Credentials"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_failure() {
    // Nothing listens on port 9 (discard) on loopback in test environments
    let config = GoogleConfig {
        tasks_api_base: "http://127.0.0.1:9".to_string(),
        ..GoogleConfig::default()
    };
    let services = Services::with_access_token(&config, "t");

    let err = services
        .tasks
        .list_tasks_for_list("l1", "a", "b")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_malformed_body_is_not_a_transport_failure() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", Matcher::Regex(r"^/users/@me/lists".to_string()))
        .with_status(200)
        .with_body("<html>captive portal</html>")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = services(&server)
        .tasks
        .list_task_lists(&dir.path().join("task.json"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Decode { .. }));
    assert!(!err.is_transport());
}
