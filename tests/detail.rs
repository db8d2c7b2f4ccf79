mod common;

use common::Harness;
use reqtui::app::ModeKind;
use reqtui::domain::HttpMethod;
use reqtui::storage::Storage as _;
use reqtui::ui::{BannerKind, Body, DetailInfo};
use reqtui::{Key, ViewId};

/// Opens the first endpoint of the first collection.
fn open_detail(collections: &[(&str, &[&str])]) -> Harness {
    let mut h = Harness::seeded(collections, 10);
    h.press_settled(Key::Accept);
    h.press_settled(Key::Accept);
    assert_eq!(h.router.focused(), ViewId::EndpointDetail);
    h
}

fn detail(h: &Harness) -> DetailInfo {
    match h.viewmodel().body {
        Body::Detail(info) => info,
        other => panic!("expected detail body, got {other:?}"),
    }
}

fn stored_endpoint(h: &Harness, id: i64) -> reqtui::storage::EndpointRecord {
    h.storage.lock().unwrap().get_endpoint(id).unwrap().unwrap()
}

#[test]
fn loads_and_sends_the_saved_request() {
    let mut h = open_detail(&[("api", &["ping"])]);
    let snapshot = h.focused();
    assert!(snapshot.loaded);
    assert_eq!(snapshot.titles, vec!["ping"]);
    assert_eq!(detail(&h).placeholder.as_deref(), Some("Press s to send"));

    h.press(Key::SendRequest);
    assert_eq!(detail(&h).placeholder.as_deref(), Some("Sending..."));
    h.settle();

    let seen = h.executor.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, HttpMethod::Get);
    assert_eq!(seen[0].url, "https://api.example.test/ping");

    let info = detail(&h);
    assert_eq!(info.status, Some(("200 OK (7 ms)".to_string(), true)));
    assert!(info.placeholder.is_none());
    assert!(info.response_lines.iter().any(|line| line.contains("\"url\"")));
}

#[test]
fn edited_url_is_saved_and_used() {
    let mut h = open_detail(&[("api", &["ping"])]);
    h.press(Key::EditUrl);
    assert_eq!(h.viewmodel().input_bar.unwrap().text, "https://api.example.test/ping");

    for _ in 0.."ping".len() {
        h.press(Key::Backspace);
    }
    h.type_text("users");
    h.press_settled(Key::Accept);

    assert_eq!(h.banner_kind(), Some(BannerKind::Info));
    assert_eq!(stored_endpoint(&h, 1).url, "https://api.example.test/users");

    h.press_settled(Key::SendRequest);
    let seen = h.executor.seen.lock().unwrap();
    assert_eq!(seen.last().unwrap().url, "https://api.example.test/users");
}

#[test]
fn invalid_url_stays_in_the_editor() {
    let mut h = open_detail(&[("api", &["ping"])]);
    h.press(Key::EditUrl);
    for _ in 0.."https://api.example.test/ping".len() {
        h.press(Key::Backspace);
    }
    h.type_text("ftp://files.example.test");
    h.press(Key::Accept);

    assert_eq!(h.pending(), 0);
    assert_eq!(h.focused().mode, ModeKind::Editing);
    assert!(h.viewmodel().input_bar.unwrap().error.is_some());
    assert_eq!(stored_endpoint(&h, 1).url, "https://api.example.test/ping");
}

#[test]
fn method_cycles_and_headers_are_added() {
    let mut h = open_detail(&[("api", &["ping"])]);
    h.press_settled(Key::CycleMethod);
    assert_eq!(stored_endpoint(&h, 1).method, HttpMethod::Post);

    h.press(Key::AddHeader);
    h.type_text("Accept: application/json");
    h.press_settled(Key::Accept);
    let headers = stored_endpoint(&h, 1).headers;
    assert_eq!(headers.get("Accept").map(String::as_str), Some("application/json"));

    h.press_settled(Key::SendRequest);
    let seen = h.executor.seen.lock().unwrap();
    assert_eq!(seen[0].method, HttpMethod::Post);
    assert_eq!(seen[0].headers.len(), 1);
}

#[test]
fn vanished_endpoint_returns_to_the_list() {
    let mut h = open_detail(&[("api", &["ping", "pong"])]);
    h.storage.lock().unwrap().delete_endpoint(1).unwrap();

    h.press_settled(Key::Refresh);

    assert_eq!(h.router.focused(), ViewId::Endpoints);
    assert!(h
        .router
        .banner()
        .is_some_and(|b| b.kind == BannerKind::Error && b.message.contains("no longer exists")));
    assert_eq!(h.focused().titles, vec!["pong"]);
}

#[test]
fn response_is_cleared_when_another_endpoint_is_opened() {
    let mut h = open_detail(&[("api", &["ping", "pong"])]);
    h.press_settled(Key::SendRequest);
    assert!(detail(&h).status.is_some());

    h.press_settled(Key::Cancel);
    h.press(Key::MoveDown);
    h.press_settled(Key::Accept);

    assert_eq!(h.focused().titles, vec!["pong"]);
    assert!(detail(&h).status.is_none());
}

#[test]
fn quick_edits_are_applied_in_order() {
    let mut h = open_detail(&[("api", &["ping"])]);
    h.press(Key::CycleMethod);
    h.press(Key::CycleMethod);
    assert_eq!(h.pending(), 1);

    h.press(Key::AddHeader);
    h.type_text("A: 1");
    h.press(Key::Accept);
    h.press(Key::AddHeader);
    h.type_text("B: 2");
    h.press(Key::Accept);
    assert_eq!(h.pending(), 1);

    h.settle();

    let stored = stored_endpoint(&h, 1);
    assert_eq!(stored.method, HttpMethod::Put);
    assert_eq!(stored.headers.keys().map(String::as_str).collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(detail(&h).fields[0], ("Method".to_string(), "PUT".to_string()));
}
