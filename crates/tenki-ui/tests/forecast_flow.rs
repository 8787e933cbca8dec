//! End-to-end tests of catalog loading, selection and dumping against a mock
//! JMA server.

use std::time::Duration;

use serde_json::json;
use tenki_core::{DebugConfig, JmaConfig};
use tenki_jma::{JmaClient, JmaEndpoints, Reading, UNAVAILABLE};
use tenki_ui::{
    dump_last, fetch_selection, load_catalog, select_region, AppState, Display, DumpOutcome,
    Terminal,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> JmaClient {
    let endpoints = JmaEndpoints {
        area_url: format!("{}/common/const/area.json", server.uri()),
        forecast_url_template: format!(
            "{}/forecast/data/forecast/{{code}}.json",
            server.uri()
        ),
    };
    JmaClient::new(endpoints, None).unwrap()
}

fn area_json() -> serde_json::Value {
    json!({
        "centers": {"010100": {"name": "北海道地方"}},
        "offices": {
            "130000": {"name": "東京都", "enName": "Tokyo", "officeName": "気象庁"},
            "270000": {"name": "大阪府", "enName": "Osaka", "officeName": "大阪管区気象台"}
        }
    })
}

fn tokyo_forecast() -> serde_json::Value {
    json!([{
        "publishingOffice": "気象庁",
        "reportDatetime": "2024-05-01T17:00:00+09:00",
        "timeSeries": [
            {
                "timeDefines": [
                    "2024-05-01T17:00:00+09:00",
                    "2024-05-02T00:00:00+09:00",
                    "2024-05-03T00:00:00+09:00"
                ],
                "areas": [{
                    "area": {"name": "東京地方", "code": "130010"},
                    "weatherCodes": ["100", "200", "300"],
                    "weathers": ["晴れ", "くもり", "雨"],
                    "winds": ["北の風", "南の風", "東の風"]
                }]
            },
            {
                "timeDefines": ["2024-05-01T18:00:00+09:00"],
                "areas": [{"area": {"name": "東京地方"}, "pops": ["0"]}]
            },
            {
                "timeDefines": ["2024-05-01T09:00:00+09:00"],
                "areas": [{"area": {"name": "東京"}, "temps": ["12", "22", "13"]}]
            }
        ]
    }])
}

async fn mount_area(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/common/const/area.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(area_json()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_catalog_failure_leaves_nothing_selectable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/common/const/area.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let catalog = load_catalog(&client_for(&server)).await;

    assert!(catalog.is_empty());
    assert_eq!(
        tenki_ui::view::render_regions(&catalog, None),
        "No regions available.\n"
    );
}

#[tokio::test]
async fn test_select_region_shows_forecast() {
    let server = MockServer::start().await;
    mount_area(&server).await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/130000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokyo_forecast()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = AppState::new(load_catalog(&client).await);
    assert_eq!(state.catalog().len(), 2);

    let tokyo = state.catalog().get_index(0).cloned().unwrap();
    assert!(select_region(&mut state, &client, tokyo).await);

    let Display::Forecast(view) = state.display() else {
        panic!("expected a forecast, got {:?}", state.display());
    };
    assert_eq!(view.report.days.len(), 3);
    assert_eq!(view.report.days[0].max_temperature.as_option(), Some("22"));
    assert_eq!(view.report.days[0].min_temperature.as_option(), Some("12"));
    assert_eq!(view.report.days[1].min_temperature.as_option(), Some("13"));
    assert_eq!(view.report.days[1].max_temperature, Reading::Unavailable);
    assert_eq!(view.report.days[2].min_temperature, Reading::Unavailable);

    let text = tenki_ui::view::render_display(state.display());
    assert!(text.contains("High: 22°C  Low: 12°C"));
    assert!(text.contains(&format!("High: {}  Low: 13°C", UNAVAILABLE)));
}

#[tokio::test]
async fn test_missing_forecast_is_unavailable() {
    let server = MockServer::start().await;
    mount_area(&server).await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/270000.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = AppState::new(load_catalog(&client).await);
    let osaka = state.catalog().get_index(1).cloned().unwrap();

    assert!(select_region(&mut state, &client, osaka).await);
    assert!(matches!(state.display(), Display::Unavailable { .. }));

    let text = tenki_ui::view::render_display(state.display());
    assert!(text.contains("forecast unavailable"));
}

#[tokio::test]
async fn test_garbage_forecast_is_parse_error() {
    let server = MockServer::start().await;
    mount_area(&server).await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/130000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = AppState::new(load_catalog(&client).await);
    let tokyo = state.catalog().get_index(0).cloned().unwrap();

    select_region(&mut state, &client, tokyo).await;

    let text = tenki_ui::view::render_display(state.display());
    assert!(text.contains("parse error occurred"));
}

#[tokio::test]
async fn test_overlapping_selections_keep_the_latest() {
    let server = MockServer::start().await;
    mount_area(&server).await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/130000.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tokyo_forecast())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/270000.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = AppState::new(load_catalog(&client).await);
    let tokyo = state.catalog().get_index(0).cloned().unwrap();
    let osaka = state.catalog().get_index(1).cloned().unwrap();

    // Tokyo is picked first, then Osaka before Tokyo's forecast has arrived
    let first = state.begin_selection();
    let second = state.begin_selection();
    let (slow, fast) = tokio::join!(
        fetch_selection(&client, first, tokyo),
        fetch_selection(&client, second, osaka)
    );

    assert!(state.apply(fast));
    assert!(!state.apply(slow), "the older selection must not overwrite the newer one");
    assert!(matches!(
        state.display(),
        Display::Unavailable { region, .. } if region.code.as_str() == "270000"
    ));
    assert!(state.last_document().is_none());
}

#[tokio::test]
async fn test_dump_after_selection() {
    let server = MockServer::start().await;
    mount_area(&server).await;
    Mock::given(method("GET"))
        .and(path("/forecast/data/forecast/130000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokyo_forecast()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let debug = DebugConfig {
        dump_enabled: true,
        dump_file: dir.path().join("forecast_dump.json"),
    };

    let client = client_for(&server);
    let mut state = AppState::new(load_catalog(&client).await);
    let tokyo = state.catalog().get_index(0).cloned().unwrap();
    select_region(&mut state, &client, tokyo).await;

    assert_eq!(
        dump_last(&state, &debug),
        DumpOutcome::Written(debug.dump_file.clone())
    );
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&debug.dump_file).unwrap()).unwrap();
    assert_eq!(written, tokyo_forecast());
}

#[test]
fn test_terminal_session() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        mount_area(&server).await;
        Mock::given(method("GET"))
            .and(path("/forecast/data/forecast/130000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokyo_forecast()))
            .mount(&server)
            .await;
        server
    });

    let client = client_for(&server);
    let mut state = AppState::new(runtime.block_on(load_catalog(&client)));
    let debug = DebugConfig {
        dump_enabled: false,
        ..DebugConfig::default()
    };

    let input = "list osaka\ntokyo\ndump\nnagoya\nquit\n";
    let mut output = Vec::new();
    Terminal::new(&runtime, &client, &debug, input.as_bytes(), &mut output)
        .run(&mut state)
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("   1. 130000  東京都 (Tokyo)"));
    assert!(text.contains("   2. 270000  大阪府 (Osaka)"));
    assert!(text.contains("Region: 東京都 (Tokyo)"));
    assert!(text.contains("Reported: 2024-05-01 17:00 by 気象庁"));
    assert!(text.contains("Debug dump is disabled."));
    assert!(text.contains("No region matches \"nagoya\""));
    assert!(matches!(state.display(), Display::Forecast(_)));
}

#[test]
fn test_terminal_stops_at_end_of_input() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let client = JmaClient::new(JmaEndpoints::from(&JmaConfig::default()), None).unwrap();
    let mut state = AppState::default();
    let debug = DebugConfig::default();

    let mut output = Vec::new();
    Terminal::new(&runtime, &client, &debug, "help\n1\n".as_bytes(), &mut output)
        .run(&mut state)
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("No regions available.\n"));
    assert!(text.contains("list [filter]"));
    assert_eq!(state.display(), &Display::Idle);
}
