// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transport and the accessory using wiremock.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use syno_homemode::command::{HomeModeCommand, InfoQueryCommand, LoginCommand};
use syno_homemode::response::ApiSpec;
use syno_homemode::protocol::{HttpClient, Protocol};
use syno_homemode::{Error, HomeMode, HomeModeConfig, LookupState, ProtocolError};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn discovery_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {
            "SYNO.API.Auth": {"path": "auth.cgi", "maxVersion": 3},
            "SYNO.SurveillanceStation.HomeMode": {"path": "home.cgi", "maxVersion": 2}
        }
    })
}

async fn mount_discovery(mock_server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/webapi/query.cgi"))
        .and(query_param("api", "SYNO.API.Info"))
        .and(query_param("method", "Query"))
        .and(query_param("version", "1"))
        .and(query_param(
            "query",
            "SYNO.API.Auth,SYNO.SurveillanceStation.HomeMode",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(mock_server)
        .await;
}

async fn mount_login(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/webapi/auth.cgi"))
        .and(query_param("api", "SYNO.API.Auth"))
        .and(query_param("method", "login"))
        .and(query_param("version", "3"))
        .and(query_param("account", "homebridge"))
        .and(query_param("passwd", "s3cret&more"))
        .and(query_param("session", "SurveillanceStation"))
        .and(query_param("format", "sid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"sid": "abc123"}
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

async fn mount_home_mode(
    mock_server: &MockServer,
    home_mode_method: &str,
    response: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path("/webapi/home.cgi"))
        .and(query_param("api", "SYNO.SurveillanceStation.HomeMode"))
        .and(query_param("method", home_mode_method))
        .and(query_param("version", "2"))
        .and(query_param("_sid", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(mock_server)
        .await;
}

fn config(mock_server: &MockServer) -> HomeModeConfig {
    HomeModeConfig::new(mock_server.uri()).with_credentials("homebridge", "s3cret&more")
}

/// Counts `ERROR` events emitted while installed as the default subscriber.
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_errors() -> (Arc<AtomicUsize>, tracing::subscriber::DefaultGuard) {
    let errors = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(Arc::clone(&errors)));
    let guard = tracing::subscriber::set_default(subscriber);
    (errors, guard)
}

type Recorded = Arc<Mutex<Vec<String>>>;

/// Records every event, at any level, as `name=value` pairs.
struct EventRecorder(Recorded);

struct FieldWriter(String);

impl tracing::field::Visit for FieldWriter {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

impl<S: tracing::Subscriber> Layer<S> for EventRecorder {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut writer = FieldWriter(String::new());
        event.record(&mut writer);
        self.0.lock().unwrap().push(writer.0);
    }
}

fn record_events() -> (Recorded, tracing::subscriber::DefaultGuard) {
    let events = Recorded::default();
    let subscriber = tracing_subscriber::registry().with(EventRecorder(Arc::clone(&events)));
    let guard = tracing::subscriber::set_default(subscriber);
    (events, guard)
}

// ============================================================================
// HttpClient Tests
// ============================================================================

mod http_client {
    use super::*;

    #[tokio::test]
    async fn send_info_query() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;

        let client = HttpClient::new(mock_server.uri()).unwrap();
        let response = client
            .send_command(&InfoQueryCommand::default())
            .await
            .unwrap();

        assert!(response.body().contains("auth.cgi"));
    }

    #[tokio::test]
    async fn server_error_is_a_connection_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri()).unwrap();
        let result = client.send_command(&InfoQueryCommand::default()).await;

        match result {
            Err(ProtocolError::ConnectionFailed(message)) => assert!(message.contains("500")),
            other => panic!("expected connection failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_keeps_response_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_string(r#"{"success":false,"error":{"code":100}}"#),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri()).unwrap();
        let result = client.send_command(&InfoQueryCommand::default()).await;

        match result {
            Err(ProtocolError::ConnectionFailed(message)) => {
                assert!(message.contains("502"));
                assert!(message.contains(r#""error":{"code":100}"#));
            }
            other => panic!("expected connection failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_error_body_is_not_kept() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/webapi/auth.cgi"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string(r#"{"data":{"sid":"abc123"}}"#),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri()).unwrap();
        let spec = ApiSpec::new("auth.cgi", 3);
        let result = client
            .send_command(&LoginCommand::new(&spec, "homebridge", "s3cret&more"))
            .await;

        match result {
            Err(ProtocolError::ConnectionFailed(message)) => {
                assert!(message.contains("500"));
                assert!(!message.contains("abc123"));
            }
            other => panic!("expected connection failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_an_http_error() {
        let client = HttpClient::new("http://127.0.0.1:1").unwrap();
        let result = client.send_command(&InfoQueryCommand::default()).await;
        assert!(matches!(result, Err(ProtocolError::Http(_))));
    }
}

// ============================================================================
// Accessory Tests
// ============================================================================

mod accessory {
    use super::*;

    #[tokio::test]
    async fn get_state_scenario() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        mount_home_mode(
            &mock_server,
            "GetInfo",
            serde_json::json!({"success": true, "data": {"on": true}}),
        )
        .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        assert!(home_mode.get_state().await);

        let requests = mock_server.received_requests().await.unwrap();
        let last = requests.last().unwrap();
        assert_eq!(last.url.path(), "/webapi/home.cgi");
        assert_eq!(
            last.url.query(),
            Some("api=SYNO.SurveillanceStation.HomeMode&method=GetInfo&version=2&_sid=abc123")
        );

        let client = HttpClient::new(mock_server.uri()).unwrap();
        let spec = home_mode
            .info()
            .await
            .unwrap()
            .spec("SYNO.SurveillanceStation.HomeMode")
            .unwrap()
            .clone();
        assert_eq!(
            client.build_url(&HomeModeCommand::get_info(&spec, "abc123")),
            format!(
                "{}/webapi/home.cgi?api=SYNO.SurveillanceStation.HomeMode&method=GetInfo&version=2&_sid=abc123",
                mock_server.uri()
            )
        );
    }

    #[tokio::test]
    async fn discovery_returns_both_apis() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        let info = home_mode.info().await.unwrap();

        assert_eq!(info.len(), 2);
        assert_eq!(info.spec("SYNO.API.Auth").unwrap().path(), "auth.cgi");
        assert_eq!(
            info.spec("SYNO.SurveillanceStation.HomeMode")
                .unwrap()
                .max_version(),
            2
        );
        assert_eq!(home_mode.sid().await.unwrap(), "abc123");
    }

    #[tokio::test]
    async fn set_state_sends_flag_and_returns_remote_state() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        Mock::given(method("GET"))
            .and(path("/webapi/home.cgi"))
            .and(query_param("method", "Switch"))
            .and(query_param("on", "false"))
            .and(query_param("_sid", "abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"on": true}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        assert!(home_mode.set_state(false).await);
    }

    #[tokio::test]
    async fn rejected_switch_reports_actual_state() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        mount_home_mode(
            &mock_server,
            "Switch",
            serde_json::json!({"data": {"on": false}}),
        )
        .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        assert!(!home_mode.set_state(true).await);

        let requests = mock_server.received_requests().await.unwrap();
        let switch = requests.last().unwrap();
        assert!(switch.url.query().unwrap().contains("&on=true&_sid=abc123"));
    }

    #[tokio::test]
    async fn session_is_reused_across_calls() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        mount_home_mode(&mock_server, "GetInfo", serde_json::json!({"data": {"on": true}}))
            .await;
        mount_home_mode(&mock_server, "Switch", serde_json::json!({"data": {"on": true}}))
            .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        for _ in 0..4 {
            assert!(home_mode.get_state().await);
            assert!(home_mode.set_state(true).await);
        }

        assert_eq!(home_mode.sid().await.unwrap(), "abc123");
        assert_eq!(home_mode.lookup_state(), LookupState::Ready);
        mock_server.verify().await;
    }

    #[tokio::test]
    async fn discovery_without_data_resolves_false() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, serde_json::json!({"success": true})).await;
        Mock::given(path("/webapi/auth.cgi"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        let (get, set) = tokio::join!(home_mode.get_state(), home_mode.set_state(true));

        assert!(!get);
        assert!(!set);
        assert!(matches!(home_mode.info().await, Err(Error::Lookup(_))));
        assert_eq!(home_mode.lookup_state(), LookupState::Failed);
        mock_server.verify().await;
    }

    #[tokio::test]
    async fn refused_connection_logs_one_error_and_resolves_false() {
        let (errors, _guard) = count_errors();

        let home_mode = HomeMode::new(&HomeModeConfig::new("http://127.0.0.1:1")).unwrap();
        assert!(!home_mode.get_state().await);
        assert_eq!(errors.load(Ordering::SeqCst), 1);

        assert!(!home_mode.set_state(true).await);
        assert_eq!(errors.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn login_timeout_does_not_expose_password() {
        let (events, _guard) = record_events();
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        Mock::given(method("GET"))
            .and(path("/webapi/auth.cgi"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": {"sid": "abc123"}}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let config = config(&mock_server).with_timeout(Duration::from_millis(300));
        let home_mode = HomeMode::new(&config).unwrap();

        let err = home_mode.try_get_state().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Lookup(ref cause) if matches!(**cause, Error::Protocol(ProtocolError::Http(_)))
        ));
        let message = err.to_string();
        assert!(!message.contains("s3cret"), "{message}");
        assert!(!message.contains("passwd"), "{message}");

        assert!(!home_mode.get_state().await);
        let events = events.lock().unwrap();
        assert!(events.iter().any(|e| e.contains("Home Mode request failed")));
        assert!(events.iter().all(|e| !e.contains("s3cret")));
    }

    #[tokio::test]
    async fn sub_second_timeout_reaches_healthy_nas() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        mount_home_mode(&mock_server, "GetInfo", serde_json::json!({"data": {"on": true}}))
            .await;

        let config = config(&mock_server).with_timeout(Duration::from_millis(500));
        let home_mode = HomeMode::new(&config).unwrap();

        assert!(home_mode.try_get_state().await.unwrap());
    }

    #[tokio::test]
    async fn session_id_is_not_logged() {
        let (events, _guard) = record_events();
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        mount_home_mode(&mock_server, "GetInfo", serde_json::json!({"data": {"on": true}}))
            .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        assert!(home_mode.get_state().await);

        let events = events.lock().unwrap();
        assert!(
            events
                .iter()
                .any(|e| e.contains("Received Web API response"))
        );
        assert!(events.iter().all(|e| !e.contains("abc123")));
        assert!(events.iter().all(|e| !e.contains("s3cret")));
    }

    #[tokio::test]
    async fn home_mode_failure_keeps_accessory_usable() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        Mock::given(method("GET"))
            .and(path("/webapi/home.cgi"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        mount_home_mode(&mock_server, "GetInfo", serde_json::json!({"data": {"on": true}}))
            .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        assert!(!home_mode.get_state().await);
        assert!(home_mode.get_state().await);
    }

    #[tokio::test]
    async fn malformed_body_resolves_false() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        Mock::given(method("GET"))
            .and(path("/webapi/home.cgi"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&mock_server)
            .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        assert!(!home_mode.get_state().await);
        assert!(matches!(
            home_mode.try_get_state().await,
            Err(Error::Parse(_))
        ));
    }

    #[tokio::test]
    async fn expired_session_is_not_renewed() {
        let mock_server = MockServer::start().await;
        mount_discovery(&mock_server, discovery_body()).await;
        mount_login(&mock_server).await;
        mount_home_mode(
            &mock_server,
            "GetInfo",
            serde_json::json!({"success": false, "error": {"code": 119}}),
        )
        .await;

        let home_mode = HomeMode::new(&config(&mock_server)).unwrap();
        assert!(!home_mode.get_state().await);
        assert!(!home_mode.get_state().await);

        match home_mode.try_get_state().await {
            Err(Error::Api(api)) => assert!(api.is_session_error()),
            other => panic!("expected API error, got {other:?}"),
        }
        // mount_login expects exactly one login
        mock_server.verify().await;
    }
}
