//! Execution tests for participant dialing and transfer.
//!
//! Uses wiremock to mock the control plane, including SIP-level call
//! failures reported alongside the HTTP error.

use std::time::Duration;

use sipctl::{
    CreateSipParticipantRequest, SipClient, SipError, SipParticipant,
    TransferSipParticipantRequest, DEFAULT_DIAL_DEADLINE,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dial_request() -> CreateSipParticipantRequest {
    CreateSipParticipantRequest {
        sip_trunk_id: "ST_3".to_string(),
        sip_call_to: "+15105550100".to_string(),
        room_name: "ops".to_string(),
        participant_identity: "caller-1".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_participant_returns_call_info() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "sip_trunk_id": "ST_3",
        "sip_call_to": "+15105550100",
        "room_name": "ops",
        "participant_identity": "caller-1"
    });

    let info = serde_json::json!({
        "sip_call_id": "SCL_1001",
        "participant_id": "PA_1002",
        "participant_identity": "caller-1",
        "room_name": "ops"
    });

    Mock::given(method("POST"))
        .and(path("/sip/participants"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&info))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let participant = SipParticipant::create(&client, &dial_request(), DEFAULT_DIAL_DEADLINE)
        .await
        .unwrap();

    assert_eq!(participant.sip_call_id, "SCL_1001");
    assert_eq!(participant.room_name, "ops");
}

#[tokio::test]
async fn test_rejected_dial_surfaces_sip_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sip/participants"))
        .respond_with(ResponseTemplate::new(502).set_body_json(serde_json::json!({
            "sip_status_code": 486,
            "sip_status": "Busy Here"
        })))
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let err = SipParticipant::create(&client, &dial_request(), DEFAULT_DIAL_DEADLINE)
        .await
        .unwrap_err();

    match err {
        SipError::SipStatus { code, status } => {
            assert_eq!(code, 486);
            assert_eq!(status, "Busy Here");
        }
        other => panic!("Expected SipStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dial_deadline_cuts_off_slow_answer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sip/participants"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"sip_call_id": "SCL_1"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let err = SipParticipant::create(&client, &dial_request(), Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(matches!(err, SipError::Http(_)));
}

#[tokio::test]
async fn test_transfer_participant() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "room_name": "ops",
        "participant_identity": "caller-1",
        "transfer_to": "tel:+15105550199",
        "play_dialtone": true
    });

    Mock::given(method("POST"))
        .and(path("/sip/participants/transfer"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let req = TransferSipParticipantRequest {
        room_name: "ops".to_string(),
        participant_identity: "caller-1".to_string(),
        transfer_to: "tel:+15105550199".to_string(),
        play_dialtone: true,
    };

    SipParticipant::transfer(&client, &req).await.unwrap();
}
