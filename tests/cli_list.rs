//! Execution tests for the list flow.
//!
//! Uses wiremock to mock the control plane and verify query parameters and
//! page envelope handling.

use sipctl::{
    DispatchRuleListQuery, List, SipClient, SipDispatchRule, SipInboundTrunk, SipOutboundTrunk,
    TrunkListQuery,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_inbound_trunks_returns_page() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "items": [
            {
                "sip_trunk_id": "ST_1",
                "name": "front-desk",
                "numbers": ["+15105550100"]
            },
            {
                "sip_trunk_id": "ST_2",
                "name": "carrier-a",
                "auth_username": "carrier",
                "auth_password": "secret"
            }
        ],
        "total": 2
    });

    Mock::given(method("GET"))
        .and(path("/sip/inbound-trunks"))
        .and(query_param("page", "1"))
        .and(query_param("count", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let page = SipInboundTrunk::list_page(&client, &Default::default(), 1, 20)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "front-desk");
    assert_eq!(page.items[1].auth_username, "carrier");
    assert_eq!(page.total, Some(2));
    assert!(!page.has_more);
}

#[tokio::test]
async fn test_list_trunks_passes_number_filter() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "items": [
            {"sip_trunk_id": "ST_1", "name": "front-desk", "numbers": ["+15105550100"]}
        ],
        "total": 1
    });

    Mock::given(method("GET"))
        .and(path("/sip/inbound-trunks"))
        .and(query_param("number", "+15105550100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let query = TrunkListQuery {
        number: Some("+15105550100".to_string()),
    };
    let page = SipInboundTrunk::list_page(&client, &query, 1, 20)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_list_outbound_trunks_parses_transport() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "items": [
            {
                "sip_trunk_id": "ST_3",
                "name": "dialer",
                "address": "sip.carrier.example.com",
                "transport": "SIP_TRANSPORT_TLS"
            }
        ],
        "total": 1
    });

    Mock::given(method("GET"))
        .and(path("/sip/outbound-trunks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let page = SipOutboundTrunk::list_page(&client, &Default::default(), 1, 20)
        .await
        .unwrap();

    assert_eq!(page.items[0].transport.short_name(), "TLS");
}

#[tokio::test]
async fn test_list_dispatch_rules_with_trunk_filter() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "items": [
            {
                "sip_dispatch_rule_id": "SDR_1",
                "name": "lobby",
                "rule": {"dispatch_rule_direct": {"room_name": "lobby"}}
            }
        ],
        "total": 1
    });

    Mock::given(method("GET"))
        .and(path("/sip/dispatch-rules"))
        .and(query_param("trunk_id", "ST_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let query = DispatchRuleListQuery {
        trunk_id: Some("ST_1".to_string()),
    };
    let page = SipDispatchRule::list_page(&client, &query, 1, 20)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].room_pattern(), "lobby");
}

#[tokio::test]
async fn test_list_all_follows_pages() {
    let mock_server = MockServer::start().await;

    // list_all fetches 100 per page; a full first page triggers a second fetch.
    let first_items: Vec<serde_json::Value> = (0..100)
        .map(|i| serde_json::json!({"sip_trunk_id": format!("ST_{i}"), "name": format!("t{i}")}))
        .collect();

    Mock::given(method("GET"))
        .and(path("/sip/inbound-trunks"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": first_items,
            "total": 101
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sip/inbound-trunks"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"sip_trunk_id": "ST_100", "name": "t100"}],
            "total": 101
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SipClient::new("test-token", &mock_server.uri()).unwrap();
    let trunks = SipInboundTrunk::list_all(&client, &Default::default())
        .await
        .unwrap();

    assert_eq!(trunks.len(), 101);
}
