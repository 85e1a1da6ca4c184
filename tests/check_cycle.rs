//! End-to-end probe cycle tests against a canned certs document.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use envoy_certs_check::{
    CertsFetcher, CheckConfig, EnvoyCertsCheck, Error, RecordingSink, Result, ServiceCheckStatus,
    SERVICE_CHECK_NAME, TTL_METRIC_NAME,
};

const RESPONSE_FIXTURE: &str = include_str!("fixtures/response.json");

/// Fetcher that answers every request with a fixed body
struct StaticFetcher {
    body: String,
    calls: AtomicUsize,
}

impl StaticFetcher {
    fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CertsFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// Fetcher that fails every request with a fixed error constructor
struct FailingFetcher {
    timeout_secs: u64,
}

#[async_trait]
impl CertsFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        Err(Error::Timeout {
            url: url.to_string(),
            timeout_secs: self.timeout_secs,
        })
    }
}

fn config(certs_url: Option<&str>) -> CheckConfig {
    CheckConfig {
        certs_url: certs_url.map(str::to_string),
        ..CheckConfig::default()
    }
}

fn assert_gauge(sink: &RecordingSink, value: f64, tags: &[&str]) {
    let found = sink.gauges().iter().any(|g| {
        g.name == TTL_METRIC_NAME
            && g.value == value
            && g.tags == tags.iter().map(|t| t.to_string()).collect::<Vec<_>>()
    });
    assert!(
        found,
        "no gauge with value {} and tags {:?} among {:?}",
        value,
        tags,
        sink.gauges()
    );
}

#[tokio::test]
async fn test_full_cycle_over_fixture_response() {
    let fetcher = Arc::new(StaticFetcher::new(RESPONSE_FIXTURE));
    let sink = Arc::new(RecordingSink::new());
    let check = EnvoyCertsCheck::new(
        config(Some("http://fake.url:15000/certs")),
        fetcher.clone(),
        sink.clone(),
    );

    check.run().await.unwrap();

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(sink.gauges().len(), 4);

    let spiffe_id =
        "spiffe://some.trust.domain/ns/istio-system/sa/istio-ingressgateway-service-account";
    let san_tag = format!("san:{}", spiffe_id);
    let name_tag = format!("name:{}", spiffe_id);
    assert_gauge(&sink, 0.0, &[san_tag.as_str(), name_tag.as_str()]);
    assert_gauge(&sink, 105.0, &["san:*.example.com", "name:*.example.com"]);
    assert_gauge(
        &sink,
        52.0,
        &["san:*.dev.example.com", "name:*.dev.example.com"],
    );
    // The CA cert is inline and has no SANs, so it stays nameless
    assert_gauge(&sink, 2619.0, &["name:None"]);

    let checks = sink.service_checks();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].name, SERVICE_CHECK_NAME);
    assert_eq!(checks[0].status, ServiceCheckStatus::Ok);
}

#[tokio::test]
async fn test_duplicate_serials_across_groups_collapse_to_one_gauge() {
    let body = r#"{
        "certificates": [
            {
                "ca_cert": [
                    {
                        "path": "/etc/envoy/ca.pem",
                        "serial_number": "aa",
                        "days_until_expiration": 100.0
                    }
                ],
                "cert_chain": []
            },
            {
                "ca_cert": [],
                "cert_chain": [
                    {
                        "path": "/etc/envoy/renewed.pem",
                        "serial_number": "aa",
                        "days_until_expiration": 365.0
                    }
                ]
            }
        ]
    }"#;

    let fetcher = Arc::new(StaticFetcher::new(body));
    let sink = Arc::new(RecordingSink::new());
    let check = EnvoyCertsCheck::new(
        config(Some("http://fake.url:15000/certs")),
        fetcher,
        sink.clone(),
    );

    check.run().await.unwrap();

    let gauges = sink.gauges();
    assert_eq!(gauges.len(), 1);
    assert_eq!(gauges[0].value, 365.0);
    assert_gauge(
        &sink,
        365.0,
        &["path:/etc/envoy/renewed.pem", "name:/etc/envoy/renewed.pem"],
    );
}

#[tokio::test]
async fn test_missing_certs_url_makes_no_http_call() {
    let fetcher = Arc::new(StaticFetcher::new(RESPONSE_FIXTURE));
    let sink = Arc::new(RecordingSink::new());
    let check = EnvoyCertsCheck::new(config(None), fetcher.clone(), sink.clone());

    check.run().await.unwrap();

    assert_eq!(fetcher.calls(), 0);
    assert!(sink.gauges().is_empty());

    let checks = sink.service_checks();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].status, ServiceCheckStatus::Critical);
}

#[tokio::test]
async fn test_timeout_message_embeds_configured_timeout() {
    let fetcher = Arc::new(FailingFetcher { timeout_secs: 7 });
    let sink = Arc::new(RecordingSink::new());
    let check = EnvoyCertsCheck::new(
        config(Some("http://fake.url:15000/certs")),
        fetcher,
        sink.clone(),
    );

    check.run().await.unwrap();

    assert!(sink.gauges().is_empty());

    let checks = sink.service_checks();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].status, ServiceCheckStatus::Critical);

    let message = checks[0].message.as_deref().unwrap();
    assert!(message.contains("http://fake.url:15000/certs"));
    assert!(message.contains("timed out after 7 seconds"));
}
