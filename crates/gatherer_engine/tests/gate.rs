mod common;

use std::time::Duration;

use common::{full_page, ScriptedTransport};
use gatherer_core::FilterCriteria;
use gatherer_engine::{
    Backoff, GateSettings, PageRequest, RequestGate, RetrievalError, Transport,
};
use pretty_assertions::assert_eq;

fn criteria() -> FilterCriteria {
    FilterCriteria::new(["CEO"], ["Acme"], Some("United States".into()), None).unwrap()
}

fn settings(delay_ms: u64, backoff_ms: u64) -> GateSettings {
    GateSettings {
        request_delay: Duration::from_millis(delay_ms),
        max_attempts: 5,
        initial_backoff: Duration::from_millis(backoff_ms),
        max_backoff: Duration::from_secs(8),
    }
}

#[test]
fn backoff_doubles_caps_and_gives_up() {
    let mut backoff = Backoff::new(&settings(0, 1000));
    let delays: Vec<_> = (0..4).map(|_| backoff.on_throttle(None)).collect();
    assert_eq!(
        delays,
        vec![
            Some(Duration::from_secs(1)),
            Some(Duration::from_secs(2)),
            Some(Duration::from_secs(4)),
            Some(Duration::from_secs(8)),
        ]
    );
    assert_eq!(backoff.on_throttle(None), None);
    assert_eq!(backoff.attempts(), 5);
}

#[test]
fn retry_after_overrides_computed_delay_but_respects_cap() {
    let mut backoff = Backoff::new(&settings(0, 1000));
    assert_eq!(
        backoff.on_throttle(Some(Duration::from_secs(3))),
        Some(Duration::from_secs(3))
    );
    assert_eq!(
        backoff.on_throttle(Some(Duration::from_secs(120))),
        Some(Duration::from_secs(8))
    );
    // The computed schedule keeps advancing underneath.
    assert_eq!(backoff.on_throttle(None), Some(Duration::from_secs(4)));
}

#[test]
fn zero_delay_still_backs_off() {
    let settings = GateSettings::with_delay(Duration::ZERO);
    assert!(settings.initial_backoff > Duration::ZERO);
    assert_eq!(
        GateSettings::with_delay(Duration::from_secs(2)).initial_backoff,
        Duration::from_secs(2)
    );
}

#[tokio::test(start_paused = true)]
async fn consecutive_requests_are_spaced_by_the_delay() {
    let criteria = criteria();
    let transport = ScriptedTransport::new()
        .page(1, full_page(1, 2))
        .page(2, full_page(2, 2));
    let mut gate = RequestGate::new(settings(750, 1000));

    for page in [1, 2] {
        let request = PageRequest {
            criteria: &criteria,
            page,
            per_page: 2,
        };
        gate.send(|| transport.search_people(&request)).await.unwrap();
    }

    let times = transport.call_times();
    assert_eq!(times.len(), 2);
    assert!(times[1] - times[0] >= Duration::from_millis(750));
}

#[tokio::test(start_paused = true)]
async fn throttled_request_is_retried_with_growing_waits() {
    let criteria = criteria();
    let transport = ScriptedTransport::new()
        .throttle(1, 2, None)
        .page(1, full_page(1, 1));
    let mut gate = RequestGate::new(settings(0, 1000));
    let request = PageRequest {
        criteria: &criteria,
        page: 1,
        per_page: 1,
    };

    let page = gate.send(|| transport.search_people(&request)).await.unwrap();
    assert_eq!(page.people.len(), 1);

    let times = transport.call_times();
    assert_eq!(transport.requested_pages(), vec![1, 1, 1]);
    let first_wait = times[1] - times[0];
    let second_wait = times[2] - times[1];
    assert!(first_wait >= Duration::from_secs(1) && first_wait < Duration::from_secs(2));
    assert!(second_wait >= Duration::from_secs(2) && second_wait < Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn backoff_state_does_not_leak_between_requests() {
    let criteria = criteria();
    let transport = ScriptedTransport::new()
        .throttle(1, 3, None)
        .page(1, full_page(1, 1))
        .throttle(2, 1, None)
        .page(2, full_page(2, 1));
    let mut gate = RequestGate::new(settings(0, 1000));

    for page in [1, 2] {
        let request = PageRequest {
            criteria: &criteria,
            page,
            per_page: 1,
        };
        gate.send(|| transport.search_people(&request)).await.unwrap();
    }

    let times = transport.call_times();
    assert_eq!(transport.requested_pages(), vec![1, 1, 1, 1, 2, 2]);
    // Page 2's first retry waits the initial backoff, not page 1's 8s.
    let page_two_wait = times[5] - times[4];
    assert!(page_two_wait >= Duration::from_secs(1) && page_two_wait < Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn persistent_throttling_exhausts_after_ceiling() {
    let criteria = criteria();
    let transport = ScriptedTransport::new().throttle(1, 10, None);
    let mut gate = RequestGate::new(settings(0, 100));
    let request = PageRequest {
        criteria: &criteria,
        page: 1,
        per_page: 1,
    };

    let err = gate
        .send(|| transport.search_people(&request))
        .await
        .unwrap_err();
    assert_eq!(err, RetrievalError::RateLimitExhausted { attempts: 5 });
    assert_eq!(transport.requested_pages().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn non_throttle_errors_are_not_retried() {
    let criteria = criteria();
    let transport = ScriptedTransport::new()
        .fail(1, RetrievalError::Transport("connection reset".into()))
        .page(1, full_page(1, 1));
    let mut gate = RequestGate::new(settings(0, 100));
    let request = PageRequest {
        criteria: &criteria,
        page: 1,
        per_page: 1,
    };

    let err = gate
        .send(|| transport.search_people(&request))
        .await
        .unwrap_err();
    assert_eq!(err, RetrievalError::Transport("connection reset".into()));
    assert_eq!(transport.requested_pages(), vec![1]);
}
