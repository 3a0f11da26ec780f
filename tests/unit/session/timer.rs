use super::*;

#[test]
fn debounce_fires_once_after_deadline() {
    let start = Instant::now();
    let mut debounce = Debounce::default();
    debounce.schedule(start, Duration::from_millis(300), 7);

    assert!(debounce.is_pending());
    assert_eq!(debounce.deadline(), Some(start + Duration::from_millis(300)));
    assert_eq!(debounce.poll(start + Duration::from_millis(299)), None);
    assert_eq!(debounce.poll(start + Duration::from_millis(300)), Some(7));
    assert_eq!(debounce.poll(start + Duration::from_millis(400)), None);
    assert!(!debounce.is_pending());
}

#[test]
fn reschedule_replaces_pending_deadline() {
    let start = Instant::now();
    let mut debounce = Debounce::default();
    debounce.schedule(start, Duration::from_millis(300), 1);
    debounce.schedule(start + Duration::from_millis(200), Duration::from_millis(300), 2);

    assert_eq!(debounce.poll(start + Duration::from_millis(350)), None);
    assert_eq!(debounce.poll(start + Duration::from_millis(500)), Some(2));
}

#[test]
fn cancelled_debounce_never_fires() {
    let start = Instant::now();
    let mut debounce = Debounce::default();
    debounce.schedule(start, Duration::ZERO, 1);
    debounce.cancel();
    assert_eq!(debounce.poll(start + Duration::from_secs(1)), None);
}

#[test]
fn frame_deferred_releases_after_frames() {
    let mut deferred = FrameDeferred::default();
    deferred.schedule(2, "restore");

    assert_eq!(deferred.on_frame(), None);
    assert!(deferred.is_pending());
    assert_eq!(deferred.on_frame(), Some("restore"));
    assert_eq!(deferred.on_frame(), None);
}

#[test]
fn frame_deferred_last_writer_wins() {
    let mut deferred = FrameDeferred::default();
    deferred.schedule(2, 1);
    deferred.on_frame();
    deferred.schedule(2, 2);

    assert_eq!(deferred.on_frame(), None);
    assert_eq!(deferred.on_frame(), Some(2));
}

#[test]
fn frame_deferred_cancel() {
    let mut deferred = FrameDeferred::default();
    deferred.schedule(1, 'y');
    deferred.cancel();
    assert_eq!(deferred.on_frame(), None);
}
