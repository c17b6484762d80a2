use mc_sim::event_log::{append_window, push, BoundedLog};

#[test]
fn test_push_evicts_tail_at_capacity() {
    let log = vec!["e1", "e2", "e3", "e4", "e5"];
    let next = push(&log, "e0", 5);
    assert_eq!(next, vec!["e0", "e1", "e2", "e3", "e4"]);
    // input untouched
    assert_eq!(log.len(), 5);
}

#[test]
fn test_push_below_capacity_grows() {
    let log = vec![2, 1];
    assert_eq!(push(&log, 3, 5), vec![3, 2, 1]);
}

#[test]
fn test_push_length_invariant() {
    let mut log: Vec<u32> = Vec::new();
    for cap in 0..6usize {
        log.clear();
        for i in 0..12u32 {
            let before = log.len();
            log = push(&log, i, cap);
            assert_eq!(log.len(), (before + 1).min(cap));
            if cap > 0 {
                assert_eq!(log[0], i, "head must be the latest entry");
            }
        }
    }
}

#[test]
fn test_push_zero_capacity_is_empty() {
    assert!(push(&[1, 2, 3], 4, 0).is_empty());
}

#[test]
fn test_append_window_keeps_newest_oldest_first() {
    let window = vec![1, 2, 3, 4, 5, 6];
    assert_eq!(append_window(&window, 7, 6), vec![2, 3, 4, 5, 6, 7]);
    assert_eq!(append_window(&[1], 2, 6), vec![1, 2]);
    assert!(append_window(&window, 7, 0).is_empty());
}

#[test]
fn test_bounded_log_seeded_truncates() {
    let log = BoundedLog::seeded(vec![1, 2, 3, 4], 2);
    assert_eq!(log.as_slice(), &[1, 2]);
    assert_eq!(log.capacity(), 2);
}

#[test]
fn test_bounded_log_pushed_is_pure() {
    let log = BoundedLog::seeded(vec!["b", "a"], 2);
    let next = log.pushed("c");
    assert_eq!(log.as_slice(), &["b", "a"]);
    assert_eq!(next.as_slice(), &["c", "b"]);
    assert_eq!(next.head(), Some(&"c"));
}

#[test]
fn test_bounded_log_push_in_place() {
    let mut log = BoundedLog::new(3);
    for i in 0..10 {
        log.push(i);
        assert!(log.len() <= 3);
        assert_eq!(log.head(), Some(&i));
    }
    assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![9, 8, 7]);
}

#[test]
fn test_bounded_log_zero_capacity_ignores_pushes() {
    let mut log = BoundedLog::new(0);
    log.push(1);
    assert!(log.is_empty());
    assert!(log.pushed(2).is_empty());
}

#[test]
fn test_deserialized_log_respects_capacity() {
    let json = r#"{"entries":[4,3,2,1],"capacity":2}"#;
    let log: BoundedLog<u32> = serde_json::from_str(json).unwrap();
    assert_eq!(log.as_slice(), &[4, 3]);
    assert_eq!(log.capacity(), 2);

    let back = serde_json::to_string(&log).unwrap();
    assert_eq!(back, r#"{"entries":[4,3],"capacity":2}"#);
}
