//! Yearly breakdown driven through the session.

use chrono::Duration;
use pay_counter::engine::{compute_earnings, compute_progress, Tick};
use pay_counter::types::{Mode, Period};

use crate::mock_clock::{session_at, wall, ManualClock};

#[tokio::test(start_paused = true)]
async fn test_salary_refreshes_every_second() {
    let (mut counter, clock) = session_at(ManualClock::at_wall(2025, 8, 20, 10, 0, 0));
    counter.switch_mode(Mode::Yearly);
    counter.set_input("52000");

    let start = tokio::time::Instant::now();
    let mut seen = Vec::new();
    for _ in 0..3 {
        clock.advance(Duration::seconds(1));
        match counter.next_tick().await {
            Tick::Yearly(at) => seen.push(at - start),
            other => panic!("unexpected tick {other:?}"),
        }
    }
    assert_eq!(
        seen,
        vec![
            std::time::Duration::ZERO,
            std::time::Duration::from_secs(1),
            std::time::Duration::from_secs(2),
        ]
    );

    let now = wall(2025, 8, 20, 10, 0, 3);
    assert_eq!(counter.period_earnings(), compute_earnings(52_000.0, &compute_progress(&now)));
}

#[tokio::test]
async fn test_breakdown_matches_progress() {
    let (mut counter, _clock) = session_at(ManualClock::at_wall(2025, 3, 22, 18, 0, 0));
    counter.switch_mode(Mode::Yearly);
    counter.set_input("52000");

    let snap = counter.snapshot();
    let periods: Vec<Period> = snap.breakdown.iter().map(|l| l.period).collect();
    assert_eq!(periods, Period::ALL.to_vec());

    for line in &snap.breakdown {
        assert!(line.progress_pct >= 0.0 && line.progress_pct < 100.0, "{line:?}");
    }
    // Saturday 18:00 local: 6.75 of 7 days into the week.
    let week = &snap.breakdown[2];
    assert!((week.progress_pct - 6.75 / 7.0 * 100.0).abs() < 1e-6);
    assert!((week.amount - 1000.0 * 6.75 / 7.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_progress_idempotent_through_session() {
    let clock = ManualClock::at_wall(2025, 11, 2, 7, 30, 0);
    let (mut counter, clock) = session_at(clock);
    counter.switch_mode(Mode::Yearly);
    counter.set_input("30000");
    let first = counter.period_earnings();

    counter.on_tick(Tick::Yearly(tokio::time::Instant::now()));
    assert_eq!(counter.period_earnings(), first);

    clock.set(wall(2026, 1, 1, 0, 0, 0));
    counter.on_tick(Tick::Yearly(tokio::time::Instant::now()));
    let new_year = counter.period_earnings();
    assert_eq!(new_year.year, 0.0);
    assert_eq!(new_year.month, 0.0);
    assert_eq!(new_year.day, 0.0);
}
