//! Hourly counter driven end to end through the session and scheduler.

use chrono::Duration;
use pay_counter::command::{self, Command, Outcome};
use pay_counter::display;
use pay_counter::engine::Tick;
use pay_counter::types::Mode;

use crate::mock_clock::{session_at, ManualClock};

#[tokio::test(start_paused = true)]
async fn test_fifteen_per_hour_for_one_hour() {
    let (mut counter, clock) = session_at(ManualClock::at_wall(2025, 5, 6, 9, 0, 0));
    counter.set_input("15");
    counter.start().unwrap();

    let first = counter.next_tick().await;
    assert!(matches!(first, Tick::Hourly(_)));
    assert_eq!(counter.hourly_earnings(), 0.0);

    clock.advance(Duration::milliseconds(3_600_000));
    counter.next_tick().await;
    assert_eq!(display::money("£", counter.hourly_earnings()), "£15.00");
}

#[tokio::test(start_paused = true)]
async fn test_earnings_never_decrease_while_running() {
    let (mut counter, clock) = session_at(ManualClock::at_wall(2025, 5, 6, 9, 0, 0));
    counter.set_input("42.5");
    counter.start().unwrap();

    let mut last = 0.0;
    for _ in 0..50 {
        clock.advance(Duration::milliseconds(100));
        counter.next_tick().await;
        let now = counter.hourly_earnings();
        assert!(now >= last);
        last = now;
    }
    let expected = 42.5 * 5_000.0 / 3_600_000.0;
    assert!((last - expected).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_stopped_counter_stays_frozen() {
    let (mut counter, clock) = session_at(ManualClock::at_wall(2025, 5, 6, 9, 0, 0));
    counter.set_input("100");
    counter.start().unwrap();
    clock.advance(Duration::minutes(6));
    counter.next_tick().await;
    counter.next_tick().await;
    counter.stop();
    let frozen = counter.hourly_earnings();
    assert!((frozen - 10.0).abs() < 1e-9);

    // With the timer gone, nothing fires and time passing changes nothing.
    clock.advance(Duration::hours(3));
    let waited = tokio::time::timeout(std::time::Duration::from_secs(5), counter.next_tick()).await;
    assert!(waited.is_err());
    assert_eq!(counter.hourly_earnings(), frozen);

    counter.reset();
    assert_eq!(counter.hourly_earnings(), 0.0);
}

#[tokio::test]
async fn test_invalid_rates_keep_idle() {
    let (mut counter, _clock) = session_at(ManualClock::at_wall(2025, 5, 6, 9, 0, 0));
    for input in ["", "0", "-12", "abc"] {
        counter.set_input(input);
        assert!(counter.start().is_err(), "input {input:?}");
        assert!(!counter.is_running());
        assert_eq!(counter.snapshot().input_error.as_deref(), Some("Please enter a valid hourly rate"));
    }
}

#[tokio::test(start_paused = true)]
async fn test_command_driven_session() {
    let (mut counter, clock) = session_at(ManualClock::at_wall(2025, 5, 6, 9, 0, 0));
    for line in ["currency usd", "rate 60", "start"] {
        let cmd: Command = line.parse().unwrap();
        assert_eq!(command::apply(&mut counter, cmd), Outcome::Continue, "{line}");
    }
    clock.advance(Duration::minutes(30));
    counter.next_tick().await;

    let snap = counter.snapshot();
    assert_eq!(display::status_line(&snap), "Current Earnings $30.00 (running)");

    command::apply(&mut counter, "yearly".parse().unwrap());
    assert_eq!(counter.mode(), Mode::Yearly);
    assert!(!counter.is_running());
    assert_eq!(counter.hourly_earnings(), 0.0);
}
