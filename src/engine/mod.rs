//! Earnings engine — hourly counter, yearly breakdown and their refresh loop.

pub mod clock;
pub mod hourly;
pub mod progress;
pub mod scheduler;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use hourly::{CounterState, HourlyCounter};
pub use progress::{compute_earnings, compute_progress};
pub use scheduler::{RefreshScheduler, Tick};
pub use session::PayCounter;
