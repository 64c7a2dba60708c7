//! Text rendering of a `Snapshot` for the terminal front-end.

use crate::types::{Mode, Snapshot};

/// Money with two decimals behind the currency symbol, e.g. `£15.00`.
pub fn money(symbol: &str, amount: f64) -> String {
    format!("{symbol}{amount:.2}")
}

/// Percentage with one decimal, e.g. `42.1%`.
pub fn percent(pct: f64) -> String {
    format!("{pct:.1}%")
}

/// Fixed-width text progress bar. Values outside 0–100 are clamped for drawing.
pub fn bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Single status line, overwritten in place on each refresh.
pub fn status_line(snap: &Snapshot) -> String {
    match snap.mode {
        Mode::Hourly => {
            let state = if snap.is_running { "running" } else { "stopped" };
            format!(
                "Current Earnings {} ({state})",
                money(snap.symbol, snap.hourly_earnings)
            )
        }
        Mode::Yearly => {
            if snap.breakdown.is_empty() {
                return "Enter a yearly salary to see earnings breakdown".to_string();
            }
            snap.breakdown
                .iter()
                .map(|line| {
                    format!(
                        "{} {} {}",
                        line.period,
                        money(snap.symbol, line.amount),
                        percent(line.progress_pct)
                    )
                })
                .collect::<Vec<_>>()
                .join(" | ")
        }
    }
}

/// Multi-line breakdown for the `status` command.
pub fn detail(snap: &Snapshot) -> String {
    let mut out = format!("Mode: {} | Currency: {}\n", snap.mode, snap.currency);
    if let Some(err) = &snap.input_error {
        out.push_str(&format!("! {err}\n"));
    }
    match snap.mode {
        Mode::Hourly => {
            out.push_str(&format!("Hourly Rate: {}\n", snap.input));
            out.push_str(&status_line(snap));
            out.push('\n');
        }
        Mode::Yearly => {
            out.push_str(&format!("Yearly Salary: {}\n", snap.input));
            if snap.breakdown.is_empty() {
                out.push_str(&status_line(snap));
                out.push('\n');
            }
            for line in &snap.breakdown {
                out.push_str(&format!(
                    "{:<11} {:>14} {} {:>6}  {}\n",
                    line.period.to_string(),
                    money(snap.symbol, line.amount),
                    bar(line.progress_pct, 20),
                    percent(line.progress_pct),
                    line.caption,
                ));
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
