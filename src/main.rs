//! Pay Counter — terminal front-end.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the session and runs the refresh loop, reading commands from
//! stdin until `quit` or Ctrl+C.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use pay_counter::command::{self, Command, Outcome, HELP};
use pay_counter::config::AppConfig;
use pay_counter::display;
use pay_counter::engine::{PayCounter, RefreshScheduler, SystemClock};
use pay_counter::types::Mode;

const BANNER: &str = r#"
 ____                ____                  _
|  _ \ __ _ _   _   / ___|___  _   _ _ __ | |_ ___ _ __
| |_) / _` | | | | | |   / _ \| | | | '_ \| __/ _ \ '__|
|  __/ (_| | |_| | | |__| (_) | |_| | | | | ||  __/ |
|_|   \__,_|\__, |  \____\___/ \__,_|_| |_|\__\___|_|
            |___/
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let mut cfg = AppConfig::load(&AppConfig::path_from_env())?;
    cfg.apply_env_overrides();

    init_logging();

    println!("{BANNER}");
    println!("{HELP}");
    info!(
        name = %cfg.counter.name,
        mode = %cfg.counter.mode,
        currency = cfg.counter.currency.code(),
        hourly_tick_ms = cfg.refresh.hourly_tick_ms,
        yearly_tick_ms = cfg.refresh.yearly_tick_ms,
        "Pay Counter starting up"
    );

    let mut counter = build_counter(&cfg);

    // -- Main loop -------------------------------------------------------

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = counter.next_tick() => {
                render(&counter, cfg.output.json)?;
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        if !handle_line(&mut counter, &line, cfg.output.json)? {
                            break;
                        }
                    }
                    None => {
                        info!("stdin closed, commands disabled");
                        stdin_open = false;
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    counter.shutdown();
    println!();
    print!("{}", display::detail(&counter.snapshot()));
    Ok(())
}

/// Build the session from configuration.
fn build_counter(cfg: &AppConfig) -> PayCounter {
    let scheduler = RefreshScheduler::new(cfg.refresh.hourly_period(), cfg.refresh.yearly_period());
    let mut counter = PayCounter::new(SystemClock, scheduler);

    counter.select_currency(cfg.counter.currency.code());
    counter.switch_mode(cfg.counter.mode);

    if let Some(rate) = cfg.counter.rate {
        counter.set_input(&rate.to_string());
        if cfg.counter.autostart && cfg.counter.mode == Mode::Hourly {
            if let Err(e) = counter.start() {
                warn!(error = %e, rate, "Autostart skipped");
            }
        }
    }
    counter
}

/// Apply one stdin line. Returns `false` when the user asked to quit.
fn handle_line(counter: &mut PayCounter, line: &str, json: bool) -> Result<bool> {
    let cmd = match line.parse::<Command>() {
        Ok(cmd) => cmd,
        Err(e) => {
            println!("\n{e}\n{HELP}");
            return Ok(true);
        }
    };
    info!(command = %cmd, "Command received");

    match command::apply(counter, cmd) {
        Outcome::Exit => return Ok(false),
        Outcome::Say(msg) => println!("\n{}", msg.trim_end()),
        Outcome::Continue => {}
    }
    render(counter, json)?;
    Ok(true)
}

/// Draw the current snapshot: one JSON line, or the status line in place.
fn render(counter: &PayCounter, json: bool) -> Result<()> {
    let snapshot = counter.snapshot();
    let mut out = std::io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
    } else {
        write!(out, "\r{:<120}", display::status_line(&snapshot))?;
    }
    out.flush()?;
    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr; stdout is the display.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pay_counter=info"));

    let json_logging = std::env::var("PAY_COUNTER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }
}
