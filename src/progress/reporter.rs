use std::io::{IsTerminal, Write};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tokio::sync::watch;

use crate::shutdown::ShutdownSender;

use super::Ratio;

/// Render cadence for the live progress line.
const RENDER_INTERVAL: Duration = Duration::from_millis(250);
/// Width of the progress bar in cells.
const BAR_SIZE: usize = 30;

/// Producer side of the progress state. `set` is last-write-wins across
/// workers; display jitter between concurrent writers is acceptable
/// because the orchestrator re-applies the final value before shutdown.
#[derive(Debug)]
pub struct ProgressHandle {
    tx: watch::Sender<Ratio<u64>>,
}

impl ProgressHandle {
    pub(crate) const fn from_sender(tx: watch::Sender<Ratio<u64>>) -> Self {
        Self { tx }
    }

    pub fn set(&self, ratio: Ratio<u64>) {
        drop(self.tx.send_replace(ratio));
    }
}

/// Spawns the single consumer loop. On shutdown it renders the last
/// known state once more before exiting, so the displayed ratio never
/// under-reports the final count.
pub(crate) fn setup_progress_reporter(
    total: u64,
    shutdown_tx: &ShutdownSender,
) -> (ProgressHandle, tokio::task::JoinHandle<()>) {
    let (tx, rx) = watch::channel(Ratio::new(0, total, Duration::ZERO));
    let mut shutdown_rx = shutdown_tx.subscribe();

    let handle = tokio::spawn(async move {
        if !std::io::stderr().is_terminal() {
            // Still wait for shutdown so the join ordering in the
            // orchestrator stays the same with redirected output.
            drop(shutdown_rx.recv().await);
            return;
        }

        let mut ticker = tokio::time::interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    let last = *rx.borrow();
                    if render_progress_line(&last).is_ok() {
                        drop(finish_progress_line());
                    }
                    break;
                }
                _ = ticker.tick() => {
                    let current = *rx.borrow();
                    if render_progress_line(&current).is_err() {
                        break;
                    }
                }
            }
        }
    });

    (ProgressHandle { tx }, handle)
}

fn render_progress_line(ratio: &Ratio<u64>) -> Result<(), std::io::Error> {
    let bar = build_bar(ratio.completed, ratio.total);
    let counter = format!(" {}", ratio.counter_text());
    let eta = format!(" | eta {}", ratio.remaining_text());

    let mut out = std::io::stderr();
    queue!(
        out,
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(&bar),
        SetForegroundColor(Color::Cyan),
        Print(&counter),
        ResetColor,
        SetForegroundColor(Color::Yellow),
        Print(&eta),
        ResetColor
    )?;
    out.flush()?;
    Ok(())
}

fn finish_progress_line() -> Result<(), std::io::Error> {
    let mut out = std::io::stderr();
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn build_bar(completed: u64, total: u64) -> String {
    let size = u128::try_from(BAR_SIZE).unwrap_or(0);
    let scaled = u128::from(completed)
        .saturating_mul(size)
        .checked_div(u128::from(total.max(1)))
        .unwrap_or(0);
    let filled = usize::try_from(scaled).unwrap_or(BAR_SIZE).min(BAR_SIZE);
    let empty = BAR_SIZE.saturating_sub(filled);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}
