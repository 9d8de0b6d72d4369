//! Human-readable rendering of run summaries and session diffs.
use crate::measure::RunResult;
use crate::stats::{RunStats, StatsDiff};

pub fn print_run_summary(result: &RunResult) {
    let stats = RunStats::from_result(result);

    println!("Clients: {}", result.policy.clients);
    println!("Requested: {}", result.policy.requests);
    println!("Completed: {}", stats.completed);
    println!("Duration: {:.2}s", stats.wall_clock_secs);
    println!(
        "Latency (min/mean/max): {:.1}ms / {:.1}ms / {:.1}ms",
        stats.min_ms, stats.mean_ms, stats.max_ms
    );
    println!("Latency std dev: {:.1}ms", stats.std_dev_ms);
    println!("Requests/sec: {:.2}", stats.requests_per_sec);
    println!("Bytes/sec: {:.0}", stats.bytes_per_sec);
    println!("Total bytes: {}", stats.total_bytes);
    println!("Peak connections: {}", stats.peak_connections);
}

pub fn print_diff(diff: &StatsDiff) {
    println!(
        "{:<20} {:>14} {:>14} {:>14} {:>10}",
        "Statistic", diff.left_label, diff.right_label, "Delta", "Change"
    );
    for (name, left, right, delta) in diff.rows() {
        println!(
            "{:<20} {:>14.2} {:>14.2} {:>+14.2} {:>+9.1}%",
            name,
            left,
            right,
            delta.absolute,
            delta.relative * 100.0
        );
    }
}
