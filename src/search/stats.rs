use std::fmt;
use std::time::Duration;

/// Summary of a finished search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStats {
    pub cells_visited: u128,
    pub matches: u64,
    pub workers: usize,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Cells per second, or 0 for an instantaneous run.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.cells_visited as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics")?;
        writeln!(f, "=================")?;
        writeln!(f, "Cells visited:    {}", self.cells_visited)?;
        writeln!(f, "Matches:          {}", self.matches)?;
        writeln!(f, "Workers:          {}", self.workers)?;
        writeln!(f, "Elapsed:          {}", format_duration(self.elapsed))?;
        write!(f, "Throughput:       {}", format_rate(self.throughput()))
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m {:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}

fn format_rate(per_sec: f64) -> String {
    const K: f64 = 1_000.0;
    const M: f64 = K * 1_000.0;
    const G: f64 = M * 1_000.0;

    if per_sec >= G {
        format!("{:.2} G cells/s", per_sec / G)
    } else if per_sec >= M {
        format!("{:.2} M cells/s", per_sec / M)
    } else if per_sec >= K {
        format!("{:.2} K cells/s", per_sec / K)
    } else {
        format!("{:.0} cells/s", per_sec)
    }
}
