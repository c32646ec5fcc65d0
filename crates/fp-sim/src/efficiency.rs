//! Schedule efficiency score.

/// `completion_rate × balance`.
///
/// `completion_rate` is `completed / total` and `balance` is
/// `max(0.5, 1 − var / (mean² + 1))` over the machines' final times
/// (population variance).  Returns 0 with no fields or no machines, so the
/// score lies in `[0.5, 1]` whenever every field is complete.
pub fn efficiency(machine_times: &[f64], completed: usize, total: usize) -> f64 {
    if total == 0 || machine_times.is_empty() {
        return 0.0;
    }
    let completion_rate = completed as f64 / total as f64;

    let n = machine_times.len() as f64;
    let mean = machine_times.iter().sum::<f64>() / n;
    let variance = machine_times.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n;
    let balance = (1.0 - variance / (mean * mean + 1.0)).max(0.5);

    completion_rate * balance
}
