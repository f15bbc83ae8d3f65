pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Render a metric with exactly one decimal, the precision the backend stores.
pub fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// Format seconds as `mm:ss`, truncating fractions.
pub fn minutes_seconds(total_secs: f64) -> String {
    let whole = total_secs.max(0.0) as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}
