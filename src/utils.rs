/// Rounds `value` to `decimals` places, halves away from zero.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    if decimals <= 0 {
        return value.round();
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Arithmetic mean, or `None` for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.26, 1), 1.3);
        assert_eq!(round_to(-1.26, 1), -1.3);
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(180.6, 0), 181.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean([5.0, 15.0, 25.0]), Some(15.0));
        assert_eq!(mean(Vec::<f64>::new()), None);
    }
}
