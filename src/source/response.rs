use crate::source::error::SourceError;
use crate::types::raw_slot::RawForecast;
use log::debug;

impl RawForecast {
    /// Parses a provider forecast document.
    ///
    /// Only a document that is not JSON at all is an error; malformed inner groups and
    /// slots are kept as absent values and resolved later by the normalizer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forecast_digest::RawForecast;
    ///
    /// let forecast = RawForecast::from_json(
    ///     r#"{"city": {"name": "Porto"}, "list": [{"dt_txt": "2024-01-01 00:00:00"}]}"#,
    /// ).unwrap();
    /// assert_eq!(forecast.city_name(), "Porto");
    /// assert_eq!(forecast.list.len(), 1);
    ///
    /// assert!(RawForecast::from_json("<html>").is_err());
    /// ```
    pub fn from_json(document: &str) -> Result<RawForecast, SourceError> {
        let forecast: RawForecast = serde_json::from_str(document)?;
        debug!(
            "Parsed forecast document for '{}' with {} slots",
            forecast.city_name(),
            forecast.list.len()
        );
        Ok(forecast)
    }
}
