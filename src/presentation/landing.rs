//! Landing page quick-report box.
//!
//! Collects a description and location, then hands both to the report page
//! through its query string instead of submitting directly.

use super::capabilities::{locate, DictationError, DictationProvider, GeoPoint, LocationProvider};

pub const LOCATION_FALLBACK_NOTICE: &str = "Could not access your location. Using Delhi center.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuickReportError {
    #[error("Please describe the issue")]
    EmptyDescription,
    #[error("Location not available")]
    NoLocation,
}

#[derive(Debug, Default)]
pub struct QuickReport {
    pub description: String,
    pub location: Option<GeoPoint>,
    pub listening: bool,
}

impl QuickReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Silent geolocation on page load
    pub async fn locate_on_load(&mut self, provider: &dyn LocationProvider) {
        self.location = Some(locate(provider).await.point());
    }

    /// "Detect location" button. Returns the notice to show when the default was used.
    pub async fn detect_location(&mut self, provider: &dyn LocationProvider) -> Option<&'static str> {
        let fix = locate(provider).await;
        self.location = Some(fix.point());
        fix.is_fallback().then_some(LOCATION_FALLBACK_NOTICE)
    }

    pub async fn dictate(&mut self, provider: &dyn DictationProvider) -> Result<(), DictationError> {
        self.listening = true;
        let result = provider.listen().await;
        self.listening = false;
        self.description = result?;
        Ok(())
    }

    /// Link to the report page carrying the description and coordinates
    pub fn report_link(&self) -> Result<String, QuickReportError> {
        if self.description.trim().is_empty() {
            return Err(QuickReportError::EmptyDescription);
        }
        let location = self.location.ok_or(QuickReportError::NoLocation)?;

        Ok(format!(
            "/report?description={}&lat={}&lon={}",
            urlencoding::encode(&self.description),
            location.lat,
            location.lon
        ))
    }
}
