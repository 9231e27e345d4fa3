//! Platform capabilities the pages depend on, injected instead of probed.

use std::collections::VecDeque;
use std::fmt;

use async_trait::async_trait;
use parking_lot::Mutex;

/// Coordinate pair, sent upstream as `"lat,lon"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Location field of a `PredictRequest`
    pub fn to_wire(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {:.4}, Lon: {:.4}", self.lat, self.lon)
    }
}

/// Central Delhi, used whenever the device position is unavailable
pub const DEFAULT_LOCATION: GeoPoint = GeoPoint::new(28.6139, 77.209);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,
    #[error("location unavailable on this platform")]
    Unavailable,
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

/// Where a resolved location came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFix {
    Device(GeoPoint),
    Fallback(GeoPoint),
}

impl LocationFix {
    pub fn point(&self) -> GeoPoint {
        match self {
            LocationFix::Device(p) | LocationFix::Fallback(p) => *p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LocationFix::Fallback(_))
    }
}

/// Ask the provider, falling back to [`DEFAULT_LOCATION`] on any failure.
pub async fn locate(provider: &dyn LocationProvider) -> LocationFix {
    match provider.current_position().await {
        Ok(point) => LocationFix::Device(point),
        Err(e) => {
            tracing::debug!(error = %e, "Using default location");
            LocationFix::Fallback(DEFAULT_LOCATION)
        }
    }
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoPoint);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        Ok(self.0)
    }
}

/// Non-browser targets: no positioning at all
#[derive(Debug, Clone)]
pub struct UnavailableLocation(pub LocationError);

impl Default for UnavailableLocation {
    fn default() -> Self {
        Self(LocationError::Unavailable)
    }
}

#[async_trait]
impl LocationProvider for UnavailableLocation {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        Err(self.0.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictationError {
    #[error("Voice input not supported on your browser")]
    Unsupported,
    #[error("speech recognition failed: {0}")]
    Failed(String),
}

/// Speech to text. One call captures one utterance.
#[async_trait]
pub trait DictationProvider: Send + Sync {
    async fn listen(&self) -> Result<String, DictationError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDictation;

#[async_trait]
impl DictationProvider for NoDictation {
    async fn listen(&self) -> Result<String, DictationError> {
        Err(DictationError::Unsupported)
    }
}

/// Replays canned transcripts in order, then fails
#[derive(Debug, Default)]
pub struct ScriptedDictation {
    transcripts: Mutex<VecDeque<String>>,
}

impl ScriptedDictation {
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcripts: Mutex::new(transcripts.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl DictationProvider for ScriptedDictation {
    async fn listen(&self) -> Result<String, DictationError> {
        self.transcripts
            .lock()
            .pop_front()
            .ok_or_else(|| DictationError::Failed("no speech detected".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_denied_falls_back_to_default() {
        let fix = locate(&UnavailableLocation(LocationError::Denied)).await;
        assert!(fix.is_fallback());
        assert_eq!(fix.point(), GeoPoint::new(28.6139, 77.209));
    }

    #[tokio::test]
    async fn test_device_position_used() {
        let here = GeoPoint::new(19.076, 72.8777);
        let fix = locate(&FixedLocation(here)).await;
        assert_eq!(fix, LocationFix::Device(here));
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(DEFAULT_LOCATION.to_wire(), "28.6139,77.209");
        assert_eq!(DEFAULT_LOCATION.to_string(), "Lat: 28.6139, Lon: 77.2090");
    }

    #[tokio::test]
    async fn test_scripted_dictation_runs_out() {
        let dictation = ScriptedDictation::new(["overflowing drain"]);
        assert_eq!(dictation.listen().await.unwrap(), "overflowing drain");
        assert!(dictation.listen().await.is_err());
        assert_eq!(NoDictation.listen().await, Err(DictationError::Unsupported));
    }
}
