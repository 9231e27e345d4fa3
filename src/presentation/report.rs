//! Report submission page.

use axum::{extract::Query, http::Uri};
use serde::Deserialize;

use super::capabilities::{
    locate, DictationError, DictationProvider, GeoPoint, LocationFix, LocationProvider,
};
use super::client::{CivicApi, ClientError};
use super::display::{
    category_display, priority_display, supporters_label, trust_label, CategoryDisplay,
    PriorityDisplay,
};
use super::FetchState;
use crate::models::{PredictRequest, PredictResponse, PriorityLevel};

pub const EMERGENCY_HOTLINE: &str = "112";

pub const MSG_EMPTY_DESCRIPTION: &str = "Please describe the issue";
pub const MSG_NO_LOCATION: &str = "Location not available. Please enable location access.";
pub const MSG_SUBMIT_FAILED: &str = "Failed to submit issue";
pub const MSG_CONNECTION: &str = "An error occurred. Please check your connection.";

#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyPanel {
    pub title: &'static str,
    pub body: &'static str,
    pub hotline: &'static str,
}

impl EmergencyPanel {
    fn high_priority() -> Self {
        Self {
            title: "🚨 EMERGENCY – Immediate Attention Required",
            body: "This issue has been marked as HIGH PRIORITY due to safety concerns. \
                   Authorities have been notified immediately.",
            hotline: EMERGENCY_HOTLINE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueCard {
    pub id: i64,
    pub category: CategoryDisplay,
    pub priority: PriorityDisplay,
    pub supporters: String,
    pub message: Option<String>,
    pub resolved: bool,
}

impl IssueCard {
    pub fn can_resolve(&self) -> bool {
        !self.resolved
    }

    /// Mark the issue resolved upstream; the card only flips once the call succeeds.
    pub async fn resolve(&mut self, api: &dyn CivicApi) -> Result<(), ClientError> {
        if self.resolved {
            return Ok(());
        }
        api.resolve(self.id).await?;
        self.resolved = true;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionGuide {
    pub title: &'static str,
    pub steps: Vec<String>,
}

/// What the page shows after a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub confirmation: String,
    /// Present when the report joined an existing issue
    pub duplicate_note: Option<String>,
    pub emergency: Option<EmergencyPanel>,
    pub card: IssueCard,
    pub guide: ActionGuide,
    pub authority: String,
    pub trust: &'static str,
    pub response: PredictResponse,
}

impl From<PredictResponse> for ReportOutcome {
    fn from(response: PredictResponse) -> Self {
        let duplicate_note = response.duplicate.then(|| {
            format!(
                "Your support has been recorded. The issue priority is now: {}",
                response.priority.as_str()
            )
        });

        let emergency = match response.priority {
            PriorityLevel::High => Some(EmergencyPanel::high_priority()),
            PriorityLevel::Medium | PriorityLevel::Low => None,
        };

        let card = IssueCard {
            id: response.id,
            category: category_display(response.category),
            priority: priority_display(response.priority),
            supporters: supporters_label(response.supporters),
            message: Some(format!("Assigned to: {}", response.authority)),
            resolved: false,
        };

        let guide = ActionGuide {
            title: category_display(response.category).guide_title,
            steps: response.actions.clone(),
        };

        Self {
            confirmation: response.message.clone(),
            duplicate_note,
            emergency,
            card,
            guide,
            authority: response.authority.clone(),
            trust: trust_label(response.trust_level),
            response,
        }
    }
}

/// Query string the landing page hands over
#[derive(Debug, Default, Deserialize)]
struct ReportQuery {
    description: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Default)]
pub struct ReportForm {
    pub description: String,
    pub location: Option<GeoPoint>,
    pub locating: bool,
    pub listening: bool,
    pub state: FetchState<ReportOutcome>,
}

impl ReportForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from `/report?description=..&lat=..&lon=..`. Bad queries give an empty form.
    pub fn from_uri(uri: &Uri) -> Self {
        let query = Query::<ReportQuery>::try_from_uri(uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        Self {
            description: query.description.unwrap_or_default(),
            location: match (query.lat, query.lon) {
                (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
                _ => None,
            },
            ..Self::default()
        }
    }

    /// On-load geolocation. Never leaves the form without a location.
    pub async fn locate(&mut self, provider: &dyn LocationProvider) -> LocationFix {
        self.locating = true;
        let fix = locate(provider).await;
        self.location = Some(fix.point());
        self.locating = false;
        fix
    }

    /// Fill the description from one dictated utterance.
    pub async fn dictate(&mut self, provider: &dyn DictationProvider) -> Result<(), DictationError> {
        self.listening = true;
        let result = provider.listen().await;
        self.listening = false;

        let transcript = result?;
        self.description = transcript;
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_loading() && !self.locating && self.location.is_some()
    }

    pub fn validate(&self) -> Result<PredictRequest, &'static str> {
        if self.description.trim().is_empty() {
            return Err(MSG_EMPTY_DESCRIPTION);
        }
        let location = self.location.ok_or(MSG_NO_LOCATION)?;

        Ok(PredictRequest {
            text: self.description.clone(),
            location: location.to_wire(),
        })
    }

    /// Validate, then submit. No request is made unless text and location are present.
    pub async fn submit(&mut self, api: &dyn CivicApi) -> &FetchState<ReportOutcome> {
        self.state = FetchState::Idle;

        let request = match self.validate() {
            Ok(request) => request,
            Err(msg) => {
                self.state = FetchState::Failed(msg.to_string());
                return &self.state;
            }
        };

        self.state = FetchState::Loading;
        self.state = match api.predict(&request).await {
            Ok(response) => {
                self.description.clear();
                FetchState::Success(ReportOutcome::from(response))
            }
            Err(ClientError::Status(status)) => {
                tracing::warn!(%status, "Report submission rejected");
                FetchState::Failed(MSG_SUBMIT_FAILED.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Report submission failed");
                FetchState::Failed(MSG_CONNECTION.to_string())
            }
        };
        &self.state
    }
}
