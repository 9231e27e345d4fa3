use serde::{Deserialize, Deserializer, Serialize};

/// Sustainability category assigned by the classification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Waste,
    Water,
    Air,
    Transport,
    Energy,
    Sanitation,
    Noise,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 7] = [
        IssueCategory::Waste,
        IssueCategory::Water,
        IssueCategory::Air,
        IssueCategory::Transport,
        IssueCategory::Energy,
        IssueCategory::Sanitation,
        IssueCategory::Noise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Waste => "waste",
            IssueCategory::Water => "water",
            IssueCategory::Air => "air",
            IssueCategory::Transport => "transport",
            IssueCategory::Energy => "energy",
            IssueCategory::Sanitation => "sanitation",
            IssueCategory::Noise => "noise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Low => "low",
            PriorityLevel::Medium => "medium",
            PriorityLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    Low,
    Medium,
    High,
}

impl TrustLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::Low => "low",
            TrustLevel::Medium => "medium",
            TrustLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Resolved,
}

/// Area health band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthColor {
    Green,
    Yellow,
    Red,
}

impl HealthColor {
    /// Band for a health score: 70 and up is green, 40 to 69 yellow, below 40 red.
    pub fn from_score(score: i64) -> Self {
        if score >= 70 {
            HealthColor::Green
        } else if score >= 40 {
            HealthColor::Yellow
        } else {
            HealthColor::Red
        }
    }
}

/// A reported civic issue, owned by the classification service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub category: IssueCategory,
    pub lat: f64,
    pub lon: f64,
    pub count: i64,
    pub priority: PriorityLevel,
    pub trust_level: TrustLevel,
    pub status: IssueStatus,
    pub created_at: String,
}

/// Report submission from the browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    /// "lat,lon"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
}

/// `null` reads the same as a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Classification result for a submitted report.
///
/// `duplicate` is set when the text matched an existing open issue; the
/// supporter count of that issue was incremented instead of creating a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub duplicate: bool,
    pub id: i64,
    pub category: IssueCategory,
    pub authority: String,
    pub priority: PriorityLevel,
    pub trust_level: TrustLevel,
    pub supporters: i64,
    pub actions: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaHealthItem {
    pub area: String,
    pub health_score: i64,
    pub color: HealthColor,
    pub total_issues: i64,
    pub resolved_issues: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStatsResponse {
    pub total_issues: i64,
    pub open_issues: i64,
    pub resolved_issues: i64,
    pub high_priority_issues: i64,
}

impl AdminStatsResponse {
    /// Rounded share of resolved issues, in percent
    pub fn resolution_rate(&self) -> i64 {
        if self.total_issues <= 0 {
            return 0;
        }
        (self.resolved_issues as f64 / self.total_issues as f64 * 100.0).round() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

/// Error payload returned by the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
