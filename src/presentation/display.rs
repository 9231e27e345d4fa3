//! Display metadata for the enumerated contract values.
//!
//! Every table is an exhaustive `match`, so a new category, priority or health
//! band fails to compile until it has an icon, label and tone.

use crate::models::{AreaHealthItem, HealthColor, IssueCategory, PriorityLevel, TrustLevel};

/// Semantic colour a view should use; mapping to concrete styles is up to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDisplay {
    pub icon: &'static str,
    pub label: &'static str,
    /// Heading of the action guide checklist
    pub guide_title: &'static str,
}

pub fn category_display(category: IssueCategory) -> CategoryDisplay {
    let (icon, label, guide_title) = match category {
        IssueCategory::Waste => ("🗑️", "Waste Management", "Waste Management Steps"),
        IssueCategory::Water => ("💧", "Water", "Water Issue Steps"),
        IssueCategory::Air => ("💨", "Air Quality", "Air Quality Steps"),
        IssueCategory::Transport => ("🚗", "Transport", "Transport Problem Steps"),
        IssueCategory::Energy => ("⚡", "Energy", "Energy Safety Steps"),
        IssueCategory::Sanitation => ("🧹", "Sanitation", "Sanitation Steps"),
        IssueCategory::Noise => ("🔊", "Noise Pollution", "Noise Issue Steps"),
    };
    CategoryDisplay {
        icon,
        label,
        guide_title,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityDisplay {
    pub label: &'static str,
    pub tone: Tone,
}

pub fn priority_display(priority: PriorityLevel) -> PriorityDisplay {
    match priority {
        PriorityLevel::Low => PriorityDisplay {
            label: "Low",
            tone: Tone::Info,
        },
        PriorityLevel::Medium => PriorityDisplay {
            label: "Medium",
            tone: Tone::Warning,
        },
        PriorityLevel::High => PriorityDisplay {
            label: "High",
            tone: Tone::Danger,
        },
    }
}

pub fn trust_label(trust: TrustLevel) -> &'static str {
    match trust {
        TrustLevel::Low => "Low",
        TrustLevel::Medium => "Medium",
        TrustLevel::High => "High",
    }
}

/// Dashboard legend row for one health band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthBand {
    pub color: HealthColor,
    pub tone: Tone,
    pub range: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

pub fn health_band(color: HealthColor) -> HealthBand {
    match color {
        HealthColor::Green => HealthBand {
            color,
            tone: Tone::Success,
            range: "70-100%",
            label: "Good",
            hint: "Most issues have been resolved",
        },
        HealthColor::Yellow => HealthBand {
            color,
            tone: Tone::Warning,
            range: "40-69%",
            label: "Moderate",
            hint: "Some issues are still pending",
        },
        HealthColor::Red => HealthBand {
            color,
            tone: Tone::Danger,
            range: "0-39%",
            label: "Critical",
            hint: "Many issues unresolved - needs attention",
        },
    }
}

pub fn health_legend() -> [HealthBand; 3] {
    [
        health_band(HealthColor::Green),
        health_band(HealthColor::Yellow),
        health_band(HealthColor::Red),
    ]
}

/// Progress bar fill in percent
pub fn health_bar_width(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

pub fn supporters_label(supporters: i64) -> String {
    if supporters == 1 {
        "1 supporter".to_string()
    } else {
        format!("{} supporters", supporters)
    }
}

pub fn area_progress_caption(item: &AreaHealthItem) -> &'static str {
    if item.total_issues <= 0 {
        "No issues reported"
    } else if item.resolved_issues > 0 {
        "Some issues resolved"
    } else {
        "Issues pending resolution"
    }
}

/// Everything an area health card shows
#[derive(Debug, Clone, PartialEq)]
pub struct AreaHealthCard {
    pub area: String,
    pub score_label: String,
    pub band: HealthBand,
    pub bar_width: u8,
    pub progress: String,
    pub caption: &'static str,
}

impl From<&AreaHealthItem> for AreaHealthCard {
    fn from(item: &AreaHealthItem) -> Self {
        Self {
            area: item.area.clone(),
            score_label: format!("{}%", item.health_score),
            band: health_band(item.color),
            bar_width: health_bar_width(item.health_score),
            progress: format!("{} / {}", item.resolved_issues, item.total_issues),
            caption: area_progress_caption(item),
        }
    }
}
