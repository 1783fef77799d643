use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PentestStatus {
    Planned,
    InProgress,
    Completed,
    OnHold,
    Stopped,
}

impl PentestStatus {
    pub const ALL: [PentestStatus; 5] = [
        PentestStatus::Planned,
        PentestStatus::InProgress,
        PentestStatus::Completed,
        PentestStatus::OnHold,
        PentestStatus::Stopped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PentestStatus::Planned => "planned",
            PentestStatus::InProgress => "in_progress",
            PentestStatus::Completed => "completed",
            PentestStatus::OnHold => "on_hold",
            PentestStatus::Stopped => "stopped",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PentestStatus::Planned => "Planned",
            PentestStatus::InProgress => "In Progress",
            PentestStatus::Completed => "Completed",
            PentestStatus::OnHold => "On Hold",
            PentestStatus::Stopped => "Stopped",
        }
    }
}

impl FromStr for PentestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PentestStatus::ALL
            .iter()
            .find(|st| st.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown pentest status: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PentestKind {
    #[serde(rename = "API")]
    Api,
    Mobile,
    Infrastructure,
    Web,
    #[serde(rename = "Thick Client")]
    ThickClient,
}

impl PentestKind {
    pub fn label(&self) -> &'static str {
        match self {
            PentestKind::Api => "API",
            PentestKind::Mobile => "Mobile",
            PentestKind::Infrastructure => "Infrastructure",
            PentestKind::Web => "Web",
            PentestKind::ThickClient => "Thick Client",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pentest {
    pub id: i64,
    pub project_name: String,
    #[serde(rename = "type")]
    pub kind: PentestKind,
    pub status: PentestStatus,
    /// User id of the assigned pentester.
    pub assigned_to: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 0-100.
    pub progress: u8,
}
