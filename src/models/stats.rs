use serde::{Deserialize, Serialize};

/// Raw stats payload as returned by the calendar/aggregation services.
///
/// The services do not guarantee `sum of status counts == total_pentests`
/// nor `pentest_days + leave_days + non_pentest_days <= working_days`; the
/// projection layer must stay safe for any non-negative input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub working_days: u32,
    pub pentest_days: u32,
    pub leave_days: u32,
    pub non_pentest_days: u32,
    pub total_pentests: u32,
    pub completed_pentests: u32,
    pub in_progress_pentests: u32,
    pub planned_pentests: u32,
    pub on_hold_pentests: u32,
    pub stopped_pentests: u32,
}
