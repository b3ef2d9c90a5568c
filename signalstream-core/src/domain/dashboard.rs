//! Admin dashboard snapshot: headline stats plus a recent-activity feed.

use serde::{Deserialize, Serialize};

/// Category of a recent-activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Signup,
    Broadcast,
    Subscription,
}

impl ActivityKind {
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Signup => "New user signup",
            ActivityKind::Broadcast => "Signal broadcasted",
            ActivityKind::Subscription => "Subscription upgraded",
        }
    }
}

/// One row in the dashboard's recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub description: String,
    /// Human age label ("2 hours ago", "1 day ago").
    pub age: String,
}

/// Headline counters with their caption lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_users_caption: String,
    pub active_subscriptions: u64,
    pub active_subscriptions_caption: String,
    pub signals_sent_today: u64,
    pub signals_sent_today_caption: String,
}

/// Everything the admin dashboard renders in one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_kind_labels_are_distinct() {
        let labels = [
            ActivityKind::Signup.label(),
            ActivityKind::Broadcast.label(),
            ActivityKind::Subscription.label(),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in labels.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
