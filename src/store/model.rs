//! Plain records held by the simulation store.
//!
//! Everything here is process-lifetime, in-memory data. Rollup fields
//! (`total`, `percentage`, the stats structs) are derived by the store or the
//! runners; nothing in this module computes them on its own except the
//! branch-row helpers.

use serde::{Deserialize, Serialize};

use crate::types::LogKind;

/// Monthly sales target shared by all branches, in tenge.
pub const BRANCH_TARGET: u64 = 15_000_000;

/// Branch names shown in the Excel table, in row order.
pub const BRANCHES: [&str; 3] = ["Алматы", "Астана", "Шымкент"];

/// Message of the log line present before any run.
pub const EXCEL_READY_MESSAGE: &str = "Система готова к автоматизации...";

/// Mock bot response time in seconds shown on the stats panel.
pub const DEFAULT_RESPONSE_TIME: f64 = 2.3;

/// Mock customer satisfaction percentage.
pub const DEFAULT_SATISFACTION: u32 = 97;

/// One branch row of the simulated quarterly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchReport {
    pub branch: String,
    pub jan: u64,
    pub feb: u64,
    pub mar: u64,
    /// `jan + feb + mar`
    pub total: u64,
    /// `total / BRANCH_TARGET * 100`, unrounded
    pub percentage: f64,
}

impl BranchReport {
    /// A zeroed row for `branch`.
    pub fn empty(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            jan: 0,
            feb: 0,
            mar: 0,
            total: 0,
            percentage: 0.0,
        }
    }

    /// Builds a row from three monthly figures and derives its rollups.
    pub fn from_months(branch: &str, jan: u64, feb: u64, mar: u64) -> Self {
        let total = jan + feb + mar;
        Self {
            branch: branch.to_string(),
            jan,
            feb,
            mar,
            total,
            percentage: total as f64 / BRANCH_TARGET as f64 * 100.0,
        }
    }
}

/// One line of a simulated execution console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local `HH:MM:SS`, or a placeholder
    pub timestamp: String,
    pub message: String,
    pub kind: LogKind,
}

/// One simulated marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannedProduct {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub rating: f32,
    pub seller: String,
}

/// Rollup over the products scanned so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub found: u32,
    /// Integer floor of the running mean price
    pub avg_price: u64,
    /// Products per second, as advertised by the widget
    pub speed: u32,
}

/// Partial update for [`ScanStats`]; `None` leaves the field untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStatsPatch {
    pub found: Option<u32>,
    pub avg_price: Option<u64>,
    pub speed: Option<u32>,
}

impl ScanStats {
    pub fn merge(&mut self, patch: ScanStatsPatch) {
        if let Some(v) = patch.found {
            self.found = v;
        }
        if let Some(v) = patch.avg_price {
            self.avg_price = v;
        }
        if let Some(v) = patch.speed {
            self.speed = v;
        }
    }
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Bot,
}

/// One turn of the simulated bot conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: ChatSender,
    /// Local `HH:MM`, or a placeholder
    pub timestamp: String,
}

/// Counters for one bot session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChatStats {
    pub messages: u32,
    pub response_time: f64,
    pub orders: u32,
    pub satisfaction: u32,
}

impl Default for ChatStats {
    fn default() -> Self {
        Self {
            messages: 0,
            response_time: DEFAULT_RESPONSE_TIME,
            orders: 0,
            satisfaction: DEFAULT_SATISFACTION,
        }
    }
}

/// Partial update for [`ChatStats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatStatsPatch {
    pub messages: Option<u32>,
    pub response_time: Option<f64>,
    pub orders: Option<u32>,
    pub satisfaction: Option<u32>,
}

impl ChatStats {
    pub fn merge(&mut self, patch: ChatStatsPatch) {
        if let Some(v) = patch.messages {
            self.messages = v;
        }
        if let Some(v) = patch.response_time {
            self.response_time = v;
        }
        if let Some(v) = patch.orders {
            self.orders = v;
        }
        if let Some(v) = patch.satisfaction {
            self.satisfaction = v;
        }
    }
}

/// Category of an insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Insight,
    Recommendation,
    Metric,
}

/// Priority badge on an insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// One finding produced by the insight engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub impact: Option<String>,
}

/// Per-entity counters of the integration demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncStats {
    pub products: u32,
    pub prices: u32,
    pub stock: u32,
    pub customers: u32,
}

/// Partial update for [`SyncStats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncStatsPatch {
    pub products: Option<u32>,
    pub prices: Option<u32>,
    pub stock: Option<u32>,
    pub customers: Option<u32>,
}

impl SyncStats {
    pub fn merge(&mut self, patch: SyncStatsPatch) {
        if let Some(v) = patch.products {
            self.products = v;
        }
        if let Some(v) = patch.prices {
            self.prices = v;
        }
        if let Some(v) = patch.stock {
            self.stock = v;
        }
        if let Some(v) = patch.customers {
            self.customers = v;
        }
    }

    /// Sum of all four counters.
    pub fn total(&self) -> u32 {
        self.products + self.prices + self.stock + self.customers
    }
}

/// Reactions attached to a mock social post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

/// One post published by the social auto-poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: String,
    pub content: String,
    pub image: String,
    pub engagement: Engagement,
    pub timestamp: String,
}

/// Publish counter for one connected social network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCounter {
    pub name: String,
    pub icon: String,
    pub posts: u32,
}

/// Connected networks, in display order.
pub const PLATFORMS: [(&str, &str); 4] = [
    ("Instagram", "📸"),
    ("Facebook", "👥"),
    ("Telegram", "✈️"),
    ("LinkedIn", "💼"),
];

pub(crate) fn zeroed_platforms() -> Vec<PlatformCounter> {
    PLATFORMS
        .iter()
        .map(|(name, icon)| PlatformCounter {
            name: name.to_string(),
            icon: icon.to_string(),
            posts: 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_row_rollups() {
        let row = BranchReport::from_months("Алматы", 5_234_000, 1_245_000, 3_989_000);
        assert_eq!(row.total, 10_468_000);
        assert!((row.percentage - 69.786_666).abs() < 1e-3);
    }

    #[test]
    fn test_patch_merge_is_shallow() {
        let mut stats = ChatStats::default();
        stats.merge(ChatStatsPatch {
            orders: Some(2),
            ..Default::default()
        });
        assert_eq!(stats.orders, 2);
        assert_eq!(stats.messages, 0);
        assert_eq!(stats.satisfaction, DEFAULT_SATISFACTION);

        let mut sync = SyncStats::default();
        sync.merge(SyncStatsPatch {
            stock: Some(120),
            ..Default::default()
        });
        assert_eq!(sync, SyncStats { stock: 120, ..Default::default() });
        assert_eq!(sync.total(), 120);
    }
}
