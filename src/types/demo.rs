use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies one of the six demo widgets in the gallery.
///
/// The string forms match the tab ids used by the site (`excel`, `kaspi`,
/// `whatsapp`, `ai`, `social`, `integration`), with a few readable aliases
/// accepted when parsing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DemoId {
    /// Excel branch report automation
    Excel,
    /// Marketplace (Kaspi.kz) product scanner
    #[strum(to_string = "kaspi", serialize = "marketplace")]
    #[serde(rename = "kaspi")]
    Marketplace,
    /// Messaging (WhatsApp) sales bot
    #[strum(to_string = "whatsapp", serialize = "messaging", serialize = "bot")]
    #[serde(rename = "whatsapp")]
    Messaging,
    /// AI insight engine
    #[strum(to_string = "ai", serialize = "insight")]
    #[serde(rename = "ai")]
    Insight,
    /// Social network auto-posting
    Social,
    /// 1C / ERP integration sync
    #[strum(to_string = "integration", serialize = "sync")]
    #[serde(rename = "integration")]
    Integration,
}

impl DemoId {
    /// All demos in gallery tab order.
    pub const ALL: [DemoId; 6] = [
        DemoId::Excel,
        DemoId::Marketplace,
        DemoId::Messaging,
        DemoId::Insight,
        DemoId::Social,
        DemoId::Integration,
    ];
}

impl Default for DemoId {
    fn default() -> Self {
        DemoId::Excel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_demo_id_parsing_and_aliases() {
        assert_eq!(DemoId::from_str("excel").unwrap(), DemoId::Excel);
        assert_eq!(DemoId::from_str("kaspi").unwrap(), DemoId::Marketplace);
        assert_eq!(DemoId::from_str("Marketplace").unwrap(), DemoId::Marketplace);
        assert_eq!(DemoId::from_str("whatsapp").unwrap(), DemoId::Messaging);
        assert_eq!(DemoId::from_str("sync").unwrap(), DemoId::Integration);
        assert!(DemoId::from_str("crm").is_err());
    }

    #[test]
    fn test_demo_id_display_uses_tab_id() {
        assert_eq!(DemoId::Marketplace.to_string(), "kaspi");
        assert_eq!(DemoId::Insight.to_string(), "ai");
        assert_eq!(DemoId::Social.to_string(), "social");
    }
}
