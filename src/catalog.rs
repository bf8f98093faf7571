//! Static catalog of the automation services on offer.

use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::types::DemoId;

/// Filter tab of the services section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Bots,
    Integration,
    Parsing,
    Ai,
    Automation,
}

impl Default for Category {
    fn default() -> Self {
        Category::All
    }
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Bots,
        Category::Integration,
        Category::Parsing,
        Category::Ai,
        Category::Automation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "Все услуги",
            Category::Bots => "Боты",
            Category::Integration => "Интеграции",
            Category::Parsing => "Парсинг",
            Category::Ai => "AI решения",
            Category::Automation => "Автоматизация",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::All => "🎯",
            Category::Bots => "🤖",
            Category::Integration => "🔗",
            Category::Parsing => "🕷️",
            Category::Ai => "🧠",
            Category::Automation => "⚡",
        }
    }
}

/// One sellable service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: &'static str,
    pub category: Category,
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub timeline: &'static str,
    pub roi: &'static str,
    pub popular: bool,
    pub features: [&'static str; 5],
    /// Tab id of the matching demo; may name a demo the gallery lacks
    pub demo_type: Option<&'static str>,
}

pub static SERVICES: [Service; 6] = [
    Service {
        id: "whatsapp-bot",
        category: Category::Bots,
        name: "WhatsApp бот для продаж",
        description: "Умный помощник для автоматической обработки заказов, консультаций и поддержки клиентов 24/7",
        price: "от 300,000 ₸",
        timeline: "5-7 дней",
        roi: "+340% к конверсии",
        popular: true,
        features: [
            "Прием и обработка заказов",
            "Автоответы на частые вопросы",
            "Интеграция с CRM и 1С",
            "Аналитика и отчеты",
            "Поддержка на казахском и русском",
        ],
        demo_type: Some("whatsapp"),
    },
    Service {
        id: "telegram-bot",
        category: Category::Bots,
        name: "Telegram бот с AI",
        description: "Многофункциональный бот с искусственным интеллектом для бизнеса и сообществ",
        price: "от 250,000 ₸",
        timeline: "4-6 дней",
        roi: "+280% эффективности",
        popular: false,
        features: [
            "AI чат с GPT-4",
            "Управление заказами",
            "Системы лояльности",
            "Интеграция с платежами",
            "Административная панель",
        ],
        demo_type: Some("telegram"),
    },
    Service {
        id: "excel-automation",
        category: Category::Automation,
        name: "Excel автоматизация",
        description: "Полная автоматизация работы с отчетами, таблицами и данными в Excel",
        price: "от 150,000 ₸",
        timeline: "3-5 дней",
        roi: "95% экономии времени",
        popular: true,
        features: [
            "Автоматические отчеты",
            "Консолидация данных",
            "Уведомления по email",
            "Интеграция с базами данных",
            "Создание дашбордов",
        ],
        demo_type: Some("excel"),
    },
    Service {
        id: "kaspi-parser",
        category: Category::Parsing,
        name: "Kaspi.kz парсер",
        description: "Автоматический сбор цен, характеристик и отзывов товаров с Kaspi.kz",
        price: "от 200,000 ₸",
        timeline: "2-4 дня",
        roi: "+200% скорости анализа",
        popular: false,
        features: [
            "Сбор цен конкурентов",
            "Мониторинг остатков",
            "Анализ отзывов",
            "Экспорт в Excel/CSV",
            "Уведомления об изменениях",
        ],
        demo_type: Some("kaspi"),
    },
    Service {
        id: "1c-integration",
        category: Category::Integration,
        name: "1С интеграция",
        description: "Синхронизация 1С с сайтом, CRM, складскими системами и другими сервисами",
        price: "от 500,000 ₸",
        timeline: "7-14 дней",
        roi: "+450% эффективности",
        popular: true,
        features: [
            "Двусторонняя синхронизация",
            "Обмен товарами и заказами",
            "Синхронизация клиентов",
            "Контроль остатков",
            "Отчеты и аналитика",
        ],
        demo_type: Some("integration"),
    },
    Service {
        id: "ai-assistant",
        category: Category::Ai,
        name: "AI ассистент для бизнеса",
        description: "Умный помощник на базе GPT для анализа данных и принятия решений",
        price: "от 400,000 ₸",
        timeline: "5-10 дней",
        roi: "+320% к прибыли",
        popular: false,
        features: [
            "Анализ больших данных",
            "Прогнозирование продаж",
            "Рекомендации по развитию",
            "Автоматические инсайты",
            "Интеграция с системами",
        ],
        demo_type: Some("ai"),
    },
];

/// Services shown under `category`, in catalog order.
pub fn filter(category: Category) -> Vec<&'static Service> {
    SERVICES
        .iter()
        .filter(|s| category == Category::All || s.category == category)
        .collect()
}

pub fn find(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.id == id)
}

/// Demo that showcases `service`, if the gallery has one.
pub fn demo_for(service: &Service) -> Option<DemoId> {
    service.demo_type.and_then(|t| DemoId::from_str(t).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_counts() {
        assert_eq!(filter(Category::All).len(), 6);
        assert_eq!(filter(Category::Bots).len(), 2);
        assert_eq!(filter(Category::Ai)[0].id, "ai-assistant");
    }

    #[test]
    fn test_demo_mapping() {
        assert_eq!(demo_for(find("whatsapp-bot").unwrap()), Some(DemoId::Messaging));
        assert_eq!(demo_for(find("kaspi-parser").unwrap()), Some(DemoId::Marketplace));
        assert_eq!(demo_for(find("telegram-bot").unwrap()), None);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("AI".parse::<Category>().unwrap(), Category::Ai);
        assert!("robots".parse::<Category>().is_err());
    }
}
