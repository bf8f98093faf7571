//! Insight engine: walks through analysis phases, then publishes a fixed
//! batch of findings.

use std::time::Duration;

use crate::config::PacingConfig;
use crate::context::AppContext;
use crate::store::model::{Insight, InsightKind, Priority};
use crate::types::DemoId;

use super::runner::{Completion, Scenario};

/// Labels shown while each phase runs.
pub const ANALYSIS_PHASES: [&str; 6] = [
    "Загрузка данных...",
    "Анализ паттернов продаж...",
    "Изучение поведения клиентов...",
    "Генерация инсайтов...",
    "Формирование рекомендаций...",
    "Расчет потенциального ROI...",
];

pub const COMPLETION_MESSAGE: &str =
    "AI анализ завершен! Найдено 3 возможности для роста бизнеса на 2.8M ₸.";

const MOCK_INSIGHTS: [(InsightKind, &str, &str, Priority, &str); 5] = [
    (
        InsightKind::Insight,
        "Тренд продаж",
        "Обнаружен рост продаж на 23% в сегменте электроники за последний месяц",
        Priority::High,
        "+2.8M ₸ потенциальной прибыли",
    ),
    (
        InsightKind::Insight,
        "Поведение клиентов",
        "67% покупок совершается в вечернее время (18:00-22:00)",
        Priority::Medium,
        "Оптимизация рабочего времени",
    ),
    (
        InsightKind::Recommendation,
        "Увеличить закупки электроники",
        "Спрос превышает предложение на 45%. Рекомендуется увеличить закупки на 30%",
        Priority::High,
        "+34% к выручке",
    ),
    (
        InsightKind::Recommendation,
        "Добавить вечернюю смену",
        "Пиковая активность клиентов приходится на вечерние часы",
        Priority::Medium,
        "+18% обработанных заказов",
    ),
    (
        InsightKind::Metric,
        "Упущенная прибыль",
        "Потенциальная прибыль при оптимизации ассортимента составляет 2.8M ₸",
        Priority::High,
        "287% ROI за год",
    ),
];

/// The findings published at the end of every run.
pub fn mock_insights() -> Vec<Insight> {
    MOCK_INSIGHTS
        .iter()
        .map(|(kind, title, description, priority, impact)| Insight {
            kind: *kind,
            title: title.to_string(),
            description: description.to_string(),
            priority: Some(*priority),
            impact: Some(impact.to_string()),
        })
        .collect()
}

/// Label of the phase at `step`, if any.
pub fn phase_label(step: usize) -> Option<&'static str> {
    ANALYSIS_PHASES.get(step).copied()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InsightScenario;

impl Scenario for InsightScenario {
    fn demo(&self) -> DemoId {
        DemoId::Insight
    }

    fn total_steps(&self) -> usize {
        ANALYSIS_PHASES.len()
    }

    fn step_delay(&self, ctx: &AppContext, _step: usize) -> Duration {
        PacingConfig::ms(ctx.pacing().insight_step_ms)
    }

    fn begin(&self, ctx: &AppContext) {
        ctx.store().clear_results(DemoId::Insight);
    }

    // The phase itself is carried by the store's current step.
    fn step(&self, _ctx: &AppContext, step: usize) {
        if let Some(label) = phase_label(step) {
            log::debug!("insight: {}", label);
        }
    }

    fn finish(&self, ctx: &AppContext) -> Completion {
        ctx.store().set_insights(mock_insights());
        Completion::success(COMPLETION_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_context;

    #[test]
    fn test_results_only_appear_at_finish() {
        let ctx = test_context();
        for step in 0..ANALYSIS_PHASES.len() {
            InsightScenario.step(&ctx, step);
        }
        assert!(ctx.store().snapshot().insight.results.is_empty());

        InsightScenario.finish(&ctx);
        let results = ctx.store().snapshot().insight.results;
        assert_eq!(results.len(), 5);
        assert_eq!(results[4].kind, InsightKind::Metric);
        let high = results.iter().filter(|i| i.priority == Some(Priority::High)).count();
        assert_eq!(high, 3);
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(phase_label(0), Some("Загрузка данных..."));
        assert_eq!(phase_label(6), None);
    }
}
