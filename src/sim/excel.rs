//! Excel report automation: fills the quarterly branch table row by row.

use std::time::Duration;

use crate::config::PacingConfig;
use crate::context::AppContext;
use crate::store::model::BranchReport;
use crate::types::{DemoId, LogKind};

use super::format_grouped;
use super::runner::{Completion, Scenario};

/// Monthly figures for each branch, in table order.
pub const MOCK_ROWS: [(&str, u64, u64, u64); 3] = [
    ("Алматы", 5_234_000, 1_245_000, 3_989_000),
    ("Астана", 4_567_000, 1_123_000, 3_444_000),
    ("Шымкент", 2_345_000, 567_000, 1_778_000),
];

pub const START_LOG: &str = "🚀 Запуск автоматизации Excel...";
pub const COMPLETION_MESSAGE: &str =
    "Excel автоматизация завершена! Сэкономлено 95% времени на отчетах.";

const CLOSING_LOGS: [(&str, LogKind); 3] = [
    ("✅ Автоматизация завершена!", LogKind::Success),
    ("📈 ROI: +485% за первый год", LogKind::Info),
    ("💰 Экономия: 120 часов/месяц", LogKind::Success),
];

/// Row `step` with its rollups filled in.
pub fn report_for(step: usize) -> Option<BranchReport> {
    MOCK_ROWS
        .get(step)
        .map(|(branch, jan, feb, mar)| BranchReport::from_months(branch, *jan, *feb, *mar))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelScenario;

impl Scenario for ExcelScenario {
    fn demo(&self) -> DemoId {
        DemoId::Excel
    }

    fn total_steps(&self) -> usize {
        MOCK_ROWS.len()
    }

    fn step_delay(&self, ctx: &AppContext, _step: usize) -> Duration {
        PacingConfig::ms(ctx.pacing().excel_step_ms)
    }

    // Rows from a previous run stay visible until overwritten.
    fn begin(&self, ctx: &AppContext) {
        ctx.store().append_excel_log(START_LOG, LogKind::Info);
    }

    fn step(&self, ctx: &AppContext, step: usize) {
        let Some(row) = report_for(step) else {
            return;
        };
        let store = ctx.store();
        store.append_excel_log(
            format!("📊 {}: {} ₸", row.branch, format_grouped(row.total)),
            LogKind::Success,
        );
        store.update_excel_row(step, row);
    }

    fn finish(&self, ctx: &AppContext) -> Completion {
        for (message, kind) in CLOSING_LOGS {
            ctx.store().append_excel_log(message, kind);
        }
        Completion::success(COMPLETION_MESSAGE)
    }
}
