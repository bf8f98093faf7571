//! ERP integration: five sync operations between 1C, the web shop, the CRM
//! and the warehouse. Each operation reports a random record count.

use std::ops::Range;
use std::time::Duration;

use crate::config::PacingConfig;
use crate::context::AppContext;
use crate::store::model::SyncStatsPatch;
use crate::types::DemoId;

use super::runner::{Completion, Scenario};

/// Record counts are drawn from this range.
pub const RECORD_RANGE: Range<u64> = 100..600;

pub const COMPLETION_MESSAGE: &str =
    "Интеграция завершена! Синхронизировано 2,847 записей между системами.";

/// Counter touched by a sync operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTarget {
    Products,
    Prices,
    Stock,
    /// Shown in the flow but has no counter
    Orders,
    Customers,
}

impl SyncTarget {
    fn patch(self, count: u32) -> Option<SyncStatsPatch> {
        let mut patch = SyncStatsPatch::default();
        match self {
            SyncTarget::Products => patch.products = Some(count),
            SyncTarget::Prices => patch.prices = Some(count),
            SyncTarget::Stock => patch.stock = Some(count),
            SyncTarget::Customers => patch.customers = Some(count),
            SyncTarget::Orders => return None,
        }
        Some(patch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOperation {
    pub target: SyncTarget,
    pub name: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

pub const OPERATIONS: [SyncOperation; 5] = [
    SyncOperation { target: SyncTarget::Products, name: "Синхронизация товаров", from: "1С", to: "Сайт" },
    SyncOperation { target: SyncTarget::Prices, name: "Обновление цен", from: "1С", to: "Сайт" },
    SyncOperation { target: SyncTarget::Stock, name: "Остатки на складе", from: "Склад", to: "1С" },
    SyncOperation { target: SyncTarget::Orders, name: "Новые заказы", from: "Сайт", to: "1С" },
    SyncOperation { target: SyncTarget::Customers, name: "База клиентов", from: "CRM", to: "1С" },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncScenario;

impl Scenario for SyncScenario {
    fn demo(&self) -> DemoId {
        DemoId::Integration
    }

    fn total_steps(&self) -> usize {
        OPERATIONS.len()
    }

    fn step_delay(&self, ctx: &AppContext, _step: usize) -> Duration {
        PacingConfig::ms(ctx.pacing().sync_step_ms)
    }

    fn begin(&self, ctx: &AppContext) {
        ctx.store().clear_results(DemoId::Integration);
    }

    fn step(&self, ctx: &AppContext, step: usize) {
        let Some(op) = OPERATIONS.get(step) else {
            return;
        };
        let count = ctx.random_in(RECORD_RANGE) as u32;
        log::debug!("sync: {} {} -> {} ({} records)", op.name, op.from, op.to, count);
        if let Some(patch) = op.target.patch(count) {
            ctx.store().update_sync_stats(patch);
        }
    }

    fn finish(&self, _ctx: &AppContext) -> Completion {
        Completion::success(COMPLETION_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::model::SyncStats;
    use crate::test_utils::test_context;

    #[test]
    fn test_orders_step_touches_no_counter() {
        let ctx = test_context();
        SyncScenario.step(&ctx, 3);
        assert_eq!(ctx.store().snapshot().sync.stats, SyncStats::default());
    }

    #[test]
    fn test_counters_land_in_range() {
        let ctx = test_context();
        for step in 0..OPERATIONS.len() {
            SyncScenario.step(&ctx, step);
        }
        let stats = ctx.store().snapshot().sync.stats;
        for value in [stats.products, stats.prices, stats.stock, stats.customers] {
            assert!(RECORD_RANGE.contains(&(value as u64)), "{} out of range", value);
        }
    }
}
