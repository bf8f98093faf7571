//! Marketplace scanner: "discovers" eight listings one at a time.

use std::time::Duration;

use crate::config::PacingConfig;
use crate::context::AppContext;
use crate::store::model::ScannedProduct;
use crate::types::DemoId;

use super::runner::{Completion, Scenario};

/// (name, price in tenge, rating, seller)
pub const MOCK_PRODUCTS: [(&str, u64, f32, &str); 8] = [
    ("iPhone 15 Pro", 649_900, 4.8, "Apple Store KZ"),
    ("Samsung Galaxy S24", 499_900, 4.7, "Samsung KZ"),
    ("Xiaomi 14 Pro", 379_900, 4.6, "Mi Store"),
    ("MacBook Air M3", 749_900, 4.9, "Apple Store KZ"),
    ("iPad Pro 2024", 549_900, 4.8, "Apple Store KZ"),
    ("AirPods Pro 3", 149_900, 4.7, "Audio Plus"),
    ("Apple Watch 10", 249_900, 4.6, "Watch Zone"),
    ("Sony WH-1000XM6", 189_900, 4.8, "Sony Official"),
];

pub fn product_for(step: usize) -> Option<ScannedProduct> {
    MOCK_PRODUCTS
        .get(step)
        .map(|(name, price, rating, seller)| ScannedProduct {
            id: (step + 1).to_string(),
            name: name.to_string(),
            price: *price,
            rating: *rating,
            seller: seller.to_string(),
        })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarketplaceScenario;

impl Scenario for MarketplaceScenario {
    fn demo(&self) -> DemoId {
        DemoId::Marketplace
    }

    fn total_steps(&self) -> usize {
        MOCK_PRODUCTS.len()
    }

    fn step_delay(&self, ctx: &AppContext, _step: usize) -> Duration {
        PacingConfig::ms(ctx.pacing().marketplace_step_ms)
    }

    fn begin(&self, ctx: &AppContext) {
        ctx.store().clear_results(DemoId::Marketplace);
    }

    fn step(&self, ctx: &AppContext, step: usize) {
        if let Some(product) = product_for(step) {
            let stats = ctx.store().append_product(product);
            log::trace!("marketplace: {} found, avg {}", stats.found, stats.avg_price);
        }
    }

    fn finish(&self, ctx: &AppContext) -> Completion {
        let found = ctx.store().with_state(|s| s.marketplace.stats.found);
        let seconds = (MOCK_PRODUCTS.len() as u64 * ctx.pacing().marketplace_step_ms) as f64 / 1000.0;
        Completion::success(format!(
            "Kaspi парсинг завершен! Найдено {} товаров за {} секунд.",
            found, seconds
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::runner::Runner;
    use crate::test_utils::{get_test_config, test_context};
    use crate::clock::HeadlessClock;
    use std::sync::Arc;

    #[test]
    fn test_avg_price_is_floor_of_running_mean() {
        let ctx = test_context();
        let runner = Runner::new(ctx.clone(), MarketplaceScenario);
        let mut sum = 0;
        for k in 0..MOCK_PRODUCTS.len() {
            runner.step_once(k);
            sum += MOCK_PRODUCTS[k].1;
            let stats = ctx.store().snapshot().marketplace.stats;
            let found = (k + 1) as u64;
            assert_eq!(stats.found as u64, found);
            assert_eq!(stats.avg_price, sum / found);
            assert_eq!(stats.speed as u64, found * 3);
        }
        assert_eq!(ctx.store().snapshot().marketplace.products[1].id, "2");
    }

    #[test]
    fn test_completion_message_uses_default_pacing() {
        let ctx = test_context();
        for k in 0..8 {
            MarketplaceScenario.step(&ctx, k);
        }
        let done = MarketplaceScenario.finish(&ctx);
        assert_eq!(done.message, "Kaspi парсинг завершен! Найдено 8 товаров за 4 секунд.");
    }

    #[test]
    fn test_completion_message_keeps_fractional_seconds() {
        let mut config = get_test_config();
        config.pacing.marketplace_step_ms = 300;
        let ctx = AppContext::with_clock(config, Arc::new(HeadlessClock));
        let done = MarketplaceScenario.finish(&ctx);
        assert!(done.message.ends_with("за 2.4 секунд."), "{}", done.message);
    }
}
