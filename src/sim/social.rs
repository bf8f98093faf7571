//! Social auto-poster: publishes one scheduled post per network.

use std::time::Duration;

use crate::config::PacingConfig;
use crate::context::AppContext;
use crate::store::model::{Engagement, SocialPost};
use crate::types::DemoId;

use super::runner::{Completion, Scenario};

/// (platform, content, image, likes, comments, shares)
pub const SCHEDULED_POSTS: [(&str, &str, &str, u32, u32, u32); 4] = [
    (
        "Instagram",
        "🚀 Новое поступление iPhone 15 Pro! Успейте заказать со скидкой 10% до конца недели!",
        "📱",
        247,
        23,
        12,
    ),
    (
        "Facebook",
        "💻 MacBook Air M3 теперь доступен для предзаказа! Революционная производительность для профессионалов.",
        "💻",
        156,
        34,
        28,
    ),
    (
        "Telegram",
        "⚠️ СРОЧНО! Последние 5 единиц AirPods Pro по специальной цене. Успейте оформить заказ!",
        "🎧",
        89,
        15,
        45,
    ),
    (
        "LinkedIn",
        "📈 Как автоматизация помогла нашим клиентам увеличить продажи на 340%. Изучаем кейс.",
        "📊",
        312,
        67,
        89,
    ),
];

pub fn post_for(step: usize) -> Option<SocialPost> {
    SCHEDULED_POSTS
        .get(step)
        .map(|(platform, content, image, likes, comments, shares)| SocialPost {
            platform: platform.to_string(),
            content: content.to_string(),
            image: image.to_string(),
            engagement: Engagement {
                likes: *likes,
                comments: *comments,
                shares: *shares,
            },
            // stamped by the store
            timestamp: String::new(),
        })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SocialScenario;

impl Scenario for SocialScenario {
    fn demo(&self) -> DemoId {
        DemoId::Social
    }

    fn total_steps(&self) -> usize {
        SCHEDULED_POSTS.len()
    }

    fn step_delay(&self, ctx: &AppContext, _step: usize) -> Duration {
        PacingConfig::ms(ctx.pacing().social_step_ms)
    }

    fn begin(&self, ctx: &AppContext) {
        ctx.store().clear_results(DemoId::Social);
    }

    fn step(&self, ctx: &AppContext, step: usize) {
        if let Some(post) = post_for(step) {
            ctx.store().append_social_post(post);
        }
    }

    fn finish(&self, ctx: &AppContext) -> Completion {
        let (posts, networks) = ctx.store().with_state(|s| {
            let networks = s.social.platforms.iter().filter(|p| p.posts > 0).count();
            (s.social.posts.len(), networks)
        });
        Completion::success(format!(
            "Автопостинг завершен! Опубликовано {} постов в {} соцсетях.",
            posts, networks
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixed_context;

    #[test]
    fn test_each_post_bumps_its_network() {
        let ctx = fixed_context();
        for step in 0..4 {
            SocialScenario.step(&ctx, step);
        }
        let s = ctx.store().snapshot();
        assert_eq!(s.social.posts.len(), 4);
        assert!(s.social.platforms.iter().all(|p| p.posts == 1));
        assert_eq!(s.social.posts[2].timestamp, "09:15:00");

        let done = SocialScenario.finish(&ctx);
        assert_eq!(done.message, "Автопостинг завершен! Опубликовано 4 постов в 4 соцсетях.");
    }

    #[test]
    fn test_begin_zeroes_counters() {
        let ctx = fixed_context();
        SocialScenario.step(&ctx, 0);
        SocialScenario.begin(&ctx);
        let s = ctx.store().snapshot();
        assert!(s.social.posts.is_empty());
        assert!(s.social.platforms.iter().all(|p| p.posts == 0));
    }
}
