//! Scripted simulators for the demo gallery.
//!
//! Five demos are linear runs driven by a [`Runner`] over a [`Scenario`]; the
//! messaging bot is event-driven and lives in [`messaging`]. Nothing here does
//! real work: each step writes a fixed mock record into the store and waits
//! on the context's clock.

pub mod excel;
pub mod insight;
pub mod marketplace;
pub mod messaging;
pub mod runner;
pub mod social;
pub mod sync;

use futures::future::join_all;

use crate::context::AppContext;
use crate::error::{Result, ShowcaseError};
use crate::types::DemoId;

pub use excel::ExcelScenario;
pub use insight::InsightScenario;
pub use marketplace::MarketplaceScenario;
pub use messaging::MessagingBot;
pub use runner::{Completion, RunOutcome, Runner, Scenario};
pub use social::SocialScenario;
pub use sync::SyncScenario;

/// Demos that run start-to-finish without user input.
pub const SCRIPTED_DEMOS: [DemoId; 5] = [
    DemoId::Excel,
    DemoId::Marketplace,
    DemoId::Insight,
    DemoId::Social,
    DemoId::Integration,
];

/// Runs one scripted demo to completion.
///
/// The messaging bot has no linear run and is rejected with
/// [`ShowcaseError::InvalidInput`].
pub async fn run_demo(ctx: &AppContext, demo: DemoId) -> Result<RunOutcome> {
    let outcome = match demo {
        DemoId::Excel => Runner::new(ctx.clone(), ExcelScenario).run().await,
        DemoId::Marketplace => Runner::new(ctx.clone(), MarketplaceScenario).run().await,
        DemoId::Insight => Runner::new(ctx.clone(), InsightScenario).run().await,
        DemoId::Social => Runner::new(ctx.clone(), SocialScenario).run().await,
        DemoId::Integration => Runner::new(ctx.clone(), SyncScenario).run().await,
        DemoId::Messaging => {
            return Err(ShowcaseError::invalid_input(
                "the messaging demo is interactive; use the bot instead",
            ))
        }
    };
    Ok(outcome)
}

/// Runs every scripted demo concurrently and waits for all of them.
pub async fn run_all(ctx: &AppContext) -> Vec<(DemoId, RunOutcome)> {
    let runs = SCRIPTED_DEMOS.iter().map(|demo| {
        let ctx = ctx.clone();
        let demo = *demo;
        async move {
            // Only Messaging is rejected, and it is not scripted
            let outcome = run_demo(&ctx, demo).await.unwrap_or(RunOutcome::AlreadyRunning);
            (demo, outcome)
        }
    });
    join_all(runs).await
}

/// Formats an integer with `,` thousands separators, e.g. `10,468,000`.
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(2847), "2,847");
        assert_eq!(format_grouped(10_468_000), "10,468,000");
    }
}
