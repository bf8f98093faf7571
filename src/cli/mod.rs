//! Terminal front end for the showcase.
//!
//! The CLI is a presentation layer only: it triggers runners, renders the
//! store's event stream as progress bars and prints the resulting state.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use clap::{Parser, Subcommand};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::RecvError;

use crate::catalog::{self, Category};
use crate::config::PacingConfig;
use crate::contact::{ContactForm, ContactPatch, ContactService};
use crate::preferences::PreferenceStore;
use crate::sim::{self, MessagingBot, RunOutcome};
use crate::store::model::ChatSender;
use crate::store::{StoreChange, StoreEvent};
use crate::{init, AppContext, DemoId, ShowcaseError, ShowcaseResult};

#[derive(Parser)]
#[command(author, version, about = "Automation showcase simulator", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./showcase.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Skip all step delays
    #[arg(long, global = true, default_value_t = false)]
    pub fast: bool,

    /// Seed for reply delays and sync counters
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one scripted demo (excel, kaspi, ai, social, integration)
    Run { demo: String },
    /// Run every scripted demo at once
    RunAll,
    /// Talk to the messaging bot; without messages the quick prompts are sent
    Chat { messages: Vec<String> },
    /// List services
    Services {
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Submit a contact request
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long)]
        urgency: Option<String>,
    },
    /// Show or toggle the colour theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCmd>,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum ThemeCmd {
    Show,
    Toggle,
}

pub async fn run() -> ShowcaseResult<()> {
    let cli = Cli::parse();
    let mut config = init(cli.config.as_deref())?;
    if cli.fast {
        config.pacing = PacingConfig::instant();
    }
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Run { demo } => {
            let demo = DemoId::from_str(&demo).map_err(|_| ShowcaseError::UnknownDemo(demo))?;
            if !sim::SCRIPTED_DEMOS.contains(&demo) {
                return Err(ShowcaseError::invalid_input(format!(
                    "{} is interactive; try `showcase chat`",
                    demo
                )));
            }
            run_with_progress(&ctx, &[demo]).await?;
            print_summary(&ctx, demo);
        }
        Commands::RunAll => {
            run_with_progress(&ctx, &sim::SCRIPTED_DEMOS).await?;
            for demo in sim::SCRIPTED_DEMOS {
                print_summary(&ctx, demo);
            }
        }
        Commands::Chat { messages } => chat(&ctx, messages).await?,
        Commands::Services { category } => {
            let category = Category::from_str(&category)
                .map_err(|_| ShowcaseError::invalid_input(format!("unknown category: {}", category)))?;
            print_services(category);
        }
        Commands::Contact {
            name,
            email,
            company,
            phone,
            service,
            message,
            budget,
            urgency,
        } => {
            let mut form = ContactForm::new();
            form.update(ContactPatch {
                name: Some(name),
                email: Some(email),
                company,
                phone,
                service,
                message,
                budget,
                urgency,
            });
            let service = ContactService::from_config(ctx.clone())?;
            let receipt = service.submit(&mut form).await?;
            println!("{}", serde_json::to_string(&receipt)?);
            print_toasts(&ctx);
        }
        Commands::Theme { action } => {
            let mut prefs = PreferenceStore::load(ctx.config().preferences_path())?;
            if let Some(ThemeCmd::Toggle) = action {
                prefs.toggle_theme()?;
            }
            println!("{}", prefs.theme());
        }
    }
    Ok(())
}

fn progress_bar(demo: DemoId) -> ProgressBar {
    let pb = ProgressBar::new(100);
    let style = ProgressStyle::with_template(
        "{prefix:>12.bold} [{bar:40.cyan/blue}] {pos:>3}% {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ");
    pb.set_style(style);
    pb.set_prefix(demo.to_string());
    pb
}

/// Label of step `i` as the widget would show it.
fn step_label(demo: DemoId, i: usize) -> Option<String> {
    match demo {
        DemoId::Excel => sim::excel::MOCK_ROWS.get(i).map(|r| r.0.to_string()),
        DemoId::Marketplace => sim::marketplace::MOCK_PRODUCTS.get(i).map(|p| p.0.to_string()),
        DemoId::Insight => sim::insight::phase_label(i).map(str::to_string),
        DemoId::Social => sim::social::SCHEDULED_POSTS.get(i).map(|p| p.0.to_string()),
        DemoId::Integration => sim::sync::OPERATIONS
            .get(i)
            .map(|op| format!("{} ({} → {})", op.name, op.from, op.to)),
        DemoId::Messaging => None,
    }
}

async fn run_with_progress(ctx: &AppContext, demos: &[DemoId]) -> ShowcaseResult<()> {
    let multi = MultiProgress::new();
    let bars: BTreeMap<DemoId, ProgressBar> = demos
        .iter()
        .map(|d| (*d, multi.add(progress_bar(*d))))
        .collect();
    for pb in bars.values() {
        pb.enable_steady_tick(StdDuration::from_millis(100));
    }

    let mut events = ctx.store().subscribe();
    let watched = bars.clone();
    let watcher = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(StoreEvent { demo, change }) => {
                    let Some(pb) = watched.get(&demo) else { continue };
                    match change {
                        StoreChange::Progress(p) => pb.set_position(p.round() as u64),
                        StoreChange::Step(i) => pb.set_message(step_label(demo, i).unwrap_or_default()),
                        StoreChange::RunFinished => pb.finish_with_message("готово"),
                        _ => {}
                    }
                }
                Err(RecvError::Lagged(n)) => log::warn!("progress view skipped {} events", n),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let handles: Vec<_> = demos.iter().map(|d| (*d, spawn_demo(ctx, *d))).collect();
    for (demo, handle) in handles {
        match handle.await?? {
            RunOutcome::AlreadyRunning => log::warn!("{} was already running", demo),
            RunOutcome::Interrupted { steps } => log::warn!("{} was reset after {} steps", demo, steps),
            RunOutcome::Completed { .. } => {}
        }
    }

    watcher.abort();
    for pb in bars.values() {
        if !pb.is_finished() {
            pb.finish();
        }
    }
    print_toasts(ctx);
    Ok(())
}

fn spawn_demo(ctx: &AppContext, demo: DemoId) -> tokio::task::JoinHandle<ShowcaseResult<RunOutcome>> {
    let ctx = ctx.clone();
    tokio::spawn(async move { sim::run_demo(&ctx, demo).await })
}

async fn chat(ctx: &AppContext, messages: Vec<String>) -> ShowcaseResult<()> {
    let bot = MessagingBot::new(ctx.clone());
    if let Some(welcome) = bot.activate() {
        welcome.await?;
    }

    if messages.is_empty() {
        for i in 0..sim::messaging::QUICK_MESSAGES.len() {
            if let Some(reply) = bot.send_quick(i) {
                reply.await?;
            }
        }
    } else {
        for text in &messages {
            if let Some(reply) = bot.send_message(text, ChatSender::User) {
                reply.await?;
            }
        }
    }

    let chat = ctx.store().snapshot().chat;
    for m in &chat.messages {
        let who = match m.sender {
            ChatSender::User => "Вы",
            ChatSender::Bot => "Бот",
        };
        println!("[{}] {}: {}", m.timestamp, who, m.text);
    }
    println!(
        "сообщений: {}, заказов: {}, ответ: {}с, удовлетворенность: {}%",
        chat.stats.messages, chat.stats.orders, chat.stats.response_time, chat.stats.satisfaction
    );
    Ok(())
}

fn print_toasts(ctx: &AppContext) {
    for n in ctx.notifications().active() {
        println!("[{}] {}", n.severity, n.message);
    }
}

fn print_summary(ctx: &AppContext, demo: DemoId) {
    let s = ctx.store().snapshot();
    match demo {
        DemoId::Excel => {
            for row in &s.excel.rows {
                println!(
                    "{:<10} {:>12} ₸ {:>6.1}%",
                    row.branch,
                    sim::format_grouped(row.total),
                    row.percentage
                );
            }
            for log in &s.excel.logs {
                println!("[{}] {}", log.timestamp, log.message);
            }
        }
        DemoId::Marketplace => {
            for p in &s.marketplace.products {
                println!("{:<20} {:>10} ₸ ★{} {}", p.name, sim::format_grouped(p.price), p.rating, p.seller);
            }
            let st = s.marketplace.stats;
            println!(
                "найдено: {}, средняя цена: {} ₸, скорость: {}/с",
                st.found,
                sim::format_grouped(st.avg_price),
                st.speed
            );
        }
        DemoId::Insight => {
            for i in &s.insight.results {
                let impact = i.impact.as_deref().unwrap_or("");
                println!("• {} ({:?}): {} {}", i.title, i.kind, i.description, impact);
            }
        }
        DemoId::Social => {
            for p in &s.social.platforms {
                println!("{} {:<10} {}", p.icon, p.name, p.posts);
            }
        }
        DemoId::Integration => {
            let st = s.sync.stats;
            println!(
                "товары: {}, цены: {}, остатки: {}, клиенты: {} (всего {})",
                st.products,
                st.prices,
                st.stock,
                st.customers,
                st.total()
            );
        }
        DemoId::Messaging => {}
    }
}

fn print_services(category: Category) {
    println!("{} {}", category.icon(), category.label());
    for s in catalog::filter(category) {
        let badge = if s.popular { " ★" } else { "" };
        println!("{}{} | {} | {} | {}", s.name, badge, s.price, s.timeline, s.roi);
        for f in s.features {
            println!("    - {}", f);
        }
        match catalog::demo_for(s) {
            Some(DemoId::Messaging) => println!("    демо: showcase chat"),
            Some(demo) => println!("    демо: showcase run {}", demo),
            None => {}
        }
    }
}
