use showcase_sim::clock::FixedClock;
use showcase_sim::config::Config;
use showcase_sim::sim::messaging::{reply_for, DEFAULT_REPLY, REPLIES, WELCOME_MESSAGE};
use showcase_sim::sim::MessagingBot;
use showcase_sim::store::model::ChatSender;
use showcase_sim::AppContext;
use chrono::NaiveTime;
use std::sync::Arc;
use std::time::Duration;

fn bot() -> (AppContext, MessagingBot) {
    let mut config = Config::default();
    config.simulation.seed = Some(5);
    let clock = FixedClock(NaiveTime::from_hms_opt(18, 5, 0).unwrap());
    let ctx = AppContext::with_clock(config, Arc::new(clock));
    (ctx.clone(), MessagingBot::new(ctx))
}

#[test]
fn test_reply_selection() {
    assert_eq!(reply_for("Хочу заказать iPhone 15"), REPLIES[0].1);
    assert_eq!(reply_for("что-то непонятное"), DEFAULT_REPLY);
}

#[tokio::test(start_paused = true)]
async fn test_activation_flow() {
    let (ctx, bot) = bot();
    let welcome = bot.activate().expect("bot was offline");
    assert!(ctx.store().bot_active());
    assert!(ctx.store().snapshot().chat.messages.is_empty());
    assert_eq!(ctx.notifications().active().len(), 1);

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert!(ctx.store().snapshot().chat.messages.is_empty());

    let msg = welcome.await.unwrap();
    assert_eq!(msg.text, WELCOME_MESSAGE);
    assert_eq!(msg.timestamp, "18:05");
}

#[tokio::test(start_paused = true)]
async fn test_empty_message_does_nothing() {
    let (ctx, bot) = bot();
    assert!(bot.send_message("", ChatSender::User).is_none());
    assert!(bot.send_message(" \t\n", ChatSender::User).is_none());
    let chat = ctx.store().snapshot().chat;
    assert!(chat.messages.is_empty());
    assert_eq!(chat.stats.messages, 0);
}

#[tokio::test(start_paused = true)]
async fn test_every_user_message_gets_one_reply() {
    let (ctx, bot) = bot();
    bot.activate().unwrap().await.unwrap();

    let started = tokio::time::Instant::now();
    let handles: Vec<_> = (0..4).filter_map(|i| bot.send_quick(i)).collect();
    assert_eq!(handles.len(), 4);
    for h in handles {
        h.await.unwrap();
    }
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed <= Duration::from_millis(1501));

    let chat = ctx.store().snapshot().chat;
    // welcome + 4 user + 4 bot
    assert_eq!(chat.messages.len(), 9);
    assert_eq!(chat.stats.messages, 9);
    let bot_replies = chat.messages.iter().filter(|m| m.sender == ChatSender::Bot).count();
    assert_eq!(bot_replies, 5);
    // "Хочу заказать iPhone 15" and "Где мой заказ №12345?"
    assert_eq!(chat.stats.orders, 2);
}

#[tokio::test(start_paused = true)]
async fn test_bot_messages_get_no_reply() {
    let (ctx, bot) = bot();
    assert!(bot.send_message("hello", ChatSender::Bot).is_none());
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(ctx.store().snapshot().chat.messages.len(), 1);
}
