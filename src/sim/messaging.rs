//! Messaging bot: a keyword-matching sales assistant.
//!
//! Unlike the scripted demos this one is event-driven. Every user message
//! schedules exactly one bot reply after a randomized delay; replies are
//! spawned tasks, so several can be in flight and land in delay order.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::PacingConfig;
use crate::context::AppContext;
use crate::store::model::{ChatMessage, ChatSender};
use crate::types::{DemoId, Severity};

pub const WELCOME_MESSAGE: &str =
    "🤖 Бот активирован! Готов помочь клиентам 24/7. Используйте быстрые кнопки для тестирования.";

pub const ACTIVATED_MESSAGE: &str = "WhatsApp бот активирован! Готов к обработке сообщений.";

pub const DEFAULT_REPLY: &str =
    "🤝 Спасибо! Обработал запрос и передам менеджеру. Что-то еще могу помочь?";

/// Keyword table scanned in order; the first keyword contained in the
/// lowercased message wins.
pub const REPLIES: [(&str, &str); 5] = [
    (
        "iphone",
        "📱 Отличный выбор! iPhone 15 Pro доступен. Цена: 649,900 ₸. Хотите оформить заказ?",
    ),
    (
        "заказ",
        "🛒 Для заказа нужен номер телефона и адрес доставки. Рассчитаю стоимость доставки.",
    ),
    (
        "12345",
        "🚚 Заказ №12345 в пути. Ожидаемая доставка: завтра до 18:00. Курьер позвонит за час.",
    ),
    (
        "возврат",
        "↩️ Возврат возможен в течение 14 дней. Нужна причина и фото товара. Оформлю заявку.",
    ),
    (
        "оператор",
        "👤 Подключаю менеджера... Среднее время: 2 минуты. Пока жду, отвечу на вопросы.",
    ),
];

/// Canned prompts offered as buttons while the bot is online.
pub const QUICK_MESSAGES: [&str; 4] = [
    "Хочу заказать iPhone 15",
    "Где мой заказ №12345?",
    "Нужна помощь с возвратом",
    "Связать с оператором",
];

/// Substring that marks a message as an order.
const ORDER_KEYWORD: &str = "заказ";

/// Picks the bot's reply to `text`. Pure.
pub fn reply_for(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    REPLIES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

/// Whether a reply to `text` counts towards the order counter.
///
/// Matched against the text as typed, not lowercased.
pub fn counts_as_order(text: &str) -> bool {
    text.contains(ORDER_KEYWORD)
}

/// Handle for driving the messaging demo.
#[derive(Clone)]
pub struct MessagingBot {
    ctx: AppContext,
}

impl MessagingBot {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub fn is_online(&self) -> bool {
        self.ctx.store().bot_active()
    }

    /// Brings the bot online: clears the chat, pushes the "activated" toast
    /// and schedules the welcome message.
    ///
    /// Returns `None` if the bot was already online.
    pub fn activate(&self) -> Option<JoinHandle<ChatMessage>> {
        let store = self.ctx.store();
        if store.bot_active() {
            log::debug!("messaging: bot already online");
            return None;
        }

        store.clear_results(DemoId::Messaging);
        store.set_bot_active(true);
        self.ctx.notifications().notify(ACTIVATED_MESSAGE, Severity::Success);
        log::info!("messaging: bot online");

        let ctx = self.ctx.clone();
        let delay = PacingConfig::ms(ctx.pacing().bot_welcome_ms);
        Some(tokio::spawn(async move {
            ctx.clock().sleep(delay).await;
            ctx.store().append_chat_message(WELCOME_MESSAGE, ChatSender::Bot)
        }))
    }

    /// Appends `text` to the chat. A user message schedules one bot reply
    /// whose handle is returned. Whitespace-only text is ignored.
    pub fn send_message(&self, text: &str, sender: ChatSender) -> Option<JoinHandle<ChatMessage>> {
        if text.trim().is_empty() {
            return None;
        }

        self.ctx.store().append_chat_message(text, sender);
        if sender != ChatSender::User {
            return None;
        }

        let delay = self.reply_delay();
        let ctx = self.ctx.clone();
        let text = text.to_string();
        log::debug!("messaging: reply scheduled in {:?}", delay);
        Some(tokio::spawn(async move {
            ctx.clock().sleep(delay).await;
            let store = ctx.store();
            let reply = store.append_chat_message(reply_for(&text), ChatSender::Bot);
            if counts_as_order(&text) {
                store.add_orders(1);
            }
            reply
        }))
    }

    /// Sends the quick prompt at `index` as the user. Does nothing while the
    /// bot is offline or for an unknown index.
    pub fn send_quick(&self, index: usize) -> Option<JoinHandle<ChatMessage>> {
        if !self.is_online() {
            return None;
        }
        let text = QUICK_MESSAGES.get(index)?;
        self.send_message(text, ChatSender::User)
    }

    /// Clears the chat and takes the bot offline. Replies already scheduled
    /// still land.
    pub fn reset(&self) {
        self.ctx.store().reset(DemoId::Messaging);
        log::info!("messaging: bot offline");
    }

    fn reply_delay(&self) -> Duration {
        let pacing = self.ctx.pacing();
        let jitter = self.ctx.random_in(0..pacing.bot_reply_jitter_ms);
        PacingConfig::ms(pacing.bot_reply_min_ms + jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_context;

    #[test]
    fn test_reply_table() {
        assert_eq!(reply_for("Хочу заказать iPhone 15"), REPLIES[0].1);
        assert_eq!(reply_for("IPHONE?"), REPLIES[0].1);
        assert_eq!(reply_for("Нужна помощь с ВОЗВРАТОМ"), REPLIES[3].1);
        assert_eq!(reply_for("Связать с оператором"), REPLIES[4].1);
        assert_eq!(reply_for("привет"), DEFAULT_REPLY);
        // earlier keyword wins
        assert_eq!(reply_for("Где мой заказ №12345?"), REPLIES[1].1);
        assert_eq!(reply_for("трек 12345"), REPLIES[2].1);
    }

    #[test]
    fn test_order_detection_is_case_sensitive() {
        assert!(counts_as_order("Хочу заказать"));
        assert!(!counts_as_order("ЗАКАЗ"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_message_is_ignored() {
        let ctx = test_context();
        let bot = MessagingBot::new(ctx.clone());
        assert!(bot.send_message("   ", ChatSender::User).is_none());
        assert!(ctx.store().snapshot().chat.messages.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_lands_within_window() {
        let ctx = test_context();
        let bot = MessagingBot::new(ctx.clone());
        let handle = bot.send_message("Хочу заказать iPhone 15", ChatSender::User).unwrap();

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(ctx.store().snapshot().chat.messages.len(), 1);

        let reply = handle.await.unwrap();
        assert_eq!(reply.sender, ChatSender::Bot);
        assert_eq!(reply.text, REPLIES[0].1);

        let chat = ctx.store().snapshot().chat;
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.stats.messages, 2);
        assert_eq!(chat.stats.orders, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_messages_need_online_bot() {
        let ctx = test_context();
        let bot = MessagingBot::new(ctx.clone());
        assert!(bot.send_quick(0).is_none());

        let welcome = bot.activate().unwrap();
        assert!(bot.activate().is_none());
        assert_eq!(welcome.await.unwrap().text, WELCOME_MESSAGE);
        assert!(bot.send_quick(9).is_none());
        assert!(bot.send_quick(3).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_reset_goes_offline() {
        let ctx = test_context();
        let bot = MessagingBot::new(ctx.clone());
        bot.activate().unwrap().await.unwrap();
        bot.reset();
        let chat = ctx.store().snapshot().chat;
        assert!(!chat.bot_active);
        assert!(chat.messages.is_empty());
    }
}
