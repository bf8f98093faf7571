//! The simulation store: single source of truth for every demo widget.
//!
//! A [`SimulationStore`] is a cheap, clonable handle over shared state. Consumers
//! never get a mutable reference to the state; they call the update
//! operations below, each of which takes the write lock for the duration of
//! one mutation and then broadcasts a [`StoreEvent`]. Presentation code
//! subscribes to the event stream and re-reads a [`DemoState`] snapshot.
//!
//! Every operation is total. Out-of-range indices are ignored with a warning
//! and progress values are clamped.

pub mod model;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::clock::{format_time, format_time_short, Clock, TIME_PLACEHOLDER};
use crate::types::{DemoId, LogKind};
use model::*;

const EVENT_CAPACITY: usize = 256;

/// Run bookkeeping shared by all demos.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStatus {
    /// Guard flag: a run is in progress
    pub running: bool,
    /// Percentage in [0, 100]
    pub progress: f64,
    /// Zero-based index of the step being shown, if any
    pub current_step: Option<usize>,
    /// Generation of the current or last run. Bumped by every start and
    /// every reset, so a run that was reset away can tell it is stale.
    pub run_id: u64,
}

/// Excel report widget state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcelState {
    pub rows: Vec<BranchReport>,
    pub logs: Vec<LogEntry>,
}

/// Marketplace scanner widget state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketplaceState {
    pub products: Vec<ScannedProduct>,
    pub stats: ScanStats,
}

/// Messaging bot widget state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub stats: ChatStats,
    pub bot_active: bool,
}

/// Insight engine widget state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightState {
    pub results: Vec<Insight>,
}

/// Social auto-poster widget state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialState {
    pub posts: Vec<SocialPost>,
    pub platforms: Vec<PlatformCounter>,
}

/// Integration sync widget state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncState {
    pub stats: SyncStats,
}

/// Everything the gallery renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoState {
    pub excel: ExcelState,
    pub marketplace: MarketplaceState,
    pub chat: ChatState,
    pub insight: InsightState,
    pub social: SocialState,
    pub sync: SyncState,
    pub status: BTreeMap<DemoId, RunStatus>,
}

impl DemoState {
    /// Initial state before any client clock is available.
    pub fn initial() -> Self {
        Self {
            excel: ExcelState {
                rows: zeroed_rows(),
                logs: vec![ready_log(TIME_PLACEHOLDER.to_string())],
            },
            marketplace: MarketplaceState::default(),
            chat: ChatState::default(),
            insight: InsightState::default(),
            social: SocialState {
                posts: Vec::new(),
                platforms: zeroed_platforms(),
            },
            sync: SyncState::default(),
            status: DemoId::ALL
                .iter()
                .map(|id| (*id, RunStatus::default()))
                .collect(),
        }
    }

    /// Run status of `demo`.
    pub fn status(&self, demo: DemoId) -> RunStatus {
        self.status.get(&demo).cloned().unwrap_or_default()
    }
}

fn zeroed_rows() -> Vec<BranchReport> {
    BRANCHES.iter().map(|b| BranchReport::empty(b)).collect()
}

fn ready_log(timestamp: String) -> LogEntry {
    LogEntry {
        timestamp,
        message: EXCEL_READY_MESSAGE.to_string(),
        kind: LogKind::Info,
    }
}

/// What changed in a [`StoreEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Reset,
    RunStarted,
    RunFinished,
    Progress(f64),
    Step(usize),
    ExcelRow(usize),
    ExcelLog,
    Product,
    ScanStats,
    ChatMessage,
    ChatStats,
    BotActive(bool),
    Insights,
    SyncStats,
    SocialPost,
}

/// Notification sent to subscribers after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent {
    pub demo: DemoId,
    pub change: StoreChange,
}

/// Shared handle over the demo state.
#[derive(Clone)]
pub struct SimulationStore {
    state: Arc<RwLock<DemoState>>,
    events: broadcast::Sender<StoreEvent>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SimulationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationStore")
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}

impl SimulationStore {
    /// Creates a store in its initial state. `clock` stamps log lines and
    /// chat messages.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(DemoState::initial())),
            events,
            clock,
        }
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Clone of the full state.
    pub fn snapshot(&self) -> DemoState {
        self.state.read().clone()
    }

    /// Runs `f` against the current state under the read lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&DemoState) -> R) -> R {
        f(&self.state.read())
    }

    fn emit(&self, demo: DemoId, change: StoreChange) {
        // No subscribers is fine
        let _ = self.events.send(StoreEvent { demo, change });
    }

    fn mutate<R>(&self, demo: DemoId, change: StoreChange, f: impl FnOnce(&mut DemoState) -> R) -> R {
        let out = {
            let mut state = self.state.write();
            f(&mut state)
        };
        self.emit(demo, change);
        out
    }

    fn status_mut(state: &mut DemoState, demo: DemoId) -> &mut RunStatus {
        state.status.entry(demo).or_default()
    }

    fn reset_fields(s: &mut DemoState, demo: DemoId, stamp: String) {
        match demo {
            DemoId::Excel => {
                s.excel.rows = zeroed_rows();
                s.excel.logs = vec![ready_log(stamp)];
            }
            DemoId::Marketplace => s.marketplace = MarketplaceState::default(),
            DemoId::Messaging => s.chat = ChatState::default(),
            DemoId::Insight => s.insight = InsightState::default(),
            DemoId::Social => {
                s.social.posts.clear();
                s.social.platforms = zeroed_platforms();
            }
            DemoId::Integration => s.sync = SyncState::default(),
        }
    }

    /// Restores `demo`'s fields to their initial values and clears its
    /// running flag.
    ///
    /// An in-flight run is invalidated: its run id goes stale, so it stops at
    /// its next step boundary and its `finish_run` is ignored.
    pub fn reset(&self, demo: DemoId) {
        let stamp = format_time(self.clock.local_time());
        self.mutate(demo, StoreChange::Reset, |s| {
            Self::reset_fields(s, demo, stamp);
            let status = Self::status_mut(s, demo);
            *status = RunStatus {
                run_id: status.run_id + 1,
                ..RunStatus::default()
            };
        });
        log::debug!("store: reset {}", demo);
    }

    /// Clears `demo`'s results and progress at the start of a run, keeping
    /// the running flag held by the caller.
    pub fn clear_results(&self, demo: DemoId) {
        let stamp = format_time(self.clock.local_time());
        self.mutate(demo, StoreChange::Reset, |s| {
            Self::reset_fields(s, demo, stamp);
            let status = Self::status_mut(s, demo);
            status.progress = 0.0;
            status.current_step = None;
        });
    }

    /// Sets the running flag if it is clear and returns the id of the new
    /// run. Returns `None` when a run is already in progress, in which case
    /// nothing changes.
    pub fn try_begin_run(&self, demo: DemoId) -> Option<u64> {
        let started = {
            let mut state = self.state.write();
            let status = Self::status_mut(&mut state, demo);
            if status.running {
                None
            } else {
                status.running = true;
                status.run_id += 1;
                Some(status.run_id)
            }
        };
        if started.is_some() {
            self.emit(demo, StoreChange::RunStarted);
        }
        started
    }

    /// Clears the running flag if `run_id` still owns it. Returns `false`,
    /// leaving the state untouched, for a run that was reset away.
    pub fn finish_run(&self, demo: DemoId, run_id: u64) -> bool {
        let finished = {
            let mut state = self.state.write();
            let status = Self::status_mut(&mut state, demo);
            if status.running && status.run_id == run_id {
                status.running = false;
                status.current_step = None;
                true
            } else {
                false
            }
        };
        if finished {
            self.emit(demo, StoreChange::RunFinished);
        } else {
            log::debug!("store: stale finish of {} run {} ignored", demo, run_id);
        }
        finished
    }

    /// Whether `run_id` is the run currently holding `demo`'s guard.
    pub fn is_current_run(&self, demo: DemoId, run_id: u64) -> bool {
        self.with_state(|s| {
            let status = s.status(demo);
            status.running && status.run_id == run_id
        })
    }

    pub fn is_running(&self, demo: DemoId) -> bool {
        self.with_state(|s| s.status(demo).running)
    }

    /// Sets progress, clamped to [0, 100]. NaN is treated as 0.
    pub fn set_progress(&self, demo: DemoId, percent: f64) {
        let clamped = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
        self.mutate(demo, StoreChange::Progress(clamped), |s| {
            Self::status_mut(s, demo).progress = clamped;
        });
    }

    pub fn progress(&self, demo: DemoId) -> f64 {
        self.with_state(|s| s.status(demo).progress)
    }

    /// Marks which step of the run is currently on screen.
    pub fn set_current_step(&self, demo: DemoId, step: usize) {
        self.mutate(demo, StoreChange::Step(step), |s| {
            Self::status_mut(s, demo).current_step = Some(step);
        });
    }

    /// Replaces the Excel row at `index`. Unknown indices are ignored.
    pub fn update_excel_row(&self, index: usize, row: BranchReport) {
        self.mutate(DemoId::Excel, StoreChange::ExcelRow(index), |s| {
            match s.excel.rows.get_mut(index) {
                Some(slot) => *slot = row,
                None => log::warn!("store: excel row {} out of range", index),
            }
        });
    }

    /// Appends a console line stamped with the local time.
    pub fn append_excel_log(&self, message: impl Into<String>, kind: LogKind) {
        let entry = LogEntry {
            timestamp: format_time(self.clock.local_time()),
            message: message.into(),
            kind,
        };
        self.mutate(DemoId::Excel, StoreChange::ExcelLog, |s| s.excel.logs.push(entry));
    }

    /// Appends a scanned product and recomputes the scan rollup in the same
    /// critical section. Returns the updated rollup.
    pub fn append_product(&self, product: ScannedProduct) -> ScanStats {
        self.mutate(DemoId::Marketplace, StoreChange::Product, |s| {
            let m = &mut s.marketplace;
            m.products.push(product);
            let found = m.products.len() as u64;
            let sum: u64 = m.products.iter().map(|p| p.price).sum();
            m.stats = ScanStats {
                found: found as u32,
                avg_price: sum / found,
                speed: found as u32 * 3,
            };
            m.stats
        })
    }

    /// Shallow-merges scan counters.
    pub fn update_scan_stats(&self, patch: ScanStatsPatch) {
        self.mutate(DemoId::Marketplace, StoreChange::ScanStats, |s| {
            s.marketplace.stats.merge(patch)
        });
    }

    /// Appends a chat message with a fresh id and short timestamp, and bumps
    /// the message counter.
    pub fn append_chat_message(&self, text: impl Into<String>, sender: ChatSender) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4().simple().to_string(),
            text: text.into(),
            sender,
            timestamp: format_time_short(self.clock.local_time()),
        };
        let stored = message.clone();
        self.mutate(DemoId::Messaging, StoreChange::ChatMessage, |s| {
            s.chat.messages.push(stored);
            s.chat.stats.messages += 1;
        });
        message
    }

    /// Shallow-merges chat counters.
    pub fn update_chat_stats(&self, patch: ChatStatsPatch) {
        self.mutate(DemoId::Messaging, StoreChange::ChatStats, |s| s.chat.stats.merge(patch));
    }

    /// Increments the order counter by `n` under the lock.
    pub fn add_orders(&self, n: u32) {
        self.mutate(DemoId::Messaging, StoreChange::ChatStats, |s| s.chat.stats.orders += n);
    }

    pub fn set_bot_active(&self, active: bool) {
        self.mutate(DemoId::Messaging, StoreChange::BotActive(active), |s| {
            s.chat.bot_active = active
        });
    }

    pub fn bot_active(&self) -> bool {
        self.with_state(|s| s.chat.bot_active)
    }

    /// Replaces the insight list wholesale.
    pub fn set_insights(&self, results: Vec<Insight>) {
        self.mutate(DemoId::Insight, StoreChange::Insights, |s| s.insight.results = results);
    }

    /// Shallow-merges sync counters.
    pub fn update_sync_stats(&self, patch: SyncStatsPatch) {
        self.mutate(DemoId::Integration, StoreChange::SyncStats, |s| s.sync.stats.merge(patch));
    }

    /// Appends a published post and bumps its platform counter.
    pub fn append_social_post(&self, mut post: SocialPost) {
        post.timestamp = format_time(self.clock.local_time());
        self.mutate(DemoId::Social, StoreChange::SocialPost, |s| {
            match s.social.platforms.iter_mut().find(|p| p.name == post.platform) {
                Some(counter) => counter.posts += 1,
                None => log::warn!("store: post for unknown platform {}", post.platform),
            }
            s.social.posts.push(post);
        });
    }
}
