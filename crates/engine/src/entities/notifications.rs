//! Notification log - the categorized activity feed with unread badges.
//!
//! Each category keeps its own newest-first buffer capped at `cap` entries.
//! A category's unread counter only moves while the player cannot see that
//! tab: the panel is closed, or another tab is focused.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vtt_domain::{NotificationCategory, NotificationEntry, NotificationPayload};

use crate::infrastructure::config::DEFAULT_NOTIFICATION_CAP;
use crate::infrastructure::persisted::{keys, Persisted};
use crate::infrastructure::ports::{ClockPort, KeyValueStore};

/// Anything that accepts log payloads.
///
/// Services that emit notifications take a sink instead of the concrete log.
pub trait NotificationSink {
    fn post(&mut self, payload: NotificationPayload);
}

/// Collects payloads in order. Handy for callers that want to inspect what
/// an operation would announce.
impl NotificationSink for Vec<NotificationPayload> {
    fn post(&mut self, payload: NotificationPayload) {
        self.push(payload);
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CategoryLog {
    /// Newest first
    #[serde(default)]
    entries: VecDeque<NotificationEntry>,
    #[serde(default)]
    unread: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogState {
    #[serde(default)]
    loot: CategoryLog,
    #[serde(default)]
    combat: CategoryLog,
    #[serde(default)]
    social: CategoryLog,
    #[serde(default)]
    active_tab: NotificationCategory,
}

impl LogState {
    fn category(&self, category: NotificationCategory) -> &CategoryLog {
        match category {
            NotificationCategory::Loot => &self.loot,
            NotificationCategory::Combat => &self.combat,
            NotificationCategory::Social => &self.social,
        }
    }

    fn category_mut(&mut self, category: NotificationCategory) -> &mut CategoryLog {
        match category {
            NotificationCategory::Loot => &mut self.loot,
            NotificationCategory::Combat => &mut self.combat,
            NotificationCategory::Social => &mut self.social,
        }
    }
}

pub struct NotificationLog {
    state: LogState,
    /// Panel visibility is session-only; the log always starts closed.
    is_open: bool,
    cap: usize,
    persisted: Persisted<LogState>,
    clock: Arc<dyn ClockPort>,
}

impl NotificationLog {
    pub fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn ClockPort>, cap: usize) -> Self {
        let persisted = Persisted::new(store, keys::NOTIFICATIONS);
        let mut state: LogState = persisted.load().unwrap_or_default();
        let cap = cap.max(1);
        for category in NotificationCategory::ALL {
            state.category_mut(category).entries.truncate(cap);
        }
        Self {
            state,
            is_open: false,
            cap,
            persisted,
            clock,
        }
    }

    pub fn with_default_cap(store: Arc<dyn KeyValueStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self::load(store, clock, DEFAULT_NOTIFICATION_CAP)
    }

    /// Record a payload in its category and return the stored entry.
    pub fn post(&mut self, payload: NotificationPayload) -> NotificationEntry {
        let category = payload.category();
        let entry = NotificationEntry::new(payload, self.clock.now());
        let visible = self.is_open && self.state.active_tab == category;

        let log = self.state.category_mut(category);
        log.entries.push_front(entry.clone());
        log.entries.truncate(self.cap);
        if visible {
            log.unread = 0;
        } else {
            log.unread = log.unread.saturating_add(1);
        }

        self.save();
        tracing::debug!(category = %category, entry_id = %entry.id, "Posted notification");
        entry
    }

    /// Focus a tab; its unread counter resets.
    pub fn set_active_tab(&mut self, category: NotificationCategory) {
        self.state.active_tab = category;
        self.state.category_mut(category).unread = 0;
        self.save();
    }

    /// Opening resets the active tab's counter; closing leaves counters alone.
    pub fn set_open(&mut self, is_open: bool) {
        self.is_open = is_open;
        if is_open {
            let active = self.state.active_tab;
            self.state.category_mut(active).unread = 0;
            self.save();
        }
    }

    /// Empty one category and reset its counter.
    pub fn clear(&mut self, category: NotificationCategory) {
        let log = self.state.category_mut(category);
        log.entries.clear();
        log.unread = 0;
        self.save();
    }

    pub fn clear_all(&mut self) {
        for category in NotificationCategory::ALL {
            let log = self.state.category_mut(category);
            log.entries.clear();
            log.unread = 0;
        }
        self.save();
    }

    /// Entries of one category, newest first.
    pub fn entries(
        &self,
        category: NotificationCategory,
    ) -> impl ExactSizeIterator<Item = &NotificationEntry> + '_ {
        self.state.category(category).entries.iter()
    }

    pub fn latest(&self, category: NotificationCategory) -> Option<&NotificationEntry> {
        self.state.category(category).entries.front()
    }

    pub fn unread(&self, category: NotificationCategory) -> u32 {
        self.state.category(category).unread
    }

    pub fn total_unread(&self) -> u32 {
        NotificationCategory::ALL
            .iter()
            .map(|c| self.unread(*c))
            .fold(0, u32::saturating_add)
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn active_tab(&self) -> NotificationCategory {
        self.state.active_tab
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    fn save(&self) {
        self.persisted.save(&self.state);
    }
}

impl NotificationSink for NotificationLog {
    fn post(&mut self, payload: NotificationPayload) {
        NotificationLog::post(self, payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockClockPort;
    use crate::infrastructure::storage::InMemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use vtt_domain::{CombatEvent, ResourceKind, SocialEvent};

    fn log() -> NotificationLog {
        NotificationLog::with_default_cap(
            Arc::new(InMemoryStore::new()),
            Arc::new(FixedClock(Utc::now())),
        )
    }

    fn hit(amount: i32) -> NotificationPayload {
        CombatEvent::CombatHit {
            actor: "Ogre".into(),
            target: "Ayla".into(),
            amount,
            resource: ResourceKind::Hp,
        }
        .into()
    }

    fn system(content: &str) -> NotificationPayload {
        SocialEvent::System {
            content: content.into(),
        }
        .into()
    }

    #[test]
    fn cap_evicts_the_oldest_entry() {
        let mut log = log();
        for i in 0..101 {
            log.post(hit(i));
        }

        let entries: Vec<_> = log.entries(NotificationCategory::Combat).collect();
        assert_eq!(entries.len(), 100);
        assert_eq!(entries[0].payload, hit(100));
        assert_eq!(entries[99].payload, hit(1));
        assert!(!entries.iter().any(|e| e.payload == hit(0)));
    }

    #[test]
    fn unread_follows_visibility_and_focus() {
        let mut log = log();
        log.set_active_tab(NotificationCategory::Combat);

        // closed: every post counts
        log.post(hit(1));
        log.post(hit(2));
        assert_eq!(log.unread(NotificationCategory::Combat), 2);

        // opening on the active tab resets
        log.set_open(true);
        assert_eq!(log.unread(NotificationCategory::Combat), 0);

        // open and focused: pinned at zero
        log.post(hit(3));
        assert_eq!(log.unread(NotificationCategory::Combat), 0);

        // focus elsewhere: counts again
        log.set_active_tab(NotificationCategory::Loot);
        log.post(hit(4));
        assert_eq!(log.unread(NotificationCategory::Combat), 1);

        // closing never touches counters
        log.set_open(false);
        assert_eq!(log.unread(NotificationCategory::Combat), 1);
    }

    #[test]
    fn categories_count_independently() {
        let mut log = log();
        log.set_open(true);
        log.set_active_tab(NotificationCategory::Social);

        log.post(system("Welcome"));
        log.post(hit(5));
        assert_eq!(log.unread(NotificationCategory::Social), 0);
        assert_eq!(log.unread(NotificationCategory::Combat), 1);
        assert_eq!(log.total_unread(), 1);
    }

    #[test]
    fn clear_empties_one_category() {
        let mut log = log();
        log.post(hit(1));
        log.post(system("hi"));
        log.clear(NotificationCategory::Combat);

        assert_eq!(log.entries(NotificationCategory::Combat).len(), 0);
        assert_eq!(log.unread(NotificationCategory::Combat), 0);
        assert_eq!(log.entries(NotificationCategory::Social).len(), 1);

        log.clear_all();
        assert_eq!(log.total_unread(), 0);
        assert!(log.latest(NotificationCategory::Social).is_none());
    }

    #[test]
    fn timestamps_come_from_the_clock() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        let mut clock = MockClockPort::new();
        let mut tick = 0;
        clock.expect_now().returning(move || {
            tick += 1;
            start + Duration::minutes(tick)
        });
        let mut log =
            NotificationLog::with_default_cap(Arc::new(InMemoryStore::new()), Arc::new(clock));

        log.post(system("first"));
        log.post(system("second"));
        let entries: Vec<_> = log.entries(NotificationCategory::Social).collect();
        assert!(entries[0].timestamp > entries[1].timestamp);
    }

    #[test]
    fn state_survives_reload_but_panel_starts_closed() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(Utc::now()));
        {
            let mut log = NotificationLog::with_default_cap(store.clone(), clock.clone());
            log.set_active_tab(NotificationCategory::Loot);
            log.set_open(true);
            log.post(hit(9));
        }

        let reloaded = NotificationLog::with_default_cap(store, clock);
        assert!(!reloaded.is_open());
        assert_eq!(reloaded.active_tab(), NotificationCategory::Loot);
        assert_eq!(reloaded.unread(NotificationCategory::Combat), 1);
        assert_eq!(reloaded.entries(NotificationCategory::Combat).len(), 1);
    }

    #[test]
    fn smaller_cap_truncates_on_load() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(Utc::now()));
        {
            let mut log = NotificationLog::with_default_cap(store.clone(), clock.clone());
            for i in 0..10 {
                log.post(hit(i));
            }
        }
        let log = NotificationLog::load(store, clock, 3);
        assert_eq!(log.entries(NotificationCategory::Combat).len(), 3);
        assert_eq!(log.latest(NotificationCategory::Combat).unwrap().payload, hit(9));
    }
}
