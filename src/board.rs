//! Display board: the named output slots the aggregator publishes into
//!
//! The board is the process-local stand-in for a page's display elements.
//! Slots are registered up front; writing to an unknown key is a silent
//! no-op rather than an error.

use crate::types::{StatusLine, StyleClass};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Every slot key the default platform set publishes into
pub const DEFAULT_SLOTS: &[&str] = &[
    "youtube-subs",
    "youtube-views",
    "youtube-videos",
    "latest-video",
    "twitch-followers",
    "twitch-status",
    "kick-followers",
    "kick-status",
    "twitter-followers",
    "twitter-posts",
    "tiktok-followers",
    "tiktok-likes",
    "instagram-followers",
    "instagram-posts",
    "total-followers",
    "total-views",
    "total-videos",
];

/// One display slot: plain text plus an optional style class
#[derive(Debug, Clone, Default)]
pub struct Slot {
    pub text: String,
    pub class: Option<StyleClass>,
}

/// Named output slots, written at the end of each refresh cycle
pub struct DisplayBoard {
    slots: RwLock<HashMap<String, Slot>>,
}

impl DisplayBoard {
    /// Board with the given slot keys registered and empty
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots = keys
            .into_iter()
            .map(|k| (k.into(), Slot::default()))
            .collect();
        Self {
            slots: RwLock::new(slots),
        }
    }

    /// Board with the full default slot set
    pub fn with_default_slots() -> Self {
        Self::new(DEFAULT_SLOTS.iter().copied())
    }

    /// Write plain text into a slot; unknown keys are ignored
    pub fn set_text(&self, key: &str, text: impl Into<String>) {
        let mut slots = self.slots.write();
        if let Some(slot) = slots.get_mut(key) {
            slot.text = text.into();
        }
    }

    /// Write a status line (text + style class) into a slot
    pub fn set_status(&self, key: &str, status: &StatusLine) {
        let mut slots = self.slots.write();
        if let Some(slot) = slots.get_mut(key) {
            slot.text = status.text.clone();
            slot.class = Some(status.class);
        }
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.slots.read().get(key).map(|s| s.text.clone())
    }

    pub fn class(&self, key: &str) -> Option<StyleClass> {
        self.slots.read().get(key).and_then(|s| s.class)
    }

    /// Plain-text table of every slot, sorted by key
    pub fn render(&self) -> String {
        let slots = self.slots.read();
        let mut keys: Vec<&String> = slots.keys().collect();
        keys.sort();

        let mut out = String::new();
        for key in keys {
            let slot = &slots[key];
            let class = slot.class.map(|c| format!(" [{}]", c.as_str())).unwrap_or_default();
            out.push_str(&format!("{:<22} {}{}\n", key, slot.text, class));
        }
        out
    }
}

/// Zero-fill every known slot without any network activity.
///
/// Used when no credentials are configured: metric and total slots read
/// "0", status slots read "Offline". The embed slot is left untouched.
pub fn publish_fallback(board: &DisplayBoard) {
    for key in DEFAULT_SLOTS {
        if *key == "latest-video" {
            continue;
        }
        if key.ends_with("-status") {
            board.set_status(key, &StatusLine::offline());
        } else {
            board.set_text(*key, "0");
        }
    }
}
