//! Shared UI icons and emojis.
//!
//! Each icon has a plain-ASCII fallback for terminals without emoji support.

use console::Emoji;
use taskboard_common::{Priority, ProjectStatus};

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");

// Column indicators
pub static INBOX: Emoji<'_, '_> = Emoji("📥 ", "[NEW]");
pub static RUNNING: Emoji<'_, '_> = Emoji("▶️  ", "[>]");
pub static DONE: Emoji<'_, '_> = Emoji("🏁 ", "[DONE]");
pub static DROP: Emoji<'_, '_> = Emoji("⬇️  ", "[v]");

// Priority indicators
pub static HIGH: Emoji<'_, '_> = Emoji("🔴 ", "!!!");
pub static MEDIUM: Emoji<'_, '_> = Emoji("🟡 ", "!! ");
pub static LOW: Emoji<'_, '_> = Emoji("🟢 ", "!  ");

pub fn stage_icon(status: ProjectStatus) -> &'static Emoji<'static, 'static> {
    match status {
        ProjectStatus::NewTicket => &INBOX,
        ProjectStatus::InProgress => &RUNNING,
        ProjectStatus::Finished => &DONE,
    }
}

pub fn priority_icon(priority: Priority) -> &'static Emoji<'static, 'static> {
    match priority {
        Priority::High => &HIGH,
        Priority::Medium => &MEDIUM,
        Priority::Low => &LOW,
    }
}
