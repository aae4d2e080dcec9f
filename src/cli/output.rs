//! Output formatting utilities

use crate::application::LiveListState;
use crate::domain::{Entry, Notification, NotificationKind};

/// Format a list of entries for display
pub fn format_entry_list(entries: &[Entry], limit: Option<usize>) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let shown = limit.unwrap_or(entries.len()).min(entries.len());
    let mut output = String::new();
    for entry in &entries[..shown] {
        output.push_str(&format!(
            "{}  {}  {}  {}\n",
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.grade,
            entry.id,
            entry.sentence.replace('\n', " ")
        ));
    }
    if shown < entries.len() {
        output.push_str(&format!("... {} more\n", entries.len() - shown));
    }
    output
}

/// Header line for one live-list update
pub fn format_live_header(state: &LiveListState) -> String {
    match &state.error {
        Some(error) => format!(
            "== {} entries (sync error: {}; showing last known list) ==",
            state.entries.len(),
            error
        ),
        None => format!("== {} entries ==", state.entries.len()),
    }
}

pub fn format_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("✔ {}", notification.message),
        NotificationKind::Error => format!("✖ {}", notification.message),
    }
}
