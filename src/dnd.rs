//! Drag-and-drop status transitions.
//!
//! A card (drag source) offers exactly one payload, its project id tagged
//! `text/plain`. A column (drop target) accepts only that media type and,
//! on drop, asks the store to move the project to the column's stage.
//!
//! Visual state is local to each view:
//!
//! ```text
//! card:    Idle ──drag start──> Dragging ──drag end──> Idle
//! column:  Idle ──drag over (accepted)──> Hover ──drop | leave──> Idle
//! ```

use crate::state::StatusChange;

/// The only media type a card offers and a column accepts.
pub const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Move,
}

/// Payload carried from a drag source to a drop target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    media_type: Option<String>,
    data: String,
    pub effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the payload. A transfer carries a single item.
    pub fn set_data(&mut self, media_type: &str, data: impl Into<String>) {
        self.media_type = Some(media_type.to_string());
        self.data = data.into();
    }

    /// Payload for `media_type`, if that is what was set.
    pub fn get_data(&self, media_type: &str) -> Option<&str> {
        (self.media_type.as_deref() == Some(media_type)).then_some(self.data.as_str())
    }

    /// Declared media type of the payload.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn carries(&self, media_type: &str) -> bool {
        self.media_type.as_deref() == Some(media_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropState {
    #[default]
    Idle,
    Hover,
}

/// Result of dropping a payload onto a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The payload's media type was not accepted; the store was not asked.
    Rejected,
    /// The store was asked to switch status; this is what it did.
    Applied(StatusChange),
}

impl DropOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, Self::Applied(change) if change.is_switched())
    }
}

pub trait Draggable {
    fn on_drag_start(&mut self, transfer: &mut DataTransfer);
    fn on_drag_end(&mut self);
}

pub trait DragTarget {
    /// Returns whether the payload would be accepted. Accepting turns the
    /// hover indicator on.
    fn on_drag_over(&self, transfer: &DataTransfer) -> bool;
    fn on_drop(&self, transfer: &DataTransfer) -> DropOutcome;
    fn on_drag_leave(&self);
}
