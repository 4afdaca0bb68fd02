//! Event-specific data carried by event entities.

use serde::{Deserialize, Serialize};

use crate::time::WorldTime;

/// The time span of an event. Either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventSpan {
    pub beginning: Option<WorldTime>,
    pub ending: Option<WorldTime>,
}

impl EventSpan {
    pub fn is_empty(&self) -> bool {
        self.beginning.is_none() && self.ending.is_none()
    }

    /// False only when both ends are known and the event ends before it begins.
    pub fn is_chronological(&self) -> bool {
        match (self.beginning, self.ending) {
            (Some(begin), Some(end)) => begin <= end,
            _ => true,
        }
    }

    /// Length of the event in minutes, when both ends are known and ordered.
    pub fn duration_minutes(&self) -> Option<u64> {
        match (self.beginning, self.ending) {
            (Some(begin), Some(end)) if begin <= end => {
                Some(end.total_minutes() - begin.total_minutes())
            }
            _ => None,
        }
    }
}
