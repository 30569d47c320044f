use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::info;

use crate::composition::CompositionSummary;
use crate::models::PatternSlot;

/// User actions reported from the pattern assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackEvent {
    PatternAddClick {
        pattern_type: PatternSlot,
    },
    PatternSelectClick {
        pattern_type: PatternSlot,
        pattern_id: u32,
        pattern_name: String,
    },
    PatternSelectDoneClick {
        pattern_type: PatternSlot,
        pattern_ids: String,
        pattern_names: String,
    },
    PatternSelectBackClick {
        pattern_type: PatternSlot,
    },
    SectionDelete {
        position: usize,
    },
    SectionMoveUp {
        position: usize,
    },
    SectionMoveDown {
        position: usize,
    },
    BackClick {
        has_selected_patterns: bool,
        pattern_count: usize,
    },
    ContinueClick(CompositionSummary),
    PatternFinalSelect {
        pattern_id: u32,
        pattern_name: String,
        pattern_category: String,
    },
}

impl TrackEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PatternAddClick { .. } => "pattern_assembler_pattern_add_click",
            Self::PatternSelectClick { .. } => "pattern_assembler_pattern_select_click",
            Self::PatternSelectDoneClick { .. } => "pattern_assembler_pattern_select_done_click",
            Self::PatternSelectBackClick { .. } => "pattern_assembler_pattern_select_back_click",
            Self::SectionDelete { .. } => "pattern_assembler_section_delete",
            Self::SectionMoveUp { .. } => "pattern_assembler_section_move_up",
            Self::SectionMoveDown { .. } => "pattern_assembler_section_move_down",
            Self::BackClick { .. } => "pattern_assembler_back_click",
            Self::ContinueClick(_) => "pattern_assembler_continue_click",
            Self::PatternFinalSelect { .. } => "pattern_assembler_pattern_final_select",
        }
    }
}

/// Fire-and-forget sink for [`TrackEvent`]s. Recording never fails.
pub trait EventRecorder: Send + Sync {
    fn record(
        &self,
        event: TrackEvent,
    );
}

/// Writes every event to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRecorder;

impl EventRecorder for TracingRecorder {
    fn record(
        &self,
        event: TrackEvent,
    ) {
        info!(name = event.name(), ?event, "track");
    }
}

/// Keeps events in memory, in recording order.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    events: Mutex<Vec<TrackEvent>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(TrackEvent::name).collect()
    }
}

impl EventRecorder for MemoryRecorder {
    fn record(
        &self,
        event: TrackEvent,
    ) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_recorder_keeps_order() {
        let recorder = MemoryRecorder::new();

        recorder.record(TrackEvent::PatternAddClick {
            pattern_type: PatternSlot::Header,
        });
        recorder.record(TrackEvent::SectionDelete { position: 2 });

        assert_eq!(
            recorder.names(),
            vec![
                "pattern_assembler_pattern_add_click",
                "pattern_assembler_section_delete"
            ]
        );
    }

    #[test]
    fn events_serialize_with_tag_and_lowercase_slot() {
        let event = TrackEvent::PatternSelectClick {
            pattern_type: PatternSlot::Section,
            pattern_id: 7,
            pattern_name: "Hero".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "event": "pattern_select_click",
                "pattern_type": "section",
                "pattern_id": 7,
                "pattern_name": "Hero",
            })
        );
    }
}
