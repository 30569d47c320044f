use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::{debug, info, warn};

use crate::composition::Composition;
use crate::models::{DesignRecipe, Pattern, PatternSlot, StyleOverrides};
use crate::services::{EventRecorder, ServiceError, ThemeService, TrackEvent};

type Listener = Arc<dyn Fn(&Composition) + Send + Sync>;

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Keeps a change listener registered; dropping it unsubscribes.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    id: u64,
    set: Weak<Mutex<ListenerSet>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(set) = self.set.upgrade() {
            let mut set = set.lock().unwrap_or_else(PoisonError::into_inner);
            set.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// One pattern assembler run: the composition being built, the analytics
/// sink and the views watching the composition.
pub struct AssemblerSession {
    composition: Composition,
    recorder: Arc<dyn EventRecorder>,
    listeners: Arc<Mutex<ListenerSet>>,
    source_site_id: u64,
}

impl AssemblerSession {
    /// `source_site_id` is the site the pattern library is served from; it
    /// qualifies every pattern id in the submitted design.
    pub fn new(
        recorder: Arc<dyn EventRecorder>,
        source_site_id: u64,
    ) -> Self {
        Self {
            composition: Composition::new(),
            recorder,
            listeners: Arc::new(Mutex::new(ListenerSet::default())),
            source_site_id,
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Register `listener` to run after every change to the composition.
    ///
    /// A listener added or removed from inside a callback takes effect from
    /// the next change.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Composition) + Send + Sync + 'static,
    ) -> Subscription {
        let mut set = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        set.next_id += 1;
        let id = set.next_id;
        set.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            set: Arc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }

    fn notify(&self) {
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(&self.composition);
        }
    }

    // =========================================================================
    // Main screen
    // =========================================================================

    /// The user opened a picker to add a header, footer or section.
    pub fn on_add(
        &mut self,
        slot: PatternSlot,
    ) {
        self.recorder.record(TrackEvent::PatternAddClick { pattern_type: slot });
        if slot == PatternSlot::Section {
            self.composition.begin_add();
        }
    }

    /// The user opened the section picker to replace the section at
    /// `position`.
    pub fn on_replace_section(
        &mut self,
        position: usize,
    ) {
        self.composition.begin_replace(position);
    }

    pub fn on_delete_section(
        &mut self,
        position: usize,
    ) {
        if self.composition.delete_section(position) {
            self.recorder.record(TrackEvent::SectionDelete { position });
            self.notify();
        }
    }

    pub fn on_move_up_section(
        &mut self,
        position: usize,
    ) {
        if self.composition.move_up_section(position) {
            self.recorder.record(TrackEvent::SectionMoveUp { position });
            self.notify();
        }
    }

    pub fn on_move_down_section(
        &mut self,
        position: usize,
    ) {
        if self.composition.move_down_section(position) {
            self.recorder.record(TrackEvent::SectionMoveDown { position });
            self.notify();
        }
    }

    // =========================================================================
    // Pickers
    // =========================================================================

    /// A pattern (or "none") was picked for `slot`.
    pub fn on_select(
        &mut self,
        slot: PatternSlot,
        pattern: Option<Pattern>,
    ) {
        self.recorder.record(TrackEvent::PatternSelectClick {
            pattern_type: slot,
            pattern_id: pattern.as_ref().map_or(0, |p| p.id),
            pattern_name: pattern.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
        });
        self.composition.select(slot, pattern);
        self.notify();
    }

    pub fn on_picker_done(
        &self,
        slot: PatternSlot,
    ) {
        let patterns = self.composition.patterns(Some(slot));
        self.recorder.record(TrackEvent::PatternSelectDoneClick {
            pattern_type: slot,
            pattern_ids: join(patterns.iter().map(|p| p.id.to_string())),
            pattern_names: join(patterns.iter().map(|p| p.name.clone())),
        });
    }

    pub fn on_picker_back(
        &self,
        slot: PatternSlot,
    ) {
        self.recorder.record(TrackEvent::PatternSelectBackClick { pattern_type: slot });
    }

    // =========================================================================
    // Leaving the step
    // =========================================================================

    pub fn on_back(&self) {
        let count = self.composition.patterns(None).len();
        self.recorder.record(TrackEvent::BackClick {
            has_selected_patterns: count > 0,
            pattern_count: count,
        });
    }

    /// Report the final composition and return the design to submit.
    pub fn on_continue(&self) -> DesignRecipe {
        self.recorder
            .record(TrackEvent::ContinueClick(self.composition.summary()));
        for pattern in self.composition.patterns(None) {
            self.recorder.record(TrackEvent::PatternFinalSelect {
                pattern_id: pattern.id,
                pattern_name: pattern.name.clone(),
                pattern_category: pattern.category.clone(),
            });
        }
        self.design()
    }

    pub fn design(&self) -> DesignRecipe {
        self.composition.design(self.source_site_id)
    }

    /// Hand the design to the theme service.
    ///
    /// Returns `Ok(false)` without calling the service when no site is
    /// known yet. The composition is left untouched whatever the outcome.
    pub async fn submit(
        &self,
        site: &str,
        theme: &dyn ThemeService,
        styles: &StyleOverrides,
    ) -> Result<bool, ServiceError> {
        if site.trim().is_empty() {
            debug!("no site to apply the composition to");
            return Ok(false);
        }

        let design = self.design();
        match theme.apply_theme_with_patterns(site, &design, styles).await {
            Ok(()) => {
                info!(site, patterns = self.composition.patterns(None).len(), "composition applied");
                Ok(true)
            }
            Err(error) => {
                warn!(site, %error, "applying composition failed");
                Err(error)
            }
        }
    }
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(",")
}
