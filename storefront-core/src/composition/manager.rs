//! Composition list manager.
//!
//! # Example
//!
//! ```
//! use storefront_core::composition::Composition;
//! use storefront_core::models::Pattern;
//!
//! let mut composition = Composition::new();
//! composition.set_header(Some(Pattern::new(1, "Centered header", "header")));
//! composition.add_section(Pattern::new(7, "Hero", "intro"));
//! composition.add_section(Pattern::new(7, "Hero", "intro"));
//!
//! // The header shifts the preview position of every section by one.
//! assert_eq!(composition.active_position(), Some(2));
//! assert_ne!(composition.sections()[0].key, composition.sections()[1].key);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{DesignRecipe, Pattern, PatternSlot, SectionEntry};

/// Encodes a pattern id the way the theme service expects it: the pattern id
/// qualified by the site the pattern library is served from.
pub fn encode_pattern_id(
    id: u32,
    source_site_id: u64,
) -> String {
    format!("{id}-{source_site_id}")
}

/// Aggregate reported when the user continues out of the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSummary {
    /// Comma-joined subset of `header,section,footer`, in that order.
    pub pattern_types: String,
    pub pattern_ids: String,
    pub pattern_names: String,
    pub pattern_count: usize,
}

/// Header/footer slots plus an ordered list of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    header: Option<Pattern>,
    footer: Option<Pattern>,
    sections: Vec<SectionEntry>,
    active_position: Option<usize>,
    pending_replace_target: Option<usize>,
    // Monotonic; never decremented so keys stay unique across deletions.
    key_counter: u64,
}

impl Composition {
    /// Create an empty composition with nothing active.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> Option<&Pattern> {
        self.header.as_ref()
    }

    pub fn footer(&self) -> Option<&Pattern> {
        self.footer.as_ref()
    }

    pub fn sections(&self) -> &[SectionEntry] {
        &self.sections
    }

    /// Position in the flattened `[header?, ...sections, footer?]` sequence
    /// of the most recently touched slot.
    pub fn active_position(&self) -> Option<usize> {
        self.active_position
    }

    pub fn pending_replace_target(&self) -> Option<usize> {
        self.pending_replace_target
    }

    /// The section currently designated for replacement, if any.
    pub fn replace_target_entry(&self) -> Option<&SectionEntry> {
        self.pending_replace_target
            .and_then(|position| self.sections.get(position))
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.footer.is_none() && self.sections.is_empty()
    }

    fn header_offset(&self) -> usize {
        usize::from(self.header.is_some())
    }

    fn flattened_len(&self) -> usize {
        self.header_offset() + self.sections.len() + usize::from(self.footer.is_some())
    }

    fn activate_section(
        &mut self,
        position: usize,
    ) {
        self.active_position = Some(position + self.header_offset());
    }

    // =========================================================================
    // Singleton slots
    // =========================================================================

    /// Replace the header slot.
    ///
    /// Setting a header activates position 0; clearing it leaves nothing
    /// active.
    pub fn set_header(
        &mut self,
        pattern: Option<Pattern>,
    ) {
        debug!(pattern_id = pattern.as_ref().map(|p| p.id), "set header");
        self.active_position = pattern.as_ref().map(|_| 0);
        self.header = pattern;
    }

    /// Replace the footer slot and activate the position after the last
    /// section.
    ///
    /// Clearing the footer still moves the active position there, which
    /// leaves it one past the flattened sequence until the next edit.
    pub fn set_footer(
        &mut self,
        pattern: Option<Pattern>,
    ) {
        debug!(pattern_id = pattern.as_ref().map(|p| p.id), "set footer");
        self.footer = pattern;
        self.activate_section(self.sections.len());
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Append a section under a freshly minted instance key and return the
    /// key.
    pub fn add_section(
        &mut self,
        pattern: Pattern,
    ) -> String {
        self.key_counter += 1;
        let key = format!("{}-{}", self.key_counter, pattern.id);
        debug!(pattern_id = pattern.id, %key, "add section");

        self.sections.push(SectionEntry {
            key: key.clone(),
            pattern,
        });
        self.activate_section(self.sections.len() - 1);
        key
    }

    /// Substitute the pattern at `position`, keeping that entry's instance
    /// key. Returns `false` and changes nothing when `position` is out of
    /// range.
    pub fn replace_section(
        &mut self,
        position: usize,
        pattern: Pattern,
    ) -> bool {
        let Some(entry) = self.sections.get_mut(position) else {
            debug!(position, "replace ignored: position out of range");
            return false;
        };

        debug!(position, pattern_id = pattern.id, key = %entry.key, "replace section");
        entry.pattern = pattern;
        self.activate_section(position);
        true
    }

    /// Remove the section at `position`. Out-of-range positions are ignored.
    pub fn delete_section(
        &mut self,
        position: usize,
    ) -> bool {
        if position >= self.sections.len() {
            debug!(position, len = self.sections.len(), "delete ignored");
            return false;
        }

        let removed = self.sections.remove(position);
        debug!(position, key = %removed.key, "delete section");

        let target = position + self.header_offset();
        self.active_position = self
            .flattened_len()
            .checked_sub(1)
            .map(|last| target.min(last));
        true
    }

    /// Swap the section at `position` with the one above it.
    pub fn move_up_section(
        &mut self,
        position: usize,
    ) -> bool {
        if position == 0 || position >= self.sections.len() {
            debug!(position, "move up ignored");
            return false;
        }

        self.sections.swap(position, position - 1);
        self.activate_section(position - 1);
        true
    }

    /// Swap the section at `position` with the one below it.
    pub fn move_down_section(
        &mut self,
        position: usize,
    ) -> bool {
        if position + 1 >= self.sections.len() {
            debug!(position, "move down ignored");
            return false;
        }

        self.sections.swap(position, position + 1);
        self.activate_section(position + 1);
        true
    }

    // =========================================================================
    // Selection protocol
    // =========================================================================

    /// The next committed section will be appended.
    pub fn begin_add(&mut self) {
        self.pending_replace_target = None;
    }

    /// The next committed section will replace the one at `position`.
    /// Out-of-range positions leave the manager in add mode.
    pub fn begin_replace(
        &mut self,
        position: usize,
    ) {
        self.pending_replace_target = (position < self.sections.len()).then_some(position);
    }

    /// Commit a chosen section pattern: replace at the pending target when
    /// one is set and still valid, append otherwise. Clears the target.
    pub fn commit_section(
        &mut self,
        pattern: Pattern,
    ) {
        match self.pending_replace_target.take() {
            Some(position) if position < self.sections.len() => {
                self.replace_section(position, pattern);
            }
            stale => {
                if let Some(position) = stale {
                    debug!(position, "replace target went stale, appending instead");
                }
                self.add_section(pattern);
            }
        }
    }

    /// Apply a pick from one of the pattern pickers.
    ///
    /// A section pick without a pattern is ignored; header and footer picks
    /// without a pattern clear the slot.
    pub fn select(
        &mut self,
        slot: PatternSlot,
        pattern: Option<Pattern>,
    ) {
        match (slot, pattern) {
            (PatternSlot::Header, pattern) => self.set_header(pattern),
            (PatternSlot::Footer, pattern) => self.set_footer(pattern),
            (PatternSlot::Section, Some(pattern)) => self.commit_section(pattern),
            (PatternSlot::Section, None) => {}
        }
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Patterns in display order (header, sections, footer), optionally
    /// restricted to one slot kind.
    pub fn patterns(
        &self,
        filter: Option<PatternSlot>,
    ) -> Vec<&Pattern> {
        let sections = self.sections.iter().map(|entry| &entry.pattern);

        match filter {
            Some(PatternSlot::Header) => self.header.iter().collect(),
            Some(PatternSlot::Footer) => self.footer.iter().collect(),
            Some(PatternSlot::Section) => sections.collect(),
            None => self
                .header
                .iter()
                .chain(sections)
                .chain(self.footer.iter())
                .collect(),
        }
    }

    /// Build the recipe handed to the theme service.
    pub fn design(
        &self,
        source_site_id: u64,
    ) -> DesignRecipe {
        let encode = |pattern: &Pattern| encode_pattern_id(pattern.id, source_site_id);

        DesignRecipe {
            header_pattern_ids: self.header.as_ref().map(|p| vec![encode(p)]),
            pattern_ids: self.sections.iter().map(|e| encode(&e.pattern)).collect(),
            footer_pattern_ids: self.footer.as_ref().map(|p| vec![encode(p)]),
        }
    }

    pub fn summary(&self) -> CompositionSummary {
        let patterns = self.patterns(None);
        let pattern_types = [
            self.header.is_some().then_some("header"),
            (!self.sections.is_empty()).then_some("section"),
            self.footer.is_some().then_some("footer"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(",");

        CompositionSummary {
            pattern_types,
            pattern_ids: join(patterns.iter().map(|p| p.id.to_string())),
            pattern_names: join(patterns.iter().map(|p| p.name.clone())),
            pattern_count: patterns.len(),
        }
    }
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(",")
}
