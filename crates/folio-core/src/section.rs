//! Maps the continuous scroll offset onto discrete page sections.

/// Section index for a scroll offset: `round(offset / viewport_height)`,
/// rounding halves away from zero. Negative offsets (overscroll bounce)
/// count as the top of the page; a degenerate viewport maps to section 0.
#[inline]
pub fn section_index(scroll_offset: f32, viewport_height: f32) -> usize {
    if !(viewport_height > 0.0) || !scroll_offset.is_finite() {
        return 0;
    }
    (scroll_offset.max(0.0) / viewport_height).round() as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionChange {
    pub from: usize,
    pub to: usize,
}

/// Tracks which section is active and reports transitions.
#[derive(Clone, Debug)]
pub struct SectionTracker {
    current: usize,
    section_count: usize,
}

impl SectionTracker {
    pub fn new(section_count: usize) -> Self {
        Self {
            current: 0,
            section_count,
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Feed a new scroll offset. Returns the transition when the derived
    /// section differs from the current one and has a mesh to animate.
    /// Sections past the last mesh leave the tracker where it is.
    pub fn update(&mut self, scroll_offset: f32, viewport_height: f32) -> Option<SectionChange> {
        let next = section_index(scroll_offset, viewport_height);
        if next == self.current {
            return None;
        }
        if next >= self.section_count {
            log::warn!(
                "[section] offset {:.0} maps to section {} but only {} exist; ignoring",
                scroll_offset,
                next,
                self.section_count
            );
            return None;
        }
        let change = SectionChange {
            from: self.current,
            to: next,
        };
        self.current = next;
        log::info!("[section] {} -> {}", change.from, change.to);
        Some(change)
    }
}
