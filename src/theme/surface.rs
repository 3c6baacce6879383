//! The styling surface: named color slots read by every section.
//!
//! [`StyleSurface::apply`] is the style applicator. It writes all eight slots
//! of a [`ColorSet`] under one write lock, so a reader either sees the old set
//! or the new one, never a mix.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::RwLock;

use serde::Serialize;

use crate::models::{ColorSet, RgbColor};

/// Point-in-time copy of the styling surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurfaceSnapshot {
    /// Slot name to color
    pub slots: BTreeMap<String, RgbColor>,
    /// Generation the snapshot was taken at
    pub generation: u64,
}

impl SurfaceSnapshot {
    /// Returns the color in `slot`, if it has been written.
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<RgbColor> {
        self.slots.get(slot).copied()
    }

    /// Renders the slots as CSS custom properties on `:root`.
    ///
    /// ```
    /// use secfolio::models::{Mode, PaletteName};
    /// use secfolio::theme::{resolve, StyleSurface};
    ///
    /// let surface = StyleSurface::new();
    /// surface.apply(&resolve(PaletteName::Security, Mode::Dark));
    /// assert!(surface.snapshot().to_css().contains("--theme-bg: #0A0F1C;"));
    /// ```
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (slot, color) in &self.slots {
            let _ = writeln!(css, "  --{slot}: {color};");
        }
        css.push_str("}\n");
        css
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    slots: BTreeMap<String, RgbColor>,
    generation: u64,
}

/// Shared mutable map of named styling slots.
#[derive(Debug, Default)]
pub struct StyleSurface {
    state: RwLock<SurfaceState>,
}

impl StyleSurface {
    /// Creates an empty surface. Nothing is styled until the first `apply`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes every slot of `colors` in one batch.
    ///
    /// Idempotent: re-applying identical colors leaves the surface and its
    /// generation untouched. Returns `true` when any slot changed.
    pub fn apply(&self, colors: &ColorSet) -> bool {
        // A poisoned lock still holds a complete slot map because writes
        // below never panic midway.
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut changed = false;
        for (slot, color) in colors.slots() {
            if state.slots.get(slot) != Some(&color) {
                state.slots.insert(slot.to_string(), color);
                changed = true;
            }
        }

        if changed {
            state.generation += 1;
        }
        changed
    }

    /// Returns a consistent copy of all slots.
    #[must_use]
    pub fn snapshot(&self) -> SurfaceSnapshot {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        SurfaceSnapshot {
            slots: state.slots.clone(),
            generation: state.generation,
        }
    }

    /// Counter that advances each time the visible colors change.
    ///
    /// Consumers compare it against the value they last rendered with.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .generation
    }
}
