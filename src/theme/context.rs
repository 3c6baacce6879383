//! The site context: the one store that owns all presentation state.
//!
//! Binaries build a single [`SiteContext`] at their root and pass it down.
//! Components read through the accessors and change state only through the
//! named mutations.

use std::sync::Arc;

use super::appearance::{AppearanceController, AppearanceState, Lifecycle};
use super::layout::LayoutSelector;
use super::surface::{StyleSurface, SurfaceSnapshot};
use crate::models::{LayoutVariant, Mode, PaletteName, UnknownLayout, UnknownPalette};
use crate::storage::DurableStore;

/// Owns the appearance controller, layout selector, and styling surface for
/// one client session.
#[derive(Debug)]
pub struct SiteContext {
    appearance: AppearanceController,
    layout: LayoutSelector,
    surface: Arc<StyleSurface>,
}

impl SiteContext {
    /// Creates a context on the default selections, backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self::with_default_appearance(store, AppearanceState::default())
    }

    /// Creates a context whose appearance falls back to `default`.
    #[must_use]
    pub fn with_default_appearance(
        store: Arc<dyn DurableStore>,
        default: AppearanceState,
    ) -> Self {
        let surface = Arc::new(StyleSurface::new());
        Self {
            appearance: AppearanceController::with_default(store.clone(), surface.clone(), default),
            layout: LayoutSelector::new(store),
            surface,
        }
    }

    /// Restores persisted selections and styles the surface.
    ///
    /// Idempotent.
    pub fn activate(&mut self) {
        if self.appearance.lifecycle() == Lifecycle::Ready {
            return;
        }
        self.appearance.activate();
        self.layout.restore();
    }

    /// Current palette and mode.
    #[must_use]
    pub fn appearance(&self) -> AppearanceState {
        self.appearance.state()
    }

    /// Activation lifecycle.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.appearance.lifecycle()
    }

    /// Current layout.
    #[must_use]
    pub fn layout(&self) -> LayoutVariant {
        self.layout.current()
    }

    /// The shared styling surface.
    #[must_use]
    pub fn surface(&self) -> &Arc<StyleSurface> {
        &self.surface
    }

    /// Snapshot of the styling surface.
    #[must_use]
    pub fn surface_snapshot(&self) -> SurfaceSnapshot {
        self.surface.snapshot()
    }

    /// See [`AppearanceController::set_palette`].
    pub fn set_palette(&mut self, palette: PaletteName) {
        self.appearance.set_palette(palette);
    }

    /// See [`AppearanceController::set_palette_named`].
    pub fn set_palette_named(&mut self, name: &str) -> Result<(), UnknownPalette> {
        self.appearance.set_palette_named(name)
    }

    /// See [`AppearanceController::set_mode`].
    pub fn set_mode(&mut self, mode: Mode) {
        self.appearance.set_mode(mode);
    }

    /// See [`AppearanceController::toggle_mode`].
    pub fn toggle_mode(&mut self) {
        self.appearance.toggle_mode();
    }

    /// See [`LayoutSelector::set_layout`].
    pub fn set_layout(&mut self, variant: LayoutVariant) {
        self.layout.set_layout(variant);
    }

    /// See [`LayoutSelector::set_layout_named`].
    pub fn set_layout_named(&mut self, id: &str) -> Result<(), UnknownLayout> {
        self.layout.set_layout_named(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, COLOR_MODE_KEY, LAYOUT_KEY, THEME_KEY};

    #[test]
    fn test_fresh_context_restores_previous_session() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

        let mut first = SiteContext::new(store.clone());
        first.activate();
        first.set_palette(PaletteName::Tech);
        first.set_mode(Mode::Light);
        first.set_layout(LayoutVariant::Timeline);

        let mut second = SiteContext::new(store);
        second.activate();
        assert_eq!(second.appearance(), AppearanceState::new(PaletteName::Tech, Mode::Light));
        assert_eq!(second.layout(), LayoutVariant::Timeline);
        assert_eq!(
            second.surface_snapshot().slots,
            first.surface_snapshot().slots
        );
    }

    #[test]
    fn test_layout_changes_do_not_touch_styling() {
        let mut context = SiteContext::new(Arc::new(MemoryStore::new()));
        context.activate();
        let generation = context.surface().generation();

        context.set_layout(LayoutVariant::Brutalist);
        assert_eq!(context.surface().generation(), generation);
    }

    #[test]
    fn test_activate_is_idempotent() {
        let store = Arc::new(MemoryStore::with_entries([
            (THEME_KEY, "ocean"),
            (COLOR_MODE_KEY, "dark"),
            (LAYOUT_KEY, "grid"),
        ]));
        let mut context = SiteContext::new(store);
        context.activate();
        context.set_layout(LayoutVariant::Cards);
        context.activate();

        assert_eq!(context.layout(), LayoutVariant::Cards);
        assert_eq!(context.appearance().palette, PaletteName::Ocean);
        assert_eq!(context.lifecycle(), Lifecycle::Ready);
    }
}
