//! Appearance controller: the current palette and color mode.
//!
//! The controller owns the selection, pushes resolved colors into the shared
//! [`StyleSurface`] on every change, and persists the selection through a
//! [`DurableStore`]. Storage failures are logged and swallowed; the in-memory
//! selection stays authoritative.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::{resolve, StyleSurface};
use crate::models::{ColorSet, Mode, PaletteName, UnknownPalette};
use crate::storage::{DurableStore, COLOR_MODE_KEY, THEME_KEY};

/// The selected palette and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct AppearanceState {
    /// Selected palette
    pub palette: PaletteName,
    /// Selected mode
    pub mode: Mode,
}

impl AppearanceState {
    /// Creates a state from its parts.
    #[must_use]
    pub const fn new(palette: PaletteName, mode: Mode) -> Self {
        Self { palette, mode }
    }

    /// Resolves the colors for this selection.
    #[must_use]
    pub fn colors(&self) -> ColorSet {
        resolve(self.palette, self.mode)
    }
}

/// Activation lifecycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Server-rendered default; no restore attempted yet
    Uninitialized,
    /// Restore attempted, whether or not a value was found
    Ready,
}

/// Holds the palette/mode selection and keeps the styling surface in sync.
pub struct AppearanceController {
    state: AppearanceState,
    default: AppearanceState,
    lifecycle: Lifecycle,
    store: Arc<dyn DurableStore>,
    surface: Arc<StyleSurface>,
}

impl AppearanceController {
    /// Creates a controller in the `security`/`dark` default selection.
    #[must_use]
    pub fn new(store: Arc<dyn DurableStore>, surface: Arc<StyleSurface>) -> Self {
        Self::with_default(store, surface, AppearanceState::default())
    }

    /// Creates a controller with a custom fallback selection.
    #[must_use]
    pub fn with_default(
        store: Arc<dyn DurableStore>,
        surface: Arc<StyleSurface>,
        default: AppearanceState,
    ) -> Self {
        Self {
            state: default,
            default,
            lifecycle: Lifecycle::Uninitialized,
            store,
            surface,
        }
    }

    /// Current selection.
    #[must_use]
    pub fn state(&self) -> AppearanceState {
        self.state
    }

    /// Current palette.
    #[must_use]
    pub fn palette(&self) -> PaletteName {
        self.state.palette
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Activation lifecycle.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Applies the default colors, restores the persisted selection, and
    /// re-applies if the restored selection differs.
    ///
    /// Runs once; later calls do nothing.
    pub fn activate(&mut self) {
        if self.lifecycle == Lifecycle::Ready {
            return;
        }

        // Style immediately so nothing renders unstyled while restoring.
        self.surface.apply(&self.state.colors());

        let restored = self.restore();
        if restored != self.state {
            debug!(
                palette = %restored.palette,
                mode = %restored.mode,
                "Restored persisted appearance"
            );
            self.state = restored;
            self.surface.apply(&self.state.colors());
        }

        self.lifecycle = Lifecycle::Ready;
    }

    /// Reads the persisted selection, validating each field.
    ///
    /// Missing, unreadable, or unrecognized values fall back to the current
    /// selection field by field.
    fn restore(&self) -> AppearanceState {
        let palette = self
            .read_key(THEME_KEY)
            .and_then(|raw| match raw.parse::<PaletteName>() {
                Ok(palette) => Some(palette),
                Err(e) => {
                    warn!(error = %e, "Discarding persisted palette");
                    None
                }
            })
            .unwrap_or(self.state.palette);

        let mode = self
            .read_key(COLOR_MODE_KEY)
            .and_then(|raw| match raw.parse::<Mode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    warn!(error = %e, "Discarding persisted color mode");
                    None
                }
            })
            .unwrap_or(self.state.mode);

        AppearanceState { palette, mode }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read appearance from storage");
                None
            }
        }
    }

    /// Selects `palette`, re-applies colors, and persists the selection.
    pub fn set_palette(&mut self, palette: PaletteName) {
        self.state.palette = palette;
        self.commit();
    }

    /// Selects a palette by identifier.
    ///
    /// Unknown identifiers leave the selection, the surface, and storage
    /// untouched.
    pub fn set_palette_named(&mut self, name: &str) -> Result<(), UnknownPalette> {
        match name.parse::<PaletteName>() {
            Ok(palette) => {
                self.set_palette(palette);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Ignoring palette change");
                Err(e)
            }
        }
    }

    /// Selects `mode`, re-applies colors, and persists the selection.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.commit();
    }

    /// Flips between dark and light.
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.state.mode.toggled());
    }

    /// Returns the controller to its fallback selection.
    pub fn reset(&mut self) {
        self.state = self.default;
        self.commit();
    }

    fn commit(&mut self) {
        self.surface.apply(&self.state.colors());
        self.persist();
    }

    fn persist(&self) {
        let entries = [
            (THEME_KEY, self.state.palette.as_str()),
            (COLOR_MODE_KEY, self.state.mode.as_str()),
        ];
        for (key, value) in entries {
            if let Err(e) = self.store.set(key, value) {
                warn!(key, error = %e, "Failed to persist appearance; keeping it for this session only");
            }
        }
    }
}

impl std::fmt::Debug for AppearanceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppearanceController")
            .field("state", &self.state)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
