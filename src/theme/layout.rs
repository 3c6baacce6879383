//! Layout selector: which page composition is active.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{LayoutVariant, UnknownLayout};
use crate::storage::{DurableStore, LAYOUT_KEY};

/// Holds the current [`LayoutVariant`] and persists changes.
///
/// Persisted values are always validated before use, so the presentation
/// dispatcher only ever sees known variants.
pub struct LayoutSelector {
    current: LayoutVariant,
    store: Arc<dyn DurableStore>,
}

impl LayoutSelector {
    /// Creates a selector on the default layout.
    #[must_use]
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self {
            current: LayoutVariant::default(),
            store,
        }
    }

    /// Current layout.
    #[must_use]
    pub fn current(&self) -> LayoutVariant {
        self.current
    }

    /// Loads the persisted layout, falling back to the default when the
    /// stored value is missing, unreadable, or unrecognized.
    pub fn restore(&mut self) {
        self.current = match self.store.get(LAYOUT_KEY) {
            Ok(Some(raw)) => match raw.parse::<LayoutVariant>() {
                Ok(variant) => {
                    debug!(layout = %variant, "Restored persisted layout");
                    variant
                }
                Err(e) => {
                    warn!(error = %e, "Discarding persisted layout");
                    LayoutVariant::default()
                }
            },
            Ok(None) => LayoutVariant::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read layout from storage");
                LayoutVariant::default()
            }
        };
    }

    /// Switches to `variant` and persists it.
    pub fn set_layout(&mut self, variant: LayoutVariant) {
        self.current = variant;
        if let Err(e) = self.store.set(LAYOUT_KEY, variant.as_str()) {
            warn!(error = %e, "Failed to persist layout; keeping it for this session only");
        }
    }

    /// Switches layout by identifier.
    ///
    /// Unknown identifiers are rejected without touching state or storage.
    pub fn set_layout_named(&mut self, id: &str) -> Result<(), UnknownLayout> {
        let variant = id.parse::<LayoutVariant>().inspect_err(|e| {
            warn!(error = %e, "Ignoring layout change");
        })?;
        self.set_layout(variant);
        Ok(())
    }
}

impl std::fmt::Debug for LayoutSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSelector")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
