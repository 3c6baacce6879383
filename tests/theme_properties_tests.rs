//! Behavioral properties of the theme and layout system, exercised through
//! the public API.

use std::sync::Arc;

use secfolio::contact::{ContactForm, ContactSubmission, FormStatus, MockEmailRelay, RelayConfig};
use secfolio::models::{LayoutVariant, Mode, PaletteName, RgbColor, STYLE_SLOTS};
use secfolio::storage::{
    DurableStore, FileStore, MemoryStore, UnavailableStore, COLOR_MODE_KEY, LAYOUT_KEY, THEME_KEY,
};
use secfolio::theme::{resolve, AppearanceState, SiteContext, StyleSurface};
use tempfile::TempDir;

fn active_context(store: Arc<dyn DurableStore>) -> SiteContext {
    let mut context = SiteContext::new(store);
    context.activate();
    context
}

#[test]
fn test_apply_is_idempotent() {
    let surface = StyleSurface::new();
    let colors = resolve(PaletteName::Ocean, Mode::Light);

    assert!(surface.apply(&colors));
    let first = surface.snapshot();

    assert!(!surface.apply(&colors));
    assert_eq!(surface.snapshot(), first);
}

#[test]
fn test_resolve_then_apply_sets_exactly_the_slots() {
    let surface = StyleSurface::new();
    let colors = resolve(PaletteName::Midnight, Mode::Dark);
    surface.apply(&colors);

    let snapshot = surface.snapshot();
    let mut expected: Vec<&str> = STYLE_SLOTS.to_vec();
    expected.sort_unstable();
    let actual: Vec<&str> = snapshot.slots.keys().map(String::as_str).collect();
    assert_eq!(actual, expected);

    for (slot, color) in colors.slots() {
        assert_eq!(snapshot.get(slot), Some(color));
    }
}

#[test]
fn test_invalid_persisted_layout_falls_back() {
    let store = Arc::new(MemoryStore::with_entries([(LAYOUT_KEY, "not-a-real-layout")]));
    let context = active_context(store);
    assert_eq!(context.layout(), LayoutVariant::Modern);
}

#[test]
fn test_invalid_persisted_appearance_falls_back_per_field() {
    let store = Arc::new(MemoryStore::with_entries([
        (THEME_KEY, "neon"),
        (COLOR_MODE_KEY, "light"),
    ]));
    let context = active_context(store);
    assert_eq!(
        context.appearance(),
        AppearanceState::new(PaletteName::Security, Mode::Light)
    );
}

#[test]
fn test_palette_survives_a_new_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");

    {
        let mut context = active_context(Arc::new(FileStore::new(&path)));
        context.set_palette(PaletteName::Tech);
    }

    let context = active_context(Arc::new(FileStore::new(&path)));
    assert_eq!(context.appearance().palette, PaletteName::Tech);
    assert_eq!(
        context.surface_snapshot().get("theme-bg"),
        Some(resolve(PaletteName::Tech, Mode::Dark).background)
    );
}

#[test]
fn test_toggle_twice_restores_mode_and_surface() {
    let mut context = active_context(Arc::new(MemoryStore::new()));
    context.set_palette(PaletteName::Sunset);
    let before_mode = context.appearance().mode;
    let before = context.surface_snapshot().slots;

    context.toggle_mode();
    assert_ne!(context.appearance().mode, before_mode);
    context.toggle_mode();

    assert_eq!(context.appearance().mode, before_mode);
    assert_eq!(context.surface_snapshot().slots, before);
}

#[test]
fn test_unavailable_storage_keeps_working_in_memory() {
    let mut context = active_context(Arc::new(UnavailableStore));

    context.set_palette(PaletteName::Forest);
    context.toggle_mode();
    context.set_layout(LayoutVariant::Glass);

    assert_eq!(
        context.appearance(),
        AppearanceState::new(PaletteName::Forest, Mode::Light)
    );
    assert_eq!(context.layout(), LayoutVariant::Glass);
    assert_eq!(
        context.surface_snapshot().get("theme-bg"),
        Some(resolve(PaletteName::Forest, Mode::Light).background)
    );
}

#[test]
fn test_placeholder_contact_config_never_calls_relay() {
    let relay = MockEmailRelay::succeeding();
    let mut form = ContactForm::new(RelayConfig::default(), "hello@example.com");
    let submission = ContactSubmission {
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        message: "Hello".to_string(),
        ..Default::default()
    };

    assert!(form.submit(&relay, &submission).is_err());
    assert_eq!(relay.calls(), 0);
    assert!(matches!(form.status(), FormStatus::Blocked { .. }));
}

#[test]
fn test_every_combination_resolves_to_valid_hex() {
    for palette in PaletteName::ALL {
        for mode in Mode::ALL {
            let colors = resolve(palette, mode);
            for (slot, color) in colors.slots() {
                let hex = color.to_hex();
                assert_eq!(hex.len(), 7, "{palette}/{mode} {slot}");
                assert_eq!(hex.parse::<RgbColor>().unwrap(), color);
            }
        }
    }
}

#[test]
fn test_selection_persists_over_corrupted_preferences() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{ truncated").unwrap();

    {
        let mut context = active_context(Arc::new(FileStore::new(&path)));
        assert_eq!(context.appearance().palette, PaletteName::Security);
        context.set_palette(PaletteName::Tech);
    }

    let store = FileStore::new(&path);
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("tech"));
    let context = active_context(Arc::new(store));
    assert_eq!(context.appearance().palette, PaletteName::Tech);
}
