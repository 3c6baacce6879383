//! Palette resolver.

use crate::models::{ColorSet, Mode, PaletteName};

/// Returns the concrete colors for `palette` in `mode`.
///
/// Total over both enums; there is no failure case.
///
/// ```
/// use secfolio::models::{Mode, PaletteName};
/// use secfolio::theme::resolve;
///
/// let colors = resolve(PaletteName::Security, Mode::Dark);
/// assert_eq!(colors.background.to_hex(), "#0A0F1C");
/// ```
#[must_use]
pub fn resolve(palette: PaletteName, mode: Mode) -> ColorSet {
    *palette.palette().colors(mode)
}
