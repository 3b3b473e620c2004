//! Navigation Appearance - Resolve header contrast from two signals
//!
//! The hero's visibility picks the header style; while the header sits over
//! the services band the choice is inverted so text stays legible:
//!
//! | intersecting | overlap | effective |
//! |--------------|---------|-----------|
//! | true         | false   | true      |
//! | false        | false   | false     |
//! | true         | true    | false     |
//! | false        | true    | true      |
//!
//! The effective value is never stored. It is computed on read, or through a
//! `Derived` that re-evaluates whenever either input changes.
//!
//! Only two inputs are combined. Whether the inversion composes for a third
//! band with its own background is an open question; do not chain it.

use spark_signals::{derived, Derived, Signal};

/// `overlap_active ? !intersecting : intersecting`
pub fn resolve(intersecting: bool, overlap_active: bool) -> bool {
    intersecting != overlap_active
}

/// Derived effective appearance over the two input signals.
pub fn appearance_derived(
    intersecting: Signal<bool>,
    overlap: Signal<bool>,
) -> Derived<bool> {
    derived(move || resolve(intersecting.get(), overlap.get()))
}

/// Text and icon contrast for the navigation chrome.
///
/// A `true` appearance means the header sits over a dark band (the hero
/// photograph, or the services section while inverted) and draws light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTone {
    /// Dark text and the full-color logo.
    Dark,
    /// White text and the white logo.
    Light,
}

impl HeaderTone {
    pub fn from_appearance(effective: bool) -> Self {
        if effective { HeaderTone::Light } else { HeaderTone::Dark }
    }

    /// Logo artwork that stays legible against this tone's background.
    pub fn logo(self) -> LogoVariant {
        match self {
            HeaderTone::Dark => LogoVariant::Color,
            HeaderTone::Light => LogoVariant::White,
        }
    }
}

/// Header logo artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoVariant {
    /// Full-color mark for light backgrounds.
    Color,
    /// White mark for dark backgrounds.
    White,
}

impl LogoVariant {
    pub fn asset_path(self) -> &'static str {
        match self {
            LogoVariant::Color => "/logohorizontalcolor.png",
            LogoVariant::White => "/logohorizontalblanco.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use spark_signals::signal;

    #[test]
    fn test_truth_table() {
        assert!(resolve(true, false));
        assert!(!resolve(false, false));
        assert!(!resolve(true, true));
        assert!(resolve(false, true));
    }

    #[test]
    fn test_derived_follows_inputs() {
        let intersecting = signal(true);
        let overlap = signal(false);
        let effective = appearance_derived(intersecting.clone(), overlap.clone());
        assert!(effective.get());

        intersecting.set(false);
        assert!(!effective.get());

        overlap.set(true);
        assert!(effective.get());

        intersecting.set(true);
        assert!(!effective.get());
    }

    #[test]
    fn test_tone_picks_logo() {
        assert_eq!(HeaderTone::from_appearance(true), HeaderTone::Light);
        assert_eq!(HeaderTone::from_appearance(true).logo(), LogoVariant::White);
        assert_eq!(HeaderTone::from_appearance(false), HeaderTone::Dark);
        assert_eq!(HeaderTone::from_appearance(false).logo(), LogoVariant::Color);
        assert_eq!(LogoVariant::White.asset_path(), "/logohorizontalblanco.png");
    }

    proptest! {
        /// Input order never matters: the result depends only on the final pair.
        #[test]
        fn resolve_depends_only_on_latest_inputs(
            updates in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..16),
        ) {
            let intersecting = signal(false);
            let overlap = signal(false);
            let effective = appearance_derived(intersecting.clone(), overlap.clone());

            for (update_intersection, value) in &updates {
                if *update_intersection {
                    intersecting.set(*value);
                } else {
                    overlap.set(*value);
                }
                prop_assert_eq!(effective.get(), resolve(intersecting.get(), overlap.get()));
            }
        }

        #[test]
        fn overlap_inverts(intersecting in any::<bool>()) {
            prop_assert_eq!(resolve(intersecting, true), !resolve(intersecting, false));
        }
    }
}
