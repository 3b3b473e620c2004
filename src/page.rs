//! Page Mount - Wire every state machine to one host.
//!
//! Mounting sets up:
//! 1. Hero visibility tracking (with the configured trigger margin)
//! 2. Header-over-services overlap detection
//! 3. The derived header appearance and a trace effect over it
//! 4. The mobile menu
//! 5. The brand carousel timer
//! 6. The statistics counter
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_landing::{LandingConfig, LandingPage, PageRegions};
//!
//! let page = LandingPage::mount(&host, PageRegions::default(), &LandingConfig::default());
//!
//! let stop = page.watch_header(|chrome| render_header(chrome));
//! page.toggle_menu();
//!
//! // Clean up
//! stop();
//! page.unmount();
//! ```

use std::rc::Rc;
use std::time::Duration;

use spark_signals::effect;

use crate::config::LandingConfig;
use crate::host::Host;
use crate::nav::{reveal_delays, NavLink, NAV_LINKS, OVERLAY_ITEMS};
use crate::state::{
    appearance_derived, CarouselAutoAdvance, HeaderTone, LogoVariant, MenuStateMachine,
    MenuTransition, OverlapDetector, ViewportIntersectionTracker, ViewportTriggeredCounter,
    resolve,
};
use crate::types::RegionId;

// =============================================================================
// Regions
// =============================================================================

/// Host regions the page measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRegions {
    /// The fixed navigation bar.
    pub header: RegionId,
    /// Full-height opening section; its visibility picks the header style.
    pub hero: RegionId,
    /// Dark band that inverts the header style while beneath it.
    pub services: RegionId,
    /// The element holding the animated statistic.
    pub stats: RegionId,
    /// The horizontally scrolling brand strip.
    pub brands: RegionId,
}

impl Default for PageRegions {
    fn default() -> Self {
        Self {
            header: RegionId(1),
            hero: RegionId(2),
            services: RegionId(3),
            stats: RegionId(4),
            brands: RegionId(5),
        }
    }
}

// =============================================================================
// Header chrome
// =============================================================================

/// Everything the header renders from the effective appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderChrome {
    /// The resolved appearance the rest is derived from.
    pub effective: bool,
    /// Text and hamburger color.
    pub tone: HeaderTone,
    pub logo: LogoVariant,
}

impl HeaderChrome {
    /// Chrome for a resolved appearance; `true` draws light on a dark band.
    pub fn from_appearance(effective: bool) -> Self {
        let tone = HeaderTone::from_appearance(effective);
        Self { effective, tone, logo: tone.logo() }
    }
}

// =============================================================================
// Landing page
// =============================================================================

/// A mounted landing page. Dropping it releases every host registration.
pub struct LandingPage {
    hero: ViewportIntersectionTracker,
    overlap: OverlapDetector,
    menu: MenuStateMachine,
    carousel: CarouselAutoAdvance,
    counter: ViewportTriggeredCounter,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl LandingPage {
    /// Mount every component against `host`.
    ///
    /// Components whose host capability is missing fall back to their static
    /// state; mounting itself never fails.
    pub fn mount<H>(host: &Rc<H>, regions: PageRegions, config: &LandingConfig) -> Self
    where
        H: Host + 'static,
    {
        let hero = ViewportIntersectionTracker::mount(host, regions.hero, config.header.hero_options());
        let overlap = OverlapDetector::mount(host, regions.header, regions.services);
        let menu = MenuStateMachine::new(OVERLAY_ITEMS.len(), &config.menu);
        let carousel = CarouselAutoAdvance::mount(host, regions.brands, &config.carousel);
        let counter = ViewportTriggeredCounter::mount(host, regions.stats, &config.counter);

        let appearance = appearance_derived(hero.signal(), overlap.signal());
        let stop_fn = effect(move || {
            let chrome = HeaderChrome::from_appearance(appearance.get());
            tracing::trace!(tone = ?chrome.tone, "header appearance");
        });

        tracing::debug!(?regions, "landing page mounted");

        Self {
            hero,
            overlap,
            menu,
            carousel,
            counter,
            stop_effect: Some(Box::new(stop_fn)),
        }
    }

    // -------------------------------------------------------------------------
    // Header
    // -------------------------------------------------------------------------

    /// Effective appearance, computed from the current signals.
    pub fn effective_appearance(&self) -> bool {
        resolve(self.hero.is_intersecting(), self.overlap.is_active())
    }

    /// Tone and logo for the current appearance.
    pub fn header_chrome(&self) -> HeaderChrome {
        HeaderChrome::from_appearance(self.effective_appearance())
    }

    /// Run `on_change` now and after every header appearance change.
    ///
    /// Returns the stop function for the underlying effect.
    pub fn watch_header(&self, mut on_change: impl FnMut(HeaderChrome) + 'static) -> Box<dyn FnOnce()> {
        let appearance = appearance_derived(self.hero.signal(), self.overlap.signal());
        let stop_fn = effect(move || {
            on_change(HeaderChrome::from_appearance(appearance.get()));
        });
        Box::new(stop_fn)
    }

    // -------------------------------------------------------------------------
    // Menu
    // -------------------------------------------------------------------------

    /// Hamburger activation.
    pub fn toggle_menu(&self) -> MenuTransition {
        self.menu.toggle()
    }

    /// Link activation from either nav. Closes the mobile menu if open and
    /// returns the anchor to scroll to.
    pub fn navigate(&self, link: &NavLink) -> &'static str {
        self.menu.navigate(link);
        link.href
    }

    /// Accessible label for the hamburger button.
    pub fn menu_label(&self) -> &'static str {
        self.menu.toggle_label()
    }

    /// Desktop nav links paired with their reveal delay on mount.
    pub fn desktop_nav_reveal(&self) -> Vec<(NavLink, Duration)> {
        NAV_LINKS.iter().copied().zip(reveal_delays(NAV_LINKS.len())).collect()
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    /// Hero visibility tracker.
    pub fn hero(&self) -> &ViewportIntersectionTracker {
        &self.hero
    }

    /// Header-over-services detector.
    pub fn overlap(&self) -> &OverlapDetector {
        &self.overlap
    }

    pub fn menu(&self) -> &MenuStateMachine {
        &self.menu
    }

    /// Brand strip auto-advance.
    pub fn carousel(&self) -> &CarouselAutoAdvance {
        &self.carousel
    }

    /// Statistics counter.
    pub fn counter(&self) -> &ViewportTriggeredCounter {
        &self.counter
    }

    /// Stop the trace effect and release every host registration.
    pub fn unmount(mut self) {
        self.stop_render_effect();
        tracing::debug!("landing page unmounted");
    }

    fn stop_render_effect(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.stop_render_effect();
    }
}
