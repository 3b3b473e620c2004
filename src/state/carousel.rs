//! Brand Carousel - Autonomous horizontal auto-advance
//!
//! On every timer tick the offset moves one step to the right, or wraps back
//! to the start once the visible window already reaches the end of the
//! content. The motion is not interruptible by user input.
//!
//! The transition itself is the pure function [`advance`]; the component only
//! wires it to a host interval and forwards the result as a smooth scroll.

use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::config::CarouselConfig;
use crate::host::{self, GeometryHost, ScrollHost, Subscription, TimerHost};
use crate::types::{RegionId, ScrollBehavior, ScrollExtent};

/// Next offset for one tick.
///
/// The wrap check uses the current offset before advancing. Content that fits
/// its container keeps the offset pinned at 0.
pub fn advance(offset: f64, extent: ScrollExtent, step: f64) -> f64 {
    if offset + extent.viewport_width >= extent.content_width {
        0.0
    } else {
        (offset + step).min(extent.max_offset())
    }
}

/// Timer-driven horizontal scroll of one region.
pub struct CarouselAutoAdvance {
    region: RegionId,
    /// Offset requested by the last tick.
    offset: Signal<f64>,
    /// `None` when the carousel never started.
    timer: Option<Subscription>,
}

impl CarouselAutoAdvance {
    /// Start ticking every `config.interval()`.
    ///
    /// A zero interval or a host without timers leaves the strip at offset 0.
    pub fn mount<H>(host: &Rc<H>, region: RegionId, config: &CarouselConfig) -> Self
    where
        H: TimerHost + GeometryHost + ScrollHost + 'static,
    {
        let offset = signal(0.0);
        let step = config.step;

        let weak = Rc::downgrade(host);
        let current = offset.clone();
        let tick = move || {
            let Some(host) = weak.upgrade() else { return };
            let Some(extent) = host.scroll_extent(region) else {
                tracing::trace!(%region, "carousel tick skipped: no geometry");
                return;
            };
            let next = advance(current.get(), extent, step);
            current.set(next);
            host.scroll_to(region, next, ScrollBehavior::Smooth);
        };

        let period = config.interval();
        if period.is_zero() {
            tracing::warn!(%region, "carousel interval is zero, not starting");
            return Self { region, offset, timer: None };
        }

        let timer = match host::interval(host, period, tick) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                tracing::debug!(%region, %err, "carousel stays at its first item");
                None
            }
        };

        Self { region, offset, timer }
    }

    /// The scrolled region.
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Current horizontal offset in pixels.
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    pub fn signal(&self) -> Signal<f64> {
        self.offset.clone()
    }

    /// Whether a timer is registered.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Stop the timer. No tick runs afterwards.
    pub fn unmount(mut self) {
        if let Some(timer) = self.timer.take() {
            timer.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Capabilities, SimHost};
    use crate::types::Rect;
    use proptest::prelude::*;
    use std::time::Duration;

    const BRANDS: RegionId = RegionId(7);
    const TICK: Duration = Duration::from_millis(2000);

    fn setup(content_width: f64, viewport_width: f64) -> Rc<SimHost> {
        let host = Rc::new(SimHost::new(1280.0, 720.0));
        host.add_region(BRANDS, Rect::new(3000.0, 3128.0, 0.0, viewport_width));
        host.set_scroll_extent(BRANDS, ScrollExtent::new(content_width, viewport_width));
        host
    }

    #[test]
    fn test_advance_sequence_wraps() {
        let extent = ScrollExtent::new(1400.0, 400.0);
        let mut offset = 0.0;
        let mut seen = vec![offset];
        for _ in 0..7 {
            offset = advance(offset, extent, 200.0);
            seen.push(offset);
        }
        assert_eq!(seen, vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0, 0.0, 200.0]);
    }

    #[test]
    fn test_content_that_fits_stays_pinned() {
        let extent = ScrollExtent::new(300.0, 400.0);
        assert_eq!(advance(0.0, extent, 200.0), 0.0);
        assert_eq!(advance(0.0, ScrollExtent::new(400.0, 400.0), 200.0), 0.0);
    }

    #[test]
    fn test_last_step_clamps_to_end() {
        let extent = ScrollExtent::new(1300.0, 400.0);
        assert_eq!(advance(800.0, extent, 200.0), 900.0);
        assert_eq!(advance(900.0, extent, 200.0), 0.0);
    }

    #[test]
    fn test_timer_drives_offsets() {
        let host = setup(1400.0, 400.0);
        let carousel = CarouselAutoAdvance::mount(&host, BRANDS, &CarouselConfig::default());

        let mut seen = Vec::new();
        for _ in 0..6 {
            host.advance_time(TICK);
            seen.push(carousel.offset());
        }
        assert_eq!(seen, vec![200.0, 400.0, 600.0, 800.0, 1000.0, 0.0]);
        assert_eq!(host.scroll_left(BRANDS), Some(0.0));
    }

    #[test]
    fn test_scrolls_smoothly() {
        let host = setup(1400.0, 400.0);
        let _carousel = CarouselAutoAdvance::mount(&host, BRANDS, &CarouselConfig::default());

        host.advance_time(TICK);
        assert_eq!(host.scroll_log(), vec![(BRANDS, 200.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn test_nothing_happens_between_ticks() {
        let host = setup(1400.0, 400.0);
        let carousel = CarouselAutoAdvance::mount(&host, BRANDS, &CarouselConfig::default());

        host.advance_time(Duration::from_millis(1999));
        assert_eq!(carousel.offset(), 0.0);
        host.advance_time(Duration::from_millis(1));
        assert_eq!(carousel.offset(), 200.0);
    }

    #[test]
    fn test_unmount_stops_timer() {
        let host = setup(1400.0, 400.0);
        let carousel = CarouselAutoAdvance::mount(&host, BRANDS, &CarouselConfig::default());
        host.advance_time(TICK);

        let signal = carousel.signal();
        carousel.unmount();
        assert_eq!(host.timer_count(), 0);

        host.advance_time(TICK * 3);
        assert_eq!(signal.get(), 200.0);
    }

    #[test]
    fn test_missing_geometry_skips_tick() {
        let host = setup(1400.0, 400.0);
        let carousel = CarouselAutoAdvance::mount(&host, BRANDS, &CarouselConfig::default());

        host.remove_region(BRANDS);
        host.advance_time(TICK);
        assert_eq!(carousel.offset(), 0.0);
        assert!(host.scroll_log().is_empty());
    }

    #[test]
    fn test_zero_interval_never_starts() {
        let host = setup(1400.0, 400.0);
        let config = CarouselConfig { interval_ms: 0, ..CarouselConfig::default() };
        let carousel = CarouselAutoAdvance::mount(&host, BRANDS, &config);

        assert!(!carousel.is_running());
        assert_eq!(host.timer_count(), 0);

        host.advance_time(TICK);
        assert_eq!(carousel.offset(), 0.0);
    }

    #[test]
    fn test_missing_timer_stays_at_start() {
        let host = Rc::new(SimHost::with_capabilities(
            Capabilities::all() - Capabilities::TIMER,
            1280.0,
            720.0,
        ));
        let carousel = CarouselAutoAdvance::mount(&host, BRANDS, &CarouselConfig::default());

        host.advance_time(TICK * 2);
        assert!(!carousel.is_running());
        assert_eq!(carousel.offset(), 0.0);
    }

    proptest! {
        #[test]
        fn offset_stays_in_bounds(
            content in 0.0f64..5000.0,
            viewport in 1.0f64..2000.0,
            step in 1.0f64..500.0,
            ticks in 1usize..64,
        ) {
            let extent = ScrollExtent::new(content, viewport);
            let mut offset = 0.0;
            for _ in 0..ticks {
                offset = advance(offset, extent, step);
                prop_assert!(offset >= 0.0);
                prop_assert!(offset <= extent.max_offset());
            }
        }
    }
}
