//! Animated Counter - One-shot count-up when first seen
//!
//! `Idle` -> (first viewport enter) -> `Animating` -> (elapsed >= duration) -> `Done`
//!
//! While animating, each animation frame samples
//! `floor(min(elapsed / duration, 1) * target)`, where `elapsed` is measured
//! from the first frame's timestamp. Frames are requested one at a time and
//! stop once the target is reached. The phase never goes back: entering the
//! viewport again, during or after the animation, changes nothing.
//!
//! Teardown cancels a pending frame, so no callback outlives the counter.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{signal, Signal};

use crate::config::CounterConfig;
use crate::host::{self, FrameHost, IntersectionHost, Subscription};
use crate::types::{IntersectionOptions, RegionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterPhase {
    #[default]
    Idle,
    Animating,
    Done,
}

/// Displayed value `elapsed` into an animation of `duration` towards `target`.
pub fn counter_value(elapsed: Duration, duration: Duration, target: u32) -> u32 {
    if duration.is_zero() {
        return target;
    }
    let progress = (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0);
    (progress * f64::from(target)).floor() as u32
}

// =============================================================================
// ANIMATION STATE
// =============================================================================

/// Shared between the component and its in-flight frame callback.
struct Animation {
    phase: Signal<CounterPhase>,
    value: Signal<u32>,
    target: u32,
    duration: Duration,
    started_at: Cell<Option<Duration>>,
    pending: RefCell<Option<Subscription>>,
}

impl Animation {
    fn finish(&self) {
        self.value.set(self.target);
        self.phase.set(CounterPhase::Done);
    }

    fn cancel_pending(&self) {
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }
}

fn schedule_frame<H>(host: &Rc<H>, animation: &Rc<Animation>)
where
    H: FrameHost + 'static,
{
    let weak = Rc::downgrade(host);
    let current = animation.clone();

    let requested = host::frame(host, move |timestamp| {
        // This frame's handle is spent; forget it before requesting the next.
        current.cancel_pending();
        if let Some(host) = weak.upgrade() {
            on_frame(&host, &current, timestamp);
        }
    });

    match requested {
        Ok(subscription) => {
            *animation.pending.borrow_mut() = Some(subscription);
        }
        Err(err) => {
            tracing::debug!(%err, "no animation frames, showing final value");
            animation.finish();
        }
    }
}

fn on_frame<H>(host: &Rc<H>, animation: &Rc<Animation>, timestamp: Duration)
where
    H: FrameHost + 'static,
{
    let start = match animation.started_at.get() {
        Some(start) => start,
        None => {
            animation.started_at.set(Some(timestamp));
            timestamp
        }
    };
    let elapsed = timestamp.saturating_sub(start);

    let sampled = counter_value(elapsed, animation.duration, animation.target);
    let value = sampled.max(animation.value.get());
    animation.value.set(value);

    if elapsed >= animation.duration {
        tracing::debug!(end = animation.target, "counter animation done");
        animation.phase.set(CounterPhase::Done);
    } else {
        schedule_frame(host, animation);
    }
}

// =============================================================================
// COMPONENT
// =============================================================================

/// A number that counts up once, the first time its region becomes visible.
pub struct ViewportTriggeredCounter {
    animation: Rc<Animation>,
    /// Latched start; shared with the observer callback.
    trigger: Rc<dyn Fn()>,
    observer: Option<Subscription>,
}

impl ViewportTriggeredCounter {
    /// Observe `region` and count up to `config.target` the first time it becomes visible.
    pub fn mount<H>(host: &Rc<H>, region: RegionId, config: &CounterConfig) -> Self
    where
        H: IntersectionHost + FrameHost + 'static,
    {
        let animation = Rc::new(Animation {
            phase: signal(CounterPhase::Idle),
            value: signal(0),
            target: config.target,
            duration: config.duration(),
            started_at: Cell::new(None),
            pending: RefCell::new(None),
        });

        let weak = Rc::downgrade(host);
        let latch = animation.clone();
        let trigger: Rc<dyn Fn()> = Rc::new(move || {
            if latch.phase.get() != CounterPhase::Idle {
                return;
            }
            let Some(host) = weak.upgrade() else { return };
            tracing::debug!(%region, end = latch.target, "counter animation started");
            latch.phase.set(CounterPhase::Animating);
            schedule_frame(&host, &latch);
        });

        let on_enter = trigger.clone();
        let observer = match host::observe(host, region, IntersectionOptions::default(), move |is_intersecting| {
            if is_intersecting {
                on_enter();
            }
        }) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                tracing::debug!(%region, %err, "counter will not start on its own");
                None
            }
        };

        Self { animation, trigger, observer }
    }

    /// Viewport-enter event. Only the first one has any effect.
    pub fn on_viewport_enter(&self) {
        (self.trigger)();
    }

    /// Displayed value.
    pub fn value(&self) -> u32 {
        self.animation.value.get()
    }

    pub fn phase(&self) -> CounterPhase {
        self.animation.phase.get()
    }

    pub fn target(&self) -> u32 {
        self.animation.target
    }

    pub fn signal(&self) -> Signal<u32> {
        self.animation.value.clone()
    }

    pub fn phase_signal(&self) -> Signal<CounterPhase> {
        self.animation.phase.clone()
    }

    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.release();
        }
        self.animation.cancel_pending();
    }
}

impl Drop for ViewportTriggeredCounter {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Capabilities, SimHost};
    use crate::types::Rect;
    use proptest::prelude::*;

    const STATS: RegionId = RegionId(5);

    fn setup() -> Rc<SimHost> {
        let host = Rc::new(SimHost::new(1280.0, 720.0));
        host.add_region(STATS, Rect::new(1200.0, 1300.0, 0.0, 1280.0));
        host
    }

    fn config() -> CounterConfig {
        CounterConfig { target: 27, duration_ms: 2000 }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_value_curve() {
        let duration = ms(2000);
        assert_eq!(counter_value(ms(0), duration, 27), 0);
        assert_eq!(counter_value(ms(1000), duration, 27), 13);
        assert_eq!(counter_value(ms(2000), duration, 27), 27);
        assert_eq!(counter_value(ms(9000), duration, 27), 27);
        assert_eq!(counter_value(ms(0), Duration::ZERO, 27), 27);
    }

    #[test]
    fn test_idle_until_visible() {
        let host = setup();
        let counter = ViewportTriggeredCounter::mount(&host, STATS, &config());
        host.flush();

        assert_eq!(counter.phase(), CounterPhase::Idle);
        assert_eq!(host.pending_frame_count(), 0);

        host.scroll_window_to(800.0);
        assert_eq!(counter.phase(), CounterPhase::Animating);
        assert_eq!(host.pending_frame_count(), 1);
    }

    #[test]
    fn test_counts_up_then_holds() {
        let host = setup();
        let counter = ViewportTriggeredCounter::mount(&host, STATS, &config());
        counter.on_viewport_enter();

        let base = ms(5000);
        host.advance_frame(base);
        assert_eq!(counter.value(), 0);

        host.advance_frame(base + ms(1000));
        assert_eq!(counter.value(), 13);

        host.advance_frame(base + ms(2000));
        assert_eq!(counter.value(), 27);
        assert_eq!(counter.phase(), CounterPhase::Done);
        assert_eq!(host.pending_frame_count(), 0);

        assert_eq!(host.advance_frame(base + ms(3000)), 0);
        assert_eq!(counter.value(), 27);
    }

    #[test]
    fn test_reentry_does_not_restart() {
        let host = setup();
        let counter = ViewportTriggeredCounter::mount(&host, STATS, &config());
        counter.on_viewport_enter();
        host.advance_frame(ms(0));
        host.advance_frame(ms(500));
        let mid = counter.value();

        counter.on_viewport_enter();
        host.notify_intersection(STATS, true);
        assert_eq!(host.pending_frame_count(), 1);
        assert_eq!(counter.value(), mid);

        host.advance_frame(ms(2500));
        assert_eq!(counter.phase(), CounterPhase::Done);

        host.notify_intersection(STATS, false);
        host.notify_intersection(STATS, true);
        counter.on_viewport_enter();
        assert_eq!(counter.phase(), CounterPhase::Done);
        assert_eq!(counter.value(), 27);
        assert_eq!(host.pending_frame_count(), 0);
    }

    #[test]
    fn test_never_decreases_on_clock_skew() {
        let host = setup();
        let counter = ViewportTriggeredCounter::mount(&host, STATS, &config());
        counter.on_viewport_enter();

        host.advance_frame(ms(1000));
        host.advance_frame(ms(2000));
        let before = counter.value();
        host.advance_frame(ms(1500));
        assert!(counter.value() >= before);
    }

    #[test]
    fn test_unmount_cancels_pending_frame() {
        let host = setup();
        let counter = ViewportTriggeredCounter::mount(&host, STATS, &config());
        counter.on_viewport_enter();
        host.advance_frame(ms(0));
        host.advance_frame(ms(400));

        let value = counter.signal();
        let before = value.get();
        counter.unmount();

        assert!(host.is_idle());
        assert_eq!(host.advance_frame(ms(2000)), 0);
        assert_eq!(value.get(), before);
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let host = setup();
        {
            let counter = ViewportTriggeredCounter::mount(&host, STATS, &config());
            counter.on_viewport_enter();
        }
        assert!(host.is_idle());
    }

    #[test]
    fn test_queued_enter_after_unmount_is_noop() {
        let host = setup();
        let counter = ViewportTriggeredCounter::mount(&host, STATS, &config());
        let phase = counter.phase_signal();

        host.queue_intersection(STATS, true);
        counter.unmount();
        host.flush();

        assert_eq!(phase.get(), CounterPhase::Idle);
        assert_eq!(host.pending_frame_count(), 0);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_frame() {
        let host = setup();
        let counter = ViewportTriggeredCounter::mount(
            &host,
            STATS,
            &CounterConfig { target: 9, duration_ms: 0 },
        );
        counter.on_viewport_enter();
        host.advance_frame(ms(16));

        assert_eq!(counter.value(), 9);
        assert_eq!(counter.phase(), CounterPhase::Done);
    }

    #[test]
    fn test_without_frames_shows_final_value() {
        let host = Rc::new(SimHost::with_capabilities(
            Capabilities::all() - Capabilities::ANIMATION_FRAME,
            1280.0,
            720.0,
        ));
        let counter = ViewportTriggeredCounter::mount(&host, STATS, &config());
        counter.on_viewport_enter();

        assert_eq!(counter.phase(), CounterPhase::Done);
        assert_eq!(counter.value(), 27);
    }

    proptest! {
        #[test]
        fn value_is_monotonic_and_bounded(
            target in 0u32..10_000,
            duration_ms in 1u64..10_000,
            mut samples in proptest::collection::vec(0u64..20_000, 1..32),
        ) {
            samples.sort_unstable();
            let duration = ms(duration_ms);
            let mut previous = 0;
            for t in samples {
                let value = counter_value(ms(t), duration, target);
                prop_assert!(value >= previous);
                prop_assert!(value <= target);
                if t >= duration_ms {
                    prop_assert_eq!(value, target);
                }
                previous = value;
            }
        }
    }
}
