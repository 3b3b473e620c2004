//! Mobile Menu - Full-screen navigation overlay
//!
//! Two states, `Closed` (initial) and `Open`:
//! - hamburger activation flips the state
//! - activating a link while open forces `Closed`
//!
//! Each change carries the per-item animation cues for the overlay's children
//! (the nav links, then the social row). Items enter top to bottom
//! after an initial delay and leave bottom to top with a shorter stagger; the
//! direction is explicit in [`StaggerSchedule`], never implied by list order.

use std::time::Duration;

use spark_signals::{signal, Signal};

use crate::config::MenuConfig;
use crate::nav::NavLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }
}

// =============================================================================
// STAGGER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaggerDirection {
    /// First item starts first.
    Forward,
    /// Last item starts first.
    Reverse,
}

/// Start delay for one overlay item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCue {
    pub index: usize,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerSchedule {
    /// Delay before the first item in the cascade.
    pub delay: Duration,
    /// Added for each further step of the cascade.
    pub stagger: Duration,
    pub direction: StaggerDirection,
}

impl StaggerSchedule {
    /// Cues for `count` items, ordered by start time.
    pub fn cues(&self, count: usize) -> Vec<ItemCue> {
        (0..count)
            .map(|step| {
                let index = match self.direction {
                    StaggerDirection::Forward => step,
                    StaggerDirection::Reverse => count - 1 - step,
                };
                ItemCue { index, delay: self.delay + self.stagger * step as u32 }
            })
            .collect()
    }
}

/// One state change and how its items should animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTransition {
    pub state: MenuState,
    pub overlay_fade: Duration,
    pub cues: Vec<ItemCue>,
}

// =============================================================================
// STATE MACHINE
// =============================================================================

pub struct MenuStateMachine {
    state: Signal<MenuState>,
    transition: Signal<Option<MenuTransition>>,
    item_count: usize,
    entry: StaggerSchedule,
    exit: StaggerSchedule,
    overlay_fade: Duration,
}

impl MenuStateMachine {
    pub fn new(item_count: usize, config: &MenuConfig) -> Self {
        Self {
            state: signal(MenuState::Closed),
            transition: signal(None),
            item_count,
            entry: StaggerSchedule {
                delay: Duration::from_millis(config.entry_delay_ms),
                stagger: Duration::from_millis(config.entry_stagger_ms),
                direction: StaggerDirection::Forward,
            },
            exit: StaggerSchedule {
                delay: Duration::ZERO,
                stagger: Duration::from_millis(config.exit_stagger_ms),
                direction: StaggerDirection::Reverse,
            },
            overlay_fade: Duration::from_millis(config.overlay_fade_ms),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state() == MenuState::Open
    }

    pub fn signal(&self) -> Signal<MenuState> {
        self.state.clone()
    }

    /// The most recent transition, if any happened yet.
    pub fn last_transition(&self) -> Option<MenuTransition> {
        self.transition.get()
    }

    pub fn entry_schedule(&self) -> StaggerSchedule {
        self.entry
    }

    pub fn exit_schedule(&self) -> StaggerSchedule {
        self.exit
    }

    /// Accessible label for the hamburger button.
    pub fn toggle_label(&self) -> &'static str {
        match self.state() {
            MenuState::Closed => "Abrir menú",
            MenuState::Open => "Cerrar menú",
        }
    }

    /// Hamburger activation.
    pub fn toggle(&self) -> MenuTransition {
        self.transition_to(self.state().toggled())
    }

    /// Link activation. Closes the overlay if it is open.
    pub fn navigate(&self, link: &NavLink) -> Option<MenuTransition> {
        if !self.is_open() {
            return None;
        }
        tracing::debug!(href = link.href, "closing menu for navigation");
        Some(self.transition_to(MenuState::Closed))
    }

    fn transition_to(&self, state: MenuState) -> MenuTransition {
        let schedule = match state {
            MenuState::Open => self.entry,
            MenuState::Closed => self.exit,
        };
        let transition = MenuTransition {
            state,
            overlay_fade: self.overlay_fade,
            cues: schedule.cues(self.item_count),
        };

        tracing::trace!(?state, "menu transition");
        self.state.set(state);
        self.transition.set(Some(transition.clone()));
        transition
    }
}
