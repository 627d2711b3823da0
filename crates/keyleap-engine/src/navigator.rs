#![forbid(unsafe_code)]

//! The navigator: one engine instance per browsing context.
//!
//! Hosts feed raw key events to [`Navigator::handle_key`] and forward the
//! returned disposition to their event system (`Handled` means "suppress
//! the key's default action"). Between keys, hosts call
//! [`Navigator::tick`] whenever the instant reported by
//! [`Navigator::next_deadline`] arrives.
//!
//! # Key handling order
//!
//! 1. `Escape` cancels everything — staged element, pending chord, active
//!    ping — from any state, even while an editable field has focus. The
//!    key still passes through: pages may layer their own Escape handling.
//! 2. `Enter` with a staged element commits it (focus moves to the staged
//!    element, the stage marker comes off) and is suppressed. This too
//!    works while an editable field has focus.
//! 3. While focus is inside an editable surface that is not the staged
//!    element itself, every other key passes through untouched — typing
//!    into a field must never be hijacked.
//! 4. Everything else goes to the chord interpreter; armed and completing
//!    keys are suppressed, the rest pass through.
//!
//! # Error handling
//!
//! There are no fatal conditions. Unknown categories, empty element
//! sequences, and clamped-at-boundary steps all degrade to a silent no-op;
//! [`DispatchOutcome`] tells programmatic callers which case occurred.

use std::time::Instant;

use keyleap_core::category::Category;
use keyleap_core::event::{KeyCode, KeyEvent, KeyEventKind};
use keyleap_core::page::{NodeId, Page};
use tracing::debug;

use crate::chord::{ChordConfig, ChordFeed, ChordInterpreter};
use crate::dispatcher::{Dispatcher, PingConfig};
use crate::eligibility::eligible;
use crate::resolver::resolve_anchor;
use crate::traversal::{Direction, next_index};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`Navigator`].
#[derive(Debug, Clone, Default)]
pub struct NavigatorConfig {
    /// Chord interpretation settings.
    pub chord: ChordConfig,

    /// Ping timing settings.
    pub ping: PingConfig,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What the host should do with a key it just delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The engine consumed the key; suppress its default action.
    Handled,

    /// The key is not the engine's business; let the page have it.
    PassThrough,
}

impl KeyDisposition {
    /// Returns true if the key was consumed.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Result of a navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A target was found and presented.
    Dispatched(NodeId),

    /// The category key is not registered; nothing happened.
    NoSuchCategory,

    /// The category has no eligible elements; nothing happened.
    NothingEligible,

    /// Clamp policy, already at the boundary; nothing happened.
    AtBoundary,
}

impl DispatchOutcome {
    /// Returns true if a target was presented.
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// The chorded navigation engine for one browsing context.
#[derive(Debug)]
pub struct Navigator {
    chord: ChordInterpreter,
    dispatcher: Dispatcher,
}

impl Navigator {
    /// Create a navigator with the given configuration.
    #[must_use]
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            chord: ChordInterpreter::new(config.chord),
            dispatcher: Dispatcher::new(config.ping),
        }
    }

    /// Create a navigator with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(NavigatorConfig::default())
    }

    /// Process one raw key event against `page` at time `now`.
    pub fn handle_key(
        &mut self,
        page: &mut dyn Page,
        event: &KeyEvent,
        now: Instant,
    ) -> KeyDisposition {
        if event.kind != KeyEventKind::Press {
            return KeyDisposition::PassThrough;
        }

        if event.code == KeyCode::Escape {
            self.cancel(page);
            return KeyDisposition::PassThrough;
        }

        if event.code == KeyCode::Enter && self.dispatcher.staged().is_some() {
            self.dispatcher.commit_staged(page);
            return KeyDisposition::Handled;
        }

        // Typing into an active editable field is never hijacked; a staged
        // field that somehow gained focus is the one exception, so chords
        // keep working around it.
        if let Some(target) = page.focused()
            && page.is_editable(target)
            && Some(target) != self.dispatcher.staged()
        {
            return KeyDisposition::PassThrough;
        }

        match self.chord.feed(event, now) {
            ChordFeed::Armed(_) => KeyDisposition::Handled,
            ChordFeed::Complete {
                direction,
                category,
            } => {
                // The chord itself is consumed even when navigation finds
                // nothing to do.
                self.navigate(page, direction, category, now);
                KeyDisposition::Handled
            }
            ChordFeed::Ignored => KeyDisposition::PassThrough,
        }
    }

    /// Navigate `direction` within the category bound to `category_key`.
    ///
    /// This is the programmatic equivalent of a completed chord.
    pub fn navigate(
        &mut self,
        page: &mut dyn Page,
        direction: Direction,
        category_key: char,
        now: Instant,
    ) -> DispatchOutcome {
        let Some(category) = Category::lookup(category_key) else {
            return DispatchOutcome::NoSuchCategory;
        };
        let sequence = eligible(page, category);
        let reference = self.dispatcher.staged().or(self.dispatcher.ping_anchor());
        let Some(anchor) = resolve_anchor(page, reference, &sequence, direction) else {
            debug!(category = category.name(), "nothing eligible");
            return DispatchOutcome::NothingEligible;
        };
        let Some(index) = next_index(anchor, direction, sequence.len(), category.boundary_policy())
        else {
            debug!(category = category.name(), anchor, "at boundary");
            return DispatchOutcome::AtBoundary;
        };
        let target = sequence[index];
        self.dispatcher.dispatch(page, category, target, now);
        DispatchOutcome::Dispatched(target)
    }

    /// Advance timers: ping phases and pending-chord expiry.
    pub fn tick(&mut self, page: &mut dyn Page, now: Instant) {
        self.chord.tick(now);
        self.dispatcher.tick(page, now);
    }

    /// The next instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.chord.pending_deadline(), self.dispatcher.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel everything: staged element, active ping, pending chord.
    pub fn cancel(&mut self, page: &mut dyn Page) {
        self.chord.cancel();
        self.dispatcher.cancel(page);
    }

    /// The currently staged element, if any.
    #[must_use]
    pub fn staged(&self) -> Option<NodeId> {
        self.dispatcher.staged()
    }

    /// The direction currently awaiting a category key, if any.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.chord.pending_direction()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
