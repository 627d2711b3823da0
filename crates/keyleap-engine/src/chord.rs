#![forbid(unsafe_code)]

//! Two-key chord interpreter: a direction key followed by a category key.
//!
//! This is a stateful interpreter over the [`KeyEvent`] stream, independent
//! of what the completed chord goes on to do. It remembers at most one
//! pending direction and reports, per key, whether the key armed a chord,
//! completed one, or should pass through to the page.
//!
//! # Design
//!
//! ## Invariants
//! 1. At most one direction is pending at any time.
//! 2. A direction key always (re)arms; the newest direction wins.
//! 3. A pending direction survives unrecognized keys — only completion,
//!    [`cancel`](ChordInterpreter::cancel), a fresh direction key, or the
//!    configured timeout clears it.
//! 4. Keys with Ctrl/Alt/Super held never participate; Shift may, because
//!    two category keys are uppercase.
//!
//! ## Failure Modes
//! - An abandoned pending direction costs nothing: it is silently replaced
//!   or expired, never corrupting later chords.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use keyleap_core::event::KeyEvent;
//! use keyleap_engine::chord::{ChordFeed, ChordInterpreter};
//! use keyleap_engine::traversal::Direction;
//!
//! let mut interp = ChordInterpreter::with_defaults();
//! let now = Instant::now();
//!
//! assert_eq!(interp.feed(&KeyEvent::char(']'), now), ChordFeed::Armed(Direction::Forward));
//! assert_eq!(
//!     interp.feed(&KeyEvent::char('h'), now),
//!     ChordFeed::Complete { direction: Direction::Forward, category: 'h' }
//! );
//! ```

use std::time::{Duration, Instant};

use keyleap_core::category::Category;
use keyleap_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
use tracing::trace;

use crate::traversal::Direction;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for chord interpretation.
#[derive(Debug, Clone)]
pub struct ChordConfig {
    /// The key that arms a forward chord (default: `]`).
    pub forward_key: char,

    /// The key that arms a backward chord (default: `[`).
    pub backward_key: char,

    /// Optional expiry for an abandoned pending direction (default: off).
    ///
    /// When set, a pending direction older than this is dropped before the
    /// incoming key is interpreted, and [`tick`](ChordInterpreter::tick)
    /// expires it between keys.
    pub pending_timeout: Option<Duration>,
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self {
            forward_key: ']',
            backward_key: '[',
            pending_timeout: None,
        }
    }
}

impl ChordConfig {
    /// Create a config with a pending-direction timeout.
    #[must_use]
    pub fn with_pending_timeout(timeout: Duration) -> Self {
        Self {
            pending_timeout: Some(timeout),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// ChordFeed
// ---------------------------------------------------------------------------

/// Result of feeding one key event to the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordFeed {
    /// The key armed (or re-armed) a chord; suppress its default action.
    Armed(Direction),

    /// The key completed a chord; suppress its default action.
    Complete {
        /// Direction captured by the first key.
        direction: Direction,
        /// Category key that completed the chord.
        category: char,
    },

    /// The key is not part of a chord; pass it through to the page.
    Ignored,
}

impl ChordFeed {
    /// Returns true if the key was consumed by the interpreter.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

// ---------------------------------------------------------------------------
// ChordInterpreter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Pending {
    direction: Direction,
    since: Instant,
}

/// Stateful two-key chord interpreter.
///
/// Feed key events via [`feed`](Self::feed); call [`tick`](Self::tick)
/// when the deadline from [`pending_deadline`](Self::pending_deadline)
/// passes (only relevant with a configured timeout).
#[derive(Debug, Clone)]
pub struct ChordInterpreter {
    config: ChordConfig,
    pending: Option<Pending>,
}

impl ChordInterpreter {
    /// Create a new interpreter with the given configuration.
    #[must_use]
    pub fn new(config: ChordConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    /// Create a new interpreter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ChordConfig::default())
    }

    /// Feed a key event into the interpreter.
    ///
    /// Only plain key presses participate: repeat and release events, and
    /// presses with Ctrl/Alt/Super held, are reported as
    /// [`Ignored`](ChordFeed::Ignored).
    pub fn feed(&mut self, event: &KeyEvent, now: Instant) -> ChordFeed {
        if event.kind != KeyEventKind::Press {
            return ChordFeed::Ignored;
        }
        if event
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
        {
            return ChordFeed::Ignored;
        }
        let KeyCode::Char(c) = event.code else {
            return ChordFeed::Ignored;
        };

        self.expire(now);

        if c == self.config.forward_key {
            return self.arm(Direction::Forward, now);
        }
        if c == self.config.backward_key {
            return self.arm(Direction::Backward, now);
        }

        if let Some(pending) = self.pending
            && Category::lookup(c).is_some()
        {
            self.pending = None;
            trace!(direction = ?pending.direction, category = %c, "chord complete");
            return ChordFeed::Complete {
                direction: pending.direction,
                category: c,
            };
        }

        // Unrecognized key: the pending direction, if any, stays armed.
        ChordFeed::Ignored
    }

    /// Expire an overdue pending direction (no-op without a timeout).
    ///
    /// Call when the deadline from [`pending_deadline`](Self::pending_deadline)
    /// passes; [`feed`](Self::feed) also expires on entry.
    pub fn tick(&mut self, now: Instant) {
        self.expire(now);
    }

    /// Discard any pending direction.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The direction currently awaiting a category key.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending.map(|p| p.direction)
    }

    /// Instant at which the pending direction expires.
    ///
    /// `None` when nothing is pending or no timeout is configured.
    #[must_use]
    pub fn pending_deadline(&self) -> Option<Instant> {
        let timeout = self.config.pending_timeout?;
        self.pending.map(|p| p.since + timeout)
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub fn config(&self) -> &ChordConfig {
        &self.config
    }

    fn arm(&mut self, direction: Direction, now: Instant) -> ChordFeed {
        trace!(?direction, "chord armed");
        self.pending = Some(Pending {
            direction,
            since: now,
        });
        ChordFeed::Armed(direction)
    }

    fn expire(&mut self, now: Instant) {
        if let Some(timeout) = self.config.pending_timeout
            && let Some(pending) = self.pending
            && now.duration_since(pending.since) >= timeout
        {
            trace!(direction = ?pending.direction, "pending chord expired");
            self.pending = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
