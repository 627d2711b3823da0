#![forbid(unsafe_code)]

//! The interaction dispatcher: how a resolved target is presented.
//!
//! Owns the two pieces of presentation state the rest of the engine must
//! never touch directly: the staged-element slot and the active ping.
//!
//! # Design
//!
//! ## Invariants
//! 1. At most one element is staged at any time; staging a new target (or
//!    dispatching direct focus) clears the old stage marker first.
//! 2. At most one ping is outstanding; arming a new ping strips the old
//!    marker synchronously before the new one is scheduled, so rapid
//!    navigation never leaves two marked elements or a stale marker.
//! 3. A staged element never holds input focus while staged; committing it
//!    clears staging before focus moves.
//! 4. The last ping target is remembered as an anchor even after its
//!    marker expires, so a run of ping commands walks the category rather
//!    than re-selecting whatever sits nearest the viewport center. The
//!    anchor is dropped on [`cancel`](Dispatcher::cancel).
//!
//! ## Timing
//!
//! Pings run a two-phase schedule driven entirely by the caller's clock:
//! `Armed` waits out a short re-trigger delay (so the host's renderer sees
//! a class removal and re-addition as a fresh animation even when the same
//! element is pinged twice in a row), then `Lit` holds the marker for a
//! fixed duration. Hosts call [`tick`](Dispatcher::tick) when the instant
//! from [`next_deadline`](Dispatcher::next_deadline) arrives; there are no
//! ambient timers.

use std::time::{Duration, Instant};

use keyleap_core::category::{Category, InteractionMode};
use keyleap_core::page::{Marker, NodeId, Page};
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timing configuration for the scroll-and-ping presentation.
#[derive(Debug, Clone)]
pub struct PingConfig {
    /// Delay between arming a ping and applying its marker (default: 10ms).
    ///
    /// Long enough for a renderer to register the previous marker removal,
    /// short enough to read as immediate.
    pub retrigger_delay: Duration,

    /// How long the marker stays applied before expiring (default: 1200ms,
    /// matching the marker's animation length in the styling layer).
    pub duration: Duration,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            retrigger_delay: Duration::from_millis(10),
            duration: Duration::from_millis(1200),
        }
    }
}

// ---------------------------------------------------------------------------
// Ping state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum PingPhase {
    /// Marker not yet applied; waiting out the re-trigger delay.
    Armed { light_at: Instant },
    /// Marker applied; waiting out the display duration.
    Lit { clear_at: Instant },
}

#[derive(Debug, Clone, Copy)]
struct ActivePing {
    node: NodeId,
    phase: PingPhase,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Applies one of the three presentation modes to resolved targets and owns
/// the staged-element and active-ping slots.
#[derive(Debug)]
pub struct Dispatcher {
    config: PingConfig,
    staged: Option<NodeId>,
    ping: Option<ActivePing>,
    /// Last ping target; outlives the marker so repeated pings walk the
    /// category instead of re-selecting whatever sits at viewport center.
    ping_anchor: Option<NodeId>,
}

impl Dispatcher {
    /// Create a new dispatcher with the given ping timing.
    #[must_use]
    pub fn new(config: PingConfig) -> Self {
        Self {
            config,
            staged: None,
            ping: None,
            ping_anchor: None,
        }
    }

    /// Create a new dispatcher with default timing.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PingConfig::default())
    }

    /// The currently staged element, if any.
    #[must_use]
    pub fn staged(&self) -> Option<NodeId> {
        self.staged
    }

    /// The most recent ping target, if any.
    ///
    /// Survives marker expiry: the anchor is the in-memory cursor for
    /// ping-mode categories, not a reflection of what is currently lit.
    #[must_use]
    pub fn ping_anchor(&self) -> Option<NodeId> {
        self.ping_anchor
    }

    /// Present `target` according to `category`'s interaction mode.
    ///
    /// Always clears the previous staged element first; the staged-focus
    /// mode then re-stages the new target.
    pub fn dispatch(
        &mut self,
        page: &mut dyn Page,
        category: &Category,
        target: NodeId,
        now: Instant,
    ) {
        debug!(category = category.name(), node = target.get(), "dispatch");
        self.clear_staged(page);
        match category.mode() {
            InteractionMode::Staged => {
                self.staged = Some(target);
                page.add_marker(target, Marker::Stage);
                page.scroll_into_view(target);
            }
            InteractionMode::Ping => {
                self.start_ping(page, target, now);
                self.ping_anchor = Some(target);
                page.scroll_into_view(target);
            }
            InteractionMode::Direct => {
                page.focus(target);
                page.scroll_into_view(target);
            }
        }
    }

    /// Commit the staged element: clear staging, then move focus to it.
    ///
    /// Returns the committed element, or `None` when nothing was staged.
    pub fn commit_staged(&mut self, page: &mut dyn Page) -> Option<NodeId> {
        let node = self.staged.take()?;
        debug!(node = node.get(), "commit staged");
        page.remove_marker(node, Marker::Stage);
        page.focus(node);
        Some(node)
    }

    /// Drop the staged element and its marker, without moving focus.
    pub fn clear_staged(&mut self, page: &mut dyn Page) {
        if let Some(node) = self.staged.take() {
            page.remove_marker(node, Marker::Stage);
        }
    }

    /// Cancel everything: staged element, active ping, and ping anchor.
    pub fn cancel(&mut self, page: &mut dyn Page) {
        self.clear_staged(page);
        self.cancel_ping(page);
        self.ping_anchor = None;
    }

    /// Advance the ping schedule to `now`.
    pub fn tick(&mut self, page: &mut dyn Page, now: Instant) {
        let Some(ping) = self.ping else {
            return;
        };
        match ping.phase {
            PingPhase::Armed { light_at } if now >= light_at => {
                trace!(node = ping.node.get(), "ping lit");
                page.add_marker(ping.node, Marker::Ping);
                self.ping = Some(ActivePing {
                    node: ping.node,
                    phase: PingPhase::Lit {
                        clear_at: now + self.config.duration,
                    },
                });
            }
            PingPhase::Lit { clear_at } if now >= clear_at => {
                trace!(node = ping.node.get(), "ping expired");
                page.remove_marker(ping.node, Marker::Ping);
                self.ping = None;
            }
            _ => {}
        }
    }

    /// The next instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ping.map(|p| match p.phase {
            PingPhase::Armed { light_at } => light_at,
            PingPhase::Lit { clear_at } => clear_at,
        })
    }

    fn start_ping(&mut self, page: &mut dyn Page, target: NodeId, now: Instant) {
        // Strip the previous marker synchronously; re-applying after the
        // delay is what lets the renderer restart the animation even when
        // the target is unchanged.
        self.cancel_ping(page);
        self.ping = Some(ActivePing {
            node: target,
            phase: PingPhase::Armed {
                light_at: now + self.config.retrigger_delay,
            },
        });
    }

    fn cancel_ping(&mut self, page: &mut dyn Page) {
        if let Some(ping) = self.ping.take() {
            page.remove_marker(ping.node, Marker::Ping);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
