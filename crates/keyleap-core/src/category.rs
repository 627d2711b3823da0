#![forbid(unsafe_code)]

//! The category registry: one-character keys mapped to semantic element
//! classes.
//!
//! Categories are fixed at startup and never mutated. Each carries the CSS
//! selector a real page host feeds to its query machinery, plus the
//! [`InteractionMode`] that decides how a resolved target is presented and
//! which boundary policy traversal uses.
//!
//! # Design Notes
//!
//! - Unknown keys yield `None` from [`Category::lookup`]; callers no-op
//!   rather than fail.
//! - Uppercase keys (`T`, `L`) are distinct from their lowercase neighbors,
//!   which is why chord matching must not strip shift state from
//!   `KeyCode::Char`.
//!
//! # Example
//!
//! ```
//! use keyleap_core::category::{Category, InteractionMode};
//!
//! let headings = Category::lookup('h').unwrap();
//! assert_eq!(headings.mode(), InteractionMode::Ping);
//! assert!(Category::lookup('?').is_none());
//! ```

/// How a resolved target is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// Highlight the target and wait for an explicit commit before moving
    /// input focus (form fields, search landmarks).
    Staged,

    /// Scroll to the target and flash a self-expiring marker; input focus
    /// never moves (content and landmark categories).
    Ping,

    /// Move input focus straight to the target (plain interactive
    /// controls).
    Direct,
}

impl InteractionMode {
    /// The boundary policy traversal uses for this mode.
    ///
    /// Content categories cycle; sequential interactive controls stop at
    /// the edge so repeated presses never loop back silently.
    #[must_use]
    pub const fn boundary_policy(self) -> BoundaryPolicy {
        match self {
            Self::Staged | Self::Ping => BoundaryPolicy::Wrap,
            Self::Direct => BoundaryPolicy::Clamp,
        }
    }
}

/// Boundary rule applied when traversal runs off either end of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Cycle from the last element back to the first and vice versa.
    Wrap,

    /// Stop at the first/last element; a step that would not move is a
    /// no-op.
    Clamp,
}

/// One semantic class of page elements, addressable by a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    key: char,
    name: &'static str,
    selector: &'static str,
    mode: InteractionMode,
}

impl Category {
    /// The one-character chord key.
    #[must_use]
    pub const fn key(&self) -> char {
        self.key
    }

    /// Human-readable name, e.g. for a help overlay.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// CSS selector text a real page host matches against its tree.
    #[must_use]
    pub const fn selector(&self) -> &'static str {
        self.selector
    }

    /// Presentation mode for resolved targets.
    #[must_use]
    pub const fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Boundary policy for traversal within this category.
    #[must_use]
    pub const fn boundary_policy(&self) -> BoundaryPolicy {
        self.mode.boundary_policy()
    }

    /// Look up the category bound to `key`.
    ///
    /// Returns `None` for unbound keys; this is the normal "not a chord"
    /// answer, not an error.
    #[must_use]
    pub fn lookup(key: char) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.key == key)
    }

    /// All registered categories, in registration order.
    #[must_use]
    pub const fn all() -> &'static [Category] {
        &CATEGORIES
    }
}

const fn cat(
    key: char,
    name: &'static str,
    selector: &'static str,
    mode: InteractionMode,
) -> Category {
    Category {
        key,
        name,
        selector,
        mode,
    }
}

static CATEGORIES: [Category; 15] = [
    // Content
    cat(
        'h',
        "headings",
        "h1, h2, h3, h4, h5, h6, [role=\"heading\"]",
        InteractionMode::Ping,
    ),
    cat('p', "paragraphs", "p", InteractionMode::Ping),
    // Interactive controls
    cat(
        'b',
        "buttons",
        "button, [role=\"button\"]",
        InteractionMode::Direct,
    ),
    cat(
        'l',
        "links",
        "a[href], [role=\"link\"]",
        InteractionMode::Direct,
    ),
    cat(
        'i',
        "form fields",
        "input:not([type=\"hidden\"]), textarea, select, [contenteditable=\"true\"]",
        InteractionMode::Staged,
    ),
    cat(
        'c',
        "checkboxes",
        "input[type=\"checkbox\"], [role=\"checkbox\"]",
        InteractionMode::Direct,
    ),
    cat(
        't',
        "radios",
        "input[type=\"radio\"], [role=\"radio\"]",
        InteractionMode::Direct,
    ),
    // Landmark roles
    cat(
        'n',
        "navigation",
        "nav, [role=\"navigation\"]",
        InteractionMode::Ping,
    ),
    cat('m', "main", "main, [role=\"main\"]", InteractionMode::Ping),
    cat('s', "search", "[role=\"search\"]", InteractionMode::Staged),
    cat(
        'f',
        "labeled forms",
        "form[aria-label], form[aria-labelledby], [role=\"form\"]",
        InteractionMode::Ping,
    ),
    cat(
        'a',
        "articles",
        "article, [role=\"article\"]",
        InteractionMode::Ping,
    ),
    // Grouping roles
    cat(
        'T',
        "tables",
        "table, [role=\"table\"]",
        InteractionMode::Ping,
    ),
    cat('L', "lists", "ul, ol, [role=\"list\"]", InteractionMode::Ping),
    cat(
        'd',
        "dialogs",
        "[role=\"dialog\"], [role=\"alertdialog\"]",
        InteractionMode::Ping,
    ),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
