//! View lifecycle tracking.

use std::fmt;

use crate::error::ViewError;

/// Lifecycle phases of the cart view on one page.
///
/// `Init -> Loaded -> (Mutated -> Rendered)*`. The first paint happens while
/// `Loaded`; every later mutation moves to `Mutated` and back to `Rendered`
/// once the page reflects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    /// Created, cart not read yet.
    #[default]
    Init,
    /// Cart loaded and the page painted.
    Loaded,
    /// Cart changed, page not yet updated.
    Mutated,
    /// Page reflects the latest mutation.
    Rendered,
}

impl ViewPhase {
    /// Phase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewPhase::Init => "init",
            ViewPhase::Loaded => "loaded",
            ViewPhase::Mutated => "mutated",
            ViewPhase::Rendered => "rendered",
        }
    }

    /// Check whether `next` may follow this phase.
    pub fn can_transition_to(self, next: ViewPhase) -> bool {
        use ViewPhase::*;
        matches!(
            (self, next),
            (Init, Loaded) | (Loaded, Mutated) | (Rendered, Mutated) | (Mutated, Rendered)
        )
    }

    /// Move to `next`, or report why it is not allowed.
    pub fn transition(self, next: ViewPhase) -> Result<ViewPhase, ViewError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ViewError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Check whether the cart has been loaded.
    pub fn is_ready(&self) -> bool {
        !matches!(self, ViewPhase::Init)
    }
}

impl fmt::Display for ViewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
