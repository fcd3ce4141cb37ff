//! Request tokens.
//!
//! A panel stamps every backend call with a token and only renders a
//! completion whose token is still live. Starting a newer request, or
//! clearing the panel, makes older tokens stale.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic token source.
#[derive(Debug, Default)]
pub struct TokenIssuer {
    issued: u64,
}

impl TokenIssuer {
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }
}

/// Tracks the single in-flight request of a panel.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issuer: TokenIssuer,
    live: Option<RequestToken>,
}

impl RequestTracker {
    /// Start a request, superseding any earlier one.
    pub fn begin(&mut self) -> RequestToken {
        let token = self.issuer.issue();
        self.live = Some(token);
        token
    }

    pub fn is_live(&self, token: RequestToken) -> bool {
        self.live == Some(token)
    }

    pub fn in_flight(&self) -> bool {
        self.live.is_some()
    }

    /// Forget the in-flight request; its completion will be discarded.
    pub fn invalidate(&mut self) {
        self.live = None;
    }

    /// Accept a completion. Returns `false` for a stale token.
    pub fn finish(&mut self, token: RequestToken) -> bool {
        if self.is_live(token) {
            self.live = None;
            true
        } else {
            false
        }
    }
}
