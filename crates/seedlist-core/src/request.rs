//! Request sequencing for actions whose responses arrive out of order.
//!
//! Each logical action (search, recommend, save, auth) owns one slot.  Issuing
//! a new token for an action supersedes whatever was in flight for it; when a
//! response comes back the caller asks the gate whether its token is still
//! the latest and drops the response otherwise.
//!
//! ```text
//!  issue(Search) -> #1        issue(Search) -> #2
//!  #1 completes   -> stale (dropped)
//!  #2 completes   -> current (applied)
//! ```

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Auth,
    Search,
    Recommend,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub kind: RequestKind,
    seq: u64,
}

impl RequestToken {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct RequestGate {
    next_seq: u64,
    latest: HashMap<RequestKind, u64>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request for `kind`, superseding any in-flight one.
    pub fn issue(&mut self, kind: RequestKind) -> RequestToken {
        self.next_seq += 1;
        self.latest.insert(kind, self.next_seq);
        RequestToken {
            kind,
            seq: self.next_seq,
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.get(&token.kind) == Some(&token.seq)
    }

    /// Called when a response arrives.  Returns `true` if it should be
    /// applied; the slot is released either way if the token was current.
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.latest.remove(&token.kind);
            true
        } else {
            false
        }
    }

    /// Drop whatever is in flight for `kind`; its response will be stale.
    pub fn cancel(&mut self, kind: RequestKind) {
        self.latest.remove(&kind);
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.latest.contains_key(&kind)
    }
}
