//! Request orchestration with last-issued-wins semantics per surface
//!
//! Issuing a request mints a token and hands back a [`Pending`] future that
//! borrows nothing from the orchestrator. Once it resolves, the resulting
//! [`Completion`] is passed to [`RequestOrchestrator::settle`], which applies
//! it only if no newer request was issued on the same surface in the
//! meantime. Stale completions are dropped without an error; the wire
//! request itself is never cancelled.

use std::fmt::Display;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::ClientResult;

/// Independent request/response channel tracked for staleness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Catalog,
    Search,
    Recommend,
}

impl Surface {
    fn index(self) -> usize {
        match self {
            Surface::Catalog => 0,
            Surface::Search => 1,
            Surface::Recommend => 2,
        }
    }
}

impl Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Surface::Catalog => write!(f, "catalog"),
            Surface::Search => write!(f, "search"),
            Surface::Recommend => write!(f, "recommend"),
        }
    }
}

/// Marker identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    pub surface: Surface,
    pub seq: u64,
}

/// An issued request that has not resolved yet
#[must_use = "a pending request does nothing until it is resolved"]
pub struct Pending<T> {
    token: RequestToken,
    request: BoxFuture<'static, ClientResult<T>>,
}

impl<T> Pending<T> {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// Awaits the remote call and tags the outcome with its token
    pub async fn resolve(self) -> Completion<T> {
        let result = self.request.await;
        Completion {
            token: self.token,
            result,
        }
    }
}

impl<T> std::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending").field("token", &self.token).finish()
    }
}

/// A resolved request waiting to be settled
#[derive(Debug)]
pub struct Completion<T> {
    pub token: RequestToken,
    pub result: ClientResult<T>,
}

/// Outcome of settling a completion
#[derive(Debug)]
pub enum Settled<T> {
    /// Latest request on its surface; the caller applies it
    Current(ClientResult<T>),
    /// Superseded by a newer request; must have no visible effect
    Discarded,
}

#[derive(Debug, Default, Clone, Copy)]
struct SurfaceState {
    latest: u64,
    in_flight: bool,
}

#[derive(Debug, Default)]
pub struct RequestOrchestrator {
    surfaces: [SurfaceState; 3],
}

impl RequestOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    fn surface_mut(&mut self, surface: Surface) -> &mut SurfaceState {
        &mut self.surfaces[surface.index()]
    }

    fn surface(&self, surface: Surface) -> &SurfaceState {
        &self.surfaces[surface.index()]
    }

    /// Mints a token for `surface` and wraps `request` with it
    ///
    /// Any request previously issued on the surface becomes stale.
    pub fn issue<T, F>(&mut self, surface: Surface, request: F) -> Pending<T>
    where
        F: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let state = self.surface_mut(surface);
        state.latest += 1;
        state.in_flight = true;

        let token = RequestToken {
            surface,
            seq: state.latest,
        };

        tracing::debug!(surface = %surface, seq = token.seq, "Request issued");

        Pending {
            token,
            request: request.boxed(),
        }
    }

    /// Supersedes whatever is in flight on `surface` without issuing
    ///
    /// Does nothing when the surface is idle, so `latest` only ever names a
    /// request that was actually issued or the marker that superseded one.
    pub fn invalidate(&mut self, surface: Surface) {
        let state = self.surface_mut(surface);
        if !state.in_flight {
            return;
        }
        tracing::debug!(surface = %surface, seq = state.latest, "In-flight request superseded");
        state.latest += 1;
        state.in_flight = false;
    }

    /// Decides whether `completion` may be applied
    pub fn settle<T>(&mut self, completion: Completion<T>) -> Settled<T> {
        let Completion { token, result } = completion;
        let state = self.surface_mut(token.surface);

        if token.seq != state.latest {
            tracing::debug!(
                surface = %token.surface,
                seq = token.seq,
                latest = state.latest,
                "Stale response discarded"
            );
            return Settled::Discarded;
        }

        state.in_flight = false;
        if let Err(e) = &result {
            tracing::warn!(surface = %token.surface, seq = token.seq, error = %e, "Request failed");
        }

        Settled::Current(result)
    }

    pub fn is_in_flight(&self, surface: Surface) -> bool {
        self.surface(surface).in_flight
    }

    /// Token of the most recent request on `surface`, if any was issued
    pub fn latest(&self, surface: Surface) -> Option<RequestToken> {
        let state = self.surface(surface);
        (state.latest > 0).then_some(RequestToken {
            surface,
            seq: state.latest,
        })
    }
}
