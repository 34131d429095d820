/*
[INPUT]:  Screens being mounted and unmounted by navigation
[OUTPUT]: MountScope (mount id + cancellation) and the Mounted screen wrapper
[POS]:    Concurrency layer - ties in-flight requests to the screen that issued them
[UPDATE]: When changing how late or cancelled responses are handled
*/

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use crate::request::{Request, Response};
use crate::views::Screen;

static NEXT_MOUNT_ID: AtomicU64 = AtomicU64::new(1);

/// Monotonic identity of one screen mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountId(u64);

impl MountId {
    fn next() -> Self {
        MountId(NEXT_MOUNT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifetime of a mounted screen as seen by its requests
#[derive(Debug, Clone)]
pub struct MountScope {
    id: MountId,
    token: CancellationToken,
}

impl MountScope {
    pub fn new() -> Self {
        Self {
            id: MountId::next(),
            token: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> MountId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Resolves once the screen is left
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }
}

impl Default for MountScope {
    fn default() -> Self {
        Self::new()
    }
}

/// A screen together with its mount scope.
///
/// Dropping it cancels the scope (in-flight requests stop) and drops the
/// screen, which releases every object URL the screen still holds.
pub struct Mounted<S> {
    screen: S,
    scope: MountScope,
    _guard: DropGuard,
}

impl<S: Screen> Mounted<S> {
    /// Mount `screen` under a fresh scope and return its initial requests
    pub fn mount(mut screen: S) -> (Self, Vec<Request>) {
        let scope = MountScope::new();
        let guard = scope.token.clone().drop_guard();
        let requests = screen.on_mount();
        debug!(mount = %scope.id(), route = %screen.route(), requests = requests.len(), "screen mounted");
        (
            Self {
                screen,
                scope,
                _guard: guard,
            },
            requests,
        )
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn scope(&self) -> &MountScope {
        &self.scope
    }

    pub fn id(&self) -> MountId {
        self.scope.id()
    }

    /// Apply a response issued under `mount`.
    ///
    /// Responses from another mount, or arriving after this one was cancelled,
    /// are discarded and yield `None`.
    pub fn accept(&mut self, mount: MountId, response: Response) -> Option<Vec<Request>> {
        if mount != self.scope.id() || !self.scope.is_active() {
            debug!(
                response_mount = %mount,
                current_mount = %self.scope.id(),
                "discarding late response"
            );
            return None;
        }
        Some(self.screen.apply(response))
    }
}

impl<S> Drop for Mounted<S> {
    fn drop(&mut self) {
        debug!(mount = %self.scope.id, "screen unmounted");
    }
}
