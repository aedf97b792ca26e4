//! Driver loop over a decoded route.
//!
//! Each [`PathWalker::step`] call skips edges that are already trivial, then acts on the first
//! one that is not. Steps are always trivial, so movement happens as a nudge: the walker clicks
//! the furthest loaded step it skipped whenever it has nothing better to do. A door is only
//! passed once it is seen open; issuing its action keeps the walker on it.

use tracing::{debug, info, warn};

use crate::edge::{Edge, EdgeAction, EdgeKind, Traversal};
use crate::session::Interactor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// An edge's action was issued and the walker moved past it.
    Advanced(EdgeKind),
    /// An action was issued on an edge that settles by observation; the walker stays on it
    /// until it reads as trivial.
    Acted(EdgeKind),
    /// Clicked towards a loaded step.
    Walking,
    /// Nothing could be done this tick.
    Stalled,
    /// The host cannot traverse this kind of edge; the walker stays on it.
    Unsupported(EdgeKind),
    Done,
}

#[derive(Debug, Clone)]
pub struct PathWalker {
    edges: Vec<Edge>,
    cursor: usize,
    stalled: bool,
}

impl PathWalker {
    pub fn new(edges: Vec<Edge>) -> Self { Self { edges, cursor: 0, stalled: false } }

    /// Edges not yet passed.
    pub fn remaining(&self) -> &[Edge] { &self.edges[self.cursor..] }

    pub fn is_done(&self) -> bool { self.cursor >= self.edges.len() }

    pub fn step<S: Interactor + ?Sized>(&mut self, session: &mut S) -> WalkStatus {
        let mut nudge = None;
        let mut next = self.cursor;
        while let Some(edge) = self.edges.get(next) {
            if !edge.trivial(&*session) {
                break;
            }
            match edge {
                Edge::Step(step) => {
                    if session.is_loaded(step.position) {
                        nudge = Some(next);
                    }
                }
                // an open door seen on the way is passed for good
                _ => self.cursor = next + 1,
            }
            next += 1;
        }

        if next >= self.edges.len() {
            return self.finish(session, nudge);
        }

        let edge = &self.edges[next];
        let kind = edge.kind();
        let status = match edge.traverse(session) {
            Traversal::Issued if kind.settles_by_observation() => {
                debug!(?kind, index = next, "action issued, waiting for edge to clear");
                WalkStatus::Acted(kind)
            }
            Traversal::Issued => {
                debug!(?kind, index = next, "edge traversed");
                self.cursor = next + 1;
                WalkStatus::Advanced(kind)
            }
            Traversal::Failed => return self.nudge(session, nudge),
            Traversal::Unsupported => {
                warn!(?kind, index = next, "host cannot traverse edge");
                WalkStatus::Unsupported(kind)
            }
        };
        self.stalled = false;
        status
    }

    // Only trivial edges remain: walk until the player stands on the last step.
    fn finish<S: Interactor + ?Sized>(&mut self, session: &mut S, nudge: Option<usize>) -> WalkStatus {
        let destination = (self.cursor..self.edges.len()).rev().find_map(|i| match &self.edges[i] {
            Edge::Step(step) => Some((i, step.position)),
            _ => None,
        });
        match destination {
            Some((last, tile)) if session.player_position() != Some(tile) => {
                self.nudge(session, nudge.or(Some(last)))
            }
            _ => {
                if !self.is_done() {
                    info!(edges = self.edges.len(), "route complete");
                }
                self.cursor = self.edges.len();
                self.stalled = false;
                WalkStatus::Done
            }
        }
    }

    fn nudge<S: Interactor + ?Sized>(&mut self, session: &mut S, nudge: Option<usize>) -> WalkStatus {
        let target = nudge.and_then(|i| self.edges.get(i));
        if let Some(edge) = target {
            if edge.traverse(session).issued() {
                self.stalled = false;
                return WalkStatus::Walking;
            }
        }
        if !self.stalled {
            warn!(cursor = self.cursor, target = ?target.and_then(Edge::position), "walker stalled");
            self.stalled = true;
        }
        WalkStatus::Stalled
    }
}
