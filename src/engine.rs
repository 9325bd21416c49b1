//! Driver contract shared by all iterative engines.
//!
//! Every engine is a step-driven state machine: a driver (GUI tick, CLI
//! loop, test harness) calls [`Engine::step`] and receives a [`Snapshot`]
//! of the best candidate found so far. Stopping early is simply not calling
//! `step()` again; engines own no threads or other resources to release.
//!
//! Rendering lives behind [`Visualizer`], which only ever sees shared
//! references to snapshots.

/// Lifecycle state of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// More steps can be taken.
    Running,
    /// The success criterion was met; further steps do nothing.
    Converged,
    /// The iteration budget or temperature schedule ran out.
    Exhausted,
}

impl Status {
    /// Returns `true` for [`Converged`](Self::Converged) and
    /// [`Exhausted`](Self::Exhausted).
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// Immutable view of an engine after one step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<C, S> {
    /// Best candidate seen so far.
    pub candidate: C,
    /// Score of [`candidate`](Self::candidate).
    pub score: S,
    /// Number of transitions applied so far (generation or iteration index).
    pub iteration: usize,
    /// Engine state after this step.
    pub status: Status,
}

impl<C, S> Snapshot<C, S> {
    /// Returns `true` when the engine will not make further progress.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// A steppable search engine.
pub trait Engine {
    /// Candidate representation reported in snapshots.
    type Candidate: Clone;
    /// Score reported in snapshots.
    type Score: Copy;

    /// Applies one transition and returns the resulting snapshot.
    ///
    /// Calling `step()` on a terminal engine returns the terminal snapshot
    /// again without doing any work.
    fn step(&mut self) -> Snapshot<Self::Candidate, Self::Score>;

    /// Current lifecycle state.
    fn status(&self) -> Status;

    /// Number of transitions applied so far.
    fn iteration(&self) -> usize;
}

/// Renders snapshots. Implemented outside this crate (GUI, terminal, ...).
pub trait Visualizer<C, S> {
    /// Called at most once per step with the snapshot that step produced.
    fn render(&mut self, snapshot: &Snapshot<C, S>);
}

/// A visualizer that ignores every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVisualizer;

impl<C, S> Visualizer<C, S> for NoopVisualizer {
    fn render(&mut self, _snapshot: &Snapshot<C, S>) {}
}

/// Steps `engine` until it becomes terminal or `max_steps` steps were taken,
/// rendering each snapshot.
///
/// Returns the last snapshot, or `None` if `max_steps` is zero.
pub fn drive<E, V>(
    engine: &mut E,
    visualizer: &mut V,
    max_steps: usize,
) -> Option<Snapshot<E::Candidate, E::Score>>
where
    E: Engine,
    V: Visualizer<E::Candidate, E::Score>,
{
    let mut last = None;
    for _ in 0..max_steps {
        let snapshot = engine.step();
        visualizer.render(&snapshot);
        let terminal = snapshot.is_terminal();
        last = Some(snapshot);
        if terminal {
            break;
        }
    }
    last
}
