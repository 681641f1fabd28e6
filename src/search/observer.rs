use crate::{Point, Route, RouteError};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Receives progress notifications from a search.
///
/// This is the only hook a front end gets into a running search. The search calls
/// [`on_visit`](SearchObserver::on_visit) synchronously and continues once it returns, so an
/// observer may block (for example to animate the frontier) but must not start another search.
///
/// Any `FnMut(Point)` closure is an observer that ignores completion:
/// ```
/// use terrain_pathfinding::{Algorithm, Grid, Point};
///
/// let grid: Grid = "E..X".parse()?;
/// let mut seen = vec![];
/// Algorithm::Bfs.search(&grid, &mut |p: Point| seen.push(p))?;
///
/// assert_eq!(seen, vec![(0, 1), (0, 2), (0, 3)]);
/// # Ok::<(), terrain_pathfinding::RouteError>(())
/// ```
pub trait SearchObserver {
	/// Called once for every Point newly admitted to the frontier, in discovery order.
	///
	/// The starting Point is never reported.
	fn on_visit(&mut self, point: Point);

	/// Called once at the end of every [`RoutePlanner`](crate::RoutePlanner) run, whether it
	/// succeeded or not.
	fn on_search_complete(&mut self, outcome: &Result<Route, RouteError>, elapsed: Duration) {
		let _ = (outcome, elapsed);
	}
}

impl<F: FnMut(Point)> SearchObserver for F {
	fn on_visit(&mut self, point: Point) {
		self(point)
	}
}

/// An observer that ignores everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
	fn on_visit(&mut self, _: Point) {}
}

/// Cooperative cancellation for a running search.
///
/// Clones share the same flag, so a token can be handed to another thread and tripped from
/// there. Searches check it every time they take a Point off their frontier.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{
///     Algorithm, CancelToken, Grid, NoopObserver, RouteError, StandardCosts,
/// };
///
/// let grid: Grid = "E....X".parse()?;
/// let token = CancelToken::new();
/// token.cancel();
///
/// let result = Algorithm::Dijkstra.search_with(&grid, &StandardCosts, &mut NoopObserver, &token);
/// assert_eq!(result, Err(RouteError::Cancelled));
/// # Ok::<(), RouteError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
	cancelled: Arc<AtomicBool>,
}

impl CancelToken {
	/// Creates a token that has not been cancelled
	pub fn new() -> CancelToken {
		CancelToken::default()
	}

	/// Request cancellation of every search holding a clone of this token.
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Release);
	}

	/// Check if cancellation has been requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Acquire)
	}

	/// Clear the flag so the token can be reused.
	pub fn reset(&self) {
		self.cancelled.store(false, Ordering::Release);
	}

	pub(crate) fn check(&self) -> Result<(), RouteError> {
		if self.is_cancelled() {
			Err(RouteError::Cancelled)
		} else {
			Ok(())
		}
	}
}
