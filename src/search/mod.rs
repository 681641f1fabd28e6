//! The three searches and what they share.
//!
//! Every search takes a [`Grid`], reports each newly discovered Point to a
//! [`SearchObserver`] and produces a [`SearchResult`] holding its predecessor map. They only
//! borrow the Grid, so Markers have to be painted by the caller afterwards (see
//! [`RoutePlanner`](crate::RoutePlanner)).

mod a_star;
mod bfs;
mod dijkstra;
mod observer;
mod state;

pub use self::a_star::a_star_search;
pub use self::bfs::bfs_search;
pub use self::dijkstra::dijkstra_search;
pub use self::observer::{CancelToken, NoopObserver, SearchObserver};

use self::state::{Element, HeuristicElement, SearchState};
use crate::{
	path_cost, reconstruct, CostModel, Grid, Path, Point, PointMap, RouteError, StandardCosts,
};

use std::fmt;
use std::str::FromStr;

/// Looks up the Entry and the Exit, or reports which of them is missing.
pub(crate) fn endpoints(grid: &Grid) -> Result<(Point, Point), RouteError> {
	match grid.find_entry_and_exit() {
		(Some(entry), Some(exit)) => {
			log::debug!("searching from {:?} to {:?}", entry, exit);
			Ok((entry, exit))
		}
		(entry, exit) => Err(RouteError::MissingEndpoints {
			entry: entry.is_some(),
			exit: exit.is_some(),
		}),
	}
}

/// What a search produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
	/// The search ran to completion.
	///
	/// For BFS and Dijkstra this does not mean the Exit was reached; check
	/// [`reaches_exit`](SearchResult::reaches_exit) or let
	/// [`into_path`](SearchResult::into_path) find out.
	Found {
		/// the predecessor of every Point the search reached, except `entry`
		came_from: PointMap<Point>,
		/// where the search started
		entry: Point,
		/// where the search was headed
		exit: Point,
	},
	/// A* ran out of Points without reaching the Exit
	NotFound,
}

impl SearchResult {
	/// `true` for [`SearchResult::Found`]
	pub fn is_found(&self) -> bool {
		matches!(self, SearchResult::Found { .. })
	}

	/// The predecessor map, if there is one
	pub fn came_from(&self) -> Option<&PointMap<Point>> {
		match self {
			SearchResult::Found { came_from, .. } => Some(came_from),
			SearchResult::NotFound => None,
		}
	}

	/// `true` if the predecessor map leads to the Exit
	pub fn reaches_exit(&self) -> bool {
		match self {
			SearchResult::Found {
				came_from,
				entry,
				exit,
			} => entry == exit || came_from.contains_key(exit),
			SearchResult::NotFound => false,
		}
	}

	/// Reconstructs the Path to the Exit and sums up its Cost under `costs`.
	///
	/// Fails with [`RouteError::NotFound`] for [`SearchResult::NotFound`] and with
	/// [`RouteError::PathReconstruction`] if the predecessor map does not lead to the Exit.
	///
	/// ## Examples
	/// ```
	/// use terrain_pathfinding::{Algorithm, Grid, NoopObserver, StandardCosts};
	///
	/// let grid: Grid = "E.~X".parse()?;
	/// let path = Algorithm::Dijkstra
	///     .search(&grid, &mut NoopObserver)?
	///     .into_path(&grid, &StandardCosts)?;
	///
	/// assert_eq!(path.path, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
	/// assert_eq!(path.cost, 6.0);
	/// # Ok::<(), terrain_pathfinding::RouteError>(())
	/// ```
	pub fn into_path<C: CostModel + ?Sized>(
		self,
		grid: &Grid,
		costs: &C,
	) -> Result<Path<Point>, RouteError> {
		match self {
			SearchResult::Found {
				came_from,
				entry,
				exit,
			} => {
				let path = reconstruct(&came_from, entry, exit, grid.area())?;
				let cost = path_cost(grid, costs, &path);
				Ok(Path::new(path, cost))
			}
			SearchResult::NotFound => Err(RouteError::NotFound),
		}
	}
}

/// The search strategies a route can be computed with.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::Algorithm;
///
/// let algorithm: Algorithm = "a*".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::AStar);
/// assert_eq!(algorithm.to_string(), "A*");
/// assert!("greedy".parse::<Algorithm>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
	/// [`bfs_search`]: fewest steps, only over Free Tiles
	#[default]
	Bfs,
	/// [`dijkstra_search`]: cheapest route
	Dijkstra,
	/// [`a_star_search`]: cheapest route, guided towards the Exit
	AStar,
}

impl Algorithm {
	/// every Algorithm, in the order they are offered to the user
	pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar];

	/// The display name
	pub fn name(self) -> &'static str {
		match self {
			Algorithm::Bfs => "BFS",
			Algorithm::Dijkstra => "Dijkstra",
			Algorithm::AStar => "A*",
		}
	}

	/// Runs this Algorithm with the [`StandardCosts`] and no way to cancel it.
	pub fn search<O: SearchObserver + ?Sized>(
		self,
		grid: &Grid,
		observer: &mut O,
	) -> Result<SearchResult, RouteError> {
		self.search_with(grid, &StandardCosts, observer, &CancelToken::new())
	}

	/// Runs this Algorithm.
	///
	/// `costs` is ignored by [`Algorithm::Bfs`].
	pub fn search_with<C: CostModel + ?Sized, O: SearchObserver + ?Sized>(
		self,
		grid: &Grid,
		costs: &C,
		observer: &mut O,
		cancel: &CancelToken,
	) -> Result<SearchResult, RouteError> {
		match self {
			Algorithm::Bfs => bfs_search(grid, observer, cancel),
			Algorithm::Dijkstra => dijkstra_search(grid, costs, observer, cancel),
			Algorithm::AStar => a_star_search(grid, costs, observer, cancel),
		}
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		fmt.write_str(self.name())
	}
}

/// The error returned when parsing an unknown [`Algorithm`] name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "unknown algorithm {:?}", self.0)
	}
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
	type Err = ParseAlgorithmError;

	fn from_str(name: &str) -> Result<Algorithm, ParseAlgorithmError> {
		match name.trim().to_ascii_lowercase().as_str() {
			"bfs" => Ok(Algorithm::Bfs),
			"dijkstra" => Ok(Algorithm::Dijkstra),
			"a*" | "astar" | "a_star" | "a-star" => Ok(Algorithm::AStar),
			_ => Err(ParseAlgorithmError(name.to_owned())),
		}
	}
}
