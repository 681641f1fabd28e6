//! Turning a predecessor map into a Path.

use crate::{Cost, CostModel, Grid, Point, PointMap, RouteError};

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, Index};

/// A Path through the Grid
///
/// Stores the visited Points in `path`, starting at the Entry and ending at the Exit, and the
/// total Cost of walking them in `cost`. The Cost of the individual steps cannot be retrieved
/// through this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
	/// the Path
	pub path: Vec<P>,
	/// the total Cost of the Path
	pub cost: Cost,
}

impl<P> Path<P> {
	/// creates a new Path with the given sequence of Points and total Cost
	/// ## Examples
	/// Basic usage:
	/// ```
	/// # use terrain_pathfinding::Path;
	/// let path = Path::new(vec![(0, 0), (0, 1), (0, 2)], 1.0);
	///
	/// assert_eq!(path.path, vec![(0, 0), (0, 1), (0, 2)]);
	/// assert_eq!(path.cost, 1.0);
	/// ```
	pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
		Path { path, cost }
	}

	/// appends a Point to the Path, adding its Cost to the total Cost
	/// ## Examples
	/// Basic usage:
	/// ```
	/// # use terrain_pathfinding::Path;
	/// let mut path = Path::new(vec![(0, 0), (0, 1)], 1.0);
	/// path.append((0, 2), 5.0);
	///
	/// assert_eq!(path.path, vec![(0, 0), (0, 1), (0, 2)]);
	/// assert_eq!(path.cost, 6.0);
	/// ```
	pub fn append(&mut self, point: P, cost: Cost) -> &mut Self {
		self.path.push(point);
		self.cost += cost;
		self
	}

	/// Number of moves in the Path, which is one less than the number of Points.
	pub fn steps(&self) -> usize {
		self.path.len().saturating_sub(1)
	}
}

impl<P> Index<usize> for Path<P> {
	type Output = P;
	fn index(&self, index: usize) -> &P {
		&self.path[index]
	}
}

impl<P> Deref for Path<P> {
	type Target = [P];
	fn deref(&self) -> &[P] {
		&self.path
	}
}

impl<P: PartialEq> PartialOrd for Path<P> {
	fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
		Some(self.cost.total_cmp(&other.cost))
	}
}

impl<P: fmt::Debug> fmt::Display for Path<P> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "Path[Cost = {}]: ", self.cost)?;
		if self.path.is_empty() {
			write!(fmt, "<empty>")
		} else {
			write!(fmt, "{:?}", self.path[0])?;
			for p in self.path.iter().skip(1) {
				write!(fmt, " -> {:?}", p)?;
			}
			Ok(())
		}
	}
}

/// Walks `came_from` backwards from `exit` to `entry` and returns the Points in walking order.
///
/// Fails with [`RouteError::PathReconstruction`] if `exit` has no predecessor, if a link is
/// missing on the way, or if the walk gets longer than `max_steps` Points. The last one can only
/// happen for a `came_from` that was not built by one of the searches, since those never produce
/// cycles.
///
/// `entry == exit` yields a single-Point Path.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{reconstruct, PointMap, RouteError};
///
/// let mut came_from = PointMap::default();
/// came_from.insert((0, 1), (0, 0));
/// came_from.insert((1, 1), (0, 1));
///
/// assert_eq!(reconstruct(&came_from, (0, 0), (1, 1), 4)?, vec![(0, 0), (0, 1), (1, 1)]);
///
/// came_from.insert((0, 0), (1, 1));
/// assert!(reconstruct(&came_from, (5, 5), (1, 1), 4).is_err());
/// # Ok::<(), RouteError>(())
/// ```
pub fn reconstruct(
	came_from: &PointMap<Point>,
	entry: Point,
	exit: Point,
	max_steps: usize,
) -> Result<Vec<Point>, RouteError> {
	if entry != exit && !came_from.contains_key(&exit) {
		return Err(broken(format!("exit {:?} was never reached", exit)));
	}

	let mut path = vec![exit];
	let mut current = exit;
	while current != entry {
		if path.len() >= max_steps {
			return Err(broken(format!(
				"no way back to the entry within {} steps",
				max_steps
			)));
		}
		current = match came_from.get(&current) {
			Some(&prev) => prev,
			None => return Err(broken(format!("{:?} has no predecessor", current))),
		};
		path.push(current);
	}
	path.reverse();
	Ok(path)
}

fn broken(reason: String) -> RouteError {
	log::warn!("path reconstruction failed: {}", reason);
	RouteError::PathReconstruction { reason }
}

/// The total Cost of walking `path`: the Cost of every Point after the first, looked up on its
/// [original Terrain](Grid::original_terrain).
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{path_cost, Grid, StandardCosts};
///
/// let grid: Grid = "E~.X".parse()?;
/// assert_eq!(path_cost(&grid, &StandardCosts, &[(0, 0), (0, 1), (0, 2), (0, 3)]), 6.0);
/// assert_eq!(path_cost(&grid, &StandardCosts, &[(0, 0)]), 0.0);
/// # Ok::<(), terrain_pathfinding::RouteError>(())
/// ```
pub fn path_cost<C: CostModel + ?Sized>(grid: &Grid, costs: &C, path: &[Point]) -> Cost {
	path.iter()
		.skip(1)
		.map(|&point| costs.cost(grid.original_terrain(point)))
		.sum()
}
