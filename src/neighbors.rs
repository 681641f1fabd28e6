//! The 4-connected Neighborhood all searches move in.

use crate::Point;

/// One of the 4 cardinal directions on the Grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
	/// towards row 0
	Up = 0,
	/// towards column 0
	Left = 1,
	/// away from row 0
	Down = 2,
	/// away from column 0
	Right = 3,
}

const UNIT_CIRCLE: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

impl Dir {
	/// All directions in the order the searches try them.
	///
	/// This order decides which Path wins when several have the same Cost, so it must never
	/// change.
	pub const ALL: [Dir; 4] = [Dir::Up, Dir::Left, Dir::Down, Dir::Right];

	/// The `(d_row, d_col)` offset of a single step in this direction
	pub fn offset(self) -> (isize, isize) {
		UNIT_CIRCLE[self as usize]
	}

	/// The direction pointing the other way
	pub fn opposite(self) -> Dir {
		Dir::ALL[(self as usize + 2) % 4]
	}
}

/// A Neighborhood for moving along the 4 cardinal directions on a `rows × cols` Grid.
///
/// Also known as [Von Neumann Neighborhood](https://en.wikipedia.org/wiki/Von_Neumann_neighborhood),
/// Manhattan Metric or [Taxicab Geometry](https://en.wikipedia.org/wiki/Taxicab_geometry).
///
/// ```no_code
/// A: Agent, o: reachable in one step
///   o
///   |
/// o-A-o
///   |
///   o
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManhattanNeighborhood {
	rows: usize,
	cols: usize,
}

impl ManhattanNeighborhood {
	/// Creates a new ManhattanNeighborhood.
	///
	/// `rows` and `cols` are the size of the Grid to move on.
	pub fn new(rows: usize, cols: usize) -> ManhattanNeighborhood {
		ManhattanNeighborhood { rows, cols }
	}

	/// The neighbor of `point` in direction `dir`, if it is on the Grid
	pub fn step(&self, point: Point, dir: Dir) -> Option<Point> {
		let (d_row, d_col) = dir.offset();
		let row = point.0.checked_add_signed(d_row)?;
		let col = point.1.checked_add_signed(d_col)?;
		(row < self.rows && col < self.cols).then_some((row, col))
	}

	/// Appends all neighbors of `point` to `out`, in the order of [`Dir::ALL`].
	///
	/// `out` is not cleared first. Points outside the Grid are skipped. Whether a neighbor can
	/// actually be walked on is up to the search.
	///
	/// ## Examples
	/// ```
	/// # use terrain_pathfinding::neighbors::ManhattanNeighborhood;
	/// let neighborhood = ManhattanNeighborhood::new(5, 5);
	/// let mut neighbors = vec![];
	/// neighborhood.get_all_neighbors((2, 0), &mut neighbors);
	///
	/// assert_eq!(neighbors, vec![(1, 0), (3, 0), (2, 1)]);
	/// ```
	pub fn get_all_neighbors(&self, point: Point, out: &mut Vec<Point>) {
		out.extend(Dir::ALL.iter().filter_map(|&dir| self.step(point, dir)));
	}

	/// The Manhattan distance between `point` and `goal`.
	///
	/// Used as the A* heuristic. Without diagonal movement every step costs at least 1, except
	/// the free step onto the Exit, so it overestimates by at most that one step. A* still finds
	/// the cheapest Path, since the Exit is always pushed with a lower estimate than the Point it
	/// is reached from.
	pub fn heuristic(&self, point: Point, goal: Point) -> usize {
		point.0.abs_diff(goal.0) + point.1.abs_diff(goal.1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn neighbor_order_is_up_left_down_right() {
		let neighborhood = ManhattanNeighborhood::new(5, 5);
		let mut neighbors = vec![];
		neighborhood.get_all_neighbors((2, 2), &mut neighbors);
		assert_eq!(neighbors, vec![(1, 2), (2, 1), (3, 2), (2, 3)]);
	}

	#[test]
	fn corners_are_clipped() {
		let neighborhood = ManhattanNeighborhood::new(3, 4);
		let mut neighbors = vec![];
		neighborhood.get_all_neighbors((2, 3), &mut neighbors);
		assert_eq!(neighbors, vec![(1, 3), (2, 2)]);
	}

	#[test]
	fn heuristic() {
		let neighborhood = ManhattanNeighborhood::new(5, 5);
		assert_eq!(neighborhood.heuristic((3, 1), (0, 0)), 3 + 1);
		assert_eq!(neighborhood.heuristic((0, 4), (4, 0)), 8);
	}

	#[test]
	fn opposite() {
		for dir in Dir::ALL {
			assert_eq!(dir.opposite().opposite(), dir);
		}
		assert_eq!(Dir::Up.opposite(), Dir::Down);
		assert_eq!(Dir::Left.opposite(), Dir::Right);
	}
}
