use crate::{Marker, Point, PointMap, RouteError, Terrain, TerrainWeights, Tile};

use nanorand::{Rng, WyRand};
use std::fmt;
use std::str::FromStr;

/// A rectangular Grid of [`Tile`]s with at most one Entry and at most one Exit.
///
/// Points are `(row, col)` with `(0, 0)` in the top left corner.
///
/// Besides its Tiles, the Grid keeps a side-table with the original Terrain of every Tile that
/// was covered by a [`Marker`]. Searches always look Costs up through
/// [`original_terrain`](Grid::original_terrain), so Markers left behind by one run can never
/// change the outcome of the next.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{Grid, Terrain};
///
/// let mut grid = Grid::new(5, 5)?;
/// grid.set_terrain(0, 0, Terrain::Entry);
/// grid.set_terrain(4, 4, Terrain::Exit);
/// grid.set_terrain(2, 2, Terrain::Water);
///
/// assert_eq!(grid.find_entry_and_exit(), (Some((0, 0)), Some((4, 4))));
///
/// // setting a second Entry moves it
/// grid.set_terrain(1, 0, Terrain::Entry);
/// assert_eq!(grid.find_entry_and_exit().0, Some((1, 0)));
/// assert_eq!(grid.terrain((0, 0)), Some(Terrain::Free));
/// # Ok::<(), terrain_pathfinding::RouteError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
	rows: usize,
	cols: usize,
	tiles: Vec<Tile>,
	originals: PointMap<Terrain>,
}

impl Grid {
	/// Creates a Grid of `rows × cols` [`Free`](Terrain::Free) Tiles.
	///
	/// Fails with [`RouteError::InvalidDimensions`] if either dimension is 0 or the Grid is too
	/// large to allocate. Any upper bound on the size is left to the caller (see
	/// [`PlannerConfig`](crate::PlannerConfig)).
	pub fn new(rows: usize, cols: usize) -> Result<Grid, RouteError> {
		let area = rows.checked_mul(cols).filter(|&area| area > 0);
		let Some(area) = area else {
			return Err(RouteError::InvalidDimensions { rows, cols });
		};
		let mut tiles: Vec<Tile> = Vec::new();
		if tiles.try_reserve_exact(area).is_err() {
			log::warn!("can't allocate a {}x{} grid", rows, cols);
			return Err(RouteError::InvalidDimensions { rows, cols });
		}
		tiles.resize(area, Tile::default());
		Ok(Grid {
			rows,
			cols,
			tiles,
			originals: PointMap::default(),
		})
	}

	/// number of rows
	pub fn rows(&self) -> usize {
		self.rows
	}

	/// number of columns
	pub fn cols(&self) -> usize {
		self.cols
	}

	/// `(rows, cols)`
	pub fn size(&self) -> (usize, usize) {
		(self.rows, self.cols)
	}

	/// The number of Tiles on the Grid
	pub fn area(&self) -> usize {
		self.tiles.len()
	}

	/// `true` if `point` lies on the Grid
	pub fn contains(&self, point: Point) -> bool {
		point.0 < self.rows && point.1 < self.cols
	}

	fn index(&self, point: Point) -> Option<usize> {
		self.contains(point).then(|| point.0 * self.cols + point.1)
	}

	fn point(&self, index: usize) -> Point {
		(index / self.cols, index % self.cols)
	}

	/// The live Tile at `point`, Marker or not
	pub fn tile(&self, point: Point) -> Option<Tile> {
		self.index(point).map(|i| self.tiles[i])
	}

	/// The live Terrain at `point`.
	///
	/// Returns `None` outside the Grid and for Tiles covered by a Marker.
	pub fn terrain(&self, point: Point) -> Option<Terrain> {
		self.tile(point).and_then(Tile::terrain)
	}

	/// Iterates over all Tiles in row-major order
	pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
		self.tiles
			.iter()
			.enumerate()
			.map(move |(i, &tile)| (self.point(i), tile))
	}

	/// Paints `terrain` onto the Tile at `(row, col)`.
	///
	/// Painting an [`Entry`](Terrain::Entry) or [`Exit`](Terrain::Exit) first turns every existing
	/// Tile of that Terrain back to [`Free`](Terrain::Free), so there is never more than one of
	/// each. Does nothing if `(row, col)` is outside the Grid.
	pub fn set_terrain(&mut self, row: usize, col: usize, terrain: Terrain) {
		let Some(index) = self.index((row, col)) else {
			log::trace!("ignoring {terrain:?} outside the grid at ({row}, {col})");
			return;
		};
		if terrain.is_endpoint() {
			self.clear_terrain(terrain);
		}
		self.tiles[index] = Tile::Terrain(terrain);
		self.originals.remove(&(row, col));
	}

	fn clear_terrain(&mut self, terrain: Terrain) {
		for tile in self.tiles.iter_mut() {
			if *tile == Tile::Terrain(terrain) {
				*tile = Tile::Terrain(Terrain::Free);
			}
		}
	}

	/// Finds the Entry and the Exit with a row-major scan.
	///
	/// Returns the first occurrence of each, if present.
	pub fn find_entry_and_exit(&self) -> (Option<Point>, Option<Point>) {
		let mut entry = None;
		let mut exit = None;
		for (point, tile) in self.iter() {
			match tile {
				Tile::Terrain(Terrain::Entry) if entry.is_none() => entry = Some(point),
				Tile::Terrain(Terrain::Exit) if exit.is_none() => exit = Some(point),
				_ => {}
			}
		}
		(entry, exit)
	}

	/// The Terrain underneath any Marker at `point`.
	///
	/// This is the value captured when the Tile was first marked, or the live Terrain if it was
	/// never marked. A marked Tile whose Terrain was never captured reads as
	/// [`Free`](Terrain::Free). Outside the Grid, everything is a
	/// [`Building`](Terrain::Building).
	pub fn original_terrain(&self, point: Point) -> Terrain {
		if let Some(&terrain) = self.originals.get(&point) {
			return terrain;
		}
		match self.tile(point) {
			Some(Tile::Terrain(terrain)) => terrain,
			Some(Tile::Marker(_)) => Terrain::Free,
			None => Terrain::Building,
		}
	}

	/// Covers the Tile at `point` with `marker`.
	///
	/// The Terrain underneath is recorded the first time a Tile is marked. The Entry and the Exit
	/// are never covered, and Points outside the Grid are ignored.
	pub fn mark(&mut self, point: Point, marker: Marker) {
		let Some(index) = self.index(point) else {
			return;
		};
		match self.tiles[index] {
			Tile::Terrain(terrain) if terrain.is_endpoint() => return,
			Tile::Terrain(terrain) => {
				self.originals.entry(point).or_insert(terrain);
			}
			Tile::Marker(_) => {}
		}
		self.tiles[index] = Tile::Marker(marker);
	}

	/// Covers every Tile of `path` with [`Marker::Path`], except the Entry and the Exit.
	pub fn mark_path(&mut self, path: &[Point]) {
		for &point in path {
			self.mark(point, Marker::Path);
		}
	}

	/// Removes every [`Marker`] from the Grid and clears the side-table.
	///
	/// Marked Tiles get their recorded Terrain back, or [`Free`](Terrain::Free) if none was
	/// recorded. Plain Terrain is never touched, so calling this twice is the same as calling it
	/// once.
	pub fn reset_presentation_markers(&mut self) {
		let mut restored = 0usize;
		for index in 0..self.tiles.len() {
			if self.tiles[index].is_marker() {
				let point = self.point(index);
				let terrain = self.originals.get(&point).copied().unwrap_or(Terrain::Free);
				self.tiles[index] = Tile::Terrain(terrain);
				restored += 1;
			}
		}
		self.originals.clear();
		log::trace!("restored {restored} marked tiles");
	}

	/// Gives every Tile except the Entry and the Exit a random Terrain, using fresh entropy.
	///
	/// See [`randomize_with`](Grid::randomize_with).
	pub fn randomize(&mut self, weights: &TerrainWeights) {
		self.randomize_with(weights, &mut WyRand::new());
	}

	/// Gives every Tile except the Entry and the Exit a random Terrain drawn from `weights`.
	///
	/// Markers are overwritten as well, and the side-table is cleared.
	///
	/// ## Examples
	/// ```
	/// use nanorand::WyRand;
	/// use terrain_pathfinding::{Grid, Terrain, TerrainWeights};
	///
	/// let mut grid = Grid::new(10, 10)?;
	/// grid.set_terrain(0, 0, Terrain::Entry);
	///
	/// let water = TerrainWeights { free: 0.0, building: 0.0, water: 1.0, blocked: 0.0 };
	/// grid.randomize_with(&water, &mut WyRand::new_seed(7));
	///
	/// assert_eq!(grid.terrain((0, 0)), Some(Terrain::Entry));
	/// assert_eq!(grid.terrain((5, 5)), Some(Terrain::Water));
	/// # Ok::<(), terrain_pathfinding::RouteError>(())
	/// ```
	pub fn randomize_with(&mut self, weights: &TerrainWeights, rng: &mut WyRand) {
		for tile in self.tiles.iter_mut() {
			if tile.terrain().is_some_and(Terrain::is_endpoint) {
				continue;
			}
			let roll = rng.generate::<u32>() as f64 / (u32::MAX as f64 + 1.0);
			*tile = Tile::Terrain(weights.pick(roll));
		}
		self.originals.clear();
		log::trace!("randomized {}x{} grid", self.rows, self.cols);
	}
}

impl fmt::Display for Grid {
	/// One glyph per Tile, one line per row (see [`Tile::glyph`]).
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		for (i, row) in self.tiles.chunks(self.cols).enumerate() {
			if i > 0 {
				writeln!(fmt)?;
			}
			for tile in row {
				write!(fmt, "{}", tile.glyph())?;
			}
		}
		Ok(())
	}
}

impl FromStr for Grid {
	type Err = RouteError;

	/// Parses the text form written by `Display`.
	///
	/// Surrounding whitespace and blank lines are ignored. If the text holds several Entries or
	/// Exits, the last one wins.
	///
	/// ## Examples
	/// ```
	/// use terrain_pathfinding::{Grid, Terrain};
	///
	/// let grid: Grid = "
	///     E.#
	///     ~%X
	/// ".parse()?;
	///
	/// assert_eq!(grid.size(), (2, 3));
	/// assert_eq!(grid.terrain((1, 0)), Some(Terrain::Water));
	/// assert_eq!(grid.to_string(), "E.#\n~%X");
	/// # Ok::<(), terrain_pathfinding::RouteError>(())
	/// ```
	fn from_str(text: &str) -> Result<Grid, RouteError> {
		let lines: Vec<&str> = text
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty())
			.collect();
		let rows = lines.len();
		let cols = lines.first().map_or(0, |line| line.chars().count());
		let mut grid = Grid::new(rows, cols)?;

		for (row, line) in lines.iter().enumerate() {
			let len = line.chars().count();
			if len != cols {
				return Err(RouteError::RaggedRows {
					row,
					len,
					expected: cols,
				});
			}
			for (col, glyph) in line.chars().enumerate() {
				match Tile::from_glyph(glyph) {
					Some(Tile::Terrain(terrain)) => grid.set_terrain(row, col, terrain),
					Some(tile) => grid.tiles[row * cols + col] = tile,
					None => return Err(RouteError::ParseGlyph { row, col, glyph }),
				}
			}
		}
		Ok(grid)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn grid(text: &str) -> Grid {
		text.parse().unwrap()
	}

	#[test]
	fn new_rejects_empty() {
		assert_eq!(
			Grid::new(0, 5),
			Err(RouteError::InvalidDimensions { rows: 0, cols: 5 })
		);
		assert!(Grid::new(5, 0).is_err());
		assert!(Grid::new(1, 1).is_ok());
	}

	#[test]
	fn new_rejects_unallocatable() {
		assert_eq!(
			Grid::new(usize::MAX / 2, 2),
			Err(RouteError::InvalidDimensions {
				rows: usize::MAX / 2,
				cols: 2
			})
		);
		assert!(Grid::new(usize::MAX, 1).is_err());
	}

	#[test]
	fn set_terrain_out_of_bounds_is_ignored() {
		let mut grid = Grid::new(3, 3).unwrap();
		let before = grid.clone();
		grid.set_terrain(3, 0, Terrain::Water);
		grid.set_terrain(0, 7, Terrain::Entry);
		assert_eq!(grid, before);
	}

	#[test]
	fn only_one_exit() {
		let mut grid = grid("X..\n...\n...");
		grid.set_terrain(2, 2, Terrain::Exit);
		assert_eq!(grid.find_entry_and_exit(), (None, Some((2, 2))));
		assert_eq!(grid.terrain((0, 0)), Some(Terrain::Free));
	}

	#[test]
	fn entry_replaces_exit_cell() {
		let mut grid = grid("E.X");
		grid.set_terrain(0, 2, Terrain::Entry);
		assert_eq!(grid.find_entry_and_exit(), (Some((0, 2)), None));
	}

	#[test]
	fn original_terrain_survives_markers() {
		let mut grid = grid("E~%X");
		grid.mark((0, 1), Marker::Searching);
		grid.mark((0, 1), Marker::Path);
		grid.mark((0, 2), Marker::Path);

		assert_eq!(grid.tile((0, 1)), Some(Tile::Marker(Marker::Path)));
		assert_eq!(grid.terrain((0, 1)), None);
		assert_eq!(grid.original_terrain((0, 1)), Terrain::Water);
		assert_eq!(grid.original_terrain((0, 2)), Terrain::Blocked);
		assert_eq!(grid.original_terrain((0, 3)), Terrain::Exit);
	}

	#[test]
	fn endpoints_are_never_marked() {
		let mut grid = grid("E.X");
		grid.mark_path(&[(0, 0), (0, 1), (0, 2)]);
		assert_eq!(grid.to_string(), "E*X");
	}

	#[test]
	fn reset_restores_terrain_and_is_idempotent() {
		let mut grid = grid("E~.#X");
		let pristine = grid.clone();
		grid.mark((0, 1), Marker::Searching);
		grid.mark((0, 2), Marker::Path);
		assert_eq!(grid.to_string(), "E+*#X");

		grid.reset_presentation_markers();
		assert_eq!(grid, pristine);

		grid.reset_presentation_markers();
		assert_eq!(grid, pristine);
	}

	#[test]
	fn uncaptured_markers_reset_to_free() {
		let mut grid = grid("E+*X");
		assert_eq!(grid.original_terrain((0, 1)), Terrain::Free);
		grid.reset_presentation_markers();
		assert_eq!(grid.to_string(), "E..X");
	}

	#[test]
	fn painting_over_a_marker_forgets_the_capture() {
		let mut grid = grid("E~X");
		grid.mark((0, 1), Marker::Searching);
		grid.set_terrain(0, 1, Terrain::Blocked);
		assert_eq!(grid.original_terrain((0, 1)), Terrain::Blocked);
		grid.reset_presentation_markers();
		assert_eq!(grid.to_string(), "E%X");
	}

	#[test]
	fn out_of_bounds_is_solid() {
		let grid = Grid::new(2, 2).unwrap();
		assert_eq!(grid.original_terrain((2, 0)), Terrain::Building);
		assert_eq!(grid.tile((0, 2)), None);
	}

	#[test]
	fn randomize_keeps_endpoints() {
		let mut grid = grid("E....\n.....\n....X");
		grid.randomize_with(&TerrainWeights::default(), &mut WyRand::new_seed(42));
		assert_eq!(grid.find_entry_and_exit(), (Some((0, 0)), Some((2, 4))));
		assert!(grid.iter().all(|(_, tile)| !tile.is_marker()));
	}

	#[test]
	fn randomize_is_seeded() {
		let mut a = Grid::new(8, 8).unwrap();
		let mut b = Grid::new(8, 8).unwrap();
		a.randomize_with(&TerrainWeights::default(), &mut WyRand::new_seed(3));
		b.randomize_with(&TerrainWeights::default(), &mut WyRand::new_seed(3));
		assert_eq!(a, b);
	}

	#[test]
	fn randomize_clears_markers() {
		let mut grid = grid("E~.X");
		grid.mark((0, 1), Marker::Searching);
		let free = TerrainWeights {
			free: 1.0,
			building: 0.0,
			water: 0.0,
			blocked: 0.0,
		};
		grid.randomize_with(&free, &mut WyRand::new_seed(1));
		assert_eq!(grid.to_string(), "E..X");
		assert_eq!(grid.original_terrain((0, 1)), Terrain::Free);
	}

	#[test]
	fn parse_errors() {
		assert_eq!(
			"E.\n...".parse::<Grid>(),
			Err(RouteError::RaggedRows {
				row: 1,
				len: 3,
				expected: 2
			})
		);
		assert_eq!(
			"E?X".parse::<Grid>(),
			Err(RouteError::ParseGlyph {
				row: 0,
				col: 1,
				glyph: '?'
			})
		);
		assert!("".parse::<Grid>().is_err());
	}

	#[test]
	fn display_round_trip() {
		let text = "E.#~\n%+*X";
		assert_eq!(grid(text).to_string(), text);
	}
}
