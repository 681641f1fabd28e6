#![warn(
	missing_docs,
	missing_debug_implementations,
	missing_copy_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications
)]

//! A crate to plan routes across a Grid of Terrain.
//!
//! ## Introduction
//! A Grid is a rectangle of Tiles, each made of some [`Terrain`]: open ground, Buildings that
//! nobody can walk through, and Water or Blocked ground that can be crossed at a price. One Tile
//! is the Entry, another one the Exit, and the job is to find a route between them.
//!
//! Routes can be searched with three different Algorithms:
//! - [`bfs_search`] expands the Grid layer by layer and finds the route with the fewest steps.
//!   It only ever walks over Free Tiles and treats Water and Blocked ground like walls.
//! - [`dijkstra_search`] finds the cheapest route, walking over anything that is not a Building
//!   at the Cost the [`CostModel`] assigns to it.
//! - [`a_star_search`] finds a route just as cheap, but uses the Manhattan distance to the Exit
//!   to look at fewer Tiles on the way.
//!
//! All three report every Tile they discover to a [`SearchObserver`], which is how a front end
//! can animate the search, and can be stopped from another thread through a [`CancelToken`].
//!
//! ## Examples
//! Searching a Grid directly:
//! ```
//! use terrain_pathfinding::prelude::*;
//!
//! // . = free, # = building, ~ = water, % = blocked
//! let grid: Grid = "
//!     E.#..
//!     .~#.%
//!     .~...
//!     ...#X
//! ".parse()?;
//!
//! let mut visited = vec![];
//! let result = Algorithm::Dijkstra.search(&grid, &mut |p: Point| visited.push(p))?;
//! let path = result.into_path(&grid, &StandardCosts)?;
//!
//! // around the Water and through the gap in the Buildings
//! assert_eq!(path.cost, 8.0);
//! assert_eq!(path[0], (0, 0));
//! assert_eq!(path[path.len() - 1], (3, 4));
//! # Ok::<(), RouteError>(())
//! ```
//!
//! ### The Route Planner
//! The [`RoutePlanner`] wraps a Grid with the state an editor needs: a brush to paint Terrain
//! with, the selected Algorithm and a [`PlannerConfig`] that limits the size of the Grid. After
//! every run it paints the discovered Tiles and the route back onto the Grid as [`Marker`]s.
//! ```
//! use terrain_pathfinding::prelude::*;
//!
//! let mut planner = RoutePlanner::new(5, 8, PlannerConfig::default())?;
//! planner.grid_mut().set_terrain(2, 0, Terrain::Entry);
//! planner.grid_mut().set_terrain(2, 7, Terrain::Exit);
//! planner.set_brush(Terrain::Building);
//! for row in 0..4 {
//!     planner.paint(row, 4);
//! }
//!
//! planner.set_algorithm(Algorithm::AStar);
//! let route = planner.run(&mut NoopObserver)?;
//! assert_eq!(route.path.cost, 10.0);
//!
//! // the only way around the wall is through the bottom row
//! let grid = planner.grid();
//! assert_eq!(grid.tile((4, 4)), Some(Tile::Marker(Marker::Path)));
//! assert_eq!(grid.to_string().matches('*').count(), route.path.len() - 2);
//! assert_eq!(grid.original_terrain((4, 4)), Terrain::Free);
//! # Ok::<(), RouteError>(())
//! ```
//! Markers never influence the next search: the Grid remembers the Terrain underneath every
//! Marker (see [`Grid::original_terrain`]), and the planner clears all Markers before it starts.
//!
//! ### Configuration
//! [`PlannerConfig`] limits the size of the Grid (5 to 30 Tiles per side by default) and holds
//! the [`TerrainWeights`] used by [`RoutePlanner::randomize`].
//! ```
//! use terrain_pathfinding::{PlannerConfig, RoutePlanner, TerrainWeights};
//!
//! let config = PlannerConfig {
//!     max_size: 100,
//!     ..PlannerConfig::default()
//! }
//! .with_weights(TerrainWeights { building: 0.5, ..TerrainWeights::default() });
//!
//! let mut planner = RoutePlanner::new(100, 100, config)?;
//! planner.randomize();
//! # Ok::<(), terrain_pathfinding::RouteError>(())
//! ```
//!
//! ## Crate features
//! - `parallel` (default): enables [`RoutePlanner::compare_all_parallel`], which runs all
//!   Algorithms on the [rayon](https://docs.rs/rayon) thread pool.
//!
//! The crate logs through the [log](https://docs.rs/log) facade but never installs a logger.

/// A shorthand for Points on the grid, as `(row, col)`
pub type Point = (usize, usize);

/// A HashMap keyed by [`Point`]
pub type PointMap<V> = hashbrown::HashMap<Point, V>;

/// A HashSet of [`Point`]s
pub type PointSet = hashbrown::HashSet<Point>;

mod terrain;
pub use self::terrain::{Marker, Terrain, Tile};

mod cost;
pub use self::cost::{Cost, CostModel, StandardCosts};

mod error;
pub use self::error::RouteError;

mod config;
pub use self::config::{PlannerConfig, TerrainWeights};

mod grid;
pub use self::grid::Grid;

pub mod neighbors;

mod search;
pub use self::search::{
	a_star_search, bfs_search, dijkstra_search, Algorithm, CancelToken, NoopObserver,
	ParseAlgorithmError, SearchObserver, SearchResult,
};

mod path;
pub use self::path::{path_cost, reconstruct, Path};

mod planner;
pub use self::planner::{Route, RoutePlanner};

/// The types most users need, for glob imports.
pub mod prelude {
	pub use crate::{
		Algorithm, CancelToken, CostModel, Grid, Marker, NoopObserver, Path, PlannerConfig, Point,
		Route, RouteError, RoutePlanner, SearchObserver, SearchResult, StandardCosts, Terrain,
		Tile,
	};
}
