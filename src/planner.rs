use crate::search::endpoints;
use crate::{
	Algorithm, CancelToken, CostModel, Grid, Marker, NoopObserver, Path, PlannerConfig, Point,
	RouteError, SearchObserver, StandardCosts, Terrain,
};

use nanorand::WyRand;
use std::fmt;
use std::time::{Duration, Instant};

/// A Grid together with everything needed to edit it and compute routes on it.
///
/// The planner holds the current brush and Algorithm the way an editor would, and paints the
/// result of every run back onto the Grid: Tiles the search discovered are covered with
/// [`Marker::Searching`], the route itself with [`Marker::Path`]. Markers from the previous run
/// are cleared before the next one starts.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{Algorithm, NoopObserver, PlannerConfig, RoutePlanner, Terrain};
///
/// let mut planner = RoutePlanner::new(5, 5, PlannerConfig::default())?;
///
/// planner.set_brush(Terrain::Entry);
/// planner.paint(0, 0);
/// planner.set_brush(Terrain::Exit);
/// planner.paint(4, 4);
/// planner.set_brush(Terrain::Water);
/// for row in 0..4 {
///     planner.paint(row, 2);
/// }
///
/// planner.set_algorithm(Algorithm::AStar);
/// let route = planner.run(&mut NoopObserver)?;
///
/// // around the Water through the bottom row
/// assert_eq!(route.path.cost, 7.0);
/// assert_eq!(route.path[0], (0, 0));
/// assert_eq!(route.path[route.path.len() - 1], (4, 4));
/// # Ok::<(), terrain_pathfinding::RouteError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RoutePlanner<C: CostModel = StandardCosts> {
	grid: Grid,
	costs: C,
	config: PlannerConfig,
	brush: Terrain,
	algorithm: Algorithm,
}

impl RoutePlanner {
	/// Creates a planner for an empty `rows × cols` Grid using the [`StandardCosts`].
	///
	/// Fails with [`RouteError::InvalidDimensions`] if the size is outside of what `config`
	/// allows.
	pub fn new(
		rows: usize,
		cols: usize,
		config: PlannerConfig,
	) -> Result<RoutePlanner, RouteError> {
		config.check_dimensions(rows, cols)?;
		RoutePlanner::from_grid(Grid::new(rows, cols)?, config)
	}

	/// Creates a planner for an existing Grid using the [`StandardCosts`].
	///
	/// ## Examples
	/// ```
	/// use terrain_pathfinding::{Grid, NoopObserver, PlannerConfig, RoutePlanner};
	///
	/// let grid: Grid = "E~X".parse()?;
	/// let mut planner = RoutePlanner::from_grid(grid, PlannerConfig::UNBOUNDED)?;
	///
	/// // the default Algorithm is BFS, which won't cross Water
	/// assert!(planner.run(&mut NoopObserver).is_err());
	/// # Ok::<(), terrain_pathfinding::RouteError>(())
	/// ```
	pub fn from_grid(grid: Grid, config: PlannerConfig) -> Result<RoutePlanner, RouteError> {
		config.check_dimensions(grid.rows(), grid.cols())?;
		Ok(RoutePlanner {
			grid,
			costs: StandardCosts,
			config,
			brush: Terrain::Free,
			algorithm: Algorithm::default(),
		})
	}
}

impl<C: CostModel> RoutePlanner<C> {
	/// Replaces the cost model used by Dijkstra and A*.
	pub fn with_costs<D: CostModel>(self, costs: D) -> RoutePlanner<D> {
		RoutePlanner {
			grid: self.grid,
			costs,
			config: self.config,
			brush: self.brush,
			algorithm: self.algorithm,
		}
	}

	/// the current Grid
	pub fn grid(&self) -> &Grid {
		&self.grid
	}

	/// the current Grid, for edits the planner doesn't offer
	pub fn grid_mut(&mut self) -> &mut Grid {
		&mut self.grid
	}

	/// the cost model
	pub fn costs(&self) -> &C {
		&self.costs
	}

	/// the config this planner was created with
	pub fn config(&self) -> &PlannerConfig {
		&self.config
	}

	/// Replaces the Grid with an empty one of the given size.
	///
	/// The old Grid is kept if the size is not allowed by the config.
	pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), RouteError> {
		self.config.check_dimensions(rows, cols)?;
		self.grid = Grid::new(rows, cols)?;
		log::debug!("new {}x{} grid", rows, cols);
		Ok(())
	}

	/// the Terrain [`paint`](RoutePlanner::paint) applies
	pub fn brush(&self) -> Terrain {
		self.brush
	}

	/// Selects the Terrain [`paint`](RoutePlanner::paint) applies.
	pub fn set_brush(&mut self, brush: Terrain) {
		self.brush = brush;
	}

	/// Paints the brush onto the Tile at `(row, col)`.
	///
	/// Painting an Entry or Exit moves the existing one. Returns `false` if the Tile is outside
	/// of the Grid, in which case nothing happens.
	pub fn paint(&mut self, row: usize, col: usize) -> bool {
		if !self.grid.contains((row, col)) {
			return false;
		}
		self.grid.set_terrain(row, col, self.brush);
		true
	}

	/// the Algorithm the next run will use
	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	/// Selects the Algorithm for the next runs.
	pub fn set_algorithm(&mut self, algorithm: Algorithm) {
		self.algorithm = algorithm;
	}

	/// Randomizes the Grid with the weights from the config, keeping the Entry and the Exit.
	pub fn randomize(&mut self) {
		self.grid.randomize(&self.config.weights);
	}

	/// Like [`randomize`](RoutePlanner::randomize), but with a caller-provided rng.
	pub fn randomize_with(&mut self, rng: &mut WyRand) {
		self.grid.randomize_with(&self.config.weights, rng);
	}

	/// Computes a route with the selected Algorithm and paints it onto the Grid.
	///
	/// See [`run_with_cancel`](RoutePlanner::run_with_cancel).
	pub fn run<O: SearchObserver + ?Sized>(
		&mut self,
		observer: &mut O,
	) -> Result<Route, RouteError> {
		self.run_with_cancel(observer, &CancelToken::new())
	}

	/// Computes a route with the selected Algorithm and paints it onto the Grid.
	///
	/// Fails with [`RouteError::MissingEndpoints`] without touching the Grid if the Entry or the
	/// Exit is missing. Otherwise the Markers of the last run are cleared, the search runs, and
	/// every Tile it discovered is marked as [`Searching`](Marker::Searching), even if it fails
	/// afterwards. If a route was found, it is marked as [`Path`](Marker::Path).
	///
	/// `observer` sees every discovered Tile and then exactly one call to
	/// [`on_search_complete`](SearchObserver::on_search_complete), no matter the outcome.
	pub fn run_with_cancel<O: SearchObserver + ?Sized>(
		&mut self,
		observer: &mut O,
		cancel: &CancelToken,
	) -> Result<Route, RouteError> {
		let start = Instant::now();
		let outcome = self.route(observer, cancel);
		let elapsed = start.elapsed();

		match &outcome {
			Ok(route) => log::debug!("{}", route),
			Err(err) => log::debug!("{} run failed: {}", self.algorithm, err),
		}
		observer.on_search_complete(&outcome, elapsed);
		outcome
	}

	fn route<O: SearchObserver + ?Sized>(
		&mut self,
		observer: &mut O,
		cancel: &CancelToken,
	) -> Result<Route, RouteError> {
		endpoints(&self.grid)?;
		self.grid.reset_presentation_markers();

		let mut recorder = Recorder {
			inner: observer,
			visited: vec![],
		};
		let start = Instant::now();
		let path = self
			.algorithm
			.search_with(&self.grid, &self.costs, &mut recorder, cancel)
			.and_then(|result| result.into_path(&self.grid, &self.costs));
		let elapsed = start.elapsed();

		let visited = recorder.visited;
		for &point in visited.iter() {
			self.grid.mark(point, Marker::Searching);
		}

		let path = path?;
		self.grid.mark_path(&path);

		Ok(Route {
			algorithm: self.algorithm,
			path,
			visited,
			elapsed,
		})
	}

	/// Runs every [`Algorithm`] on a copy of the Grid and returns the outcomes in the order of
	/// [`Algorithm::ALL`].
	///
	/// The planner itself is left untouched.
	///
	/// ## Examples
	/// ```
	/// use terrain_pathfinding::{Algorithm, Grid, PlannerConfig, RoutePlanner};
	///
	/// let grid: Grid = "
	///     E~...
	///     .#.#.
	///     ....X
	/// ".parse()?;
	/// let planner = RoutePlanner::from_grid(grid, PlannerConfig::UNBOUNDED)?;
	///
	/// for (algorithm, outcome) in planner.compare_all() {
	///     let route = outcome?;
	///     assert_eq!(route.algorithm, algorithm);
	///     assert_eq!(route.path.cost, 5.0);
	/// }
	/// # Ok::<(), terrain_pathfinding::RouteError>(())
	/// ```
	pub fn compare_all(&self) -> Vec<(Algorithm, Result<Route, RouteError>)> {
		Algorithm::ALL
			.iter()
			.map(|&algorithm| (algorithm, self.run_detached(algorithm)))
			.collect()
	}

	/// Like [`compare_all`](RoutePlanner::compare_all), but runs the Algorithms on the rayon
	/// thread pool.
	#[cfg(feature = "parallel")]
	pub fn compare_all_parallel(&self) -> Vec<(Algorithm, Result<Route, RouteError>)>
	where
		C: Sync,
	{
		use rayon::prelude::*;

		Algorithm::ALL
			.as_slice()
			.par_iter()
			.map(|&algorithm| (algorithm, self.run_detached(algorithm)))
			.collect()
	}

	fn run_detached(&self, algorithm: Algorithm) -> Result<Route, RouteError> {
		let mut planner = RoutePlanner {
			grid: self.grid.clone(),
			costs: &self.costs,
			config: self.config,
			brush: self.brush,
			algorithm,
		};
		planner.run(&mut NoopObserver)
	}
}

/// Forwards every visit to the caller's observer and keeps a copy for painting.
struct Recorder<'a, O: ?Sized> {
	inner: &'a mut O,
	visited: Vec<Point>,
}

impl<O: SearchObserver + ?Sized> SearchObserver for Recorder<'_, O> {
	fn on_visit(&mut self, point: Point) {
		self.visited.push(point);
		self.inner.on_visit(point);
	}
}

/// A successful run of a [`RoutePlanner`].
#[derive(Clone, Debug)]
pub struct Route {
	/// the Algorithm that found the route
	pub algorithm: Algorithm,
	/// the route from the Entry to the Exit
	pub path: Path<Point>,
	/// every Tile the search discovered, in discovery order
	pub visited: Vec<Point>,
	/// how long the search and the reconstruction took, without any painting
	pub elapsed: Duration,
}

impl fmt::Display for Route {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(
			fmt,
			"{}: cost {} over {} steps, {} tiles visited in {:?}",
			self.algorithm,
			self.path.cost,
			self.path.steps(),
			self.visited.len(),
			self.elapsed
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct Counting {
		visits: usize,
		outcomes: Vec<Result<usize, RouteError>>,
	}

	impl SearchObserver for Counting {
		fn on_visit(&mut self, _: Point) {
			self.visits += 1;
		}
		fn on_search_complete(&mut self, outcome: &Result<Route, RouteError>, _: Duration) {
			self.outcomes
				.push(outcome.as_ref().map(|route| route.visited.len()).map_err(Clone::clone));
		}
	}

	fn planner(text: &str) -> RoutePlanner {
		RoutePlanner::from_grid(text.parse().unwrap(), PlannerConfig::UNBOUNDED).unwrap()
	}

	#[test]
	fn dimensions_are_checked() {
		assert_eq!(
			RoutePlanner::new(4, 10, PlannerConfig::default()).err(),
			Some(RouteError::InvalidDimensions { rows: 4, cols: 10 })
		);
		let mut planner = RoutePlanner::new(5, 5, PlannerConfig::default()).unwrap();
		assert!(planner.resize(31, 5).is_err());
		assert_eq!(planner.grid().size(), (5, 5));
		planner.resize(30, 6).unwrap();
		assert_eq!(planner.grid().size(), (30, 6));
	}

	#[test]
	fn paint_out_of_bounds() {
		let mut planner = RoutePlanner::new(5, 5, PlannerConfig::default()).unwrap();
		planner.set_brush(Terrain::Building);
		assert!(planner.paint(4, 4));
		assert!(!planner.paint(5, 0));
		assert_eq!(planner.grid().terrain((4, 4)), Some(Terrain::Building));
	}

	#[test]
	fn run_paints_the_result() {
		let mut planner = planner("E..X");
		let route = planner.run(&mut NoopObserver).unwrap();
		assert_eq!(route.path.path, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
		assert_eq!(planner.grid().to_string(), "E**X");

		// a second run starts from a clean Grid and gives the same answer
		let again = planner.run(&mut NoopObserver).unwrap();
		assert_eq!(again.path, route.path);
		assert_eq!(again.visited, route.visited);
	}

	#[test]
	fn failed_run_still_paints_the_search() {
		let mut planner = planner("E.#X");
		let mut observer = Counting::default();
		let err = planner.run(&mut observer).unwrap_err();
		assert!(matches!(err, RouteError::PathReconstruction { .. }));
		assert_eq!(planner.grid().to_string(), "E+#X");
		assert_eq!(observer.visits, 1);
		assert_eq!(observer.outcomes, vec![Err(err)]);
	}

	#[test]
	fn missing_endpoints_leave_the_grid_alone() {
		let mut planner = planner("E..X");
		planner.run(&mut NoopObserver).unwrap();
		planner.grid_mut().set_terrain(0, 3, Terrain::Free);

		let mut observer = Counting::default();
		let err = planner.run(&mut observer).unwrap_err();
		assert_eq!(
			err,
			RouteError::MissingEndpoints {
				entry: true,
				exit: false
			}
		);
		assert_eq!(planner.grid().to_string(), "E**.");
		assert_eq!(observer.visits, 0);
		assert_eq!(observer.outcomes.len(), 1);
	}

	#[test]
	fn completion_is_reported_once() {
		let mut planner = planner("E~X\n...");
		planner.set_algorithm(Algorithm::Dijkstra);
		let mut observer = Counting::default();
		let route = planner.run(&mut observer).unwrap();
		assert_eq!(observer.visits, route.visited.len());
		assert_eq!(observer.outcomes, vec![Ok(route.visited.len())]);
	}

	#[test]
	fn route_time_is_part_of_the_run() {
		struct Timing(Option<Duration>);
		impl SearchObserver for Timing {
			fn on_visit(&mut self, _: Point) {}
			fn on_search_complete(&mut self, _: &Result<Route, RouteError>, elapsed: Duration) {
				self.0 = Some(elapsed);
			}
		}

		let mut planner = RoutePlanner::new(30, 30, PlannerConfig::default()).unwrap();
		planner.grid_mut().set_terrain(0, 0, Terrain::Entry);
		planner.grid_mut().set_terrain(29, 29, Terrain::Exit);
		planner.set_algorithm(Algorithm::Dijkstra);

		let mut timing = Timing(None);
		let route = planner.run(&mut timing).unwrap();
		let run = timing.0.unwrap();
		assert!(route.elapsed > Duration::ZERO);
		assert!(route.elapsed <= run);
	}

	#[test]
	fn cancelled_run() {
		let mut planner = planner("E....X");
		let token = CancelToken::new();
		token.cancel();
		let mut observer = Counting::default();
		assert_eq!(
			planner.run_with_cancel(&mut observer, &token).err(),
			Some(RouteError::Cancelled)
		);
		assert_eq!(observer.outcomes, vec![Err(RouteError::Cancelled)]);
	}

	#[test]
	fn custom_costs() {
		#[derive(Debug)]
		struct Swimmer;
		impl CostModel for Swimmer {
			fn cost(&self, terrain: Terrain) -> f64 {
				match terrain {
					Terrain::Building => f64::INFINITY,
					Terrain::Entry | Terrain::Exit | Terrain::Water => 0.0,
					_ => 1.0,
				}
			}
		}

		let mut planner = planner("E~X").with_costs(Swimmer);
		planner.set_algorithm(Algorithm::AStar);
		assert_eq!(planner.run(&mut NoopObserver).unwrap().path.cost, 0.0);
	}

	#[test]
	fn compare_all_leaves_the_grid_alone() {
		let planner = planner(
			"
			E.~.
			.#..
			...X
			",
		);
		let before = planner.grid().clone();
		let outcomes = planner.compare_all();
		assert_eq!(planner.grid(), &before);

		let algorithms: Vec<_> = outcomes.iter().map(|(a, _)| *a).collect();
		assert_eq!(algorithms, Algorithm::ALL.to_vec());
		for (_, outcome) in outcomes {
			assert_eq!(outcome.unwrap().path.cost, 4.0);
		}
	}

	#[cfg(feature = "parallel")]
	#[test]
	fn parallel_matches_sequential() {
		let mut planner = RoutePlanner::new(20, 20, PlannerConfig::default()).unwrap();
		planner.grid_mut().set_terrain(0, 0, Terrain::Entry);
		planner.grid_mut().set_terrain(19, 19, Terrain::Exit);
		planner.randomize_with(&mut WyRand::new_seed(42));

		let sequential = planner.compare_all();
		let parallel = planner.compare_all_parallel();
		for ((a, left), (b, right)) in sequential.into_iter().zip(parallel) {
			assert_eq!(a, b);
			match (left, right) {
				(Ok(left), Ok(right)) => {
					assert_eq!(left.path, right.path);
					assert_eq!(left.visited, right.visited);
				}
				(left, right) => assert_eq!(left.err(), right.err()),
			}
		}
	}
}
