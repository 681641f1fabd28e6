use super::{endpoints, CancelToken, Element, SearchObserver, SearchResult, SearchState};
use crate::{neighbors::ManhattanNeighborhood, CostModel, Grid, RouteError};

use std::collections::BinaryHeap;

/// Searches the Grid using [Dijkstra's Algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm).
///
/// Every Tile that is not a live Building may be entered, at the Cost `costs` assigns to its
/// original Terrain. The frontier is a min-heap keyed by the Cost so far. A Point may sit in the
/// heap several times with stale Costs; only its first pop counts and later ones are skipped.
/// The search ends when the Exit is popped, not merely discovered, or the heap runs dry.
///
/// The result is always [`SearchResult::Found`], even if the Exit was never reached, in which
/// case reconstructing the Path fails.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{dijkstra_search, CancelToken, Grid, NoopObserver, StandardCosts};
///
/// let grid: Grid = "
///     E~X
///     ...
/// ".parse()?;
///
/// let result = dijkstra_search(&grid, &StandardCosts, &mut NoopObserver, &CancelToken::new())?;
/// let path = result.into_path(&grid, &StandardCosts)?;
///
/// // walking around the Water (1 + 1 + 1 + 0) beats crossing it (5 + 0)
/// assert_eq!(path.cost, 3.0);
/// assert_eq!(path.path, vec![(0, 0), (1, 0), (1, 1), (1, 2), (0, 2)]);
/// # Ok::<(), terrain_pathfinding::RouteError>(())
/// ```
pub fn dijkstra_search<C: CostModel + ?Sized, O: SearchObserver + ?Sized>(
	grid: &Grid,
	costs: &C,
	observer: &mut O,
	cancel: &CancelToken,
) -> Result<SearchResult, RouteError> {
	let (entry, exit) = endpoints(grid)?;
	let neighborhood = ManhattanNeighborhood::new(grid.rows(), grid.cols());

	let mut state = SearchState::new(grid);
	let mut next = BinaryHeap::with_capacity(grid.area() / 2);
	next.push(Element(entry, 0.0));
	state.cost_so_far.insert(entry, 0.0);

	let mut all_neighbors = vec![];

	while let Some(Element(current, _)) = next.pop() {
		cancel.check()?;
		if !state.visited.insert(current) {
			continue;
		}
		if current == exit {
			break;
		}

		all_neighbors.clear();
		neighborhood.get_all_neighbors(current, &mut all_neighbors);
		for &other in all_neighbors.iter() {
			if let Some(other_cost) = state.relax(current, other, costs, observer) {
				next.push(Element(other, other_cost));
			}
		}
	}

	log::debug!(
		"dijkstra: finalized {} points, exit cost: {:?}",
		state.visited.len(),
		state.cost_so_far.get(&exit)
	);
	Ok(SearchResult::Found {
		came_from: state.came_from,
		entry,
		exit,
	})
}
