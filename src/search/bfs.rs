use super::{endpoints, CancelToken, SearchObserver, SearchResult, SearchState};
use crate::{neighbors::ManhattanNeighborhood, Grid, RouteError, Terrain};

use std::collections::VecDeque;

/// Searches the Grid layer by layer, ignoring Terrain Costs.
///
/// Only [`Free`](Terrain::Free) Tiles and the [`Exit`](Terrain::Exit) are entered; Water and
/// Blocked Tiles are treated as walls rather than as expensive ground. Tiles are judged by their
/// [original Terrain](Grid::original_terrain), so Markers left on the Grid are walked over.
///
/// A Point counts as visited the moment it is enqueued, so it is never enqueued twice. The
/// search ends when the Exit is dequeued or the queue runs dry.
///
/// The resulting Path is the shortest by number of steps. The result is always
/// [`SearchResult::Found`], even if the Exit was never reached, in which case reconstructing
/// the Path fails.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{bfs_search, CancelToken, Grid, NoopObserver, StandardCosts};
///
/// let grid: Grid = "
///     E~.
///     ..X
/// ".parse()?;
///
/// let result = bfs_search(&grid, &mut NoopObserver, &CancelToken::new())?;
/// let path = result.into_path(&grid, &StandardCosts)?;
///
/// // the Water is avoided
/// assert_eq!(path.path, vec![(0, 0), (1, 0), (1, 1), (1, 2)]);
/// # Ok::<(), terrain_pathfinding::RouteError>(())
/// ```
pub fn bfs_search<O: SearchObserver + ?Sized>(
	grid: &Grid,
	observer: &mut O,
	cancel: &CancelToken,
) -> Result<SearchResult, RouteError> {
	let (entry, exit) = endpoints(grid)?;
	let neighborhood = ManhattanNeighborhood::new(grid.rows(), grid.cols());

	let mut state = SearchState::new(grid);
	let mut next = VecDeque::with_capacity(grid.area());
	next.push_back(entry);
	state.visited.insert(entry);

	let mut all_neighbors = vec![];

	while let Some(current) = next.pop_front() {
		cancel.check()?;
		if current == exit {
			break;
		}

		all_neighbors.clear();
		neighborhood.get_all_neighbors(current, &mut all_neighbors);
		for &other in all_neighbors.iter() {
			if !matches!(
				state.original_terrain(other),
				Terrain::Free | Terrain::Exit
			) {
				continue;
			}
			if !state.visited.insert(other) {
				continue;
			}
			state.came_from.insert(other, current);
			next.push_back(other);
			observer.on_visit(other);
		}
	}

	log::debug!(
		"bfs: enqueued {} points, exit reached: {}",
		state.visited.len(),
		state.came_from.contains_key(&exit)
	);
	Ok(SearchResult::Found {
		came_from: state.came_from,
		entry,
		exit,
	})
}
