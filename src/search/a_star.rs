use super::{endpoints, CancelToken, HeuristicElement, SearchObserver, SearchResult, SearchState};
use crate::{neighbors::ManhattanNeighborhood, CostModel, Grid, RouteError};

use std::collections::BinaryHeap;

/// Searches the Grid using the [A* Algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm).
///
/// Relaxation works exactly like in [`dijkstra_search`](crate::dijkstra_search), but the heap is
/// keyed by the Cost so far plus the Manhattan distance to the Exit. The search ends as soon as
/// the Exit is popped.
///
/// Unlike the other two searches, this one checks whether the Exit was reached and returns
/// [`SearchResult::NotFound`] if it wasn't. Since every relaxed Point is pushed onto the heap,
/// the Exit is reached exactly if it ever got a predecessor.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{
///     a_star_search, CancelToken, Grid, NoopObserver, SearchResult, StandardCosts,
/// };
///
/// let grid: Grid = "
///     E.#.
///     .%#.
///     ....
///     ~~.X
/// ".parse()?;
///
/// let result = a_star_search(&grid, &StandardCosts, &mut NoopObserver, &CancelToken::new())?;
/// let path = result.into_path(&grid, &StandardCosts)?;
/// assert_eq!(path.cost, 5.0);
///
/// let walled_in: Grid = "E#X".parse()?;
/// let result = a_star_search(&walled_in, &StandardCosts, &mut NoopObserver, &CancelToken::new())?;
/// assert_eq!(result, SearchResult::NotFound);
/// # Ok::<(), terrain_pathfinding::RouteError>(())
/// ```
pub fn a_star_search<C: CostModel + ?Sized, O: SearchObserver + ?Sized>(
	grid: &Grid,
	costs: &C,
	observer: &mut O,
	cancel: &CancelToken,
) -> Result<SearchResult, RouteError> {
	let (entry, exit) = endpoints(grid)?;
	let neighborhood = ManhattanNeighborhood::new(grid.rows(), grid.cols());

	let mut state = SearchState::new(grid);
	let mut next = BinaryHeap::with_capacity(grid.area() / 2);
	next.push(HeuristicElement(entry, 0.0, 0.0));
	state.cost_so_far.insert(entry, 0.0);

	let mut all_neighbors = vec![];

	while let Some(HeuristicElement(current, cost, _)) = next.pop() {
		cancel.check()?;
		if current == exit {
			log::debug!(
				"a*: expanded {} points, exit cost: {}",
				state.visited.len(),
				cost
			);
			return Ok(SearchResult::Found {
				came_from: state.came_from,
				entry,
				exit,
			});
		}
		if !state.visited.insert(current) {
			continue;
		}

		all_neighbors.clear();
		neighborhood.get_all_neighbors(current, &mut all_neighbors);
		for &other in all_neighbors.iter() {
			if let Some(other_cost) = state.relax(current, other, costs, observer) {
				let heuristic = neighborhood.heuristic(other, exit) as f64;
				next.push(HeuristicElement(other, other_cost, other_cost + heuristic));
			}
		}
	}

	// the heap only runs dry if the Exit was never relaxed
	debug_assert!(!state.came_from.contains_key(&exit));
	log::debug!("a*: exit unreachable after {} points", state.visited.len());
	Ok(SearchResult::NotFound)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{dijkstra_search, NoopObserver, Point, StandardCosts};

	fn search(grid: &Grid) -> (SearchResult, Vec<Point>) {
		let mut seen = vec![];
		let result = a_star_search(
			grid,
			&StandardCosts,
			&mut |p: Point| seen.push(p),
			&CancelToken::new(),
		)
		.unwrap();
		(result, seen)
	}

	#[test]
	fn unreachable_exit() {
		let grid: Grid = "
			.#...
			#E#..
			.#...
			....X
		"
		.parse()
		.unwrap();
		let (result, seen) = search(&grid);
		assert_eq!(result, SearchResult::NotFound);
		assert!(seen.is_empty());
	}

	#[test]
	fn heads_straight_for_the_exit() {
		let grid: Grid = "
			.....
			E...X
			.....
		"
		.parse()
		.unwrap();
		let (result, _) = search(&grid);
		let path = result.into_path(&grid, &StandardCosts).unwrap();
		assert_eq!(path.path, vec![(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)]);
		assert_eq!(path.cost, 3.0);
	}

	#[test]
	fn matches_dijkstra_cost() {
		let grid: Grid = "
			E.~..%
			.#~#..
			.#..#.
			.%%.#X
		"
		.parse()
		.unwrap();
		let (a_star, _) = search(&grid);
		let dijkstra =
			dijkstra_search(&grid, &StandardCosts, &mut NoopObserver, &CancelToken::new()).unwrap();
		assert_eq!(
			a_star.into_path(&grid, &StandardCosts).unwrap().cost,
			dijkstra.into_path(&grid, &StandardCosts).unwrap().cost,
		);
	}

	#[test]
	fn each_point_is_reported_once() {
		let grid: Grid = "
			E~~~.
			.....
			%%%%.
			X....
		"
		.parse()
		.unwrap();
		let (_, seen) = search(&grid);
		let mut unique = seen.clone();
		unique.sort();
		unique.dedup();
		assert_eq!(unique.len(), seen.len());
	}

	#[test]
	fn cancelled_before_the_first_pop() {
		let grid: Grid = "E..X".parse().unwrap();
		let token = CancelToken::new();
		token.cancel();
		let result = a_star_search(&grid, &StandardCosts, &mut NoopObserver, &token);
		assert_eq!(result, Err(RouteError::Cancelled));
	}
}
