use super::SearchObserver;
use crate::{Cost, CostModel, Grid, Point, PointMap, PointSet, Terrain, Tile};

use std::cmp::Ordering;

/// Bookkeeping owned by a single search run.
///
/// Nothing in here outlives the run or is shared between algorithms.
pub(crate) struct SearchState<'g> {
	grid: &'g Grid,
	/// Points taken off the frontier for good (Dijkstra, A*) or ever enqueued (BFS)
	pub visited: PointSet,
	pub cost_so_far: PointMap<Cost>,
	pub came_from: PointMap<Point>,
	/// original Terrain of every Point touched so far
	overlay: PointMap<Terrain>,
}

impl<'g> SearchState<'g> {
	pub fn new(grid: &'g Grid) -> Self {
		let size_hint = grid.area();
		SearchState {
			grid,
			visited: PointSet::with_capacity(size_hint),
			cost_so_far: PointMap::with_capacity(size_hint),
			came_from: PointMap::with_capacity(size_hint),
			overlay: PointMap::default(),
		}
	}

	/// The Terrain a Cost is looked up on, captured the first time `point` is touched
	pub fn original_terrain(&mut self, point: Point) -> Terrain {
		let grid = self.grid;
		*self
			.overlay
			.entry(point)
			.or_insert_with(|| grid.original_terrain(point))
	}

	/// Records `current` as the predecessor of `other` if going through `current` is strictly
	/// cheaper than anything found before.
	///
	/// Returns the new Cost of `other` in that case. Points that are live Buildings, or whose
	/// Terrain is impassable under `costs`, are never entered.
	pub fn relax<C: CostModel + ?Sized, O: SearchObserver + ?Sized>(
		&mut self,
		current: Point,
		other: Point,
		costs: &C,
		observer: &mut O,
	) -> Option<Cost> {
		if self.grid.tile(other) == Some(Tile::Terrain(Terrain::Building)) {
			return None;
		}
		let current_cost = self.cost_so_far[&current];
		let other_cost = current_cost + costs.cost(self.original_terrain(other));
		if !other_cost.is_finite() {
			return None;
		}

		match self.cost_so_far.get(&other) {
			Some(&prev_cost) if prev_cost <= other_cost => return None,
			Some(_) => {}
			None => observer.on_visit(other),
		}
		self.cost_so_far.insert(other, other_cost);
		self.came_from.insert(other, current);
		Some(other_cost)
	}
}

/// A frontier entry ordered by Cost for a min-heap.
///
/// Equal Costs are broken by the smaller Point, so the search order never depends on the
/// order of insertion.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Element(pub Point, pub Cost);

impl PartialEq for Element {
	fn eq(&self, rhs: &Self) -> bool {
		self.cmp(rhs) == Ordering::Equal
	}
}
impl Eq for Element {}
impl PartialOrd for Element {
	fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
		Some(self.cmp(rhs))
	}
}
impl Ord for Element {
	fn cmp(&self, rhs: &Self) -> Ordering {
		rhs.1.total_cmp(&self.1).then_with(|| rhs.0.cmp(&self.0))
	}
}

/// A frontier entry for A*: `(Point, Cost so far, Cost so far + heuristic)`, ordered by the
/// last field for a min-heap, ties broken like [`Element`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct HeuristicElement(pub Point, pub Cost, pub Cost);

impl PartialEq for HeuristicElement {
	fn eq(&self, rhs: &Self) -> bool {
		self.cmp(rhs) == Ordering::Equal
	}
}
impl Eq for HeuristicElement {}
impl PartialOrd for HeuristicElement {
	fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
		Some(self.cmp(rhs))
	}
}
impl Ord for HeuristicElement {
	fn cmp(&self, rhs: &Self) -> Ordering {
		rhs.2.total_cmp(&self.2).then_with(|| rhs.0.cmp(&self.0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{NoopObserver, StandardCosts};
	use std::collections::BinaryHeap;

	#[test]
	fn heap_pops_cheapest_then_smallest_point() {
		let mut heap = BinaryHeap::new();
		heap.push(Element((2, 0), 1.0));
		heap.push(Element((0, 3), 1.0));
		heap.push(Element((0, 0), 5.0));
		heap.push(Element((1, 1), 0.5));

		let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.0).collect();
		assert_eq!(order, vec![(1, 1), (0, 3), (2, 0), (0, 0)]);
	}

	#[test]
	fn heuristic_heap_orders_by_estimate() {
		let mut heap = BinaryHeap::new();
		heap.push(HeuristicElement((0, 0), 1.0, 9.0));
		heap.push(HeuristicElement((0, 1), 7.0, 8.0));
		assert_eq!(heap.pop().map(|e| e.0), Some((0, 1)));
	}

	#[test]
	fn relax_only_improves() {
		let grid: Grid = "E~\n.X".parse().unwrap();
		let mut state = SearchState::new(&grid);
		state.cost_so_far.insert((0, 0), 0.0);

		let mut seen = vec![];
		let mut observer = |p: Point| seen.push(p);
		assert_eq!(state.relax((0, 0), (0, 1), &StandardCosts, &mut observer), Some(5.0));
		assert_eq!(state.relax((0, 0), (0, 1), &StandardCosts, &mut observer), None);

		state.cost_so_far.insert((1, 1), 0.0);
		assert_eq!(state.relax((1, 1), (0, 1), &StandardCosts, &mut observer), None);
		state.cost_so_far.insert((1, 1), -4.0);
		assert_eq!(state.relax((1, 1), (0, 1), &StandardCosts, &mut observer), Some(1.0));
		assert_eq!(state.came_from[&(0, 1)], (1, 1));

		assert_eq!(seen, vec![(0, 1)]);
	}

	#[test]
	fn buildings_are_never_entered() {
		let grid: Grid = "E#X".parse().unwrap();
		let mut state = SearchState::new(&grid);
		state.cost_so_far.insert((0, 0), 0.0);
		assert_eq!(state.relax((0, 0), (0, 1), &StandardCosts, &mut NoopObserver), None);
		assert!(state.came_from.is_empty());
	}

	#[test]
	fn overlay_keeps_first_capture() {
		let mut grid: Grid = "E~X".parse().unwrap();
		grid.mark((0, 1), crate::Marker::Searching);
		let mut state = SearchState::new(&grid);
		assert_eq!(state.original_terrain((0, 1)), Terrain::Water);
		assert_eq!(state.original_terrain((0, 2)), Terrain::Exit);
	}
}
