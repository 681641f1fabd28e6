//! How expensive it is to walk onto a Tile.

use crate::Terrain;

/// a Type to represent the Cost of walking onto a Tile.
///
/// Impassable Terrain has a Cost of [`f64::INFINITY`].
pub type Cost = f64;

/// Maps a [`Terrain`] to the Cost of stepping onto a Tile of that Terrain.
///
/// Costs must never be negative. The searches rely on that both for the lazy deletion in the
/// priority queue and for the Manhattan heuristic used by A*.
///
/// The standard table is [`StandardCosts`]. Other implementations are mainly useful in tests:
/// ```
/// use terrain_pathfinding::{Cost, CostModel, Terrain};
///
/// #[derive(Debug)]
/// struct Flat;
///
/// impl CostModel for Flat {
///     fn cost(&self, terrain: Terrain) -> Cost {
///         if terrain == Terrain::Building { f64::INFINITY } else { 1.0 }
///     }
/// }
///
/// assert!(!Flat.is_passable(Terrain::Building));
/// assert_eq!(Flat.cost(Terrain::Water), 1.0);
/// ```
pub trait CostModel {
	/// The Cost of stepping onto a Tile of `terrain`
	fn cost(&self, terrain: Terrain) -> Cost;

	/// `false` if stepping onto `terrain` is impossible
	fn is_passable(&self, terrain: Terrain) -> bool {
		self.cost(terrain).is_finite()
	}
}

impl<C: CostModel + ?Sized> CostModel for &C {
	fn cost(&self, terrain: Terrain) -> Cost {
		(**self).cost(terrain)
	}
}

/// The fixed Cost table of the route planner.
///
/// | Terrain  | Cost |
/// |----------|------|
/// | Free     | 1    |
/// | Building | ∞    |
/// | Water    | 5    |
/// | Blocked  | 10   |
/// | Entry    | 0    |
/// | Exit     | 0    |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardCosts;

impl StandardCosts {
	/// Cost of a [`Free`](Terrain::Free) Tile
	pub const FREE: Cost = 1.0;
	/// Cost of a [`Water`](Terrain::Water) Tile
	pub const WATER: Cost = 5.0;
	/// Cost of a [`Blocked`](Terrain::Blocked) Tile
	pub const BLOCKED: Cost = 10.0;
}

impl CostModel for StandardCosts {
	fn cost(&self, terrain: Terrain) -> Cost {
		match terrain {
			Terrain::Free => Self::FREE,
			Terrain::Building => Cost::INFINITY,
			Terrain::Water => Self::WATER,
			Terrain::Blocked => Self::BLOCKED,
			Terrain::Entry | Terrain::Exit => 0.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn standard_table() {
		let costs = StandardCosts;
		assert_eq!(costs.cost(Terrain::Free), 1.0);
		assert_eq!(costs.cost(Terrain::Water), 5.0);
		assert_eq!(costs.cost(Terrain::Blocked), 10.0);
		assert_eq!(costs.cost(Terrain::Entry), 0.0);
		assert_eq!(costs.cost(Terrain::Exit), 0.0);
		assert!(costs.cost(Terrain::Building).is_infinite());
	}

	#[test]
	fn only_buildings_are_solid() {
		let solid: Vec<_> = Terrain::ALL
			.into_iter()
			.filter(|&t| !StandardCosts.is_passable(t))
			.collect();
		assert_eq!(solid, vec![Terrain::Building]);
	}

	#[test]
	fn costs_are_never_negative() {
		assert!(Terrain::ALL.into_iter().all(|t| StandardCosts.cost(t) >= 0.0));
	}
}
