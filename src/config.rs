use crate::{RouteError, Terrain};

/// Relative odds of each Terrain when randomizing a Grid.
///
/// The weights don't need to sum to 1, only their ratios matter.
///
/// Default weights:
/// ```
/// # use terrain_pathfinding::TerrainWeights;
/// assert_eq!(
/// 	TerrainWeights {
/// 		free: 0.6,
/// 		building: 0.2,
/// 		water: 0.1,
/// 		blocked: 0.1,
/// 	},
/// 	Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainWeights {
	/// weight of [`Terrain::Free`]
	pub free: f64,
	/// weight of [`Terrain::Building`]
	pub building: f64,
	/// weight of [`Terrain::Water`]
	pub water: f64,
	/// weight of [`Terrain::Blocked`]
	pub blocked: f64,
}

impl TerrainWeights {
	fn table(&self) -> [(Terrain, f64); 4] {
		[
			(Terrain::Free, self.free),
			(Terrain::Building, self.building),
			(Terrain::Water, self.water),
			(Terrain::Blocked, self.blocked),
		]
	}

	/// Picks a Terrain for a uniform `roll` in `[0, 1)`.
	///
	/// Negative weights count as 0. If every weight is 0, the result is always
	/// [`Terrain::Free`].
	///
	/// ## Examples
	/// ```
	/// # use terrain_pathfinding::{Terrain, TerrainWeights};
	/// let weights = TerrainWeights::default();
	///
	/// assert_eq!(weights.pick(0.0), Terrain::Free);
	/// assert_eq!(weights.pick(0.65), Terrain::Building);
	/// assert_eq!(weights.pick(0.85), Terrain::Water);
	/// assert_eq!(weights.pick(0.99), Terrain::Blocked);
	/// ```
	pub fn pick(&self, roll: f64) -> Terrain {
		let table = self.table();
		let total: f64 = table.iter().map(|(_, w)| w.max(0.0)).sum();
		if total <= 0.0 {
			return Terrain::Free;
		}
		let mut threshold = roll.clamp(0.0, 1.0) * total;
		let mut last = Terrain::Free;
		for (terrain, weight) in table {
			let weight = weight.max(0.0);
			if weight == 0.0 {
				continue;
			}
			if threshold < weight {
				return terrain;
			}
			threshold -= weight;
			last = terrain;
		}
		// only reachable through rounding on a roll of (almost) 1
		last
	}
}

impl Default for TerrainWeights {
	fn default() -> TerrainWeights {
		TerrainWeights {
			free: 0.6,
			building: 0.2,
			water: 0.1,
			blocked: 0.1,
		}
	}
}

/// Options for configuring the [`RoutePlanner`](crate::RoutePlanner)
///
/// Default options:
/// ```
/// # use terrain_pathfinding::{PlannerConfig, TerrainWeights};
/// assert_eq!(
/// 	PlannerConfig {
/// 		min_size: 5,
/// 		max_size: 30,
/// 		weights: TerrainWeights::default(),
/// 	},
/// 	Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
	/// The smallest allowed number of rows and columns (defaults to `5`)
	pub min_size: usize,
	/// The largest allowed number of rows and columns (defaults to `30`)
	pub max_size: usize,
	/// The odds used by [`RoutePlanner::randomize`](crate::RoutePlanner::randomize)
	pub weights: TerrainWeights,
}

impl PlannerConfig {
	/// a PlannerConfig that accepts any Grid the core can represent
	///
	/// Values:
	/// ```
	/// # use terrain_pathfinding::{PlannerConfig, TerrainWeights};
	/// assert_eq!(PlannerConfig::UNBOUNDED.min_size, 1);
	/// assert_eq!(PlannerConfig::UNBOUNDED.max_size, usize::MAX);
	/// ```
	pub const UNBOUNDED: PlannerConfig = PlannerConfig {
		min_size: 1,
		max_size: usize::MAX,
		weights: TerrainWeights {
			free: 0.6,
			building: 0.2,
			water: 0.1,
			blocked: 0.1,
		},
	};

	/// Returns a copy of this config with different randomization odds
	pub fn with_weights(self, weights: TerrainWeights) -> PlannerConfig {
		PlannerConfig { weights, ..self }
	}

	/// Checks `rows` and `cols` against [`min_size`](Self::min_size) and
	/// [`max_size`](Self::max_size).
	///
	/// ## Examples
	/// ```
	/// # use terrain_pathfinding::{PlannerConfig, RouteError};
	/// let config = PlannerConfig::default();
	///
	/// assert!(config.check_dimensions(10, 30).is_ok());
	/// assert_eq!(
	/// 	config.check_dimensions(4, 10),
	/// 	Err(RouteError::InvalidDimensions { rows: 4, cols: 10 }),
	/// );
	/// ```
	pub fn check_dimensions(&self, rows: usize, cols: usize) -> Result<(), RouteError> {
		let allowed = self.min_size.max(1)..=self.max_size;
		if allowed.contains(&rows) && allowed.contains(&cols) {
			Ok(())
		} else {
			Err(RouteError::InvalidDimensions { rows, cols })
		}
	}
}

impl Default for PlannerConfig {
	fn default() -> PlannerConfig {
		PlannerConfig {
			min_size: 5,
			max_size: 30,
			weights: TerrainWeights::default(),
		}
	}
}
