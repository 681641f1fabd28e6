//! The values a Tile on the Grid can hold.

use std::fmt;

/// The kind of ground a Tile is made of.
///
/// Every Tile of a [`Grid`](crate::Grid) holds exactly one Terrain (unless it is temporarily
/// covered by a [`Marker`]). How expensive it is to walk onto a Terrain is decided by a
/// [`CostModel`](crate::CostModel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terrain {
	/// Open ground
	Free,
	/// Impassable for every algorithm
	Building,
	/// Passable, but expensive
	Water,
	/// Passable, but very expensive
	Blocked,
	/// The start of a route. At most one per Grid
	Entry,
	/// The end of a route. At most one per Grid
	Exit,
}

impl Terrain {
	/// All Terrains, in declaration order
	pub const ALL: [Terrain; 6] = [
		Terrain::Free,
		Terrain::Building,
		Terrain::Water,
		Terrain::Blocked,
		Terrain::Entry,
		Terrain::Exit,
	];

	/// `true` for [`Entry`](Terrain::Entry) and [`Exit`](Terrain::Exit)
	pub fn is_endpoint(self) -> bool {
		matches!(self, Terrain::Entry | Terrain::Exit)
	}

	/// The character used for this Terrain in the text form of a Grid
	pub fn glyph(self) -> char {
		match self {
			Terrain::Free => '.',
			Terrain::Building => '#',
			Terrain::Water => '~',
			Terrain::Blocked => '%',
			Terrain::Entry => 'E',
			Terrain::Exit => 'X',
		}
	}
}

/// Presentation-only overlays painted on top of a Tile after a search.
///
/// Markers are never Terrain: the cost of a marked Tile is always looked up on the Terrain it
/// covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
	/// The Tile was admitted to the frontier of a search
	Searching,
	/// The Tile is part of the final route
	Path,
}

impl Marker {
	/// The character used for this Marker in the text form of a Grid
	pub fn glyph(self) -> char {
		match self {
			Marker::Searching => '+',
			Marker::Path => '*',
		}
	}
}

/// The live content of a single cell on the Grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
	/// Plain Terrain
	Terrain(Terrain),
	/// A presentation Marker covering some Terrain
	Marker(Marker),
}

impl Tile {
	/// The Terrain of this Tile, or `None` if it is covered by a Marker
	pub fn terrain(self) -> Option<Terrain> {
		match self {
			Tile::Terrain(terrain) => Some(terrain),
			Tile::Marker(_) => None,
		}
	}

	/// `true` if the Tile holds a presentation Marker
	pub fn is_marker(self) -> bool {
		matches!(self, Tile::Marker(_))
	}

	/// The character used for this Tile in the text form of a Grid
	pub fn glyph(self) -> char {
		match self {
			Tile::Terrain(terrain) => terrain.glyph(),
			Tile::Marker(marker) => marker.glyph(),
		}
	}

	/// Parses a single character of the text form of a Grid
	///
	/// ## Examples
	/// ```
	/// # use terrain_pathfinding::{Marker, Terrain, Tile};
	/// assert_eq!(Tile::from_glyph('~'), Some(Tile::Terrain(Terrain::Water)));
	/// assert_eq!(Tile::from_glyph('*'), Some(Tile::Marker(Marker::Path)));
	/// assert_eq!(Tile::from_glyph('?'), None);
	/// ```
	pub fn from_glyph(glyph: char) -> Option<Tile> {
		let tile = match glyph {
			'+' => Tile::Marker(Marker::Searching),
			'*' => Tile::Marker(Marker::Path),
			other => Tile::Terrain(Terrain::ALL.into_iter().find(|t| t.glyph() == other)?),
		};
		Some(tile)
	}
}

impl From<Terrain> for Tile {
	fn from(terrain: Terrain) -> Tile {
		Tile::Terrain(terrain)
	}
}

impl From<Marker> for Tile {
	fn from(marker: Marker) -> Tile {
		Tile::Marker(marker)
	}
}

impl Default for Tile {
	fn default() -> Tile {
		Tile::Terrain(Terrain::Free)
	}
}

impl fmt::Display for Terrain {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "{}", self.glyph())
	}
}

impl fmt::Display for Tile {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "{}", self.glyph())
	}
}
