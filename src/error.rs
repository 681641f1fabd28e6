use std::fmt;

/// Everything that can go wrong while building a Grid or searching it.
///
/// Every error is scoped to a single call. The Grid is left valid, although Markers painted by
/// an earlier run may still need to be cleared with
/// [`reset_presentation_markers`](crate::Grid::reset_presentation_markers).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteError {
	/// The Grid lacks an Entry or an Exit. No traversal was performed.
	MissingEndpoints {
		/// whether an Entry was found
		entry: bool,
		/// whether an Exit was found
		exit: bool,
	},
	/// The search finished without ever reaching the Exit
	NotFound,
	/// The predecessor map does not lead from the Exit back to the Entry
	PathReconstruction {
		/// what went wrong
		reason: String,
	},
	/// A Grid with these dimensions cannot be created
	InvalidDimensions {
		/// requested number of rows
		rows: usize,
		/// requested number of columns
		cols: usize,
	},
	/// The search was stopped through its [`CancelToken`](crate::CancelToken)
	Cancelled,
	/// The text form of a Grid contains an unknown character
	ParseGlyph {
		/// 0-based row of the character
		row: usize,
		/// 0-based column of the character
		col: usize,
		/// the offending character
		glyph: char,
	},
	/// The rows in the text form of a Grid have different lengths
	RaggedRows {
		/// 0-based row that does not match the first row
		row: usize,
		/// its length
		len: usize,
		/// the length of the first row
		expected: usize,
	},
}

impl fmt::Display for RouteError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MissingEndpoints { entry, exit } => {
				let missing = match (entry, exit) {
					(false, false) => "entry and exit",
					(false, true) => "entry",
					_ => "exit",
				};
				write!(f, "grid has no {missing}")
			}
			Self::NotFound => write!(f, "no route reaches the exit"),
			Self::PathReconstruction { reason } => {
				write!(f, "could not reconstruct path: {reason}")
			}
			Self::InvalidDimensions { rows, cols } => {
				write!(f, "invalid grid size {rows}x{cols}")
			}
			Self::Cancelled => write!(f, "search was cancelled"),
			Self::ParseGlyph { row, col, glyph } => {
				write!(f, "unknown tile {glyph:?} at row {row}, column {col}")
			}
			Self::RaggedRows { row, len, expected } => {
				write!(f, "row {row} has {len} tiles, expected {expected}")
			}
		}
	}
}

impl std::error::Error for RouteError {}
