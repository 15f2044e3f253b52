//! Error types with rich diagnostics using miette
//!
//! Row-level errors (`InputError` and the structs it groups) know nothing
//! about files. `FootprintError` attaches the file name, the source text and
//! the span of the offending row.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt;
use thiserror::Error;

use crate::world::Wall;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (file name or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Unit Errors
// ============================================================================

/// A `ft:in` token that does not describe a length
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum MalformedUnitError {
    #[error("`{token}` combines positive feet with negative inches")]
    #[diagnostic(
        code(footprint::unit::mixed_sign),
        help("a negative length takes its sign from the feet, e.g. `-2:3`")
    )]
    MixedSign { token: String },

    #[error("`{token}` has negative feet and negative inches")]
    #[diagnostic(
        code(footprint::unit::double_negative),
        help("the sign of the feet already applies to the inches, write `-2:3`")
    )]
    DoubleNegative { token: String },

    #[error("`{token}` does not start with a whole number of feet")]
    #[diagnostic(code(footprint::unit::invalid_feet))]
    InvalidFeet { token: String },

    #[error("`{token}` does not end with a number of inches")]
    #[diagnostic(code(footprint::unit::invalid_inches))]
    InvalidInches { token: String },
}

// ============================================================================
// Grammar Errors
// ============================================================================

/// A coordinate row that does not follow `LABEL) [W] <REF|ROT> x,y`
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GrammarError {
    #[error("label not specified for coordinate `{line}`")]
    #[diagnostic(
        code(footprint::grammar::missing_label_delimiter),
        help("every coordinate starts with `LABEL)`")
    )]
    MissingLabelDelimiter { line: String },

    #[error("empty label in `{line}`")]
    #[diagnostic(code(footprint::grammar::empty_label))]
    EmptyLabel { line: String },

    #[error("label `{label}` has no ordered pair")]
    #[diagnostic(
        code(footprint::grammar::missing_ordered_pair),
        help("x and y are separated by `,`")
    )]
    MissingOrderedPair { label: String },

    #[error("unbalanced `{open}` and `{close}` in `{line}`")]
    #[diagnostic(code(footprint::grammar::unbalanced))]
    Unbalanced { open: char, close: char, line: String },

    #[error("label `{label}` is pinned to a wall but has no reference block")]
    #[diagnostic(
        code(footprint::grammar::wall_without_reference),
        help("write the reference explicitly, `<>` inherits the previous one")
    )]
    WallWithoutReference { label: String },

    #[error("label `{label}`: `{wall}` is not a wall")]
    #[diagnostic(
        code(footprint::grammar::invalid_wall),
        help("walls are N, E, S or W")
    )]
    InvalidWall { label: String, wall: String },

    #[error("label `{label}`: rotation `{value}` is not a number")]
    #[diagnostic(code(footprint::grammar::invalid_rotation))]
    InvalidRotation { label: String, value: String },

    #[error("malformed coordinate `{line}`: {message}")]
    #[diagnostic(code(footprint::grammar::syntax))]
    Syntax { line: String, message: String },
}

// ============================================================================
// Header Errors
// ============================================================================

/// The two header rows every input file starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    VolumeName,
    Height,
}

impl Header {
    pub fn keyword(self) -> &'static str {
        match self {
            Header::VolumeName => "VolName",
            Header::Height => "Height",
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("`{header})` header not specified")]
#[diagnostic(code(footprint::header::missing))]
pub struct MissingHeaderError {
    pub header: Header,
    #[help]
    pub expected: String,
}

impl MissingHeaderError {
    pub fn new(header: Header) -> Self {
        let expected = match header {
            Header::VolumeName => "the first row must be `VolName)<name>`",
            Header::Height => "the second row must be `Height)<base ft:in>,<top ft:in>`",
        };
        Self {
            header,
            expected: expected.to_string(),
        }
    }
}

// ============================================================================
// Resolution Errors
// ============================================================================

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("label `{label}` already used")]
#[diagnostic(code(footprint::resolve::duplicate_label))]
pub struct DuplicateLabelError {
    pub label: String,
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("point `{label}` references `{reference}`, which does not exist yet")]
#[diagnostic(
    code(footprint::resolve::unresolved_reference),
    help("a reference must name a point defined on an earlier row")
)]
pub struct UnresolvedReferenceError {
    pub label: String,
    pub reference: String,
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("cannot add `{label}`: the outline is already closed")]
#[diagnostic(
    code(footprint::resolve::closed),
    help("points after a closed outline belong in a new collection")
)]
pub struct ClosedCollectionError {
    pub label: String,
}

/// Errors from `Collection::add_point`
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    DuplicateLabel(#[from] DuplicateLabelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnresolvedReference(#[from] UnresolvedReferenceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Closed(#[from] ClosedCollectionError),
}

// ============================================================================
// Boundary Errors
// ============================================================================

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("boundaries of `{first}` [{first_wall}] and `{second}` [{second_wall}] are incongruent")]
#[diagnostic(
    code(footprint::boundary::incongruent),
    help("an open outline cannot close across opposite walls; add a boundary point on a wall in between")
)]
pub struct CongruencyError {
    pub first: String,
    pub first_wall: Wall,
    pub second: String,
    pub second_wall: Wall,
}

// ============================================================================
// Input Errors
// ============================================================================

/// Everything that can be wrong with the contents of one input file
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedUnit(#[from] MalformedUnitError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingHeader(#[from] MissingHeaderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    DuplicateLabel(#[from] DuplicateLabelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnresolvedReference(#[from] UnresolvedReferenceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Closed(#[from] ClosedCollectionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Congruency(#[from] CongruencyError),
}

impl From<ResolveError> for InputError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::DuplicateLabel(e) => InputError::DuplicateLabel(e),
            ResolveError::UnresolvedReference(e) => InputError::UnresolvedReference(e),
            ResolveError::Closed(e) => InputError::Closed(e),
        }
    }
}

// ============================================================================
// File Errors
// ============================================================================

/// A failure that aborts one input file
#[derive(Error, Diagnostic, Debug)]
pub enum FootprintError {
    #[error("cannot read `{path}`")]
    #[diagnostic(code(footprint::io))]
    Io {
        path: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("cannot process `{file}`")]
    #[diagnostic(code(footprint::input))]
    Input {
        file: String,
        /// 1-based row of the offending line, if the error belongs to one
        line: Option<usize>,
        #[source_code]
        src: NamedSource<String>,
        #[label("{cause}")]
        span: Option<SourceSpan>,
        #[source]
        #[diagnostic_source]
        cause: InputError,
    },
}

impl FootprintError {
    /// The file this error belongs to
    pub fn file(&self) -> &str {
        match self {
            FootprintError::Io { path, .. } => path,
            FootprintError::Input { file, .. } => file,
        }
    }

    /// The content error, if the file could be read at all
    pub fn cause(&self) -> Option<&InputError> {
        match self {
            FootprintError::Io { .. } => None,
            FootprintError::Input { cause, .. } => Some(cause),
        }
    }
}

// ============================================================================
// Settings Errors
// ============================================================================

#[derive(Error, Diagnostic, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file `{path}`")]
    #[diagnostic(code(footprint::settings::io))]
    Io {
        path: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("invalid settings")]
    #[diagnostic(code(footprint::settings::invalid))]
    Toml(#[from] toml::de::Error),

    #[error("world half extents must be positive and finite, got {x} x {y}")]
    #[diagnostic(code(footprint::settings::world_extent))]
    WorldExtent { x: f64, y: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_keeps_inner_code() {
        let err = InputError::from(DuplicateLabelError { label: "A".into() });
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("footprint::resolve::duplicate_label"));
    }

    #[test]
    fn resolve_error_flattens_into_input_error() {
        let err = ResolveError::from(UnresolvedReferenceError {
            label: "B".into(),
            reference: "Z".into(),
        });
        assert!(matches!(
            InputError::from(err),
            InputError::UnresolvedReference(UnresolvedReferenceError { ref reference, .. }) if reference == "Z"
        ));
    }

    #[test]
    fn closed_collection_error_keeps_its_code() {
        let err = InputError::from(ResolveError::from(ClosedCollectionError { label: "z".into() }));
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("footprint::resolve::closed"));
        assert_eq!(err.to_string(), "cannot add `z`: the outline is already closed");
    }

    #[test]
    fn missing_header_help_names_expected_row() {
        let err = MissingHeaderError::new(Header::Height);
        assert_eq!(err.to_string(), "`Height)` header not specified");
        assert!(err.help().is_some_and(|h| h.to_string().contains("Height)")));
    }

    #[test]
    fn congruency_message_names_both_walls() {
        let err = CongruencyError {
            first: "a".into(),
            first_wall: Wall::North,
            second: "b".into(),
            second_wall: Wall::South,
        };
        assert_eq!(err.to_string(), "boundaries of `a` [N] and `b` [S] are incongruent");
    }
}
