//! Matrix Market banner classification
//!
//! The banner is the first line of a Matrix Market file:
//!
//! ```text
//! %%MatrixMarket matrix coordinate real symmetric
//! ```
//!
//! It is parsed once into an immutable [`MatrixType`] value which the rest of
//! the pipeline queries through predicates.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Leading token of every Matrix Market file
pub const BANNER_PREFIX: &str = "%%MatrixMarket";

/// Kind of object stored in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Object {
    Matrix,
    Vector,
}

/// Storage layout of the entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Sparse `row col value` triples
    Coordinate,
    /// Dense column-major listing
    Array,
}

/// Domain of the stored values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Real,
    Complex,
    Integer,
    Pattern,
}

/// Symmetry structure of the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    General,
    Symmetric,
    SkewSymmetric,
    Hermitian,
}

/// Value domain of a matrix accepted by the density pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDomain {
    Real,
    Complex,
}

impl ValueDomain {
    /// Tag written at the start of a density map header
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueDomain::Real => "real",
            ValueDomain::Complex => "complex",
        }
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueDomain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "real" => Ok(ValueDomain::Real),
            "complex" => Ok(ValueDomain::Complex),
            other => Err(Error::Format(format!("Unknown value domain '{}'", other))),
        }
    }
}

/// Complete type descriptor read from a Matrix Market banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixType {
    pub object: Object,
    pub storage: Storage,
    pub field: Field,
    pub symmetry: Symmetry,
}

impl MatrixType {
    /// Type of a general real coordinate matrix
    pub const fn real_general() -> Self {
        Self {
            object: Object::Matrix,
            storage: Storage::Coordinate,
            field: Field::Real,
            symmetry: Symmetry::General,
        }
    }

    /// Returns a copy with a different value field
    pub const fn with_field(self, field: Field) -> Self {
        Self { field, ..self }
    }

    /// Returns a copy with a different symmetry
    pub const fn with_symmetry(self, symmetry: Symmetry) -> Self {
        Self { symmetry, ..self }
    }

    /// Parses a banner line
    ///
    /// Tokens after the prefix are matched case-insensitively. Returns a
    /// format error if the prefix or any of the four type tokens is missing
    /// or unknown.
    pub fn parse_banner(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(BANNER_PREFIX) {
            return Err(Error::Format("Matrix Market banner not found".to_string()));
        }

        let mut next = |what: &str| {
            tokens
                .next()
                .map(str::to_ascii_lowercase)
                .ok_or_else(|| {
                    Error::Format(format!("Matrix Market banner is missing the {}", what))
                })
        };

        let object = match next("object type")?.as_str() {
            "matrix" => Object::Matrix,
            "vector" => Object::Vector,
            other => return Err(unknown("object type", other)),
        };
        let storage = match next("storage format")?.as_str() {
            "coordinate" => Storage::Coordinate,
            "array" => Storage::Array,
            other => return Err(unknown("storage format", other)),
        };
        let field = match next("value field")?.as_str() {
            "real" => Field::Real,
            "complex" => Field::Complex,
            "integer" => Field::Integer,
            "pattern" => Field::Pattern,
            other => return Err(unknown("value field", other)),
        };
        let symmetry = match next("symmetry")?.as_str() {
            "general" => Symmetry::General,
            "symmetric" => Symmetry::Symmetric,
            "skew-symmetric" => Symmetry::SkewSymmetric,
            "hermitian" => Symmetry::Hermitian,
            other => return Err(unknown("symmetry", other)),
        };

        Ok(Self {
            object,
            storage,
            field,
            symmetry,
        })
    }

    pub fn is_matrix(&self) -> bool {
        self.object == Object::Matrix
    }

    pub fn is_sparse(&self) -> bool {
        self.storage == Storage::Coordinate
    }

    pub fn is_real(&self) -> bool {
        self.field == Field::Real
    }

    pub fn is_complex(&self) -> bool {
        self.field == Field::Complex
    }

    /// True when only one triangle is stored and the other is implied
    ///
    /// Skew-symmetric and hermitian matrices have the same nonzero structure
    /// as symmetric ones, so all three count as mirrored storage.
    pub fn is_symmetric(&self) -> bool {
        self.symmetry != Symmetry::General
    }

    /// Value domain, if the field is one the pipeline accepts
    pub fn domain(&self) -> Option<ValueDomain> {
        match self.field {
            Field::Real => Some(ValueDomain::Real),
            Field::Complex => Some(ValueDomain::Complex),
            Field::Integer | Field::Pattern => None,
        }
    }
}

fn unknown(what: &str, token: &str) -> Error {
    Error::Format(format!("Unknown {} '{}' in Matrix Market banner", what, token))
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let object = match self.object {
            Object::Matrix => "matrix",
            Object::Vector => "vector",
        };
        let storage = match self.storage {
            Storage::Coordinate => "coordinate",
            Storage::Array => "array",
        };
        let field = match self.field {
            Field::Real => "real",
            Field::Complex => "complex",
            Field::Integer => "integer",
            Field::Pattern => "pattern",
        };
        let symmetry = match self.symmetry {
            Symmetry::General => "general",
            Symmetry::Symmetric => "symmetric",
            Symmetry::SkewSymmetric => "skew-symmetric",
            Symmetry::Hermitian => "hermitian",
        };
        write!(f, "{} {} {} {}", object, storage, field, symmetry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_real_symmetric() {
        let ty = MatrixType::parse_banner("%%MatrixMarket matrix coordinate real symmetric");
        let ty = ty.unwrap();
        assert!(ty.is_matrix());
        assert!(ty.is_sparse());
        assert!(ty.is_real());
        assert!(!ty.is_complex());
        assert!(ty.is_symmetric());
        assert_eq!(ty.domain(), Some(ValueDomain::Real));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let ty = MatrixType::parse_banner("%%MatrixMarket MATRIX Coordinate Complex General");
        let ty = ty.unwrap();
        assert!(ty.is_complex());
        assert!(!ty.is_symmetric());
    }

    #[test]
    fn test_hermitian_counts_as_mirrored() {
        let ty = MatrixType::parse_banner("%%MatrixMarket matrix coordinate complex hermitian");
        let ty = ty.unwrap();
        assert!(ty.is_symmetric());
    }

    #[test]
    fn test_missing_prefix() {
        let err = MatrixType::parse_banner("matrix coordinate real general").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_missing_token() {
        let err = MatrixType::parse_banner("%%MatrixMarket matrix coordinate real").unwrap_err();
        assert!(err.to_string().contains("symmetry"));
    }

    #[test]
    fn test_unknown_token() {
        let err = MatrixType::parse_banner("%%MatrixMarket matrix sparse real general");
        let err = err.unwrap_err();
        assert!(err.to_string().contains("'sparse'"));
    }

    #[test]
    fn test_display_roundtrips_tokens() {
        let ty = MatrixType::real_general()
            .with_field(Field::Pattern)
            .with_symmetry(Symmetry::SkewSymmetric);
        assert_eq!(ty.to_string(), "matrix coordinate pattern skew-symmetric");
    }
}
