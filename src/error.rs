use crate::RuleId;
use thiserror::Error;

/// Rejected word forms. Raised before the first stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("reserved character U+FFFF at byte {position}")]
    ReservedCharacter { position: usize },
    #[error("more than one stress marker (second one at byte {position})")]
    MultipleStress { position: usize },
    #[error("stress marker at byte {position} is not followed by a {nucleus}")]
    StressNotBeforeNucleus { position: usize, nucleus: &'static str },
    #[error("length marker at byte {position} does not follow a {nucleus}")]
    LengthNotAfterNucleus { position: usize, nucleus: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("unknown classification '{0}'")]
    UnknownClass(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown classification '{0}'")]
    UnknownClass(String),
    #[error("unterminated classification reference at byte {0}")]
    UnterminatedReference(usize),
    #[error("invalid classification name at byte {0}")]
    InvalidName(usize),
}

impl From<InventoryError> for TemplateError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::UnknownClass(name) => TemplateError::UnknownClass(name),
        }
    }
}

/// Where in a catalogue a derivation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Rule(RuleId),
    Mutation { stage: &'static str, step: usize },
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Rule(id) => write!(f, "rule {id}"),
            Location::Mutation { stage, step } => write!(f, "inventory mutation {stage}#{step}"),
        }
    }
}

/// Any failure that aborts a derivation. No partial output survives one.
#[derive(Debug, Error)]
pub enum DerivationError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    #[error("{location} references unknown classification '{class}'")]
    UnknownClass { location: Location, class: String },
    #[error("{location} has a malformed template: {source}")]
    MalformedTemplate { location: Location, source: TemplateError },
    #[error("{location} resolved to an invalid pattern `{pattern}`: {source}")]
    InvalidPattern { location: Location, pattern: String, source: regex::Error },
}

impl DerivationError {
    pub(crate) fn from_template(location: Location, err: TemplateError) -> Self {
        match err {
            TemplateError::UnknownClass(class) => DerivationError::UnknownClass { location, class },
            other => DerivationError::MalformedTemplate { location, source: other },
        }
    }

    /// The stage/rule the error is attributed to, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            DerivationError::Input(_) => None,
            DerivationError::UnknownClass { location, .. }
            | DerivationError::MalformedTemplate { location, .. }
            | DerivationError::InvalidPattern { location, .. } => Some(*location),
        }
    }
}
