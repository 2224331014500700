use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanisphereError {
    #[error("Invalid observer parameter: {0}")]
    InvalidObserver(String),

    #[error("Invalid projection parameter: {0}")]
    InvalidProjection(String),

    #[error("Invalid engine configuration: {0}")]
    InvalidEngineConfig(String),

    #[error("Invalid spatial index parameter: {0}")]
    InvalidIndexParameter(String),

    #[error("Unable to parse sidereal time: {0}")]
    SiderealParse(String),

    #[error("Observer carries a sidereal time only; a calendar instant is required")]
    MissingEpoch,

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),
}

impl PartialEq for PlanisphereError {
    fn eq(&self, other: &Self) -> bool {
        use PlanisphereError::*;
        match (self, other) {
            (InvalidObserver(a), InvalidObserver(b)) => a == b,
            (InvalidProjection(a), InvalidProjection(b)) => a == b,
            (InvalidEngineConfig(a), InvalidEngineConfig(b)) => a == b,
            (InvalidIndexParameter(a), InvalidIndexParameter(b)) => a == b,
            (SiderealParse(a), SiderealParse(b)) => a == b,

            // roots::SearchError carries no comparable payload worth distinguishing
            (RootFindingError(_), RootFindingError(_)) => true,

            (MissingEpoch, MissingEpoch) => true,

            _ => false,
        }
    }
}
