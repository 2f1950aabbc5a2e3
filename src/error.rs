use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No usable matchup data for patch {0}")]
    DataUnavailable(String),

    #[error("No patch folders found under {0}")]
    NoPatches(String),

    #[error("Unknown patch '{0}'. Use --list-patches to see what is available")]
    UnknownPatch(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("No enemy picks provided. Use --enemy <slug[=weight]>")]
    NoEnemies,

    #[error("Too many enemy picks: {0} given, at most 5")]
    TooManyEnemies(usize),

    #[error("Invalid enemy pick '{0}'. Use format: slug or slug=weight")]
    InvalidEnemyPick(String),

    #[error("Weight {0} out of range, expected 0..=1")]
    InvalidWeight(f64),

    #[error("Unknown role '{0}'. Valid roles: carry, mid, offlane, support, hard-support")]
    UnknownRole(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
