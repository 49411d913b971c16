/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when assembling or mutating a world graph.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The requested location id does not exist in the graph.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// A location with the same id already exists.
    #[error("location already exists: \"{0}\"")]
    DuplicateLocation(String),

    /// A connection references a location that does not exist.
    #[error("connection from \"{from}\" references unknown location \"{to}\"")]
    DanglingConnection {
        /// The source of the connection.
        from: String,
        /// The missing destination.
        to: String,
    },

    /// A replacement location map does not cover every connected location.
    #[error("replacement locations are missing \"{0}\"")]
    MissingReplacement(String),
}
