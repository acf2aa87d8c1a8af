use thiserror::Error;

/// Failures while building a catalog from a document.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON catalog error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML catalog error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("faction {faction} lists unknown faction {reference}")]
    UnknownFaction { faction: String, reference: String },
}
