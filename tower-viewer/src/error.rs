use thiserror::Error;

/// Recoverable viewer failures. None of these stop the app; they are logged
/// or returned to the front end as JSON-RPC errors.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to load mesh metadata from {path}: {reason}")]
    MetadataLoad { path: String, reason: String },

    #[error("invalid parameters for {method}: {source}")]
    InvalidParams {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown vertical direction '{0}', expected up, down, top or bottom")]
    UnknownDirection(String),

    #[error("no unit with id '{0}' in the current selection")]
    UnitNotFound(String),
}

impl ViewerError {
    /// JSON-RPC 2.0 error code for this failure.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::InvalidParams { .. } | Self::UnknownDirection(_) | Self::UnitNotFound(_) => {
                -32602
            }
            Self::MetadataLoad { .. } => -32603,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_errors_map_to_invalid_params() {
        let err = ViewerError::UnknownDirection("sideways".into());
        assert_eq!(err.rpc_code(), -32602);
        assert!(err.to_string().contains("sideways"));

        let load = ViewerError::MetadataLoad {
            path: "glb.json".into(),
            reason: "404".into(),
        };
        assert_eq!(load.rpc_code(), -32603);
    }
}
