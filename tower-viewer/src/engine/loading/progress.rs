use bevy::prelude::*;
use serde::Serialize;

/// Loading milestones, published to the front end so it can drive its loader.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingProgress {
    pub metadata_loaded: bool,
    pub metadata_failed: bool,
    pub scene_ready: bool,
    pub bounds_computed: bool,
}

impl LoadingProgress {
    /// Metadata is not required: it hydrates the session whenever it lands.
    pub fn model_ready(&self) -> bool {
        self.scene_ready && self.bounds_computed
    }

    pub fn metadata_settled(&self) -> bool {
        self.metadata_loaded || self.metadata_failed
    }
}
