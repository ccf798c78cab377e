/// Building model with its surroundings.
pub const MODEL_PATH: &str = "models/skyven_with_surroundings.glb";

/// Mesh metadata keyed by mesh name.
pub const METADATA_PATH: &str = "glb.json";

pub const FLOOR_PLAN_ONE: &str = "models/floorplans/one.glb";
pub const FLOOR_PLAN_TWO: &str = "models/floorplans/two.glb";
pub const FLOOR_PLAN_THREE: &str = "models/floorplans/three.glb";
pub const FLOOR_PLAN_FOUR: &str = "models/floorplans/four.glb";
pub const FLOOR_PLAN_DUPLEX: &str = "models/floorplans/duplex.glb";
pub const FLOOR_PLAN_DEFAULT: &str = "models/skyven_data.glb";

pub const PROPERTY_ROUTE: &str = "/v3/property";
pub const FLOOR_PLAN_ROUTE: &str = "/skyven-data";
