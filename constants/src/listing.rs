/// Unit status labels as they appear in the mesh metadata.
pub const STATUS_AVAILABLE: &str = "Available";
pub const STATUS_RESERVED: &str = "Reserved";
pub const STATUS_SOLD: &str = "Sold";

/// Residence-type filter value that also matches sky villas.
pub const RESIDENCE_DUPLEX: &str = "Duplex";
pub const PROPERTY_TYPE_SKY_VILLAS: &str = "Sky Villas";

/// Price range (in crores) that counts as "no price filter".
pub const DEFAULT_PRICE_RANGE: (f64, f64) = (3.0, 10.0);
