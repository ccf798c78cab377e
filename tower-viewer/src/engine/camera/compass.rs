use bevy::prelude::*;
use constants::camera::COMPASS_PUBLISH_THRESHOLD_DEGREES;
use serde_json::json;

use super::viewport_camera::OrbitCamera;
use crate::rpc::web_rpc::WebRpcInterface;

/// Compass needle angle in degrees. It turns opposite to the camera azimuth.
pub fn compass_heading(position: Vec3, target: Vec3) -> f32 {
    let dx = position.x - target.x;
    let dz = position.z - target.z;
    -dx.atan2(dz).to_degrees()
}

#[derive(Resource, Debug, Default)]
pub struct CompassHeading {
    pub degrees: f32,
}

impl CompassHeading {
    /// Store `degrees` if it moved past the publish threshold.
    pub fn update(&mut self, degrees: f32) -> bool {
        if (degrees - self.degrees).abs() <= COMPASS_PUBLISH_THRESHOLD_DEGREES {
            return false;
        }
        self.degrees = degrees;
        true
    }
}

pub fn update_compass(
    orbit: Res<OrbitCamera>,
    mut compass: ResMut<CompassHeading>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let heading = compass_heading(orbit.position, orbit.target);
    if compass.update(heading) {
        rpc_interface.send_notification("compass_changed", json!({ "degrees": compass.degrees }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_is_negated_azimuth() {
        assert!(compass_heading(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO).abs() < 1e-6);
        let east = compass_heading(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        assert!((east + 90.0).abs() < 1e-4);
    }

    #[test]
    fn small_changes_are_throttled() {
        let mut compass = CompassHeading::default();
        assert!(!compass.update(0.4));
        assert_eq!(compass.degrees, 0.0);
        assert!(compass.update(0.6));
        assert!(!compass.update(1.0));
        assert!(compass.update(-3.0));
        assert_eq!(compass.degrees, -3.0);
    }
}
