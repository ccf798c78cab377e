pub mod assets;
pub mod camera;
pub mod core;
pub mod highlight;
pub mod loading;
pub mod scene;
