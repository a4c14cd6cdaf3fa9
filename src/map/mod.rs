//! The terminal map engine: camera and projection, earthquake clustering,
//! declarative style layers, and the `MapView` that draws them and answers
//! "what is under this cell?".

pub mod camera;
pub mod cluster;
pub mod style;
pub mod view;

pub use camera::{Camera, CameraCommand, Viewport};
pub use cluster::{ClusterId, ClusterIndex, ClusterSource, MapFeature};
pub use style::{magnitude_legend, LegendItem, STYLE_LAYERS};
pub use view::{MapView, Scene, ZOOM_STEP};
