pub mod camera;
pub mod spacing;

pub use camera::{
    CameraAngle, FieldOfView, Footprint, ShotPrediction, camera_pitch_for_target,
    compass_direction, ground_footprint, ground_sample_distance, oblique_field_of_view,
    predict_shot_coverage,
};
pub use spacing::{PhotoEstimate, Spacing, estimate_photos_needed, photo_spacing};
