/// Duration of one simulation step, in seconds.
pub const TIME_STEP: f64 = 1. / 60.;

/// Below this distance (world units) a step is considered without translation.
pub const TRANSLATION_EPSILON: f64 = 1e-5;
/// Below this angle (radians) a step is considered without rotation.
pub const ROTATION_EPSILON: f64 = 1e-5;

/// World units travelled in one step at full forward command.
pub const LINEAR_SPEED_RATIO: f64 = 3.0;
/// Radians turned in one step at full rotation command.
pub const ANGULAR_SPEED_RATIO: f64 = 0.06;
