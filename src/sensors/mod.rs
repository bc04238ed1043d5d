/*!
Sensors of the robot.

The only sensor is the [`OdometrySensor`](odometry_sensor::OdometrySensor), a
dead-reckoning odometer which integrates the noisy motion of the body. Its noise is
described by the [`noise_models`].
*/

pub mod noise_models;
pub mod odometry_sensor;
