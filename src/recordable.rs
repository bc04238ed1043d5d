/*!
The Recordable module defines the [`Recordable`] trait which provides method
to save the state of a struct to be analysed afterward.
*/

/// Trait providing save state method.
///
/// The generic `RecordType` is the Record which is produced.
/// See structs like [`RobotRecord`](crate::robot::RobotRecord) or
/// [`OdometrySensorRecord`](crate::sensors::odometry_sensor::OdometrySensorRecord).
///
/// The Record should contain the elements worth to be used in the result
/// analysis.
pub trait Recordable<RecordType> {
    /// Generate the current state Record.
    fn record(&self) -> RecordType;
}
