use std::f64::consts::PI;

pub fn rad2deg(angle: f64) -> f64 {
    angle * 180. / PI
}

pub fn deg2rad(angle: f64) -> f64 {
    angle * PI / 180.
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn conversions() {
        assert!((super::rad2deg(FRAC_PI_2) - 90.).abs() < 1e-12);
        assert!((super::deg2rad(180.) - std::f64::consts::PI).abs() < 1e-12);
    }
}
