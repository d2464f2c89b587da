use std::fmt;

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    pub fn from_whole(value: i64) -> Self {
        Amount(value * Self::SCALE)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Amount left after taking `percent`% off, the amount off being
    /// rounded half away from zero to the last decimal place.
    pub fn percent_off(self, percent: u8) -> Self {
        let scaled = i128::from(self.0) * i128::from(percent);
        let off = (scaled + scaled.signum() * 50) / 100;
        // |off| <= |self.0| since percent <= 100
        Amount(self.0 - off as i64)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        write!(f, "{sign}{whole}.{frac:04}")
    }
}
