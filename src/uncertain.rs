use std::{
    fmt,
    ops::{Add, Div, Mul, Sub},
};

use approx::{AbsDiffEq, RelativeEq};

/// A value with a symmetric standard deviation
///
/// Arithmetic between two `Uncertain` values assumes they are independent and
/// combines their variances to first order. Scaling by an exact `f64`
/// scales the deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uncertain {
    pub mean: f64,
    pub sd: f64,
}
impl Uncertain {
    /// The deviation is stored as its absolute value
    pub fn new(mean: f64, sd: f64) -> Self {
        Self { mean, sd: sd.abs() }
    }

    pub fn exact(mean: f64) -> Self {
        Self { mean, sd: 0.0 }
    }

    pub fn variance(&self) -> f64 {
        self.sd * self.sd
    }

    /// Standard deviation relative to the magnitude of the mean
    pub fn relative_sd(&self) -> f64 {
        self.sd / self.mean.abs()
    }
}

impl Add for Uncertain {
    type Output = Uncertain;
    fn add(self, rhs: Uncertain) -> Uncertain {
        Uncertain::new(self.mean + rhs.mean, (self.variance() + rhs.variance()).sqrt())
    }
}

impl Sub for Uncertain {
    type Output = Uncertain;
    fn sub(self, rhs: Uncertain) -> Uncertain {
        Uncertain::new(self.mean - rhs.mean, (self.variance() + rhs.variance()).sqrt())
    }
}

impl Mul for Uncertain {
    type Output = Uncertain;
    /// d(ab) = b da + a db
    fn mul(self, rhs: Uncertain) -> Uncertain {
        let from_lhs = rhs.mean * self.sd;
        let from_rhs = self.mean * rhs.sd;
        Uncertain::new(self.mean * rhs.mean, from_lhs.hypot(from_rhs))
    }
}

impl Div for Uncertain {
    type Output = Uncertain;
    /// d(a/b) = da / b - a db / b^2
    fn div(self, rhs: Uncertain) -> Uncertain {
        let from_lhs = self.sd / rhs.mean;
        let from_rhs = self.mean * rhs.sd / (rhs.mean * rhs.mean);
        Uncertain::new(self.mean / rhs.mean, from_lhs.hypot(from_rhs))
    }
}

impl Mul<f64> for Uncertain {
    type Output = Uncertain;
    fn mul(self, rhs: f64) -> Uncertain {
        Uncertain::new(self.mean * rhs, self.sd * rhs)
    }
}

impl Div<f64> for Uncertain {
    type Output = Uncertain;
    fn div(self, rhs: f64) -> Uncertain {
        Uncertain::new(self.mean / rhs, self.sd / rhs)
    }
}

impl fmt::Display for Uncertain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(
                f,
                "{:.*}+/-{:.*}",
                precision, self.mean, precision, self.sd
            ),
            None => write!(f, "{}+/-{}", self.mean, self.sd),
        }
    }
}

impl AbsDiffEq for Uncertain {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.mean.abs_diff_eq(&other.mean, epsilon) && self.sd.abs_diff_eq(&other.sd, epsilon)
    }
}

impl RelativeEq for Uncertain {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.mean.relative_eq(&other.mean, epsilon, max_relative)
            && self.sd.relative_eq(&other.sd, epsilon, max_relative)
    }
}
