use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Traversal time in seconds paired with the cost model's weighted cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub secs: f64,
    pub cost: f64,
}

impl Cost {
    pub const fn new(cost: f64, secs: f64) -> Self {
        Cost { secs, cost }
    }

    pub const fn zero() -> Self {
        Cost { secs: 0.0, cost: 0.0 }
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Self::Output {
        Cost {
            secs: self.secs + rhs.secs,
            cost: self.cost + rhs.cost,
        }
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        self.secs += rhs.secs;
        self.cost += rhs.cost;
    }
}

impl Sub for Cost {
    type Output = Cost;

    fn sub(self, rhs: Cost) -> Self::Output {
        Cost {
            secs: self.secs - rhs.secs,
            cost: self.cost - rhs.cost,
        }
    }
}

impl Mul<f64> for Cost {
    type Output = Cost;

    fn mul(self, rhs: f64) -> Self::Output {
        Cost {
            secs: self.secs * rhs,
            cost: self.cost * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_arithmetic() {
        let a = Cost::new(10.0, 5.0);
        let b = Cost::new(4.0, 2.0);

        assert_eq!(a + b, Cost::new(14.0, 7.0));
        assert_eq!(a - b, Cost::new(6.0, 3.0));
        assert_eq!(a * 0.5, Cost::new(5.0, 2.5));

        let mut c = Cost::zero();
        c += a;
        assert_eq!(c, a);
    }
}
