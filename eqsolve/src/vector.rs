use crate::Error;

/// Dense vector of `f64`s.
/// Elementwise arithmetic requires both operands to have exactly the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector(Vec<f64>);

impl Vector {
    /// A vector of `len` zeroes.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Borrow the components.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Take ownership of the components.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Elementwise `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Result<Self, Error> {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Elementwise `self - rhs`.
    pub fn subtract(&self, rhs: &Self) -> Result<Self, Error> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Multiply every component by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        self.0.iter().map(|v| v * factor).collect()
    }

    /// Divide every component by `divisor`.
    pub fn divide(&self, divisor: f64) -> Self {
        self.0.iter().map(|v| v / divisor).collect()
    }

    /// Largest absolute component, i.e. the infinity norm.
    /// Zero for an empty vector.
    pub fn max_abs(&self) -> f64 {
        self.0.iter().map(|v| v.abs()).fold(0.0, libm::fmax)
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self, Error> {
        if self.len() != rhs.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                actual: rhs.len(),
            });
        }
        Ok(self
            .0
            .iter()
            .zip(rhs.0.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::ops::Deref for Vector {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for Vector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<_> = self.0.iter().map(|&v| significant(v, 4)).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Print `value` with at most `digits` significant digits, switching to
/// exponent notation for very large or very small magnitudes.
/// Trailing zeroes are dropped, so `2.0` prints as `2`.
fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };
    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_trailing_zeroes(mantissa),
            exponent.abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_trailing_zeroes(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_trailing_zeroes(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_subtract() {
        let v = Vector::from([1.0, 2.0, 3.0]);
        let ones = Vector::from([1.0, 1.0, 1.0]);
        assert_eq!(v.add(&ones).unwrap(), Vector::from([2.0, 3.0, 4.0]));
        assert_eq!(v.subtract(&ones).unwrap(), Vector::from([0.0, 1.0, 2.0]));
    }

    #[test]
    fn scale_and_divide() {
        let v = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(v.scale(2.0), Vector::from([2.0, 4.0, 6.0]));
        assert_eq!(v.divide(2.0), Vector::from([0.5, 1.0, 1.5]));
    }

    #[test]
    fn mismatched_lengths_fail() {
        let short = Vector::from([1.0, 2.0]);
        let long = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(
            short.add(&long),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert!(long.subtract(&short).is_err());
    }

    #[test]
    fn max_abs() {
        assert_eq!(Vector::from([1.0, -7.5, 3.0]).max_abs(), 7.5);
        assert_eq!(Vector::default().max_abs(), 0.0);
    }

    #[test]
    fn display() {
        assert_eq!(Vector::from([1.0, 2.0, 3.0]).to_string(), "[1, 2, 3]");
        assert_eq!(
            Vector::from([0.5, 4.898979485566356, -12.0]).to_string(),
            "[0.5, 4.899, -12]"
        );
        assert_eq!(Vector::from([123456.0, 0.00001]).to_string(), "[1.235e+05, 1e-05]");
        assert_eq!(Vector::default().to_string(), "[]");
    }
}
