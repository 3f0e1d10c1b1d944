//! Statistics used by the comparison figures.
//!
//! Missing values (`NaN`) are skipped by the order statistics ([`quantile`], [`nan_min`],
//! [`nan_max`]) but not by the moment-based ones; callers select complete rows first
//! (see [`crate::meta::MetaTable::complete_rows`]).
//!
//! # Confidence ellipse
//!
//! [`confidence_ellipse`] draws the `n`-sigma covariance ellipse of two samples. For
//! correlation $\rho$ the unit ellipse with semi-axes $\sqrt{1+\rho}$ and $\sqrt{1-\rho}$ is
//! rotated by 45°, scaled by $n\sigma_x$ horizontally and $n\sigma_y$ vertically and moved to
//! the sample means. Its area is $\pi n^2 \sigma_x \sigma_y \sqrt{1-\rho^2}$.

use crate::errors::{IamError, IamResult};
use crate::FloatValue;
use nalgebra::{Matrix2, Rotation2, Vector2};
use ndarray::Array1;
use std::f64::consts::FRAC_PI_4;

/// Number of points per half of the ellipse used by the figures
pub const DEFAULT_ELLIPSE_POINTS: usize = 300;

/// Arithmetic mean.
pub fn mean(values: &[FloatValue]) -> IamResult<FloatValue> {
    if values.is_empty() {
        return Err(IamError::NotEnoughValues {
            required: 1,
            actual: 0,
        });
    }
    Ok(values.iter().sum::<FloatValue>() / values.len() as FloatValue)
}

/// Sample covariance matrix (normalised by `n - 1`) of two equally long samples.
pub fn sample_covariance(x: &[FloatValue], y: &[FloatValue]) -> IamResult<Matrix2<FloatValue>> {
    if x.len() != y.len() {
        return Err(IamError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(IamError::NotEnoughValues {
            required: 2,
            actual: x.len(),
        });
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    let ddof = (x.len() - 1) as FloatValue;
    Ok(Matrix2::new(sxx / ddof, sxy / ddof, sxy / ddof, syy / ddof))
}

/// Quantile `q` (0..=1) with linear interpolation between order statistics.
///
/// `NaN` values are ignored. Returns `None` if no values remain or `q` is out of range.
pub fn quantile(values: &[FloatValue], q: FloatValue) -> Option<FloatValue> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted: Vec<FloatValue> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q * (sorted.len() - 1) as FloatValue;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as FloatValue;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Several quantiles of the same values.
pub fn quantiles(values: &[FloatValue], qs: &[FloatValue]) -> Vec<Option<FloatValue>> {
    qs.iter().map(|&q| quantile(values, q)).collect()
}

/// Smallest non-missing value
pub fn nan_min(values: &[FloatValue]) -> Option<FloatValue> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(FloatValue::min)
}

/// Largest non-missing value
pub fn nan_max(values: &[FloatValue]) -> Option<FloatValue> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(FloatValue::max)
}

/// A closed curve as two coordinate sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub x: Array1<FloatValue>,
    pub y: Array1<FloatValue>,
}

impl Ellipse {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Enclosed area using the shoelace formula
    pub fn area(&self) -> FloatValue {
        let n = self.x.len();
        let twice_area: FloatValue = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                self.x[i] * self.y[j] - self.x[j] * self.y[i]
            })
            .sum();
        twice_area.abs() / 2.0
    }

    pub fn x_max(&self) -> Option<FloatValue> {
        nan_max(self.x.as_slice()?)
    }

    pub fn y_min(&self) -> Option<FloatValue> {
        nan_min(self.y.as_slice()?)
    }

    pub fn y_max(&self) -> Option<FloatValue> {
        nan_max(self.y.as_slice()?)
    }
}

/// Axis-aligned ellipse with semi-axes `a` (x) and `b` (y).
///
/// `npoints` x values are spread evenly over `[-a, a]`; the upper half is traced left to
/// right and the lower half right to left, giving `2 * npoints` points.
pub fn ellipse(a: FloatValue, b: FloatValue, npoints: usize) -> Ellipse {
    let x = Array1::linspace(-a, a, npoints);
    let upper: Array1<FloatValue> = x.mapv(|xi| {
        let t = if a > 0.0 { xi / a } else { 0.0 };
        b * (1.0 - t * t).max(0.0).sqrt()
    });

    let x_back: Vec<FloatValue> = x.iter().rev().copied().collect();
    let lower_back: Vec<FloatValue> = upper.iter().rev().map(|y| -y).collect();

    Ellipse {
        x: x.iter().copied().chain(x_back).collect(),
        y: upper.iter().copied().chain(lower_back).collect(),
    }
}

/// Rotate every point counter-clockwise by `theta` radians around the origin.
pub fn rotate(curve: &Ellipse, theta: FloatValue) -> Ellipse {
    let rotation = Rotation2::new(theta);
    let (x, y): (Vec<FloatValue>, Vec<FloatValue>) = curve
        .x
        .iter()
        .zip(curve.y.iter())
        .map(|(&x, &y)| {
            let p = rotation * Vector2::new(x, y);
            (p.x, p.y)
        })
        .unzip();
    Ellipse {
        x: Array1::from(x),
        y: Array1::from(y),
    }
}

/// The `nsigma` confidence ellipse of two samples.
///
/// # Errors
///
/// Fails if the samples differ in length, have fewer than two values, `npoints < 2`, or
/// either sample is constant (the correlation is then undefined).
pub fn confidence_ellipse(
    x_values: &[FloatValue],
    y_values: &[FloatValue],
    nsigma: FloatValue,
    npoints: usize,
) -> IamResult<Ellipse> {
    if npoints < 2 {
        return Err(IamError::NotEnoughValues {
            required: 2,
            actual: npoints,
        });
    }
    let covariance = sample_covariance(x_values, y_values)?;
    let mu_x = mean(x_values)?;
    let mu_y = mean(y_values)?;

    let sigma_x = covariance[(0, 0)].sqrt();
    let sigma_y = covariance[(1, 1)].sqrt();
    if sigma_x == 0.0 || sigma_y == 0.0 || sigma_x.is_nan() || sigma_y.is_nan() {
        return Err(IamError::DegenerateInput(format!(
            "correlation is undefined for constant samples (sigma_x={sigma_x}, sigma_y={sigma_y})"
        )));
    }
    let rho = (covariance[(0, 1)] / (sigma_x * sigma_y)).clamp(-1.0, 1.0);

    let unit = ellipse((1.0 + rho).sqrt(), (1.0 - rho).sqrt(), npoints);
    let rotated = rotate(&unit, FRAC_PI_4);

    Ok(Ellipse {
        x: rotated.x.mapv(|x| nsigma * sigma_x * x + mu_x),
        y: rotated.y.mapv(|y| nsigma * sigma_y * y + mu_y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_mean_and_covariance() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert_relative_eq!(mean(&x).unwrap(), 2.5);
        let cov = sample_covariance(&x, &y).unwrap();
        assert_relative_eq!(cov[(0, 0)], 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(cov[(1, 1)], 20.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(cov[(0, 1)], 10.0 / 3.0, epsilon = 1e-12);
        assert_eq!(cov[(0, 1)], cov[(1, 0)]);

        assert!(mean(&[]).is_err());
        assert!(matches!(
            sample_covariance(&x, &y[..2]),
            Err(IamError::LengthMismatch { x: 4, y: 2 })
        ));
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values = [4.0, f64::NAN, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_relative_eq!(quantile(&values, 0.5).unwrap(), 2.5);
        // position 0.16 * 3 = 0.48
        assert_relative_eq!(quantile(&values, 0.16).unwrap(), 1.48, epsilon = 1e-12);
        assert_relative_eq!(quantile(&values, 0.84).unwrap(), 3.52, epsilon = 1e-12);
        assert_eq!(quantile(&[f64::NAN], 0.5), None);
        assert_eq!(quantile(&values, 1.5), None);

        let qs = quantiles(&values, &[0.0, 1.0]);
        assert_eq!(qs, vec![Some(1.0), Some(4.0)]);
    }

    #[test]
    fn test_nan_min_max() {
        let values = [f64::NAN, 3.0, -1.0, 2.0];
        assert_eq!(nan_min(&values), Some(-1.0));
        assert_eq!(nan_max(&values), Some(3.0));
        assert_eq!(nan_max(&[f64::NAN]), None);
    }

    #[test]
    fn test_ellipse_shape() {
        let curve = ellipse(2.0, 1.0, 5);
        assert_eq!(curve.len(), 10);
        assert_eq!(curve.x[0], -2.0);
        assert_eq!(curve.x[9], -2.0);
        assert_relative_eq!(curve.y[2], 1.0);
        assert_relative_eq!(curve.y[7], -1.0);
        for (x, y) in curve.x.iter().zip(curve.y.iter()) {
            assert_relative_eq!((x / 2.0).powi(2) + y.powi(2), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_of_circle_stays_on_circle() {
        let circle = ellipse(1.0, 1.0, 50);
        let rotated = rotate(&circle, FRAC_PI_4);
        for (x, y) in rotated.x.iter().zip(rotated.y.iter()) {
            assert_relative_eq!(x * x + y * y, 1.0, epsilon = 1e-12);
        }
        let quarter = rotate(
            &Ellipse {
                x: Array1::from(vec![1.0]),
                y: Array1::from(vec![0.0]),
            },
            FRAC_PI_4,
        );
        assert_relative_eq!(quarter.x[0], 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(quarter.y[0], 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_uncorrelated_samples_give_scaled_circle() {
        let x = [1.0, 1.0, -1.0, -1.0];
        let y = [3.0, -1.0, 3.0, -1.0];
        let nsigma = 2.0;
        let curve = confidence_ellipse(&x, &y, nsigma, 100).unwrap();
        assert_eq!(curve.len(), 200);

        let sigma_x = (4.0_f64 / 3.0).sqrt();
        let sigma_y = (16.0_f64 / 3.0).sqrt();
        for (px, py) in curve.x.iter().zip(curve.y.iter()) {
            let u = px / (nsigma * sigma_x);
            let v = (py - 1.0) / (nsigma * sigma_y);
            assert_relative_eq!(u * u + v * v, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_area_matches_bivariate_formula() {
        let x = [0.1, 0.5, 0.9, 1.4, 2.2, 2.5, 3.1];
        let y = [1.0, 0.7, 1.6, 1.2, 2.4, 1.9, 2.8];
        let cov = sample_covariance(&x, &y).unwrap();
        let sigma_x = cov[(0, 0)].sqrt();
        let sigma_y = cov[(1, 1)].sqrt();
        let rho = cov[(0, 1)] / (sigma_x * sigma_y);

        let curve = confidence_ellipse(&x, &y, 1.0, DEFAULT_ELLIPSE_POINTS).unwrap();
        let expected = PI * sigma_x * sigma_y * (1.0 - rho * rho).sqrt();
        assert_relative_eq!(curve.area(), expected, max_relative = 1e-3);

        let curve = confidence_ellipse(&x, &y, 2.0, DEFAULT_ELLIPSE_POINTS).unwrap();
        assert_relative_eq!(curve.area(), 4.0 * expected, max_relative = 1e-3);
    }

    #[test]
    fn test_perfect_correlation_degenerates_to_line() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        let curve = confidence_ellipse(&x, &y, 1.0, DEFAULT_ELLIPSE_POINTS).unwrap();
        assert_eq!(curve.len(), 2 * DEFAULT_ELLIPSE_POINTS);
        assert!(curve.x.iter().all(|v| v.is_finite()));
        assert!(curve.y.iter().all(|v| v.is_finite()));
        for (px, py) in curve.x.iter().zip(curve.y.iter()) {
            assert_relative_eq!(*px, *py, epsilon = 1e-12);
        }
        assert_relative_eq!(curve.area(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_constant_input_is_rejected() {
        let res = confidence_ellipse(&[1.0, 1.0, 1.0], &[0.0, 1.0, 2.0], 2.0, 10);
        assert!(matches!(res, Err(IamError::DegenerateInput(_))));
        let res = confidence_ellipse(&[1.0], &[0.0], 2.0, 10);
        assert!(matches!(res, Err(IamError::NotEnoughValues { .. })));
        let res = confidence_ellipse(&[0.0, 1.0], &[0.0, 1.0], 2.0, 1);
        assert!(matches!(res, Err(IamError::NotEnoughValues { .. })));
    }
}
