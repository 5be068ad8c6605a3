//! Mean direction of angles given in degrees.

/// Computes the vector mean of `degrees`, skipping missing values.
///
/// The result lies in `[0, 360)`. Returns `None` when no value is present.
/// An arithmetic mean is wrong near the wrap: 350° and 10° average to 0°,
/// not 180°.
///
/// # Examples
///
/// ```
/// use buoycast::circular_mean;
///
/// let mean = circular_mean([Some(350.0), Some(10.0)]).unwrap();
/// assert!(mean < 1e-9 || 360.0 - mean < 1e-9);
/// assert_eq!(circular_mean([None, None]), None);
/// ```
pub fn circular_mean<I>(degrees: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (count, sin_sum, cos_sum) = degrees
        .into_iter()
        .flatten()
        .map(f64::to_radians)
        .fold((0usize, 0.0, 0.0), |(count, sin_sum, cos_sum), radians| {
            (count + 1, sin_sum + radians.sin(), cos_sum + radians.cos())
        });
    if count == 0 {
        return None;
    }
    let n = count as f64;
    let degrees = (sin_sum / n).atan2(cos_sum / n).to_degrees();
    Some((degrees + 360.0) % 360.0)
}

/// Arithmetic mean of the present values, `None` when there are none.
pub fn arithmetic_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (count, sum) = values
        .into_iter()
        .flatten()
        .fold((0usize, 0.0), |(count, sum), value| (count + 1, sum + value));
    (count > 0).then(|| sum / count as f64)
}
