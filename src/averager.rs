use core::time::Duration;

use libm::pow;
use log::{trace, warn};
use nalgebra::{Matrix4, Quaternion, UnitQuaternion, Vector4};

use crate::eigen::{dominant_eigenvector, NalgebraEigenSolver};
use crate::error::SmoothingError;
use crate::traits::SymmetricEigenSolver;

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothingParams {
    /// Per-second decay of the data term. Smaller reacts faster.
    pub data_smoothing: f32,
    /// Per-second decay of the trend term. Larger keeps the trend longer.
    pub trend_smoothing: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            data_smoothing: 0.1,
            trend_smoothing: 0.9,
        }
    }
}

impl SmoothingParams {
    /// Checks that both rates lie in the open interval `(0, 1)`.
    ///
    /// The averager never calls this itself; out-of-range values are accepted
    /// and simply produce a diverging or frozen accumulator.
    pub fn validate(&self) -> Result<(), SmoothingError> {
        check_unit_interval("data_smoothing", self.data_smoothing)?;
        check_unit_interval("trend_smoothing", self.trend_smoothing)
    }
}

fn check_unit_interval(name: &'static str, value: f32) -> Result<(), SmoothingError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SmoothingError::InvalidParameter { name, value })
    }
}

#[derive(Debug, Clone)]
struct Accumulator {
    sum: Matrix4<f64>,
    previous_sum: Matrix4<f64>,
    prediction: Matrix4<f64>,
}

impl Accumulator {
    fn zeros() -> Self {
        let sum = Matrix4::zeros();
        Self {
            sum,
            previous_sum: sum,
            prediction: Matrix4::zeros(),
        }
    }

    #[inline]
    fn update(&mut self, sample: &Vector4<f64>, s_data: f64, s_trend: f64) {
        self.previous_sum = self.sum;
        self.sum = (self.sum + self.prediction) * s_data
            + sample * sample.transpose() * (1.0 - s_data);
        self.prediction =
            self.prediction * s_trend + (self.sum - self.previous_sum) * (1.0 - s_trend);
    }
}

/// Double exponential smoothing of a quaternion stream.
///
/// Every sample contributes its outer product `q·qᵀ` to a 4x4 accumulator, so
/// `q` and `-q` count as the same rotation. The average is the eigenvector of
/// the accumulator's largest eigenvalue. Decay rates are expressed per second
/// and raised to the elapsed time, which keeps the result independent of the
/// update rate.
///
/// Callers are responsible for the preconditions: both smoothing rates in
/// `(0, 1)`, `delta_time >= 0` and samples of roughly unit length. None of
/// them is checked; violating them corrupts the accumulator or yields NaN.
#[derive(Debug, Clone)]
pub struct QuaternionAverager<S = NalgebraEigenSolver> {
    params: SmoothingParams,
    solver: S,
    accumulator: Option<Accumulator>,
    average: Option<UnitQuaternion<f32>>,
}

impl Default for QuaternionAverager {
    fn default() -> Self {
        QuaternionAverager::with_params(SmoothingParams::default())
    }
}

impl QuaternionAverager {
    pub fn new(data_smoothing: f32, trend_smoothing: f32) -> Self {
        QuaternionAverager::with_params(SmoothingParams {
            data_smoothing,
            trend_smoothing,
        })
    }

    pub fn with_params(params: SmoothingParams) -> Self {
        QuaternionAverager::with_solver(params, NalgebraEigenSolver::default())
    }
}

impl<S: SymmetricEigenSolver> QuaternionAverager<S> {
    pub fn with_solver(params: SmoothingParams, solver: S) -> Self {
        QuaternionAverager {
            params,
            solver,
            accumulator: None,
            average: None,
        }
    }

    pub fn params(&self) -> &SmoothingParams {
        &self.params
    }

    /// Last average returned by [`add`](Self::add), if any.
    pub fn orientation(&self) -> Option<UnitQuaternion<f32>> {
        self.average
    }

    pub fn is_initialized(&self) -> bool {
        self.accumulator.is_some()
    }

    pub fn sum(&self) -> Option<&Matrix4<f64>> {
        self.accumulator.as_ref().map(|acc| &acc.sum)
    }

    pub fn prediction(&self) -> Option<&Matrix4<f64>> {
        self.accumulator.as_ref().map(|acc| &acc.prediction)
    }

    /// Forgets all history; the next sample starts from an empty accumulator.
    pub fn reset(&mut self) {
        trace!("quaternion averager reset");
        self.accumulator = None;
        self.average = None;
    }

    /// Feeds one sample observed `delta_time` seconds after the previous one
    /// and returns the smoothed orientation.
    ///
    /// A `delta_time` of zero gives the sample no weight. The accumulator is
    /// updated even when the eigendecomposition fails afterwards.
    pub fn add(
        &mut self,
        sample: Quaternion<f32>,
        delta_time: f32,
    ) -> Result<UnitQuaternion<f32>, SmoothingError> {
        let s_data = decay(self.params.data_smoothing, delta_time);
        let s_trend = decay(self.params.trend_smoothing, delta_time);

        let accumulator = self.accumulator.get_or_insert_with(|| {
            trace!("quaternion averager accumulator initialized");
            Accumulator::zeros()
        });
        accumulator.update(&sample.coords.cast::<f64>(), s_data, s_trend);

        let Some((eigenvalues, eigenvectors)) = self.solver.decompose(&accumulator.sum) else {
            warn!(
                "eigendecomposition failed to converge (delta_time = {}, sample = {:?})",
                delta_time, sample.coords
            );
            return Err(SmoothingError::EigenDecomposition);
        };

        let dominant = dominant_eigenvector(&eigenvalues, &eigenvectors);
        let average =
            UnitQuaternion::from_quaternion(Quaternion::from_vector(dominant.cast::<f32>()));
        self.average = Some(average);
        Ok(average)
    }

    pub fn add_elapsed(
        &mut self,
        sample: Quaternion<f32>,
        elapsed: Duration,
    ) -> Result<UnitQuaternion<f32>, SmoothingError> {
        self.add(sample, elapsed.as_secs_f32())
    }
}

/// Per-step decay for a per-second `rate` over `delta_time` seconds.
#[inline]
fn decay(rate: f32, delta_time: f32) -> f64 {
    pow(f64::from(rate), f64::from(delta_time))
}
