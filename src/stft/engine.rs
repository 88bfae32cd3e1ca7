use ndarray::{Array3, ArrayView1, ArrayView2, ArrayViewMut2, s};
use realfft::RealFftPlanner;
use rustfft::num_complex::Complex64;

use super::{StftError, StftParams, WindowType};
use crate::sample::Sample;

/// Number of one-sided spectrum bins for a window, DC and Nyquist included.
pub fn bin_count(window_size: usize) -> usize {
    window_size / 2 + 1
}

/// Number of full windows that fit in `length` samples, or `None` when not even one does.
pub fn frame_count(length: usize, window_size: usize, hop: usize) -> Option<usize> {
    if window_size == 0 || hop == 0 || length < window_size {
        return None;
    }
    Some((length - window_size) / hop + 1)
}

/// STFT of a `(samples, channels)` matrix that holds exactly one channel.
///
/// Returns an array shaped `(frames, window_size / 2 + 1, 2)`.
pub fn stft<T: Sample>(
    signal: ArrayView2<'_, T>,
    params: &StftParams,
) -> Result<Array3<T>, StftError> {
    let channels = signal.ncols();
    if channels != 1 {
        return Err(StftError::UnsupportedChannelLayout { channels });
    }
    stft_mono(signal.column(0), params)
}

/// STFT of a mono sample sequence.
pub fn stft_mono<T: Sample>(
    signal: ArrayView1<'_, T>,
    params: &StftParams,
) -> Result<Array3<T>, StftError> {
    params.validate()?;
    let StftParams {
        window_size,
        window_type,
        hop,
    } = *params;
    let length = signal.len();
    let frames = frame_count(length, window_size, hop).ok_or_else(|| StftError::InvalidStride {
        message: format!(
            "a {window_size}-sample window does not fit in a {length}-sample signal"
        ),
    })?;
    let bins = bin_count(window_size);

    let mut planner = RealFftPlanner::<f64>::new();
    let r2c = planner.plan_fft_forward(window_size);
    let mut buffer = r2c.make_input_vec();
    let mut spectrum = r2c.make_output_vec();
    let mut scratch = r2c.make_scratch_vec();
    let taper = match window_type {
        WindowType::Rectangular => None,
        other => Some(other.coefficients(window_size)),
    };

    let mut output = Array3::<T>::default((frames, bins, 2));
    for (frame, out) in output.outer_iter_mut().enumerate() {
        let start = frame * hop;
        let window = signal.slice(s![start..start + window_size]);
        for (slot, &sample) in buffer.iter_mut().zip(window.iter()) {
            *slot = sample.to_f64();
        }
        if let Some(taper) = taper.as_deref() {
            for (slot, coefficient) in buffer.iter_mut().zip(taper) {
                *slot *= coefficient;
            }
        }
        r2c.process_with_scratch(&mut buffer, &mut spectrum, &mut scratch)
            .map_err(|err| StftError::Transform {
                message: err.to_string(),
            })?;
        write_reversed(&spectrum, out);
    }

    tracing::debug!(
        frames,
        bins,
        window_size,
        hop,
        window = window_type.name(),
        kind = %T::KIND,
        "stft complete"
    );
    Ok(output)
}

/// Store `spectrum` highest bin first as (real, imaginary) pairs.
fn write_reversed<T: Sample>(spectrum: &[Complex64], mut out: ArrayViewMut2<'_, T>) {
    for (mut cell, coefficient) in out.outer_iter_mut().zip(spectrum.iter().rev()) {
        cell[0] = T::from_f64(coefficient.re);
        cell[1] = T::from_f64(coefficient.im);
    }
}
