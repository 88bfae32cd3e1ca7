use rustfft::FftPlanner;
use rustfft::num_complex::Complex64;

/// One-sided spectrum (DC first) of a real frame, via a full complex FFT.
pub fn one_sided_spectrum(frame: &[f64]) -> Vec<Complex64> {
    let mut buffer: Vec<Complex64> = frame.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    FftPlanner::new()
        .plan_fft_forward(frame.len())
        .process(&mut buffer);
    buffer.truncate(frame.len() / 2 + 1);
    buffer
}

/// Deterministic test signal mixing a few partials.
pub fn chirpy_signal(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            (0.3 * t).sin() * 100.0 + (1.7 * t).cos() * 40.0 + (i % 7) as f64
        })
        .collect()
}
