mod support;

use std::f64::consts::PI;

use ndarray::{Array1, Array2, Array3};
use support::reference::{chirpy_signal, one_sided_spectrum};
use tensaudio::stft::{bin_count, frame_count};
use tensaudio::{StftError, StftParams, WindowType, stft, stft_mono};

fn assert_close(actual: f64, expected: f64, context: &str) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{context}: {actual} != {expected}"
    );
}

/// Check every frame of `out` against a reference FFT of the tapered frame.
fn assert_matches_reference(
    out: &Array3<f64>,
    signal: &[f64],
    params: &StftParams,
    taper: impl Fn(usize) -> f64,
) {
    let bins = bin_count(params.window_size);
    for (frame_idx, frame) in out.outer_iter().enumerate() {
        let start = frame_idx * params.hop;
        let tapered: Vec<f64> = signal[start..start + params.window_size]
            .iter()
            .enumerate()
            .map(|(k, &x)| x * taper(k))
            .collect();
        let spectrum = one_sided_spectrum(&tapered);
        for k in 0..bins {
            let expected = spectrum[bins - 1 - k];
            let context = format!("frame {frame_idx} bin {k}");
            assert_close(frame[[k, 0]], expected.re, &context);
            assert_close(frame[[k, 1]], expected.im, &context);
        }
    }
}

#[test]
fn output_shape_follows_frame_and_bin_counts() {
    for (len, window_size, hop) in [(8, 4, 4), (9, 4, 4), (1024, 256, 128), (100, 7, 3), (5, 5, 1)] {
        let signal = Array1::from(chirpy_signal(len));
        let params = StftParams::new(window_size, WindowType::Hamming, hop);
        let out = stft_mono(signal.view(), &params).unwrap();
        let frames = (len - window_size) / hop + 1;
        assert_eq!(frame_count(len, window_size, hop), Some(frames));
        assert_eq!(out.dim(), (frames, window_size / 2 + 1, 2));
    }
}

#[test]
fn rectangular_frames_match_reversed_reference_spectrum() {
    let signal = chirpy_signal(300);
    let params = StftParams::new(64, WindowType::Rectangular, 48);
    let out = stft_mono(Array1::from(signal.clone()).view(), &params).unwrap();
    assert_matches_reference(&out, &signal, &params, |_| 1.0);
}

#[test]
fn hann_frames_match_tapered_reference_spectrum() {
    let signal = chirpy_signal(257);
    let params = StftParams::new(33, WindowType::Hann, 16);
    let out = stft_mono(Array1::from(signal.clone()).view(), &params).unwrap();
    let m = (params.window_size - 1) as f64;
    assert_matches_reference(&out, &signal, &params, |k| {
        0.5 - 0.5 * (2.0 * PI * k as f64 / m).cos()
    });
}

#[test]
fn bartlett_frames_match_tapered_reference_spectrum() {
    let signal = chirpy_signal(200);
    let params = StftParams::new(40, WindowType::Bartlett, 40);
    let out = stft_mono(Array1::from(signal.clone()).view(), &params).unwrap();
    let m = (params.window_size - 1) as f64;
    assert_matches_reference(&out, &signal, &params, |k| {
        2.0 / m * (m / 2.0 - (k as f64 - m / 2.0).abs())
    });
}

#[test]
fn ramp_of_eight_samples_with_window_four() {
    let signal: Array2<f64> = Array2::from_shape_fn((8, 1), |(i, _)| i as f64);
    let params = StftParams::from_codes(4, 1, 4).unwrap();
    let out = stft(signal.view(), &params).unwrap();
    assert_eq!(out.dim(), (2, 3, 2));
    // Frame 0 is [0, 1, 2, 3]: DC 6, bin 1 = -2 + 2i, Nyquist -2.
    assert_eq!(out[[0, 0, 0]], -2.0);
    assert_eq!(out[[0, 0, 1]], 0.0);
    assert_close(out[[0, 1, 0]], -2.0, "frame 0 bin 1 re");
    assert_close(out[[0, 1, 1]], 2.0, "frame 0 bin 1 im");
    assert_eq!(out[[0, 2, 0]], 6.0);
    assert_eq!(out[[0, 2, 1]], 0.0);
    // Frame 1 is [4, 5, 6, 7]: only DC changes.
    assert_eq!(out[[1, 2, 0]], 22.0);
    assert_eq!(out[[1, 0, 0]], -2.0);
}

#[test]
fn integer_kinds_truncate_the_float_result() {
    let values = [4_i32, -8, 12, 0, 16, 4, -4, 8];
    let as_i32 = Array1::from(values.to_vec());
    let as_f64 = as_i32.mapv(f64::from);
    let params = StftParams::new(4, WindowType::Rectangular, 2);
    let out_i32 = stft_mono(as_i32.view(), &params).unwrap();
    let out_f64 = stft_mono(as_f64.view(), &params).unwrap();
    assert_eq!(out_i32.dim(), out_f64.dim());
    for (int, float) in out_i32.iter().zip(out_f64.iter()) {
        assert!((f64::from(*int) - float).abs() < 1.0, "{int} vs {float}");
    }
}

#[test]
fn window_size_one_yields_dc_only() {
    let signal = Array1::from(vec![3.0_f64, -1.5, 2.0]);
    for window in [WindowType::Hann, WindowType::Hamming, WindowType::Bartlett] {
        let out = stft_mono(signal.view(), &StftParams::new(1, window, 1)).unwrap();
        assert_eq!(out.dim(), (3, 1, 2));
        assert_eq!(out[[1, 0, 0]], -1.5, "{window}");
    }
}

#[test]
fn rejects_invalid_configurations() {
    let mono = Array2::<f64>::zeros((16, 1));
    let stereo = Array2::<f64>::zeros((16, 2));
    let params = StftParams::new(8, WindowType::Hann, 4);

    assert!(matches!(
        stft(stereo.view(), &params),
        Err(StftError::UnsupportedChannelLayout { channels: 2 })
    ));
    assert!(matches!(
        stft(mono.view(), &StftParams::new(32, WindowType::Hann, 4)),
        Err(StftError::InvalidStride { .. })
    ));
    assert!(matches!(
        stft(mono.view(), &StftParams::new(8, WindowType::Hann, 0)),
        Err(StftError::InvalidStride { .. })
    ));
    assert_eq!(
        StftParams::from_codes(8, 0, 4).unwrap_err(),
        StftError::UnknownWindowType(0)
    );
    assert_eq!(
        StftParams::from_codes(8, 5, 4).unwrap_err(),
        StftError::UnknownWindowType(5)
    );
    assert!(StftParams::from_codes(-8, 3, 4).is_err());
    assert!(StftParams::from_codes(8, 3, -1).is_err());
}
