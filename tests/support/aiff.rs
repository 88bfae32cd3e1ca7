use std::path::Path;

/// Big-endian 16-bit AIFF bytes (FORM / COMM / SSND) for interleaved samples.
pub fn aiff_bytes(channels: u16, sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let frames = samples.len() as u32 / u32::from(channels);
    let mut out = Vec::with_capacity(54 + data_len as usize);

    out.extend_from_slice(b"FORM");
    out.extend_from_slice(&(4 + 26 + 16 + data_len).to_be_bytes());
    out.extend_from_slice(b"AIFF");

    out.extend_from_slice(b"COMM");
    out.extend_from_slice(&18_u32.to_be_bytes());
    out.extend_from_slice(&channels.to_be_bytes());
    out.extend_from_slice(&frames.to_be_bytes());
    out.extend_from_slice(&16_u16.to_be_bytes());
    out.extend_from_slice(&extended_rate(sample_rate));

    out.extend_from_slice(b"SSND");
    out.extend_from_slice(&(8 + data_len).to_be_bytes());
    out.extend_from_slice(&0_u32.to_be_bytes());
    out.extend_from_slice(&0_u32.to_be_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_be_bytes());
    }
    out
}

pub fn write_test_aiff(path: &Path, channels: u16, sample_rate: u32, samples: &[i16]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create aiff parent dirs");
    }
    std::fs::write(path, aiff_bytes(channels, sample_rate, samples)).expect("write aiff file");
}

/// 80-bit IEEE extended encoding of a positive integer rate.
fn extended_rate(rate: u32) -> [u8; 10] {
    assert!(rate > 0, "sample rate must be positive");
    let exponent = 31 - rate.leading_zeros();
    let biased = (16_383 + exponent) as u16;
    let mantissa = u64::from(rate) << (63 - exponent);
    let mut out = [0_u8; 10];
    out[..2].copy_from_slice(&biased.to_be_bytes());
    out[2..].copy_from_slice(&mantissa.to_be_bytes());
    out
}
