use std::io::Cursor;
use std::path::Path;

/// Interleaved integer WAV bytes at the given precision.
pub fn wav_bytes(channels: u16, sample_rate: u32, bits_per_sample: u16, samples: &[i32]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("create wav writer");
        for &sample in samples {
            writer.write_sample(sample).expect("write wav sample");
        }
        writer.finalize().expect("finalize wav");
    }
    cursor.into_inner()
}

pub fn write_test_wav(
    path: &Path,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    samples: &[i32],
) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create wav parent dirs");
    }
    std::fs::write(path, wav_bytes(channels, sample_rate, bits_per_sample, samples))
        .expect("write wav file");
}
