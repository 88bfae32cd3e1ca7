mod support;

use support::aiff::{aiff_bytes, write_test_aiff};
use tempfile::tempdir;
use tensaudio::codec::{self, framing};
use tensaudio::{DecodedAudio, decompress, load};

const STEREO: [i16; 6] = [100, -100, i16::MAX, i16::MIN, 1, -1];

fn assert_stereo_fixture(audio: &DecodedAudio<i32>) {
    assert_eq!(audio.sample_rate, 11_025);
    assert_eq!(audio.samples.dim(), (3, 2));
    assert_eq!(audio.samples[[0, 0]], 100 << 16);
    assert_eq!(audio.samples[[0, 1]], -100 << 16);
    assert_eq!(audio.samples[[1, 0]], i32::from(i16::MAX) << 16);
    assert_eq!(audio.samples[[1, 1]], i32::MIN);
    assert_eq!(audio.samples[[2, 0]], 1 << 16);
    assert_eq!(audio.samples[[2, 1]], -1 << 16);
}

#[test]
fn aiff_file_decodes_onto_the_32_bit_scale() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stereo.aiff");
    write_test_aiff(&path, 2, 11_025, &STEREO);

    let audio: DecodedAudio<i32> = load(&path).unwrap();
    assert_stereo_fixture(&audio);
}

#[test]
fn unhinted_aiff_bytes_are_probed() {
    let bytes = aiff_bytes(2, 11_025, &STEREO);
    let audio: DecodedAudio<i32> = codec::decode_bytes(&bytes, None).unwrap();
    assert_stereo_fixture(&audio);
}

#[test]
fn aiff_mono_rate_and_float_view() {
    let bytes = aiff_bytes(1, 48_000, &[16_384, -16_384, 0, 8_192]);
    let audio: DecodedAudio<f64> = codec::decode_bytes(&bytes, Some("aiff")).unwrap();
    assert_eq!(audio.sample_rate, 48_000);
    assert_eq!(audio.channels(), 1);
    let column = audio.samples.column(0).to_vec();
    assert_eq!(column, vec![1_073_741_824.0, -1_073_741_824.0, 0.0, 536_870_912.0]);
}

#[test]
fn prefix_caps_a_framed_aiff_stream() {
    let buffer = framing::frame(4, &aiff_bytes(2, 11_025, &STEREO));
    let audio: DecodedAudio<i32> = decompress(&buffer, "aiff").unwrap();
    assert_eq!(audio.samples.dim(), (2, 2));
    assert_eq!(audio.samples[[1, 1]], i32::MIN);
}
