mod options;

use std::path::Path;

use ndarray::s;
use serde::Serialize;
use tensaudio::codec::{self, DecodedAudio, EncodeOptions};
use tensaudio::config::{self, Settings};
use tensaudio::{Sample, SampleKind, StftParams, logging};

use options::{Command, StftArgs};

pub(super) fn run(args: Vec<String>) -> Result<(), String> {
    let Some(options) = options::parse_args(args)? else {
        return Ok(());
    };
    if let Err(err) = logging::init(options.log_file) {
        eprintln!("Logging disabled: {err}");
    }
    let config_file = options.config.as_deref();
    let settings = || load_settings(config_file);

    match options.command {
        Command::Info { input } => info(&input),
        Command::Stft(args) => stft(&args, &settings()?),
        Command::Convert {
            input,
            output,
            bits,
        } => {
            let audio = load_exact(&input)?;
            codec::save_with_options(
                &output,
                audio.samples.view(),
                "wav",
                audio.sample_rate,
                &encode_options(&settings()?, bits),
            )
            .map_err(|err| err.to_string())?;
            println!(
                "Wrote {} ({} frames x {} channels)",
                output.display(),
                audio.frames(),
                audio.channels()
            );
            Ok(())
        }
        Command::Compress {
            input,
            output,
            bits,
        } => {
            let audio = load_exact(&input)?;
            let buffer = codec::compress_with_options(
                audio.samples.view(),
                "wav",
                audio.sample_rate,
                &encode_options(&settings()?, bits),
            )
            .map_err(|err| err.to_string())?;
            write_output(&output, &buffer)?;
            println!("Wrote {} bytes to {}", buffer.len(), output.display());
            Ok(())
        }
        Command::Decompress {
            input,
            output,
            format,
            bits,
        } => {
            let buffer = std::fs::read(&input)
                .map_err(|err| format!("Read {} failed: {err}", input.display()))?;
            let audio: DecodedAudio<i32> =
                codec::decompress(&buffer, &format).map_err(|err| err.to_string())?;
            codec::save_with_options(
                &output,
                audio.samples.view(),
                "wav",
                audio.sample_rate,
                &encode_options(&settings()?, bits),
            )
            .map_err(|err| err.to_string())?;
            println!("Wrote {}", output.display());
            Ok(())
        }
        Command::ConfigInit { force } => config_init(config_file, force),
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<Settings, String> {
    match explicit {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())
}

/// Settings are not loaded here, so a broken file can be replaced.
fn config_init(explicit: Option<&Path>, force: bool) -> Result<(), String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config::config_path().map_err(|err| err.to_string())?,
    };
    if path.exists() && !force {
        return Err(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        ));
    }
    config::save_to(&path, &Settings::default()).map_err(|err| err.to_string())?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

fn info(input: &Path) -> Result<(), String> {
    let audio: DecodedAudio<f64> = codec::load(input).map_err(|err| err.to_string())?;
    let peak = audio.samples.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let peak_dbfs = 20.0 * (peak / f64::from(i32::MAX)).max(1e-12).log10();
    println!("file:        {}", input.display());
    println!("channels:    {}", audio.channels());
    println!("frames:      {}", audio.frames());
    println!("sample rate: {} Hz", audio.sample_rate);
    println!("duration:    {:.3} s", audio.duration_seconds());
    println!("peak:        {peak_dbfs:.1} dBFS");
    Ok(())
}

/// Decode on the 32-bit integer scale so re-encoding at 32 bits is lossless.
fn load_exact(input: &Path) -> Result<DecodedAudio<i32>, String> {
    codec::load(input).map_err(|err| err.to_string())
}

fn encode_options(settings: &Settings, bits: Option<u16>) -> EncodeOptions {
    EncodeOptions {
        bits_per_sample: bits.unwrap_or(settings.encode.bits_per_sample),
    }
}

fn stft(args: &StftArgs, settings: &Settings) -> Result<(), String> {
    let params = StftParams {
        window_size: args.window_size.unwrap_or(settings.stft.window_size),
        window_type: args.window_type.unwrap_or(settings.stft.window_type),
        hop: args.hop.unwrap_or(settings.stft.hop),
    };
    match args.kind {
        SampleKind::U8 => stft_as::<u8>(args, &params),
        SampleKind::I8 => stft_as::<i8>(args, &params),
        SampleKind::I16 => stft_as::<i16>(args, &params),
        SampleKind::I32 => stft_as::<i32>(args, &params),
        SampleKind::I64 => stft_as::<i64>(args, &params),
        SampleKind::F32 => stft_as::<f32>(args, &params),
        SampleKind::F64 => stft_as::<f64>(args, &params),
    }
}

#[derive(Serialize)]
struct SpectrogramReport<T> {
    sample_rate: u32,
    kind: &'static str,
    window_size: usize,
    window_type: &'static str,
    hop: usize,
    frames: usize,
    bins: usize,
    /// `[frame][bin] = [real, imaginary]`, highest frequency bin first.
    data: Vec<Vec<[T; 2]>>,
}

fn stft_as<T: Sample + Serialize>(args: &StftArgs, params: &StftParams) -> Result<(), String> {
    if !T::KIND.is_float() {
        tracing::warn!(kind = %T::KIND, "spectrum values are truncated toward zero");
    }
    let audio: DecodedAudio<T> = codec::load(&args.input).map_err(|err| err.to_string())?;
    let signal = match args.channel {
        Some(channel) if channel >= audio.channels() => {
            return Err(format!(
                "--channel {channel} is out of range ({} channels)",
                audio.channels()
            ));
        }
        Some(channel) => audio.samples.slice(s![.., channel..channel + 1]),
        None => audio.samples.view(),
    };
    let spectrogram = tensaudio::stft(signal, params).map_err(|err| match &err {
        tensaudio::StftError::UnsupportedChannelLayout { .. } => {
            format!("{err}; pick one with --channel")
        }
        _ => err.to_string(),
    })?;
    let (frames, bins, _) = spectrogram.dim();
    let data = spectrogram
        .outer_iter()
        .map(|frame| frame.outer_iter().map(|bin| [bin[0], bin[1]]).collect())
        .collect();
    let report = SpectrogramReport {
        sample_rate: audio.sample_rate,
        kind: T::KIND.name(),
        window_size: params.window_size,
        window_type: params.window_type.name(),
        hop: params.hop,
        frames,
        bins,
        data,
    };
    let json = serde_json::to_vec(&report).map_err(|err| format!("Serialize failed: {err}"))?;
    match &args.out {
        Some(path) => {
            write_output(path, &json)?;
            eprintln!("Wrote {frames} frames x {bins} bins to {}", path.display());
        }
        None => println!("{}", String::from_utf8_lossy(&json)),
    }
    Ok(())
}

fn write_output(path: &Path, payload: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|err| format!("Create output dir {} failed: {err}", parent.display()))?;
    }
    std::fs::write(path, payload)
        .map_err(|err| format!("Write output {} failed: {err}", path.display()))
}
