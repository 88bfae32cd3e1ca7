use std::path::PathBuf;

use tensaudio::{SampleKind, WindowType};

#[derive(Debug, Clone, PartialEq)]
pub(super) struct CliOptions {
    pub(super) config: Option<PathBuf>,
    pub(super) log_file: bool,
    pub(super) command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Command {
    Info {
        input: PathBuf,
    },
    Stft(StftArgs),
    Convert {
        input: PathBuf,
        output: PathBuf,
        bits: Option<u16>,
    },
    Compress {
        input: PathBuf,
        output: PathBuf,
        bits: Option<u16>,
    },
    Decompress {
        input: PathBuf,
        output: PathBuf,
        format: String,
        bits: Option<u16>,
    },
    /// Write the default settings file; `force` overwrites an existing one.
    ConfigInit {
        force: bool,
    },
}

/// STFT overrides; `None` falls back to the settings file.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct StftArgs {
    pub(super) input: PathBuf,
    pub(super) channel: Option<usize>,
    pub(super) window_size: Option<usize>,
    pub(super) window_type: Option<WindowType>,
    pub(super) hop: Option<usize>,
    pub(super) kind: SampleKind,
    pub(super) out: Option<PathBuf>,
}

/// Parse arguments (program name excluded). `Ok(None)` means help was printed.
pub(super) fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut config = None;
    let mut log_file = false;
    let mut idx = 0usize;
    while let Some(flag) = args.get(idx).map(String::as_str) {
        match flag {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--config" => config = Some(PathBuf::from(take_value(&args, &mut idx, flag)?)),
            "--log-file" => log_file = true,
            _ => break,
        }
        idx += 1;
    }
    let Some(name) = args.get(idx) else {
        return Err(format!("Missing command\n\n{}", help_text()));
    };
    let rest = &args[idx + 1..];
    let command = match name.as_str() {
        "info" => parse_info(rest)?,
        "stft" => parse_stft(rest)?,
        "convert" => {
            let (input, output, bits) = parse_transcode(rest, name)?;
            Command::Convert {
                input,
                output,
                bits,
            }
        }
        "compress" => {
            let (input, output, bits) = parse_transcode(rest, name)?;
            Command::Compress {
                input,
                output,
                bits,
            }
        }
        "decompress" => parse_decompress(rest)?,
        "config" => parse_config(rest)?,
        other => return Err(format!("Unknown command: {other}\n\n{}", help_text())),
    };
    Ok(Some(CliOptions {
        config,
        log_file,
        command,
    }))
}

fn parse_info(args: &[String]) -> Result<Command, String> {
    let [input] = positionals(args, 1, "info")?.try_into().map_err(|_| usage("info"))?;
    Ok(Command::Info { input })
}

fn parse_stft(args: &[String]) -> Result<Command, String> {
    let mut parsed = StftArgs {
        input: PathBuf::new(),
        channel: None,
        window_size: None,
        window_type: None,
        hop: None,
        kind: SampleKind::F64,
        out: None,
    };
    let mut inputs = Vec::new();
    let mut idx = 0usize;
    while let Some(arg) = args.get(idx).map(String::as_str) {
        match arg {
            "--channel" => parsed.channel = Some(parse_number(take_value(args, &mut idx, arg)?, arg)?),
            "--window-size" => {
                parsed.window_size = Some(parse_number(take_value(args, &mut idx, arg)?, arg)?)
            }
            "--window-type" => {
                let value = take_value(args, &mut idx, arg)?;
                parsed.window_type = Some(value.parse().map_err(|err| format!("{arg}: {err}"))?);
            }
            "--hop" => parsed.hop = Some(parse_number(take_value(args, &mut idx, arg)?, arg)?),
            "--kind" => {
                let value = take_value(args, &mut idx, arg)?;
                parsed.kind = value.parse().map_err(|err| format!("{arg}: {err}"))?;
            }
            "--out" => parsed.out = Some(PathBuf::from(take_value(args, &mut idx, arg)?)),
            flag if flag.starts_with("--") => return Err(format!("Unknown stft option: {flag}")),
            positional => inputs.push(PathBuf::from(positional)),
        }
        idx += 1;
    }
    let [input] = inputs.try_into().map_err(|_| usage("stft"))?;
    parsed.input = input;
    Ok(Command::Stft(parsed))
}

fn parse_transcode(args: &[String], name: &str) -> Result<(PathBuf, PathBuf, Option<u16>), String> {
    let mut bits = None;
    let mut paths = Vec::new();
    let mut idx = 0usize;
    while let Some(arg) = args.get(idx).map(String::as_str) {
        match arg {
            "--bits" => bits = Some(parse_number(take_value(args, &mut idx, arg)?, arg)?),
            flag if flag.starts_with("--") => return Err(format!("Unknown {name} option: {flag}")),
            positional => paths.push(PathBuf::from(positional)),
        }
        idx += 1;
    }
    let [input, output] = paths.try_into().map_err(|_| usage(name))?;
    Ok((input, output, bits))
}

fn parse_decompress(args: &[String]) -> Result<Command, String> {
    let mut format = String::from("wav");
    let mut bits = None;
    let mut paths = Vec::new();
    let mut idx = 0usize;
    while let Some(arg) = args.get(idx).map(String::as_str) {
        match arg {
            "--format" => format = take_value(args, &mut idx, arg)?.to_string(),
            "--bits" => bits = Some(parse_number(take_value(args, &mut idx, arg)?, arg)?),
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown decompress option: {flag}"));
            }
            positional => paths.push(PathBuf::from(positional)),
        }
        idx += 1;
    }
    let [input, output] = paths.try_into().map_err(|_| usage("decompress"))?;
    Ok(Command::Decompress {
        input,
        output,
        format,
        bits,
    })
}

fn parse_config(args: &[String]) -> Result<Command, String> {
    let Some((action, flags)) = args.split_first() else {
        return Err(usage("config"));
    };
    if action != "init" {
        return Err(format!("Unknown config action: {action}\n\n{}", usage("config")));
    }
    let mut force = false;
    for flag in flags {
        match flag.as_str() {
            "--force" => force = true,
            other => return Err(format!("Unknown config option: {other}")),
        }
    }
    Ok(Command::ConfigInit { force })
}

fn positionals(args: &[String], expected: usize, name: &str) -> Result<Vec<PathBuf>, String> {
    if let Some(flag) = args.iter().find(|arg| arg.starts_with("--")) {
        return Err(format!("Unknown {name} option: {flag}"));
    }
    if args.len() != expected {
        return Err(usage(name));
    }
    Ok(args.iter().map(PathBuf::from).collect())
}

fn take_value<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> Result<&'a str, String> {
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_number<N: std::str::FromStr>(value: &str, flag: &str) -> Result<N, String> {
    value
        .parse()
        .map_err(|_| format!("{flag} expects a non-negative integer, got '{value}'"))
}

fn usage(name: &str) -> String {
    let line = help_text()
        .lines()
        .find(|line| line.trim_start().starts_with(&format!("tensaudio {name} ")))
        .unwrap_or_default()
        .trim()
        .to_string();
    format!("Usage: {line}")
}

pub(super) fn help_text() -> &'static str {
    "tensaudio [--config FILE] [--log-file] <command>

Commands:
  tensaudio info <input>
  tensaudio stft <input> [--channel N] [--window-size N] [--window-type NAME|CODE] [--hop N] [--kind KIND] [--out FILE]
  tensaudio convert <input> <output.wav> [--bits 8|16|24|32]
  tensaudio compress <input> <output> [--bits 8|16|24|32]
  tensaudio decompress <input> <output.wav> [--format TAG] [--bits 8|16|24|32]
  tensaudio config init [--force]

Window types: rectangular (1), hamming (2), hann (3), bartlett (4)
Kinds: u8, i8, i16, i32, i64, f32, f64"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_stft_overrides() {
        let options = parse_args(args(&[
            "--log-file",
            "stft",
            "voice.wav",
            "--window-type",
            "2",
            "--hop",
            "256",
            "--kind",
            "f32",
        ]))
        .unwrap()
        .unwrap();
        assert!(options.log_file);
        let Command::Stft(stft) = options.command else {
            panic!("expected stft command");
        };
        assert_eq!(stft.input, PathBuf::from("voice.wav"));
        assert_eq!(stft.window_type, Some(WindowType::Hamming));
        assert_eq!(stft.hop, Some(256));
        assert_eq!(stft.window_size, None);
        assert_eq!(stft.kind, SampleKind::F32);
    }

    #[test]
    fn parses_global_config_before_command() {
        let options = parse_args(args(&["--config", "c.toml", "info", "a.wav"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.config, Some(PathBuf::from("c.toml")));
        assert_eq!(
            options.command,
            Command::Info {
                input: PathBuf::from("a.wav")
            }
        );
    }

    #[test]
    fn parses_decompress_defaults() {
        let options = parse_args(args(&["decompress", "in.bin", "out.wav"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            options.command,
            Command::Decompress {
                input: PathBuf::from("in.bin"),
                output: PathBuf::from("out.wav"),
                format: "wav".to_string(),
                bits: None,
            }
        );
    }

    #[test]
    fn parses_config_init() {
        let options = parse_args(args(&["--config", "t.toml", "config", "init", "--force"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.config, Some(PathBuf::from("t.toml")));
        assert_eq!(options.command, Command::ConfigInit { force: true });
        let plain = parse_args(args(&["config", "init"])).unwrap().unwrap();
        assert_eq!(plain.command, Command::ConfigInit { force: false });
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["resample", "a.wav"])).is_err());
        assert!(parse_args(args(&["convert", "only-one.wav"])).is_err());
        assert!(parse_args(args(&["stft", "a.wav", "--window-type", "kaiser"])).is_err());
        assert!(parse_args(args(&["stft", "a.wav", "--hop"])).is_err());
        assert!(parse_args(args(&["info", "a.wav", "--verbose"])).is_err());
        assert!(parse_args(args(&["config"])).is_err());
        assert!(parse_args(args(&["config", "show"])).is_err());
        assert!(parse_args(args(&["config", "init", "--yes"])).is_err());
    }

    #[test]
    fn usage_names_the_command() {
        assert!(usage("convert").starts_with("Usage: tensaudio convert <input>"));
    }
}
