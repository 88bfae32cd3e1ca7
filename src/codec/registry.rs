//! Process-wide codec registry, created on first use.

use std::sync::OnceLock;

use symphonia::core::codecs::CodecRegistry as DecoderRegistry;
use symphonia::core::probe::Probe;

static REGISTRY: OnceLock<CodecRegistry> = OnceLock::new();

/// Format probe and decoder table shared by every decode call.
pub struct CodecRegistry {
    probe: &'static Probe,
    decoders: &'static DecoderRegistry,
}

impl CodecRegistry {
    pub fn probe(&self) -> &'static Probe {
        self.probe
    }

    pub fn decoders(&self) -> &'static DecoderRegistry {
        self.decoders
    }
}

/// Initialize the registry if needed and return it.
///
/// Safe to call from any thread, any number of times. There is no teardown.
pub fn init() -> &'static CodecRegistry {
    REGISTRY.get_or_init(|| {
        let registry = CodecRegistry {
            probe: symphonia::default::get_probe(),
            decoders: symphonia::default::get_codecs(),
        };
        tracing::info!("Audio codec registry initialized");
        registry
    })
}

/// True once [`init`] has run in this process.
pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}
