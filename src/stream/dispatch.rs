//! Runtime selection of the round engine.
//!
//! The CPU is probed once per process, on first use, and the result is kept
//! in a `OnceLock`. After that, selection is a pure function of the cached
//! capabilities and the number of bytes left to process.

use std::sync::OnceLock;

use cfg_if::cfg_if;
use tracing::debug;

use super::backends::Engine;

cfg_if! {
    if #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(feature = "force-soft")))] {
        cpufeatures::new!(sse2_cpuid, "sse2");
        cpufeatures::new!(avx2_cpuid, "avx2");

        fn probe() -> Capabilities {
            Capabilities {
                sse2: sse2_cpuid::get(),
                avx2: avx2_cpuid::get(),
            }
        }
    } else {
        fn probe() -> Capabilities {
            Capabilities::default()
        }
    }
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Hardware tiers detected on the executing machine.
///
/// The portable engine is always supported and has no flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    sse2: bool,
    avx2: bool,
}

impl Capabilities {
    /// Whether `engine` can run under these capabilities.
    pub const fn supports(self, engine: Engine) -> bool {
        match engine {
            Engine::Soft => true,
            Engine::Sse2 => self.sse2,
            Engine::Avx2 => self.avx2,
        }
    }

    /// The most capable supported engine.
    pub fn best(self) -> Engine {
        self.select(Engine::Avx2, usize::MAX)
    }

    /// Picks the engine for `remaining` bytes of full blocks.
    ///
    /// Returns the most capable engine that is supported, not above
    /// `ceiling`, and whose batch fits in `remaining`. Falls back to
    /// [`Engine::Soft`], which handles any whole number of blocks.
    pub fn select(self, ceiling: Engine, remaining: usize) -> Engine {
        Engine::ALL
            .iter()
            .rev()
            .copied()
            .find(|&e| e <= ceiling && self.supports(e) && e.batch_len() <= remaining)
            .unwrap_or(Engine::Soft)
    }
}

/// Returns the process-wide capability set, probing the CPU on first call.
pub fn capabilities() -> Capabilities {
    *CAPABILITIES.get_or_init(|| {
        let caps = probe();
        debug!(
            sse2 = caps.sse2,
            avx2 = caps.avx2,
            force_soft = cfg!(feature = "force-soft"),
            "probed chacha round engine capabilities"
        );
        caps
    })
}

/// Engines usable on this machine, least capable first.
pub fn available_engines() -> Vec<Engine> {
    let caps = capabilities();
    Engine::ALL.into_iter().filter(|&e| caps.supports(e)).collect()
}
