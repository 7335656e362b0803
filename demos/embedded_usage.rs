//! Minimal embedding example for coreopt-core
//!
//! This example plays both sides: a core declaring typed options, and a
//! frontend (an in-memory host) whose user changes settings between frames.

use coreopt_core::{CoreOption, MemoryHost, OptionRegistry, OptionValue};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    English,
    Japanese,
    German,
    French,
}

impl OptionValue for Language {}

/// Options of the embedded core
struct CoreSettings {
    language: CoreOption<Language>,
    progressive_scan: CoreOption<bool>,
    texture_cache: CoreOption<i32>,
    internal_resolution: CoreOption<u32>,
}

impl CoreSettings {
    fn declare(registry: &Arc<OptionRegistry>) -> Self {
        Self {
            language: CoreOption::pairs(
                registry,
                "demo_language",
                "Language",
                [
                    ("English", Language::English),
                    ("Japanese", Language::Japanese),
                    ("German", Language::German),
                    ("French", Language::French),
                ],
            ),
            progressive_scan: CoreOption::toggle(
                registry,
                "demo_progressive_scan",
                "Progressive scan",
                true,
            ),
            texture_cache: CoreOption::pairs(
                registry,
                "demo_texture_cache",
                "Texture cache accuracy",
                [("Fast", 128), ("Medium", 512), ("Safe", 0)],
            ),
            internal_resolution: CoreOption::offset(
                registry,
                "demo_internal_resolution",
                "Internal resolution",
                1,
                ["1x", "2x", "3x", "4x"],
            ),
        }
    }

    /// What a core does at the top of every frame
    fn apply(&mut self, frame: u32) {
        if self.language.updated() {
            info!(frame, "Language -> {:?}", self.language.value());
        }
        if self.progressive_scan.updated() {
            info!(frame, "Progressive scan -> {}", self.progressive_scan.value());
        }
        if self.texture_cache.updated() {
            info!(frame, "Texture cache samples -> {}", self.texture_cache.value());
        }
        if self.internal_resolution.updated() {
            info!(frame, "Internal resolution -> {}x", self.internal_resolution.value());
        }
    }
}

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let host = MemoryHost::new();
    let registry = Arc::new(OptionRegistry::with_host(Arc::new(host.clone())));

    let mut settings = CoreSettings::declare(&registry);
    registry.publish();

    for variable in host.schema().iter().filter(|v| !v.is_sentinel()) {
        info!("{} = \"{}\"", variable.key, variable.value);
    }

    // The "user" changes settings on a few frames
    let script: &[(u32, &str, &str)] = &[
        (2, "demo_language", "German"),
        (2, "demo_internal_resolution", "3x"),
        (5, "demo_progressive_scan", "disabled"),
        (7, "demo_texture_cache", "Safe"),
        (7, "demo_language", "Klingon"),
    ];

    for frame in 0..10 {
        for &(at, key, label) in script {
            if at == frame {
                host.set_value(key, label);
            }
        }

        registry.check_for_updates();
        settings.apply(frame);
    }

    info!(
        "Final: language={:?} progressive={} texture_cache={} resolution={}x",
        settings.language.value(),
        settings.progressive_scan.value(),
        settings.texture_cache.value(),
        settings.internal_resolution.value()
    );
}
