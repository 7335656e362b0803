// Sample option table declared by the simulator.
//
// Covers every construction strategy so a frontend pointed at coreoptd sees
// each shape of wire string.

use coreopt_core::{CoreOption, OptionRegistry, OptionValue};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuCore {
    Jit,
    Interpreter,
    CachedInterpreter,
}

impl OptionValue for CpuCore {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderCompilation {
    Synchronous,
    AsynchronousSkipRendering,
    SynchronousUberShaders,
    AsynchronousUberShaders,
}

impl OptionValue for ShaderCompilation {}

/// Every option the simulator declares
pub struct SampleOptions {
    pub efb_scale: CoreOption<i32>,
    pub cpu_core: CoreOption<CpuCore>,
    pub cpu_clock_rate: CoreOption<f32>,
    pub renderer: CoreOption<String>,
    pub fastmem: CoreOption<bool>,
    pub widescreen_hack: CoreOption<bool>,
    pub sensor_bar_position: CoreOption<u32>,
    pub mixer_rate: CoreOption<u32>,
    pub shader_compilation: CoreOption<ShaderCompilation>,
    pub max_anisotropy: CoreOption<i32>,
}

impl SampleOptions {
    pub fn declare(registry: &Arc<OptionRegistry>) -> Self {
        Self {
            efb_scale: CoreOption::offset(
                registry,
                "core_efb_scale",
                "EFB scale",
                1,
                [
                    "x1 (640 x 528)",
                    "x2 (1280 x 1056)",
                    "x3 (1920 x 1584)",
                    "x4 (2560 x 2112)",
                ],
            ),
            cpu_core: CoreOption::pairs(
                registry,
                "core_cpu_core",
                "CPU core",
                [
                    ("JIT", CpuCore::Jit),
                    ("Interpreter", CpuCore::Interpreter),
                    ("Cached interpreter", CpuCore::CachedInterpreter),
                ],
            ),
            cpu_clock_rate: CoreOption::pairs(
                registry,
                "core_cpu_clock_rate",
                "CPU clock rate",
                [
                    ("100%", 1.0),
                    ("150%", 1.5),
                    ("200%", 2.0),
                    ("50%", 0.5),
                ],
            ),
            renderer: CoreOption::identity(
                registry,
                "core_renderer",
                "Renderer",
                ["Hardware", "Software", "Null"],
            ),
            fastmem: CoreOption::toggle(registry, "core_fastmem", "Fast memory", true),
            widescreen_hack: CoreOption::toggle(
                registry,
                "core_widescreen_hack",
                "Widescreen hack",
                false,
            ),
            sensor_bar_position: CoreOption::indexed(
                registry,
                "core_sensor_bar_position",
                "Sensor bar position",
                ["Bottom", "Top"],
            ),
            mixer_rate: CoreOption::pairs(
                registry,
                "core_mixer_rate",
                "Audio mixer rate",
                [("32000", 32000), ("48000", 48000)],
            ),
            shader_compilation: CoreOption::pairs(
                registry,
                "core_shader_compilation_mode",
                "Shader compilation mode",
                [
                    ("Synchronous", ShaderCompilation::Synchronous),
                    ("Asynchronous (skip rendering)", ShaderCompilation::AsynchronousSkipRendering),
                    ("Synchronous (uber shaders)", ShaderCompilation::SynchronousUberShaders),
                    ("Asynchronous (uber shaders)", ShaderCompilation::AsynchronousUberShaders),
                ],
            ),
            max_anisotropy: CoreOption::range(
                registry,
                "core_max_anisotropy",
                "Max anisotropy",
                0,
                17,
                1,
            ),
        }
    }

    /// Resolve every option, returning `(id, selected label)` of those that changed
    pub fn refresh(&mut self) -> Vec<(String, String)> {
        let mut changed = Vec::new();
        refresh_one(&mut self.efb_scale, &mut changed);
        refresh_one(&mut self.cpu_core, &mut changed);
        refresh_one(&mut self.cpu_clock_rate, &mut changed);
        refresh_one(&mut self.renderer, &mut changed);
        refresh_one(&mut self.fastmem, &mut changed);
        refresh_one(&mut self.widescreen_hack, &mut changed);
        refresh_one(&mut self.sensor_bar_position, &mut changed);
        refresh_one(&mut self.mixer_rate, &mut changed);
        refresh_one(&mut self.shader_compilation, &mut changed);
        refresh_one(&mut self.max_anisotropy, &mut changed);
        changed
    }
}

fn refresh_one<T: OptionValue>(option: &mut CoreOption<T>, changed: &mut Vec<(String, String)>) {
    if option.updated() {
        changed.push((option.id().to_string(), option.selected_label().to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coreopt_core::MemoryHost;

    #[test]
    fn test_declares_every_option_once() {
        let registry = Arc::new(OptionRegistry::new());
        let _options = SampleOptions::declare(&registry);

        assert_eq!(registry.len(), 10);
        let variables = registry.variables();
        let mut keys: Vec<&str> = variables.iter().map(|v| v.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_refresh_reports_changes() {
        let host = MemoryHost::new();
        let registry = Arc::new(OptionRegistry::with_host(Arc::new(host.clone())));
        let mut options = SampleOptions::declare(&registry);

        // First access after registration resolves again, nothing selected yet
        assert!(options.refresh().is_empty());

        host.set_value("core_cpu_core", "Interpreter");
        host.set_value("core_max_anisotropy", "16");
        assert!(registry.check_for_updates());

        let mut changed = options.refresh();
        changed.sort();
        assert_eq!(
            changed,
            vec![
                ("core_cpu_core".to_string(), "Interpreter".to_string()),
                ("core_max_anisotropy".to_string(), "16".to_string()),
            ]
        );
        assert_eq!(*options.cpu_core.value(), CpuCore::Interpreter);
        assert_eq!(*options.max_anisotropy.value(), 16);
    }
}
