use std::fmt;
use std::sync::Arc;

use anyhow::Context;

use crate::module::{InitCtx, Module};

/// Boot order of core modules. Custom modules follow in registration order;
/// the HTTP server is started after boot, outside the registry.
const CORE_MODULE_ORDER: &[&str] = &["db"];

#[derive(Debug, Clone, Copy)]
enum Phase {
    Init,
    Start,
    Stop,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Init => "init",
            Phase::Start => "start",
            Phase::Stop => "stop",
        })
    }
}

/// Holds every module and drives their lifecycle.
///
/// Core modules (storage) boot before custom modules (resources) and stop
/// after them.
#[derive(Default)]
pub struct ModuleRegistry {
    core_modules: Vec<Arc<dyn Module>>,
    custom_modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_core(&mut self, module: Arc<dyn Module>) {
        self.core_modules.push(module);
    }

    pub fn register_custom(&mut self, module: Arc<dyn Module>) {
        self.custom_modules.push(module);
    }

    /// Core modules in boot order, then custom modules
    pub fn modules(&self) -> Vec<&Arc<dyn Module>> {
        let mut all = self.ordered_core_modules();
        all.extend(self.custom_modules.iter());
        all
    }

    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.core_modules
            .iter()
            .chain(self.custom_modules.iter())
            .find(|module| module.name() == name)
    }

    pub fn core_module_count(&self) -> usize {
        self.core_modules.len()
    }

    pub fn custom_module_count(&self) -> usize {
        self.custom_modules.len()
    }

    /// Init every module, then start every module.
    pub async fn boot(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let core = self.ordered_core_modules();
        let custom: Vec<_> = self.custom_modules.iter().collect();

        for phase in [Phase::Init, Phase::Start] {
            run_phase(phase, "core", &core, Some(ctx)).await?;
            run_phase(phase, "custom", &custom, Some(ctx)).await?;
        }
        Ok(())
    }

    /// Stop custom modules, then core modules, each in reverse boot order.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        let custom: Vec<_> = self.custom_modules.iter().rev().collect();
        let core: Vec<_> = self.ordered_core_modules().into_iter().rev().collect();

        run_phase(Phase::Stop, "custom", &custom, None).await?;
        run_phase(Phase::Stop, "core", &core, None).await
    }

    /// Core modules sorted by `CORE_MODULE_ORDER`; unknown names are skipped
    fn ordered_core_modules(&self) -> Vec<&Arc<dyn Module>> {
        CORE_MODULE_ORDER
            .iter()
            .filter_map(|&name| self.core_modules.iter().find(|m| m.name() == name))
            .collect()
    }
}

async fn run_phase(
    phase: Phase,
    kind: &str,
    modules: &[&Arc<dyn Module>],
    ctx: Option<&InitCtx<'_>>,
) -> anyhow::Result<()> {
    tracing::info!(%phase, kind, count = modules.len(), "running module phase");

    for module in modules {
        tracing::info!(%phase, module = module.name(), "module phase");
        let result = match (phase, ctx) {
            (Phase::Init, Some(ctx)) => module.init(ctx).await,
            (Phase::Start, Some(ctx)) => module.start(ctx).await,
            (Phase::Stop, _) => module.stop().await,
            (_, None) => anyhow::bail!("{} phase needs an init context", phase),
        };
        result.with_context(|| format!("failed to {} {} module '{}'", phase, kind, module.name()))?;
    }
    Ok(())
}
