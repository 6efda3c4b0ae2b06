//! Process-wide registration of the renderer components a render spec relies on.
//!
//! The process bootstrap calls [`install`] once before any chart is built;
//! later calls return the same registry without running registration again.

#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use serde::Serialize;

use super::spec::{Annotation, ScaleKind};
use super::RenderSpec;

static REGISTRY: OnceLock<ComponentRegistry> = OnceLock::new();
#[cfg(test)]
static REGISTRATIONS: AtomicUsize = AtomicUsize::new(0);

/// Scales, elements and plugins the renderer must have loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRegistry {
    pub scales: Vec<&'static str>,
    pub elements: Vec<&'static str>,
    pub plugins: Vec<&'static str>,
}

impl ComponentRegistry {
    fn standard() -> Self {
        Self {
            scales: vec!["time", "linear"],
            elements: vec!["line", "point"],
            plugins: vec!["tooltip", "legend", "annotation"],
        }
    }

    fn has(&self, component: &str) -> bool {
        self.scales
            .iter()
            .chain(&self.elements)
            .chain(&self.plugins)
            .any(|c| *c == component)
    }

    /// Components `spec` needs that this registry does not provide.
    pub fn missing(&self, spec: &RenderSpec) -> Vec<&'static str> {
        spec.required_components()
            .into_iter()
            .filter(|c| !self.has(c))
            .collect()
    }
}

/// Registers the standard components, at most once per process.
pub fn install() -> &'static ComponentRegistry {
    REGISTRY.get_or_init(|| {
        #[cfg(test)]
        REGISTRATIONS.fetch_add(1, Ordering::SeqCst);
        let registry = ComponentRegistry::standard();
        tracing::debug!(?registry, "registered chart components");
        registry
    })
}

/// The registry, if [`install`] has run.
pub fn installed() -> Option<&'static ComponentRegistry> {
    REGISTRY.get()
}

impl RenderSpec {
    /// Component names the renderer needs to draw this spec.
    pub fn required_components(&self) -> Vec<&'static str> {
        let mut required = Vec::new();
        for axis in [&self.scales.x, &self.scales.y] {
            required.push(match axis.kind {
                ScaleKind::Time => "time",
                ScaleKind::Linear => "linear",
            });
        }
        required.extend(["line", "point", "tooltip", "legend"]);
        if self
            .annotations
            .iter()
            .any(|a| matches!(a, Annotation::Line(_)))
        {
            required.push("annotation");
        }
        required
    }
}
