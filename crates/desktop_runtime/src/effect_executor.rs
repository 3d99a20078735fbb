//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Take the queue before running so effects that dispatch again start a fresh batch.
    create_effect(move |_| {
        if runtime.effects.with(Vec::is_empty) {
            return;
        }

        let queued = runtime.effects.try_update(std::mem::take).unwrap_or_default();
        let host = runtime.host.get_value();
        for effect in coalesce(queued) {
            host.run_runtime_effect(runtime, effect);
        }
    });
}

/// Drops repeated effects; each persist only needs to run once per batch.
fn coalesce<T: PartialEq>(queued: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(queued.len());
    for effect in queued {
        if !unique.contains(&effect) {
            unique.push(effect);
        }
    }
    unique
}
