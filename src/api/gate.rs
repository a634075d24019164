//! Last-write-wins render gate exposed to JavaScript

use wasm_bindgen::prelude::*;
use crate::supersede::LatestOnly;

/// One gate per UI target (e.g. the insight display, the time machine)
///
/// ```js
/// const ticket = gate.begin();
/// const result = await fetchInsight();
/// if (gate.accept(ticket)) render(result);
/// ```
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct RenderGate {
    inner: LatestOnly,
}

#[wasm_bindgen]
impl RenderGate {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RenderGate {
        RenderGate::default()
    }

    /// Start a render and get its ticket
    pub fn begin(&mut self) -> u32 {
        self.inner.begin()
    }

    /// Whether the render holding `ticket` may still write its result
    pub fn accept(&self, ticket: u32) -> bool {
        self.inner.accept(ticket)
    }
}
