//! Dashboard tests that need `pub(crate)` internals (`App`, `Action`,
//! `simulate_key_event`), so they live here rather than under `tests/`


use std::sync::Arc;

use crate::engine::Engine;
use crate::test_utils::{MockGeo, MockSource, test_config};
use crate::tui::app::App;

/// App over in-memory sources; the update receiver is returned so spawned
/// requests have somewhere to post
pub(super) fn test_app(
    source: MockSource,
) -> (App, tokio::sync::mpsc::UnboundedReceiver<crate::engine::Update>) {
    let (engine, rx) = Engine::new(
        &test_config(),
        Arc::new(source),
        Arc::new(MockGeo::resolving()),
    );
    (App::new(engine), rx)
}
