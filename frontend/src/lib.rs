pub mod app;
pub mod environment;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use crate::app::*;

    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::default()
            .set_max_level(tracing::Level::DEBUG)
            .build(),
    );

    leptos::mount::mount_to_body(App);
}
