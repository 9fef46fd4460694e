// Browser smoke tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_game_mounts_desktop_layers() {
    office_simulator::start_game_with_config(r#"{"dictionaryUrl": null}"#).expect("start");
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    for id in ["os-root", "os-desktop", "os-boss", "os-punish", "os-taskbar"] {
        assert!(doc.get_element_by_id(id).is_some(), "missing #{id}");
    }
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(office_simulator::start_game_with_config(r#"{"punishmentSeconds": 0}"#).is_err());
}

#[wasm_bindgen_test]
fn restarting_clears_leftover_overlays() {
    office_simulator::start_game_with_config(r#"{"dictionaryUrl": null}"#).expect("start");
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    let boss = doc.get_element_by_id("os-boss").expect("boss layer");
    boss.set_inner_html("<div class='os-boss-backdrop'>old</div>");
    office_simulator::start_game_with_config(r#"{"dictionaryUrl": null}"#).expect("restart");
    assert_eq!(boss.inner_html(), "");
}
