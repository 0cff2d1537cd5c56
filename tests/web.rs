#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use simple_canvas::WebGame;

wasm_bindgen_test_configure!(run_in_browser);

fn canvases() -> Vec<web_sys::HtmlCanvasElement> {
    let document = web_sys::window().unwrap().document().unwrap();
    let list = document.get_elements_by_tag_name("canvas");
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .collect()
}

#[wasm_bindgen_test]
fn new_game_appends_a_default_canvas() {
    let before = canvases().len();
    let game = WebGame::new(None, None).unwrap();

    let all = canvases();
    assert_eq!(all.len(), before + 1);
    let canvas = all.last().unwrap();
    assert_eq!((canvas.width(), canvas.height()), (800, 600));
    assert_eq!(game.gui_len(), 4);
}

#[wasm_bindgen_test]
fn config_can_disable_the_pad() {
    let game = WebGame::with_config(r#"{ "width": 320, "height": 240, "control_pad": null }"#)
        .unwrap();
    assert_eq!(game.gui_len(), 0);

    let canvas = canvases().pop().unwrap();
    assert_eq!((canvas.width(), canvas.height()), (320, 240));
}

#[wasm_bindgen_test]
fn buttons_and_pads_share_the_gui() {
    let game = WebGame::new(Some(400), Some(300)).unwrap();
    let handle = game.create_button("fire", "img/arw_top.svg", 350.0, 250.0, None).unwrap();
    game.install_control_pad(Some(0.5), Some(0.5), None).unwrap();
    assert_eq!(game.gui_len(), 5);

    assert!(game.reposition_button(handle, Some(0.0), Some(10.0)).is_ok());
    assert!(game.reposition_button(handle, None, Some(10.0)).is_err());
    assert!(game.create_button("", "img/arw_top.svg", 1.0, 1.0, None).is_err());
}

#[wasm_bindgen_test]
fn entities_need_a_name() {
    let game = WebGame::new(None, None).unwrap();
    assert!(game.create_entity("").is_err());
    assert_eq!(game.create_entity("hero").unwrap().name(), "hero");
}
