use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::GameConfig;
use crate::error::{EngineError, Result};
use crate::game::Game;
use crate::surface::{ImageId, ImageState, Surface};

/// Game handle the image callbacks report to. Set once the game exists.
pub type Host = Rc<OnceCell<Weak<RefCell<Game<CanvasSurface>>>>>;

/// `<canvas>` element with a 2D context, appended to the document body.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: Vec<Option<HtmlImageElement>>,
    host: Host,
}

impl CanvasSurface {
    pub fn create(config: &GameConfig) -> std::result::Result<Self, JsValue> {
        let document = window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_width(config.width);
        canvas.set_height(config.height);
        canvas.style().set_property("border", &config.border)?;
        document
            .body()
            .ok_or("document has no body")?
            .append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas not supported")?
            .dyn_into()?;

        Ok(CanvasSurface {
            canvas,
            ctx,
            images: Vec::new(),
            host: Rc::new(OnceCell::new()),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn host(&self) -> Host {
        self.host.clone()
    }

    // Load events fire on a later task, never while the game is borrowed;
    // `try_borrow_mut` only guards against a misbehaving page.
    fn notify(host: &Host, f: impl FnOnce(&mut Game<CanvasSurface>)) {
        let Some(shared) = host.get().and_then(Weak::upgrade) else {
            return;
        };
        match shared.try_borrow_mut() {
            Ok(mut game) => f(&mut game),
            Err(_) => log::warn!("game busy, dropping image notification"),
        };
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn page_offset(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.offset_left()),
            f64::from(self.canvas.offset_top()),
        )
    }

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn draw_image(
        &mut self,
        image: ImageId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let img = self
            .images
            .get(image.0 as usize)
            .and_then(Option::as_ref)
            .ok_or_else(|| EngineError::Surface(format!("unknown {image}")))?;
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, width, height)
            .map_err(|err| EngineError::Surface(format!("drawImage failed: {err:?}")))
    }

    fn load_image(&mut self, src: &str) -> (ImageId, ImageState) {
        let id = ImageId(self.images.len() as u32);
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(err) => {
                log::warn!("cannot create image for {src}: {err:?}");
                self.images.push(None);
                return (id, ImageState::Failed);
            }
        };

        let onload = {
            let host = self.host.clone();
            let img = img.clone();
            Closure::wrap(Box::new(move || {
                let (w, h) = (img.natural_width(), img.natural_height());
                Self::notify(&host, |game| game.image_loaded(id, f64::from(w), f64::from(h)));
            }) as Box<dyn FnMut()>)
        };
        let onerror = {
            let host = self.host.clone();
            Closure::wrap(Box::new(move || {
                Self::notify(&host, |game| game.image_failed(id));
            }) as Box<dyn FnMut()>)
        };
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        img.set_src(src);
        let state = if img.complete() && img.natural_width() > 0 {
            ImageState::Ready {
                width: f64::from(img.natural_width()),
                height: f64::from(img.natural_height()),
            }
        } else {
            ImageState::Loading
        };
        self.images.push(Some(img));
        (id, state)
    }
}
