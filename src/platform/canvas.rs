//! Canvas2D surface and image loading for the browser build

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Surface, TextAlign};
use crate::assets::{AssetRef, AssetStore, ImageHandle};

/// `Surface` backed by a 2D canvas context
///
/// Drawing happens in CSS pixels; the backing store is scaled by the device
/// pixel ratio so text stays sharp on high-DPI screens.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
    dpr: f64,
    text_size: f32,
    /// Text size stack mirroring the context's save/restore
    text_sizes: Vec<f32>,
    images: Vec<Option<HtmlImageElement>>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        let mut surface = Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
            dpr: 1.0,
            text_size: 12.0,
            text_sizes: Vec::new(),
            images: Vec::new(),
        };
        surface.sync_size();
        Ok(surface)
    }

    /// Match the backing store to the canvas' CSS size; call once per frame
    pub fn sync_size(&mut self) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let (w, h) = (self.canvas.client_width(), self.canvas.client_height());
        // A hidden canvas reports 0x0; keep the attribute size then
        let (w, h) = if w > 0 && h > 0 {
            (w as f32, h as f32)
        } else {
            (self.canvas.width() as f32, self.canvas.height() as f32)
        };
        if w == self.width && h == self.height && dpr == self.dpr {
            return;
        }

        self.width = w;
        self.height = h;
        self.dpr = dpr;
        self.canvas.set_width((w as f64 * dpr) as u32);
        self.canvas.set_height((h as f64 * dpr) as u32);

        // Resizing wipes the context state
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.set_text_baseline("middle");
        self.apply_font();
        log::info!("Canvas resized to {}x{} (dpr {})", w, h, dpr);
    }

    /// Attach a loaded element to its asset id
    pub fn register_image(&mut self, id: usize, image: HtmlImageElement) {
        if self.images.len() <= id {
            self.images.resize(id + 1, None);
        }
        self.images[id] = Some(image);
    }

    fn apply_font(&self) {
        self.ctx.set_font(&format!("{}px sans-serif", self.text_size));
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn save(&mut self) {
        self.ctx.save();
        self.text_sizes.push(self.text_size);
    }

    fn restore(&mut self) {
        self.ctx.restore();
        match self.text_sizes.pop() {
            Some(size) => self.text_size = size,
            None => log::warn!("restore() without matching save()"),
        }
    }

    fn background(&mut self, color: Color) {
        self.ctx.save();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
        self.ctx.restore();
    }

    fn fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn text_size(&mut self, size: f32) {
        self.text_size = size;
        self.apply_font();
    }

    fn text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) {
        let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
        let r = (radius as f64).min(w / 2.0).min(h / 2.0);
        if r <= 0.0 {
            self.ctx.fill_rect(x, y, w, h);
            return;
        }
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
        ctx.fill();
    }

    fn ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            cx as f64,
            cy as f64,
            (w / 2.0).abs() as f64,
            (h / 2.0).abs() as f64,
            0.0,
            0.0,
            TAU,
        );
        self.ctx.fill();
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        self.ctx.begin_path();
        self.ctx.move_to(a.x as f64, a.y as f64);
        self.ctx.line_to(b.x as f64, b.y as f64);
        self.ctx.line_to(c.x as f64, c.y as f64);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn image(&mut self, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32) {
        let Some(Some(el)) = self.images.get(image.id) else {
            log::warn!("image {} has no element attached", image.id);
            return;
        };
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(el, x as f64, y as f64, w as f64, h as f64)
        {
            log::warn!("draw_image failed for {}: {:?}", image.id, e);
        }
    }
}

/// Start loading every asset; the store flips each entry to ready/failed as
/// the browser finishes
pub fn load_images(
    manifest: &[AssetRef],
    store: &Rc<RefCell<AssetStore>>,
    surface: &mut CanvasSurface,
) -> Result<(), JsValue> {
    for asset in manifest {
        let id = store.borrow_mut().request(asset.name);
        let img = HtmlImageElement::new()?;

        {
            let store = store.clone();
            let el = img.clone();
            let name = asset.name;
            let onload = Closure::<dyn FnMut()>::new(move || {
                store
                    .borrow_mut()
                    .mark_ready(id, el.natural_width(), el.natural_height());
                log::info!("Loaded {}", name);
            });
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
        }

        {
            let store = store.clone();
            let (name, url) = (asset.name, asset.url);
            let onerror = Closure::<dyn FnMut()>::new(move || {
                store.borrow_mut().mark_failed(id);
                log::error!("Failed to load {} from {}", name, url);
            });
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        }

        img.set_src(asset.url);
        surface.register_image(id, img);
    }
    log::info!("Requested {} images", manifest.len());
    Ok(())
}
