use crate::core::constants::{GLOW_STOPS, LINK_RGB, LINK_WIDTH_PX, PALETTE};
use crate::core::Scene;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Acquire a 2D context with an alpha channel.
pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    let opts = js_sys::Object::new();
    js_sys::Reflect::set(&opts, &JsValue::from_str("alpha"), &JsValue::TRUE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .get_context_with_context_options("2d", &opts)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

#[inline]
fn rgba(rgb: [u8; 3], alpha: f32) -> String {
    format!("rgba({}, {}, {}, {:.3})", rgb[0], rgb[1], rgb[2], alpha)
}

/// Paint a scene: clear, glow, nodes, then links.
pub fn paint(ctx: &web::CanvasRenderingContext2d, scene: &Scene) {
    let w = scene.size.x as f64;
    let h = scene.size.y as f64;
    ctx.clear_rect(0.0, 0.0, w, h);

    let (cx, cy) = (scene.glow.center.x as f64, scene.glow.center.y as f64);
    match ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, scene.glow.radius as f64) {
        Ok(gradient) => {
            for (offset, rgb, alpha) in GLOW_STOPS {
                _ = gradient.add_color_stop(offset, &rgba(rgb, alpha));
            }
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        Err(e) => log::debug!("glow gradient: {:?}", e),
    }

    for dot in &scene.dots {
        ctx.begin_path();
        ctx.set_fill_style_str(PALETTE[dot.color % PALETTE.len()]);
        ctx.set_global_alpha(dot.alpha as f64);
        _ = ctx.arc(dot.pos.x as f64, dot.pos.y as f64, dot.radius as f64, 0.0, TAU);
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);

    ctx.set_line_width((LINK_WIDTH_PX * scene.dpr) as f64);
    for link in &scene.links {
        ctx.begin_path();
        ctx.set_stroke_style_str(&rgba(LINK_RGB, link.alpha));
        ctx.move_to(link.from.x as f64, link.from.y as f64);
        ctx.line_to(link.to.x as f64, link.to.y as f64);
        ctx.stroke();
    }
}
