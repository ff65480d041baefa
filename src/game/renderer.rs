//! World Renderer
//!
//! Draws the world with macroquad in back-to-front order: sky, parallax layers,
//! platforms, enemies, then the player. Sprites are drawn centred on their
//! body with frames cut from the sheet the current clip is keyed to.

use macroquad::prelude::*;

use super::animation::Animator;
use super::components::{Body, Facing};
use super::world::{images, ParallaxLayer, WorldState};
use crate::asset::{ResourceSet, TextureCache};

const CLEAR: Color = Color::new(0.08, 0.09, 0.12, 1.0);
const DEBUG_PLAYER: Color = Color::new(0.3, 1.0, 0.4, 1.0);
const DEBUG_ENEMY: Color = Color::new(1.0, 0.35, 0.3, 1.0);
const DEBUG_STATIC: Color = Color::new(0.35, 0.55, 1.0, 1.0);

/// Everything the renderer reads besides the world
pub struct RenderContext<'a> {
    pub resources: &'a ResourceSet,
    pub textures: &'a TextureCache,
    /// Draw body outlines and contact flags
    pub debug: bool,
}

pub fn draw_world(world: &WorldState, ctx: &RenderContext) {
    clear_background(CLEAR);

    if let Some(sky) = ctx.textures.get(images::SKY) {
        let b = world.bounds;
        draw_texture_ex(
            sky,
            b.x,
            b.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(b.w, b.h)),
                ..Default::default()
            },
        );
    }

    draw_parallax(&world.background_far, ctx);
    draw_parallax(&world.background_near, ctx);

    for platform in &world.platforms {
        let Some(texture) = ctx.textures.get(&platform.texture) else { continue };
        let rect = platform.body.rect();
        draw_texture_ex(
            texture,
            rect.x,
            rect.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(platform.body.size),
                ..Default::default()
            },
        );
    }

    for enemy in &world.enemies {
        draw_sprite(&enemy.body, enemy.facing, &enemy.animator, world, ctx);
    }
    draw_sprite(&world.player.body, world.player.facing, &world.player.animator, world, ctx);

    if ctx.debug {
        draw_debug(world);
    }
}

/// Left edges of the tiles covering `span`, given a scroll offset
pub fn tile_starts(offset: f32, tile: f32, span: f32) -> Vec<f32> {
    if tile <= 0.0 {
        return Vec::new();
    }
    let mut x = -offset.rem_euclid(tile);
    let mut starts = Vec::new();
    while x < span {
        starts.push(x);
        x += tile;
    }
    starts
}

fn draw_parallax(layer: &ParallaxLayer, ctx: &RenderContext) {
    let Some(texture) = ctx.textures.get(&layer.texture) else { return };
    let (w, h) = (texture.width(), texture.height());
    let area = layer.area;

    for x in tile_starts(layer.tile_offset_x, w, area.w) {
        for y in tile_starts(0.0, h, area.h) {
            // Clip the last column/row to the layer area
            let dw = w.min(area.w - x);
            let dh = h.min(area.h - y);
            let sx = if x < 0.0 { -x } else { 0.0 };
            draw_texture_ex(
                texture,
                area.x + x.max(0.0),
                area.y + y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(dw - sx, dh)),
                    source: Some(Rect::new(sx, 0.0, dw - sx, dh)),
                    ..Default::default()
                },
            );
        }
    }
}

/// Source rect of frame `index` in a sheet laid out left to right, top to
/// bottom
pub fn frame_source(index: u32, frame: Vec2, sheet_width: f32) -> Rect {
    let columns = ((sheet_width / frame.x).floor() as u32).max(1);
    let col = index % columns;
    let row = index / columns;
    Rect::new(col as f32 * frame.x, row as f32 * frame.y, frame.x, frame.y)
}

fn draw_sprite(body: &Body, facing: Facing, animator: &Animator, world: &WorldState, ctx: &RenderContext) {
    let Some(clip) = world.animations.get(animator.current()) else { return };
    let Some(texture) = ctx.textures.get(&clip.sheet) else { return };
    let Ok(size) = ctx.resources.require_sheet(&clip.sheet) else { return };

    let frame = vec2(size.width as f32, size.height as f32);
    let source = frame_source(animator.frame(&world.animations), frame, texture.width());
    let top_left = body.position - frame * 0.5;

    draw_texture_ex(
        texture,
        top_left.x,
        top_left.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(frame),
            source: Some(source),
            flip_x: facing.is_mirrored(),
            ..Default::default()
        },
    );
}

fn draw_outline(body: &Body, color: Color) {
    let r = body.rect();
    draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, color);
    if body.touching.down || body.blocked.down {
        draw_line(r.x, r.y + r.h, r.x + r.w, r.y + r.h, 3.0, YELLOW);
    }
}

fn draw_debug(world: &WorldState) {
    for platform in &world.platforms {
        draw_outline(&platform.body, DEBUG_STATIC);
    }
    for enemy in &world.enemies {
        draw_outline(&enemy.body, DEBUG_ENEMY);
    }
    draw_outline(&world.player.body, DEBUG_PLAYER);

    let p = &world.player;
    let text = format!(
        "clip {}  vel ({:.0}, {:.0})  fps {}",
        p.animator.current(),
        p.body.velocity.x,
        p.body.velocity.y,
        get_fps()
    );
    draw_text(&text, 8.0, 18.0, 18.0, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_starts_cover_span() {
        assert_eq!(tile_starts(0.0, 300.0, 800.0), vec![0.0, 300.0, 600.0]);
        assert_eq!(tile_starts(100.0, 300.0, 800.0), vec![-100.0, 200.0, 500.0]);
        // Negative scroll wraps the other way
        assert_eq!(tile_starts(-100.0, 300.0, 800.0), vec![-200.0, 100.0, 400.0, 700.0]);
        assert!(tile_starts(0.0, 0.0, 800.0).is_empty());
    }

    #[test]
    fn test_frame_source_wraps_rows() {
        let frame = vec2(32.0, 48.0);
        assert_eq!(frame_source(0, frame, 128.0), Rect::new(0.0, 0.0, 32.0, 48.0));
        assert_eq!(frame_source(3, frame, 128.0), Rect::new(96.0, 0.0, 32.0, 48.0));
        assert_eq!(frame_source(5, frame, 128.0), Rect::new(32.0, 48.0, 32.0, 48.0));
        // Sheet narrower than a frame still yields one column
        assert_eq!(frame_source(2, frame, 16.0), Rect::new(0.0, 96.0, 32.0, 48.0));
    }
}
