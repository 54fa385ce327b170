//! Frame snapshot for the host renderer
//!
//! The host engine draws; the game only says what goes where. A [`FrameView`]
//! is built from the session after each tick and lists every sprite with its
//! texture, position and rotation, plus the score label and clear color.

use glam::Vec2;

use crate::consts::BIRD_FRAME_COUNT;
use crate::sim::{GameSession, Rect};

/// Textures the host is expected to provide, by asset name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Texture {
    Sky,
    Ground,
    /// Lower pipe, opening facing up
    PipeDown,
    /// Upper pipe, opening facing down
    PipeUp,
    /// Flight animation frame (0-based)
    Bird(usize),
}

impl Texture {
    pub fn asset_name(&self) -> String {
        match self {
            Texture::Sky => "Sky".into(),
            Texture::Ground => "Ground".into(),
            Texture::PipeDown => "Pipe_Down".into(),
            Texture::PipeUp => "Pipe_Up".into(),
            Texture::Bird(frame) => format!("Bird{}", frame + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: Texture,
    /// Center position in playfield coordinates
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
}

impl Sprite {
    fn from_rect(texture: Texture, rect: Rect) -> Self {
        Self {
            texture,
            pos: rect.center(),
            size: Vec2::new(rect.width(), rect.height()),
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreLabel {
    pub text: String,
    pub scale: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub background: [u8; 3],
    /// Back to front: sky, pipes, ground, bird
    pub sprites: Vec<Sprite>,
    pub score: ScoreLabel,
}

impl FrameView {
    pub fn capture(session: &GameSession) -> Self {
        let tuning = &session.tuning;
        let mut sprites = Vec::new();

        let sky = &session.scroll.sky;
        for i in 0..sky.tiles_for(tuning.width) {
            let x = i as f32 * sky.tile_width - sky.offset;
            sprites.push(Sprite::from_rect(
                Texture::Sky,
                Rect::new(
                    Vec2::new(x, tuning.ground_height),
                    Vec2::new(x + sky.tile_width, tuning.height),
                ),
            ));
        }

        for pair in &session.pairs {
            sprites.push(Sprite::from_rect(Texture::PipeDown, pair.lower_rect()));
            sprites.push(Sprite::from_rect(Texture::PipeUp, pair.upper_rect()));
        }

        let ground = &session.scroll.ground;
        for i in 0..ground.tiles_for(tuning.width) {
            let x = i as f32 * ground.tile_width - ground.offset;
            sprites.push(Sprite::from_rect(
                Texture::Ground,
                Rect::new(
                    Vec2::new(x, 0.0),
                    Vec2::new(x + ground.tile_width, tuning.ground_height),
                ),
            ));
        }

        let bird = &session.bird;
        sprites.push(Sprite {
            texture: Texture::Bird(bird.frame_index(BIRD_FRAME_COUNT)),
            pos: bird.pos,
            size: Vec2::splat(bird.radius * 2.0),
            rotation: bird.rotation(),
        });

        Self {
            background: session.background,
            sprites,
            score: ScoreLabel {
                text: session.score.score.to_string(),
                scale: session.score_pulse.scale(),
            },
        }
    }

    pub fn bird(&self) -> Option<&Sprite> {
        self.sprites
            .iter()
            .find(|s| matches!(s.texture, Texture::Bird(_)))
    }
}

/// Something that can present frames (the host's sprite engine)
pub trait Renderer {
    fn present(&mut self, frame: &FrameView);
}
