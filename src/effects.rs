use crate::constants::{EXPLOSION_FRAME_TICKS, EXPLOSION_SIZE};
use crate::entities::{Avatar, Entity, UpdateContext};
use crate::presentation::Sprite;
use crate::types::Rect;

/// Visual-only blast; counts down and never collides.
pub struct Explosion {
    pub rect: Rect,
    pub life: i32,
    pub frame: usize,
}

impl Explosion {
    /// Centered on whatever just blew up.
    pub fn at(target: &Rect, life: i32) -> Self {
        Explosion {
            rect: Rect::from_center(target.center(), EXPLOSION_SIZE),
            life,
            frame: 0,
        }
    }
}

impl Entity for Explosion {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn update(&mut self, _ctx: &UpdateContext) {
        self.life -= 1;
        self.frame = (self.life.max(0) / EXPLOSION_FRAME_TICKS % 2) as usize;
    }

    fn is_alive(&self) -> bool {
        self.life >= 0
    }

    fn sprite(&self) -> Sprite {
        Sprite::Explosion { frame: self.frame }
    }
}

/// Bomb-eating field that rides along with the avatar until it runs out.
pub struct GravityField {
    pub rect: Rect,
    pub life: i32,
}

impl GravityField {
    pub fn new(avatar: &Avatar, radius: f64, life: i32) -> Self {
        let diameter = 2.0 * radius;
        GravityField {
            rect: Rect::from_center(avatar.rect.center(), (diameter, diameter)),
            life,
        }
    }
}

impl Entity for GravityField {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn update(&mut self, ctx: &UpdateContext) {
        self.life -= 1;
        self.rect.set_center(ctx.anchor);
    }

    fn is_alive(&self) -> bool {
        self.life >= 0
    }

    fn sprite(&self) -> Sprite {
        Sprite::Gravity
    }
}
