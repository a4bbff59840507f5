/// Char-art stand-ins for the game's textures. The simulation refers to
/// sprites only through `SpriteRole`; the art itself is a presentation
/// detail owned by the application and passed into draw calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteRole {
    ShipNormal,
    ShipNightmare,
    BulletNormal,
    BulletNightmare,
    HeartNormal,
    HeartNightmare,
}

pub struct Sprite {
    pub rows: &'static [&'static str],
}

impl Sprite {
    pub fn width(&self) -> u16 {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }
}

const SHIP_NORMAL: Sprite = Sprite {
    rows: &[
        r" /\~ ",
        r"<(oo)",
        r" \/\ ",
    ],
};

const SHIP_NIGHTMARE: Sprite = Sprite {
    rows: &[
        r" /\! ",
        r"<(xx)",
        r" \/\ ",
    ],
};

const BULLET_NORMAL: Sprite = Sprite { rows: &["*"] };
const BULLET_NIGHTMARE: Sprite = Sprite { rows: &["+"] };

// Normal mode drops cake, nightmare mode drops plain hearts.
const HEART_NORMAL: Sprite = Sprite {
    rows: &[
        r".---.",
        r"|~~~|",
        r"'---'",
    ],
};

const HEART_NIGHTMARE: Sprite = Sprite {
    rows: &[
        r".^.^.",
        r" \ / ",
        r"  v  ",
    ],
};

/// Registry owned by the application for the lifetime of a run; draw calls
/// borrow it instead of consulting load-once statics.
pub struct SpriteSet {
    ship_normal: Sprite,
    ship_nightmare: Sprite,
    bullet_normal: Sprite,
    bullet_nightmare: Sprite,
    heart_normal: Sprite,
    heart_nightmare: Sprite,
}

impl SpriteSet {
    pub fn load() -> Self {
        SpriteSet {
            ship_normal: SHIP_NORMAL,
            ship_nightmare: SHIP_NIGHTMARE,
            bullet_normal: BULLET_NORMAL,
            bullet_nightmare: BULLET_NIGHTMARE,
            heart_normal: HEART_NORMAL,
            heart_nightmare: HEART_NIGHTMARE,
        }
    }

    pub fn get(&self, role: SpriteRole) -> &Sprite {
        match role {
            SpriteRole::ShipNormal => &self.ship_normal,
            SpriteRole::ShipNightmare => &self.ship_nightmare,
            SpriteRole::BulletNormal => &self.bullet_normal,
            SpriteRole::BulletNightmare => &self.bullet_nightmare,
            SpriteRole::HeartNormal => &self.heart_normal,
            SpriteRole::HeartNightmare => &self.heart_nightmare,
        }
    }
}
