use glam::Vec2;

use crate::api::config::PhysicsConfig;
use crate::core::geometry::Bounds;

/// Fraction of the viewport covered by the table rectangle.
const TABLE_WIDTH_FRACTION: f32 = 0.9;
const TABLE_HEIGHT_FRACTION: f32 = 0.8;

/// Table geometry derived from the viewport.
///
/// Two frames coexist. The table rectangle (90% × 80% of the viewport,
/// centered) places pockets and racks. Ball bounce uses a separate frame inset
/// a fixed padding from the viewport edges, so the cushions a ball feels do
/// not line up with the drawn table on most viewport sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table {
    /// Viewport size in game units.
    pub viewport: Vec2,
    /// Table rectangle used for pockets and level layout.
    pub rect: Bounds,
    /// Inset from the viewport edges for boundary bounce and the aim guide.
    pub padding: f32,
}

impl Table {
    pub fn from_viewport(width: f32, height: f32, physics: &PhysicsConfig) -> Self {
        let table_w = width * TABLE_WIDTH_FRACTION;
        let table_h = height * TABLE_HEIGHT_FRACTION;
        let origin = Vec2::new((width - table_w) / 2.0, (height - table_h) / 2.0);
        Self {
            viewport: Vec2::new(width, height),
            rect: Bounds::from_origin_size(origin, table_w, table_h),
            padding: physics.bounce_padding,
        }
    }

    /// Frame the aim guide is clipped against: the viewport inset by `padding`.
    pub fn guide_bounds(&self) -> Bounds {
        Bounds::new(
            self.padding,
            self.padding,
            self.viewport.x - self.padding,
            self.viewport.y - self.padding,
        )
    }

    /// Where the cue ball starts each level.
    pub fn cue_start(&self) -> Vec2 {
        Vec2::new(
            self.rect.left + self.rect.width() * 0.25,
            self.rect.top + self.rect.height() / 2.0,
        )
    }

    /// Where the cue ball returns after being pocketed. Measured from the
    /// viewport, not the table rectangle.
    pub fn cue_restart(&self) -> Vec2 {
        Vec2::new(self.viewport.x * 0.25, self.viewport.y / 2.0)
    }

    /// Anchor for object-ball racks.
    pub fn rack_anchor(&self) -> Vec2 {
        Vec2::new(
            self.rect.left + self.rect.width() * 0.75,
            self.rect.top + self.rect.height() / 2.0,
        )
    }

    /// Pocket centers: four corners plus the midpoints of the top and bottom edges.
    pub fn pocket_positions(&self) -> [Vec2; 6] {
        let r = &self.rect;
        let mid_x = r.left + r.width() / 2.0;
        [
            Vec2::new(r.left, r.top),
            Vec2::new(mid_x, r.top),
            Vec2::new(r.right, r.top),
            Vec2::new(r.left, r.bottom),
            Vec2::new(mid_x, r.bottom),
            Vec2::new(r.right, r.bottom),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_centered_in_viewport() {
        let table = Table::from_viewport(800.0, 600.0, &PhysicsConfig::default());
        assert!((table.rect.left - 40.0).abs() < 1e-4);
        assert!((table.rect.top - 60.0).abs() < 1e-4);
        assert!((table.rect.width() - 720.0).abs() < 1e-3);
        assert!((table.rect.height() - 480.0).abs() < 1e-3);
    }

    #[test]
    fn cue_start_and_restart_differ() {
        let table = Table::from_viewport(800.0, 600.0, &PhysicsConfig::default());
        assert!((table.cue_start() - Vec2::new(220.0, 300.0)).length() < 1e-3);
        assert_eq!(table.cue_restart(), Vec2::new(200.0, 300.0));
    }

    #[test]
    fn six_pockets_on_table_edges() {
        let table = Table::from_viewport(1000.0, 500.0, &PhysicsConfig::default());
        let pockets = table.pocket_positions();
        for p in pockets {
            let on_vertical = (p.x - table.rect.left).abs() < 1e-3
                || (p.x - table.rect.right).abs() < 1e-3
                || (p.x - table.rect.center().x).abs() < 1e-3;
            let on_horizontal = (p.y - table.rect.top).abs() < 1e-3
                || (p.y - table.rect.bottom).abs() < 1e-3;
            assert!(on_vertical && on_horizontal, "pocket off the table edge: {:?}", p);
        }
    }

    #[test]
    fn guide_bounds_use_padding() {
        let table = Table::from_viewport(800.0, 600.0, &PhysicsConfig::default());
        assert_eq!(table.guide_bounds(), Bounds::new(50.0, 50.0, 750.0, 550.0));
    }
}
