//! Line-segment intersection and aim-guide geometry.

use glam::Vec2;

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle from an origin and size.
    pub fn from_origin_size(origin: Vec2, width: f32, height: f32) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + width,
            bottom: origin.y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// The four edges in test order: top, right, bottom, left.
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let tl = Vec2::new(self.left, self.top);
        let tr = Vec2::new(self.right, self.top);
        let br = Vec2::new(self.right, self.bottom);
        let bl = Vec2::new(self.left, self.bottom);
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }
}

/// Intersection point of segments `a1-a2` and `b1-b2`, endpoints included.
/// Parallel (and collinear) segments report no intersection.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let denom = (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x);
    if denom == 0.0 {
        return None;
    }

    let t = ((a1.x - b1.x) * (b1.y - b2.y) - (a1.y - b1.y) * (b1.x - b2.x)) / denom;
    let u = -((a1.x - a2.x) * (a1.y - b1.y) - (a1.y - a2.y) * (a1.x - b1.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a1 + (a2 - a1) * t)
    } else {
        None
    }
}

/// First rectangle edge crossed by the segment `from-to`, tested top, right,
/// bottom, left. The first edge with a hit wins, even if a later edge is nearer.
pub fn boundary_intersection(from: Vec2, to: Vec2, bounds: &Bounds) -> Option<Vec2> {
    bounds
        .edges()
        .iter()
        .find_map(|&(e1, e2)| segment_intersection(from, to, e1, e2))
}

/// Angle of a guide ray after bouncing at `hit`.
/// Hits within one unit of a vertical edge mirror horizontally, everything
/// else mirrors vertically.
pub fn reflection_angle(hit: Vec2, angle: f32, bounds: &Bounds) -> f32 {
    if (hit.x - bounds.left).abs() < 1.0 || (hit.x - bounds.right).abs() < 1.0 {
        std::f32::consts::PI - angle
    } else {
        -angle
    }
}

/// Unit direction for an angle in radians.
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Segments the presentation layer draws while the player is aiming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimGuide {
    /// Aim line start (cue ball center).
    pub line_start: Vec2,
    /// Aim line end: clipped at the first boundary hit, else full length.
    pub line_end: Vec2,
    /// Reflected segment from the boundary hit, when the line was clipped.
    pub reflection: Option<(Vec2, Vec2)>,
    /// Stick tip, behind the cue ball opposite the aim direction.
    pub stick_tip: Vec2,
    /// Stick butt.
    pub stick_butt: Vec2,
}

/// Parameters for [`aim_guide`].
#[derive(Debug, Clone, Copy)]
pub struct GuideParams {
    pub line_length: f32,
    pub reflection_length: f32,
    pub stick_offset: f32,
    pub stick_length: f32,
}

/// Build the aim line, its single reflection and the cue stick segment.
pub fn aim_guide(
    cue: Vec2,
    angle: f32,
    pull: f32,
    bounds: &Bounds,
    params: &GuideParams,
) -> AimGuide {
    let dir = direction(angle);
    let far = cue + dir * params.line_length;

    let (line_end, reflection) = match boundary_intersection(cue, far, bounds) {
        Some(hit) => {
            let bounced = reflection_angle(hit, angle, bounds);
            let end = hit + direction(bounced) * params.reflection_length;
            (hit, Some((hit, end)))
        }
        None => (far, None),
    };

    let stick_tip = cue - dir * (params.stick_offset + pull);
    let stick_butt = stick_tip - dir * params.stick_length;

    AimGuide {
        line_start: cue,
        line_end,
        reflection,
        stick_tip,
        stick_butt,
    }
}
