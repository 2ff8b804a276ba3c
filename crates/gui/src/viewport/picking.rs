use glam::{DQuat, DVec3};
use shared::{Catalog, Dimensions, ElementId, PlacedElement};

use crate::state::elements::element_type_def;

/// A ray in world space (centimeters)
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Ray pointing straight down onto (x, z)
    pub fn vertical(x: f64, z: f64) -> Self {
        Self::new(DVec3::new(x, 10_000.0, z), DVec3::NEG_Y)
    }
}

/// What a pick landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    Ground,
    Element(ElementId),
}

/// One ray hit, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: DVec3,
    pub hit: HitTarget,
    pub distance: f64,
}

impl Intersection {
    pub fn ground(x: f64, z: f64) -> Self {
        Self {
            point: DVec3::new(x, 0.0, z),
            hit: HitTarget::Ground,
            distance: 0.0,
        }
    }

    pub fn element(id: ElementId, point: DVec3) -> Self {
        Self {
            point,
            hit: HitTarget::Element(id),
            distance: 0.0,
        }
    }

    pub fn element_id(&self) -> Option<ElementId> {
        match self.hit {
            HitTarget::Element(id) => Some(id),
            HitTarget::Ground => None,
        }
    }
}

/// Oriented box of a placed element, rotated around Y about its center
#[derive(Debug, Clone, Copy)]
pub struct ElementBox {
    pub id: ElementId,
    pub center: DVec3,
    pub dimensions: Dimensions,
    pub rotation_y: f64,
}

impl ElementBox {
    /// `None` when the element's type no longer resolves
    pub fn from_element(element: &PlacedElement, catalog: &Catalog) -> Option<Self> {
        let def = element_type_def(element, catalog)?;
        Some(Self {
            id: element.id,
            center: DVec3::from_array(element.transform.position),
            dimensions: def.dimensions,
            rotation_y: element.transform.rotation_y,
        })
    }

    pub fn half_extents(&self) -> DVec3 {
        DVec3::new(
            self.dimensions.width,
            self.dimensions.height,
            self.dimensions.depth,
        ) * 0.5
    }

    /// Y of the top face
    pub fn top_y(&self) -> f64 {
        self.center.y + self.dimensions.height / 2.0
    }

    /// The 8 corners in world space
    pub fn corners(&self) -> [DVec3; 8] {
        let h = self.half_extents();
        let rot = DQuat::from_rotation_y(self.rotation_y);
        let mut out = [DVec3::ZERO; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            let local = DVec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            );
            *corner = self.center + rot * local;
        }
        out
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(origin: DVec3, direction: DVec3, min: DVec3, max: DVec3) -> Option<f64> {
    let inv_dir = direction.recip();

    let t1 = (min.x - origin.x) * inv_dir.x;
    let t2 = (max.x - origin.x) * inv_dir.x;
    let t3 = (min.y - origin.y) * inv_dir.y;
    let t4 = (max.y - origin.y) * inv_dir.y;
    let t5 = (min.z - origin.z) * inv_dir.z;
    let t6 = (max.z - origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax || tmin.is_nan() {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Ray against an element box: the ray is moved into the box frame, then
/// tested against the axis-aligned box there.
pub fn ray_box(ray: &Ray, element: &ElementBox) -> Option<f64> {
    let inv_rot = DQuat::from_rotation_y(-element.rotation_y);
    let origin = inv_rot * (ray.origin - element.center);
    let direction = inv_rot * ray.direction;
    let h = element.half_extents();
    ray_aabb(origin, direction, -h, h)
}

/// Ray against the y = 0 ground, bounded to `±half_extent` on X and Z
pub fn ray_ground(ray: &Ray, half_extent: f64) -> Option<f64> {
    if ray.direction.y.abs() < 1e-12 {
        return None;
    }
    let t = -ray.origin.y / ray.direction.y;
    if t < 0.0 {
        return None;
    }
    let p = ray.at(t);
    (p.x.abs() <= half_extent && p.z.abs() <= half_extent).then_some(t)
}

/// All hits of `ray`, nearest first. `exclude` drops one element (the one
/// being moved).
pub fn intersect_scene(
    ray: &Ray,
    elements: &[ElementBox],
    exclude: Option<ElementId>,
    ground_half_extent: f64,
) -> Vec<Intersection> {
    let mut hits: Vec<Intersection> = elements
        .iter()
        .filter(|b| Some(b.id) != exclude)
        .filter_map(|b| {
            ray_box(ray, b).map(|t| Intersection {
                point: ray.at(t),
                hit: HitTarget::Element(b.id),
                distance: t,
            })
        })
        .collect();

    if let Some(t) = ray_ground(ray, ground_half_extent) {
        hits.push(Intersection {
            point: ray.at(t),
            hit: HitTarget::Ground,
            distance: t,
        });
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
