use glam::{Quat, Vec3};

/// A pointer ray in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Returns `None` for a zero or non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Ray from `origin` through `target`.
    pub fn through(origin: Vec3, target: Vec3) -> Option<Self> {
        Self::new(origin, target - origin)
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// A ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub point: Vec3,
}

/// Sphere used for pointer hit tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Nearest intersection in front of the ray origin. A ray starting inside
    /// the sphere hits the far side.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        let far = -b + sqrt_disc;
        let distance = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return None;
        };
        Some(Hit {
            distance,
            point: ray.at(distance),
        })
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.distance(self.center) <= self.radius
    }
}

/// Oriented box used for pointer hit tests on elongated bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub rotation: Quat,
}

impl BoundingBox {
    pub fn new(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
            rotation,
        }
    }

    /// Distance from the center to the farthest corner.
    pub fn corner_radius(&self) -> f32 {
        self.half_extents.length()
    }

    /// Nearest intersection in front of the ray origin, slab test in box
    /// space. A ray starting inside the box hits the far side.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let inverse = self.rotation.inverse();
        let origin = inverse * (ray.origin - self.center);
        let direction = inverse * ray.direction;

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let (o, d, h) = (origin[axis], direction[axis], self.half_extents[axis]);
            if d.abs() < f32::EPSILON {
                if o.abs() > h {
                    return None;
                }
                continue;
            }
            let (a, b) = ((-h - o) / d, (h - o) / d);
            t_min = t_min.max(a.min(b));
            t_max = t_max.min(a.max(b));
        }
        if t_min > t_max || t_max < 0.0 {
            return None;
        }
        let distance = if t_min >= 0.0 { t_min } else { t_max };
        Some(Hit {
            distance,
            point: ray.at(distance),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }

    #[test]
    fn ray_direction_is_normalized() {
        let r = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)).unwrap();
        assert_eq!(r.direction, Vec3::NEG_Z);
        assert_eq!(r.at(2.0), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn head_on_hit_reports_near_surface() {
        let s = BoundingSphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0);
        let r = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let hit = s.intersect(&r).unwrap();
        assert!((hit.distance - 8.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, -8.0)).length() < 1e-5);
    }

    #[test]
    fn miss_and_behind() {
        let s = BoundingSphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0);
        let sideways = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let away = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(s.intersect(&sideways).is_none());
        assert!(s.intersect(&away).is_none());
    }

    #[test]
    fn origin_inside_hits_far_side() {
        let s = BoundingSphere::new(Vec3::ZERO, 5.0);
        let r = Ray::new(Vec3::ZERO, Vec3::Y).unwrap();
        let hit = s.intersect(&r).unwrap();
        assert!((hit.point.y - 5.0).abs() < 1e-5);
        assert!(s.contains(Vec3::new(0.0, 4.9, 0.0)));
    }

    #[test]
    fn through_points_at_target() {
        let r = Ray::through(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO).unwrap();
        assert_eq!(r.direction, Vec3::NEG_Y);
    }

    #[test]
    fn box_hit_reports_near_face() {
        let b = BoundingBox::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let r = Ray::new(Vec3::new(0.5, 1.5, 0.0), Vec3::NEG_Z).unwrap();
        let hit = b.intersect(&r).unwrap();
        assert!((hit.distance - 7.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.5, 1.5, -7.0)).length() < 1e-5);
        let wide = Ray::new(Vec3::new(1.5, 0.0, 0.0), Vec3::NEG_Z).unwrap();
        assert!(b.intersect(&wide).is_none());
    }

    #[test]
    fn rotated_box_follows_orientation() {
        let b = BoundingBox::new(
            Vec3::ZERO,
            Vec3::new(5.0, 1.0, 1.0),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        );
        // The long axis now points along y.
        let down = Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::NEG_Y).unwrap();
        let hit = b.intersect(&down).unwrap();
        assert!((hit.point.y - 5.0).abs() < 1e-4);
        let side = Ray::new(Vec3::new(3.0, 20.0, 0.0), Vec3::NEG_Y).unwrap();
        assert!(b.intersect(&side).is_none());
        assert!((b.corner_radius() - 27f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn box_origin_inside_hits_far_side() {
        let b = BoundingBox::new(Vec3::ZERO, Vec3::splat(2.0), Quat::IDENTITY);
        let r = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        assert!((b.intersect(&r).unwrap().point.x - 2.0).abs() < 1e-5);
        let away = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::X).unwrap();
        assert!(b.intersect(&away).is_none());
    }
}
