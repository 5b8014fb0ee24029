use crate::{
    cache::key::ResourceKey,
    cache::store::{ResourceCache, ResourceFactory},
    foundation::core::{Rgb8, Vec3},
    foundation::error::{StageError, StageResult},
    foundation::math::Rng64,
};

/// Upper bound on generated point counts.
pub const MAX_POINTS: u32 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Which decorative layer a point cloud belongs to.
pub enum PointLayer {
    /// Background star shell.
    Stars,
    /// Foreground dust volume.
    Dust,
}

#[derive(Clone, Debug, PartialEq)]
/// Procedurally placed points with per-point sizes.
pub struct PointCloud {
    /// Layer the cloud was generated for.
    pub layer: PointLayer,
    /// Point positions in scene units.
    pub positions: Vec<Vec3>,
    /// Point sizes, one per position.
    pub sizes: Vec<f32>,
}

impl PointCloud {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the cloud has no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Shared material description.
pub struct MaterialDesc {
    /// Base color.
    pub color: Rgb8,
    /// Authored opacity in `[0, 1]`.
    pub opacity: f64,
    /// Additive blending (glow).
    pub additive: bool,
}

#[derive(Clone, Debug, PartialEq)]
/// Closed circular path followed by a satellite.
pub struct OrbitPath {
    /// Orbit radius.
    pub radius: f32,
    /// Sampled points around the circle, in the XZ plane.
    pub points: Vec<Vec3>,
}

impl OrbitPath {
    /// Position at `angle` radians, interpolated on the exact circle.
    pub fn position_at(&self, angle: f64) -> Vec3 {
        let r = f64::from(self.radius);
        Vec3::new((r * angle.cos()) as f32, 0.0, (r * angle.sin()) as f32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Laptop model proportions.
pub struct LaptopModel {
    /// Screen width in scene units.
    pub screen_width: f32,
    /// Screen height in scene units.
    pub screen_height: f32,
    /// Lid opening angle in radians.
    pub lid_angle: f32,
}

#[derive(Clone, Debug, PartialEq)]
/// Every resource kind the decor factory knows how to build.
pub enum DecorResource {
    /// Star or dust points.
    Points(PointCloud),
    /// Material descriptor.
    Material(MaterialDesc),
    /// Satellite orbit path.
    Orbit(OrbitPath),
    /// Laptop model.
    Laptop(LaptopModel),
}

impl DecorResource {
    /// Borrow as a point cloud.
    pub fn as_points(&self) -> Option<&PointCloud> {
        match self {
            Self::Points(p) => Some(p),
            _ => None,
        }
    }

    /// Borrow as a material.
    pub fn as_material(&self) -> Option<&MaterialDesc> {
        match self {
            Self::Material(m) => Some(m),
            _ => None,
        }
    }

    /// Borrow as an orbit path.
    pub fn as_orbit(&self) -> Option<&OrbitPath> {
        match self {
            Self::Orbit(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow as a laptop model.
    pub fn as_laptop(&self) -> Option<&LaptopModel> {
        match self {
            Self::Laptop(l) => Some(l),
            _ => None,
        }
    }
}

/// Cache specialised to the decor factory.
pub type DecorCache = ResourceCache<DecorResource, DecorFactory>;

/// Builds [`DecorResource`] values from descriptors.
///
/// Supported kinds:
/// - `stars:count=N,radius=R[,seed=S]`
/// - `dust:count=N,spread=S[,seed=S]`
/// - `material:color=#rrggbb,opacity=O[,additive=true]`
/// - `orbit:radius=R,segments=N`
/// - `laptop:screen=WxH[,lid=DEG]`
///
/// Params may also be given positionally in the order listed (`stars:300,40`).
#[derive(Clone, Copy, Debug, Default)]
pub struct DecorFactory;

impl DecorFactory {
    /// Wrap the factory in a fresh cache.
    pub fn into_cache(self) -> DecorCache {
        ResourceCache::new(self)
    }
}

fn positional_names(kind: &str) -> Option<&'static [&'static str]> {
    let names: &'static [&'static str] = match kind {
        "stars" => &["count", "radius", "seed"],
        "dust" => &["count", "spread", "seed"],
        "material" => &["color", "opacity", "additive"],
        "orbit" => &["radius", "segments"],
        "laptop" => &["screen", "lid"],
        _ => return None,
    };
    Some(names)
}

impl ResourceFactory<DecorResource> for DecorFactory {
    fn canonical_key(&self, key: ResourceKey) -> StageResult<ResourceKey> {
        // Unknown kinds pass through; `build` reports them.
        match positional_names(key.kind()) {
            Some(names) => key.name_positionals(names),
            None => Ok(key),
        }
    }

    fn build(&self, key: &ResourceKey) -> StageResult<DecorResource> {
        let key = self.canonical_key(key.clone())?;
        let key = &key;
        match key.kind() {
            "stars" => build_points(key, PointLayer::Stars).map(DecorResource::Points),
            "dust" => build_points(key, PointLayer::Dust).map(DecorResource::Points),
            "material" => build_material(key).map(DecorResource::Material),
            "orbit" => build_orbit(key).map(DecorResource::Orbit),
            "laptop" => build_laptop(key).map(DecorResource::Laptop),
            other => Err(StageError::validation(format!(
                "unknown resource kind '{other}'"
            ))),
        }
    }
}

fn build_points(key: &ResourceKey, layer: PointLayer) -> StageResult<PointCloud> {
    let (default_count, extent_name, default_extent) = match layer {
        PointLayer::Stars => (300u32, "radius", 50.0f64),
        PointLayer::Dust => (120u32, "spread", 10.0f64),
    };
    let count = key.parse_param::<u32>("count", default_count)?;
    if count > MAX_POINTS {
        return Err(StageError::validation(format!(
            "{key}: count {count} exceeds {MAX_POINTS}"
        )));
    }
    let extent = key.parse_param::<f64>(extent_name, default_extent)?;
    if !extent.is_finite() || extent <= 0.0 {
        return Err(StageError::validation(format!(
            "{key}: {extent_name} must be finite and > 0"
        )));
    }
    let seed = key.parse_param::<u64>("seed", key.stable_hash())?;

    let mut rng = Rng64::new(seed);
    let mut positions = Vec::with_capacity(count as usize);
    let mut sizes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let p = match layer {
            PointLayer::Stars => {
                // Uniform direction, radius in the outer half of the shell.
                let z = rng.next_f64_signed();
                let theta = rng.next_f64_01() * std::f64::consts::TAU;
                let r = extent * (0.5 + 0.5 * rng.next_f64_01());
                let ring = (1.0 - z * z).max(0.0).sqrt();
                Vec3::new(
                    (r * ring * theta.cos()) as f32,
                    (r * ring * theta.sin()) as f32,
                    (r * z) as f32,
                )
            }
            PointLayer::Dust => Vec3::new(
                (extent * rng.next_f64_signed()) as f32,
                (extent * rng.next_f64_signed()) as f32,
                (extent * rng.next_f64_signed()) as f32,
            ),
        };
        positions.push(p);
        sizes.push((0.5 + rng.next_f64_01()) as f32);
    }

    Ok(PointCloud {
        layer,
        positions,
        sizes,
    })
}

fn build_material(key: &ResourceKey) -> StageResult<MaterialDesc> {
    let color = match key.param("color") {
        Some(raw) => Rgb8::parse_hex(raw)?,
        None => Rgb8::WHITE,
    };
    let opacity = key.parse_param::<f64>("opacity", 1.0)?;
    if !(0.0..=1.0).contains(&opacity) {
        return Err(StageError::validation(format!(
            "{key}: opacity must be within [0, 1]"
        )));
    }
    let additive = key.parse_param::<bool>("additive", false)?;
    Ok(MaterialDesc {
        color,
        opacity,
        additive,
    })
}

fn build_orbit(key: &ResourceKey) -> StageResult<OrbitPath> {
    let radius = key.parse_param::<f32>("radius", 6.0)?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(StageError::validation(format!(
            "{key}: radius must be finite and > 0"
        )));
    }
    let segments = key.parse_param::<u32>("segments", 64)?.clamp(3, 4096);
    let path = OrbitPath {
        radius,
        points: Vec::new(),
    };
    let points = (0..segments)
        .map(|i| path.position_at(std::f64::consts::TAU * f64::from(i) / f64::from(segments)))
        .collect();
    Ok(OrbitPath { points, ..path })
}

fn build_laptop(key: &ResourceKey) -> StageResult<LaptopModel> {
    let (w, h) = match key.param("screen") {
        None => (16.0f32, 10.0f32),
        Some(raw) => {
            let (w, h) = raw.split_once(['x', 'X']).ok_or_else(|| {
                StageError::validation(format!("{key}: screen must be WxH, got '{raw}'"))
            })?;
            let parse = |s: &str| {
                s.trim().parse::<f32>().ok().filter(|v| v.is_finite() && *v > 0.0).ok_or_else(
                    || StageError::validation(format!("{key}: invalid screen size '{raw}'")),
                )
            };
            (parse(w)?, parse(h)?)
        }
    };
    let lid_deg = key.parse_param::<f32>("lid", 105.0)?;
    Ok(LaptopModel {
        screen_width: w,
        screen_height: h,
        lid_angle: lid_deg.clamp(0.0, 180.0).to_radians(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/cache/factory.rs"]
mod tests;
