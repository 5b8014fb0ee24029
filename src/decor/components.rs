use std::rc::Rc;

use crate::{
    cache::factory::{
        DecorCache, DecorResource, LaptopModel, MaterialDesc, OrbitPath, PointCloud,
    },
    foundation::core::Vec3,
    foundation::error::{StageError, StageResult},
    section::signal::FadeSignal,
};

/// Below this fade a decorative component neither animates nor renders.
const VISIBLE_FADE: f64 = 0.01;

/// Per-tick behaviour shared by decorative components.
///
/// Components run after the fade phase of the same tick and read their section's
/// [`FadeSignal`]; they never compute fade state themselves.
pub trait Decor: std::fmt::Debug {
    /// Short kind name for logs and dumps.
    fn name(&self) -> &'static str;
    /// Advance the component's own clock.
    fn update(&mut self, delta_secs: f64);
    /// Effective opacity after the section fade.
    fn opacity(&self) -> f64;
    /// Whether the component should render this frame.
    fn visible(&self) -> bool {
        self.opacity() >= VISIBLE_FADE
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Declarative description of one decorative component.
pub enum DecorSpec {
    /// Slowly rotating star shell.
    Stars {
        /// Point-cloud descriptor, e.g. `stars:count=300`.
        points: String,
        /// Material descriptor.
        material: String,
        /// Rotation rate in rad/s at full fade.
        #[serde(default = "default_rotation_speed")]
        rotation_speed: f64,
    },
    /// Drifting dust volume.
    Dust {
        /// Point-cloud descriptor, e.g. `dust:count=120`.
        points: String,
        /// Material descriptor.
        material: String,
        /// Vertical drift in units/s at full fade.
        #[serde(default = "default_drift_speed")]
        drift_speed: f64,
    },
    /// Satellite following an orbit.
    Satellite {
        /// Orbit descriptor, e.g. `orbit:radius=6`.
        orbit: String,
        /// Angular speed in rad/s at full fade.
        #[serde(default = "default_angular_speed")]
        angular_speed: f64,
    },
    /// Laptop whose lid opens with the fade.
    Laptop {
        /// Model descriptor, e.g. `laptop:screen=16x10`.
        model: String,
    },
}

fn default_rotation_speed() -> f64 {
    0.02
}

fn default_drift_speed() -> f64 {
    0.1
}

fn default_angular_speed() -> f64 {
    0.5
}

impl DecorSpec {
    /// Resource descriptors this component pulls from the cache.
    pub fn descriptors(&self) -> Vec<&str> {
        match self {
            Self::Stars {
                points, material, ..
            }
            | Self::Dust {
                points, material, ..
            } => vec![points.as_str(), material.as_str()],
            Self::Satellite { orbit, .. } => vec![orbit.as_str()],
            Self::Laptop { model } => vec![model.as_str()],
        }
    }

    /// Instantiate the component with shared resources from `cache`.
    pub fn build(&self, cache: &DecorCache, signal: FadeSignal) -> StageResult<Box<dyn Decor>> {
        let decor: Box<dyn Decor> = match self {
            Self::Stars {
                points,
                material,
                rotation_speed,
            } => Box::new(StarField::new(
                fetch(cache, points, DecorResource::as_points)?,
                fetch(cache, material, DecorResource::as_material)?,
                *rotation_speed,
                signal,
            )),
            Self::Dust {
                points,
                material,
                drift_speed,
            } => Box::new(DustCloud::new(
                fetch(cache, points, DecorResource::as_points)?,
                fetch(cache, material, DecorResource::as_material)?,
                *drift_speed,
                signal,
            )),
            Self::Satellite {
                orbit,
                angular_speed,
            } => Box::new(Satellite::new(
                fetch(cache, orbit, DecorResource::as_orbit)?,
                *angular_speed,
                signal,
            )),
            Self::Laptop { model } => Box::new(Laptop::new(
                fetch(cache, model, DecorResource::as_laptop)?,
                signal,
            )),
        };
        Ok(decor)
    }
}

/// Cached resource checked to be of the expected variant.
#[derive(Clone, Debug)]
pub struct Shared<T> {
    resource: Rc<DecorResource>,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Shared<T> {
    /// The shared cache entry.
    pub fn resource(&self) -> &Rc<DecorResource> {
        &self.resource
    }
}

fn fetch<T>(
    cache: &DecorCache,
    descriptor: &str,
    project: fn(&DecorResource) -> Option<&T>,
) -> StageResult<Shared<T>> {
    let resource = cache.get(descriptor)?;
    if project(&resource).is_none() {
        return Err(StageError::cache(format!(
            "resource '{descriptor}' has the wrong kind for this component"
        )));
    }
    Ok(Shared {
        resource,
        _marker: std::marker::PhantomData,
    })
}

macro_rules! shared_get {
    ($ty:ty, $proj:ident) => {
        impl Shared<$ty> {
            /// Borrow the typed resource.
            pub fn get(&self) -> &$ty {
                match self.resource.$proj() {
                    Some(v) => v,
                    None => unreachable!("variant checked at fetch"),
                }
            }
        }
    };
}

shared_get!(PointCloud, as_points);
shared_get!(MaterialDesc, as_material);
shared_get!(OrbitPath, as_orbit);
shared_get!(LaptopModel, as_laptop);

fn wrap_angle(a: f64) -> f64 {
    a.rem_euclid(std::f64::consts::TAU)
}

#[derive(Debug)]
/// Background star shell.
pub struct StarField {
    points: Shared<PointCloud>,
    material: Shared<MaterialDesc>,
    rotation_speed: f64,
    rotation: f64,
    signal: FadeSignal,
}

impl StarField {
    /// Star field over shared geometry and material.
    pub fn new(
        points: Shared<PointCloud>,
        material: Shared<MaterialDesc>,
        rotation_speed: f64,
        signal: FadeSignal,
    ) -> Self {
        Self {
            points,
            material,
            rotation_speed,
            rotation: 0.0,
            signal,
        }
    }

    /// Current rotation about the Y axis, in `[0, TAU)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Shared point cloud.
    pub fn points(&self) -> &Shared<PointCloud> {
        &self.points
    }
}

impl Decor for StarField {
    fn name(&self) -> &'static str {
        "stars"
    }

    fn update(&mut self, delta_secs: f64) {
        if delta_secs <= 0.0 || !self.visible() {
            return;
        }
        let step = self.rotation_speed * delta_secs * self.signal.get();
        self.rotation = wrap_angle(self.rotation + step);
    }

    fn opacity(&self) -> f64 {
        self.material.get().opacity * self.signal.get()
    }
}

#[derive(Debug)]
/// Foreground dust that drifts upward and wraps inside its volume.
pub struct DustCloud {
    points: Shared<PointCloud>,
    material: Shared<MaterialDesc>,
    drift_speed: f64,
    offset: f64,
    signal: FadeSignal,
}

impl DustCloud {
    /// Dust cloud over shared geometry and material.
    pub fn new(
        points: Shared<PointCloud>,
        material: Shared<MaterialDesc>,
        drift_speed: f64,
        signal: FadeSignal,
    ) -> Self {
        Self {
            points,
            material,
            drift_speed,
            offset: 0.0,
            signal,
        }
    }

    /// Current vertical drift offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    fn extent(&self) -> f64 {
        self.points
            .get()
            .positions
            .iter()
            .map(|p| f64::from(p.y.abs()))
            .fold(0.0, f64::max)
    }
}

impl Decor for DustCloud {
    fn name(&self) -> &'static str {
        "dust"
    }

    fn update(&mut self, delta_secs: f64) {
        if delta_secs <= 0.0 || !self.visible() {
            return;
        }
        self.offset += self.drift_speed * delta_secs * self.signal.get();
        let span = self.extent() * 2.0;
        if span > 0.0 {
            self.offset = self.offset.rem_euclid(span);
        }
    }

    fn opacity(&self) -> f64 {
        self.material.get().opacity * self.signal.get()
    }
}

#[derive(Debug)]
/// Satellite moving along a shared orbit.
pub struct Satellite {
    orbit: Shared<OrbitPath>,
    angular_speed: f64,
    angle: f64,
    signal: FadeSignal,
}

impl Satellite {
    /// Satellite on `orbit`.
    pub fn new(orbit: Shared<OrbitPath>, angular_speed: f64, signal: FadeSignal) -> Self {
        Self {
            orbit,
            angular_speed,
            angle: 0.0,
            signal,
        }
    }

    /// Current orbit angle.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current position on the orbit.
    pub fn position(&self) -> Vec3 {
        self.orbit.get().position_at(self.angle)
    }
}

impl Decor for Satellite {
    fn name(&self) -> &'static str {
        "satellite"
    }

    fn update(&mut self, delta_secs: f64) {
        if delta_secs <= 0.0 || !self.visible() {
            return;
        }
        self.angle = wrap_angle(self.angle + self.angular_speed * delta_secs * self.signal.get());
    }

    fn opacity(&self) -> f64 {
        self.signal.get()
    }
}

#[derive(Debug)]
/// Laptop whose lid angle follows the section fade.
pub struct Laptop {
    model: Shared<LaptopModel>,
    lid: f64,
    signal: FadeSignal,
}

impl Laptop {
    /// Laptop over a shared model.
    pub fn new(model: Shared<LaptopModel>, signal: FadeSignal) -> Self {
        Self {
            model,
            lid: 0.0,
            signal,
        }
    }

    /// Current lid angle in radians.
    pub fn lid_angle(&self) -> f64 {
        self.lid
    }
}

impl Decor for Laptop {
    fn name(&self) -> &'static str {
        "laptop"
    }

    fn update(&mut self, _delta_secs: f64) {
        self.lid = f64::from(self.model.get().lid_angle) * self.signal.get();
    }

    fn opacity(&self) -> f64 {
        self.signal.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decor/components.rs"]
mod tests;
