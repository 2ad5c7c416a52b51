//! Element handles and the property-write seam between engine and host.

use fnv::{FnvHashMap, FnvHashSet};

/// Opaque handle to a host-owned renderable element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// Animatable visual properties. Angles are degrees, offsets are pixels or
/// percent of the element's own size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    X,
    Y,
    XPercent,
    YPercent,
    Scale,
    ScaleX,
    ScaleY,
    SkewX,
    RotateX,
    RotateY,
    /// Whole number shown as the element's text. Writes snap to integers.
    Counter,
}

impl Property {
    pub const ALL: [Property; 12] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::XPercent,
        Property::YPercent,
        Property::Scale,
        Property::ScaleX,
        Property::ScaleY,
        Property::SkewX,
        Property::RotateX,
        Property::RotateY,
        Property::Counter,
    ];

    /// Value of the property when nothing has been written.
    #[inline]
    pub fn default_value(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale | Property::ScaleX | Property::ScaleY => 1.0,
            _ => 0.0,
        }
    }

    /// Part of the CSS transform.
    #[inline]
    pub fn is_transform(self) -> bool {
        !matches!(self, Property::Opacity | Property::Counter)
    }
}

/// Current visual snapshot of one element.
///
/// `opacity` and `counter` are `None` until written so hosts can leave
/// stylesheet values and text in charge of untouched elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    pub opacity: Option<f32>,
    pub x: f32,
    pub y: f32,
    pub x_percent: f32,
    pub y_percent: f32,
    pub scale: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub skew_x: f32,
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub counter: Option<f32>,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: None,
            x: 0.0,
            y: 0.0,
            x_percent: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            counter: None,
        }
    }
}

impl VisualState {
    pub fn get(&self, prop: Property) -> f32 {
        match prop {
            Property::Opacity => self.opacity.unwrap_or(1.0),
            Property::X => self.x,
            Property::Y => self.y,
            Property::XPercent => self.x_percent,
            Property::YPercent => self.y_percent,
            Property::Scale => self.scale,
            Property::ScaleX => self.scale_x,
            Property::ScaleY => self.scale_y,
            Property::SkewX => self.skew_x,
            Property::RotateX => self.rotate_x,
            Property::RotateY => self.rotate_y,
            Property::Counter => self.counter.unwrap_or(0.0),
        }
    }

    pub fn set(&mut self, prop: Property, value: f32) {
        let value = if value.is_finite() {
            value
        } else {
            prop.default_value()
        };
        match prop {
            Property::Opacity => self.opacity = Some(value.clamp(0.0, 1.0)),
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::XPercent => self.x_percent = value,
            Property::YPercent => self.y_percent = value,
            Property::Scale => self.scale = value,
            Property::ScaleX => self.scale_x = value,
            Property::ScaleY => self.scale_y = value,
            Property::SkewX => self.skew_x = value,
            Property::RotateX => self.rotate_x = value,
            Property::RotateY => self.rotate_y = value,
            Property::Counter => self.counter = Some(value.round()),
        }
    }

    /// Reset a property to its unwritten state.
    pub fn clear(&mut self, prop: Property) {
        match prop {
            Property::Opacity => self.opacity = None,
            Property::Counter => self.counter = None,
            other => self.set(other, other.default_value()),
        }
    }

    /// True when no transform component differs from identity.
    pub fn is_identity_transform(&self) -> bool {
        Property::ALL
            .iter()
            .filter(|p| p.is_transform())
            .all(|p| self.get(*p) == p.default_value())
    }
}

/// Host-side receiver of property writes.
pub trait StyleSink {
    /// Whether the handle still refers to an attached element.
    fn is_live(&self, target: TargetId) -> bool;
    fn read(&self, target: TargetId, prop: Property) -> f32;
    fn write(&mut self, target: TargetId, prop: Property, value: f32);
    fn clear(&mut self, target: TargetId, prop: Property) {
        self.write(target, prop, prop.default_value());
    }
}

/// In-memory sink used by the native preview and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    live: FnvHashSet<TargetId>,
    states: FnvHashMap<TargetId, VisualState>,
    next_id: u32,
    pub writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a live target.
    pub fn spawn(&mut self) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.live.insert(id);
        id
    }

    /// Allocate a handle that never resolves to an element.
    pub fn dangling(&mut self) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn detach(&mut self, target: TargetId) {
        self.live.remove(&target);
    }

    pub fn state(&self, target: TargetId) -> VisualState {
        self.states.get(&target).copied().unwrap_or_default()
    }
}

impl StyleSink for MemorySink {
    fn is_live(&self, target: TargetId) -> bool {
        self.live.contains(&target)
    }

    fn read(&self, target: TargetId, prop: Property) -> f32 {
        self.state(target).get(prop)
    }

    fn write(&mut self, target: TargetId, prop: Property, value: f32) {
        if !self.is_live(target) {
            return;
        }
        self.writes += 1;
        self.states.entry(target).or_default().set(prop, value);
    }

    fn clear(&mut self, target: TargetId, prop: Property) {
        if let Some(state) = self.states.get_mut(&target) {
            state.clear(prop);
        }
    }
}
