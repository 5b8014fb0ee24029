use std::{cell::Cell, rc::Rc};

/// Read-only view of a section's smoothed opacity.
///
/// Handed to decorative components when they are built so they can react to the section fade
/// without recomputing it. Only the owning coordinator can write the value.
#[derive(Clone, Debug)]
pub struct FadeSignal(Rc<Cell<f64>>);

impl FadeSignal {
    /// Opacity published by the coordinator during the current tick.
    pub fn get(&self) -> f64 {
        self.0.get()
    }

    /// A signal fixed at `value`, for components rendered outside any section.
    pub fn constant(value: f64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }
}

/// Writer half kept by the coordinator.
#[derive(Debug)]
pub(crate) struct FadePublisher(Rc<Cell<f64>>);

impl FadePublisher {
    pub(crate) fn new(initial: f64) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub(crate) fn publish(&self, value: f64) {
        self.0.set(value);
    }

    pub(crate) fn subscribe(&self) -> FadeSignal {
        FadeSignal(Rc::clone(&self.0))
    }
}
