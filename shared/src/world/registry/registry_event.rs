/// Structural change of the live entity set, published once per detected change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistryEvent {
    ActorsChanged,
    ControllersChanged,
}

/// Outcome of a single registry poll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryChanges {
    pub actors_changed: bool,
    pub controllers_changed: bool,
}

impl RegistryChanges {
    pub fn is_empty(&self) -> bool {
        !self.actors_changed && !self.controllers_changed
    }

    /// The events to fan out, actors first
    pub fn events(&self) -> Vec<RegistryEvent> {
        let mut output = Vec::new();
        if self.actors_changed {
            output.push(RegistryEvent::ActorsChanged);
        }
        if self.controllers_changed {
            output.push(RegistryEvent::ControllersChanged);
        }
        output
    }
}
