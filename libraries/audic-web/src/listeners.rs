//! Event listener bookkeeping

use audic_core::PlayerEvent;

/// Listeners attached to the element, kept so `destroy` can detach them
#[derive(Debug)]
pub struct ListenerRegistry<F> {
    entries: Vec<(PlayerEvent, F)>,
}

impl<F> Default for ListenerRegistry<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: PartialEq> ListenerRegistry<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listener; returns `false` if it was already registered
    pub fn add(&mut self, event: PlayerEvent, listener: F) -> bool {
        if self.contains(event, &listener) {
            return false;
        }
        self.entries.push((event, listener));
        true
    }

    /// Forget a listener; returns `false` if it was unknown
    pub fn remove(&mut self, event: PlayerEvent, listener: &F) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|(e, l)| !(*e == event && l == listener));
        self.entries.len() != before
    }

    pub fn contains(&self, event: PlayerEvent, listener: &F) -> bool {
        self.entries
            .iter()
            .any(|(e, l)| *e == event && l == listener)
    }

    /// Number of listeners for one event
    pub fn count(&self, event: PlayerEvent) -> usize {
        self.entries.iter().filter(|(e, _)| *e == event).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every listener, leaving the registry empty
    pub fn drain(&mut self) -> Vec<(PlayerEvent, F)> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_listener_ignored() {
        let mut registry = ListenerRegistry::new();
        assert!(registry.add(PlayerEvent::Ended, 1));
        assert!(!registry.add(PlayerEvent::Ended, 1));
        assert!(registry.add(PlayerEvent::Pause, 1));
        assert_eq!(registry.count(PlayerEvent::Ended), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_only_matching_event() {
        let mut registry = ListenerRegistry::new();
        registry.add(PlayerEvent::Ended, 1);
        registry.add(PlayerEvent::Pause, 1);

        assert!(registry.remove(PlayerEvent::Ended, &1));
        assert!(!registry.remove(PlayerEvent::Ended, &1));
        assert!(registry.contains(PlayerEvent::Pause, &1));
    }

    #[test]
    fn test_drain_empties() {
        let mut registry = ListenerRegistry::new();
        registry.add(PlayerEvent::Play, 1);
        registry.add(PlayerEvent::Playing, 2);

        let drained = registry.drain();
        assert_eq!(drained, vec![(PlayerEvent::Play, 1), (PlayerEvent::Playing, 2)]);
        assert!(registry.is_empty());
    }
}
