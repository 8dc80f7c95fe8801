//! Figure capture for agent-generated plots
//!
//! The execution sandbox renders figures as PNG bytes and registers them
//! here; after each turn the chat loop drains the registry and attaches the
//! figure to the turn's record. Access is serialized so a concurrent
//! registration cannot interleave with the read-export-clear step.

use std::sync::Mutex;

/// Registry of figures rendered during the current turn.
#[derive(Debug, Default)]
pub struct PlotRegistry {
    figures: Mutex<Vec<Vec<u8>>>,
}

impl PlotRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rendered figure. Empty buffers are ignored, matching a
    /// figure with no axes.
    pub fn register(&self, png: Vec<u8>) {
        if png.is_empty() {
            return;
        }
        if let Ok(mut figures) = self.figures.lock() {
            figures.push(png);
        }
    }

    /// Export the most recent figure and clear the registry.
    ///
    /// Read, export, and clear happen under a single lock acquisition, so a
    /// registration from another thread lands either entirely before or
    /// entirely after the capture.
    #[must_use]
    pub fn capture(&self) -> Option<Vec<u8>> {
        let mut figures = self.figures.lock().ok()?;
        let latest = figures.pop();
        figures.clear();
        latest
    }

    /// Number of figures currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.figures.lock().map_or(0, |figures| figures.len())
    }

    /// Whether the registry holds no figures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = PlotRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.capture().is_none());
    }

    #[test]
    fn test_register_and_capture() {
        let registry = PlotRegistry::new();
        registry.register(vec![1, 2, 3]);
        assert_eq!(registry.capture(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_capture_clears_registry() {
        let registry = PlotRegistry::new();
        registry.register(vec![1]);
        let _ = registry.capture();
        assert!(registry.is_empty());
        assert!(registry.capture().is_none());
    }

    #[test]
    fn test_capture_returns_most_recent_figure() {
        let registry = PlotRegistry::new();
        registry.register(vec![1]);
        registry.register(vec![2]);
        assert_eq!(registry.capture(), Some(vec![2]));
        // Older figures were dropped by the same capture.
        assert!(registry.capture().is_none());
    }

    #[test]
    fn test_empty_figures_are_ignored() {
        let registry = PlotRegistry::new();
        registry.register(vec![]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_registration_does_not_lose_or_duplicate() {
        let registry = Arc::new(PlotRegistry::new());
        let mut handles = Vec::new();
        for i in 0..8u8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                registry.register(vec![i + 1]);
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 8);
        assert!(registry.capture().is_some());
        assert!(registry.is_empty());
    }
}
