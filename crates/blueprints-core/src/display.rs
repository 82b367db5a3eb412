//! Render trigger for the blueprint display.
//!
//! Drawing happens exactly when a blueprint is selected and the drawing
//! surface is ready. Both facts arrive as events in any order; the state
//! below tells the caller when to draw.

/// Where the display is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayPhase {
    /// Nothing selected.
    #[default]
    NoSelection,
    /// A blueprint is selected but there is no surface to draw on.
    AwaitingSurface,
    /// The selection has been drawn on the current surface.
    Rendered,
}

/// Events that move the display between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    /// A (possibly different) blueprint was selected.
    Selected,
    /// The surface became visible, or asks to be drawn again.
    SurfaceReady,
    /// The surface was closed; its drawing is gone with it.
    SurfaceClosed,
    /// The selection was dropped (e.g. a new lookup replaced the list).
    SelectionCleared,
}

/// Display lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayState {
    phase: DisplayPhase,
    surface_ready: bool,
}

impl DisplayState {
    /// Initial state: no selection, no surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> DisplayPhase {
        self.phase
    }

    /// Whether a drawing surface is currently available.
    pub fn surface_ready(&self) -> bool {
        self.surface_ready
    }

    /// Apply an event.
    ///
    /// Returns the next state and whether the selection must be drawn now.
    pub fn handle(self, event: DisplayEvent) -> (Self, bool) {
        let has_selection = self.phase != DisplayPhase::NoSelection;
        let (has_selection, surface_ready) = match event {
            DisplayEvent::Selected => (true, self.surface_ready),
            DisplayEvent::SurfaceReady => (has_selection, true),
            DisplayEvent::SurfaceClosed => (has_selection, false),
            DisplayEvent::SelectionCleared => (false, self.surface_ready),
        };

        let render = has_selection
            && surface_ready
            && matches!(event, DisplayEvent::Selected | DisplayEvent::SurfaceReady);

        let phase = match (has_selection, surface_ready) {
            (false, _) => DisplayPhase::NoSelection,
            (true, true) => DisplayPhase::Rendered,
            (true, false) => DisplayPhase::AwaitingSurface,
        };

        (Self { phase, surface_ready }, render)
    }
}
