// Represents the current high-level state of the application UI
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum State {
    Initialising, // App is starting: building dials, scanning ports
    Running,      // Main panel with port controls and dials
    About,        // Showing the about screen
}
