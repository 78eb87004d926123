//! Operating modes of the monitored machinery.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineryState {
    Running,
    Maintenance,
    Shutdown,
}

impl MachineryState {
    /// Every state, in the order the report describes them
    pub const ALL: [MachineryState; 3] = [Self::Running, Self::Maintenance, Self::Shutdown];

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Running => "Machinery is running normally.",
            Self::Maintenance => "Machinery is under maintenance.",
            Self::Shutdown => "Machinery is shut down.",
        }
    }
}

impl fmt::Display for MachineryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
