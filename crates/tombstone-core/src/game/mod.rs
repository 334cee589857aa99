mod context;
mod high_score;
mod resume;
mod state;

pub use context::*;
pub use high_score::*;
pub use resume::*;
pub use state::*;
