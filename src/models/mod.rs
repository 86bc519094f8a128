pub mod asset;
pub mod preference;
pub mod state;

pub use asset::*;
pub use preference::*;
pub use state::*;
