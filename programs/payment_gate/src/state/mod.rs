pub mod counter;
pub mod flow;
pub mod gate;
pub mod merchant;
pub mod router;

pub use counter::*;
pub use flow::*;
pub use gate::*;
pub use merchant::*;
pub use router::*;
