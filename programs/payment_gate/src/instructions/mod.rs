pub mod add_gate;
pub mod check_in;
pub mod check_out;
pub mod delete_gate;
pub mod flow_host;
pub mod initialize;
pub mod rename_gate;

pub use add_gate::*;
pub use check_in::*;
pub use check_out::*;
pub use delete_gate::*;
pub use flow_host::*;
pub use initialize::*;
pub use rename_gate::*;
