//! Match session module: the 1v1 match lifecycle, round resolution, and the
//! manager that spawns and tracks live matches.

pub mod messages;
pub mod resolver;
pub mod server;
pub mod state;
