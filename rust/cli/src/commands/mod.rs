//! One module per subcommand.
//!
//! Each exposes `handle_<name>_command(..., out, err) -> Result<(), CliError>`
//! and writes only through the streams it is given, so commands are tested
//! against in-memory buffers.

pub mod cfg;
pub mod play;
pub mod replay;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use play::{PlayArgs, handle_play_command};
pub use replay::handle_replay_command;
pub use sim::{Policy, SimArgs, handle_sim_command};
