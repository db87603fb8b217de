//! Shell completion generation.

use std::io;

use clap::Command;
use clap_complete::Shell;

/// Write the completion script for `cmd`, registered under its own name.
pub fn generate_completion(cmd: &mut Command, shell: Shell, out: &mut dyn io::Write) {
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, bin_name, out);
}
