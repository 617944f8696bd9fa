use clap::Parser;

use crate::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "doctorfinder")]
#[clap(about = "Browse the doctor directory and manage your patient profile", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
