#![allow(clippy::print_stdout)]

use clap::Subcommand;
use doctorfinder_domain::Result;

use crate::context::ClientContext;

pub mod account;
pub mod dashboard;
pub mod directory;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Browse and extend the doctor and user directory")]
    Directory {
        #[clap(subcommand)]
        subcommand: directory::Directory,
    },
    Signup(account::Signup),
    Login(account::Login),
    Logout(account::Logout),
    Whoami(account::Whoami),
    #[command(about = "View and edit your patient dashboard")]
    Dashboard {
        #[clap(subcommand)]
        subcommand: dashboard::DashboardCommand,
    },
}

impl Commands {
    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        match self {
            Commands::Directory { subcommand } => subcommand.run(context).await,
            Commands::Signup(signup) => signup.run(context).await,
            Commands::Login(login) => login.run(context).await,
            Commands::Logout(logout) => logout.run(context).await,
            Commands::Whoami(whoami) => whoami.run(context).await,
            Commands::Dashboard { subcommand } => subcommand.run(context).await,
        }
    }
}
