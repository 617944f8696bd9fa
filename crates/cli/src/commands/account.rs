use doctorfinder_core::{LoginForm, SignupForm};
use doctorfinder_domain::Result;
use tracing::info;

use crate::context::ClientContext;
use crate::render;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "signup", about = "Create a patient account and its profile")]
pub struct Signup {
    #[clap(long)]
    pub name: String,
    #[clap(long)]
    pub username: String,
    #[clap(long)]
    pub email: String,
    #[clap(long, env = "DOCTORFINDER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Signup {
    pub fn form(&self) -> SignupForm {
        SignupForm {
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let patient = context.patient().await?;
        let identity = patient.portal.sign_up(&self.form()).await?;
        println!("Account created for {}", identity.email);
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "login", about = "Sign in with email and password")]
pub struct Login {
    #[clap(long)]
    pub email: String,
    #[clap(long, env = "DOCTORFINDER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Login {
    pub fn form(&self) -> LoginForm {
        LoginForm { email: self.email.clone(), password: self.password.clone() }
    }

    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let patient = context.patient().await?;
        let identity = patient.portal.log_in(&self.form()).await?;
        println!("Signed in as {}", identity.email);
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "logout", about = "Sign out and forget the cached profile")]
pub struct Logout {}

impl Logout {
    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let patient = context.patient().await?;
        patient.session.wait_until_resolved().await?;
        patient.portal.log_out().await?;
        println!("Signed out");
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "whoami", about = "Show who is signed in")]
pub struct Whoami {
    #[clap(long, help = "Check the stored session with the identity service")]
    pub verify: bool,
}

impl Whoami {
    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let patient = context.patient().await?;
        if self.verify {
            let verified = patient.identity.verify_session().await?;
            info!(signed_in = verified.is_some(), "session verified");
        }
        let state = patient.session.wait_until_resolved().await?;
        println!("{}", render::session(&state));
        Ok(())
    }
}
