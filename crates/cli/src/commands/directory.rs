use clap::Subcommand;
use doctorfinder_core::{DirectoryPage, DoctorForm, UserForm};
use doctorfinder_domain::Result;

use crate::context::ClientContext;
use crate::render;

/// Available commands for the `directory` subcommand
#[derive(Subcommand, Debug)]
pub enum Directory {
    List(List),
    AddDoctor(AddDoctor),
    AddUser(AddUser),
}

impl Directory {
    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        match self {
            Directory::List(list) => list.run(context).await,
            Directory::AddDoctor(add) => add.run(context).await,
            Directory::AddUser(add) => add.run(context).await,
        }
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "list", about = "Show every doctor and user in the directory")]
pub struct List {}

impl List {
    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let api = context.directory_api();
        let page = DirectoryPage::load(api.as_ref()).await;
        print!("{}", render::directory(&page));
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "add-doctor", about = "Add a doctor to the directory")]
pub struct AddDoctor {
    #[clap(long)]
    pub name: String,
    #[clap(long)]
    pub email: String,
    #[clap(long, env = "DOCTORFINDER_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[clap(long)]
    pub specialty: String,
    #[clap(long)]
    pub services: String,
    #[clap(long)]
    pub location: String,
    #[clap(long)]
    pub availability: String,
}

impl AddDoctor {
    pub fn form(&self) -> DoctorForm {
        DoctorForm {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            specialty: self.specialty.clone(),
            services: self.services.clone(),
            location: self.location.clone(),
            availability: self.availability.clone(),
        }
    }

    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let api = context.directory_api();
        let mut page = DirectoryPage { doctor_form: self.form(), ..DirectoryPage::default() };
        let created = page.add_doctor(api.as_ref()).await?;
        println!("{}", render::doctor(created));
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "add-user", about = "Add a user to the directory")]
pub struct AddUser {
    #[clap(long)]
    pub name: String,
    #[clap(long)]
    pub email: String,
    #[clap(long, env = "DOCTORFINDER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl AddUser {
    pub fn form(&self) -> UserForm {
        UserForm {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let api = context.directory_api();
        let mut page = DirectoryPage { user_form: self.form(), ..DirectoryPage::default() };
        let created = page.add_user(api.as_ref()).await?;
        println!("{}", render::user(created));
        Ok(())
    }
}
