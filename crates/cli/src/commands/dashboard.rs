use clap::Subcommand;
use doctorfinder_domain::{Result, Symptom, SymptomSet};

use crate::context::ClientContext;
use crate::render;

/// Available commands for the `dashboard` subcommand
#[derive(Subcommand, Debug)]
pub enum DashboardCommand {
    Show(Show),
    Symptoms(Symptoms),
    Address(Address),
}

impl DashboardCommand {
    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        match self {
            DashboardCommand::Show(show) => show.run(context).await,
            DashboardCommand::Symptoms(symptoms) => symptoms.run(context).await,
            DashboardCommand::Address(address) => address.run(context).await,
        }
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "show", about = "Show your name, symptoms and address")]
pub struct Show {}

impl Show {
    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let patient = context.patient().await?;
        let view = patient.portal.open_dashboard().await?;
        print!("{}", render::dashboard(&view));
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "symptoms", about = "Change and save your symptom selection")]
pub struct Symptoms {
    #[clap(long, value_delimiter = ',', help = "Replace the selection with these symptom tags")]
    pub set: Option<Vec<Symptom>>,
    #[clap(long, value_delimiter = ',', help = "Flip these symptom tags in the saved selection")]
    pub toggle: Vec<Symptom>,
    #[clap(long, help = "List the symptom vocabulary and exit")]
    pub list: bool,
}

impl Symptoms {
    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        if self.list {
            for symptom in Symptom::ALL {
                println!("{:<20} {}", symptom.as_str(), symptom.label());
            }
            return Ok(());
        }

        let patient = context.patient().await?;
        let mut view = patient.portal.open_dashboard().await?;
        if let Some(set) = &self.set {
            view.set_symptoms(set.iter().copied().collect::<SymptomSet>());
        }
        for symptom in &self.toggle {
            view.toggle_symptom(*symptom);
        }

        patient.portal.save_symptoms(&mut view).await?;
        println!("Symptoms saved: {}", view.symptoms.tags().join(", "));
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "address", about = "Update your home address")]
pub struct Address {
    #[clap(long)]
    pub street: Option<String>,
    #[clap(long)]
    pub city: Option<String>,
    #[clap(long)]
    pub state: Option<String>,
    #[clap(long)]
    pub zip_code: Option<String>,
}

impl Address {
    /// Overlay the given fields on `address`; omitted flags keep the saved
    /// value.
    pub fn apply(&self, address: &mut doctorfinder_domain::Address) {
        let fields = [
            (&self.street, &mut address.street),
            (&self.city, &mut address.city),
            (&self.state, &mut address.state),
            (&self.zip_code, &mut address.zip_code),
        ];
        for (given, field) in fields {
            if let Some(value) = given {
                *field = value.clone();
            }
        }
    }

    pub async fn run(&self, context: &ClientContext) -> Result<()> {
        let patient = context.patient().await?;
        let mut view = patient.portal.open_dashboard().await?;
        view.edit_address(|address| self.apply(address));

        patient.portal.update_address(&mut view).await?;
        println!("Address updated: {}", view.address);
        Ok(())
    }
}
