//! Patient dashboard state

use doctorfinder_domain::{Address, ProfileDocument, Symptom, SymptomSet};

/// Upper-case the first letter of each space-separated word and lower-case
/// the rest.
pub fn capitalize_words(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Editable view of the signed-in patient's profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub display_name: String,
    pub symptoms: SymptomSet,
    /// The selection has been saved and not edited since
    pub symptoms_saved: bool,
    pub address: Address,
    /// The address has been saved and not edited since
    pub address_saved: bool,
}

impl Dashboard {
    /// Build the view from a profile document; a missing document gives an
    /// empty dashboard.
    pub fn from_profile(profile: Option<&ProfileDocument>) -> Self {
        match profile {
            Some(profile) => Self {
                display_name: capitalize_words(&profile.name),
                symptoms: profile.symptoms.clone(),
                address: profile.address.clone().unwrap_or_default(),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Flip one symptom; returns whether it is selected afterwards.
    pub fn toggle_symptom(&mut self, symptom: Symptom) -> bool {
        self.symptoms_saved = false;
        self.symptoms.toggle(symptom)
    }

    pub fn set_symptoms(&mut self, symptoms: SymptomSet) {
        self.symptoms = symptoms;
        self.symptoms_saved = false;
    }

    pub fn edit_address<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Address),
    {
        edit(&mut self.address);
        self.address_saved = false;
    }

    pub fn can_save_symptoms(&self) -> bool {
        !self.symptoms.is_empty() && !self.symptoms_saved
    }

    pub fn can_update_address(&self) -> bool {
        self.address.is_complete() && !self.address_saved
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn capitalize_words_normalizes_case() {
        assert_eq!(capitalize_words("jANE doe"), "Jane Doe");
        assert_eq!(capitalize_words("mary  ann"), "Mary  Ann");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn dashboard_reads_profile() {
        let mut profile = ProfileDocument::new_patient("jane doe", "jdoe", "j@x.com", Utc::now());
        profile.symptoms.insert(Symptom::Cough);

        let dashboard = Dashboard::from_profile(Some(&profile));
        assert_eq!(dashboard.display_name, "Jane Doe");
        assert!(dashboard.symptoms.contains(Symptom::Cough));
        assert_eq!(dashboard.address, Address::default());
    }

    #[test]
    fn save_symptoms_requires_selection_and_unsaved_edit() {
        let mut dashboard = Dashboard::default();
        assert!(!dashboard.can_save_symptoms());

        dashboard.toggle_symptom(Symptom::Fever);
        assert!(dashboard.can_save_symptoms());

        dashboard.symptoms_saved = true;
        assert!(!dashboard.can_save_symptoms());

        dashboard.toggle_symptom(Symptom::Rash);
        assert!(dashboard.can_save_symptoms());
    }

    #[test]
    fn update_address_requires_complete_address() {
        let mut dashboard = Dashboard::default();
        dashboard.edit_address(|address| {
            address.street = "1 Main St".into();
            address.city = "Springfield".into();
            address.state = "IL".into();
        });
        assert!(!dashboard.can_update_address());

        dashboard.edit_address(|address| address.zip_code = "62701".into());
        assert!(dashboard.can_update_address());

        dashboard.address_saved = true;
        assert!(!dashboard.can_update_address());
    }
}
