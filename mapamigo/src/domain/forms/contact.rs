//! Contact form shared by the add and edit screens.

use crate::domain::ContactService;
use crate::domain::form::{FieldMasker, FieldValidator, FormSchema, FormState};
use crate::domain::location::{Coordinates, full_address};
use crate::domain::ports::{CepDigits, KeyValueStore, PostalAddress};
use crate::domain::validation::{
    validate_national_id, validate_not_empty, validate_phone, validate_postal_code, validate_state,
};
use crate::domain::{Contact, ContactId, ContactPatch, DomainError, OwnerId};

use super::{SubmitOutcome, route_service_error};

/// Fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContactField {
    Name,
    NationalId,
    Phone,
    PostalCode,
    Street,
    Number,
    Complement,
    Neighborhood,
    City,
    State,
}

/// Field table for [`ContactForm`].
#[derive(Debug, Clone, Copy)]
pub struct ContactSchema;

impl FormSchema for ContactSchema {
    type Field = ContactField;

    const FIELDS: &'static [ContactField] = &[
        ContactField::Name,
        ContactField::NationalId,
        ContactField::Phone,
        ContactField::PostalCode,
        ContactField::Street,
        ContactField::Number,
        ContactField::Complement,
        ContactField::Neighborhood,
        ContactField::City,
        ContactField::State,
    ];

    fn validator(field: ContactField) -> Option<FieldValidator> {
        match field {
            ContactField::Name
            | ContactField::Street
            | ContactField::Number
            | ContactField::Neighborhood
            | ContactField::City => Some(validate_not_empty),
            ContactField::NationalId => Some(validate_national_id),
            ContactField::Phone => Some(validate_phone),
            ContactField::PostalCode => Some(validate_postal_code),
            ContactField::State => Some(validate_state),
            ContactField::Complement => None,
        }
    }

    fn masker(field: ContactField) -> Option<FieldMasker> {
        match field {
            ContactField::Name => Some(brdoc::text::capitalize),
            ContactField::NationalId => Some(brdoc::cpf::mask),
            ContactField::Phone => Some(brdoc::phone::mask),
            ContactField::PostalCode => Some(brdoc::cep::mask),
            ContactField::State => Some(brdoc::text::uppercase),
            ContactField::Street
            | ContactField::Number
            | ContactField::Complement
            | ContactField::Neighborhood
            | ContactField::City => None,
        }
    }

    fn required(field: ContactField) -> bool {
        !matches!(field, ContactField::Complement)
    }
}

/// Contact form and its two submission flows.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    state: FormState<ContactSchema>,
}

impl ContactForm {
    /// Blank form for the add screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated from an existing record for the edit screen.
    /// Stored digits gain their masks again on the way in.
    pub fn for_contact(contact: &Contact) -> Self {
        Self {
            state: FormState::with_initial([
                (ContactField::Name, contact.name.clone()),
                (ContactField::NationalId, brdoc::cpf::mask(&contact.national_id)),
                (ContactField::Phone, brdoc::phone::mask(&contact.phone)),
                (ContactField::PostalCode, brdoc::cep::mask(&contact.postal_code)),
                (ContactField::Street, contact.street.clone()),
                (ContactField::Number, contact.number.clone()),
                (ContactField::Complement, contact.complement.clone()),
                (ContactField::Neighborhood, contact.neighborhood.clone()),
                (ContactField::City, contact.city.clone()),
                (ContactField::State, contact.state.clone()),
            ]),
        }
    }

    /// Controller state, for typing and display.
    pub fn state(&self) -> &FormState<ContactSchema> {
        &self.state
    }

    /// Mutable controller state.
    pub fn state_mut(&mut self) -> &mut FormState<ContactSchema> {
        &mut self.state
    }

    /// The postal code's digits once exactly eight of them were typed; the
    /// lookup must not fire before that.
    pub fn postal_code_digits(&self) -> Option<CepDigits> {
        CepDigits::new(self.state.value(ContactField::PostalCode))
    }

    /// Copy a fetched address into the address fields, clearing their error
    /// slots like any other edit.
    pub fn apply_postal_address(&mut self, address: &PostalAddress) {
        self.state.update_field(ContactField::Street, &address.street);
        self.state.update_field(ContactField::Neighborhood, &address.neighborhood);
        self.state.update_field(ContactField::City, &address.city);
        self.state.update_field(ContactField::State, &address.state);
    }

    /// The geocodable address line, once street, number, city, and state are
    /// all filled in.
    pub fn full_address(&self) -> Option<String> {
        full_address(
            self.state.value(ContactField::Street),
            self.state.value(ContactField::Number),
            self.state.value(ContactField::City),
            self.state.value(ContactField::State),
        )
    }

    fn build_contact(&self, id: ContactId, coordinates: Coordinates) -> Contact {
        Contact {
            id,
            name: self.state.value(ContactField::Name).to_owned(),
            national_id: self.state.value(ContactField::NationalId).to_owned(),
            phone: self.state.value(ContactField::Phone).to_owned(),
            postal_code: self.state.value(ContactField::PostalCode).to_owned(),
            street: self.state.value(ContactField::Street).to_owned(),
            number: self.state.value(ContactField::Number).to_owned(),
            complement: self.state.value(ContactField::Complement).to_owned(),
            neighborhood: self.state.value(ContactField::Neighborhood).to_owned(),
            city: self.state.value(ContactField::City).to_owned(),
            state: self.state.value(ContactField::State).to_owned(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }

    /// Validate and store a new contact. Submission needs resolved
    /// coordinates; without them the flow stops without a message, leaving
    /// the caller to explain the missing pin.
    pub fn submit_new<S: KeyValueStore>(
        &mut self,
        contacts: &ContactService<S>,
        owner: &OwnerId,
        coordinates: Option<Coordinates>,
    ) -> Result<SubmitOutcome<Contact>, DomainError> {
        if self.state.validate_all().any() {
            return Ok(SubmitOutcome::Blocked);
        }
        let Some(coordinates) = coordinates else {
            return Ok(SubmitOutcome::Blocked);
        };

        let national_id = self.state.value(ContactField::NationalId).to_owned();
        if contacts
            .get_contact_by_national_id(owner, &national_id)?
            .is_some()
        {
            self.state.set_general_error("Este CPF já está cadastrado.");
            return Ok(SubmitOutcome::Blocked);
        }

        let contact = self.build_contact(ContactId::random(), coordinates);
        match contacts.create_contact(owner, contact.clone()) {
            Ok(()) => {
                self.state.reset();
                Ok(SubmitOutcome::Saved(contact))
            }
            Err(error) => {
                route_service_error(&mut self.state, error)?;
                Ok(SubmitOutcome::Blocked)
            }
        }
    }

    /// Validate and persist edits to `original`. The stored coordinates are
    /// kept; the freshly geocoded pin only gates the submission.
    pub fn submit_edit<S: KeyValueStore>(
        &mut self,
        contacts: &ContactService<S>,
        owner: &OwnerId,
        original: &Contact,
        coordinates: Option<Coordinates>,
    ) -> Result<SubmitOutcome<Contact>, DomainError> {
        if self.state.validate_all().any() {
            return Ok(SubmitOutcome::Blocked);
        }
        if coordinates.is_none() {
            return Ok(SubmitOutcome::Blocked);
        }

        let national_id = self.state.value(ContactField::NationalId).to_owned();
        if national_id != original.national_id
            && contacts
                .get_contact_by_national_id(owner, &national_id)?
                .is_some()
        {
            self.state.set_general_error("Este CPF já está cadastrado.");
            return Ok(SubmitOutcome::Blocked);
        }

        let patch = ContactPatch {
            name: Some(self.state.value(ContactField::Name).to_owned()),
            national_id: Some(national_id),
            phone: Some(self.state.value(ContactField::Phone).to_owned()),
            postal_code: Some(self.state.value(ContactField::PostalCode).to_owned()),
            street: Some(self.state.value(ContactField::Street).to_owned()),
            number: Some(self.state.value(ContactField::Number).to_owned()),
            complement: Some(self.state.value(ContactField::Complement).to_owned()),
            neighborhood: Some(self.state.value(ContactField::Neighborhood).to_owned()),
            city: Some(self.state.value(ContactField::City).to_owned()),
            state: Some(self.state.value(ContactField::State).to_owned()),
            latitude: None,
            longitude: None,
        };
        match contacts.update_contact(owner, original.id, &patch) {
            Ok(updated) => Ok(SubmitOutcome::Saved(updated)),
            Err(error) => {
                route_service_error(&mut self.state, error)?;
                Ok(SubmitOutcome::Blocked)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::outbound::storage::MemoryKeyValueStore;

    fn owner() -> OwnerId {
        OwnerId::new("ana@example.com")
    }

    fn service() -> ContactService<MemoryKeyValueStore> {
        ContactService::new(Arc::new(MemoryKeyValueStore::default()))
    }

    fn coordinates() -> Option<Coordinates> {
        Some(Coordinates {
            latitude: -23.561_414,
            longitude: -46.655_881,
        })
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.state_mut().update_field(ContactField::Name, "carlos pereira");
        form.state_mut().update_field(ContactField::NationalId, "52998224725");
        form.state_mut().update_field(ContactField::Phone, "11912345678");
        form.state_mut().update_field(ContactField::PostalCode, "01310100");
        form.state_mut().update_field(ContactField::Street, "Avenida Paulista");
        form.state_mut().update_field(ContactField::Number, "1578");
        form.state_mut().update_field(ContactField::Neighborhood, "Bela Vista");
        form.state_mut().update_field(ContactField::City, "São Paulo");
        form.state_mut().update_field(ContactField::State, "sp");
        form
    }

    #[rstest]
    fn typing_applies_the_field_masks() {
        let form = filled_form();
        assert_eq!(form.state().value(ContactField::Name), "Carlos Pereira");
        assert_eq!(form.state().value(ContactField::NationalId), "529.982.247-25");
        assert_eq!(form.state().value(ContactField::Phone), "(11) 91234-5678");
        assert_eq!(form.state().value(ContactField::PostalCode), "01310-100");
        assert_eq!(form.state().value(ContactField::State), "SP");
    }

    #[rstest]
    fn postal_digits_require_all_eight() {
        let mut form = ContactForm::new();
        form.state_mut().update_field(ContactField::PostalCode, "0131010");
        assert_eq!(form.postal_code_digits(), None);

        form.state_mut().update_field(ContactField::PostalCode, "01310100");
        assert_eq!(
            form.postal_code_digits().map(|cep| cep.as_str().to_owned()),
            Some("01310100".to_owned())
        );
    }

    #[rstest]
    fn fetched_address_lands_in_the_address_fields() {
        let mut form = ContactForm::new();
        form.state_mut().set_error(ContactField::Street, "Campo obrigatório.");
        form.apply_postal_address(&PostalAddress {
            street: "Avenida Paulista".to_owned(),
            neighborhood: "Bela Vista".to_owned(),
            city: "São Paulo".to_owned(),
            state: "SP".to_owned(),
        });

        assert_eq!(form.state().value(ContactField::Street), "Avenida Paulista");
        assert_eq!(form.state().value(ContactField::State), "SP");
        assert_eq!(form.state().errors().get(ContactField::Street), "");
    }

    #[rstest]
    fn full_address_requires_the_four_parts() {
        let mut form = ContactForm::new();
        assert_eq!(form.full_address(), None);

        form.state_mut().update_field(ContactField::Street, "Avenida Paulista");
        form.state_mut().update_field(ContactField::Number, "1578");
        form.state_mut().update_field(ContactField::City, "São Paulo");
        form.state_mut().update_field(ContactField::State, "SP");
        assert_eq!(
            form.full_address().as_deref(),
            Some("Avenida Paulista, 1578, São Paulo - SP")
        );
    }

    #[rstest]
    fn invalid_national_id_blocks_before_the_store() {
        let contacts = service();
        let mut form = filled_form();
        form.state_mut().update_field(ContactField::NationalId, "52998224726");

        let outcome = form
            .submit_new(&contacts, &owner(), coordinates())
            .expect("flow runs");
        assert_eq!(outcome, SubmitOutcome::Blocked);
        assert_eq!(
            form.state().errors().get(ContactField::NationalId),
            "CPF inválido."
        );
        assert!(contacts.list_contacts(&owner()).expect("list succeeds").is_empty());
    }

    #[rstest]
    fn missing_coordinates_block_without_a_message() {
        let contacts = service();
        let mut form = filled_form();

        let outcome = form.submit_new(&contacts, &owner(), None).expect("flow runs");
        assert_eq!(outcome, SubmitOutcome::Blocked);
        assert!(!form.state().errors().any());
        assert!(contacts.list_contacts(&owner()).expect("list succeeds").is_empty());
    }

    #[rstest]
    fn duplicate_national_id_reports_in_the_general_slot() {
        let contacts = service();
        let mut first = filled_form();
        let saved = first
            .submit_new(&contacts, &owner(), coordinates())
            .expect("flow runs");
        assert!(matches!(saved, SubmitOutcome::Saved(_)));

        let mut second = filled_form();
        let outcome = second
            .submit_new(&contacts, &owner(), coordinates())
            .expect("flow runs");
        assert_eq!(outcome, SubmitOutcome::Blocked);
        assert_eq!(
            second.state().errors().general(),
            "Este CPF já está cadastrado."
        );
        assert_eq!(contacts.list_contacts(&owner()).expect("list succeeds").len(), 1);
    }

    #[rstest]
    fn saved_contact_round_trips_through_the_store() {
        let contacts = service();
        let mut form = filled_form();

        let outcome = form
            .submit_new(&contacts, &owner(), coordinates())
            .expect("flow runs");
        let SubmitOutcome::Saved(contact) = outcome else {
            panic!("expected a saved outcome, got {outcome:?}");
        };
        assert_eq!(contact.national_id, "529.982.247-25");
        assert_eq!(contact.latitude, -23.561_414);
        assert_eq!(form.state().value(ContactField::Name), "");

        let reloaded = contacts
            .get_contact_by_id(&owner(), contact.id)
            .expect("lookup succeeds");
        assert_eq!(reloaded, Some(contact));
    }

    #[rstest]
    fn edit_keeps_the_stored_coordinates() {
        let contacts = service();
        let mut add = filled_form();
        let SubmitOutcome::Saved(original) = add
            .submit_new(&contacts, &owner(), coordinates())
            .expect("flow runs")
        else {
            panic!("seed contact failed to save");
        };

        let mut edit = ContactForm::for_contact(&original);
        edit.state_mut().update_field(ContactField::Number, "2000");
        let moved = Some(Coordinates {
            latitude: -22.0,
            longitude: -47.0,
        });
        let outcome = edit
            .submit_edit(&contacts, &owner(), &original, moved)
            .expect("flow runs");
        let SubmitOutcome::Saved(updated) = outcome else {
            panic!("expected a saved outcome, got {outcome:?}");
        };
        assert_eq!(updated.number, "2000");
        assert_eq!(updated.latitude, original.latitude);
        assert_eq!(updated.longitude, original.longitude);
    }

    #[rstest]
    fn edit_to_a_taken_national_id_reports_in_the_general_slot() {
        let contacts = service();
        let mut first = filled_form();
        assert!(matches!(
            first
                .submit_new(&contacts, &owner(), coordinates())
                .expect("flow runs"),
            SubmitOutcome::Saved(_)
        ));

        let mut second = filled_form();
        second.state_mut().update_field(ContactField::NationalId, "11144477735");
        let SubmitOutcome::Saved(target) = second
            .submit_new(&contacts, &owner(), coordinates())
            .expect("flow runs")
        else {
            panic!("second contact failed to save");
        };

        let mut edit = ContactForm::for_contact(&target);
        edit.state_mut().update_field(ContactField::NationalId, "52998224725");
        let outcome = edit
            .submit_edit(&contacts, &owner(), &target, coordinates())
            .expect("flow runs");
        assert_eq!(outcome, SubmitOutcome::Blocked);
        assert_eq!(edit.state().errors().general(), "Este CPF já está cadastrado.");
    }

    #[rstest]
    fn edit_keeping_the_own_national_id_is_not_a_duplicate() {
        let contacts = service();
        let mut add = filled_form();
        let SubmitOutcome::Saved(original) = add
            .submit_new(&contacts, &owner(), coordinates())
            .expect("flow runs")
        else {
            panic!("seed contact failed to save");
        };

        let mut edit = ContactForm::for_contact(&original);
        edit.state_mut().update_field(ContactField::Name, "Carlos P. Silva");
        let outcome = edit
            .submit_edit(&contacts, &owner(), &original, coordinates())
            .expect("flow runs");
        assert!(matches!(outcome, SubmitOutcome::Saved(_)), "got {outcome:?}");
    }
}
