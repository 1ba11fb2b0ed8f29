//! Signup page for patients and practitioners.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signup does not sign the user in. On success the page sends the user to
//! the login view with the role preselected and a success banner.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::types::{Gender, PatientSignupRequest, PractitionerSignupRequest};
use crate::pages::login::login_path_for;
use crate::state::auth::{LOGIN_PATH, Role};

const MIN_PASSWORD_LEN: usize = 6;

/// Text inputs on the signup form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    AbhaId,
    DateOfBirth,
    Height,
    Weight,
    Allergies,
    MedicalHistory,
    HprId,
    Qualification,
    Specialization,
    Experience,
    ClinicAddress,
    ConsultationFee,
}

impl SignupField {
    pub const COMMON: [SignupField; 5] = [
        SignupField::Name,
        SignupField::Email,
        SignupField::Phone,
        SignupField::Password,
        SignupField::ConfirmPassword,
    ];

    pub const PATIENT: [SignupField; 6] = [
        SignupField::AbhaId,
        SignupField::DateOfBirth,
        SignupField::Height,
        SignupField::Weight,
        SignupField::Allergies,
        SignupField::MedicalHistory,
    ];

    pub const PRACTITIONER: [SignupField; 6] = [
        SignupField::HprId,
        SignupField::Qualification,
        SignupField::Specialization,
        SignupField::Experience,
        SignupField::ClinicAddress,
        SignupField::ConsultationFee,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SignupField::Name => "Full name",
            SignupField::Email => "Email",
            SignupField::Phone => "Phone",
            SignupField::Password => "Password",
            SignupField::ConfirmPassword => "Confirm password",
            SignupField::AbhaId => "ABHA ID (optional)",
            SignupField::DateOfBirth => "Date of birth",
            SignupField::Height => "Height in cm (optional)",
            SignupField::Weight => "Weight in kg (optional)",
            SignupField::Allergies => "Known allergies, comma separated",
            SignupField::MedicalHistory => "Medical history, comma separated",
            SignupField::HprId => "HPR ID",
            SignupField::Qualification => "Qualifications, comma separated",
            SignupField::Specialization => "Specialization",
            SignupField::Experience => "Years of experience",
            SignupField::ClinicAddress => "Clinic address",
            SignupField::ConsultationFee => "Consultation fee",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            SignupField::Email => "email",
            SignupField::Phone => "tel",
            SignupField::Password | SignupField::ConfirmPassword => "password",
            SignupField::DateOfBirth => "date",
            SignupField::Height | SignupField::Weight | SignupField::Experience | SignupField::ConsultationFee => {
                "number"
            }
            _ => "text",
        }
    }
}

/// Raw form contents, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub abha_id: String,
    pub date_of_birth: String,
    pub gender: Option<Gender>,
    pub height: String,
    pub weight: String,
    pub allergies: String,
    pub medical_history: String,
    pub hpr_id: String,
    pub qualification: String,
    pub specialization: String,
    pub experience: String,
    pub clinic_address: String,
    pub consultation_fee: String,
}

impl SignupForm {
    pub fn get(&self, field: SignupField) -> &str {
        match field {
            SignupField::Name => &self.name,
            SignupField::Email => &self.email,
            SignupField::Phone => &self.phone,
            SignupField::Password => &self.password,
            SignupField::ConfirmPassword => &self.confirm_password,
            SignupField::AbhaId => &self.abha_id,
            SignupField::DateOfBirth => &self.date_of_birth,
            SignupField::Height => &self.height,
            SignupField::Weight => &self.weight,
            SignupField::Allergies => &self.allergies,
            SignupField::MedicalHistory => &self.medical_history,
            SignupField::HprId => &self.hpr_id,
            SignupField::Qualification => &self.qualification,
            SignupField::Specialization => &self.specialization,
            SignupField::Experience => &self.experience,
            SignupField::ClinicAddress => &self.clinic_address,
            SignupField::ConsultationFee => &self.consultation_fee,
        }
    }

    pub fn set(&mut self, field: SignupField, value: String) {
        let slot = match field {
            SignupField::Name => &mut self.name,
            SignupField::Email => &mut self.email,
            SignupField::Phone => &mut self.phone,
            SignupField::Password => &mut self.password,
            SignupField::ConfirmPassword => &mut self.confirm_password,
            SignupField::AbhaId => &mut self.abha_id,
            SignupField::DateOfBirth => &mut self.date_of_birth,
            SignupField::Height => &mut self.height,
            SignupField::Weight => &mut self.weight,
            SignupField::Allergies => &mut self.allergies,
            SignupField::MedicalHistory => &mut self.medical_history,
            SignupField::HprId => &mut self.hpr_id,
            SignupField::Qualification => &mut self.qualification,
            SignupField::Specialization => &mut self.specialization,
            SignupField::Experience => &mut self.experience,
            SignupField::ClinicAddress => &mut self.clinic_address,
            SignupField::ConsultationFee => &mut self.consultation_fee,
        };
        *slot = value;
    }
}

/// Split a comma-separated field, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_optional_number(raw: &str) -> Result<Option<u32>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ())
}

/// Checks shared by both roles, in display order.
///
/// # Errors
///
/// Returns the first failing check's message.
pub fn validate_common(form: &SignupForm) -> Result<(), &'static str> {
    if form.password != form.confirm_password {
        return Err("Passwords do not match");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters long");
    }
    if !form.email.contains('@') {
        return Err("Please enter a valid email address");
    }
    if form.phone.trim().is_empty() {
        return Err("Phone number is required");
    }
    if form.name.trim().is_empty() {
        return Err("Full name is required");
    }
    Ok(())
}

/// Build the patient signup payload.
///
/// # Errors
///
/// Returns the first validation message.
pub fn build_patient_request(form: &SignupForm) -> Result<PatientSignupRequest, &'static str> {
    validate_common(form)?;
    let height = parse_optional_number(&form.height).map_err(|()| "Height must be a whole number")?;
    let weight = parse_optional_number(&form.weight).map_err(|()| "Weight must be a whole number")?;
    let abha_id = Some(form.abha_id.trim()).filter(|id| !id.is_empty()).map(str::to_owned);

    Ok(PatientSignupRequest {
        full_name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        phone: form.phone.trim().to_owned(),
        abha_id,
        dob: form.date_of_birth.clone(),
        gender: form.gender,
        height,
        weight,
        known_allergies: split_list(&form.allergies),
        medical_history: split_list(&form.medical_history),
        password: form.password.clone(),
    })
}

/// Build the practitioner signup payload.
///
/// # Errors
///
/// Returns the first validation message.
pub fn build_practitioner_request(form: &SignupForm) -> Result<PractitionerSignupRequest, &'static str> {
    validate_common(form)?;
    if form.hpr_id.trim().is_empty() {
        return Err("HPR ID is required");
    }
    if form.specialization.trim().is_empty() {
        return Err("Specialization is required");
    }
    let experience = parse_optional_number(&form.experience)
        .map_err(|()| "Experience must be a whole number")?
        .unwrap_or(0);
    let consultation_fees = parse_optional_number(&form.consultation_fee)
        .map_err(|()| "Consultation fee must be a whole number")?
        .unwrap_or(0);

    Ok(PractitionerSignupRequest {
        full_name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        phone: form.phone.trim().to_owned(),
        hpr_id: form.hpr_id.trim().to_owned(),
        qualifications: split_list(&form.qualification),
        specialization: form.specialization.trim().to_owned(),
        experience,
        consultation_fees,
        clinic_address: form.clinic_address.trim().to_owned(),
        password: form.password.clone(),
    })
}

/// Validated signup payload for the selected role.
#[derive(Clone, Debug, PartialEq)]
pub enum SignupPayload {
    Patient(PatientSignupRequest),
    Practitioner(PractitionerSignupRequest),
}

/// Validate `form` for `role` and build its payload.
///
/// # Errors
///
/// Returns the first validation message. Administrators cannot sign up.
pub fn build_signup(role: Role, form: &SignupForm) -> Result<SignupPayload, &'static str> {
    match role {
        Role::Patient => build_patient_request(form).map(SignupPayload::Patient),
        Role::Practitioner => build_practitioner_request(form).map(SignupPayload::Practitioner),
        Role::Administrator => Err("Administrator accounts cannot be created here"),
    }
}

/// Where to go after a successful signup.
pub fn signup_success_path(role: Role) -> String {
    format!("{}&signup=success", login_path_for(role))
}

/// Signup role from the `?role=` query param. Administrators cannot sign up.
pub fn signup_role(tag: Option<&str>) -> Role {
    match tag.and_then(Role::from_tag) {
        Some(Role::Practitioner) => Role::Practitioner,
        _ => Role::Patient,
    }
}

#[component]
fn FormInput(form: RwSignal<SignupForm>, field: SignupField) -> impl IntoView {
    view! {
        <label class="signup-field">
            <span class="signup-field__label">{field.label()}</span>
            <input
                class="login-input"
                type=field.input_type()
                prop:value=move || form.with(|f| f.get(field).to_owned())
                on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
            />
        </label>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();

    let role = RwSignal::new(query.with_untracked(|q| signup_role(q.get("role").as_deref())));
    let form = RwSignal::new(SignupForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let selected = role.get();
        let payload = match form.with(|f| build_signup(selected, f)) {
            Ok(payload) => payload,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = match &payload {
                    SignupPayload::Patient(patient) => crate::net::api::signup_patient(patient).await,
                    SignupPayload::Practitioner(practitioner) => {
                        crate::net::api::signup_practitioner(practitioner).await
                    }
                };
                busy.set(false);
                match result {
                    Ok(()) => {
                        log::info!("signed up as {selected}");
                        navigate(&signup_success_path(selected), leptos_router::NavigateOptions::default());
                    }
                    Err(message) => error.set(Some(message)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&navigate, payload);
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card login-card--wide">
                <h1>"Create Account"</h1>
                <div class="role-picker">
                    {[Role::Patient, Role::Practitioner]
                        .into_iter()
                        .map(|option| {
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if role.get() == option {
                                            "role-picker__option role-picker__option--active"
                                        } else {
                                            "role-picker__option"
                                        }
                                    }
                                    on:click=move |_| role.set(option)
                                >
                                    {option.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <form class="login-form" on:submit=on_submit>
                    {SignupField::COMMON.into_iter().map(|field| view! { <FormInput form=form field=field/> }).collect_view()}
                    <Show
                        when=move || role.get() == Role::Practitioner
                        fallback=move || {
                            view! {
                                <label class="signup-field">
                                    <span class="signup-field__label">"Gender"</span>
                                    <select
                                        class="login-input"
                                        on:change=move |ev| {
                                            let gender = match event_target_value(&ev).as_str() {
                                                "Male" => Some(Gender::Male),
                                                "Female" => Some(Gender::Female),
                                                _ => None,
                                            };
                                            form.update(|f| f.gender = gender);
                                        }
                                    >
                                        <option value="">"Select"</option>
                                        <option value="Male">"Male"</option>
                                        <option value="Female">"Female"</option>
                                    </select>
                                </label>
                                {SignupField::PATIENT
                                    .into_iter()
                                    .map(|field| view! { <FormInput form=form field=field/> })
                                    .collect_view()}
                            }
                        }
                    >
                        {SignupField::PRACTITIONER
                            .into_iter()
                            .map(|field| view! { <FormInput form=form field=field/> })
                            .collect_view()}
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? "
                    <a href=LOGIN_PATH>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
