//! Command-line surface driving the address book through its ports.
//!
//! Each subcommand replays the matching form flow: arguments feed the form
//! controller field by field so the maskers and validators run exactly as
//! they do in the application core, then submit executes against the
//! file-backed store.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use reqwest::Url;
use zeroize::Zeroizing;

use mapamigo::domain::form::{FormSchema, FormState};
use mapamigo::domain::forms::{
    AccountField, AccountForm, ContactField, ContactForm, LoginField, LoginForm, RegisterField,
    RegisterForm, SubmitOutcome,
};
use mapamigo::domain::ports::{FixtureGeocoder, Geocoder, PostalLookup};
use mapamigo::domain::{
    AccountService, Contact, ContactId, ContactService, Coordinates, OwnerId, User,
};
use mapamigo::outbound::storage::FileKeyValueStore;
use mapamigo::outbound::viacep::ViaCepClient;
use mapamigo::settings::Settings;

/// `mapamigo` command arguments.
#[derive(Debug, Parser)]
#[command(name = "mapamigo", about = "Agenda de contatos com busca de CEP e mapa", version)]
struct Cli {
    /// Diretório do armazenamento local.
    #[arg(long = "data-dir", value_name = "path", global = true)]
    data_dir: Option<PathBuf>,
    /// URL base do serviço compatível com ViaCEP.
    #[arg(long = "viacep-base-url", value_name = "url", global = true)]
    viacep_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cadastrar um novo usuário.
    Register(RegisterArgs),
    /// Iniciar uma sessão.
    Login(LoginArgs),
    /// Encerrar a sessão atual.
    Logout,
    /// Mostrar o usuário logado.
    Whoami,
    /// Operações da conta logada.
    #[command(subcommand)]
    Account(AccountCommand),
    /// Operações de contatos da conta logada.
    #[command(subcommand)]
    Contact(ContactCommand),
}

#[derive(Debug, Args)]
struct RegisterArgs {
    /// Nome completo.
    #[arg(long, value_name = "nome")]
    name: String,
    /// Endereço de e-mail.
    #[arg(long, value_name = "email")]
    email: String,
    /// Senha de acesso.
    #[arg(long, value_name = "senha", value_parser = parse_secret)]
    password: Zeroizing<String>,
    /// Confirmação da senha.
    #[arg(long = "confirm-password", value_name = "senha", value_parser = parse_secret)]
    confirm_password: Zeroizing<String>,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Endereço de e-mail.
    #[arg(long, value_name = "email")]
    email: String,
    /// Senha de acesso.
    #[arg(long, value_name = "senha", value_parser = parse_secret)]
    password: Zeroizing<String>,
}

#[derive(Debug, Subcommand)]
enum AccountCommand {
    /// Atualizar nome, e-mail ou senha.
    Update(AccountUpdateArgs),
    /// Excluir a conta e todos os seus contatos.
    Delete(AccountDeleteArgs),
}

#[derive(Debug, Args)]
struct AccountUpdateArgs {
    /// Novo nome.
    #[arg(long, value_name = "nome")]
    name: Option<String>,
    /// Novo endereço de e-mail.
    #[arg(long, value_name = "email")]
    email: Option<String>,
    /// Senha atual, exigida para a troca de senha.
    #[arg(long = "current-password", value_name = "senha", value_parser = parse_secret)]
    current_password: Option<Zeroizing<String>>,
    /// Nova senha.
    #[arg(long = "new-password", value_name = "senha", value_parser = parse_secret)]
    new_password: Option<Zeroizing<String>>,
    /// Confirmação da nova senha.
    #[arg(long = "confirm-password", value_name = "senha", value_parser = parse_secret)]
    confirm_password: Option<Zeroizing<String>>,
}

#[derive(Debug, Args)]
struct AccountDeleteArgs {
    /// Senha atual para confirmar a exclusão.
    #[arg(long, value_name = "senha", value_parser = parse_secret)]
    password: Option<Zeroizing<String>>,
}

#[derive(Debug, Subcommand)]
enum ContactCommand {
    /// Cadastrar um contato.
    Add(ContactAddArgs),
    /// Listar os contatos da conta.
    List,
    /// Mostrar um contato pelo identificador.
    Show(ContactShowArgs),
    /// Atualizar um contato existente.
    Edit(ContactEditArgs),
    /// Remover um contato pelo identificador.
    Remove(ContactRemoveArgs),
}

#[derive(Debug, Default, Args)]
struct ContactFieldArgs {
    /// Nome do contato.
    #[arg(long, value_name = "nome")]
    name: Option<String>,
    /// CPF do contato.
    #[arg(long, value_name = "cpf")]
    cpf: Option<String>,
    /// Telefone com DDD.
    #[arg(long, value_name = "telefone")]
    phone: Option<String>,
    /// CEP do endereço.
    #[arg(long, value_name = "cep")]
    cep: Option<String>,
    /// Logradouro; preenchido pela busca de CEP quando omitido.
    #[arg(long, value_name = "logradouro")]
    street: Option<String>,
    /// Número do endereço.
    #[arg(long, value_name = "número")]
    number: Option<String>,
    /// Complemento do endereço.
    #[arg(long, value_name = "complemento")]
    complement: Option<String>,
    /// Bairro; preenchido pela busca de CEP quando omitido.
    #[arg(long, value_name = "bairro")]
    neighborhood: Option<String>,
    /// Cidade; preenchida pela busca de CEP quando omitida.
    #[arg(long, value_name = "cidade")]
    city: Option<String>,
    /// UF; preenchida pela busca de CEP quando omitida.
    #[arg(long, value_name = "uf")]
    state: Option<String>,
}

#[derive(Debug, Args)]
struct ContactAddArgs {
    #[command(flatten)]
    fields: ContactFieldArgs,
    /// Latitude do endereço no mapa.
    #[arg(long, value_name = "latitude")]
    lat: Option<f64>,
    /// Longitude do endereço no mapa.
    #[arg(long, value_name = "longitude")]
    lng: Option<f64>,
}

#[derive(Debug, Args)]
struct ContactShowArgs {
    /// Identificador do contato.
    #[arg(value_name = "id")]
    id: String,
}

#[derive(Debug, Args)]
struct ContactEditArgs {
    /// Identificador do contato.
    #[arg(value_name = "id")]
    id: String,
    #[command(flatten)]
    fields: ContactFieldArgs,
    /// Latitude do endereço no mapa.
    #[arg(long, value_name = "latitude")]
    lat: Option<f64>,
    /// Longitude do endereço no mapa.
    #[arg(long, value_name = "longitude")]
    lng: Option<f64>,
}

#[derive(Debug, Args)]
struct ContactRemoveArgs {
    /// Identificador do contato.
    #[arg(value_name = "id")]
    id: String,
}

fn parse_secret(raw: &str) -> Result<Zeroizing<String>, String> {
    Ok(Zeroizing::new(raw.to_owned()))
}

/// Parse the process arguments and execute the selected command.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    let store = FileKeyValueStore::open(&settings.data_dir())?;
    let accounts = AccountService::new(Arc::new(store));

    match &cli.command {
        Command::Register(args) => register(&accounts, args),
        Command::Login(args) => login(&accounts, args),
        Command::Logout => logout(&accounts),
        Command::Whoami => whoami(&accounts),
        Command::Account(command) => match command {
            AccountCommand::Update(args) => account_update(&accounts, args),
            AccountCommand::Delete(args) => account_delete(&accounts, args),
        },
        Command::Contact(command) => contact_command(&accounts, &settings, command).await,
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load_from_iter([OsString::from("mapamigo")])
        .context("failed to load settings")?;
    if cli.data_dir.is_some() {
        settings.data_dir = cli.data_dir.clone();
    }
    if cli.viacep_base_url.is_some() {
        settings.viacep_base_url = cli.viacep_base_url.clone();
    }
    Ok(settings)
}

fn register(accounts: &AccountService<FileKeyValueStore>, args: &RegisterArgs) -> Result<ExitCode> {
    let mut form = RegisterForm::new();
    form.change(RegisterField::Name, &args.name);
    form.change(RegisterField::Email, &args.email);
    form.change(RegisterField::Password, &args.password);
    form.change(RegisterField::ConfirmPassword, &args.confirm_password);
    match form.submit(accounts)? {
        SubmitOutcome::Saved(()) => {
            println!("Usuário cadastrado com sucesso!");
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            print_errors(form.state(), register_label);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn login(accounts: &AccountService<FileKeyValueStore>, args: &LoginArgs) -> Result<ExitCode> {
    let mut form = LoginForm::new();
    form.state_mut().update_field(LoginField::Email, &args.email);
    form.state_mut()
        .update_field(LoginField::Password, &args.password);
    match form.submit(accounts)? {
        SubmitOutcome::Saved(user) => {
            println!("Sessão iniciada para {}.", user.email);
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            print_errors(form.state(), login_label);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn logout(accounts: &AccountService<FileKeyValueStore>) -> Result<ExitCode> {
    accounts.logout()?;
    println!("Sessão encerrada.");
    Ok(ExitCode::SUCCESS)
}

fn whoami(accounts: &AccountService<FileKeyValueStore>) -> Result<ExitCode> {
    match accounts.current_user()? {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("Nenhum usuário logado.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn account_update(
    accounts: &AccountService<FileKeyValueStore>,
    args: &AccountUpdateArgs,
) -> Result<ExitCode> {
    let Some(user) = require_session(accounts)? else {
        return Ok(ExitCode::FAILURE);
    };
    let mut form = AccountForm::for_user(&user);
    if let Some(name) = &args.name {
        form.state_mut().update_field(AccountField::Name, name);
    }
    if let Some(email) = &args.email {
        form.state_mut().update_field(AccountField::Email, email);
    }
    if let Some(password) = &args.current_password {
        form.state_mut()
            .update_field(AccountField::CurrentPassword, password);
    }
    if let Some(password) = &args.new_password {
        form.state_mut()
            .update_field(AccountField::NewPassword, password);
    }
    if let Some(password) = &args.confirm_password {
        form.state_mut()
            .update_field(AccountField::ConfirmPassword, password);
    }
    match form.submit(accounts)? {
        SubmitOutcome::Saved(_) => {
            println!("Alterações salvas com sucesso!");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Unchanged => {
            println!("Nada a salvar.");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Blocked => {
            print_errors(form.state(), account_label);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn account_delete(
    accounts: &AccountService<FileKeyValueStore>,
    args: &AccountDeleteArgs,
) -> Result<ExitCode> {
    let Some(user) = require_session(accounts)? else {
        return Ok(ExitCode::FAILURE);
    };
    let mut form = AccountForm::for_user(&user);
    let confirmation = args.password.as_ref().map_or("", |secret| secret.as_str());
    match form.confirm_delete(accounts, confirmation)? {
        SubmitOutcome::Saved(()) => {
            println!("Conta excluída.");
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            print_errors(form.state(), account_label);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn contact_command(
    accounts: &AccountService<FileKeyValueStore>,
    settings: &Settings,
    command: &ContactCommand,
) -> Result<ExitCode> {
    match command {
        ContactCommand::List => contact_list(accounts),
        ContactCommand::Show(args) => contact_show(accounts, args),
        ContactCommand::Remove(args) => contact_remove(accounts, args),
        ContactCommand::Add(args) => {
            let lookup = build_lookup(settings)?;
            contact_add(accounts, &lookup, &FixtureGeocoder, args).await
        }
        ContactCommand::Edit(args) => {
            let lookup = build_lookup(settings)?;
            contact_edit(accounts, &lookup, &FixtureGeocoder, args).await
        }
    }
}

fn build_lookup(settings: &Settings) -> Result<ViaCepClient> {
    let base_url = Url::parse(settings.viacep_base_url()).context("invalid ViaCEP base URL")?;
    Ok(ViaCepClient::new(base_url)?)
}

async fn contact_add(
    accounts: &AccountService<FileKeyValueStore>,
    lookup: &dyn PostalLookup,
    geocoder: &dyn Geocoder,
    args: &ContactAddArgs,
) -> Result<ExitCode> {
    let Some(user) = require_session(accounts)? else {
        return Ok(ExitCode::FAILURE);
    };
    let owner = OwnerId::from(&user);

    let mut form = ContactForm::new();
    feed_contact_fields(&mut form, &args.fields);
    fill_from_postal_lookup(&mut form, lookup, &args.fields).await;
    apply_address_overrides(&mut form, &args.fields);

    let coordinates = resolve_coordinates(&form, geocoder, args.lat, args.lng).await?;
    match form.submit_new(accounts.contacts(), &owner, coordinates)? {
        SubmitOutcome::Saved(contact) => {
            println!("Contato salvo com sucesso!");
            println!("id: {}", contact.id);
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            report_contact_block(&form);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn contact_edit(
    accounts: &AccountService<FileKeyValueStore>,
    lookup: &dyn PostalLookup,
    geocoder: &dyn Geocoder,
    args: &ContactEditArgs,
) -> Result<ExitCode> {
    let Some(user) = require_session(accounts)? else {
        return Ok(ExitCode::FAILURE);
    };
    let owner = OwnerId::from(&user);
    let contacts = accounts.contacts();
    let Some(original) = find_contact(contacts, &owner, &args.id)? else {
        return Ok(ExitCode::FAILURE);
    };

    let mut form = ContactForm::for_contact(&original);
    feed_contact_fields(&mut form, &args.fields);
    if args.fields.cep.is_some() {
        fill_from_postal_lookup(&mut form, lookup, &args.fields).await;
    }
    apply_address_overrides(&mut form, &args.fields);

    // The stored pin satisfies the gate when nothing re-resolves; the update
    // keeps the stored coordinates regardless.
    let stored = Coordinates {
        latitude: original.latitude,
        longitude: original.longitude,
    };
    let coordinates = resolve_coordinates(&form, geocoder, args.lat, args.lng)
        .await?
        .or(Some(stored));
    match form.submit_edit(contacts, &owner, &original, coordinates)? {
        SubmitOutcome::Saved(_) => {
            println!("Contato atualizado com sucesso!");
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            report_contact_block(&form);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn contact_list(accounts: &AccountService<FileKeyValueStore>) -> Result<ExitCode> {
    let Some(user) = require_session(accounts)? else {
        return Ok(ExitCode::FAILURE);
    };
    let owner = OwnerId::from(&user);
    for contact in accounts.contacts().list_contacts(&owner)? {
        println!("{}  {}  {}", contact.id, contact.name, contact.national_id);
    }
    Ok(ExitCode::SUCCESS)
}

fn contact_show(
    accounts: &AccountService<FileKeyValueStore>,
    args: &ContactShowArgs,
) -> Result<ExitCode> {
    let Some(user) = require_session(accounts)? else {
        return Ok(ExitCode::FAILURE);
    };
    let owner = OwnerId::from(&user);
    let Some(contact) = find_contact(accounts.contacts(), &owner, &args.id)? else {
        return Ok(ExitCode::FAILURE);
    };
    print_contact(&contact);
    Ok(ExitCode::SUCCESS)
}

fn contact_remove(
    accounts: &AccountService<FileKeyValueStore>,
    args: &ContactRemoveArgs,
) -> Result<ExitCode> {
    let Some(user) = require_session(accounts)? else {
        return Ok(ExitCode::FAILURE);
    };
    let owner = OwnerId::from(&user);
    let contacts = accounts.contacts();
    let Some(contact) = find_contact(contacts, &owner, &args.id)? else {
        return Ok(ExitCode::FAILURE);
    };
    contacts.delete_contact(&owner, contact.id)?;
    println!("Contato removido.");
    Ok(ExitCode::SUCCESS)
}

fn require_session(accounts: &AccountService<FileKeyValueStore>) -> Result<Option<User>> {
    let user = accounts.current_user()?;
    if user.is_none() {
        println!("Nenhum usuário logado.");
    }
    Ok(user)
}

fn find_contact(
    contacts: &ContactService<FileKeyValueStore>,
    owner: &OwnerId,
    raw_id: &str,
) -> Result<Option<Contact>> {
    let Ok(id) = ContactId::new(raw_id) else {
        println!("Contato não encontrado");
        return Ok(None);
    };
    let found = contacts.get_contact_by_id(owner, id)?;
    if found.is_none() {
        println!("Contato não encontrado");
    }
    Ok(found)
}

fn feed_contact_fields(form: &mut ContactForm, fields: &ContactFieldArgs) {
    let pairs = [
        (ContactField::Name, &fields.name),
        (ContactField::NationalId, &fields.cpf),
        (ContactField::Phone, &fields.phone),
        (ContactField::PostalCode, &fields.cep),
        (ContactField::Number, &fields.number),
        (ContactField::Complement, &fields.complement),
    ];
    for (field, value) in pairs {
        if let Some(value) = value {
            form.state_mut().update_field(field, value);
        }
    }
}

/// Street, neighbourhood, city, and state flags land after the postal fill,
/// so an explicit flag wins over the fetched value.
fn apply_address_overrides(form: &mut ContactForm, fields: &ContactFieldArgs) {
    let pairs = [
        (ContactField::Street, &fields.street),
        (ContactField::Neighborhood, &fields.neighborhood),
        (ContactField::City, &fields.city),
        (ContactField::State, &fields.state),
    ];
    for (field, value) in pairs {
        if let Some(value) = value {
            form.state_mut().update_field(field, value);
        }
    }
}

async fn fill_from_postal_lookup(
    form: &mut ContactForm,
    lookup: &dyn PostalLookup,
    fields: &ContactFieldArgs,
) {
    let address_complete = fields.street.is_some()
        && fields.neighborhood.is_some()
        && fields.city.is_some()
        && fields.state.is_some();
    if address_complete {
        return;
    }
    let Some(cep) = form.postal_code_digits() else {
        return;
    };
    match lookup.fetch(&cep).await {
        Ok(address) => form.apply_postal_address(&address),
        Err(error) => {
            tracing::debug!(%cep, %error, "postal lookup failed");
            println!("CEP: {error}");
        }
    }
}

async fn resolve_coordinates(
    form: &ContactForm,
    geocoder: &dyn Geocoder,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Option<Coordinates>> {
    if let (Some(latitude), Some(longitude)) = (lat, lng) {
        return Ok(Some(Coordinates {
            latitude,
            longitude,
        }));
    }
    let Some(address) = form.full_address() else {
        return Ok(None);
    };
    Ok(geocoder.geocode(&address).await?)
}

fn report_contact_block(form: &ContactForm) {
    if form.state().errors().any() {
        print_errors(form.state(), contact_label);
    } else {
        println!("Endereço não localizado no mapa. Informe --lat e --lng.");
    }
}

fn print_errors<S: FormSchema>(state: &FormState<S>, label: fn(S::Field) -> &'static str) {
    let errors = state.errors();
    for field in S::FIELDS {
        let message = errors.get(*field);
        if !message.is_empty() {
            println!("{}: {message}", label(*field));
        }
    }
    if !errors.general().is_empty() {
        println!("{}", errors.general());
    }
}

fn print_contact(contact: &Contact) {
    println!("id: {}", contact.id);
    println!("Nome: {}", contact.name);
    println!("CPF: {}", contact.national_id);
    println!("Telefone: {}", contact.phone);
    println!("CEP: {}", contact.postal_code);
    println!("Logradouro: {}", contact.street);
    println!("Número: {}", contact.number);
    if !contact.complement.is_empty() {
        println!("Complemento: {}", contact.complement);
    }
    println!("Bairro: {}", contact.neighborhood);
    println!("Cidade: {}", contact.city);
    println!("Estado (UF): {}", contact.state);
    println!("Coordenadas: {}, {}", contact.latitude, contact.longitude);
}

fn login_label(field: LoginField) -> &'static str {
    match field {
        LoginField::Email => "e-mail",
        LoginField::Password => "senha",
    }
}

fn register_label(field: RegisterField) -> &'static str {
    match field {
        RegisterField::Name => "nome",
        RegisterField::Email => "e-mail",
        RegisterField::Password => "senha",
        RegisterField::ConfirmPassword => "confirmar senha",
    }
}

fn account_label(field: AccountField) -> &'static str {
    match field {
        AccountField::Name => "Nome",
        AccountField::Email => "E-mail",
        AccountField::CurrentPassword => "Senha atual",
        AccountField::NewPassword => "Nova senha",
        AccountField::ConfirmPassword => "Confirmar nova senha",
    }
}

fn contact_label(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Nome",
        ContactField::NationalId => "CPF",
        ContactField::Phone => "Telefone",
        ContactField::PostalCode => "CEP",
        ContactField::Street => "Logradouro",
        ContactField::Number => "Número",
        ContactField::Complement => "Complemento",
        ContactField::Neighborhood => "Bairro",
        ContactField::City => "Cidade",
        ContactField::State => "Estado (UF)",
    }
}
