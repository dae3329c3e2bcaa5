//! Plumbing shared by the entity commands.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use facility_admin::api::{ApiClient, EntityService};
use facility_admin::app::ScreenEntity;
use facility_admin::config::AdminConfig;
use facility_admin::form::EntityForm;
use facility_admin::model::Entity;
use facility_admin::route::{EntityResolver, Resolution, parse_route};
use facility_admin::update::{PendingNavigation, SaveOutcome, UpdateComponent};
use facility_admin::views::{DeleteDialog, DetailView, ListView, render};

use crate::ListArgs;

/// Spinner on stderr while a request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("progress bar template is a valid static string"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// A client signed in with the configured credentials.
pub async fn signed_in_client(config: &AdminConfig) -> Result<ApiClient> {
    let client = ApiClient::from_config(config).context("Invalid API configuration")?;
    let bar = spinner("Signing in...");
    let result = client
        .authenticate(&config.auth.username, &config.auth.password)
        .await;
    bar.finish_and_clear();
    result.with_context(|| {
        format!(
            "Sign-in as '{}' at {} failed",
            config.auth.username, config.api.base_url
        )
    })?;
    Ok(client)
}

pub enum ListMode {
    All,
    Scoped(i64),
    Search(String),
}

pub async fn list<E: ScreenEntity>(config: &AdminConfig, args: &ListArgs, mode: ListMode) -> Result<()> {
    let client = signed_in_client(config).await?;
    let mut view = ListView::<E>::new(client, args.size.unwrap_or(config.list.page_size));
    view.sort_by(args.sort.clone());

    let bar = spinner(&format!("Loading {}...", E::TITLE.to_lowercase()));
    let result = match mode {
        ListMode::Search(query) => view.search(&query).await,
        ListMode::Scoped(parent_id) => view.scope_to(Some(parent_id)).await,
        ListMode::All => view.go_to_page(args.page).await,
    };
    bar.finish_and_clear();
    result.with_context(|| format!("Failed to load {}", E::TITLE.to_lowercase()))?;

    println!();
    print!("{}", render::list_table(&view));
    if let Some(next) = view.request().next().filter(|_| view.has_next_page()) {
        println!("{}", style(format!("More results: --page {}", next.page)).dim());
    }
    println!();
    Ok(())
}

pub async fn show<E: ScreenEntity>(config: &AdminConfig, id: i64) -> Result<()> {
    let client = signed_in_client(config).await?;
    let view = DetailView::<E>::load(client, id)
        .await
        .with_context(|| format!("Failed to load {} {}", E::NAME, id))?;
    println!();
    print!("{}", render::detail(&view));
    println!();
    Ok(())
}

/// Resolve `url` into an initialised form and apply `fill` to it.
async fn prepare_form<E, F>(client: ApiClient, url: &str, fill: F) -> Result<E::Update>
where
    E: ScreenEntity,
    F: FnOnce(&mut E::Update),
{
    let (_, snapshot) = parse_route(url);
    let resolver = EntityResolver::<E>::new(EntityService::new(client.clone()));
    let resolved = match resolver.resolve(&snapshot).await? {
        Resolution::Resolved(resolved) => resolved,
        Resolution::Redirect(_) => bail!(
            "{} {} not found",
            E::NAME,
            snapshot.param("id").unwrap_or_default()
        ),
    };

    let mut update = E::new_update(client);
    update
        .init(resolved)
        .await
        .with_context(|| format!("Failed to prepare the {} form", E::NAME))?;
    fill(&mut update);
    Ok(update)
}

/// Open the edit form at `url`, let `fill` change it, then save.
///
/// Validation runs before any request; an invalid form is reported field by
/// field and nothing is sent.
pub async fn save_form<E, F>(client: ApiClient, url: &str, fill: F) -> Result<E>
where
    E: ScreenEntity,
    F: FnOnce(&mut E::Update),
{
    let mut update = prepare_form::<E, F>(client, url, fill).await?;
    let mut nav = PendingNavigation::default();
    match update.save(&mut nav).await {
        SaveOutcome::Saved(saved) => Ok(saved),
        SaveOutcome::Invalid(errors) => {
            eprint!("{}", render::validation_errors(&errors));
            bail!("{} form is invalid; nothing was saved", E::NAME)
        }
        SaveOutcome::Failed(err) => Err(err).with_context(|| format!("Failed to save {}", E::NAME)),
    }
}

/// Edit record `id` through its form, then send only the edited fields.
///
/// `fill` applies the edits to the form; `patch` reduces the validated record
/// to the fields that were edited. The backend keeps every field the patch
/// leaves out.
pub async fn patch_form<E, F, P>(client: ApiClient, id: i64, fill: F, patch: P) -> Result<E>
where
    E: ScreenEntity,
    F: FnOnce(&mut E::Update),
    P: FnOnce(E) -> E,
{
    let url = format!("/{}/{}/edit", E::ROUTE, id);
    let update = prepare_form::<E, F>(client, &url, fill).await?;

    let errors = update.form().errors();
    if !errors.is_empty() {
        eprint!("{}", render::validation_errors(&errors));
        bail!("{} form is invalid; nothing was saved", E::NAME);
    }

    let record = patch(update.form().create_from_form());
    update
        .service()
        .partial_update(&record)
        .await
        .with_context(|| format!("Failed to save {}", E::NAME))
}

pub fn print_saved<E: Entity>(verb: &str, saved: &E) {
    println!(
        "{} {} {} {}",
        style("✓").green(),
        verb,
        E::NAME,
        style(saved.id().map(|id| id.to_string()).unwrap_or_default()).cyan()
    );
}

pub async fn delete<E: ScreenEntity>(config: &AdminConfig, id: i64, force: bool) -> Result<()> {
    use dialoguer::Confirm;

    let client = signed_in_client(config).await?;
    let entity = EntityService::<E>::new(client.clone())
        .find(id)
        .await
        .with_context(|| format!("Failed to load {} {}", E::NAME, id))?;
    let dialog = DeleteDialog::new(client, entity);

    if !force {
        let label = dialog.entity().label();
        let prompt = if label.is_empty() {
            dialog.question()
        } else {
            format!("{} ({})", dialog.question(), label)
        };
        let confirm = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirm {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    dialog
        .delete()
        .await
        .with_context(|| format!("Failed to delete {} {}", E::NAME, id))?;
    println!("{} Deleted {} {}", style("✓").green(), E::NAME, id);
    Ok(())
}
