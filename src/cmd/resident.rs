//! `facility-admin resident ...`

use anyhow::{Context, Result};

use facility_admin::api::EntityService;
use facility_admin::config::AdminConfig;
use facility_admin::model::{Resident, Room};
use facility_admin::update::{ResidentUpdate, UpdateComponent};

use super::super::ResidentCommands;
use super::common::{self, ListMode};

pub async fn cmd_resident(config: &AdminConfig, command: ResidentCommands) -> Result<()> {
    match command {
        ResidentCommands::List { room, list } => {
            let mode = room.map_or(ListMode::All, ListMode::Scoped);
            common::list::<Resident>(config, &list, mode).await
        }
        ResidentCommands::Search { query, list } => {
            common::list::<Resident>(config, &list, ListMode::Search(query)).await
        }
        ResidentCommands::Show { id } => common::show::<Resident>(config, id).await,
        ResidentCommands::Create {
            name,
            phone,
            email,
            room,
        } => {
            let client = common::signed_in_client(config).await?;
            let url = match room {
                Some(room_id) => format!("/resident/new?room_id={}", room_id),
                None => "/resident/new".to_string(),
            };
            let saved = common::save_form::<Resident, _>(client, &url, |update| {
                let form = update.form_mut();
                form.name.set_input(&name);
                form.phone_number.set_input(&phone);
                if let Some(email) = &email {
                    form.email.set_input(email);
                }
            })
            .await?;
            common::print_saved("Created", &saved);
            Ok(())
        }
        ResidentCommands::Edit {
            id,
            name,
            phone,
            email,
            room,
        } => {
            let client = common::signed_in_client(config).await?;
            let room = match room {
                Some(room_id) => Some(
                    EntityService::<Room>::new(client.clone())
                        .find(room_id)
                        .await
                        .with_context(|| format!("Failed to load Room {}", room_id))?,
                ),
                None => None,
            };

            let fill = |update: &mut ResidentUpdate| {
                let form = update.form_mut();
                if let Some(name) = &name {
                    form.name.set_input(name);
                }
                if let Some(phone) = &phone {
                    form.phone_number.set_input(phone);
                }
                if let Some(email) = &email {
                    form.email.set_input(email);
                }
                if let Some(room) = &room {
                    form.room.set_value(Some(room.clone()));
                }
            };

            // A merge-patch cannot remove a field, so clearing the email
            // sends the whole record.
            let saved = if email.as_deref() == Some("") {
                let url = format!("/resident/{}/edit", id);
                common::save_form::<Resident, _>(client, &url, fill).await?
            } else {
                common::patch_form::<Resident, _, _>(client, id, fill, |edited| Resident {
                    id: edited.id,
                    name: edited.name.filter(|_| name.is_some()),
                    phone_number: edited.phone_number.filter(|_| phone.is_some()),
                    email: edited.email.filter(|_| email.is_some()),
                    room: edited.room.filter(|_| room.is_some()),
                })
                .await?
            };
            common::print_saved("Updated", &saved);
            Ok(())
        }
        ResidentCommands::Delete { id, force } => common::delete::<Resident>(config, id, force).await,
    }
}
