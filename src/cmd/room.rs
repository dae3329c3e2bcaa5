//! `facility-admin room ...`

use anyhow::{Context, Result};

use facility_admin::api::EntityService;
use facility_admin::config::AdminConfig;
use facility_admin::model::{Facility, Room};
use facility_admin::update::UpdateComponent;

use super::super::RoomCommands;
use super::common::{self, ListMode};

pub async fn cmd_room(config: &AdminConfig, command: RoomCommands) -> Result<()> {
    match command {
        RoomCommands::List { facility, list } => {
            let mode = facility.map_or(ListMode::All, ListMode::Scoped);
            common::list::<Room>(config, &list, mode).await
        }
        RoomCommands::Search { query, list } => {
            common::list::<Room>(config, &list, ListMode::Search(query)).await
        }
        RoomCommands::Show { id } => common::show::<Room>(config, id).await,
        RoomCommands::Create { number, facility } => {
            let client = common::signed_in_client(config).await?;
            // The form preselects the facility from the query parameter.
            let url = match facility {
                Some(facility_id) => format!("/room/new?facility_id={}", facility_id),
                None => "/room/new".to_string(),
            };
            let saved = common::save_form::<Room, _>(client, &url, |update| {
                update.form_mut().room_number.set_input(&number);
            })
            .await?;
            common::print_saved("Created", &saved);
            Ok(())
        }
        RoomCommands::Edit { id, number, facility } => {
            let client = common::signed_in_client(config).await?;
            let facility = match facility {
                Some(facility_id) => Some(
                    EntityService::<Facility>::new(client.clone())
                        .find(facility_id)
                        .await
                        .with_context(|| format!("Failed to load Facility {}", facility_id))?,
                ),
                None => None,
            };

            let number_edited = number.is_some();
            let facility_edited = facility.is_some();
            let saved = common::patch_form::<Room, _, _>(
                client,
                id,
                |update| {
                    let form = update.form_mut();
                    if let Some(number) = &number {
                        form.room_number.set_input(number);
                    }
                    if facility_edited {
                        form.facility.set_value(facility);
                    }
                },
                |edited| Room {
                    id: edited.id,
                    room_number: edited.room_number.filter(|_| number_edited),
                    facility: edited.facility.filter(|_| facility_edited),
                },
            )
            .await?;
            common::print_saved("Updated", &saved);
            Ok(())
        }
        RoomCommands::Delete { id, force } => common::delete::<Room>(config, id, force).await,
    }
}
