//! `facility-admin facility ...`

use anyhow::Result;

use facility_admin::config::AdminConfig;
use facility_admin::model::Facility;
use facility_admin::update::UpdateComponent;

use super::super::FacilityCommands;
use super::common::{self, ListMode};

pub async fn cmd_facility(config: &AdminConfig, command: FacilityCommands) -> Result<()> {
    match command {
        FacilityCommands::List { list } => common::list::<Facility>(config, &list, ListMode::All).await,
        FacilityCommands::Search { query, list } => {
            common::list::<Facility>(config, &list, ListMode::Search(query)).await
        }
        FacilityCommands::Show { id } => common::show::<Facility>(config, id).await,
        FacilityCommands::Create { name } => {
            let client = common::signed_in_client(config).await?;
            let saved = common::save_form::<Facility, _>(client, "/facility/new", |update| {
                update.form_mut().facility_name.set_input(&name);
            })
            .await?;
            common::print_saved("Created", &saved);
            Ok(())
        }
        FacilityCommands::Edit { id, name } => {
            let client = common::signed_in_client(config).await?;
            let saved = common::patch_form::<Facility, _, _>(
                client,
                id,
                |update| {
                    if let Some(name) = &name {
                        update.form_mut().facility_name.set_input(name);
                    }
                },
                |edited| Facility {
                    id: edited.id,
                    facility_name: name.as_ref().and(edited.facility_name),
                },
            )
            .await?;
            common::print_saved("Updated", &saved);
            Ok(())
        }
        FacilityCommands::Delete { id, force } => common::delete::<Facility>(config, id, force).await,
    }
}
