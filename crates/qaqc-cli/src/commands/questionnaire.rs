use qaqc_core::enums::EventType;
use qaqc_db::repos::questionnaire::NewQuestionnaire;
use qaqc_db::updates::questionnaire::QuestionnaireUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuestionnaireCommands;
use crate::commands::shared::page::{fetch_limit, output_list};
use crate::commands::shared::parse::parse_label;
use crate::context::AppContext;
use crate::output::output;

fn parse_event_type(raw: Option<&str>) -> anyhow::Result<Option<EventType>> {
    raw.map(|raw| parse_label::<EventType>(raw, "event type"))
        .transpose()
}

/// Handle `qaqc questionnaire`.
pub async fn handle(
    action: &QuestionnaireCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        QuestionnaireCommands::Create {
            name,
            description,
            event_type,
        } => {
            let questionnaire = ctx
                .service
                .create_questionnaire(NewQuestionnaire {
                    name: name.clone(),
                    description: description.clone().unwrap_or_default(),
                    event_type: parse_event_type(event_type.as_deref())?,
                })
                .await?;
            output(&questionnaire, flags.format)
        }
        QuestionnaireCommands::Update {
            id,
            name,
            description,
            event_type,
            unscoped,
        } => {
            if name.is_none() && description.is_none() && event_type.is_none() && !unscoped {
                anyhow::bail!(
                    "At least one of --name, --description, --event-type, \
                     or --unscoped must be provided"
                );
            }

            let mut builder = QuestionnaireUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name.as_str());
            }
            if let Some(description) = description {
                builder = builder.description(description.as_str());
            }
            if let Some(event_type) = parse_event_type(event_type.as_deref())? {
                builder = builder.event_type(Some(event_type));
            }
            if *unscoped {
                builder = builder.event_type(None);
            }

            let questionnaire = ctx
                .service
                .update_questionnaire(id, builder.build())
                .await?;
            output(&questionnaire, flags.format)
        }
        QuestionnaireCommands::List { event_type, limit } => {
            let event_type = parse_event_type(event_type.as_deref())?;
            let limit = fetch_limit(*limit, ctx, flags).unwrap_or(u32::MAX);
            let questionnaires = ctx
                .service
                .list_questionnaires(event_type, limit)
                .await?;
            output_list(questionnaires, ctx, flags)
        }
        QuestionnaireCommands::Get { id, questions } => {
            if *questions {
                let detail = ctx.service.get_questionnaire_with_questions(id).await?;
                output(&detail, flags.format)
            } else {
                let questionnaire = ctx.service.get_questionnaire(id).await?;
                output(&questionnaire, flags.format)
            }
        }
    }
}
