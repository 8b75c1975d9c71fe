use qaqc_core::entities::NewQuestion;
use qaqc_core::enums::Relation;
use qaqc_db::updates::question::{QuestionUpdate, QuestionUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{QuestionAddArgs, QuestionCommands, QuestionUpdateArgs};
use crate::commands::shared::parse::parse_label;
use crate::context::AppContext;
use crate::output::output;

/// Handle `qaqc question`.
pub async fn handle(
    action: &QuestionCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        QuestionCommands::Add(args) => {
            let question = ctx
                .service
                .add_question(&args.questionnaire, new_question(args)?)
                .await?;
            output(&question, flags.format)
        }
        QuestionCommands::Update(args) => {
            let question = ctx
                .service
                .update_question(&args.id, question_update(args)?)
                .await?;
            output(&question, flags.format)
        }
        QuestionCommands::Remove { id } => {
            ctx.service.remove_question(id).await?;
            output(&serde_json::json!({ "removed": id }), flags.format)
        }
        QuestionCommands::Get { id } => {
            let question = ctx.service.get_question(id).await?;
            output(&question, flags.format)
        }
        QuestionCommands::List { questionnaire } => {
            let questions = ctx.service.list_questions(questionnaire).await?;
            output(&questions, flags.format)
        }
    }
}

fn new_question(args: &QuestionAddArgs) -> anyhow::Result<NewQuestion> {
    if args.operand.is_empty() {
        anyhow::bail!("one of --value or --document-2 with --property-2 must be provided");
    }
    Ok(NewQuestion {
        document_1_id: args.document_1.clone(),
        property_1: args.property_1.clone(),
        relation: parse_label::<Relation>(&args.relation, "relation")?,
        document_2_id: args.operand.document_2.clone(),
        property_2: args.operand.property_2.clone(),
        comparison_value: args.operand.value.clone(),
        system_value: args.system_value.clone(),
    })
}

fn question_update(args: &QuestionUpdateArgs) -> anyhow::Result<QuestionUpdate> {
    let mut builder = QuestionUpdateBuilder::new();
    let mut touched = false;

    if let Some(document_1) = &args.document_1 {
        builder = builder.document_1_id(document_1.as_str());
        touched = true;
    }
    if let Some(property_1) = &args.property_1 {
        builder = builder.property_1(property_1.as_str());
        touched = true;
    }
    if let Some(relation) = &args.relation {
        builder = builder.relation(parse_label::<Relation>(relation, "relation")?);
        touched = true;
    }
    let operand = &args.operand;
    if let (Some(document_2), Some(property_2)) = (&operand.document_2, &operand.property_2) {
        builder = builder.document_operand(document_2.as_str(), property_2.as_str());
        touched = true;
    }
    if let Some(value) = &operand.value {
        builder = builder.comparison_value(value.as_str());
        touched = true;
    }
    if let Some(system_value) = &args.system_value {
        builder = builder.system_value(system_value.as_str());
        touched = true;
    }

    if !touched {
        anyhow::bail!(
            "At least one of --document-1, --property-1, --relation, \
             --document-2/--property-2, --value, or --system-value must be provided"
        );
    }
    Ok(builder.build())
}
