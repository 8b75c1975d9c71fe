use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Event { action } => commands::event::handle(&action, ctx, flags).await,
        Commands::Doctype { action } => commands::doctype::handle(&action, ctx, flags).await,
        Commands::Document { action } => commands::document::handle(&action, ctx, flags).await,
        Commands::Questionnaire { action } => {
            commands::questionnaire::handle(&action, ctx, flags).await
        }
        Commands::Question { action } => commands::question::handle(&action, ctx, flags).await,
        Commands::Process { action } => commands::process::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
