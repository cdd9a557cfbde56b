//! Authorization table lookup command.

use clap::Args;
use serde_json::json;

use deckhub_auth::policy::{Action, PolicyEngine, Relation};
use deckhub_core::error::AppError;
use deckhub_entity::resource::Visibility;

use crate::output::{self, OutputFormat};

/// Arguments for `decide`
#[derive(Debug, Args)]
pub struct DecideArgs {
    /// Resource visibility (public, private, limited)
    #[arg(long)]
    pub visibility: Visibility,
    /// Requested action (read, write)
    #[arg(long)]
    pub action: Action,
    /// Requester relation (owner, member, other, anonymous)
    #[arg(long)]
    pub relation: Relation,
}

/// Execute `decide`
pub fn execute(args: &DecideArgs, format: OutputFormat) -> Result<(), AppError> {
    let decision = PolicyEngine::table(args.visibility, args.action, args.relation);

    let value = json!({
        "visibility": args.visibility.as_str(),
        "action": args.action.to_string(),
        "relation": format!("{:?}", args.relation),
        "decision": decision.to_string(),
        "status": decision.status_code().as_u16(),
    });
    output::print_object(&value, format);
    Ok(())
}
