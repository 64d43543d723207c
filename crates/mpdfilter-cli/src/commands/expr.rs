use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::{ArgAction, Args};
use mpdfilter_core::expr::effective_operator;
use mpdfilter_core::{crumbs_for_display, Clause, Features, RenderOptions, View};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Args)]
pub struct SerializeArgs {
    /// Committed clause; repeat for more
    #[arg(
        long = "clause",
        num_args = 3,
        value_names = ["TAG", "OP", "VALUE"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub clauses: Vec<String>,
    /// Tag of the clause being typed (defaults to config default_tag)
    #[arg(long)]
    pub tag: Option<String>,
    /// Operator of the clause being typed (defaults to config default_operator)
    #[arg(long = "op")]
    pub operator: Option<String>,
    /// Value being typed; empty means no pending clause
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub value: String,
    /// Build for the direct database listing, which never rewrites operators
    #[arg(long)]
    pub database_list: bool,
    /// Treat the backend as lacking starts_with
    #[arg(long)]
    pub no_starts_with: bool,
    /// Treat the backend as lacking regex support
    #[arg(long)]
    pub no_pcre: bool,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    pub expression: String,
    /// The input box still holds text, so the last segment is not a crumb yet
    #[arg(long)]
    pub pending_input: bool,
}

#[derive(Debug, Serialize)]
struct ExpressionDto<'a> {
    expression: &'a str,
}

pub fn serialize(ctx: &Context<'_>, args: SerializeArgs) -> Result<()> {
    let options = render_options(ctx, &args);
    let committed: Vec<Clause> = args
        .clauses
        .chunks_exact(3)
        .map(|parts| Clause::new(parts[0].as_str(), parts[1].as_str(), parts[2].as_str()))
        .collect();

    let tag = args.tag.unwrap_or_else(|| ctx.config.default_tag.clone());
    if tag.trim().is_empty() && !args.value.is_empty() {
        return Err(invalid_input("tag cannot be empty"));
    }
    let operator = match args.operator {
        Some(raw) => raw.into(),
        None => ctx.config.default_operator.clone(),
    };
    let pending = Clause::new(tag, operator, args.value);

    for clause in committed.iter().chain(Some(&pending)) {
        let (operator, _) = effective_operator(clause, &options);
        if &operator != clause.operator() {
            debug!(
                tag = clause.tag(),
                from = %clause.operator(),
                to = %operator,
                "operator rewritten"
            );
        }
    }

    let expression = mpdfilter_core::serialize(&committed, Some(&pending), &options);
    debug!(clauses = committed.len(), expression = %expression, "expression built");

    if ctx.json {
        return print_json(&ExpressionDto {
            expression: &expression,
        });
    }
    println!("{}", expression);
    Ok(())
}

pub fn parse(ctx: &Context<'_>, args: ParseArgs) -> Result<()> {
    let crumbs = crumbs_for_display(&args.expression, !args.pending_input);
    debug!(crumbs = crumbs.len(), "expression parsed");

    if ctx.json {
        return print_json(&crumbs);
    }

    if crumbs.is_empty() {
        println!("no clauses");
        return Ok(());
    }
    for crumb in crumbs {
        println!("{}", crumb);
    }
    Ok(())
}

fn render_options(ctx: &Context<'_>, args: &SerializeArgs) -> RenderOptions {
    let configured = ctx.config.features;
    let features = Features {
        starts_with: configured.starts_with && !args.no_starts_with,
        pcre: configured.pcre && !args.no_pcre,
    };
    let view = if args.database_list {
        View::DatabaseList
    } else {
        View::Other
    };
    RenderOptions::new(features, view)
}
