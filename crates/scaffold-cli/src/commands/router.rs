//! Implementation of the `add-router` command

use scaffold_content::Entry;

use super::{Report, RunOptions, WhenMissing, merge_file};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::naming;

/// Register `name` in the root router and import it from its module.
pub fn run_add_router(ctx: &ProjectContext, name: &str, options: RunOptions) -> Result<()> {
    let key = naming::router_key(name);
    let entry = Entry::new(&key).with_import_path(ctx.config.router_import(&key));
    entry.validate()?;

    let mut report = Report::new("add-router", &key);
    report.push(merge_file(
        ctx,
        &ctx.source_path(ctx.config.root_router()),
        &ctx.config.router_handler(),
        &entry,
        WhenMissing::Report,
        options,
    )?);
    report.finish(options.json)
}
