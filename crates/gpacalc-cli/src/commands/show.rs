//! The `gpacalc show` and `gpacalc scale` commands.

use anyhow::Result;

use super::render::{print_record, print_scale};
use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let (_config, store, _tracker) = ctx.open()?;
    print_record(store.record(), &ctx.format)
}

pub fn scale(ctx: &Context) -> Result<()> {
    print_scale(&ctx.format)
}
