#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

use anyhow::Result;
use vergen::EmitBuilder;

fn main() -> Result<()> {
    // Outside of a git checkout vergen emits placeholder values instead of failing.
    EmitBuilder::builder().all_git().emit()?;

    return Ok(());
}
