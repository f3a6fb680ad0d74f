//! The `Execute` trait implemented by every command

use crate::error::Result;
use async_trait::async_trait;

/// A command that runs against a context.
///
/// Commands are plain structs whose fields are the parameters. The context
/// provides access; the command does the work.
#[async_trait]
pub trait Execute<C: Sync + ?Sized>: Send + Sync {
    /// What a successful run produces
    type Output: Send;

    async fn execute(&self, ctx: &C) -> Result<Self::Output>;
}
