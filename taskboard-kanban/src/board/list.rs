//! ListBoards command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::types::Board;
use async_trait::async_trait;

/// List the boards the signed-in user can see
#[derive(Debug, Default, Clone)]
pub struct ListBoards;

impl ListBoards {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for ListBoards {
    type Output = Vec<Board>;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Vec<Board>> {
        ctx.gateway().list_boards().await
    }
}
