use generational_arena::Index;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("node name must not be empty")]
    EmptyNodeName,

    #[error("node not found in tree: {0:?}")]
    NodeNotFound(Index),

    #[error("node {child:?} is already attached to {parent:?}")]
    AlreadyAttached { child: Index, parent: Index },

    #[error("attaching {child:?} would make it its own ancestor")]
    WouldCycle { child: Index },
}

pub type TreeResult<T> = Result<T, TreeError>;
