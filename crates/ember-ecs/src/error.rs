use crate::entity::Entity;

/// Errors that can occur during world operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    #[error("entity capacity exhausted: at most {max} entities may be live")]
    Capacity { max: u32 },

    #[error("entity {0} is not alive")]
    InvalidReference(Entity),

    #[error("entity {entity} has no {component} component")]
    NotAttached {
        entity: Entity,
        component: &'static str,
    },

    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),

    #[error("component type {0} is not registered with this world")]
    UnregisteredComponent(&'static str),

    #[error("component type {0} registered twice")]
    DuplicateComponent(&'static str),

    #[error("a world holds at most {max} component types")]
    TooManyComponentTypes { max: usize },
}
