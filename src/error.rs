use thiserror::Error;

/// Fatal construction-time problems. No `Sortable` is created and no state is
/// touched when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("container node not found in the visual tree")]
    ContainerNotFound,
    #[error("item selector must not be empty")]
    EmptyItemSelector,
    #[error("handle selector must not be empty")]
    EmptyHandleSelector,
}

/// Fatal gesture-start problems.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragError {
    /// A handle-restricted press matched the handle selector but no enclosing
    /// item was found below the container; the handle selector does not sit
    /// inside the item selector.
    #[error("drag handle matched outside any item; check the handle selector")]
    HandleOutsideItem,
}
