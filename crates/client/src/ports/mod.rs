//! Ports - interfaces between the chat controller and its collaborators

pub mod outbound;
