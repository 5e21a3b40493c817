use crate::connection::ConnectionId;
use std::error::Error as StdError;
use std::fmt;

/// A directed send failed. The caller decides whether to deregister the
/// connection in response.
#[derive(Debug, PartialEq, Eq)]
pub enum DeliveryError {
    /// The connection is registered but its peer is gone.
    ConnectionClosed(ConnectionId),
    /// No connection with this id is registered.
    UnknownConnection(ConnectionId),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeliveryError::ConnectionClosed(id) => {
                write!(f, "connection {} is closed", id.as_str())
            }
            DeliveryError::UnknownConnection(id) => {
                write!(f, "connection {} is not registered", id.as_str())
            }
        }
    }
}

impl StdError for DeliveryError {}
