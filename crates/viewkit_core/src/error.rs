//! Crate-wide error aggregation.
//!
//! # Responsibility
//! - Define the startup registration error shared by registries and the
//!   registration pipeline.
//! - Aggregate every core error behind one type with a four-way `kind`
//!   discriminator, so hosts can route failures without matching each
//!   concern's enum.
//!
//! # Invariants
//! - Underlying causes stay reachable through `Error::source`.
//! - Registration failures are fatal at startup and are never downgraded.

use crate::convert::converter::ConvertError;
use crate::message::resolver::MessageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fatal startup registration failure.
///
/// Any of these means the deployment is broken; the process must not be
/// placed in service. There is no partial-startup mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A declared renderer exposes no zero-argument construction path.
    MissingConstructor {
        renderer_type: String,
        implementor: &'static str,
    },
    /// The target render kit is not registered.
    UnknownRenderKit {
        render_kit_id: String,
        renderer_type: String,
    },
    /// Registration attempted after the startup freeze.
    RegistrySealed { registry: &'static str },
    /// The process-wide runtime was installed twice.
    RuntimeAlreadyInstalled,
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingConstructor {
                renderer_type,
                implementor,
            } => write!(
                f,
                "renderer `{renderer_type}` ({implementor}) declares no zero-argument \
                 constructor; refusing to start"
            ),
            Self::UnknownRenderKit {
                render_kit_id,
                renderer_type,
            } => write!(
                f,
                "render kit `{render_kit_id}` is not registered; cannot install renderer \
                 `{renderer_type}`"
            ),
            Self::RegistrySealed { registry } => write!(
                f,
                "{registry} registry is sealed; registration is only allowed during startup"
            ),
            Self::RuntimeAlreadyInstalled => {
                write!(f, "ui runtime already installed for this process")
            }
        }
    }
}

impl Error for RegistrationError {}

/// Discriminator over every failure class this core can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required argument absent; programmer error.
    Invocation,
    /// User input could not be converted; recoverable.
    Conversion,
    /// Diagnostic template table is misconfigured.
    TemplateMissing,
    /// Startup registration failed; fatal.
    Registration,
}

/// Aggregated core error.
#[derive(Debug)]
pub enum CoreError {
    Convert(ConvertError),
    Message(MessageError),
    Registration(RegistrationError),
}

impl CoreError {
    /// Classifies this error for routing policy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Convert(ConvertError::Invocation { .. }) => ErrorKind::Invocation,
            Self::Convert(ConvertError::Conversion { .. }) => ErrorKind::Conversion,
            Self::Message(MessageError::TemplateMissing { .. }) => ErrorKind::TemplateMissing,
            Self::Registration(_) => ErrorKind::Registration,
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Convert(err) => write!(f, "{err}"),
            Self::Message(err) => write!(f, "{err}"),
            Self::Registration(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Convert(err) => Some(err),
            Self::Message(err) => Some(err),
            Self::Registration(err) => Some(err),
        }
    }
}

impl From<ConvertError> for CoreError {
    fn from(err: ConvertError) -> Self {
        Self::Convert(err)
    }
}

impl From<MessageError> for CoreError {
    fn from(err: MessageError) -> Self {
        Self::Message(err)
    }
}

impl From<RegistrationError> for CoreError {
    fn from(err: RegistrationError) -> Self {
        Self::Registration(err)
    }
}
