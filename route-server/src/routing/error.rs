//! Route query error types.

use crate::domain::InvalidSpeed;
use crate::graph::PathError;

/// Errors returned to callers of a route query.
///
/// All of these are deterministic; retrying the same query against the
/// same graph gives the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Origin or destination is not a loaded city
    #[error("unknown city for {field}: {name}")]
    UnknownCity { field: &'static str, name: String },

    /// Both cities are known but no chain of edges connects them
    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },

    /// A request parameter is missing or malformed
    #[error("invalid {parameter}: {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },
}

impl RouteError {
    /// Stable tag for logs and error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::UnknownCity { .. } => "unknown_city",
            RouteError::NoRoute { .. } => "no_route",
            RouteError::InvalidParameter { .. } => "invalid_parameter",
        }
    }

    /// The request field at fault, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RouteError::UnknownCity { field, .. } => Some(*field),
            RouteError::InvalidParameter { parameter, .. } => Some(*parameter),
            RouteError::NoRoute { .. } => None,
        }
    }

    /// Shorthand for a missing required field.
    pub fn missing(parameter: &'static str) -> Self {
        RouteError::InvalidParameter {
            parameter,
            message: format!("{parameter} is required"),
        }
    }
}

impl From<PathError> for RouteError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::UnknownCity { endpoint, name } => RouteError::UnknownCity {
                field: endpoint.field(),
                name,
            },
            PathError::NoRoute { from, to } => RouteError::NoRoute { from, to },
        }
    }
}

impl From<InvalidSpeed> for RouteError {
    fn from(err: InvalidSpeed) -> Self {
        RouteError::InvalidParameter {
            parameter: "avg_speed",
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AvgSpeed;
    use crate::graph::Endpoint;

    #[test]
    fn error_display() {
        let err = RouteError::UnknownCity {
            field: "from_city",
            name: "Nowhere".into(),
        };
        assert_eq!(err.to_string(), "unknown city for from_city: Nowhere");

        let err = RouteError::NoRoute {
            from: "Uzhhorod".into(),
            to: "Luhansk".into(),
        };
        assert_eq!(err.to_string(), "no route from Uzhhorod to Luhansk");

        let err = RouteError::missing("to_city");
        assert_eq!(err.to_string(), "invalid to_city: to_city is required");
    }

    #[test]
    fn kinds_are_distinct() {
        let unknown = RouteError::UnknownCity {
            field: "to_city",
            name: "X".into(),
        };
        let no_route = RouteError::NoRoute {
            from: "A".into(),
            to: "B".into(),
        };
        let invalid = RouteError::missing("from_city");

        assert_eq!(unknown.kind(), "unknown_city");
        assert_eq!(no_route.kind(), "no_route");
        assert_eq!(invalid.kind(), "invalid_parameter");

        assert_eq!(unknown.field(), Some("to_city"));
        assert_eq!(no_route.field(), None);
        assert_eq!(invalid.field(), Some("from_city"));
    }

    #[test]
    fn from_path_error() {
        let err: RouteError = PathError::UnknownCity {
            endpoint: Endpoint::Destination,
            name: "Atlantis".into(),
        }
        .into();
        assert_eq!(
            err,
            RouteError::UnknownCity {
                field: "to_city",
                name: "Atlantis".into()
            }
        );

        let err: RouteError = PathError::NoRoute {
            from: "A".into(),
            to: "B".into(),
        }
        .into();
        assert_eq!(err.kind(), "no_route");
    }

    #[test]
    fn from_invalid_speed() {
        let err: RouteError = AvgSpeed::new(131).unwrap_err().into();
        assert_eq!(err.field(), Some("avg_speed"));
        assert_eq!(err.kind(), "invalid_parameter");
    }
}
