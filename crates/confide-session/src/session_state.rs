use confide_core::Identity;

/// Coarse session state derived from the current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Unauthenticated,
    Anonymous,
    Registered,
}

impl SessionState {
    pub fn of(identity: Option<&Identity>) -> Self {
        match identity {
            None => Self::Unauthenticated,
            Some(identity) if identity.is_anonymous => Self::Anonymous,
            Some(_) => Self::Registered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Anonymous => "anonymous",
            Self::Registered => "registered",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
