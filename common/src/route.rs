//! In-app pages, addressed through the URL fragment (`#/documents/12`) so a
//! reload or a shared link lands on the same page without server routing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Templates,
    Clients,
    Documents,
    DocumentEditor(i64),
    Settings,
    Accountant,
}

impl Route {
    /// Parses a `location.hash` value. Unknown fragments land on the
    /// dashboard.
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["templates"] => Self::Templates,
            ["clients"] => Self::Clients,
            ["documents"] => Self::Documents,
            ["documents", id] => id.parse().map(Self::DocumentEditor).unwrap_or(Self::Documents),
            ["settings"] => Self::Settings,
            ["accountant"] => Self::Accountant,
            _ => Self::Dashboard,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Self::Login => "#/login".into(),
            Self::Register => "#/register".into(),
            Self::Dashboard => "#/dashboard".into(),
            Self::Templates => "#/templates".into(),
            Self::Clients => "#/clients".into(),
            Self::Documents => "#/documents".into(),
            Self::DocumentEditor(id) => format!("#/documents/{id}"),
            Self::Settings => "#/settings".into(),
            Self::Accountant => "#/accountant".into(),
        }
    }

    /// Pages reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Sidebar entry highlighted for this page.
    pub fn section(&self) -> Self {
        match self {
            Self::DocumentEditor(_) => Self::Documents,
            other => *other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", Route::Dashboard)]
    #[case("#/login", Route::Login)]
    #[case("#/documents/", Route::Documents)]
    #[case("#/documents/42", Route::DocumentEditor(42))]
    #[case("#/documents/abc", Route::Documents)]
    #[case("#/nowhere", Route::Dashboard)]
    fn parses_hashes(#[case] hash: &str, #[case] expected: Route) {
        assert_eq!(Route::from_hash(hash), expected);
    }

    #[test]
    fn hash_round_trips_for_editor() {
        let route = Route::DocumentEditor(7);
        assert_eq!(Route::from_hash(&route.to_hash()), route);
        assert_eq!(route.section(), Route::Documents);
        assert!(!route.is_public());
    }
}
