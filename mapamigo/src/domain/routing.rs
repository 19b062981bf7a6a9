//! Route resolution and session gating.

/// Pages the application can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Sign-in form.
    Login,
    /// Account registration form.
    Register,
    /// The signed-in contact dashboard.
    Dashboard,
}

/// Outcome of resolving a path against the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the page.
    Render(Page),
    /// The path needs a session; send the visitor to the sign-in form.
    RedirectToLogin,
    /// No such route.
    NotFound,
}

/// Resolve `path` given whether a session exists.
///
/// The root path always lands on the sign-in form, the dashboard needs a
/// session, and the public forms stay reachable either way.
#[must_use]
pub fn resolve(path: &str, authenticated: bool) -> RouteDecision {
    match path {
        "/" => RouteDecision::RedirectToLogin,
        "/login" => RouteDecision::Render(Page::Login),
        "/register" => RouteDecision::Render(Page::Register),
        "/dashboard" if authenticated => RouteDecision::Render(Page::Dashboard),
        "/dashboard" => RouteDecision::RedirectToLogin,
        _ => RouteDecision::NotFound,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/", false, RouteDecision::RedirectToLogin)]
    #[case("/", true, RouteDecision::RedirectToLogin)]
    #[case("/login", false, RouteDecision::Render(Page::Login))]
    #[case("/login", true, RouteDecision::Render(Page::Login))]
    #[case("/register", false, RouteDecision::Render(Page::Register))]
    #[case("/dashboard", true, RouteDecision::Render(Page::Dashboard))]
    #[case("/dashboard", false, RouteDecision::RedirectToLogin)]
    #[case("/settings", true, RouteDecision::NotFound)]
    #[case("/LOGIN", false, RouteDecision::NotFound)]
    #[case("", false, RouteDecision::NotFound)]
    fn resolves_paths_against_the_session(
        #[case] path: &str,
        #[case] authenticated: bool,
        #[case] expected: RouteDecision,
    ) {
        assert_eq!(resolve(path, authenticated), expected);
    }
}
