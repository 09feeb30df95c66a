/// Where every completed sign-in or sign-out lands.
pub const HOME_PATH: &str = "/";

/// Fixed redirect policy: the requested destination is not consulted.
pub fn on_redirect() -> &'static str {
    HOME_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_is_home() {
        assert_eq!(on_redirect(), "/");
    }
}
