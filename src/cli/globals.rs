use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub token_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(token_secret: SecretString) -> Self {
        Self { token_secret }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("sup3r-secret"));
        assert_eq!(args.token_secret.expose_secret(), "sup3r-secret");
    }

    #[test]
    fn test_global_args_debug_redacts_secret() {
        let args = GlobalArgs::new(SecretString::from("sup3r-secret"));
        let debug = format!("{args:?}");
        assert!(!debug.contains("sup3r-secret"));
    }
}
