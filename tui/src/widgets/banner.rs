/// ASCII banner drawn on the home screen. ASCII-only so it lines up in any
/// terminal font.
pub const HOME_BANNER: &str = r"    _    ___   ____  ____ _____
   / \  |_ _| |  _ \|  _ \_   _|
  / _ \  | |  | |_) | |_) || |
 / ___ \ | |  |  __/|  __/ | |
/_/   \_\___| |_|   |_|    |_|
";

pub const TAGLINE: &str = "The Future of Presentation Creation with AI Power";

/// Banner rows, top to bottom.
pub fn banner_lines() -> Vec<&'static str> {
    HOME_BANNER.lines().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_is_ascii() {
        assert!(HOME_BANNER.is_ascii());
        assert_eq!(banner_lines().len(), 5);
    }
}
