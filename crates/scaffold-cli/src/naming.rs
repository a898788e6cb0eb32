//! Case conversions for entry names

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToTitleCase, ToUpperCamelCase};

/// Router key and file stem: `phone cases` → `phoneCases`.
pub fn router_key(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Route segment for hrefs: `PhoneCases` → `phone-cases`.
pub fn route_segment(name: &str) -> String {
    name.to_kebab_case()
}

/// Link label: `phone-cases` → `Phone Cases`.
pub fn link_title(name: &str) -> String {
    name.to_title_case()
}

/// Environment variable key: `database url` → `DATABASE_URL`.
pub fn env_key(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Component identifier: `theme-provider` → `ThemeProvider`.
pub fn component_name(name: &str) -> String {
    name.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_cases() {
        assert_eq!(router_key("phone-cases"), "phoneCases");
        assert_eq!(route_segment("PhoneCases"), "phone-cases");
        assert_eq!(link_title("phone-cases"), "Phone Cases");
        assert_eq!(env_key("databaseUrl"), "DATABASE_URL");
        assert_eq!(component_name("theme-provider"), "ThemeProvider");
    }

    #[test]
    fn already_converted_names_are_stable() {
        assert_eq!(router_key("user"), "user");
        assert_eq!(env_key("NEXT_PUBLIC_KEY"), "NEXT_PUBLIC_KEY");
        assert_eq!(component_name("ThemeProvider"), "ThemeProvider");
    }
}
