//! Implementation of the `add-nav-link` command

use scaffold_content::Entry;

use super::{Report, RunOptions, WhenMissing, merge_file};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::naming;

/// Append a `{ href, title }` link for `name` to the navigation list.
pub fn run_add_nav_link(
    ctx: &ProjectContext,
    name: &str,
    title: Option<&str>,
    options: RunOptions,
) -> Result<()> {
    let segment = naming::route_segment(name);
    let title = title.map_or_else(|| naming::link_title(name), str::to_string);
    let entry = Entry::new(&segment)
        .with_field("kebab", &segment)
        .with_field("title", title);
    entry.validate()?;

    let mut report = Report::new("add-nav-link", format!("/{segment}"));
    report.push(merge_file(
        ctx,
        &ctx.source_path(&ctx.config.paths.nav),
        &ctx.config.nav_handler(),
        &entry,
        WhenMissing::Report,
        options,
    )?);
    report.finish(options.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const NAV: &str = r#"import { SidebarLink } from "@/components/SidebarItems";

export const defaultLinks: SidebarLink[] = [{ href: "/dashboard", title: "Home" }];

export const additionalNavbarLinks: SidebarLink[] = [];
"#;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        fs::write(temp.path().join("config/nav.ts"), NAV).unwrap();
        temp
    }

    #[test]
    fn test_links_are_appended_in_order() {
        let temp = project();
        let ctx = ProjectContext::load(temp.path(), None).unwrap();

        run_add_nav_link(&ctx, "phoneCases", None, RunOptions::default()).unwrap();
        run_add_nav_link(&ctx, "reviews", Some("Customer Reviews"), RunOptions::default()).unwrap();

        let nav = fs::read_to_string(temp.path().join("config/nav.ts")).unwrap();
        assert!(nav.ends_with(
            r#"export const additionalNavbarLinks: SidebarLink[] = [
  { href: "/phone-cases", title: "Phone Cases" },
  { href: "/reviews", title: "Customer Reviews" },
];
"#
        ));
        assert!(nav.contains(r#"defaultLinks: SidebarLink[] = [{ href: "/dashboard", title: "Home" }];"#));
    }

    #[test]
    fn test_existing_route_is_left_alone() {
        let temp = project();
        let ctx = ProjectContext::load(temp.path(), None).unwrap();

        run_add_nav_link(&ctx, "reviews", None, RunOptions::default()).unwrap();
        run_add_nav_link(&ctx, "reviews", Some("Other Title"), RunOptions::default()).unwrap();

        let nav = fs::read_to_string(temp.path().join("config/nav.ts")).unwrap();
        assert_eq!(nav.matches("/reviews").count(), 1);
        assert!(!nav.contains("Other Title"));
    }
}
