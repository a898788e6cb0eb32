//! Implementation of the `add-provider` command

use scaffold_content::Entry;

use super::{Report, RunOptions, WhenMissing, merge_file};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::naming;

/// Wrap the root layout's children in `<Name>` and import it from `from`.
pub fn run_add_provider(
    ctx: &ProjectContext,
    name: &str,
    from: &str,
    options: RunOptions,
) -> Result<()> {
    let component = naming::component_name(name);
    let entry = Entry::new(&component).with_import_path(ctx.import_specifier(from));
    entry.validate()?;

    let mut report = Report::new("add-provider", &component);
    report.push(merge_file(
        ctx,
        &ctx.source_path(&ctx.config.paths.root_layout),
        &ctx.config.provider_handler(),
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

    const LAYOUT: &str = r#"import "./globals.css";

export default function RootLayout({
  children,
}: {
  children: React.ReactNode;
}) {
  return (
    <html lang="en">
      <body>{children}</body>
    </html>
  );
}
"#;

    #[test]
    fn test_providers_nest_inside_existing_ones() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::write(temp.path().join("app/layout.tsx"), LAYOUT).unwrap();
        let ctx = ProjectContext::load(temp.path(), None).unwrap();

        run_add_provider(&ctx, "theme-provider", "components/ThemeProvider.tsx", RunOptions::default())
            .unwrap();
        run_add_provider(&ctx, "Toaster", "sonner", RunOptions::default()).unwrap();

        let layout = fs::read_to_string(temp.path().join("app/layout.tsx")).unwrap();
        assert!(layout.starts_with(
            r#"import "./globals.css";
import { ThemeProvider } from "@/components/ThemeProvider";
import { Toaster } from "sonner";
"#
        ));
        assert!(layout.contains(
            "<body><ThemeProvider><Toaster>{children}</Toaster></ThemeProvider></body>"
        ));

        run_add_provider(&ctx, "Toaster", "sonner", RunOptions::default()).unwrap();
        assert_eq!(fs::read_to_string(temp.path().join("app/layout.tsx")).unwrap(), layout);
    }
}
