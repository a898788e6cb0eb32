//! End-to-end merges against realistic generated files

use pretty_assertions::assert_eq;
use scaffold_content::{
    AggregatorHandler, ConstructHandler, Document, Entry, Error, ListHandler, ProviderHandler,
    SectionedHandler, Shape, merge, merge_all,
};

const ROOT_ROUTER: &str = r#"import { router } from "@/lib/server/trpc";

export const appRouter = router({});

export type AppRouter = typeof appRouter;
"#;

const ENV_SCHEMA: &str = r#"import { createEnv } from "@t3-oss/env-nextjs";
import { z } from "zod";

export const env = createEnv({
  server: {
    NODE_ENV: z.enum(["development", "test", "production"]),
  },
  client: {
    // NEXT_PUBLIC_PUBLISHABLE_KEY: z.string().min(1),
  },
  experimental__runtimeEnv: {
    // NEXT_PUBLIC_PUBLISHABLE_KEY: process.env.NEXT_PUBLIC_PUBLISHABLE_KEY,
  },
});
"#;

fn env_handler() -> SectionedHandler {
    SectionedHandler::env("createEnv", ["server", "client", "experimental__runtimeEnv"])
}

#[test]
fn empty_aggregator_gains_member_and_import() {
    let document = Document::new("src/lib/server/routers/_app.ts", ROOT_ROUTER);
    let entry = Entry::new("user").with_import_path("./user");

    let result = merge(&document, &AggregatorHandler::new("router"), &entry).unwrap();

    assert!(result.applied);
    assert_eq!(
        result.document.source(),
        r#"import { router } from "@/lib/server/trpc";
import { userRouter } from "./user";

export const appRouter = router({ user: userRouter });

export type AppRouter = typeof appRouter;
"#
    );
}

#[test]
fn multi_line_aggregator_normalizes_trailing_comma() {
    let handler = AggregatorHandler::new("router");
    let document = Document::from_source(
        "export const appRouter = router({\n  a: aRouter,\n  b: bRouter\n});\n",
    );

    let result = merge(&document, &handler, &Entry::new("c")).unwrap();

    assert_eq!(
        result.document.source(),
        "export const appRouter = router({\n  a: aRouter,\n  b: bRouter,\n  c: cRouter,\n});\n"
    );
    let shape = handler.classify(&result.document).unwrap();
    assert!(matches!(shape, Shape::MultiLineAggregate(_)));
    assert_eq!(shape.entry_count(), Some(3));
}

#[test]
fn public_env_entry_reaches_every_section() {
    let document = Document::new("src/lib/env.mjs", ENV_SCHEMA);
    let entry = Entry::new("API_KEY")
        .public()
        .with_field("validator", "z.string().min(1)");

    let result = merge(&document, &env_handler(), &entry).unwrap();

    insta::assert_snapshot!(result.document.source(), @r#"
    import { createEnv } from "@t3-oss/env-nextjs";
    import { z } from "zod";

    export const env = createEnv({
      server: {
        API_KEY: z.string().min(1),
        NODE_ENV: z.enum(["development", "test", "production"]),
      },
      client: {
        API_KEY: z.string().min(1),
        // NEXT_PUBLIC_PUBLISHABLE_KEY: z.string().min(1),
      },
      experimental__runtimeEnv: {
        API_KEY: process.env.API_KEY,
        // NEXT_PUBLIC_PUBLISHABLE_KEY: process.env.NEXT_PUBLIC_PUBLISHABLE_KEY,
      },
    });
    "#);
}

#[test]
fn private_env_entry_only_touches_server() {
    let document = Document::from_source(ENV_SCHEMA);
    let entry = Entry::new("DATABASE_URL").with_field("validator", "z.string().url()");

    let result = merge(&document, &env_handler(), &entry).unwrap();

    assert_eq!(result.edits.len(), 1);
    let diff = result.diff(&document);
    assert_eq!(diff.added(), 1);
    assert_eq!(diff.removed(), 0);
}

#[test]
fn repeated_merge_is_a_no_op() {
    let handler = AggregatorHandler::new("router");
    let entry = Entry::new("user").with_import_path("./user");
    let first = merge(&Document::from_source(ROOT_ROUTER), &handler, &entry).unwrap();

    let second = merge(&first.document, &handler, &entry).unwrap();

    assert!(!second.applied);
    assert!(second.edits.is_empty());
    assert_eq!(second.document, first.document);
}

#[test]
fn spread_aggregator_is_left_alone() {
    let document = Document::new("src/root.ts", "export const appRouter = router({ ...base });\n");

    let err = merge(&document, &AggregatorHandler::new("router"), &Entry::new("user")).unwrap_err();

    assert!(err.is_recoverable());
    assert!(matches!(err, Error::ShapeUnrecognized { ref reason, .. } if reason.contains("spread")));
    assert_eq!(document.source(), "export const appRouter = router({ ...base });\n");
}

#[test]
fn nav_links_accumulate_in_order() {
    let document = Document::from_source(
        "import { AdditionalLinks } from \"@/config/nav\";\n\nexport const additionalNavbarLinks: AdditionalLinks[] = [];\n",
    );
    let entries = [("computers", "Computers"), ("phone-cases", "Phone Cases")].map(|(kebab, title)| {
        Entry::new(kebab)
            .with_field("kebab", kebab)
            .with_field("title", title)
    });

    let (merged, summary) =
        merge_all(&document, &ListHandler::nav_links("additionalNavbarLinks"), &entries).unwrap();

    assert_eq!(summary.applied, ["computers", "phone-cases"]);
    assert_eq!(
        merged.source(),
        "import { AdditionalLinks } from \"@/config/nav\";\n\nexport const additionalNavbarLinks: AdditionalLinks[] = [\n  { href: \"/computers\", title: \"Computers\" },\n  { href: \"/phone-cases\", title: \"Phone Cases\" },\n];\n"
    );
}

#[test]
fn providers_nest_inside_each_other() {
    let document = Document::from_source(
        "export default function RootLayout({ children }) {\n  return <body>{children}</body>;\n}\n",
    );
    let entries = [
        Entry::new("ThemeProvider").with_import_path("@/components/ThemeProvider"),
        Entry::new("Toaster"),
    ];

    let (merged, summary) = merge_all(&document, &ProviderHandler::new(), &entries).unwrap();

    assert_eq!(summary.skipped.len(), 0);
    assert!(merged.source().starts_with(
        "import { ThemeProvider } from \"@/components/ThemeProvider\";\nexport default"
    ));
    assert!(merged
        .source()
        .contains("<body><ThemeProvider><Toaster>{children}</Toaster></ThemeProvider></body>"));
}

#[test]
fn commented_example_does_not_count_as_present() {
    let document = Document::from_source("// user: userRouter\nrouter({});\n");
    let result = merge(&document, &AggregatorHandler::new("router"), &Entry::new("user")).unwrap();
    assert!(result.applied);
    assert!(result.document.source().ends_with("router({ user: userRouter });\n"));
}

#[test]
fn invalid_entry_names_are_rejected_before_planning() {
    let document = Document::from_source("router({});");
    let err = merge(&document, &AggregatorHandler::new("router"), &Entry::new("a b")).unwrap_err();
    assert!(matches!(err, Error::InvalidEntry(_)));
}
