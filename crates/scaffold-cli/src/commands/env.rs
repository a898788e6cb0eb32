//! Implementation of the `add-env` command

use scaffold_content::{Entry, Visibility};

use super::{Report, RunOptions, WhenMissing, merge_file};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::naming;

const URL_VALIDATOR: &str = "z.string().url()";
const STRING_VALIDATOR: &str = "z.string().min(1)";

/// Arguments of `add-env`.
#[derive(Debug, Clone, Default)]
pub struct EnvArgs {
    pub key: String,
    pub public: bool,
    pub url: bool,
    pub validator: Option<String>,
    pub value: Option<String>,
}

impl EnvArgs {
    fn entry(&self) -> Entry {
        let validator = match (&self.validator, self.url) {
            (Some(validator), _) => validator.clone(),
            (None, true) => URL_VALIDATOR.to_string(),
            (None, false) => STRING_VALIDATOR.to_string(),
        };
        let visibility = if self.public {
            Visibility::Public
        } else {
            Visibility::Private
        };

        Entry::new(naming::env_key(&self.key))
            .with_visibility(visibility)
            .with_field("validator", validator)
            .with_field("value", self.value.clone().unwrap_or_default())
    }
}

/// Declare a variable in the env schema, then give it a line in `.env`.
///
/// A missing or unrecognised schema does not stop the `.env` update; a
/// missing `.env` is created.
pub fn run_add_env(ctx: &ProjectContext, args: EnvArgs, options: RunOptions) -> Result<()> {
    let entry = args.entry();
    entry.validate()?;
    let schema = ctx.config.env_handler()?;

    let mut report = Report::new("add-env", &entry.name);
    report.push(merge_file(
        ctx,
        &ctx.source_path(&ctx.config.paths.env_schema),
        &schema,
        &entry,
        WhenMissing::Report,
        options,
    )?);
    report.push(merge_file(
        ctx,
        &ctx.config.paths.dotenv.as_str().into(),
        &ctx.config.dotenv_handler(),
        &entry,
        WhenMissing::Create,
        options,
    )?);
    report.finish(options.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const ENV_SCHEMA: &str = r#"import { createEnv } from "@t3-oss/env-nextjs";
import { z } from "zod";

export const env = createEnv({
  server: {
    NODE_ENV: z.enum(["development", "test", "production"]).default("development"),
  },
  client: {
    // NEXT_PUBLIC_PUBLISHABLE_KEY: z.string().min(1),
  },
  experimental__runtimeEnv: {
    // NEXT_PUBLIC_PUBLISHABLE_KEY: process.env.NEXT_PUBLIC_PUBLISHABLE_KEY,
  },
});
"#;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("lib")).unwrap();
        fs::write(temp.path().join("lib/env.mjs"), ENV_SCHEMA).unwrap();
        temp
    }

    fn read(temp: &TempDir, path: &str) -> String {
        fs::read_to_string(temp.path().join(path)).unwrap()
    }

    #[test]
    fn test_entry_validator_defaults() {
        let entry = EnvArgs {
            key: "databaseUrl".into(),
            url: true,
            ..Default::default()
        }
        .entry();
        assert_eq!(entry.name, "DATABASE_URL");
        assert_eq!(entry.field("validator"), Some(URL_VALIDATOR));
        assert_eq!(entry.field("value"), Some(""));
        assert!(!entry.is_public());

        let entry = EnvArgs {
            key: "MODE".into(),
            validator: Some("z.enum([\"a\"])".into()),
            public: true,
            ..Default::default()
        }
        .entry();
        assert_eq!(entry.field("validator"), Some("z.enum([\"a\"])"));
        assert!(entry.is_public());
    }

    #[test]
    fn test_private_key_goes_to_server_and_dotenv() {
        let temp = project();
        let ctx = ProjectContext::load(temp.path(), None).unwrap();
        let args = EnvArgs {
            key: "DATABASE_URL".into(),
            url: true,
            value: Some("postgres://localhost/db".into()),
            ..Default::default()
        };

        run_add_env(&ctx, args, RunOptions::default()).unwrap();

        let schema = read(&temp, "lib/env.mjs");
        assert!(schema.contains("  server: {\n    DATABASE_URL: z.string().url(),\n    NODE_ENV"));
        assert_eq!(schema.matches("DATABASE_URL").count(), 1);
        assert_eq!(read(&temp, ".env"), "DATABASE_URL=postgres://localhost/db\n");
    }

    #[test]
    fn test_public_key_goes_to_every_section() {
        let temp = project();
        let ctx = ProjectContext::load(temp.path(), None).unwrap();
        let args = EnvArgs {
            key: "NEXT_PUBLIC_APP_NAME".into(),
            public: true,
            ..Default::default()
        };

        run_add_env(&ctx, args, RunOptions::default()).unwrap();

        let schema = read(&temp, "lib/env.mjs");
        assert!(schema.contains("NEXT_PUBLIC_APP_NAME: process.env.NEXT_PUBLIC_APP_NAME,"));
        assert_eq!(schema.matches("NEXT_PUBLIC_APP_NAME: z.string().min(1),").count(), 2);
    }

    #[test]
    fn test_missing_schema_still_updates_dotenv() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "NODE_ENV=development").unwrap();
        let ctx = ProjectContext::load(temp.path(), None).unwrap();
        let args = EnvArgs {
            key: "API_KEY".into(),
            ..Default::default()
        };

        let result = run_add_env(&ctx, args, RunOptions::default());

        assert!(matches!(result, Err(CliError::Unrecognized { count: 1 })));
        assert_eq!(read(&temp, ".env"), "NODE_ENV=development\nAPI_KEY=\n");
    }

    #[test]
    fn test_value_with_line_break_touches_nothing() {
        let temp = project();
        fs::write(temp.path().join(".env"), "NODE_ENV=development\n").unwrap();
        let ctx = ProjectContext::load(temp.path(), None).unwrap();
        let args = EnvArgs {
            key: "API_KEY".into(),
            value: Some("x\nADMIN=true".into()),
            ..Default::default()
        };

        let result = run_add_env(&ctx, args, RunOptions::default());

        assert!(matches!(result, Err(CliError::Content(_))));
        assert_eq!(read(&temp, ".env"), "NODE_ENV=development\n");
        assert_eq!(read(&temp, "lib/env.mjs"), ENV_SCHEMA);
    }
}
