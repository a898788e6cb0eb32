//! `scaffold.toml` project configuration

use serde::{Deserialize, Serialize};

use scaffold_content::{
    AggregatorHandler, DotEnvHandler, ListHandler, ProviderHandler, SectionedHandler,
};

use crate::error::{CliError, Result};

pub const CONFIG_FILE: &str = "scaffold.toml";

/// Post-write formatter for generated files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    #[default]
    None,
    Prettier,
}

/// Project layout and conventions. Every field has a default, so an empty
/// or absent file describes a standard project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Source root the managed paths and the import alias are relative to.
    pub root_path: String,
    pub alias: String,
    /// t3-style layout: routers under `routers/`, `createTRPCRouter` factory.
    pub t3: bool,
    pub formatter: FormatterKind,
    pub paths: PathsConfig,
    pub env: EnvConfig,
    pub nav: NavConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root_path: String::new(),
            alias: "@".to_string(),
            t3: false,
            formatter: FormatterKind::None,
            paths: PathsConfig::default(),
            env: EnvConfig::default(),
            nav: NavConfig::default(),
        }
    }
}

/// Managed documents, relative to `root_path` except `dotenv`, which is
/// relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Defaults by layout when unset.
    pub root_router: Option<String>,
    pub nav: String,
    pub env_schema: String,
    pub root_layout: String,
    pub dotenv: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root_router: None,
            nav: "config/nav.ts".to_string(),
            env_schema: "lib/env.mjs".to_string(),
            root_layout: "app/layout.tsx".to_string(),
            dotenv: ".env".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub call: String,
    /// Server, client and runtime-exposure section names, in that order.
    pub sections: Vec<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            call: "createEnv".to_string(),
            sections: vec![
                "server".to_string(),
                "client".to_string(),
                "experimental__runtimeEnv".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub binding: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            binding: "additionalNavbarLinks".to_string(),
        }
    }
}

impl ProjectConfig {
    pub fn root_router(&self) -> &str {
        match &self.paths.root_router {
            Some(path) => path,
            None if self.t3 => "server/api/root.ts",
            None => "lib/server/routers/_app.ts",
        }
    }

    pub fn router_factory(&self) -> &'static str {
        if self.t3 { "createTRPCRouter" } else { "router" }
    }

    /// Import specifier of a router module, relative to the root router.
    pub fn router_import(&self, key: &str) -> String {
        if self.t3 {
            format!("./routers/{key}")
        } else {
            format!("./{key}")
        }
    }

    pub fn router_handler(&self) -> AggregatorHandler {
        AggregatorHandler::new(self.router_factory())
    }

    pub fn nav_handler(&self) -> ListHandler {
        ListHandler::nav_links(&self.nav.binding)
    }

    pub fn env_handler(&self) -> Result<SectionedHandler> {
        let [server, client, runtime] = self.env.sections.as_slice() else {
            return Err(CliError::user(format!(
                "env.sections must name exactly three sections (server, client, runtime), got {}",
                self.env.sections.len()
            )));
        };
        Ok(SectionedHandler::env(
            &self.env.call,
            [server.as_str(), client.as_str(), runtime.as_str()],
        ))
    }

    pub fn provider_handler(&self) -> ProviderHandler {
        ProviderHandler::new()
    }

    pub fn dotenv_handler(&self) -> DotEnvHandler {
        DotEnvHandler
    }
}
