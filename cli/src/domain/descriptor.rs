//! Container build descriptor generation.
//!
//! One fixed template per project type. All variability is interpolated
//! parameters; rendering is byte-for-byte deterministic.

use std::fmt::{self, Write as _};

use autodock_common::ProjectType;

use crate::domain::detect::Port;
use crate::domain::error::DetectError;

/// File name of the generated descriptor in the project root.
pub const DESCRIPTOR_FILE: &str = "Dockerfile";

const APP_DIR: &str = "/app";
const BUILD_STAGE: &str = "build";
const BUILD_OUTPUT: &str = "/app/out";
const NGINX_HTML: &str = "/usr/share/nginx/html";
const NGINX_SITE: &str = "/etc/nginx/conf.d/default.conf";

/// Base images the templates are parameterised with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImages {
    pub node: String,
    pub python: String,
    pub nginx: String,
}

impl Default for BaseImages {
    fn default() -> Self {
        Self {
            node: "node:18-alpine".to_string(),
            python: "python:3.11-slim".to_string(),
            nginx: "nginx:alpine".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    From { image: String, alias: Option<String> },
    Workdir(String),
    Copy { from: Option<String>, src: String, dest: String },
    Run(String),
    Env { key: String, value: String },
    Expose(u16),
    Cmd(Vec<String>),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From { image, alias: None } => write!(f, "FROM {image}"),
            Self::From { image, alias: Some(alias) } => write!(f, "FROM {image} AS {alias}"),
            Self::Workdir(dir) => write!(f, "WORKDIR {dir}"),
            Self::Copy { from: None, src, dest } => write!(f, "COPY {src} {dest}"),
            Self::Copy { from: Some(stage), src, dest } => {
                write!(f, "COPY --from={stage} {src} {dest}")
            }
            Self::Run(cmd) => write!(f, "RUN {cmd}"),
            Self::Env { key, value } => write!(f, "ENV {key}={value}"),
            Self::Expose(port) => write!(f, "EXPOSE {port}"),
            Self::Cmd(args) => {
                let quoted: Vec<String> = args.iter().map(|a| format!("{a:?}")).collect();
                write!(f, "CMD [{}]", quoted.join(", "))
            }
        }
    }
}

/// Ordered list of instructions starting with `FROM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub instructions: Vec<Instruction>,
}

/// Ordered build stages; the last one is the runtime image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDescriptor {
    pub stages: Vec<Stage>,
}

impl ContainerDescriptor {
    /// Render to descriptor text: stages separated by a blank line, with a
    /// trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for instruction in &stage.instructions {
                let _ = writeln!(out, "{instruction}");
            }
        }
        out
    }

    /// The port the runtime stage exposes.
    #[must_use]
    pub fn exposed_port(&self) -> Option<u16> {
        self.stages.last()?.instructions.iter().find_map(|i| match i {
            Instruction::Expose(port) => Some(*port),
            _ => None,
        })
    }
}

/// Generate the descriptor for a detected project.
///
/// # Errors
///
/// [`DetectError::EntryUnresolved`] when a runtime type has no entry file,
/// [`DetectError::ClassificationFailed`] for [`ProjectType::Unknown`].
pub fn generate(
    project_type: ProjectType,
    port: Port,
    entry: Option<&str>,
    images: &BaseImages,
) -> Result<ContainerDescriptor, DetectError> {
    let port = port.get();
    let stages = match project_type {
        ProjectType::BackendRuntime => {
            let entry = entry.ok_or(DetectError::EntryUnresolved)?;
            vec![backend_stage(&images.node, port, entry)]
        }
        ProjectType::ScriptingApp => {
            let entry = entry.ok_or(DetectError::EntryUnresolved)?;
            vec![python_stage(&images.python, port, entry)]
        }
        ProjectType::FrontendAssets => vec![
            frontend_build_stage(&images.node),
            nginx_stage(&images.nginx, port),
        ],
        ProjectType::FullstackFramework => vec![
            next_build_stage(&images.node),
            next_runtime_stage(&images.node, port),
        ],
        ProjectType::Unknown => return Err(DetectError::ClassificationFailed),
    };
    Ok(ContainerDescriptor { stages })
}

// ── Templates ────────────────────────────────────────────────────────────────

fn from(image: &str) -> Instruction {
    Instruction::From { image: image.to_string(), alias: None }
}

fn from_as(image: &str, alias: &str) -> Instruction {
    Instruction::From {
        image: image.to_string(),
        alias: Some(alias.to_string()),
    }
}

fn workdir() -> Instruction {
    Instruction::Workdir(APP_DIR.to_string())
}

fn copy(src: &str, dest: &str) -> Instruction {
    Instruction::Copy { from: None, src: src.to_string(), dest: dest.to_string() }
}

fn copy_from_build(src: &str, dest: &str) -> Instruction {
    Instruction::Copy {
        from: Some(BUILD_STAGE.to_string()),
        src: src.to_string(),
        dest: dest.to_string(),
    }
}

fn run(cmd: &str) -> Instruction {
    Instruction::Run(cmd.to_string())
}

fn env_port(port: u16) -> Instruction {
    Instruction::Env { key: "PORT".to_string(), value: port.to_string() }
}

fn cmd(args: &[&str]) -> Instruction {
    Instruction::Cmd(args.iter().map(|a| (*a).to_string()).collect())
}

fn backend_stage(image: &str, port: u16, entry: &str) -> Stage {
    Stage {
        instructions: vec![
            from(image),
            workdir(),
            copy("package*.json", "./"),
            run("npm ci --omit=dev"),
            copy(".", "."),
            env_port(port),
            Instruction::Expose(port),
            cmd(&["node", entry]),
        ],
    }
}

fn python_stage(image: &str, port: u16, entry: &str) -> Stage {
    Stage {
        instructions: vec![
            from(image),
            workdir(),
            copy("requirements.txt", "."),
            run("pip install --no-cache-dir -r requirements.txt"),
            copy(".", "."),
            env_port(port),
            Instruction::Expose(port),
            cmd(&["python", entry]),
        ],
    }
}

fn frontend_build_stage(image: &str) -> Stage {
    Stage {
        instructions: vec![
            from_as(image, BUILD_STAGE),
            workdir(),
            copy("package*.json", "./"),
            run("npm ci"),
            copy(".", "."),
            run("npm run build"),
            run(&format!(
                "if [ -d dist ]; then mv dist {BUILD_OUTPUT}; \
                 elif [ -d build ]; then mv build {BUILD_OUTPUT}; \
                 else echo 'no build output (dist/ or build/)' >&2; exit 1; fi"
            )),
        ],
    }
}

fn nginx_stage(image: &str, port: u16) -> Stage {
    Stage {
        instructions: vec![
            from(image),
            copy_from_build(BUILD_OUTPUT, NGINX_HTML),
            run(&format!(
                "sed -i 's/listen[[:space:]]*80;/listen {port};/' {NGINX_SITE}"
            )),
            Instruction::Expose(port),
            cmd(&["nginx", "-g", "daemon off;"]),
        ],
    }
}

fn next_build_stage(image: &str) -> Stage {
    Stage {
        instructions: vec![
            from_as(image, BUILD_STAGE),
            workdir(),
            copy("package*.json", "./"),
            run("npm ci"),
            copy(".", "."),
            run("mkdir -p public && npm run build"),
        ],
    }
}

fn next_runtime_stage(image: &str, port: u16) -> Stage {
    Stage {
        instructions: vec![
            from(image),
            workdir(),
            Instruction::Env { key: "NODE_ENV".to_string(), value: "production".to_string() },
            copy_from_build("/app/.next", "./.next"),
            copy_from_build("/app/public", "./public"),
            copy_from_build("/app/package*.json", "./"),
            copy_from_build("/app/node_modules", "./node_modules"),
            env_port(port),
            Instruction::Expose(port),
            cmd(&["npm", "start"]),
        ],
    }
}
