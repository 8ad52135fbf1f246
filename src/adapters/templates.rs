use include_dir::{Dir, DirEntry, include_dir};
use minijinja::{Environment, UndefinedBehavior, Value};
use serde_json::{Map, Value as JsonValue};

use crate::domain::{AppError, BackendKind, VHost};
use crate::ports::ConfigRenderer;

static TEMPLATES_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

const TEMPLATE_EXTENSION: &str = "conf.j2";

/// Renderer over the templates compiled into the binary.
pub struct EmbeddedTemplateRenderer {
    env: Environment<'static>,
}

impl EmbeddedTemplateRenderer {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self { env: build_template_environment()? })
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.env.templates().map(|(name, _)| name).collect();
        names.sort_unstable();
        names
    }
}

fn build_template_environment() -> Result<Environment<'static>, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    let mut sources = Vec::new();
    collect_templates(&TEMPLATES_DIR, &mut sources);
    for (name, source) in sources {
        env.add_template(name, source).map_err(|e| AppError::Render {
            template: name.to_string(),
            details: e.to_string(),
        })?;
    }

    Ok(env)
}

fn collect_templates(dir: &'static Dir<'static>, out: &mut Vec<(&'static str, &'static str)>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                if let Some(name) = file.path().to_str()
                    && name.ends_with(TEMPLATE_EXTENSION)
                    && let Some(source) = file.contents_utf8()
                {
                    out.push((name, source));
                }
            }
            DirEntry::Dir(subdir) => collect_templates(subdir, out),
        }
    }
}

fn template_name(backend: BackendKind, vhost: &VHost) -> String {
    format!("{}/{}.{TEMPLATE_EXTENSION}", backend.name(), vhost.kind.name())
}

/// Template context; unset optional fields stay undefined.
fn template_context(vhost: &VHost) -> Value {
    let mut ctx = Map::new();
    ctx.insert("domain".into(), JsonValue::from(vhost.domain.as_str()));
    ctx.insert("ssl".into(), JsonValue::from(vhost.ssl));

    let optional = [
        ("root", vhost.root.as_ref().map(|p| p.display().to_string())),
        ("proxy_pass", vhost.proxy_pass.clone()),
        ("php_version", vhost.php_version.clone()),
        ("ssl_cert", vhost.ssl_cert.as_ref().map(|p| p.display().to_string())),
        ("ssl_key", vhost.ssl_key.as_ref().map(|p| p.display().to_string())),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            ctx.insert(key.into(), JsonValue::from(value));
        }
    }

    Value::from_serialize(&ctx)
}

impl ConfigRenderer for EmbeddedTemplateRenderer {
    fn render(&self, backend: BackendKind, vhost: &VHost) -> Result<String, AppError> {
        let name = template_name(backend, vhost);
        let template = self
            .env
            .get_template(&name)
            .map_err(|_| AppError::TemplateNotFound { backend, kind: vhost.kind })?;

        template
            .render(template_context(vhost))
            .map_err(|e| AppError::Render { template: name, details: e.to_string() })
    }
}
