//! Template rendering
//!
//! Tera-based HTML rendering. Templates are embedded in the binary with
//! rust-embed so the application ships as a single executable.

use anyhow::{Context as AnyhowContext, Result};
use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::models::User;

#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct Templates;

/// Template engine wrapping a preloaded Tera instance
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load all embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        let mut templates = Vec::new();
        for path in Templates::iter() {
            let file = Templates::get(&path)
                .with_context(|| format!("Missing embedded template: {}", path))?;
            let source = std::str::from_utf8(file.data.as_ref())
                .with_context(|| format!("Template is not valid UTF-8: {}", path))?
                .to_string();
            templates.push((path.to_string(), source));
        }

        tera.add_raw_templates(templates)
            .context("Failed to parse templates")?;

        Ok(Self { tera })
    }

    /// Render a template by name
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(name, context)
            .with_context(|| format!("Failed to render template: {}", name))
    }
}

/// Base template context with the logged-in user (if any)
pub fn base_context(current_user: Option<&User>) -> Context {
    let mut context = Context::new();
    context.insert("current_user", &current_user);
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_parse() {
        TemplateEngine::new().expect("templates should parse");
    }

    #[test]
    fn test_render_home_with_posts() {
        let engine = TemplateEngine::new().expect("engine");

        let mut context = base_context(None);
        context.insert(
            "posts",
            &serde_json::json!([
                {"id": 1, "title": "Hello", "body": "World", "author_id": 1,
                 "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"}
            ]),
        );

        let html = engine.render("home.html", &context).expect("render");
        assert!(html.contains("Hello"));
    }

    #[test]
    fn test_render_about_page() {
        let engine = TemplateEngine::new().expect("engine");
        let html = engine
            .render("about.html", &base_context(None))
            .expect("render");
        assert!(html.contains("About"));
    }

    #[test]
    fn test_nav_shows_username_when_logged_in() {
        let engine = TemplateEngine::new().expect("engine");

        let user = User::new(
            "alice".into(),
            "alice@example.com".into(),
            "hash".into(),
            None,
        );
        let html = engine
            .render("about.html", &base_context(Some(&user)))
            .expect("render");
        assert!(html.contains("alice"));
    }
}
